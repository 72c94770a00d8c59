use super::expression::Expression;
use super::name::SymbolicName;
use super::visit::{Segment, Visitable, Visitor};
use crate::{functions, Error};
use serde::{Deserialize, Serialize};

fn checked_label<S: Into<String>>(label: S) -> Result<String, Error> {
    let label = label.into();
    if label.is_empty() {
        Err(Error::InvalidArgument("labels and types must not be empty"))
    } else {
        Ok(label)
    }
}

fn property_of(container: Option<&SymbolicName>, key: &str) -> Result<Expression, Error> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("property key must not be empty"));
    }
    Ok(Expression::Property {
        container: container.cloned().ok_or(Error::MissingSymbolicName)?,
        key: key.to_string(),
    })
}

/// A node pattern, e.g. `(p:Person)` or `()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    symbolic_name: Option<SymbolicName>,
    labels: Vec<String>,
}

#[derive(Deserialize)]
struct RawNode {
    symbolic_name: Option<SymbolicName>,
    labels: Vec<String>,
}

impl TryFrom<RawNode> for Node {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        Ok(Self {
            symbolic_name: raw.symbolic_name,
            labels: raw
                .labels
                .into_iter()
                .map(checked_label)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl Node {
    pub fn new<I, S>(primary_label: &str, additional_labels: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut labels = vec![checked_label(primary_label)?];
        for label in additional_labels {
            labels.push(checked_label(label)?);
        }
        Ok(Self {
            symbolic_name: None,
            labels,
        })
    }

    /// A node matching any node, without labels.
    pub fn any() -> Self {
        Self {
            symbolic_name: None,
            labels: Vec::new(),
        }
    }

    /// A copy of this node, bound to the given name.
    pub fn named(&self, name: &str) -> Result<Self, Error> {
        Ok(Self {
            symbolic_name: Some(SymbolicName::new(name)?),
            labels: self.labels.clone(),
        })
    }

    pub fn symbolic_name(&self) -> Option<&SymbolicName> {
        self.symbolic_name.as_ref()
    }

    pub fn required_symbolic_name(&self) -> Result<&SymbolicName, Error> {
        self.symbolic_name.as_ref().ok_or(Error::MissingSymbolicName)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_labeled(&self) -> bool {
        !self.labels.is_empty()
    }

    pub fn property(&self, key: &str) -> Result<Expression, Error> {
        property_of(self.symbolic_name(), key)
    }

    /// `id(name)` of this node.
    pub fn internal_id(&self) -> Result<Expression, Error> {
        functions::id(self)
    }

    pub fn relationship_to(&self, other: &Node) -> OngoingRelationship {
        OngoingRelationship::new(self.clone(), Direction::Outgoing, other.clone())
    }

    pub fn relationship_from(&self, other: &Node) -> OngoingRelationship {
        OngoingRelationship::new(self.clone(), Direction::Incoming, other.clone())
    }

    pub fn relationship_between(&self, other: &Node) -> OngoingRelationship {
        OngoingRelationship::new(self.clone(), Direction::Either, other.clone())
    }
}

impl Visitable for Node {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Node(self));
        self.symbolic_name.accept(visitor);
        visitor.leave(Segment::Node(self));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `(left)-->(right)`
    Outgoing,
    /// `(left)<--(right)`
    Incoming,
    /// `(left)--(right)`
    Either,
}

impl Direction {
    pub fn symbol_left(self) -> &'static str {
        match self {
            Self::Incoming => "<-",
            Self::Outgoing | Self::Either => "-",
        }
    }

    pub fn symbol_right(self) -> &'static str {
        match self {
            Self::Outgoing => "->",
            Self::Incoming | Self::Either => "-",
        }
    }
}

/// A single hop between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRelationship")]
pub struct Relationship {
    left: Node,
    direction: Direction,
    right: Node,
    symbolic_name: Option<SymbolicName>,
    types: Vec<String>,
}

#[derive(Deserialize)]
struct RawRelationship {
    left: Node,
    direction: Direction,
    right: Node,
    symbolic_name: Option<SymbolicName>,
    types: Vec<String>,
}

impl TryFrom<RawRelationship> for Relationship {
    type Error = Error;

    fn try_from(raw: RawRelationship) -> Result<Self, Self::Error> {
        let mut hop = PendingHop {
            left: raw.left,
            direction: raw.direction,
            right: raw.right,
            symbolic_name: raw.symbolic_name,
            types: Vec::new(),
        };
        hop.set_types(raw.types)?;
        Ok(hop.finish())
    }
}

impl Relationship {
    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn right(&self) -> &Node {
        &self.right
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn symbolic_name(&self) -> Option<&SymbolicName> {
        self.symbolic_name.as_ref()
    }

    pub fn required_symbolic_name(&self) -> Result<&SymbolicName, Error> {
        self.symbolic_name.as_ref().ok_or(Error::MissingSymbolicName)
    }

    /// A copy of this relationship, bound to the given name.
    pub fn named(&self, name: &str) -> Result<Self, Error> {
        Ok(Self {
            symbolic_name: Some(SymbolicName::new(name)?),
            ..self.clone()
        })
    }

    pub fn property(&self, key: &str) -> Result<Expression, Error> {
        property_of(self.symbolic_name(), key)
    }

    fn accept_detail(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::RelationshipDetail(self));
        self.symbolic_name.accept(visitor);
        visitor.leave(Segment::RelationshipDetail(self));
    }
}

impl Visitable for Relationship {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Relationship(self));
        self.left.accept(visitor);
        self.accept_detail(visitor);
        self.right.accept(visitor);
        visitor.leave(Segment::Relationship(self));
    }
}

/// Consecutive hops, where each hop starts at the
/// right node of the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRelationshipChain")]
pub struct RelationshipChain {
    relationships: Vec<Relationship>,
}

#[derive(Deserialize)]
struct RawRelationshipChain {
    relationships: Vec<Relationship>,
}

impl TryFrom<RawRelationshipChain> for RelationshipChain {
    type Error = Error;

    fn try_from(raw: RawRelationshipChain) -> Result<Self, Self::Error> {
        if raw.relationships.len() < 2 {
            return Err(Error::InvalidArgument(
                "a relationship chain needs at least two hops",
            ));
        }
        let connected = raw
            .relationships
            .windows(2)
            .all(|pair| pair[0].right == pair[1].left);
        if !connected {
            return Err(Error::InvalidArgument(
                "each hop must start at the right node of the previous hop",
            ));
        }
        Ok(Self {
            relationships: raw.relationships,
        })
    }
}

impl RelationshipChain {
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Chains always hold at least two hops.
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }
}

impl Visitable for RelationshipChain {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::RelationshipChain(self));
        if let Some(first) = self.relationships.first() {
            first.left.accept(visitor);
        }
        for relationship in &self.relationships {
            relationship.accept_detail(visitor);
            relationship.right.accept(visitor);
        }
        visitor.leave(Segment::RelationshipChain(self));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternElement {
    Node(Node),
    Relationship(Relationship),
    Chain(RelationshipChain),
}

impl PatternElement {
    /// The hops of this element, empty for a node.
    pub fn relationships(&self) -> &[Relationship] {
        match self {
            Self::Node(_) => &[],
            Self::Relationship(relationship) => std::slice::from_ref(relationship),
            Self::Chain(chain) => chain.relationships(),
        }
    }
}

impl Visitable for PatternElement {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Self::Node(node) => node.accept(visitor),
            Self::Relationship(relationship) => relationship.accept(visitor),
            Self::Chain(chain) => chain.accept(visitor),
        }
    }
}

impl From<Node> for PatternElement {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<&Node> for PatternElement {
    fn from(node: &Node) -> Self {
        Self::Node(node.clone())
    }
}

impl From<Relationship> for PatternElement {
    fn from(relationship: Relationship) -> Self {
        Self::Relationship(relationship)
    }
}

impl From<&Relationship> for PatternElement {
    fn from(relationship: &Relationship) -> Self {
        Self::Relationship(relationship.clone())
    }
}

impl From<RelationshipChain> for PatternElement {
    fn from(chain: RelationshipChain) -> Self {
        Self::Chain(chain)
    }
}

impl From<&RelationshipChain> for PatternElement {
    fn from(chain: &RelationshipChain) -> Self {
        Self::Chain(chain.clone())
    }
}

/// Named nodes and relationships are referenced by their
/// name; unnamed ones are used as a pattern expression.
impl From<Node> for Expression {
    fn from(node: Node) -> Self {
        match node.symbolic_name {
            Some(name) => Self::Variable(name),
            None => Self::Pattern(Box::new(PatternElement::Node(node))),
        }
    }
}

impl From<&Node> for Expression {
    fn from(node: &Node) -> Self {
        node.clone().into()
    }
}

impl From<Relationship> for Expression {
    fn from(relationship: Relationship) -> Self {
        match relationship.symbolic_name {
            Some(name) => Self::Variable(name),
            None => Self::Pattern(Box::new(PatternElement::Relationship(relationship))),
        }
    }
}

impl From<&Relationship> for Expression {
    fn from(relationship: &Relationship) -> Self {
        relationship.clone().into()
    }
}

impl From<RelationshipChain> for Expression {
    fn from(chain: RelationshipChain) -> Self {
        Self::Pattern(Box::new(PatternElement::Chain(chain)))
    }
}

#[derive(Debug, Clone)]
struct PendingHop {
    left: Node,
    direction: Direction,
    right: Node,
    symbolic_name: Option<SymbolicName>,
    types: Vec<String>,
}

impl PendingHop {
    fn set_types<I, S>(&mut self, types: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types
            .into_iter()
            .map(checked_label)
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn set_name(&mut self, name: &str) -> Result<(), Error> {
        self.symbolic_name = Some(SymbolicName::new(name)?);
        Ok(())
    }

    fn finish(self) -> Relationship {
        Relationship {
            left: self.left,
            direction: self.direction,
            right: self.right,
            symbolic_name: self.symbolic_name,
            types: self.types,
        }
    }

    /// Finish this hop and start the next one at its right node.
    fn extend(self, direction: Direction, next: &Node) -> (Relationship, PendingHop) {
        let relationship = self.finish();
        let hop = PendingHop {
            left: relationship.right.clone(),
            direction,
            right: next.clone(),
            symbolic_name: None,
            types: Vec::new(),
        };
        (relationship, hop)
    }
}

/// A relationship whose type and name may still be set.
#[derive(Debug, Clone)]
pub struct OngoingRelationship {
    hop: PendingHop,
}

impl OngoingRelationship {
    fn new(left: Node, direction: Direction, right: Node) -> Self {
        Self {
            hop: PendingHop {
                left,
                direction,
                right,
                symbolic_name: None,
                types: Vec::new(),
            },
        }
    }

    pub fn with_type<I, S>(mut self, types: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop.set_types(types)?;
        Ok(self)
    }

    pub fn named(mut self, name: &str) -> Result<Self, Error> {
        self.hop.set_name(name)?;
        Ok(self)
    }

    pub fn create(self) -> Relationship {
        self.hop.finish()
    }

    pub fn outgoing_relationship_to(self, next: &Node) -> OngoingRelationshipChain {
        self.extend(Direction::Outgoing, next)
    }

    pub fn incoming_relationship_from(self, next: &Node) -> OngoingRelationshipChain {
        self.extend(Direction::Incoming, next)
    }

    pub fn relationship_with(self, next: &Node) -> OngoingRelationshipChain {
        self.extend(Direction::Either, next)
    }

    fn extend(self, direction: Direction, next: &Node) -> OngoingRelationshipChain {
        let (relationship, hop) = self.hop.extend(direction, next);
        OngoingRelationshipChain {
            chain: vec![relationship],
            hop,
        }
    }
}

/// A chain of relationships whose last hop may still
/// be typed and named.
#[derive(Debug, Clone)]
pub struct OngoingRelationshipChain {
    chain: Vec<Relationship>,
    hop: PendingHop,
}

impl OngoingRelationshipChain {
    pub fn with_type<I, S>(mut self, types: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hop.set_types(types)?;
        Ok(self)
    }

    pub fn named(mut self, name: &str) -> Result<Self, Error> {
        self.hop.set_name(name)?;
        Ok(self)
    }

    pub fn create(mut self) -> RelationshipChain {
        self.chain.push(self.hop.finish());
        RelationshipChain {
            relationships: self.chain,
        }
    }

    pub fn outgoing_relationship_to(self, next: &Node) -> Self {
        self.extend(Direction::Outgoing, next)
    }

    pub fn incoming_relationship_from(self, next: &Node) -> Self {
        self.extend(Direction::Incoming, next)
    }

    pub fn relationship_with(self, next: &Node) -> Self {
        self.extend(Direction::Either, next)
    }

    fn extend(mut self, direction: Direction, next: &Node) -> Self {
        let (relationship, hop) = self.hop.extend(direction, next);
        self.chain.push(relationship);
        self.hop = hop;
        self
    }
}
