use super::condition::Condition;
use super::expression::{accept_list, Expression, SortItem};
use super::pattern::PatternElement;
use super::visit::{Segment, Visitable, Visitor};
use crate::Error;
use serde::{Deserialize, Serialize};

fn accept_where(condition: &Option<Condition>, visitor: &mut dyn Visitor) {
    if let Some(condition) = condition {
        visitor.enter(Segment::Where(condition));
        condition.accept(visitor);
        visitor.leave(Segment::Where(condition));
    }
}

/// A condition that is empty or missing is dropped.
fn non_empty(condition: Option<Condition>) -> Option<Condition> {
    condition.filter(|condition| !condition.is_empty())
}

/// `MATCH` or `OPTIONAL MATCH`, with an optional `WHERE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatch")]
pub struct Match {
    optional: bool,
    pattern: Vec<PatternElement>,
    condition: Option<Condition>,
}

#[derive(Deserialize)]
struct RawMatch {
    optional: bool,
    pattern: Vec<PatternElement>,
    condition: Option<Condition>,
}

impl TryFrom<RawMatch> for Match {
    type Error = Error;

    fn try_from(raw: RawMatch) -> Result<Self, Self::Error> {
        if raw.pattern.is_empty() {
            return Err(Error::InvalidArgument(
                "match requires at least one pattern element",
            ));
        }
        Ok(Self::new(raw.optional, raw.pattern, raw.condition))
    }
}

impl Match {
    pub(crate) fn new(
        optional: bool,
        pattern: Vec<PatternElement>,
        condition: Option<Condition>,
    ) -> Self {
        Self {
            optional,
            pattern,
            condition: non_empty(condition),
        }
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn pattern(&self) -> &[PatternElement] {
        &self.pattern
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

impl Visitable for Match {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Match(self));
        visitor.enter(Segment::Pattern(&self.pattern));
        self.pattern.accept(visitor);
        visitor.leave(Segment::Pattern(&self.pattern));
        accept_where(&self.condition, visitor);
        visitor.leave(Segment::Match(self));
    }
}

/// The shared part of `RETURN` and `WITH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProjection")]
pub(crate) struct Projection {
    pub distinct: bool,
    pub items: Vec<Expression>,
    pub order: Vec<SortItem>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
struct RawProjection {
    distinct: bool,
    items: Vec<Expression>,
    order: Vec<SortItem>,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl TryFrom<RawProjection> for Projection {
    type Error = Error;

    fn try_from(raw: RawProjection) -> Result<Self, Self::Error> {
        if raw.items.is_empty() {
            return Err(Error::InvalidArgument(
                "a projection needs at least one expression",
            ));
        }
        Ok(Self {
            distinct: raw.distinct,
            items: raw.items,
            order: raw.order,
            skip: raw.skip,
            limit: raw.limit,
        })
    }
}

impl Projection {
    pub fn new(distinct: bool, items: Vec<Expression>) -> Self {
        Self {
            distinct,
            items,
            order: Vec::new(),
            skip: None,
            limit: None,
        }
    }

    fn order(&self) -> Option<&[SortItem]> {
        if self.order.is_empty() {
            None
        } else {
            Some(&self.order)
        }
    }
}

impl Visitable for Projection {
    fn accept(&self, visitor: &mut dyn Visitor) {
        accept_list(&self.items, visitor);
        if let Some(order) = self.order() {
            visitor.enter(Segment::Order(order));
            order.accept(visitor);
            visitor.leave(Segment::Order(order));
        }
        if let Some(skip) = self.skip {
            visitor.enter(Segment::Skip(skip));
            visitor.leave(Segment::Skip(skip));
        }
        if let Some(limit) = self.limit {
            visitor.enter(Segment::Limit(limit));
            visitor.leave(Segment::Limit(limit));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    projection: Projection,
}

impl Return {
    pub(crate) fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn is_distinct(&self) -> bool {
        self.projection.distinct
    }

    pub fn items(&self) -> &[Expression] {
        &self.projection.items
    }

    pub fn order(&self) -> Option<&[SortItem]> {
        self.projection.order()
    }

    pub fn skip(&self) -> Option<u64> {
        self.projection.skip
    }

    pub fn limit(&self) -> Option<u64> {
        self.projection.limit
    }
}

impl Visitable for Return {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Return(self));
        self.projection.accept(visitor);
        visitor.leave(Segment::Return(self));
    }
}

/// A projection boundary between two query parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWith")]
pub struct With {
    projection: Projection,
    condition: Option<Condition>,
}

#[derive(Deserialize)]
struct RawWith {
    projection: Projection,
    condition: Option<Condition>,
}

impl From<RawWith> for With {
    fn from(raw: RawWith) -> Self {
        Self::new(raw.projection, raw.condition)
    }
}

impl With {
    pub(crate) fn new(projection: Projection, condition: Option<Condition>) -> Self {
        Self {
            projection,
            condition: non_empty(condition),
        }
    }

    pub fn is_distinct(&self) -> bool {
        self.projection.distinct
    }

    pub fn items(&self) -> &[Expression] {
        &self.projection.items
    }

    pub fn order(&self) -> Option<&[SortItem]> {
        self.projection.order()
    }

    pub fn skip(&self) -> Option<u64> {
        self.projection.skip
    }

    pub fn limit(&self) -> Option<u64> {
        self.projection.limit
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

impl Visitable for With {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::With(self));
        self.projection.accept(visitor);
        accept_where(&self.condition, visitor);
        visitor.leave(Segment::With(self));
    }
}

/// `DELETE` or `DETACH DELETE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDelete")]
pub struct Delete {
    items: Vec<Expression>,
    detach: bool,
}

#[derive(Deserialize)]
struct RawDelete {
    items: Vec<Expression>,
    detach: bool,
}

impl TryFrom<RawDelete> for Delete {
    type Error = Error;

    fn try_from(raw: RawDelete) -> Result<Self, Self::Error> {
        if raw.items.is_empty() {
            return Err(Error::InvalidArgument(
                "delete requires at least one expression",
            ));
        }
        Ok(Self::new(raw.items, raw.detach))
    }
}

impl Delete {
    pub(crate) fn new(items: Vec<Expression>, detach: bool) -> Self {
        Self { items, detach }
    }

    pub fn items(&self) -> &[Expression] {
        &self.items
    }

    pub fn is_detach(&self) -> bool {
        self.detach
    }
}

impl Visitable for Delete {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Delete(self));
        accept_list(&self.items, visitor);
        visitor.leave(Segment::Delete(self));
    }
}

/// A reading or updating clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    Match(Match),
    Delete(Delete),
}

impl Clause {
    pub fn is_updating(&self) -> bool {
        matches!(self, Self::Delete(_))
    }
}

impl Visitable for Clause {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Self::Match(clause) => clause.accept(visitor),
            Self::Delete(clause) => clause.accept(visitor),
        }
    }
}

impl From<Match> for Clause {
    fn from(clause: Match) -> Self {
        Self::Match(clause)
    }
}

impl From<Delete> for Clause {
    fn from(clause: Delete) -> Self {
        Self::Delete(clause)
    }
}
