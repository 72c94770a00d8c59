use super::*;

/// A borrowed view of one AST node, as seen by a [`Visitor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment<'a> {
    SinglePartQuery(&'a SinglePartQuery),
    MultiPartQuery(&'a MultiPartQuery),
    /// One committed part of a multi-part query.
    Part(&'a MultiPartElement),

    Match(&'a Match),
    /// Comma separated pattern elements of a match.
    Pattern(&'a [PatternElement]),
    Where(&'a Condition),
    Return(&'a Return),
    With(&'a With),
    Delete(&'a Delete),
    /// Comma separated expressions of a projection,
    /// a delete or a function invocation.
    ExpressionList(&'a [Expression]),
    Order(&'a [SortItem]),
    SortItem(&'a SortItem),
    Skip(u64),
    Limit(u64),

    Condition(&'a Condition),
    Operator(Operator),
    Expression(&'a Expression),
    /// Comma separated entries of a map literal.
    Map(&'a MapExpression),
    /// The key of one map entry; its value is the only child.
    MapEntry(&'a str),

    Node(&'a Node),
    Relationship(&'a Relationship),
    RelationshipChain(&'a RelationshipChain),
    /// The `-[name:TYPE]->` part of a relationship.
    RelationshipDetail(&'a Relationship),
    SymbolicName(&'a SymbolicName),
}

impl<'a> Segment<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SinglePartQuery(_) => "SinglePartQuery",
            Self::MultiPartQuery(_) => "MultiPartQuery",
            Self::Part(_) => "Part",
            Self::Match(_) => "Match",
            Self::Pattern(_) => "Pattern",
            Self::Where(_) => "Where",
            Self::Return(_) => "Return",
            Self::With(_) => "With",
            Self::Delete(_) => "Delete",
            Self::ExpressionList(_) => "ExpressionList",
            Self::Order(_) => "Order",
            Self::SortItem(_) => "SortItem",
            Self::Skip(_) => "Skip",
            Self::Limit(_) => "Limit",
            Self::Condition(_) => "Condition",
            Self::Operator(_) => "Operator",
            Self::Expression(_) => "Expression",
            Self::Map(_) => "Map",
            Self::MapEntry(_) => "MapEntry",
            Self::Node(_) => "Node",
            Self::Relationship(_) => "Relationship",
            Self::RelationshipChain(_) => "RelationshipChain",
            Self::RelationshipDetail(_) => "RelationshipDetail",
            Self::SymbolicName(_) => "SymbolicName",
        }
    }

    /// Segments whose direct children form a comma
    /// separated list.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::Pattern(_) | Self::ExpressionList(_) | Self::Order(_) | Self::Map(_)
        )
    }
}

/// Receives a callback when a node is entered and when
/// it is left; children are visited in between.
pub trait Visitor {
    fn enter(&mut self, segment: Segment<'_>);

    fn leave(&mut self, _segment: Segment<'_>) {}
}

pub trait Visitable {
    fn accept(&self, visitor: &mut dyn Visitor);
}

impl<T: Visitable> Visitable for [T] {
    fn accept(&self, visitor: &mut dyn Visitor) {
        for item in self {
            item.accept(visitor);
        }
    }
}

impl<T: Visitable> Visitable for Option<T> {
    fn accept(&self, visitor: &mut dyn Visitor) {
        if let Some(item) = self {
            item.accept(visitor);
        }
    }
}
