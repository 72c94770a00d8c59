//! The immutable syntax tree of a Cypher statement.
//!
//! Every node implements [`Visitable`]; walking the tree with a
//! [`Visitor`] is the only way renderers see it.

mod clause;
mod condition;
mod expression;
mod name;
mod pattern;
mod statement;
mod visit;

pub use clause::{Clause, Delete, Match, Return, With};
pub use condition::{Comparison, CompoundCondition, Condition, NullCheck, Operator};
pub use expression::{Expression, Literal, MapExpression, SortDirection, SortItem};
pub use name::SymbolicName;
pub use pattern::{
    Direction, Node, OngoingRelationship, OngoingRelationshipChain, PatternElement, Relationship,
    RelationshipChain,
};
pub use statement::{MultiPartElement, MultiPartQuery, SinglePartQuery, Statement};
pub use visit::{Segment, Visitable, Visitor};

pub(crate) use clause::Projection;
pub(crate) use name::is_identifier;
