use super::clause::{Clause, Return, With};
use super::visit::{Segment, Visitable, Visitor};
use crate::builder::StatementBuilder;
use crate::{renderer, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reading and updating clauses, optionally closed by a `RETURN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSinglePartQuery")]
pub struct SinglePartQuery {
    clauses: Vec<Clause>,
    returning: Option<Return>,
}

#[derive(Deserialize)]
struct RawSinglePartQuery {
    clauses: Vec<Clause>,
    returning: Option<Return>,
}

impl TryFrom<RawSinglePartQuery> for SinglePartQuery {
    type Error = Error;

    fn try_from(raw: RawSinglePartQuery) -> Result<Self, Self::Error> {
        Self::new(raw.clauses, raw.returning)
    }
}

impl SinglePartQuery {
    pub(crate) fn new(clauses: Vec<Clause>, returning: Option<Return>) -> Result<Self, Error> {
        if clauses.is_empty() && returning.is_none() {
            return Err(Error::InvalidArgument(
                "a query needs at least one clause or a return",
            ));
        }
        Ok(Self { clauses, returning })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn returning(&self) -> Option<&Return> {
        self.returning.as_ref()
    }
}

impl Visitable for SinglePartQuery {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::SinglePartQuery(self));
        self.clauses.accept(visitor);
        self.returning.accept(visitor);
        visitor.leave(Segment::SinglePartQuery(self));
    }
}

/// Everything up to and including one `WITH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPartElement {
    clauses: Vec<Clause>,
    with: With,
}

impl MultiPartElement {
    pub(crate) fn new(clauses: Vec<Clause>, with: With) -> Self {
        Self { clauses, with }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn with(&self) -> &With {
        &self.with
    }
}

impl Visitable for MultiPartElement {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Part(self));
        self.clauses.accept(visitor);
        self.with.accept(visitor);
        visitor.leave(Segment::Part(self));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPartQuery {
    parts: Vec<MultiPartElement>,
    remainder: SinglePartQuery,
}

impl MultiPartQuery {
    pub(crate) fn new(parts: Vec<MultiPartElement>, remainder: SinglePartQuery) -> Self {
        Self { parts, remainder }
    }

    pub fn parts(&self) -> &[MultiPartElement] {
        &self.parts
    }

    /// The single-part query after the last `WITH`.
    pub fn remainder(&self) -> &SinglePartQuery {
        &self.remainder
    }
}

impl Visitable for MultiPartQuery {
    fn accept(&self, visitor: &mut dyn Visitor) {
        if self.parts.is_empty() {
            return self.remainder.accept(visitor);
        }
        visitor.enter(Segment::MultiPartQuery(self));
        self.parts.accept(visitor);
        self.remainder.accept(visitor);
        visitor.leave(Segment::MultiPartQuery(self));
    }
}

/// The root of a built query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    SinglePart(SinglePartQuery),
    MultiPart(MultiPartQuery),
}

impl Statement {
    pub fn builder() -> StatementBuilder {
        StatementBuilder::new()
    }

    pub fn is_multi_part(&self) -> bool {
        matches!(self, Self::MultiPart(_))
    }
}

impl Visitable for Statement {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Self::SinglePart(query) => query.accept(visitor),
            Self::MultiPart(query) => query.accept(visitor),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&renderer::render(self))
    }
}
