//! Fluent construction of [`Statement`]s.
//!
//! The builder is a single owned value that is moved through every
//! call. Each call checks that it is legal in the current state and
//! fails with [`Error::InvalidState`] otherwise.

use crate::ast::{
    Clause, Condition, Delete, Expression, Match, MultiPartElement, MultiPartQuery,
    PatternElement, Projection, Return, SinglePartQuery, SortItem, Statement, With,
};
use crate::Error;
use std::mem;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectionKind {
    With,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Match,
    With,
    Delete,
    Return,
    /// An `ORDER BY` expression waits for its direction.
    Order(ProjectionKind),
}

impl State {
    fn describe(self) -> &'static str {
        match self {
            Self::Start => "before any clause",
            Self::Match => "after MATCH",
            Self::With => "after WITH",
            Self::Delete => "after DELETE",
            Self::Return => "after RETURN",
            Self::Order(_) => "while an ORDER BY item awaits its direction",
        }
    }
}

impl From<ProjectionKind> for State {
    fn from(kind: ProjectionKind) -> Self {
        match kind {
            ProjectionKind::With => Self::With,
            ProjectionKind::Return => Self::Return,
        }
    }
}

#[derive(Debug, Clone)]
struct OngoingMatch {
    optional: bool,
    pattern: Vec<PatternElement>,
    /// `Some` once `where_` was called.
    condition: Option<Condition>,
}

#[derive(Debug, Clone)]
struct OngoingProjection {
    projection: Projection,
    condition: Option<Condition>,
    pending_sort: Option<SortItem>,
}

fn non_empty<T>(items: Vec<T>, message: &'static str) -> Result<Vec<T>, Error> {
    if items.is_empty() {
        Err(Error::InvalidArgument(message))
    } else {
        Ok(items)
    }
}

fn patterns<I>(pattern: I) -> Result<Vec<PatternElement>, Error>
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    non_empty(
        pattern.into_iter().map(Into::into).collect(),
        "at least one pattern element is required",
    )
}

fn expressions<I>(expressions: I, message: &'static str) -> Result<Vec<Expression>, Error>
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    non_empty(expressions.into_iter().map(Into::into).collect(), message)
}

/// Accumulates clauses until [`StatementBuilder::build`] is called.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    state: State,
    clauses: Vec<Clause>,
    parts: Vec<MultiPartElement>,
    ongoing_match: Option<OngoingMatch>,
    projection: Option<OngoingProjection>,
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self {
            state: State::Start,
            clauses: Vec::new(),
            parts: Vec::new(),
            ongoing_match: None,
            projection: None,
        }
    }

    fn invalid(&self, operation: &'static str) -> Error {
        let state = self.state.describe();
        debug!(operation, state, "rejected builder call");
        Error::InvalidState { operation, state }
    }

    fn check(&self, operation: &'static str, legal: bool) -> Result<(), Error> {
        if legal {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    /// Commit the open match, or the open `WITH` as a new query part.
    fn close(&mut self) {
        if let Some(ongoing) = self.ongoing_match.take() {
            trace!(
                optional = ongoing.optional,
                elements = ongoing.pattern.len(),
                "committed match clause"
            );
            self.clauses.push(Clause::Match(Match::new(
                ongoing.optional,
                ongoing.pattern,
                ongoing.condition,
            )));
        }
        if self.state == State::With {
            if let Some(ongoing) = self.projection.take() {
                let with = With::new(ongoing.projection, ongoing.condition);
                let clauses = mem::take(&mut self.clauses);
                self.parts.push(MultiPartElement::new(clauses, with));
                trace!(parts = self.parts.len(), "committed query part");
            }
        }
    }

    fn open_match<I>(
        mut self,
        operation: &'static str,
        optional: bool,
        pattern: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<PatternElement>,
    {
        self.check(
            operation,
            matches!(self.state, State::Start | State::Match | State::With),
        )?;
        let pattern = patterns(pattern)?;
        self.close();
        self.ongoing_match = Some(OngoingMatch {
            optional,
            pattern,
            condition: None,
        });
        self.state = State::Match;
        Ok(self)
    }

    pub fn match_<I>(self, pattern: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<PatternElement>,
    {
        self.open_match("match", false, pattern)
    }

    pub fn optional_match<I>(self, pattern: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<PatternElement>,
    {
        self.open_match("optional match", true, pattern)
    }

    /// The condition slot of the open match or `WITH`.
    fn condition_slot(&mut self) -> Option<&mut Option<Condition>> {
        match self.state {
            State::Match => self.ongoing_match.as_mut().map(|ongoing| &mut ongoing.condition),
            State::With => self.projection.as_mut().map(|ongoing| &mut ongoing.condition),
            _ => None,
        }
    }

    /// Set the condition of the open match or `WITH`. May only be
    /// called once per clause.
    pub fn where_(mut self, condition: Condition) -> Result<Self, Error> {
        if !matches!(self.condition_slot(), Some(None)) {
            return Err(self.invalid("where"));
        }
        if let Some(slot) = self.condition_slot() {
            *slot = Some(condition);
        }
        Ok(self)
    }

    fn combine(
        mut self,
        operation: &'static str,
        combine: fn(Condition, Condition) -> Condition,
        other: Condition,
    ) -> Result<Self, Error> {
        if !matches!(self.condition_slot(), Some(Some(_))) {
            return Err(self.invalid(operation));
        }
        if let Some(Some(condition)) = self.condition_slot() {
            *condition = combine(mem::take(condition), other);
        }
        Ok(self)
    }

    pub fn and(self, condition: Condition) -> Result<Self, Error> {
        self.combine("and", Condition::and, condition)
    }

    pub fn or(self, condition: Condition) -> Result<Self, Error> {
        self.combine("or", Condition::or, condition)
    }

    fn open_with<I>(
        mut self,
        operation: &'static str,
        distinct: bool,
        items: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.check(
            operation,
            matches!(
                self.state,
                State::Start | State::Match | State::With | State::Delete
            ),
        )?;
        let items = expressions(items, "with requires at least one expression")?;
        self.close();
        self.projection = Some(OngoingProjection {
            projection: Projection::new(distinct, items),
            condition: None,
            pending_sort: None,
        });
        self.state = State::With;
        Ok(self)
    }

    pub fn with<I>(self, items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.open_with("with", false, items)
    }

    pub fn with_distinct<I>(self, items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.open_with("with distinct", true, items)
    }

    fn push_delete<I>(
        mut self,
        operation: &'static str,
        detach: bool,
        items: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.check(
            operation,
            matches!(self.state, State::Match | State::With | State::Delete),
        )?;
        let items = expressions(items, "delete requires at least one expression")?;
        self.close();
        trace!(detach, items = items.len(), "committed delete clause");
        self.clauses.push(Clause::Delete(Delete::new(items, detach)));
        self.state = State::Delete;
        Ok(self)
    }

    pub fn delete<I>(self, items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.push_delete("delete", false, items)
    }

    pub fn detach_delete<I>(self, items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.push_delete("detach delete", true, items)
    }

    fn open_return<I>(
        mut self,
        operation: &'static str,
        distinct: bool,
        items: I,
    ) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.check(
            operation,
            matches!(self.state, State::Match | State::With | State::Delete),
        )?;
        let items = expressions(items, "return requires at least one expression")?;
        self.close();
        self.projection = Some(OngoingProjection {
            projection: Projection::new(distinct, items),
            condition: None,
            pending_sort: None,
        });
        self.state = State::Return;
        Ok(self)
    }

    pub fn returning<I>(self, items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.open_return("return", false, items)
    }

    pub fn returning_distinct<I>(self, items: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.open_return("return distinct", true, items)
    }

    /// The open projection, if the state allows ordering and paging.
    fn projection_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut OngoingProjection, Error> {
        let kind = match self.state {
            State::With => ProjectionKind::With,
            State::Return => ProjectionKind::Return,
            _ => return Err(self.invalid(operation)),
        };
        match self.projection {
            Some(ref mut ongoing) => Ok(ongoing),
            None => Err(Error::InvalidState {
                operation,
                state: State::from(kind).describe(),
            }),
        }
    }

    /// Append sort items to the open projection.
    pub fn order_by<I>(mut self, items: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = SortItem>,
    {
        let ongoing = self.projection_mut("order by")?;
        ongoing.projection.order.extend(items);
        Ok(self)
    }

    /// Start an `ORDER BY` item whose direction is given by a
    /// following `ascending`, `descending` or `then_by`.
    pub fn order_by_expression<E: Into<Expression>>(
        mut self,
        expression: E,
    ) -> Result<Self, Error> {
        let kind = match self.state {
            State::With => ProjectionKind::With,
            State::Return => ProjectionKind::Return,
            _ => return Err(self.invalid("order by")),
        };
        self.projection_mut("order by")?.pending_sort = Some(SortItem::new(expression));
        self.state = State::Order(kind);
        Ok(self)
    }

    fn pending_sort(
        &mut self,
        operation: &'static str,
    ) -> Result<(ProjectionKind, SortItem), Error> {
        let kind = match self.state {
            State::Order(kind) => kind,
            _ => return Err(self.invalid(operation)),
        };
        let state = self.state.describe();
        self.projection
            .as_mut()
            .and_then(|ongoing| ongoing.pending_sort.take())
            .map(|item| (kind, item))
            .ok_or(Error::InvalidState { operation, state })
    }

    fn push_sort(&mut self, item: SortItem) {
        if let Some(ongoing) = self.projection.as_mut() {
            ongoing.projection.order.push(item);
        }
    }

    fn finish_sort(
        mut self,
        operation: &'static str,
        direct: fn(SortItem) -> SortItem,
    ) -> Result<Self, Error> {
        let (kind, item) = self.pending_sort(operation)?;
        self.push_sort(direct(item));
        self.state = kind.into();
        Ok(self)
    }

    pub fn ascending(self) -> Result<Self, Error> {
        self.finish_sort("ascending", SortItem::ascending)
    }

    pub fn descending(self) -> Result<Self, Error> {
        self.finish_sort("descending", SortItem::descending)
    }

    /// Keep the pending item without a direction and start the next one.
    pub fn then_by<E: Into<Expression>>(mut self, expression: E) -> Result<Self, Error> {
        let (_, item) = self.pending_sort("then by")?;
        self.push_sort(item);
        if let Some(ongoing) = self.projection.as_mut() {
            ongoing.pending_sort = Some(SortItem::new(expression));
        }
        Ok(self)
    }

    pub fn skip(mut self, skip: u64) -> Result<Self, Error> {
        self.projection_mut("skip")?.projection.skip = Some(skip);
        Ok(self)
    }

    pub fn limit(mut self, limit: u64) -> Result<Self, Error> {
        self.projection_mut("limit")?.projection.limit = Some(limit);
        Ok(self)
    }

    /// Finish the statement. Only legal after a `RETURN` or a `DELETE`.
    pub fn build(mut self) -> Result<Statement, Error> {
        self.check(
            "build",
            matches!(self.state, State::Return | State::Delete),
        )?;
        let returning = match self.state {
            State::Return => self
                .projection
                .take()
                .map(|ongoing| Return::new(ongoing.projection)),
            _ => None,
        };
        let remainder = SinglePartQuery::new(self.clauses, returning)?;
        debug!(
            parts = self.parts.len(),
            clauses = remainder.clauses().len(),
            "built statement"
        );
        if self.parts.is_empty() {
            Ok(Statement::SinglePart(remainder))
        } else {
            Ok(Statement::MultiPart(MultiPartQuery::new(self.parts, remainder)))
        }
    }
}

#[cfg(test)]
mod tests;
