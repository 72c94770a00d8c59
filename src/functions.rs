//! Cypher function invocations.

use crate::ast::{Expression, MapExpression, Node, Relationship};
use crate::Error;

fn call<E: Into<Expression>>(name: &str, argument: E) -> Expression {
    Expression::function(name, vec![argument.into()])
}

/// `id(n)` for a named node.
pub fn id(node: &Node) -> Result<Expression, Error> {
    Ok(call("id", node.required_symbolic_name()?))
}

/// `id(r)` for a named relationship.
pub fn id_of_relationship(relationship: &Relationship) -> Result<Expression, Error> {
    Ok(call("id", relationship.required_symbolic_name()?))
}

pub fn labels(node: &Node) -> Result<Expression, Error> {
    Ok(call("labels", node.required_symbolic_name()?))
}

/// `type(r)` for a named relationship.
pub fn type_of(relationship: &Relationship) -> Result<Expression, Error> {
    Ok(call("type", relationship.required_symbolic_name()?))
}

pub fn count<E: Into<Expression>>(expression: E) -> Expression {
    call("count", expression)
}

/// `coalesce(...)` over at least one expression.
pub fn coalesce<I>(expressions: I) -> Result<Expression, Error>
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    let arguments: Vec<Expression> = expressions.into_iter().map(Into::into).collect();
    if arguments.is_empty() {
        return Err(Error::InvalidArgument(
            "coalesce requires at least one expression",
        ));
    }
    Ok(Expression::function("coalesce", arguments))
}

pub fn to_lower<E: Into<Expression>>(expression: E) -> Expression {
    call("toLower", expression)
}

pub fn size<E: Into<Expression>>(expression: E) -> Expression {
    call("size", expression)
}

pub fn exists<E: Into<Expression>>(expression: E) -> Expression {
    call("exists", expression)
}

pub fn distance<A, B>(point1: A, point2: B) -> Expression
where
    A: Into<Expression>,
    B: Into<Expression>,
{
    Expression::function("distance", vec![point1.into(), point2.into()])
}

pub fn collect<E: Into<Expression>>(expression: E) -> Expression {
    call("collect", expression)
}

pub fn head<E: Into<Expression>>(expression: E) -> Expression {
    call("head", expression)
}

pub fn last<E: Into<Expression>>(expression: E) -> Expression {
    call("last", expression)
}

/// `point({...})`, e.g. from `latitude` and `longitude` entries.
pub fn point(map: MapExpression) -> Expression {
    call("point", map)
}
