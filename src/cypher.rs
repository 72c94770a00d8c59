//! Entry points for building statements and their parts.

use crate::ast::{
    Condition, Expression, Literal, MapExpression, Node, PatternElement, SortItem, SymbolicName,
};
use crate::builder::StatementBuilder;
use crate::Error;

/// A node with at least one label, e.g. `(:Person:Actor)`.
pub fn node<I, S>(primary_label: &str, additional_labels: I) -> Result<Node, Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Node::new(primary_label, additional_labels)
}

pub fn any_node() -> Node {
    Node::any()
}

/// `(name)`, matching any node.
pub fn any_node_named(name: &str) -> Result<Node, Error> {
    Node::any().named(name)
}

pub fn name(value: &str) -> Result<SymbolicName, Error> {
    SymbolicName::new(value)
}

/// `container.key`, where `container` is a bound name.
pub fn property(container: &str, key: &str) -> Result<Expression, Error> {
    if key.is_empty() {
        return Err(Error::InvalidArgument("property key must not be empty"));
    }
    Ok(Expression::Property {
        container: SymbolicName::new(container)?,
        key: key.to_string(),
    })
}

/// `$name`
pub fn parameter(name: &str) -> Result<Expression, Error> {
    Ok(Expression::Parameter(SymbolicName::new(name)?))
}

pub fn literal_of<L: Into<Literal>>(value: L) -> Expression {
    Expression::Literal(value.into())
}

pub fn literal_true() -> Expression {
    literal_of(true)
}

pub fn literal_false() -> Expression {
    literal_of(false)
}

pub fn null_literal() -> Expression {
    Expression::Literal(Literal::Null)
}

/// `[a, b, ...]` over arbitrary expressions. Use [`literal_of`]
/// with a `Vec` for a list of plain values.
pub fn list_of<I>(values: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    Expression::List(values.into_iter().map(Into::into).collect())
}

/// `{key: value, ...}`, keeping the order of `entries`.
pub fn map_of<I, K, V>(entries: I) -> Result<MapExpression, Error>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Expression>,
{
    MapExpression::new(entries)
}

pub fn asterisk() -> Expression {
    Expression::Asterisk
}

/// A sort item without a direction.
pub fn sort<E: Into<Expression>>(expression: E) -> SortItem {
    SortItem::new(expression)
}

pub fn no_condition() -> Condition {
    Condition::empty()
}

pub fn not(condition: Condition) -> Condition {
    condition.negate()
}

pub fn match_<I>(pattern: I) -> Result<StatementBuilder, Error>
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    StatementBuilder::new().match_(pattern)
}

pub fn optional_match<I>(pattern: I) -> Result<StatementBuilder, Error>
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    StatementBuilder::new().optional_match(pattern)
}

/// A statement starting with `WITH`.
pub fn with<I>(items: I) -> Result<StatementBuilder, Error>
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    StatementBuilder::new().with(items)
}

/// Quote `text` as a Cypher string literal.
pub fn quote(text: &str) -> String {
    Literal::from(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn properties_and_parameters_need_identifiers() {
        assert!(property("n", "name").is_ok());
        assert_eq!(
            property("n", ""),
            Err(Error::InvalidArgument("property key must not be empty"))
        );
        assert!(property("not a name", "key").is_err());
        assert_eq!(
            parameter("aParameter"),
            Ok(Expression::Parameter(SymbolicName::new("aParameter").unwrap()))
        );
        assert!(parameter("$x").is_err());
    }

    #[test]
    fn lists_hold_expressions() {
        let n = property("n", "a").unwrap();
        assert_eq!(
            list_of([n.clone(), literal_of(1)]),
            Expression::List(vec![n, Expression::Literal(Literal::Integer(1))])
        );
        assert_eq!(list_of(Vec::<Expression>::new()), Expression::List(Vec::new()));
    }

    #[test]
    fn maps_need_keys() {
        let map = map_of([("name", literal_of("Tom")), ("born", literal_of(1956))]).unwrap();
        let keys: Vec<_> = map.entries().iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["name", "born"]);
        assert!(map_of([("", literal_of(1))]).is_err());
    }

    #[test]
    fn quoting() {
        assert_eq!(quote("Tom Hanks"), "'Tom Hanks'");
        assert_eq!(quote("it's"), "'it\\'s'");
    }

    #[test]
    fn not_wraps() {
        let condition = property("n", "a").unwrap().is_null();
        assert_eq!(not(condition.clone()), Condition::Not(Box::new(condition)));
        assert_eq!(not(no_condition()), Condition::Empty);
    }
}
