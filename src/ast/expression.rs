use super::condition::{accept_operator, Condition, Operator};
use super::name::{is_identifier, SymbolicName};
use super::pattern::PatternElement;
use super::visit::{Segment, Visitable, Visitor};
use crate::{functions, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Literal>),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) if value.is_nan() => f.write_str("0.0/0.0"),
            Self::Float(value) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "1.0/0.0" } else { "-1.0/0.0" })
            }
            // debug formatting keeps the fraction, e.g. `21.0`
            Self::Float(value) => write!(f, "{:?}", value),
            Self::String(value) => {
                f.write_str("'")?;
                for c in value.chars() {
                    match c {
                        '\\' => f.write_str("\\\\")?,
                        '\'' => f.write_str("\\'")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("'")
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// A map literal, e.g. `{name: 'Tom', born: 1956}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMapExpression")]
pub struct MapExpression {
    entries: Vec<(String, Expression)>,
}

impl MapExpression {
    pub fn new<I, K, V>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expression>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::try_from(RawMapExpression { entries })
    }

    pub fn entries(&self) -> &[(String, Expression)] {
        &self.entries
    }
}

#[derive(Deserialize)]
struct RawMapExpression {
    entries: Vec<(String, Expression)>,
}

impl TryFrom<RawMapExpression> for MapExpression {
    type Error = Error;

    fn try_from(raw: RawMapExpression) -> Result<Self, Self::Error> {
        if raw.entries.iter().any(|(key, _)| key.is_empty()) {
            return Err(Error::InvalidArgument("map keys must not be empty"));
        }
        Ok(Self {
            entries: raw.entries,
        })
    }
}

impl Visitable for MapExpression {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Map(self));
        for (key, value) in &self.entries {
            visitor.enter(Segment::MapEntry(key));
            value.accept(visitor);
            visitor.leave(Segment::MapEntry(key));
        }
        visitor.leave(Segment::Map(self));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExpression")]
pub enum Expression {
    Literal(Literal),
    /// Reference to a named pattern element or alias.
    Variable(SymbolicName),
    Property {
        container: SymbolicName,
        key: String,
    },
    Parameter(SymbolicName),
    Function {
        name: String,
        arguments: Vec<Expression>,
    },
    Aliased {
        expression: Box<Expression>,
        alias: SymbolicName,
    },
    /// An unnamed pattern element used as an expression.
    Pattern(Box<PatternElement>),
    /// Two expressions joined by an arithmetic or
    /// concatenation operator.
    Operation {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },
    List(Vec<Expression>),
    Map(MapExpression),
    Asterisk,
}

#[derive(Deserialize)]
enum RawExpression {
    Literal(Literal),
    Variable(SymbolicName),
    Property {
        container: SymbolicName,
        key: String,
    },
    Parameter(SymbolicName),
    Function {
        name: String,
        arguments: Vec<Expression>,
    },
    Aliased {
        expression: Box<Expression>,
        alias: SymbolicName,
    },
    Pattern(Box<PatternElement>),
    Operation {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },
    List(Vec<Expression>),
    Map(MapExpression),
    Asterisk,
}

impl TryFrom<RawExpression> for Expression {
    type Error = Error;

    fn try_from(raw: RawExpression) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawExpression::Literal(literal) => Self::Literal(literal),
            RawExpression::Variable(name) => Self::Variable(name),
            RawExpression::Property { key, .. } if key.is_empty() => {
                return Err(Error::InvalidArgument("property key must not be empty"))
            }
            RawExpression::Property { container, key } => Self::Property { container, key },
            RawExpression::Parameter(name) => Self::Parameter(name),
            RawExpression::Function { name, .. } if !is_identifier(&name) => {
                return Err(Error::InvalidArgument("function name must be an identifier"))
            }
            RawExpression::Function { name, arguments } => Self::Function { name, arguments },
            RawExpression::Aliased { expression, alias } => Self::Aliased { expression, alias },
            RawExpression::Pattern(element) => Self::Pattern(element),
            RawExpression::Operation { operator, .. } if !operator.is_arithmetic() => {
                return Err(Error::InvalidArgument(
                    "an operation needs an arithmetic operator",
                ))
            }
            RawExpression::Operation {
                left,
                operator,
                right,
            } => Self::Operation {
                left,
                operator,
                right,
            },
            RawExpression::List(items) => Self::List(items),
            RawExpression::Map(map) => Self::Map(map),
            RawExpression::Asterisk => Self::Asterisk,
        })
    }
}

impl Expression {
    pub(crate) fn function(name: &str, arguments: Vec<Expression>) -> Self {
        Self::Function {
            name: name.to_string(),
            arguments,
        }
    }

    fn compare<E: Into<Expression>>(self, operator: Operator, rhs: E) -> Condition {
        Condition::comparison(self, operator, rhs.into())
    }

    fn operation<E: Into<Expression>>(self, operator: Operator, rhs: E) -> Self {
        Self::Operation {
            left: Box::new(self),
            operator,
            right: Box::new(rhs.into()),
        }
    }

    /// String or list concatenation, `+`.
    pub fn concat<E: Into<Expression>>(self, rhs: E) -> Self {
        self.operation(Operator::Concat, rhs)
    }

    pub fn add<E: Into<Expression>>(self, addend: E) -> Self {
        self.operation(Operator::Add, addend)
    }

    pub fn subtract<E: Into<Expression>>(self, subtrahend: E) -> Self {
        self.operation(Operator::Subtract, subtrahend)
    }

    pub fn multiply<E: Into<Expression>>(self, multiplicand: E) -> Self {
        self.operation(Operator::Multiply, multiplicand)
    }

    pub fn divide<E: Into<Expression>>(self, divisor: E) -> Self {
        self.operation(Operator::Divide, divisor)
    }

    pub fn remainder<E: Into<Expression>>(self, divisor: E) -> Self {
        self.operation(Operator::Modulo, divisor)
    }

    pub fn pow<E: Into<Expression>>(self, exponent: E) -> Self {
        self.operation(Operator::Pow, exponent)
    }

    pub fn is_equal_to<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::Equal, rhs)
    }

    pub fn is_not_equal_to<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::NotEqual, rhs)
    }

    pub fn lt<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::LessThan, rhs)
    }

    pub fn lte<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::LessThanOrEqual, rhs)
    }

    pub fn gt<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::GreaterThan, rhs)
    }

    pub fn gte<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::GreaterThanOrEqual, rhs)
    }

    pub fn is_true(self) -> Condition {
        self.is_equal_to(Literal::Boolean(true))
    }

    pub fn is_false(self) -> Condition {
        self.is_equal_to(Literal::Boolean(false))
    }

    /// Regular expression match, `=~`.
    pub fn matches<E: Into<Expression>>(self, pattern: E) -> Condition {
        self.compare(Operator::Matches, pattern)
    }

    pub fn starts_with<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::StartsWith, rhs)
    }

    pub fn ends_with<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::EndsWith, rhs)
    }

    pub fn contains<E: Into<Expression>>(self, rhs: E) -> Condition {
        self.compare(Operator::Contains, rhs)
    }

    pub fn in_<E: Into<Expression>>(self, haystack: E) -> Condition {
        self.compare(Operator::In, haystack)
    }

    pub fn is_null(self) -> Condition {
        Condition::null_check(self, Operator::IsNull)
    }

    pub fn is_not_null(self) -> Condition {
        Condition::null_check(self, Operator::IsNotNull)
    }

    /// `size(expression) = 0`
    pub fn is_empty(self) -> Condition {
        functions::size(self).is_equal_to(Literal::Integer(0))
    }

    pub fn ascending(self) -> SortItem {
        SortItem::new(self).ascending()
    }

    pub fn descending(self) -> SortItem {
        SortItem::new(self).descending()
    }

    /// Wrap the expression as `expression AS alias`.
    pub fn aliased(self, alias: &str) -> Result<Self, Error> {
        Ok(Self::Aliased {
            expression: Box::new(self),
            alias: SymbolicName::new(alias)?,
        })
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<MapExpression> for Expression {
    fn from(map: MapExpression) -> Self {
        Self::Map(map)
    }
}

impl From<SymbolicName> for Expression {
    fn from(name: SymbolicName) -> Self {
        Self::Variable(name)
    }
}

impl From<&SymbolicName> for Expression {
    fn from(name: &SymbolicName) -> Self {
        Self::Variable(name.clone())
    }
}

impl Visitable for Expression {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::Expression(self));
        match self {
            Self::Variable(name) | Self::Property {
                container: name, ..
            } => name.accept(visitor),
            Self::Function { arguments, .. } => accept_list(arguments, visitor),
            Self::Aliased { expression, .. } => expression.accept(visitor),
            Self::Pattern(element) => element.accept(visitor),
            Self::Operation {
                left,
                operator,
                right,
            } => {
                left.accept(visitor);
                accept_operator(*operator, visitor);
                right.accept(visitor);
            }
            Self::List(items) => accept_list(items, visitor),
            Self::Map(map) => map.accept(visitor),
            Self::Literal(_) | Self::Parameter(_) | Self::Asterisk => (),
        }
        visitor.leave(Segment::Expression(self));
    }
}

pub(crate) fn accept_list(list: &[Expression], visitor: &mut dyn Visitor) {
    visitor.enter(Segment::ExpressionList(list));
    list.accept(visitor);
    visitor.leave(Segment::ExpressionList(list));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// An expression with an optional sort direction, used
/// in `ORDER BY`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortItem {
    expression: Expression,
    direction: Option<SortDirection>,
}

impl SortItem {
    pub fn new<E: Into<Expression>>(expression: E) -> Self {
        Self {
            expression: expression.into(),
            direction: None,
        }
    }

    pub fn ascending(self) -> Self {
        Self {
            direction: Some(SortDirection::Ascending),
            ..self
        }
    }

    pub fn descending(self) -> Self {
        Self {
            direction: Some(SortDirection::Descending),
            ..self
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }
}

impl Visitable for SortItem {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::SortItem(self));
        self.expression.accept(visitor);
        visitor.leave(Segment::SortItem(self));
    }
}
