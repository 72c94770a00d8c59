use super::expression::Expression;
use super::visit::{Segment, Visitable, Visitor};
use crate::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Matches,
    StartsWith,
    EndsWith,
    Contains,
    In,

    IsNull,
    IsNotNull,

    And,
    Or,
    Xor,

    Concat,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Pow,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Matches => "=~",
            Self::StartsWith => "STARTS WITH",
            Self::EndsWith => "ENDS WITH",
            Self::Contains => "CONTAINS",
            Self::In => "IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Concat | Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Pow => "^",
        }
    }

    /// Operators written after their single operand.
    pub fn is_postfix(self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }

    pub fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Xor)
    }

    /// Operators joining two expressions into a new expression.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Concat
                | Self::Add
                | Self::Subtract
                | Self::Multiply
                | Self::Divide
                | Self::Modulo
                | Self::Pow
        )
    }

    /// Operators joining two expressions into a condition.
    pub fn is_comparison(self) -> bool {
        !(self.is_postfix() || self.is_logical() || self.is_arithmetic())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawComparison")]
pub struct Comparison {
    left: Expression,
    operator: Operator,
    right: Expression,
}

impl Comparison {
    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }
}

#[derive(Deserialize)]
struct RawComparison {
    left: Expression,
    operator: Operator,
    right: Expression,
}

impl TryFrom<RawComparison> for Comparison {
    type Error = Error;

    fn try_from(raw: RawComparison) -> Result<Self, Self::Error> {
        if !raw.operator.is_comparison() {
            return Err(Error::InvalidArgument(
                "a comparison needs a comparison operator",
            ));
        }
        Ok(Self {
            left: raw.left,
            operator: raw.operator,
            right: raw.right,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNullCheck")]
pub struct NullCheck {
    expression: Expression,
    operator: Operator,
}

impl NullCheck {
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Either [`Operator::IsNull`] or [`Operator::IsNotNull`].
    pub fn operator(&self) -> Operator {
        self.operator
    }
}

#[derive(Deserialize)]
struct RawNullCheck {
    expression: Expression,
    operator: Operator,
}

impl TryFrom<RawNullCheck> for NullCheck {
    type Error = Error;

    fn try_from(raw: RawNullCheck) -> Result<Self, Self::Error> {
        if !raw.operator.is_postfix() {
            return Err(Error::InvalidArgument(
                "a null check needs IS NULL or IS NOT NULL",
            ));
        }
        Ok(Self {
            expression: raw.expression,
            operator: raw.operator,
        })
    }
}

/// Conditions joined by one logical operator. A child never
/// has the same operator as its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCompoundCondition")]
pub struct CompoundCondition {
    operator: Operator,
    conditions: Vec<Condition>,
}

impl CompoundCondition {
    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn push(&mut self, condition: Condition) {
        match condition {
            Condition::Compound(inner) if inner.operator == self.operator => {
                self.conditions.extend(inner.conditions)
            }
            condition => self.conditions.push(condition),
        }
    }
}

#[derive(Deserialize)]
struct RawCompoundCondition {
    operator: Operator,
    conditions: Vec<Condition>,
}

impl TryFrom<RawCompoundCondition> for CompoundCondition {
    type Error = Error;

    fn try_from(raw: RawCompoundCondition) -> Result<Self, Self::Error> {
        if !raw.operator.is_logical() {
            return Err(Error::InvalidArgument(
                "conditions are joined by AND, OR or XOR",
            ));
        }
        if raw.conditions.is_empty() {
            return Err(Error::InvalidArgument(
                "a compound condition needs at least one condition",
            ));
        }
        for condition in &raw.conditions {
            match condition {
                Condition::Empty => {
                    return Err(Error::InvalidArgument(
                        "a compound condition must not hold an empty condition",
                    ))
                }
                Condition::Compound(inner) if inner.operator == raw.operator => {
                    return Err(Error::InvalidArgument(
                        "a nested compound condition must use another operator",
                    ))
                }
                _ => (),
            }
        }
        Ok(Self {
            operator: raw.operator,
            conditions: raw.conditions,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCondition")]
pub enum Condition {
    /// No condition at all. Absorbed by every combination.
    Empty,
    Comparison(Comparison),
    NullCheck(NullCheck),
    Compound(CompoundCondition),
    Not(Box<Condition>),
}

#[derive(Deserialize)]
enum RawCondition {
    Empty,
    Comparison(Comparison),
    NullCheck(NullCheck),
    Compound(CompoundCondition),
    Not(Box<Condition>),
}

impl TryFrom<RawCondition> for Condition {
    type Error = Error;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawCondition::Empty => Self::Empty,
            RawCondition::Comparison(comparison) => Self::Comparison(comparison),
            RawCondition::NullCheck(check) => Self::NullCheck(check),
            RawCondition::Compound(compound) => Self::Compound(compound),
            RawCondition::Not(condition) if condition.is_empty() => {
                return Err(Error::InvalidArgument(
                    "a negated condition must not be empty",
                ))
            }
            RawCondition::Not(condition) => Self::Not(condition),
        })
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::Empty
    }
}

impl Condition {
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub(crate) fn comparison(left: Expression, operator: Operator, right: Expression) -> Self {
        Self::Comparison(Comparison {
            left,
            operator,
            right,
        })
    }

    pub(crate) fn null_check(expression: Expression, operator: Operator) -> Self {
        Self::NullCheck(NullCheck {
            expression,
            operator,
        })
    }

    pub fn and(self, other: Condition) -> Self {
        self.combine(Operator::And, other)
    }

    pub fn or(self, other: Condition) -> Self {
        self.combine(Operator::Or, other)
    }

    pub fn xor(self, other: Condition) -> Self {
        self.combine(Operator::Xor, other)
    }

    /// Wrap the condition in `NOT`. The empty condition
    /// stays empty.
    pub fn negate(self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            condition => Self::Not(Box::new(condition)),
        }
    }

    fn combine(self, operator: Operator, other: Condition) -> Self {
        if other.is_empty() {
            return self;
        }
        let mut target = match self {
            Self::Empty => CompoundCondition {
                operator,
                conditions: Vec::new(),
            },
            Self::Compound(compound) if compound.operator == operator => compound,
            condition => CompoundCondition {
                operator,
                conditions: vec![condition],
            },
        };
        target.push(other);
        Self::Compound(target)
    }
}

impl std::ops::Not for Condition {
    type Output = Condition;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

pub(crate) fn accept_operator(operator: Operator, visitor: &mut dyn Visitor) {
    visitor.enter(Segment::Operator(operator));
    visitor.leave(Segment::Operator(operator));
}

impl Visitable for Condition {
    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Self::Empty => return,
            // a single child needs no grouping
            Self::Compound(compound) if compound.conditions.len() == 1 => {
                return compound.conditions[0].accept(visitor);
            }
            _ => (),
        }

        visitor.enter(Segment::Condition(self));
        match self {
            Self::Comparison(comparison) => {
                comparison.left.accept(visitor);
                accept_operator(comparison.operator, visitor);
                comparison.right.accept(visitor);
            }
            Self::NullCheck(check) => {
                check.expression.accept(visitor);
                accept_operator(check.operator, visitor);
            }
            Self::Compound(compound) => {
                for (idx, condition) in compound.conditions.iter().enumerate() {
                    if idx > 0 {
                        accept_operator(compound.operator, visitor);
                    }
                    condition.accept(visitor);
                }
            }
            Self::Not(condition) => condition.accept(visitor),
            Self::Empty => (),
        }
        visitor.leave(Segment::Condition(self));
    }
}
