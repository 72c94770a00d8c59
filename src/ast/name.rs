use super::visit::{Segment, Visitable, Visitor};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier bound to a pattern element, e.g. the
/// `p` in `(p:Person)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolicName(String);

impl SymbolicName {
    /// Create a name from an identifier of the form
    /// `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn new(value: &str) -> Result<Self, Error> {
        Self::try_from(value.to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SymbolicName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_identifier(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidArgument("symbolic name must be an identifier"))
        }
    }
}

impl From<SymbolicName> for String {
    fn from(name: SymbolicName) -> Self {
        name.0
    }
}

impl fmt::Display for SymbolicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Visitable for SymbolicName {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.enter(Segment::SymbolicName(self));
        visitor.leave(Segment::SymbolicName(self));
    }
}

pub(crate) fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("a"));
        assert!(is_identifier("_hidden"));
        assert!(is_identifier("HAS_PROPERTY2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn names_must_be_identifiers() {
        assert_eq!(SymbolicName::new("p").unwrap().value(), "p");
        assert_eq!(
            SymbolicName::new(""),
            Err(Error::InvalidArgument("symbolic name must be an identifier"))
        );
    }
}
