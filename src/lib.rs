//! Build Cypher statements as an immutable syntax tree.
//!
//! ```
//! use cypher_dsl::cypher::{literal_of, match_, node};
//!
//! # fn main() -> Result<(), cypher_dsl::Error> {
//! let person = node("Person", Vec::<String>::new())?.named("p")?;
//! let statement = match_([&person])?
//!     .where_(person.property("name")?.is_equal_to(literal_of("Tom Hanks")))?
//!     .returning([&person])?
//!     .build()?;
//!
//! assert_eq!(
//!     statement.to_string(),
//!     "MATCH (p:`Person`) WHERE p.name = 'Tom Hanks' RETURN p"
//! );
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod builder;
pub mod cypher;
pub mod functions;
pub mod renderer;

pub(crate) mod error;

pub use ast::{Condition, Expression, Node, Statement, Visitable, Visitor};
pub use builder::StatementBuilder;
pub use error::Error;
