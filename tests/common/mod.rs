#![allow(dead_code)]

use cypher_dsl::cypher::node;
use cypher_dsl::Node;

#[allow(unused_macros)]
macro_rules! assert_err {
    ($expr:expr, $err:pat) => {
        match $expr {
            Err($err) => (),
            Err(other) => panic!("Unexpected {}", other),
            Ok(_) => panic!("Expected an error"),
        }
    };
}

/// A node with one label, bound to `name`.
pub fn named(label: &str, name: &str) -> Node {
    node(label, Vec::<String>::new()).unwrap().named(name).unwrap()
}

pub fn user() -> Node {
    named("User", "u")
}

pub fn bike() -> Node {
    named("Bike", "b")
}
