use cypher_dsl::cypher::{any_node, any_node_named, literal_of, match_, parameter};
use cypher_dsl::functions::id;
use cypher_dsl::Expression;

#[macro_use]
mod common;
use common::*;

#[test]
fn detach_delete_node() {
    let statement = match_([user()])
        .unwrap()
        .detach_delete([&user()])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(statement.to_string(), "MATCH (u:`User`) DETACH DELETE u");
}

#[test]
fn delete_with_condition() {
    let statement = match_([user()])
        .unwrap()
        .where_(
            user()
                .property("a")
                .unwrap()
                .is_equal_to(parameter("aParameter").unwrap()),
        )
        .unwrap()
        .detach_delete([&user()])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        statement.to_string(),
        "MATCH (u:`User`) WHERE u.a = $aParameter DETACH DELETE u"
    );
}

#[test]
fn delete_then_return() {
    let u = user();
    let statement = match_([&u])
        .unwrap()
        .where_(u.property("a").unwrap().is_not_null())
        .unwrap()
        .and(u.property("b").unwrap().is_null())
        .unwrap()
        .detach_delete([&u])
        .unwrap()
        .returning([&u])
        .unwrap()
        .order_by([u.property("a").unwrap().ascending()])
        .unwrap()
        .skip(2)
        .unwrap()
        .limit(1)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        statement.to_string(),
        "MATCH (u:`User`) WHERE (u.a IS NOT NULL AND u.b IS NULL) DETACH DELETE u RETURN u ORDER BY u.a ASC SKIP 2 LIMIT 1"
    );
}

#[test]
fn delete_node_and_relationship() {
    let n = any_node_named("n").unwrap();
    let r = n
        .relationship_between(&any_node())
        .named("r0")
        .unwrap()
        .create();
    let statement = match_([&n])
        .unwrap()
        .where_(id(&n).unwrap().is_equal_to(literal_of(4711)))
        .unwrap()
        .optional_match([&r])
        .unwrap()
        .delete([Expression::from(&r), Expression::from(&n)])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        statement.to_string(),
        "MATCH (n) WHERE id(n) = 4711 OPTIONAL MATCH (n)-[r0]-() DELETE r0, n"
    );
}

#[test]
fn consecutive_deletes() {
    let statement = match_([user(), bike()])
        .unwrap()
        .delete([&bike()])
        .unwrap()
        .detach_delete([&user()])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        statement.to_string(),
        "MATCH (u:`User`), (b:`Bike`) DELETE b DETACH DELETE u"
    );
}
