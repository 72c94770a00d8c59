use cypher_dsl::cypher::{literal_of, match_, no_condition, not, parameter};
use cypher_dsl::functions::id;
use cypher_dsl::Condition;

#[macro_use]
mod common;
use common::*;

fn render_where(condition: Condition) -> String {
    match_([user()])
        .unwrap()
        .where_(condition)
        .unwrap()
        .returning([&user()])
        .unwrap()
        .build()
        .unwrap()
        .to_string()
}

fn user_name() -> Condition {
    user()
        .property("name")
        .unwrap()
        .is_equal_to(literal_of("Test"))
}

fn user_age() -> Condition {
    user().property("age").unwrap().is_equal_to(literal_of(21))
}

#[test]
fn where_on_internal_id() {
    assert_eq!(
        render_where(id(&user()).unwrap().is_equal_to(literal_of(1))),
        "MATCH (u:`User`) WHERE id(u) = 1 RETURN u"
    );
}

#[test]
fn where_with_boolean_operators() {
    assert_eq!(
        render_where(user_name().and(user_age())),
        "MATCH (u:`User`) WHERE (u.name = 'Test' AND u.age = 21) RETURN u"
    );
    assert_eq!(
        render_where(user_name().or(user_age())),
        "MATCH (u:`User`) WHERE (u.name = 'Test' OR u.age = 21) RETURN u"
    );
    assert_eq!(
        render_where(user_name().xor(user_age())),
        "MATCH (u:`User`) WHERE (u.name = 'Test' XOR u.age = 21) RETURN u"
    );
}

#[test]
fn builder_and_or_fold_like_conditions() {
    let a = user().property("a").unwrap();
    let statement = match_([user()])
        .unwrap()
        .where_(a.clone().is_equal_to(literal_of("A")))
        .unwrap()
        .and(a.clone().is_equal_to(literal_of("B")))
        .unwrap()
        .or(a.clone().is_equal_to(literal_of("F")))
        .unwrap()
        .and(a.is_equal_to(literal_of("T")))
        .unwrap()
        .returning([&user()])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        statement.to_string(),
        "MATCH (u:`User`) WHERE (((u.a = 'A' AND u.a = 'B') OR u.a = 'F') AND u.a = 'T') RETURN u"
    );
}

#[test]
fn negated_conditions() {
    assert_eq!(
        render_where(not(user().property("name").unwrap().is_not_null())),
        "MATCH (u:`User`) WHERE NOT (u.name IS NOT NULL) RETURN u"
    );
    let x = user().property("x").unwrap();
    let grouped = x
        .clone()
        .is_true()
        .and(x.clone().is_false())
        .or(x.is_null());
    assert_eq!(
        render_where(user_name().and(not(grouped))),
        "MATCH (u:`User`) WHERE (u.name = 'Test' AND NOT (((u.x = true AND u.x = false) OR u.x IS NULL))) RETURN u"
    );
}

#[test]
fn empty_condition_renders_no_where() {
    assert_eq!(render_where(no_condition()), "MATCH (u:`User`) RETURN u");
    assert_eq!(
        render_where(no_condition().and(user_age())),
        "MATCH (u:`User`) WHERE u.age = 21 RETURN u"
    );
}

#[test]
fn where_with_parameter() {
    assert_eq!(
        render_where(
            user()
                .property("a")
                .unwrap()
                .is_equal_to(parameter("aParameter").unwrap())
        ),
        "MATCH (u:`User`) WHERE u.a = $aParameter RETURN u"
    );
}

#[test]
fn string_operators() {
    let name = user().property("name").unwrap();
    assert_eq!(
        render_where(
            name.clone()
                .starts_with(literal_of("A"))
                .or(name.clone().ends_with(literal_of("z")))
                .or(name.contains(literal_of("it's")))
        ),
        "MATCH (u:`User`) WHERE (u.name STARTS WITH 'A' OR u.name ENDS WITH 'z' OR u.name CONTAINS 'it\\'s') RETURN u"
    );
}

#[test]
fn numeric_comparisons() {
    let age = user().property("age").unwrap();
    assert_eq!(
        render_where(
            age.clone()
                .gt(literal_of(18))
                .and(age.clone().lte(literal_of(65.5)))
                .and(age.clone().gte(literal_of(0)))
                .and(age.lt(literal_of(200)))
        ),
        "MATCH (u:`User`) WHERE (u.age > 18 AND u.age <= 65.5 AND u.age >= 0 AND u.age < 200) RETURN u"
    );
}
