use super::*;
use crate::ast::{Node, Operator, SortDirection};
use crate::cypher::*;

fn person() -> Node {
    node("Person", Vec::<String>::new()).unwrap().named("p").unwrap()
}

fn movie() -> Node {
    node("Movie", Vec::<String>::new()).unwrap().named("m").unwrap()
}

fn invalid_state(operation: &'static str, state: State) -> Error {
    Error::InvalidState {
        operation,
        state: state.describe(),
    }
}

fn single_part(statement: Statement) -> SinglePartQuery {
    match statement {
        Statement::SinglePart(query) => query,
        other => panic!("{:?} is not a single part query", other),
    }
}

#[test]
fn tom_hanks_movies() {
    let acted_in = person()
        .relationship_to(&movie())
        .with_type(vec!["ACTED_IN"])
        .unwrap()
        .create();
    let statement = match_([acted_in])
        .unwrap()
        .where_(
            person()
                .property("name")
                .unwrap()
                .is_equal_to(literal_of("Tom Hanks")),
        )
        .unwrap()
        .returning([&person(), &movie()])
        .unwrap()
        .build()
        .unwrap();

    let query = single_part(statement);
    assert_eq!(query.clauses().len(), 1);
    let clause = match &query.clauses()[0] {
        Clause::Match(clause) => clause,
        other => panic!("unexpected clause {:?}", other),
    };
    assert!(!clause.is_optional());
    assert_eq!(clause.pattern().len(), 1);
    assert_eq!(clause.pattern()[0].relationships().len(), 1);
    assert!(clause.condition().is_some());

    let returning = query.returning().unwrap();
    assert_eq!(returning.items().len(), 2);
    assert_eq!(returning.order(), None);
}

#[test]
fn where_before_match_is_rejected() {
    assert_eq!(
        StatementBuilder::new()
            .where_(literal_true().is_true())
            .err(),
        Some(invalid_state("where", State::Start))
    );
}

#[test]
fn where_only_once() {
    let builder = match_([person()])
        .unwrap()
        .where_(person().property("a").unwrap().is_null())
        .unwrap();
    assert_eq!(
        builder.where_(no_condition()).err(),
        Some(invalid_state("where", State::Match))
    );
}

#[test]
fn and_requires_where() {
    let builder = match_([person()]).unwrap();
    assert_eq!(
        builder.clone().and(no_condition()).err(),
        Some(invalid_state("and", State::Match))
    );
    assert_eq!(
        builder.or(no_condition()).err(),
        Some(invalid_state("or", State::Match))
    );
}

#[test]
fn conditions_are_folded_into_the_match() {
    let a = person().property("a").unwrap();
    let statement = match_([person()])
        .unwrap()
        .where_(a.clone().is_null())
        .unwrap()
        .and(a.clone().is_equal_to(literal_of(1)))
        .unwrap()
        .and(a.clone().is_equal_to(literal_of(2)))
        .unwrap()
        .or(a.clone().is_equal_to(literal_of(3)))
        .unwrap()
        .returning([&person()])
        .unwrap()
        .build()
        .unwrap();

    let query = single_part(statement);
    let condition = match &query.clauses()[0] {
        Clause::Match(clause) => clause.condition().unwrap().clone(),
        other => panic!("unexpected clause {:?}", other),
    };
    let expected = a
        .clone()
        .is_null()
        .and(a.clone().is_equal_to(literal_of(1)))
        .and(a.clone().is_equal_to(literal_of(2)))
        .or(a.is_equal_to(literal_of(3)));
    assert_eq!(condition, expected);
    match condition {
        Condition::Compound(compound) => {
            assert_eq!(compound.operator(), Operator::Or);
            assert_eq!(compound.conditions().len(), 2);
        }
        other => panic!("unexpected condition {:?}", other),
    }
}

#[test]
fn empty_where_can_be_extended() {
    let condition = person().property("a").unwrap().is_null();
    let statement = match_([person()])
        .unwrap()
        .where_(no_condition())
        .unwrap()
        .and(condition.clone())
        .unwrap()
        .returning([&person()])
        .unwrap()
        .build()
        .unwrap();

    let query = single_part(statement);
    match &query.clauses()[0] {
        Clause::Match(clause) => {
            assert_eq!(clause.condition(), Some(&no_condition().and(condition)))
        }
        other => panic!("unexpected clause {:?}", other),
    }
}

#[test]
fn with_commits_a_part() {
    let statement = match_([person()])
        .unwrap()
        .with([&person()])
        .unwrap()
        .match_([movie()])
        .unwrap()
        .returning([&movie()])
        .unwrap()
        .build()
        .unwrap();

    let query = match statement {
        Statement::MultiPart(query) => query,
        other => panic!("{:?} is not a multi part query", other),
    };
    assert_eq!(query.parts().len(), 1);
    let part = &query.parts()[0];
    assert_eq!(part.clauses().len(), 1);
    assert_eq!(part.with().items().len(), 1);
    assert_eq!(query.remainder().clauses().len(), 1);
    assert!(query.remainder().returning().is_some());
}

#[test]
fn chained_withs_commit_successive_parts() {
    let statement = match_([person()])
        .unwrap()
        .with([&person()])
        .unwrap()
        .with([&person()])
        .unwrap()
        .returning([&person()])
        .unwrap()
        .build()
        .unwrap();

    match statement {
        Statement::MultiPart(query) => {
            assert_eq!(query.parts().len(), 2);
            assert_eq!(query.parts()[0].clauses().len(), 1);
            assert!(query.parts()[1].clauses().is_empty());
            assert!(query.remainder().clauses().is_empty());
        }
        other => panic!("{:?} is not a multi part query", other),
    }
}

#[test]
fn with_accepts_a_where() {
    let statement = with([literal_of(1).aliased("one").unwrap()])
        .unwrap()
        .where_(name("one").map(Expression::from).unwrap().gt(literal_of(0)))
        .unwrap()
        .returning([name("one").unwrap()])
        .unwrap()
        .build()
        .unwrap();
    match statement {
        Statement::MultiPart(query) => assert!(query.parts()[0].with().condition().is_some()),
        other => panic!("{:?} is not a multi part query", other),
    }
}

#[test]
fn delete_may_end_a_statement() {
    let statement = match_([person()])
        .unwrap()
        .detach_delete([&person()])
        .unwrap()
        .build()
        .unwrap();

    let query = single_part(statement);
    assert!(query.returning().is_none());
    assert!(query.clauses()[1].is_updating());
    match &query.clauses()[1] {
        Clause::Delete(delete) => assert!(delete.is_detach()),
        other => panic!("unexpected clause {:?}", other),
    }
}

#[test]
fn required_arguments() {
    assert_eq!(
        match_(Vec::<PatternElement>::new()).err(),
        Some(Error::InvalidArgument(
            "at least one pattern element is required"
        ))
    );
    let builder = match_([person()]).unwrap();
    assert_eq!(
        builder.clone().returning(Vec::<Expression>::new()).err(),
        Some(Error::InvalidArgument(
            "return requires at least one expression"
        ))
    );
    assert_eq!(
        builder.clone().with(Vec::<Expression>::new()).err(),
        Some(Error::InvalidArgument("with requires at least one expression"))
    );
    assert_eq!(
        builder.delete(Vec::<Expression>::new()).err(),
        Some(Error::InvalidArgument(
            "delete requires at least one expression"
        ))
    );
}

#[test]
fn out_of_sequence_calls() {
    assert_eq!(
        StatementBuilder::new().returning([asterisk()]).err(),
        Some(invalid_state("return", State::Start))
    );
    assert_eq!(
        StatementBuilder::new().delete([asterisk()]).err(),
        Some(invalid_state("delete", State::Start))
    );

    let matched = match_([person()]).unwrap();
    assert_eq!(
        matched.clone().build().err(),
        Some(invalid_state("build", State::Match))
    );
    assert_eq!(
        matched.clone().skip(1).err(),
        Some(invalid_state("skip", State::Match))
    );
    assert_eq!(
        matched.clone().ascending().err(),
        Some(invalid_state("ascending", State::Match))
    );

    let returned = matched.returning([&person()]).unwrap();
    assert_eq!(
        returned.clone().match_([movie()]).err(),
        Some(invalid_state("match", State::Return))
    );
    assert_eq!(
        returned.clone().where_(no_condition()).err(),
        Some(invalid_state("where", State::Return))
    );

    let ordering = returned.order_by_expression(&person()).unwrap();
    let state = State::Order(ProjectionKind::Return);
    assert_eq!(
        ordering.clone().build().err(),
        Some(invalid_state("build", state))
    );
    assert_eq!(
        ordering.limit(1).err(),
        Some(invalid_state("limit", state))
    );
}

#[test]
fn ordering_with_directions() {
    let name = person().property("name").unwrap();
    let age = person().property("age").unwrap();
    let statement = match_([person()])
        .unwrap()
        .returning([&person()])
        .unwrap()
        .order_by_expression(name.clone())
        .unwrap()
        .descending()
        .unwrap()
        .order_by_expression(age.clone())
        .unwrap()
        .then_by(person().property("born").unwrap())
        .unwrap()
        .ascending()
        .unwrap()
        .skip(1)
        .unwrap()
        .limit(5)
        .unwrap()
        .build()
        .unwrap();

    let returning = single_part(statement).returning().cloned().unwrap();
    let order = returning.order().unwrap();
    assert_eq!(order.len(), 3);
    assert_eq!(order[0].expression(), &name);
    assert_eq!(order[0].direction(), Some(SortDirection::Descending));
    assert_eq!(order[1].expression(), &age);
    assert_eq!(order[1].direction(), None);
    assert_eq!(order[2].direction(), Some(SortDirection::Ascending));
    assert_eq!(returning.skip(), Some(1));
    assert_eq!(returning.limit(), Some(5));
}

#[test]
fn with_can_be_ordered_and_paged() {
    let statement = match_([person()])
        .unwrap()
        .with([&person()])
        .unwrap()
        .order_by([sort(person().property("name").unwrap())])
        .unwrap()
        .limit(3)
        .unwrap()
        .returning([&person()])
        .unwrap()
        .build()
        .unwrap();

    match statement {
        Statement::MultiPart(query) => {
            let with = query.parts()[0].with();
            assert_eq!(with.order().map(<[SortItem]>::len), Some(1));
            assert_eq!(with.limit(), Some(3));
            assert_eq!(with.skip(), None);
        }
        other => panic!("{:?} is not a multi part query", other),
    }
}

#[test]
fn optional_match_closes_previous_match() {
    let statement = match_([person()])
        .unwrap()
        .optional_match([movie()])
        .unwrap()
        .returning([&person(), &movie()])
        .unwrap()
        .build()
        .unwrap();

    let query = single_part(statement);
    let optional: Vec<bool> = query
        .clauses()
        .iter()
        .map(|clause| match clause {
            Clause::Match(clause) => clause.is_optional(),
            Clause::Delete(_) => panic!("unexpected delete"),
        })
        .collect();
    assert_eq!(optional, vec![false, true]);
}
