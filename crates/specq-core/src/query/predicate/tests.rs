use super::*;
use crate::{
    InvalidOperationError, SpecError, query::builder::FieldRef, test_fixtures::Account,
    value::Value,
};

fn leaf(condition: impl Into<PredicateNode<Account>>) -> PredicateNode<Account> {
    condition.into()
}

#[test]
fn independently_built_leaves_carry_distinct_parameters() {
    let PredicateNode::Leaf(a) = leaf(FieldRef::new("active").eq(true)) else {
        panic!("expected leaf");
    };
    let PredicateNode::Leaf(b) = leaf(FieldRef::new("age").gt(18)) else {
        panic!("expected leaf");
    };

    assert_ne!(a.parameter().id(), b.parameter().id());
}

#[test]
fn bound_predicate_has_exactly_one_free_parameter() {
    let tree = leaf(FieldRef::new("active").eq(true))
        .and(leaf(FieldRef::new("age").gt(18)))
        .or(leaf(FieldRef::new("name").starts_with("adm")).negate());
    let shared = Parameter::new("e");

    let bound = tree.to_bound_predicate(shared);
    let free = bound.free_parameters();

    assert_eq!(free.len(), 1);
    assert!(free.contains(&shared.id()));
    assert_eq!(bound.parameter(), shared);
}

#[test]
fn binding_flattens_into_plain_expression_nodes() {
    let tree = leaf(FieldRef::new("active").eq(true)).and(leaf(FieldRef::new("age").gte(21)));
    let bound = tree.to_bound_predicate(Parameter::new("e"));

    let Expr::And(left, right) = bound.body() else {
        panic!("expected a top-level AND expression");
    };
    assert!(matches!(**left, Expr::Compare { op: CompareOp::Eq, .. }));
    assert!(matches!(**right, Expr::Compare { op: CompareOp::Gte, .. }));
    assert_eq!(
        bound.to_string(),
        "e => ((e.active == true) AND (e.age >= 21))"
    );
}

#[test]
fn combine_treats_none_as_identity() {
    let node = leaf(FieldRef::new("active").eq(true));

    assert_eq!(
        PredicateNode::combine(None, Some(node.clone()), Connective::And),
        Some(node.clone())
    );
    assert_eq!(
        PredicateNode::combine(Some(node.clone()), None, Connective::Or),
        Some(node)
    );
    assert_eq!(
        PredicateNode::<Account>::combine(None, None, Connective::And),
        None
    );
}

#[test]
fn lambda_new_rejects_foreign_parameters() {
    let own = Parameter::new("e");
    let foreign = Parameter::new("x");
    let body = Expr::compare(
        CompareOp::Eq,
        Expr::field(foreign, FieldPath::parse("id").expect("path")),
        Expr::Literal(Value::Uint(1)),
    );

    let err = Lambda::<Account>::new(own, body).expect_err("foreign parameter must fail");

    assert_eq!(
        err,
        SpecError::InvalidOperation(InvalidOperationError::UnboundParameter)
    );
}

#[test]
fn hand_built_lambda_participates_in_binding() {
    let param = Parameter::new("row");
    let body = Expr::is_null(Expr::field(param, FieldPath::parse("age").expect("path")));
    let lambda = Lambda::<Account>::new(param, body).expect("well-formed lambda");

    let tree = PredicateNode::from(lambda).and(leaf(FieldRef::new("active").eq(true)));
    let bound = tree.to_bound_predicate(Parameter::new("e"));
    let compiled = bound.compile();

    assert!(compiled.matches(&Account::new(1, "a", true)));
    assert!(!compiled.matches(&Account::new(2, "b", true).with_age(30)));
}

#[test]
fn compiled_predicate_follows_tree_semantics() {
    let tree = leaf(FieldRef::new("active").eq(true))
        .and(leaf(FieldRef::new("age").lt(30)))
        .or(leaf(FieldRef::new("tags").contains("vip")));
    let compiled = tree.to_bound_predicate(Parameter::default()).compile();

    assert!(compiled.matches(&Account::new(1, "a", true).with_age(25)));
    assert!(!compiled.matches(&Account::new(2, "b", true).with_age(35)));
    assert!(compiled.matches(&Account::new(3, "c", false).with_tags(&["vip"])));
    // Missing age reads as null; ordering against null never matches.
    assert!(!compiled.matches(&Account::new(4, "d", true)));
}

#[test]
fn not_operator_matches_negate() {
    let a = leaf(FieldRef::new("active").eq(true));

    assert_eq!(!a.clone(), a.negate());
}

#[test]
fn in_list_and_text_operators() {
    let shared = Parameter::default();
    let names = leaf(FieldRef::new("name").in_list(["ice", "fire"])).to_bound_predicate(shared);
    let suffix = leaf(FieldRef::new("name").ends_with("re")).to_bound_predicate(shared);
    let not_in = leaf(FieldRef::new("id").not_in([1_u64, 2])).to_bound_predicate(shared);

    let fire = Account::new(3, "fire", true);
    assert!(names.compile().matches(&fire));
    assert!(suffix.compile().matches(&fire));
    assert!(not_in.compile().matches(&fire));
    assert!(!not_in.compile().matches(&Account::new(2, "ice", true)));
}

#[test]
fn key_selector_compilation_reads_values() {
    let shared = Parameter::default();
    let key = Lambda::<Account>::new(
        shared,
        Expr::field(shared, FieldPath::parse("name").expect("path")),
    )
    .expect("key");

    assert_eq!(
        key.compile_key().read(&Account::new(1, "ice", true)),
        Value::Text("ice".into())
    );
}

#[test]
fn empty_field_path_is_missing_argument() {
    assert_eq!(
        FieldPath::parse("  "),
        Err(SpecError::MissingArgument { argument: "path" })
    );
}
