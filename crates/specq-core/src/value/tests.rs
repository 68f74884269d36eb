use super::*;
use std::cmp::Ordering;
use ulid::Ulid;

#[test]
fn null_ranks_before_everything() {
    for value in [
        Value::Bool(false),
        Value::Int(-5),
        Value::Text(String::new()),
        Value::Ulid(Ulid::nil()),
        Value::List(vec![]),
    ] {
        assert_eq!(canonical_cmp(&Value::Null, &value), Ordering::Less);
        assert_eq!(canonical_cmp(&value, &Value::Null), Ordering::Greater);
    }
}

#[test]
fn numeric_widening_compares_across_variants() {
    assert_eq!(
        numeric_cmp(&Value::Int(-1), &Value::Uint(0)),
        Some(Ordering::Less)
    );
    assert_eq!(
        numeric_cmp(&Value::Uint(7), &Value::Int(7)),
        Some(Ordering::Equal)
    );
    assert_eq!(
        numeric_cmp(&Value::Float64(2.5), &Value::Int(2)),
        Some(Ordering::Greater)
    );
    assert!(value_eq(&Value::Int(3), &Value::Float64(3.0)));
}

#[test]
fn integer_float_comparison_is_exact_above_2_pow_53() {
    let big = Value::Int(9_007_199_254_740_993);
    let float = Value::Float64(9_007_199_254_740_992.0);
    let exact = Value::Int(9_007_199_254_740_992);

    assert_eq!(numeric_cmp(&big, &float), Some(Ordering::Greater));
    assert_eq!(numeric_cmp(&float, &big), Some(Ordering::Less));
    assert_eq!(numeric_cmp(&float, &exact), Some(Ordering::Equal));
    assert!(!value_eq(&big, &float));
    assert!(value_eq(&exact, &float));

    let mut values = vec![big.clone(), float.clone(), exact.clone()];
    values.sort_by(canonical_cmp);
    assert_eq!(canonical_cmp(&values[0], &values[2]), Ordering::Less);
    assert_eq!(values[2], big);
}

#[test]
fn integer_float_comparison_handles_fractions_and_extremes() {
    assert_eq!(
        numeric_cmp(&Value::Int(2), &Value::Float64(2.5)),
        Some(Ordering::Less)
    );
    assert_eq!(
        numeric_cmp(&Value::Int(-2), &Value::Float64(-2.5)),
        Some(Ordering::Greater)
    );
    assert_eq!(
        numeric_cmp(&Value::Uint(u64::MAX), &Value::Float64(f64::INFINITY)),
        Some(Ordering::Less)
    );
    assert_eq!(
        numeric_cmp(&Value::Uint(u64::MAX), &Value::Float64(18_446_744_073_709_551_616.0)),
        Some(Ordering::Less)
    );
    assert_eq!(
        numeric_cmp(&Value::Int(i64::MIN), &Value::Float64(-9_223_372_036_854_775_808.0)),
        Some(Ordering::Equal)
    );
    assert_eq!(
        numeric_cmp(&Value::Int(i64::MIN), &Value::Float64(f64::NEG_INFINITY)),
        Some(Ordering::Greater)
    );
    assert_eq!(numeric_cmp(&Value::Int(0), &Value::Float64(f64::NAN)), None);
}

#[test]
fn strict_order_rejects_nulls_and_mixed_variants() {
    assert_eq!(strict_order_cmp(&Value::Null, &Value::Int(1)), None);
    assert_eq!(
        strict_order_cmp(&Value::Text("a".into()), &Value::Int(1)),
        None
    );
    assert_eq!(
        strict_order_cmp(&Value::Text("a".into()), &Value::Text("b".into())),
        Some(Ordering::Less)
    );
}

#[test]
fn list_equality_is_elementwise() {
    let left = Value::List(vec![Value::Int(1), Value::Uint(2)]);
    let right = Value::List(vec![Value::Uint(1), Value::Int(2)]);

    assert!(value_eq(&left, &right));
    assert!(!value_eq(&left, &Value::List(vec![Value::Int(1)])));
}

#[test]
fn nan_orders_deterministically() {
    let nan = Value::Float64(f64::NAN);
    let one = Value::Float64(1.0);

    assert_eq!(canonical_cmp(&nan, &nan), Ordering::Equal);
    assert_ne!(canonical_cmp(&nan, &one), Ordering::Equal);
}

#[test]
fn display_renders_literals() {
    assert_eq!(Value::Text("ice".into()).to_string(), "\"ice\"");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(
        Value::List(vec![Value::Int(1), Value::Bool(true)]).to_string(),
        "[1, true]"
    );
}
