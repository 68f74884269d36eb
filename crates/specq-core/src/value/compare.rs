use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator used by in-memory ordering.
///
/// Ordering rules:
/// 1. Canonical variant rank (`Null` ranks first)
/// 2. Variant-specific comparison for same-ranked values
///
/// Mixed-variant comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Strict comparator for predicate evaluation.
///
/// Returns `None` for nulls, mismatched variants, and non-orderable variants.
#[must_use]
pub fn strict_order_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Ulid(a), Value::Ulid(b)) => Some(a.cmp(b)),
        _ if left.is_numeric() && right.is_numeric() => numeric_cmp(left, right),
        _ => None,
    }
}

/// Numeric comparison with widening across `Int`, `Uint`, and `Float64`.
///
/// Integer/float pairs compare by exact value, never through a lossy
/// integer-to-float cast, so the order stays transitive above 2^53.
#[must_use]
pub fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Uint(b)) => Some(cmp_int_uint(*a, *b)),
        (Value::Uint(a), Value::Int(b)) => Some(cmp_int_uint(*b, *a).reverse()),
        (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float64(b)) => cmp_wide_float(i128::from(*a), *b),
        (Value::Uint(a), Value::Float64(b)) => cmp_wide_float(i128::from(*a), *b),
        (Value::Float64(a), Value::Int(b)) => {
            cmp_wide_float(i128::from(*b), *a).map(Ordering::reverse)
        }
        (Value::Float64(a), Value::Uint(b)) => {
            cmp_wide_float(i128::from(*b), *a).map(Ordering::reverse)
        }
        _ => None,
    }
}

/// Predicate equality.
///
/// `Null` equals only `Null`; numerics compare after widening; lists compare
/// element-wise under the same rules.
#[must_use]
pub fn value_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| value_eq(x, y))
        }
        _ if left.is_numeric() && right.is_numeric() => {
            numeric_cmp(left, right) == Some(Ordering::Equal)
        }
        _ => left == right,
    }
}

fn cmp_int_uint(int: i64, uint: u64) -> Ordering {
    match u64::try_from(int) {
        Ok(widened) => widened.cmp(&uint),
        Err(_) => Ordering::Less,
    }
}

// Every i64 and u64 lies in [-2^63, 2^64).
const WIDE_INT_MIN: f64 = -9_223_372_036_854_775_808.0;
const WIDE_INT_END: f64 = 18_446_744_073_709_551_616.0;

// Exact ordering of `int` relative to `float`; `None` for NaN.
#[allow(clippy::cast_possible_truncation)]
fn cmp_wide_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= WIDE_INT_END {
        return Some(Ordering::Less);
    }
    if float < WIDE_INT_MIN {
        return Some(Ordering::Greater);
    }

    // In range and integral, so the conversion is exact.
    let whole = float.trunc();
    let ordering = int.cmp(&(whole as i128));
    if ordering != Ordering::Equal {
        return Some(ordering);
    }

    // Same whole part: the fractional part decides.
    0.0_f64.partial_cmp(&(float - whole))
}

#[allow(clippy::cast_precision_loss)]
fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Ulid(a), Value::Ulid(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_value_list(a, b),
        _ if left.is_numeric() && right.is_numeric() => {
            numeric_cmp(left, right).unwrap_or_else(|| as_f64(left).total_cmp(&as_f64(right)))
        }
        _ => Ordering::Equal,
    }
}

fn canonical_cmp_value_list(left: &[Value], right: &[Value]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        let ordering = canonical_cmp(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Int(v) => *v as f64,
        Value::Uint(v) => *v as f64,
        Value::Float64(v) => *v,
        _ => f64::NAN,
    }
}
