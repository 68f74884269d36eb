use crate::{
    query::predicate::ast::{CompareOp, Expr, Lambda},
    traits::FieldValues,
    value::{Value, strict_order_cmp, value_eq},
};
use std::{cmp::Ordering, fmt, sync::Arc};

type TestFn<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;
type ReadFn<E> = Arc<dyn Fn(&E) -> Value + Send + Sync>;

///
/// CompiledPredicate
///
/// Executable form of a boolean lambda: a closure tree built once and
/// applied to in-memory instances. Field reads that miss resolve to `Null`.
///

pub struct CompiledPredicate<E> {
    test: TestFn<E>,
}

impl<E> CompiledPredicate<E> {
    #[must_use]
    pub fn matches(&self, candidate: &E) -> bool {
        (self.test)(candidate)
    }
}

impl<E> Clone for CompiledPredicate<E> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<E> fmt::Debug for CompiledPredicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompiledPredicate")
    }
}

///
/// CompiledKey
/// Executable form of a value-producing lambda (sort key selector).
///

pub struct CompiledKey<E> {
    read: ReadFn<E>,
}

impl<E> CompiledKey<E> {
    #[must_use]
    pub fn read(&self, candidate: &E) -> Value {
        (self.read)(candidate)
    }
}

impl<E> Clone for CompiledKey<E> {
    fn clone(&self) -> Self {
        Self {
            read: Arc::clone(&self.read),
        }
    }
}

impl<E: FieldValues + 'static> Lambda<E> {
    /// Compile this lambda as a boolean predicate.
    #[must_use]
    pub fn compile(&self) -> CompiledPredicate<E> {
        CompiledPredicate {
            test: compile_test(self.body()),
        }
    }

    /// Compile this lambda as a value selector.
    #[must_use]
    pub fn compile_key(&self) -> CompiledKey<E> {
        CompiledKey {
            read: compile_read(self.body()),
        }
    }
}

// Boolean position. Non-boolean values in a boolean position are false.
fn compile_test<E: FieldValues + 'static>(expr: &Expr) -> TestFn<E> {
    match expr {
        Expr::And(left, right) => {
            let (left, right) = (compile_test::<E>(left), compile_test::<E>(right));
            Arc::new(move |row: &E| left(row) && right(row))
        }
        Expr::Or(left, right) => {
            let (left, right) = (compile_test::<E>(left), compile_test::<E>(right));
            Arc::new(move |row: &E| left(row) || right(row))
        }
        Expr::Not(inner) => {
            let inner = compile_test::<E>(inner);
            Arc::new(move |row: &E| !inner(row))
        }
        Expr::IsNull(inner) => {
            let inner = compile_read::<E>(inner);
            Arc::new(move |row: &E| inner(row).is_null())
        }
        Expr::Compare { op, left, right } => {
            let op = *op;
            let (left, right) = (compile_read::<E>(left), compile_read::<E>(right));
            Arc::new(move |row: &E| eval_compare(op, &left(row), &right(row)))
        }
        Expr::Literal(value) => {
            let constant = matches!(value, Value::Bool(true));
            Arc::new(move |_: &E| constant)
        }
        Expr::Field { .. } => {
            let read = compile_read::<E>(expr);
            Arc::new(move |row: &E| matches!(read(row), Value::Bool(true)))
        }
    }
}

// Value position. Boolean sub-expressions produce `Value::Bool`.
fn compile_read<E: FieldValues + 'static>(expr: &Expr) -> ReadFn<E> {
    match expr {
        Expr::Field { path, .. } => {
            let path = path.clone();
            Arc::new(move |row: &E| row.get_value(path.as_str()).unwrap_or(Value::Null))
        }
        Expr::Literal(value) => {
            let value = value.clone();
            Arc::new(move |_: &E| value.clone())
        }
        Expr::Compare { .. }
        | Expr::IsNull(_)
        | Expr::And(..)
        | Expr::Or(..)
        | Expr::Not(_) => {
            let test = compile_test::<E>(expr);
            Arc::new(move |row: &E| Value::Bool(test(row)))
        }
    }
}

///
/// Evaluate one comparison.
///
/// Returns `false` when the comparison is not defined for the operand
/// variants (including any ordering comparison that involves `Null`).
///
#[must_use]
pub fn eval_compare(op: CompareOp, actual: &Value, expected: &Value) -> bool {
    match op {
        CompareOp::Eq => value_eq(actual, expected),
        CompareOp::Ne => !value_eq(actual, expected),

        CompareOp::Lt => strict_order_cmp(actual, expected).is_some_and(Ordering::is_lt),
        CompareOp::Lte => strict_order_cmp(actual, expected).is_some_and(Ordering::is_le),
        CompareOp::Gt => strict_order_cmp(actual, expected).is_some_and(Ordering::is_gt),
        CompareOp::Gte => strict_order_cmp(actual, expected).is_some_and(Ordering::is_ge),

        CompareOp::In => in_list(actual, expected).unwrap_or(false),
        CompareOp::NotIn => in_list(actual, expected).is_some_and(|matched| !matched),

        CompareOp::Contains => contains(actual, expected),
        CompareOp::StartsWith => text_op(actual, expected, |a, b| a.starts_with(b)),
        CompareOp::EndsWith => text_op(actual, expected, |a, b| a.ends_with(b)),
    }
}

// Membership against a literal list; `None` when the right side is not a list.
fn in_list(actual: &Value, list: &Value) -> Option<bool> {
    let Value::List(items) = list else {
        return None;
    };

    Some(items.iter().any(|item| value_eq(actual, item)))
}

// List membership or text substring.
fn contains(actual: &Value, needle: &Value) -> bool {
    match (actual, needle) {
        (Value::List(items), _) => items.iter().any(|item| value_eq(item, needle)),
        (Value::Text(text), Value::Text(needle)) => text.contains(needle.as_str()),
        _ => false,
    }
}

fn text_op(actual: &Value, expected: &Value, op: impl Fn(&str, &str) -> bool) -> bool {
    match (actual, expected) {
        (Value::Text(a), Value::Text(b)) => op(a, b),
        _ => false,
    }
}
