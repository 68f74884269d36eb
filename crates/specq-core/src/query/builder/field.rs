use crate::{
    query::predicate::{
        CompareOp, Expr, FieldPath, Lambda, Parameter, PredicateNode, rewrite::ParameterRebinder,
    },
    traits::FieldValue,
    value::Value,
};
use std::ops::{BitAnd, BitOr, Not};

///
/// FieldRef
///
/// Zero-cost wrapper around a static field name used in predicates.
/// Every predicate built from it gets its own fresh parameter, so leaves
/// are genuinely independent until a specification binds them.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FieldRef(&'static str);

impl FieldRef {
    /// Create a new field reference.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Return the underlying field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    #[must_use]
    pub fn path(self) -> FieldPath {
        FieldPath::from_static(self.0)
    }

    // ------------------------------------------------------------------
    // Comparison predicates
    // ------------------------------------------------------------------

    #[must_use]
    pub fn eq(self, value: impl FieldValue) -> Condition {
        self.compare(CompareOp::Eq, value.to_value())
    }

    #[must_use]
    pub fn ne(self, value: impl FieldValue) -> Condition {
        self.compare(CompareOp::Ne, value.to_value())
    }

    #[must_use]
    pub fn lt(self, value: impl FieldValue) -> Condition {
        self.compare(CompareOp::Lt, value.to_value())
    }

    #[must_use]
    pub fn lte(self, value: impl FieldValue) -> Condition {
        self.compare(CompareOp::Lte, value.to_value())
    }

    #[must_use]
    pub fn gt(self, value: impl FieldValue) -> Condition {
        self.compare(CompareOp::Gt, value.to_value())
    }

    #[must_use]
    pub fn gte(self, value: impl FieldValue) -> Condition {
        self.compare(CompareOp::Gte, value.to_value())
    }

    /// Membership test against a fixed list.
    #[must_use]
    pub fn in_list<I, V>(self, values: I) -> Condition
    where
        I: IntoIterator<Item = V>,
        V: FieldValue,
    {
        self.compare(CompareOp::In, list(values))
    }

    #[must_use]
    pub fn not_in<I, V>(self, values: I) -> Condition
    where
        I: IntoIterator<Item = V>,
        V: FieldValue,
    {
        self.compare(CompareOp::NotIn, list(values))
    }

    /// List membership, or substring match on text fields.
    #[must_use]
    pub fn contains(self, value: impl FieldValue) -> Condition {
        self.compare(CompareOp::Contains, value.to_value())
    }

    #[must_use]
    pub fn starts_with(self, prefix: impl FieldValue) -> Condition {
        self.compare(CompareOp::StartsWith, prefix.to_value())
    }

    #[must_use]
    pub fn ends_with(self, suffix: impl FieldValue) -> Condition {
        self.compare(CompareOp::EndsWith, suffix.to_value())
    }

    // ------------------------------------------------------------------
    // Presence predicates
    // ------------------------------------------------------------------

    #[must_use]
    pub fn is_null(self) -> Condition {
        let param = Parameter::default();
        Condition::new(param, Expr::is_null(self.read(param)))
    }

    #[must_use]
    pub fn is_not_null(self) -> Condition {
        !self.is_null()
    }

    /// Boolean field used directly as a condition.
    #[must_use]
    pub fn is_true(self) -> Condition {
        self.eq(true)
    }

    fn compare(self, op: CompareOp, value: Value) -> Condition {
        let param = Parameter::default();
        Condition::new(
            param,
            Expr::compare(op, self.read(param), Expr::Literal(value)),
        )
    }

    fn read(self, param: Parameter) -> Expr {
        Expr::field(param, self.path())
    }
}

fn list<I, V>(values: I) -> Value
where
    I: IntoIterator<Item = V>,
    V: FieldValue,
{
    Value::List(values.into_iter().map(|v| v.to_value()).collect())
}

///
/// Condition
///
/// Entity-agnostic leaf predicate produced by `FieldRef`. It becomes a
/// typed `Lambda<E>` when handed to a chain or specification of `E`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    param: Parameter,
    body: Expr,
}

impl Condition {
    const fn new(param: Parameter, body: Expr) -> Self {
        Self { param, body }
    }

    #[must_use]
    pub const fn parameter(&self) -> Parameter {
        self.param
    }

    #[must_use]
    pub const fn body(&self) -> &Expr {
        &self.body
    }

    // Merge another condition under a fresh parameter.
    fn join(self, rhs: Self, f: impl FnOnce(Expr, Expr) -> Expr) -> Self {
        let param = Parameter::default();
        let left = ParameterRebinder::new(self.param.id(), param).rewrite(&self.body);
        let right = ParameterRebinder::new(rhs.param.id(), param).rewrite(&rhs.body);

        Self::new(param, f(left, right))
    }
}

impl<E> From<Condition> for Lambda<E> {
    fn from(condition: Condition) -> Self {
        Self::from_parts(condition.param, condition.body)
    }
}

impl<E> From<Condition> for PredicateNode<E> {
    fn from(condition: Condition) -> Self {
        Self::Leaf(condition.into())
    }
}

impl BitAnd for Condition {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.join(rhs, Expr::and)
    }
}

impl BitOr for Condition {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.join(rhs, Expr::or)
    }
}

impl Not for Condition {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::new(self.param, Expr::negate(self.body))
    }
}
