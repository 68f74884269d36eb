use crate::{
    error::{InvalidOperationError, SpecError},
    query::predicate::rewrite::{ParameterRebinder, free_parameters},
    value::Value,
};
use derive_more::Deref;
use std::{
    collections::BTreeSet,
    fmt,
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

///
/// Predicate AST
///
/// Schema-agnostic expression trees over one entity parameter.
/// Trees are plain data so a downstream translator can decompose them;
/// nothing in this layer hides a sub-predicate behind an opaque call.
///

static NEXT_PARAMETER_ID: AtomicU64 = AtomicU64::new(1);

///
/// ParameterId
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ParameterId(u64);

impl ParameterId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// Parameter
///
/// Placeholder for the entity instance a lambda is applied to.
/// Identity is the process-unique id; the name is for rendering only.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Parameter {
    id: ParameterId,
    name: &'static str,
}

impl Parameter {
    /// Allocate a fresh parameter identity.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            id: ParameterId(NEXT_PARAMETER_ID.fetch_add(1, Ordering::Relaxed)),
            name,
        }
    }

    #[must_use]
    pub const fn id(self) -> ParameterId {
        self.id
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl Default for Parameter {
    fn default() -> Self {
        Self::new("e")
    }
}

///
/// FieldPath
/// Non-empty field name or dotted path read through `FieldValues`.
///

#[derive(Clone, Debug, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FieldPath(String);

impl FieldPath {
    /// Parse a field path, rejecting empty input.
    pub fn parse(path: impl Into<String>) -> Result<Self, SpecError> {
        let path = path.into();
        if path.trim().is_empty() {
            return Err(SpecError::MissingArgument { argument: "path" });
        }

        Ok(Self(path))
    }

    pub(crate) fn from_static(path: &'static str) -> Self {
        Self(path.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Ne = 0x02,
    Lt = 0x03,
    Lte = 0x04,
    Gt = 0x05,
    Gte = 0x06,
    In = 0x07,
    NotIn = 0x08,
    Contains = 0x09,
    StartsWith = 0x0a,
    EndsWith = 0x0b,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Contains => "CONTAINS",
            Self::StartsWith => "STARTS WITH",
            Self::EndsWith => "ENDS WITH",
        }
    }
}

///
/// Expr
///
/// Expression node. Field reads carry the parameter they dereference, which
/// is what parameter rebinding rewrites.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Field { param: Parameter, path: FieldPath },
    Literal(Value),
    Compare {
        op: CompareOp,
        left: Box<Self>,
        right: Box<Self>,
    },
    IsNull(Box<Self>),
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Not(Box<Self>),
}

impl Expr {
    #[must_use]
    pub const fn field(param: Parameter, path: FieldPath) -> Self {
        Self::Field { param, path }
    }

    #[must_use]
    pub fn compare(op: CompareOp, left: Self, right: Self) -> Self {
        Self::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn is_null(inner: Self) -> Self {
        Self::IsNull(Box::new(inner))
    }

    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn negate(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Number of nodes in this expression.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Field { .. } | Self::Literal(_) => 1,
            Self::IsNull(inner) | Self::Not(inner) => 1 + inner.node_count(),
            Self::Compare { left, right, .. } | Self::And(left, right) | Self::Or(left, right) => {
                1 + left.node_count() + right.node_count()
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { param, path } => write!(f, "{}.{path}", param.name()),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Compare { op, left, right } => write!(f, "({left} {} {right})", op.symbol()),
            Self::IsNull(inner) => write!(f, "({inner} IS NULL)"),
            Self::And(left, right) => write!(f, "({left} AND {right})"),
            Self::Or(left, right) => write!(f, "({left} OR {right})"),
            Self::Not(inner) => write!(f, "NOT {inner}"),
        }
    }
}

///
/// Lambda
///
/// One parameter plus a body that reads only that parameter. Used both as
/// a boolean predicate (criteria) and as a value-producing key selector.
///

pub struct Lambda<E> {
    param: Parameter,
    body: Expr,
    _marker: PhantomData<fn(&E)>,
}

impl<E> Lambda<E> {
    /// Build a lambda, rejecting bodies that read any other parameter.
    pub fn new(param: Parameter, body: Expr) -> Result<Self, SpecError> {
        let free = free_parameters(&body);
        if free.iter().any(|id| *id != param.id()) {
            return Err(InvalidOperationError::UnboundParameter.into());
        }

        Ok(Self::from_parts(param, body))
    }

    // Callers guarantee the body reads only `param`.
    pub(crate) const fn from_parts(param: Parameter, body: Expr) -> Self {
        Self {
            param,
            body,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn parameter(&self) -> Parameter {
        self.param
    }

    #[must_use]
    pub const fn body(&self) -> &Expr {
        &self.body
    }

    /// Parameters referenced by the body.
    #[must_use]
    pub fn free_parameters(&self) -> BTreeSet<ParameterId> {
        free_parameters(&self.body)
    }

    /// Body with every reference to this lambda's parameter replaced by `shared`.
    #[must_use]
    pub fn rebind_body(&self, shared: Parameter) -> Expr {
        ParameterRebinder::new(self.param.id(), shared).rewrite(&self.body)
    }

    /// The same lambda re-expressed over `shared`.
    #[must_use]
    pub fn rebind(&self, shared: Parameter) -> Self {
        Self::from_parts(shared, self.rebind_body(shared))
    }

    /// Derive a lambda with the same parameter and a transformed body.
    pub(crate) fn map_body(&self, f: impl FnOnce(Expr) -> Expr) -> Self {
        Self::from_parts(self.param, f(self.body.clone()))
    }
}

impl<E> Clone for Lambda<E> {
    fn clone(&self) -> Self {
        Self::from_parts(self.param, self.body.clone())
    }
}

impl<E> PartialEq for Lambda<E> {
    fn eq(&self, other: &Self) -> bool {
        self.param == other.param && self.body == other.body
    }
}

impl<E> fmt::Debug for Lambda<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lambda")
            .field("param", &self.param)
            .field("body", &self.body)
            .finish()
    }
}

impl<E> fmt::Display for Lambda<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.param.name(), self.body)
    }
}
