use crate::query::predicate::ast::{Expr, Lambda, Parameter};
use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
};

///
/// Connective
/// Binary connective used when merging a condition into an existing tree.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Connective {
    And,
    Or,
}

///
/// PredicateNode
///
/// Criteria tree over one entity type. Leaves are independently built
/// lambdas, each with its own parameter; `to_bound_predicate` unifies them.
///

pub enum PredicateNode<E> {
    Leaf(Lambda<E>),
    And(Box<Self>, Box<Self>),
    Or(Box<Self>, Box<Self>),
    Not(Box<Self>),
}

impl<E> PredicateNode<E> {
    #[must_use]
    pub const fn leaf(predicate: Lambda<E>) -> Self {
        Self::Leaf(predicate)
    }

    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }

    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    #[must_use]
    pub fn connect(self, connective: Connective, rhs: Self) -> Self {
        match connective {
            Connective::And => self.and(rhs),
            Connective::Or => self.or(rhs),
        }
    }

    /// Merge two optional criteria. `None` means "no filter" and is the
    /// identity for both connectives.
    #[must_use]
    pub fn combine(left: Option<Self>, right: Option<Self>, connective: Connective) -> Option<Self> {
        match (left, right) {
            (Some(left), Some(right)) => Some(left.connect(connective, right)),
            (Some(node), None) | (None, Some(node)) => Some(node),
            (None, None) => None,
        }
    }

    /// Number of leaf predicates in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Not(inner) => inner.leaf_count(),
            Self::And(left, right) | Self::Or(left, right) => {
                left.leaf_count() + right.leaf_count()
            }
        }
    }

    /// Bind every leaf to `shared` and emit one flattened lambda.
    ///
    /// Each leaf body is rewritten so its field reads go through `shared`,
    /// then the bodies are joined with plain `And`/`Or`/`Not` expression
    /// nodes. The result has exactly one parameter.
    #[must_use]
    pub fn to_bound_predicate(&self, shared: Parameter) -> Lambda<E> {
        Lambda::from_parts(shared, self.bound_body(shared))
    }

    fn bound_body(&self, shared: Parameter) -> Expr {
        match self {
            Self::Leaf(lambda) => lambda.rebind_body(shared),
            Self::And(left, right) => Expr::and(left.bound_body(shared), right.bound_body(shared)),
            Self::Or(left, right) => Expr::or(left.bound_body(shared), right.bound_body(shared)),
            Self::Not(inner) => Expr::negate(inner.bound_body(shared)),
        }
    }
}

impl<E> From<Lambda<E>> for PredicateNode<E> {
    fn from(predicate: Lambda<E>) -> Self {
        Self::Leaf(predicate)
    }
}

impl<E> Clone for PredicateNode<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(lambda) => Self::Leaf(lambda.clone()),
            Self::And(left, right) => Self::And(left.clone(), right.clone()),
            Self::Or(left, right) => Self::Or(left.clone(), right.clone()),
            Self::Not(inner) => Self::Not(inner.clone()),
        }
    }
}

impl<E> PartialEq for PredicateNode<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => a == b,
            (Self::And(al, ar), Self::And(bl, br)) | (Self::Or(al, ar), Self::Or(bl, br)) => {
                al == bl && ar == br
            }
            (Self::Not(a), Self::Not(b)) => a == b,
            _ => false,
        }
    }
}

impl<E> fmt::Debug for PredicateNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(lambda) => f.debug_tuple("Leaf").field(lambda).finish(),
            Self::And(left, right) => f.debug_tuple("And").field(left).field(right).finish(),
            Self::Or(left, right) => f.debug_tuple("Or").field(left).field(right).finish(),
            Self::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}

impl<E> BitAnd for PredicateNode<E> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl<E> BitOr for PredicateNode<E> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl<E> Not for PredicateNode<E> {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}
