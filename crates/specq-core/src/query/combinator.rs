//! Module: query::combinator
//! Responsibility: whole-specification boolean composition.
//! Does not own: shaping (includes, sorts, paging) of the operands.
//! Boundary: criteria-only results; shaping is dropped by contract.

use crate::{
    error::SpecError,
    query::{
        predicate::{Connective, PredicateNode},
        spec::Specification,
    },
};
use std::ops::{BitAnd, BitOr, Not};

/// Both operands must hold. Only the criteria of each operand survive.
#[must_use]
pub fn and<E>(left: &Specification<E>, right: &Specification<E>) -> Specification<E> {
    combine(left, right, Connective::And)
}

/// Either operand may hold. An operand without criteria is the identity,
/// so the result carries the other operand's criteria.
#[must_use]
pub fn or<E>(left: &Specification<E>, right: &Specification<E>) -> Specification<E> {
    combine(left, right, Connective::Or)
}

/// Negated criteria. A specification without criteria stays unfiltered.
#[must_use]
pub fn not<E>(spec: &Specification<E>) -> Specification<E> {
    Specification::from_criteria(spec.root().cloned().map(PredicateNode::negate))
}

/// Left fold with AND. A single operand is returned unchanged.
pub fn all_of<'a, E: 'a, I>(specs: I) -> Result<Specification<E>, SpecError>
where
    I: IntoIterator<Item = &'a Specification<E>>,
{
    fold(specs, Connective::And, "all_of")
}

/// Left fold with OR. A single operand is returned unchanged.
pub fn any_of<'a, E: 'a, I>(specs: I) -> Result<Specification<E>, SpecError>
where
    I: IntoIterator<Item = &'a Specification<E>>,
{
    fold(specs, Connective::Or, "any_of")
}

fn combine<E>(
    left: &Specification<E>,
    right: &Specification<E>,
    connective: Connective,
) -> Specification<E> {
    Specification::from_criteria(PredicateNode::combine(
        left.root().cloned(),
        right.root().cloned(),
        connective,
    ))
}

fn fold<'a, E: 'a, I>(
    specs: I,
    connective: Connective,
    combinator: &'static str,
) -> Result<Specification<E>, SpecError>
where
    I: IntoIterator<Item = &'a Specification<E>>,
{
    let mut specs = specs.into_iter();
    let first = specs
        .next()
        .ok_or(SpecError::EmptyOperandSet { combinator })?;

    Ok(specs.fold(first.clone(), |acc, spec| combine(&acc, spec, connective)))
}

impl<E> Specification<E> {
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        and(self, other)
    }

    #[must_use]
    pub fn or(&self, other: &Self) -> Self {
        or(self, other)
    }

    #[must_use]
    pub fn negate(&self) -> Self {
        not(self)
    }
}

impl<E> BitAnd for &Specification<E> {
    type Output = Specification<E>;

    fn bitand(self, rhs: Self) -> Self::Output {
        and(self, rhs)
    }
}

impl<E> BitOr for &Specification<E> {
    type Output = Specification<E>;

    fn bitor(self, rhs: Self) -> Self::Output {
        or(self, rhs)
    }
}

impl<E> Not for &Specification<E> {
    type Output = Specification<E>;

    fn not(self) -> Self::Output {
        not(self)
    }
}

impl<E> BitAnd for Specification<E> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        and(&self, &rhs)
    }
}

impl<E> BitOr for Specification<E> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        or(&self, &rhs)
    }
}

impl<E> Not for Specification<E> {
    type Output = Self;

    fn not(self) -> Self::Output {
        not(&self)
    }
}

///
/// TESTS
///
