use crate::{
    error::{InvalidOperationError, SpecError},
    query::predicate::{Connective, PredicateNode},
};
use std::fmt;

///
/// ChainMode
///
/// Attached chains belong to a specification builder and must be started
/// with `filter`; detached chains build standalone subtrees for groups.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChainMode {
    Attached,
    Detached,
}

///
/// CriteriaChain
///
/// Fluent, value-typed assembly of a criteria tree. Each call folds the
/// new condition into the current root left to right, with no implicit
/// precedence; `group`/`or_group` introduce explicit parentheses.
///
/// Misuse does not panic: the first error is kept and every later call is
/// ignored until the owner surfaces it at build time.
///

pub struct CriteriaChain<E> {
    mode: ChainMode,
    root: Option<PredicateNode<E>>,
    error: Option<SpecError>,
}

impl<E> Default for CriteriaChain<E> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<E> CriteriaChain<E> {
    /// Chain owned by a specification builder.
    #[must_use]
    pub const fn attached() -> Self {
        Self {
            mode: ChainMode::Attached,
            root: None,
            error: None,
        }
    }

    /// Standalone chain; `and`/`or` on an empty detached chain set the root.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            mode: ChainMode::Detached,
            root: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> ChainMode {
        self.mode
    }

    #[must_use]
    pub const fn root(&self) -> Option<&PredicateNode<E>> {
        self.root.as_ref()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&SpecError> {
        self.error.as_ref()
    }

    /// Explicit start. On a chain that already has a root, ANDs into it.
    #[must_use]
    pub fn filter(mut self, predicate: impl Into<PredicateNode<E>>) -> Self {
        if self.error.is_none() {
            self.root = PredicateNode::combine(
                self.root.take(),
                Some(predicate.into()),
                Connective::And,
            );
        }
        self
    }

    #[must_use]
    pub fn and(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.merge(Connective::And, predicate.into())
    }

    #[must_use]
    pub fn or(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.merge(Connective::Or, predicate.into())
    }

    /// Negate `predicate`, then merge with AND.
    #[must_use]
    pub fn and_not(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.merge(Connective::And, predicate.into().negate())
    }

    /// Negate `predicate`, then merge with OR.
    #[must_use]
    pub fn or_not(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.merge(Connective::Or, predicate.into().negate())
    }

    #[must_use]
    pub fn not(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.and_not(predicate)
    }

    /// Build a parenthesised subtree on a detached chain and AND it in.
    #[must_use]
    pub fn group<F>(self, build: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.merge_group(Connective::And, build)
    }

    /// Build a parenthesised subtree on a detached chain and OR it in.
    #[must_use]
    pub fn or_group<F>(self, build: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        self.merge_group(Connective::Or, build)
    }

    /// Surface the deferred error or the finished tree.
    pub fn finish(self) -> Result<Option<PredicateNode<E>>, SpecError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.root),
        }
    }

    pub(crate) const fn take_error(&mut self) -> Option<SpecError> {
        self.error.take()
    }

    fn merge(mut self, connective: Connective, node: PredicateNode<E>) -> Self {
        if self.error.is_some() {
            return self;
        }

        self.root = match (self.root.take(), self.mode) {
            (Some(root), _) => Some(root.connect(connective, node)),
            (None, ChainMode::Detached) => Some(node),
            (None, ChainMode::Attached) => {
                self.error = Some(InvalidOperationError::MissingStart.into());
                None
            }
        };
        self
    }

    fn merge_group<F>(mut self, connective: Connective, build: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if self.error.is_some() {
            return self;
        }

        match build(Self::detached()).finish() {
            Ok(Some(subtree)) => {
                self.root = PredicateNode::combine(self.root.take(), Some(subtree), connective);
            }
            Ok(None) => self.error = Some(InvalidOperationError::EmptyClause.into()),
            Err(err) => self.error = Some(err),
        }
        self
    }
}

impl<E> Clone for CriteriaChain<E> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            root: self.root.clone(),
            error: self.error.clone(),
        }
    }
}

impl<E> fmt::Debug for CriteriaChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CriteriaChain")
            .field("mode", &self.mode)
            .field("root", &self.root)
            .field("error", &self.error)
            .finish()
    }
}
