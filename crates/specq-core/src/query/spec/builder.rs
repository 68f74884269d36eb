use crate::{
    error::{InvalidOperationError, SpecError},
    query::{
        builder::{CriteriaChain, FieldRef},
        predicate::{FieldPath, PredicateNode},
        spec::{KeySelector, NullOrdering, OrderDirection, PageWindow, SortDescriptor, Specification},
    },
};
use std::any::type_name;

///
/// SpecBuilder
///
/// Consuming builder for a `Specification`. Criteria calls delegate to an
/// attached `CriteriaChain`; shaping calls record includes, sort tiers
/// and the page window. The first misuse is kept and returned by `build`.
///

pub struct SpecBuilder<E> {
    chain: CriteriaChain<E>,
    includes: Vec<FieldPath>,
    include_paths: Vec<String>,
    sorts: Vec<SortDescriptor<E>>,
    page: PageWindow,
    error: Option<SpecError>,
}

impl<E> SpecBuilder<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chain: CriteriaChain::attached(),
            includes: Vec::new(),
            include_paths: Vec::new(),
            sorts: Vec::new(),
            page: PageWindow::disabled(),
            error: None,
        }
    }

    // ------------------------------------------------------------------
    // Criteria
    // ------------------------------------------------------------------

    #[must_use]
    pub fn filter(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.with_chain(|chain| chain.filter(predicate))
    }

    #[must_use]
    pub fn and(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.with_chain(|chain| chain.and(predicate))
    }

    #[must_use]
    pub fn or(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.with_chain(|chain| chain.or(predicate))
    }

    #[must_use]
    pub fn and_not(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.with_chain(|chain| chain.and_not(predicate))
    }

    #[must_use]
    pub fn or_not(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.with_chain(|chain| chain.or_not(predicate))
    }

    #[must_use]
    pub fn not(self, predicate: impl Into<PredicateNode<E>>) -> Self {
        self.with_chain(|chain| chain.not(predicate))
    }

    #[must_use]
    pub fn group<F>(self, build: F) -> Self
    where
        F: FnOnce(CriteriaChain<E>) -> CriteriaChain<E>,
    {
        self.with_chain(|chain| chain.group(build))
    }

    #[must_use]
    pub fn or_group<F>(self, build: F) -> Self
    where
        F: FnOnce(CriteriaChain<E>) -> CriteriaChain<E>,
    {
        self.with_chain(|chain| chain.or_group(build))
    }

    // ------------------------------------------------------------------
    // Eager-load hints
    // ------------------------------------------------------------------

    /// Typed eager-load hint. Duplicates are kept in declaration order;
    /// a blank field name fails like a blank `include_path`.
    #[must_use]
    pub fn include(mut self, field: FieldRef) -> Self {
        if self.error.is_some() {
            return self;
        }

        match FieldPath::parse(field.as_str()) {
            Ok(path) => {
                self.includes.push(path);
                self
            }
            Err(err) => self.fail(err),
        }
    }

    /// Dotted navigation path hint.
    #[must_use]
    pub fn include_path(mut self, path: impl Into<String>) -> Self {
        if self.error.is_some() {
            return self;
        }

        let path = path.into();
        if path.trim().is_empty() {
            return self.fail(SpecError::MissingArgument { argument: "path" });
        }
        self.include_paths.push(path);
        self
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Replace every sort tier with one ascending primary key.
    #[must_use]
    pub fn order_by(self, key: impl Into<KeySelector<E>>) -> Self {
        self.reset_order(key.into(), OrderDirection::Asc)
    }

    #[must_use]
    pub fn order_by_desc(self, key: impl Into<KeySelector<E>>) -> Self {
        self.reset_order(key.into(), OrderDirection::Desc)
    }

    /// Append an ascending tie-break tier.
    #[must_use]
    pub fn then_by(self, key: impl Into<KeySelector<E>>) -> Self {
        self.push_order(key.into(), OrderDirection::Asc)
    }

    #[must_use]
    pub fn then_by_desc(self, key: impl Into<KeySelector<E>>) -> Self {
        self.push_order(key.into(), OrderDirection::Desc)
    }

    /// Null keys sort ahead of non-null keys on the last tier.
    #[must_use]
    pub fn nulls_first(self) -> Self {
        self.set_nulls(NullOrdering::NullsFirst)
    }

    #[must_use]
    pub fn nulls_last(self) -> Self {
        self.set_nulls(NullOrdering::NullsLast)
    }

    // ------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------

    /// 1-based page of `page_size` rows.
    #[must_use]
    pub fn page(mut self, page_number: u32, page_size: u32) -> Self {
        if self.error.is_some() {
            return self;
        }

        match PageWindow::for_page(page_number, page_size) {
            Ok(window) => {
                self.page = window;
                self
            }
            Err(err) => self.fail(err),
        }
    }

    /// Skip `count` rows and enable paging. Without `take_by` the window
    /// is skip-only: no row limit is applied.
    #[must_use]
    pub fn skip_by(mut self, count: u32) -> Self {
        if self.error.is_none() {
            self.page = self.page.with_skip(count);
        }
        self
    }

    #[must_use]
    pub fn take_by(mut self, count: u32) -> Self {
        if self.error.is_some() {
            return self;
        }

        match self.page.with_take(count) {
            Ok(window) => {
                self.page = window;
                self
            }
            Err(err) => self.fail(err),
        }
    }

    // ------------------------------------------------------------------
    // Terminal
    // ------------------------------------------------------------------

    /// Validate and freeze into a `Specification`.
    pub fn build(self) -> Result<Specification<E>, SpecError> {
        if let Some(err) = self.error {
            tracing::debug!(
                target: "specq::spec",
                entity = type_name::<E>(),
                class = %err.class(),
                error = %err,
                "specification rejected"
            );
            return Err(err);
        }

        let root = self.chain.finish()?;

        Ok(Specification::assemble(
            root,
            self.includes,
            self.include_paths,
            self.sorts,
            self.page,
        ))
    }

    fn with_chain(mut self, f: impl FnOnce(CriteriaChain<E>) -> CriteriaChain<E>) -> Self {
        if self.error.is_some() {
            return self;
        }

        let mut chain = f(self.chain);
        self.error = chain.take_error();
        self.chain = chain;
        self
    }

    fn reset_order(mut self, key: KeySelector<E>, direction: OrderDirection) -> Self {
        if self.error.is_none() {
            self.sorts.clear();
            self.sorts.push(SortDescriptor::new(key, direction));
        }
        self
    }

    fn push_order(mut self, key: KeySelector<E>, direction: OrderDirection) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.sorts.is_empty() {
            return self.fail(InvalidOperationError::ThenByWithoutPrimary.into());
        }

        self.sorts.push(SortDescriptor::new(key, direction));
        self
    }

    fn set_nulls(mut self, nulls: NullOrdering) -> Self {
        if self.error.is_some() {
            return self;
        }

        match self.sorts.last_mut() {
            Some(sort) => {
                sort.set_nulls(nulls);
                self
            }
            None => self.fail(InvalidOperationError::NullOrderingWithoutSort.into()),
        }
    }

    fn fail(mut self, err: SpecError) -> Self {
        self.error.get_or_insert(err);
        self
    }
}

impl<E> Default for SpecBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
