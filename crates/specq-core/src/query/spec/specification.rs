use crate::query::{
    predicate::{FieldPath, Lambda, Parameter, PredicateNode},
    spec::{PageWindow, SortDescriptor, SpecBuilder, SpecificationView},
};
use std::fmt;

///
/// Specification
///
/// Immutable description of which rows to read for one entity type: the
/// bound criteria, eager-load hints, ordering tiers and paging window.
/// Produced by `SpecBuilder::build` or by the combinators.
///

pub struct Specification<E> {
    root: Option<PredicateNode<E>>,
    criteria: Option<Lambda<E>>,
    includes: Vec<FieldPath>,
    include_paths: Vec<String>,
    sorts: Vec<SortDescriptor<E>>,
    page: PageWindow,
}

impl<E> Specification<E> {
    #[must_use]
    pub const fn builder() -> SpecBuilder<E> {
        SpecBuilder::new()
    }

    /// Specification that matches every row and shapes nothing.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            root: None,
            criteria: None,
            includes: Vec::new(),
            include_paths: Vec::new(),
            sorts: Vec::new(),
            page: PageWindow::disabled(),
        }
    }

    /// Criteria-only specification over `root`.
    #[must_use]
    pub fn from_criteria(root: Option<PredicateNode<E>>) -> Self {
        Self::assemble(root, Vec::new(), Vec::new(), Vec::new(), PageWindow::disabled())
    }

    pub(crate) fn assemble(
        root: Option<PredicateNode<E>>,
        includes: Vec<FieldPath>,
        include_paths: Vec<String>,
        sorts: Vec<SortDescriptor<E>>,
        page: PageWindow,
    ) -> Self {
        let criteria = root
            .as_ref()
            .map(|node| node.to_bound_predicate(Parameter::default()));

        Self {
            root,
            criteria,
            includes,
            include_paths,
            sorts,
            page,
        }
    }

    /// Unbound criteria tree, as composed by the builder or combinators.
    #[must_use]
    pub const fn root(&self) -> Option<&PredicateNode<E>> {
        self.root.as_ref()
    }

    #[must_use]
    pub fn has_criteria(&self) -> bool {
        self.criteria.is_some()
    }
}

impl<E> SpecificationView<E> for Specification<E> {
    fn criteria(&self) -> Option<&Lambda<E>> {
        self.criteria.as_ref()
    }

    fn includes(&self) -> &[FieldPath] {
        &self.includes
    }

    fn include_paths(&self) -> &[String] {
        &self.include_paths
    }

    fn sorts(&self) -> &[SortDescriptor<E>] {
        &self.sorts
    }

    fn page_window(&self) -> PageWindow {
        self.page
    }
}

impl<E> Default for Specification<E> {
    fn default() -> Self {
        Self::all()
    }
}

impl<E> Clone for Specification<E> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            criteria: self.criteria.clone(),
            includes: self.includes.clone(),
            include_paths: self.include_paths.clone(),
            sorts: self.sorts.clone(),
            page: self.page,
        }
    }
}

impl<E> fmt::Debug for Specification<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("criteria", &self.criteria)
            .field("includes", &self.includes)
            .field("include_paths", &self.include_paths)
            .field("sorts", &self.sorts)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
