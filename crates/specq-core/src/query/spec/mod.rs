//! Module: query::spec
//! Responsibility: specification values, their builder, and the read-only
//! view the evaluator and combinators consume.
//! Does not own: criteria chain mechanics or stage execution.
//! Boundary: the immutable contract handed to the evaluator.

mod builder;
mod include;
mod page;
mod sort;
mod specification;

#[cfg(test)]
mod tests;

pub use builder::SpecBuilder;
pub use include::IncludeHint;
pub use page::PageWindow;
pub use sort::{KeySelector, NullOrdering, OrderDirection, SortDescriptor};
pub use specification::Specification;

use crate::{
    query::predicate::{FieldPath, Lambda},
    traits::FieldValues,
};

///
/// SpecificationView
///
/// Read-only access to the parts of a specification. The evaluator is
/// written against this trait so wrappers such as the count-optimized view
/// can mask parts without copying.
///

pub trait SpecificationView<E> {
    /// Bound criteria with exactly one parameter, or `None` to match all.
    fn criteria(&self) -> Option<&Lambda<E>>;

    fn includes(&self) -> &[FieldPath];

    fn include_paths(&self) -> &[String];

    fn sorts(&self) -> &[SortDescriptor<E>];

    fn page_window(&self) -> PageWindow;

    fn skip(&self) -> u32 {
        self.page_window().skip()
    }

    fn take(&self) -> Option<u32> {
        self.page_window().take()
    }

    fn is_paging_enabled(&self) -> bool {
        self.page_window().is_enabled()
    }

    /// Eager-load hints in evaluation order: typed first, then paths.
    fn include_hints(&self) -> Vec<IncludeHint<'_>> {
        self.includes()
            .iter()
            .map(IncludeHint::Field)
            .chain(self.include_paths().iter().map(|p| IncludeHint::Path(p.as_str())))
            .collect()
    }

    /// Evaluate the criteria against one in-memory candidate.
    fn satisfies(&self, candidate: &E) -> bool
    where
        E: FieldValues + 'static,
    {
        self.criteria()
            .is_none_or(|criteria| criteria.compile().matches(candidate))
    }
}
