use crate::query::{
    predicate::{FieldPath, Lambda},
    spec::{PageWindow, SortDescriptor, SpecificationView},
};
use std::marker::PhantomData;

///
/// CountOptimizedSpecification
///
/// View of a specification for counting: criteria pass through, while
/// includes, sorts and paging are always empty or disabled. Counting
/// through this view can never be skewed by a page window.
///

pub struct CountOptimizedSpecification<'a, E, S: ?Sized> {
    inner: &'a S,
    _marker: PhantomData<fn(&E)>,
}

impl<'a, E, S> CountOptimizedSpecification<'a, E, S>
where
    S: SpecificationView<E> + ?Sized,
{
    #[must_use]
    pub const fn new(inner: &'a S) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &'a S {
        self.inner
    }
}

impl<E, S> SpecificationView<E> for CountOptimizedSpecification<'_, E, S>
where
    S: SpecificationView<E> + ?Sized,
{
    fn criteria(&self) -> Option<&Lambda<E>> {
        self.inner.criteria()
    }

    fn includes(&self) -> &[FieldPath] {
        &[]
    }

    fn include_paths(&self) -> &[String] {
        &[]
    }

    fn sorts(&self) -> &[SortDescriptor<E>] {
        &[]
    }

    fn page_window(&self) -> PageWindow {
        PageWindow::disabled()
    }
}
