use crate::query::{
    evaluator::EvaluationOptions,
    predicate::Lambda,
    spec::{IncludeHint, KeySelector, OrderDirection},
};

///
/// QuerySource
///
/// Composable query over one entity type, owned by a backend. Every stage
/// consumes the source and returns the narrowed one; errors are the
/// backend's own and pass through the evaluator unchanged.
///

pub trait QuerySource<E>: Sized {
    type Error;

    /// Receive evaluation hints before any stage runs.
    fn apply_options(self, _options: &EvaluationOptions) -> Result<Self, Self::Error> {
        Ok(self)
    }

    /// Narrow to rows satisfying a single-parameter predicate.
    fn filter(self, criteria: &Lambda<E>) -> Result<Self, Self::Error>;

    /// Advisory eager-load marker.
    fn include(self, hint: IncludeHint<'_>) -> Result<Self, Self::Error>;

    /// Start a new ordering, discarding any previous one.
    fn order_by(self, key: &KeySelector<E>, direction: OrderDirection)
    -> Result<Self, Self::Error>;

    /// Add a tie-break tier to the current ordering.
    fn then_by(self, key: &KeySelector<E>, direction: OrderDirection)
    -> Result<Self, Self::Error>;

    fn skip(self, count: u32) -> Result<Self, Self::Error>;

    fn take(self, count: u32) -> Result<Self, Self::Error>;
}

///
/// ExecuteQuery
/// Terminal operations on a shaped query source.
///

pub trait ExecuteQuery<E>: QuerySource<E> {
    fn fetch(self) -> Result<Vec<E>, Self::Error>;

    fn count(self) -> Result<u64, Self::Error>;
}
