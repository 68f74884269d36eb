use crate::{
    query::{
        evaluator::{ExecuteQuery, QuerySource},
        predicate::{CompiledKey, Lambda},
        spec::{IncludeHint, KeySelector, OrderDirection},
    },
    traits::FieldValues,
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, convert::Infallible};

///
/// MemorySource
///
/// Query source over an owned row set. Ordering calls are collected and
/// applied as one stable sort right before the rows are next consumed, so
/// `order_by(a).then_by(b)` sorts by `(a, b)` rather than by `b` alone.
/// Eager-load hints have nothing to load and are ignored.
///

pub struct MemorySource<E> {
    rows: Vec<E>,
    pending_order: Vec<(CompiledKey<E>, OrderDirection)>,
}

impl<E: FieldValues + 'static> MemorySource<E> {
    #[must_use]
    pub fn new(rows: impl IntoIterator<Item = E>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            pending_order: Vec::new(),
        }
    }

    /// Rows in their current order, with any pending ordering applied.
    #[must_use]
    pub fn into_rows(mut self) -> Vec<E> {
        self.flush_order();
        self.rows
    }

    fn flush_order(&mut self) {
        if self.pending_order.is_empty() {
            return;
        }

        let order = std::mem::take(&mut self.pending_order);
        let mut keyed: Vec<(Vec<Value>, E)> = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|row| (order.iter().map(|(key, _)| key.read(&row)).collect(), row))
            .collect();

        // Vec::sort_by is stable, so rows equal on every tier keep source order.
        keyed.sort_by(|(left, _), (right, _)| compare_keys(left, right, &order));
        self.rows = keyed.into_iter().map(|(_, row)| row).collect();
    }
}

// First non-equal tier decides; direction flips that tier only.
fn compare_keys<E>(
    left: &[Value],
    right: &[Value],
    order: &[(CompiledKey<E>, OrderDirection)],
) -> Ordering {
    for ((l, r), (_, direction)) in left.iter().zip(right).zip(order) {
        let ordering = canonical_cmp(l, r);
        if ordering != Ordering::Equal {
            return match direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            };
        }
    }

    Ordering::Equal
}

impl<E: FieldValues + 'static> QuerySource<E> for MemorySource<E> {
    type Error = Infallible;

    fn filter(mut self, criteria: &Lambda<E>) -> Result<Self, Self::Error> {
        let predicate = criteria.compile();
        self.rows.retain(|row| predicate.matches(row));
        Ok(self)
    }

    fn include(self, _hint: IncludeHint<'_>) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn order_by(
        mut self,
        key: &KeySelector<E>,
        direction: OrderDirection,
    ) -> Result<Self, Self::Error> {
        self.pending_order.clear();
        self.pending_order
            .push((key.lambda().compile_key(), direction));
        Ok(self)
    }

    fn then_by(
        mut self,
        key: &KeySelector<E>,
        direction: OrderDirection,
    ) -> Result<Self, Self::Error> {
        self.pending_order
            .push((key.lambda().compile_key(), direction));
        Ok(self)
    }

    fn skip(mut self, count: u32) -> Result<Self, Self::Error> {
        self.flush_order();
        let count = usize::try_from(count).unwrap_or(usize::MAX).min(self.rows.len());
        self.rows.drain(..count);
        Ok(self)
    }

    fn take(mut self, count: u32) -> Result<Self, Self::Error> {
        self.flush_order();
        self.rows
            .truncate(usize::try_from(count).unwrap_or(usize::MAX));
        Ok(self)
    }
}

impl<E: FieldValues + 'static> ExecuteQuery<E> for MemorySource<E> {
    fn fetch(self) -> Result<Vec<E>, Self::Error> {
        Ok(self.into_rows())
    }

    fn count(self) -> Result<u64, Self::Error> {
        Ok(u64::try_from(self.rows.len()).unwrap_or(u64::MAX))
    }
}
