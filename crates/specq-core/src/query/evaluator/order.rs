use crate::{
    query::{
        builder::FieldRef,
        spec::{KeySelector, NullOrdering, OrderDirection, SortDescriptor},
    },
    traits::EntityKind,
};

///
/// SortTier
/// One `order_by`/`then_by` call the evaluator will issue.
///

pub(crate) struct SortTier<E> {
    pub(crate) key: KeySelector<E>,
    pub(crate) direction: OrderDirection,
}

///
/// SortPlan
///
/// Sort descriptors lowered into source calls. A null policy expands into
/// an `IS NULL` tier ahead of its key; a missing sort may fall back to the
/// entity identity.
///

pub(crate) struct SortPlan<E> {
    pub(crate) tiers: Vec<SortTier<E>>,
    pub(crate) stable_fallback: bool,
}

impl<E: EntityKind> SortPlan<E> {
    pub(crate) fn resolve(sorts: &[SortDescriptor<E>], stable_by_id: bool) -> Self {
        if sorts.is_empty() {
            if !stable_by_id {
                return Self {
                    tiers: Vec::new(),
                    stable_fallback: false,
                };
            }

            return Self {
                tiers: vec![SortTier {
                    key: KeySelector::field(FieldRef::new(E::ID_FIELD)),
                    direction: OrderDirection::Asc,
                }],
                stable_fallback: true,
            };
        }

        let mut tiers = Vec::with_capacity(sorts.len());
        for sort in sorts {
            // `true` marks a null key, so descending puts nulls first.
            let null_direction = match sort.nulls() {
                NullOrdering::Unspecified => None,
                NullOrdering::NullsFirst => Some(OrderDirection::Desc),
                NullOrdering::NullsLast => Some(OrderDirection::Asc),
            };
            if let Some(direction) = null_direction {
                tiers.push(SortTier {
                    key: sort.key().null_tier(),
                    direction,
                });
            }

            tiers.push(SortTier {
                key: sort.key().clone(),
                direction: sort.direction(),
            });
        }

        Self {
            tiers,
            stable_fallback: false,
        }
    }

    /// Number of tiers `resolve` would produce.
    pub(crate) fn tier_count(sorts: &[SortDescriptor<E>], stable_by_id: bool) -> usize {
        if sorts.is_empty() {
            return usize::from(stable_by_id);
        }

        sorts.len()
            + sorts
                .iter()
                .filter(|sort| sort.nulls() != NullOrdering::Unspecified)
                .count()
    }
}
