//! Module: query::evaluator
//! Responsibility: drive a query source through the fixed stage order.
//! Does not own: query execution, which belongs to the source.
//! Boundary: specification view in, shaped source out.
//!
//! Stage order:
//! 0. options hand-off
//! 1. filter
//! 2. eager-load hints (typed, then string paths)
//! 3. sort tiers (null tiers expanded, optional identity fallback)
//! 4. skip, then take, when paging is enabled
//!
//! Count mode stops after stage 1.

mod count;
mod explain;
mod memory;
mod options;
mod order;
mod result;
mod source;


pub use count::CountOptimizedSpecification;
pub use explain::{ExplainSource, QueryExplain, QueryFingerprint, QueryStage};
pub use memory::MemorySource;
pub use options::{EvaluationOptions, OptionsError, TrackingMode};
pub use result::PaginatedResult;
pub use source::{ExecuteQuery, QuerySource};

use crate::{
    obs::sink::{self, EvalMode, MetricsEvent},
    query::spec::SpecificationView,
    traits::EntityKind,
};
use order::SortPlan;

///
/// SpecificationEvaluator
///
/// Stateless apart from its options; one evaluator may be shared across
/// threads and reused for any number of evaluations.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpecificationEvaluator {
    options: EvaluationOptions,
}

impl SpecificationEvaluator {
    #[must_use]
    pub const fn new(options: EvaluationOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    /// Apply every stage of `spec` to `source`.
    pub fn evaluate<E, S, V>(&self, source: S, spec: &V) -> Result<S, S::Error>
    where
        E: EntityKind,
        S: QuerySource<E>,
        V: SpecificationView<E> + ?Sized,
    {
        let result = self.run(source, spec, EvalMode::Full);
        record_outcome::<E, _>(EvalMode::Full, result.is_ok(), spec, &self.options);

        result
    }

    /// Apply only what affects the row count: options and criteria.
    pub fn evaluate_count<E, S, V>(&self, source: S, spec: &V) -> Result<S, S::Error>
    where
        E: EntityKind,
        S: QuerySource<E>,
        V: SpecificationView<E> + ?Sized,
    {
        let view = CountOptimizedSpecification::new(spec);
        let result = self.run(source, &view, EvalMode::Count);
        record_outcome::<E, _>(EvalMode::Count, result.is_ok(), &view, &self.options);

        result
    }

    /// Evaluate and fetch the shaped rows.
    pub fn fetch<E, S, V>(&self, source: S, spec: &V) -> Result<Vec<E>, S::Error>
    where
        E: EntityKind,
        S: ExecuteQuery<E>,
        V: SpecificationView<E> + ?Sized,
    {
        self.evaluate(source, spec)?.fetch()
    }

    /// Count rows matching the criteria, ignoring shaping.
    pub fn count<E, S, V>(&self, source: S, spec: &V) -> Result<u64, S::Error>
    where
        E: EntityKind,
        S: ExecuteQuery<E>,
        V: SpecificationView<E> + ?Sized,
    {
        self.evaluate_count(source, spec)?.count()
    }

    fn run<E, S, V>(&self, source: S, spec: &V, mode: EvalMode) -> Result<S, S::Error>
    where
        E: EntityKind,
        S: QuerySource<E>,
        V: SpecificationView<E> + ?Sized,
    {
        tracing::debug!(
            target: "specq::evaluator",
            entity = E::PATH,
            mode = ?mode,
            filtered = spec.criteria().is_some(),
            sorts = spec.sorts().len(),
            paged = spec.is_paging_enabled(),
            tag = self.options.tag.as_deref().unwrap_or(""),
            "evaluating specification"
        );

        // 0. options
        let mut source = source.apply_options(&self.options)?;

        // 1. filter
        if let Some(criteria) = spec.criteria() {
            tracing::trace!(target: "specq::evaluator", criteria = %criteria, "filter");
            source = source.filter(criteria)?;
        }

        if mode == EvalMode::Count {
            return Ok(source);
        }

        // 2. eager-load hints
        for hint in spec.include_hints() {
            tracing::trace!(target: "specq::evaluator", hint = %hint, "include");
            source = source.include(hint)?;
        }

        // 3. sort tiers
        let plan = SortPlan::resolve(spec.sorts(), self.options.stable_sort_by_id_when_missing);
        for (position, tier) in plan.tiers.iter().enumerate() {
            tracing::trace!(
                target: "specq::evaluator",
                position,
                key = %tier.key,
                direction = %tier.direction,
                fallback = plan.stable_fallback,
                "order"
            );
            source = if position == 0 {
                source.order_by(&tier.key, tier.direction)?
            } else {
                source.then_by(&tier.key, tier.direction)?
            };
        }

        // 4. page
        let window = spec.page_window();
        if window.is_enabled() {
            if window.skip() > 0 {
                tracing::trace!(target: "specq::evaluator", skip = window.skip(), "skip");
                source = source.skip(window.skip())?;
            }
            if let Some(take) = window.take() {
                tracing::trace!(target: "specq::evaluator", take, "take");
                source = source.take(take)?;
            }
        }

        Ok(source)
    }
}

fn record_outcome<E, V>(mode: EvalMode, ok: bool, spec: &V, options: &EvaluationOptions)
where
    E: EntityKind,
    V: SpecificationView<E> + ?Sized,
{
    if !ok {
        tracing::debug!(target: "specq::evaluator", entity = E::PATH, mode = ?mode, "query source failed");
        sink::record(MetricsEvent::EvaluateFailed {
            mode,
            entity_path: E::PATH,
        });
        return;
    }

    let full = mode == EvalMode::Full;
    let stable_fallback =
        full && spec.sorts().is_empty() && options.stable_sort_by_id_when_missing;
    let sort_tiers = if full {
        SortPlan::<E>::tier_count(spec.sorts(), options.stable_sort_by_id_when_missing)
    } else {
        0
    };
    let includes = if full {
        spec.includes().len() + spec.include_paths().len()
    } else {
        0
    };

    sink::record(MetricsEvent::Evaluate {
        mode,
        entity_path: E::PATH,
        filtered: spec.criteria().is_some(),
        includes: u64::try_from(includes).unwrap_or(u64::MAX),
        sort_tiers: u64::try_from(sort_tiers).unwrap_or(u64::MAX),
        paged: full && spec.is_paging_enabled(),
        stable_fallback,
    });
}
