use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EvalState
/// Ephemeral, in-memory counters for specification evaluations.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EvalState {
    pub ops: EvalOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

///
/// EvalOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EvalOps {
    // Entrypoints
    pub full_evaluations: u64,
    pub count_evaluations: u64,
    pub failed_evaluations: u64,

    // Stages applied
    pub filters_applied: u64,
    pub includes_applied: u64,
    pub sort_tiers_applied: u64,
    pub pages_applied: u64,
    pub stable_fallbacks: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub full_evaluations: u64,
    pub count_evaluations: u64,
    pub failed_evaluations: u64,
    pub filters_applied: u64,
}

/// Snapshot handed out by `metrics_report`.
pub type EvalReport = EvalState;

thread_local! {
    static EVAL_STATE: RefCell<EvalState> = RefCell::new(EvalState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EvalState) -> R) -> R {
    EVAL_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EvalState) -> R) -> R {
    EVAL_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EvalState::default());
}

#[must_use]
pub(crate) fn report() -> EvalReport {
    with_state(Clone::clone)
}
