//! Observability: evaluation counters and the sink they flow through.
//!
//! Evaluator logic never touches the counter state directly; every event
//! goes through `MetricsEvent` and a `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EvalOps, EvalReport, EvalState};
pub use sink::{
    EvalMode, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
