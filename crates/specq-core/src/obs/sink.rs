//! Metrics sink boundary.
//!
//! The evaluator MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::obs::metrics::{self, EvalReport};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// EvalMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EvalMode {
    Full,
    Count,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Evaluate {
        mode: EvalMode,
        entity_path: &'static str,
        filtered: bool,
        includes: u64,
        sort_tiers: u64,
        paged: bool,
        stable_fallback: bool,
    },
    EvaluateFailed {
        mode: EvalMode,
        entity_path: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counter state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Evaluate {
                mode,
                entity_path,
                filtered,
                includes,
                sort_tiers,
                paged,
                stable_fallback,
            } => {
                metrics::with_state_mut(|m| {
                    match mode {
                        EvalMode::Full => {
                            m.ops.full_evaluations = m.ops.full_evaluations.saturating_add(1);
                        }
                        EvalMode::Count => {
                            m.ops.count_evaluations = m.ops.count_evaluations.saturating_add(1);
                        }
                    }
                    if filtered {
                        m.ops.filters_applied = m.ops.filters_applied.saturating_add(1);
                    }
                    m.ops.includes_applied = m.ops.includes_applied.saturating_add(includes);
                    m.ops.sort_tiers_applied = m.ops.sort_tiers_applied.saturating_add(sort_tiers);
                    if paged {
                        m.ops.pages_applied = m.ops.pages_applied.saturating_add(1);
                    }
                    if stable_fallback {
                        m.ops.stable_fallbacks = m.ops.stable_fallbacks.saturating_add(1);
                    }

                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    match mode {
                        EvalMode::Full => {
                            entry.full_evaluations = entry.full_evaluations.saturating_add(1);
                        }
                        EvalMode::Count => {
                            entry.count_evaluations = entry.count_evaluations.saturating_add(1);
                        }
                    }
                    if filtered {
                        entry.filters_applied = entry.filters_applied.saturating_add(1);
                    }
                });
            }

            MetricsEvent::EvaluateFailed { mode: _, entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.failed_evaluations = m.ops.failed_evaluations.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.failed_evaluations = entry.failed_evaluations.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state for reporting and tests.
#[must_use]
pub fn metrics_report() -> EvalReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Capture(RefCell<Vec<MetricsEvent>>);

    impl MetricsSink for Capture {
        fn record(&self, event: MetricsEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    const FAILED: MetricsEvent = MetricsEvent::EvaluateFailed {
        mode: EvalMode::Count,
        entity_path: "test::Account",
    };

    #[test]
    fn global_sink_accumulates_counters() {
        metrics_reset_all();

        record(MetricsEvent::Evaluate {
            mode: EvalMode::Full,
            entity_path: "test::Account",
            filtered: true,
            includes: 2,
            sort_tiers: 3,
            paged: true,
            stable_fallback: false,
        });
        record(FAILED);

        let report = metrics_report();
        assert_eq!(report.ops.full_evaluations, 1);
        assert_eq!(report.ops.includes_applied, 2);
        assert_eq!(report.ops.sort_tiers_applied, 3);
        assert_eq!(report.ops.failed_evaluations, 1);
        assert_eq!(report.entities["test::Account"].filters_applied, 1);

        metrics_reset_all();
        assert_eq!(metrics_report(), EvalReport::default());
    }

    #[test]
    fn override_captures_and_restores() {
        metrics_reset_all();
        let capture = Rc::new(Capture::default());

        with_metrics_sink(capture.clone(), || record(FAILED));

        assert_eq!(capture.0.borrow().as_slice(), &[FAILED]);
        assert_eq!(metrics_report().ops.failed_evaluations, 0);

        record(FAILED);
        assert_eq!(metrics_report().ops.failed_evaluations, 1);
    }
}
