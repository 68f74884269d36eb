//! ## Crate layout
//! - `core`: values, entity traits, predicate trees, criteria chains,
//!   specifications, combinators, and the staged evaluator.
//!
//! The `prelude` module carries the vocabulary used to write specifications;
//! evaluation types live under `core::query::evaluator`.

pub use specq_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use specq_core::impl_entity;

pub use specq_core::{ErrorClass, InvalidOperationError, SpecError};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        query::{
            all_of, any_of,
            builder::{CriteriaChain, FieldRef},
            evaluator::{
                EvaluationOptions, ExecuteQuery as _, PaginatedResult, QuerySource as _,
                SpecificationEvaluator,
            },
            predicate::PredicateNode,
            spec::{NullOrdering, OrderDirection, SpecBuilder, Specification, SpecificationView as _},
        },
        traits::{EntityKind, FieldValues, Path},
        value::Value,
    };
}
