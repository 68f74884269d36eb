//! Core runtime for specq: entity traits, values, predicate trees, criteria
//! chains, specifications, and the staged evaluator.
#![warn(unreachable_pub)]

extern crate self as specq_core;

// public exports are one module level down
pub mod error;
pub mod obs;
pub mod query;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::{ErrorClass, InvalidOperationError, SpecError};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No evaluators, sources, or sinks are re-exported here.
///

pub mod prelude {
    pub use crate::{
        query::{
            builder::{CriteriaChain, FieldRef},
            predicate::PredicateNode,
            spec::{
                OrderDirection, SpecBuilder, Specification, SpecificationView as _,
            },
        },
        traits::{EntityKind, FieldValues, Path},
        value::Value,
    };
}
