//! Module: query::builder
//! Responsibility: fluent field-level conditions and criteria chains.
//! Does not own: parameter binding or specification assembly.
//! Boundary: user-facing ergonomic builder layer.

mod chain;
mod field;


pub use chain::{ChainMode, CriteriaChain};
pub use field::{Condition, FieldRef};
