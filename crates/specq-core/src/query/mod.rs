//! Query composition modules.
//!
//! Criteria are assembled from independent leaf conditions, bound into a
//! single-parameter predicate by a specification, and evaluated against a
//! query source in a fixed stage order.

pub mod builder;
pub mod combinator;
pub mod evaluator;
pub mod predicate;
pub mod spec;

pub use builder::{ChainMode, Condition, CriteriaChain, FieldRef};
pub use combinator::{all_of, and, any_of, not, or};
pub use spec::{
    KeySelector, NullOrdering, OrderDirection, PageWindow, SortDescriptor, SpecBuilder,
    Specification, SpecificationView,
};
