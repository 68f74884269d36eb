mod ast;
mod eval;
mod node;
pub(crate) mod rewrite;

#[cfg(test)]
mod tests;

pub use ast::{CompareOp, Expr, FieldPath, Lambda, Parameter, ParameterId};
pub use eval::{CompiledKey, CompiledPredicate, eval_compare};
pub use node::{Connective, PredicateNode};
