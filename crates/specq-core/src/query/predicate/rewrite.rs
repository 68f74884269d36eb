//! Module: query::predicate::rewrite
//! Responsibility: structural visitors over `Expr` (parameter substitution,
//! free-parameter collection).
//! Does not own: predicate composition or evaluation.
//! Boundary: pure tree-to-tree transforms.

use crate::query::predicate::ast::{Expr, Parameter, ParameterId};
use std::collections::BTreeSet;

///
/// ExprVisitor
///
/// Read-only walk over an expression tree, children before parents.
///

pub(crate) trait ExprVisitor {
    fn visit(&mut self, expr: &Expr);

    fn walk(&mut self, expr: &Expr) {
        match expr {
            Expr::Field { .. } | Expr::Literal(_) => {}
            Expr::IsNull(inner) | Expr::Not(inner) => self.walk(inner),
            Expr::Compare { left, right, .. } | Expr::And(left, right) | Expr::Or(left, right) => {
                self.walk(left);
                self.walk(right);
            }
        }
        self.visit(expr);
    }
}

///
/// ParameterRebinder
///
/// Rewrites every field read through `from` into a read through `to`.
/// Reads through other parameters are left untouched.
///

pub(crate) struct ParameterRebinder {
    from: ParameterId,
    to: Parameter,
}

impl ParameterRebinder {
    pub(crate) const fn new(from: ParameterId, to: Parameter) -> Self {
        Self { from, to }
    }

    pub(crate) fn rewrite(&self, expr: &Expr) -> Expr {
        match expr {
            Expr::Field { param, path } => {
                let param = if param.id() == self.from {
                    self.to
                } else {
                    *param
                };
                Expr::field(param, path.clone())
            }
            Expr::Literal(value) => Expr::Literal(value.clone()),
            Expr::Compare { op, left, right } => {
                Expr::compare(*op, self.rewrite(left), self.rewrite(right))
            }
            Expr::IsNull(inner) => Expr::is_null(self.rewrite(inner)),
            Expr::And(left, right) => Expr::and(self.rewrite(left), self.rewrite(right)),
            Expr::Or(left, right) => Expr::or(self.rewrite(left), self.rewrite(right)),
            Expr::Not(inner) => Expr::negate(self.rewrite(inner)),
        }
    }
}

// Collects the identity of every parameter a field read goes through.
#[derive(Default)]
struct FreeParameters(BTreeSet<ParameterId>);

impl ExprVisitor for FreeParameters {
    fn visit(&mut self, expr: &Expr) {
        if let Expr::Field { param, .. } = expr {
            self.0.insert(param.id());
        }
    }
}

pub(crate) fn free_parameters(expr: &Expr) -> BTreeSet<ParameterId> {
    let mut collector = FreeParameters::default();
    collector.walk(expr);

    collector.0
}
