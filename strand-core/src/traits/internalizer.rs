//! SAT/Theory Bridge Traits.
//!
//! The theory front-end is written against these capabilities but never
//! implements them: literal internalization, clause construction, and model
//! value extraction belong to the host solver. The front-end's term facade
//! and inferred regex properties are inputs the bridge may query.

use crate::ast::{TermId, TermManager};
use crate::literal::{Lit, Var};

/// Literal internalization and clause construction offered by the SAT layer.
pub trait SatInternalizer {
    /// Whether `term` is handled natively by the Boolean layer.
    fn is_bool_op(&self, tm: &TermManager, term: TermId) -> bool;

    /// Internalize a Boolean-sorted term to a SAT literal.
    fn internalize(&mut self, tm: &mut TermManager, term: TermId) -> Lit;

    /// Allocate a fresh Boolean variable attached to `term`.
    fn add_bool_var(&mut self, term: TermId) -> Var;

    /// Add a binary clause.
    fn mk_clause2(&mut self, a: Lit, b: Lit);

    /// Add a ternary clause; `is_lemma` marks learned clauses.
    fn mk_clause3(&mut self, a: Lit, b: Lit, c: Lit, is_lemma: bool);

    /// Cache the literal assigned to an already-internalized term.
    fn cache(&mut self, term: TermId, lit: Lit);
}

/// Model construction capability of the theory bridge.
pub trait ModelBuilder {
    /// Compute the model value for `node`, appending it to `out_values`.
    fn add_value(&self, tm: &TermManager, node: TermId, out_values: &mut Vec<TermId>);

    /// Compute the model-construction dependencies of `node`.
    fn add_dep(&self, tm: &TermManager, node: TermId, out_deps: &mut Vec<TermId>);
}
