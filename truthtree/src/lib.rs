//! Truthtree is a [semantic tableau][tableau] prover for propositional logic. Given a set of
//! formulas, it builds a truth tree by decomposing the formulas until every branch either contains
//! a contradiction or is saturated. The formulas are satisfiable iff an open branch remains, in
//! which case the literals of that branch describe a satisfying assignment.
//!
//! ```
//! use truthtree::{Tableau, Verdict};
//!
//! let mut tableau = Tableau::parse("A -> (B | C), A, ~B, C -> D, ~D").unwrap();
//! assert_eq!(tableau.expand_all(), Verdict::Closed);
//! ```
//!
//! [tableau]: https://en.wikipedia.org/wiki/Method_of_analytic_tableaux

pub mod config;
pub mod node;
pub mod rules;
pub mod state;
pub mod tableau;

mod model;
mod render;

#[cfg(test)]
mod test;

pub use config::{TableauConfig, TableauConfigUpdate};
pub use state::Verdict;
pub use tableau::Tableau;
pub use truthtree_formula::{formula, set, Connective, Formula, FormulaSet};

pub mod syntax {
    //! Parser and writer for the textual formula syntax.
    pub use truthtree_syntax::*;
}
