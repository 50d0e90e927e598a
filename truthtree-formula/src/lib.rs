//! Propositional formula data types used by the truthtree tableau prover.

/// Shortcut for tests
#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
#[macro_export]
macro_rules! atom {
    ($x:ident) => {
        $crate::formula::Formula::literal(stringify!($x))
    };
}

pub mod formula;
pub mod set;

pub use formula::{Connective, Formula};
pub use set::FormulaSet;
