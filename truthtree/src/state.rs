//! Outcome of tableau expansion.
use std::fmt;

/// Verdict of a tableau.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Verdict {
    /// Expansion is incomplete, either because it was not run yet or because the expansion limit
    /// was reached.
    Unknown,
    /// The complete tableau has an open leaf, the formulas are satisfiable.
    Open,
    /// Every leaf of the complete tableau is closed, the formulas are unsatisfiable.
    Closed,
}

impl Verdict {
    /// Satisfiability of the input formulas or `None` when unknown.
    pub fn is_satisfiable(self) -> Option<bool> {
        match self {
            Verdict::Unknown => None,
            Verdict::Open => Some(true),
            Verdict::Closed => Some(false),
        }
    }
}

impl Default for Verdict {
    fn default() -> Verdict {
        Verdict::Unknown
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Verdict::Unknown => "unknown",
            Verdict::Open => "open",
            Verdict::Closed => "closed",
        })
    }
}
