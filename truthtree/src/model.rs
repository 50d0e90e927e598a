//! Extraction of satisfying assignments.
use truthtree_formula::Formula;

use crate::state::Verdict;
use crate::tableau::Tableau;

impl Tableau {
    /// Signed literals of the first open leaf.
    ///
    /// Only available for a complete tableau with an open leaf. A bare literal is true and a negated
    /// literal is false in the assignment. Atoms not mentioned can take any value.
    pub fn model(&self) -> Option<Vec<Formula>> {
        if self.verdict() != Verdict::Open {
            return None;
        }

        let (_, leaf) = self.open_leaves().next()?;
        Some(
            leaf.formulas()
                .iter()
                .filter(|formula| formula.is_signed_literal())
                .cloned()
                .collect(),
        )
    }
}
