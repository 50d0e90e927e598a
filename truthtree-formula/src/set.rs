//! Sets of formulas.
use std::fmt;
use std::hash::BuildHasherDefault;
use std::iter::FromIterator;

use indexmap::IndexSet;
use rustc_hash::FxHasher;

use crate::formula::Formula;

type FormulaHasher = BuildHasherDefault<FxHasher>;

/// A set of formulas that iterates in insertion order.
///
/// Membership uses structural equality of formulas. Removing a formula keeps the relative order of
/// the remaining formulas, so iteration order only depends on the sequence of insertions and
/// removals, never on hash values.
#[derive(Clone, Default)]
pub struct FormulaSet {
    formulas: IndexSet<Formula, FormulaHasher>,
}

impl FormulaSet {
    /// Create an empty formula set.
    pub fn new() -> FormulaSet {
        FormulaSet::default()
    }

    /// Number of formulas in the set.
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn contains(&self, formula: &Formula) -> bool {
        self.formulas.contains(formula)
    }

    /// Appends a formula unless it is already present.
    ///
    /// Returns whether the formula was added.
    pub fn insert(&mut self, formula: Formula) -> bool {
        self.formulas.insert(formula)
    }

    /// Removes a formula, preserving the order of the remaining formulas.
    ///
    /// Returns whether the formula was present.
    pub fn remove(&mut self, formula: &Formula) -> bool {
        self.formulas.shift_remove(formula)
    }

    /// A copy of this set without the given formula.
    pub fn without(&self, formula: &Formula) -> FormulaSet {
        self.iter()
            .filter(|&member| member != formula)
            .cloned()
            .collect()
    }

    /// Iterator over all formulas in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.formulas.iter()
    }
}

impl FromIterator<Formula> for FormulaSet {
    fn from_iter<I: IntoIterator<Item = Formula>>(iter: I) -> FormulaSet {
        FormulaSet {
            formulas: iter.into_iter().collect(),
        }
    }
}

impl Extend<Formula> for FormulaSet {
    fn extend<I: IntoIterator<Item = Formula>>(&mut self, iter: I) {
        self.formulas.extend(iter)
    }
}

impl<'a> IntoIterator for &'a FormulaSet {
    type Item = &'a Formula;
    type IntoIter = indexmap::set::Iter<'a, Formula>;

    fn into_iter(self) -> Self::IntoIter {
        self.formulas.iter()
    }
}

/// Sets are equal when they contain the same formulas, regardless of order.
impl PartialEq for FormulaSet {
    fn eq(&self, other: &FormulaSet) -> bool {
        self.formulas == other.formulas
    }
}

impl Eq for FormulaSet {}

/// Comma separated formulas in insertion order.
impl fmt::Display for FormulaSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, formula) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(formula, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FormulaSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
