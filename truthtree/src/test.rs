use std::collections::BTreeSet;

use truthtree_formula::Formula;

/// Atomic propositions occurring in a list of formulas, sorted by name.
pub fn atoms(formulas: &[Formula]) -> Vec<&str> {
    let mut atoms = BTreeSet::new();
    for formula in formulas {
        formula.for_each_atom(&mut |name| {
            atoms.insert(name);
        });
    }
    atoms.into_iter().collect()
}

/// Decides satisfiability by enumerating all assignments.
pub fn truth_table_sat(formulas: &[Formula]) -> bool {
    let atoms = atoms(formulas);
    assert!(atoms.len() < 16);

    (0..1u32 << atoms.len()).any(|bits| {
        let mut valuation = |name: &str| {
            let index = atoms.iter().position(|&atom| atom == name).unwrap();
            bits & (1 << index) != 0
        };
        formulas
            .iter()
            .all(|formula| formula.evaluate(&mut valuation))
    })
}

/// Checks that the signed literals of a model satisfy all formulas.
///
/// Atoms not mentioned in the model are tried with both values, as any value must work.
pub fn model_satisfies(model: &[Formula], formulas: &[Formula]) -> bool {
    let mut assigned = vec![];
    for literal in model {
        match literal.as_signed_literal() {
            Some(signed) => assigned.push(signed),
            None => return false,
        }
    }

    let free: Vec<&str> = atoms(formulas)
        .into_iter()
        .filter(|atom| assigned.iter().all(|&(name, _)| name != *atom))
        .collect();

    (0..1u32 << free.len()).all(|bits| {
        let mut valuation = |name: &str| {
            if let Some(&(_, value)) = assigned.iter().find(|&&(atom, _)| atom == name) {
                value
            } else {
                let index = free.iter().position(|&atom| atom == name).unwrap();
                bits & (1 << index) != 0
            }
        };
        formulas
            .iter()
            .all(|formula| formula.evaluate(&mut valuation))
    })
}
