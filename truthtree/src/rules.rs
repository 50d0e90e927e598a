//! Tableau expansion rules.
//!
//! Rules are tried in a fixed priority order and the first applicable rule is selected:
//!
//! 1. closure, when the branch contains a formula and its negation
//! 2. modus ponens, when an implication's antecedent is present
//! 3. disjunctive syllogism, when the negation of one disjunct is present
//! 4. non-branching (alpha) decomposition
//! 5. branching (beta) decomposition
//!
//! Within one priority level the formulas of a node are visited in insertion order, so rule
//! selection is deterministic.
//!
//! Throughout this module a formula is _known_ on a branch if it is a formula of the node or was
//! decomposed further up the branch (see [`Node::knows`]). Rules never add known formulas. Each
//! selected rule either adds at least one unknown formula or consumes a formula of the node, which
//! bounds the number of rule applications per node.
use std::fmt;

use smallvec::{smallvec, SmallVec};

use truthtree_formula::Formula;

use crate::config::TableauConfig;
use crate::node::Node;

/// Formulas added by a single rule application.
pub type Additions = SmallVec<[Formula; 2]>;

/// The different rules of the tableau calculus.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RuleKind {
    Closure,
    ModusPonens,
    DisjunctiveSyllogism,
    Conjunction,
    Biconditional,
    NegatedDisjunction,
    NegatedImplication,
    DoubleNegation,
    Disjunction,
    Implication,
    NegatedConjunction,
    NegatedBiconditional,
}

impl RuleKind {
    /// Whether the rule splits a node into two children.
    pub fn is_branching(self) -> bool {
        match self {
            RuleKind::Disjunction
            | RuleKind::Implication
            | RuleKind::NegatedConjunction
            | RuleKind::NegatedBiconditional => true,
            _ => false,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RuleKind::Closure => "closure",
            RuleKind::ModusPonens => "modus ponens",
            RuleKind::DisjunctiveSyllogism => "disjunctive syllogism",
            RuleKind::Conjunction => "conjunction",
            RuleKind::Biconditional => "biconditional",
            RuleKind::NegatedDisjunction => "negated disjunction",
            RuleKind::NegatedImplication => "negated implication",
            RuleKind::DoubleNegation => "double negation",
            RuleKind::Disjunction => "disjunction",
            RuleKind::Implication => "implication",
            RuleKind::NegatedConjunction => "negated conjunction",
            RuleKind::NegatedBiconditional => "negated biconditional",
        };
        f.write_str(name)
    }
}

/// A branching rule application.
#[derive(Clone, Debug)]
pub struct Split {
    pub kind: RuleKind,
    /// The decomposed formula, which is not inherited by the children.
    pub source: Formula,
    /// Formulas added to the left and right child.
    pub sides: [Additions; 2],
}

/// A rule application selected for a node.
#[derive(Clone, Debug)]
pub enum Rule {
    /// The branch contains `formula` as well as its negation.
    Close { formula: Formula },
    /// Add formulas to the node.
    ///
    /// When `consume` is set, `source` is removed from the node and remembered as decomposed.
    Extend {
        kind: RuleKind,
        source: Formula,
        consume: bool,
        additions: Additions,
    },
    /// Split the node into two children.
    Branch(Split),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Close { .. } => RuleKind::Closure,
            Rule::Extend { kind, .. } => *kind,
            Rule::Branch(split) => split.kind,
        }
    }
}

/// Select the highest priority rule applicable to a node.
///
/// Returns `None` for saturated nodes.
pub fn select_rule(node: &Node, config: &TableauConfig) -> Option<Rule> {
    if let Some(formula) = complementary_pair(node) {
        return Some(Rule::Close { formula });
    }

    if config.modus_ponens {
        if let Some(rule) = node.formulas().iter().find_map(|f| modus_ponens(node, f)) {
            return Some(rule);
        }
    }

    if config.disjunctive_syllogism {
        if let Some(rule) = node
            .formulas()
            .iter()
            .find_map(|f| disjunctive_syllogism(node, f))
        {
            return Some(rule);
        }
    }

    if let Some(rule) = node.formulas().iter().find_map(|f| alpha_rule(node, f)) {
        return Some(rule);
    }

    node.formulas()
        .iter()
        .find_map(|f| beta_rule(node, f))
        .map(Rule::Branch)
}

/// Finds a formula whose negation is also on the branch.
///
/// This is not restricted to literals, `A & B` and `~(A & B)` are complementary as well.
fn complementary_pair(node: &Node) -> Option<Formula> {
    node.formulas()
        .iter()
        .chain(node.decomposed())
        .filter_map(Formula::negated)
        .find(|operand| node.knows(operand))
        .cloned()
}

/// Keeps only formulas not yet known on the branch.
fn unknown(node: &Node, formulas: Additions) -> Additions {
    let mut result = Additions::new();
    for formula in formulas {
        if !node.knows(&formula) && !result.contains(&formula) {
            result.push(formula);
        }
    }
    result
}

fn extend(kind: RuleKind, source: &Formula, consume: bool, additions: Additions) -> Rule {
    Rule::Extend {
        kind,
        source: source.clone(),
        consume,
        additions,
    }
}

fn modus_ponens(node: &Node, formula: &Formula) -> Option<Rule> {
    match formula {
        Formula::Implication(antecedent, consequent)
            if node.knows(antecedent) && !node.knows(consequent) =>
        {
            Some(extend(
                RuleKind::ModusPonens,
                formula,
                false,
                smallvec![(**consequent).clone()],
            ))
        }
        _ => None,
    }
}

fn disjunctive_syllogism(node: &Node, formula: &Formula) -> Option<Rule> {
    let (left, right) = match formula {
        Formula::Disjunction(left, right) => (left, right),
        _ => return None,
    };

    let derived = if node.knows(&left.negate()) && !node.knows(right) {
        right
    } else if node.knows(&right.negate()) && !node.knows(left) {
        left
    } else {
        return None;
    };

    Some(extend(
        RuleKind::DisjunctiveSyllogism,
        formula,
        false,
        smallvec![(**derived).clone()],
    ))
}

fn alpha_rule(node: &Node, formula: &Formula) -> Option<Rule> {
    match formula {
        // The conjunction itself stays, so it only applies while a conjunct is missing.
        Formula::Conjunction(left, right) => {
            let additions = unknown(node, smallvec![(**left).clone(), (**right).clone()]);
            if additions.is_empty() {
                None
            } else {
                Some(extend(RuleKind::Conjunction, formula, false, additions))
            }
        }
        Formula::Biconditional(left, right) => Some(extend(
            RuleKind::Biconditional,
            formula,
            true,
            unknown(
                node,
                smallvec![
                    Formula::Implication(left.clone(), right.clone()),
                    Formula::Implication(right.clone(), left.clone()),
                ],
            ),
        )),
        Formula::Negation(operand) => match &**operand {
            Formula::Disjunction(left, right) => Some(extend(
                RuleKind::NegatedDisjunction,
                formula,
                true,
                unknown(
                    node,
                    smallvec![
                        Formula::Negation(left.clone()),
                        Formula::Negation(right.clone()),
                    ],
                ),
            )),
            Formula::Implication(left, right) => Some(extend(
                RuleKind::NegatedImplication,
                formula,
                true,
                unknown(
                    node,
                    smallvec![(**left).clone(), Formula::Negation(right.clone())],
                ),
            )),
            Formula::Negation(inner) => Some(extend(
                RuleKind::DoubleNegation,
                formula,
                true,
                unknown(node, smallvec![(**inner).clone()]),
            )),
            _ => None,
        },
        _ => None,
    }
}

fn beta_rule(node: &Node, formula: &Formula) -> Option<Split> {
    let (kind, sides): (RuleKind, [Additions; 2]) = match formula {
        Formula::Disjunction(left, right) => (
            RuleKind::Disjunction,
            [smallvec![(**left).clone()], smallvec![(**right).clone()]],
        ),
        // Already satisfied on this branch, which is what modus ponens leaves behind.
        Formula::Implication(antecedent, consequent)
            if node.knows(antecedent) && node.knows(consequent) =>
        {
            return None
        }
        Formula::Implication(antecedent, consequent) => (
            RuleKind::Implication,
            [
                smallvec![Formula::Negation(antecedent.clone())],
                smallvec![(**consequent).clone()],
            ],
        ),
        Formula::Negation(operand) => match &**operand {
            Formula::Conjunction(left, right) => (
                RuleKind::NegatedConjunction,
                [
                    smallvec![Formula::Negation(left.clone())],
                    smallvec![Formula::Negation(right.clone())],
                ],
            ),
            Formula::Biconditional(left, right) => (
                RuleKind::NegatedBiconditional,
                [
                    smallvec![(**left).clone(), Formula::Negation(right.clone())],
                    smallvec![Formula::Negation(left.clone()), (**right).clone()],
                ],
            ),
            _ => return None,
        },
        _ => return None,
    };

    Some(Split {
        kind,
        source: formula.clone(),
        sides,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use truthtree_syntax::parse_formula_list;

    fn root(input: &str) -> Node {
        Node::root(parse_formula_list(input).unwrap().into_iter().collect())
    }

    fn selected(input: &str) -> Option<Rule> {
        select_rule(&root(input), &TableauConfig::default())
    }

    fn selected_kind(input: &str) -> Option<RuleKind> {
        selected(input).map(|rule| rule.kind())
    }

    #[test]
    fn closure_has_priority() {
        assert_eq!(selected_kind("A -> B, A, ~A"), Some(RuleKind::Closure));
        assert_eq!(selected_kind("~~A, ~A"), Some(RuleKind::Closure));
    }

    #[test]
    fn closure_on_compound_formulas() {
        match selected("A & B, C, ~(A & B)") {
            Some(Rule::Close { formula }) => assert_eq!(formula.to_string(), "(A & B)"),
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn modus_ponens_before_decomposition() {
        match selected("A & C, A -> B, A") {
            Some(Rule::Extend {
                kind: RuleKind::ModusPonens,
                consume: false,
                additions,
                ..
            }) => assert_eq!(additions[..], [Formula::literal("B")]),
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn modus_ponens_needs_missing_consequent() {
        assert_eq!(selected_kind("A -> B, A, B"), None);
    }

    #[test]
    fn disjunctive_syllogism_either_side() {
        match selected("A | B, ~B") {
            Some(Rule::Extend {
                kind: RuleKind::DisjunctiveSyllogism,
                additions,
                ..
            }) => assert_eq!(additions[..], [Formula::literal("A")]),
            other => panic!("unexpected rule {:?}", other),
        }
        assert_eq!(
            selected_kind("A | B, ~A"),
            Some(RuleKind::DisjunctiveSyllogism)
        );
    }

    #[test]
    fn shortcuts_can_be_disabled() {
        let config = TableauConfig {
            modus_ponens: false,
            disjunctive_syllogism: false,
            ..TableauConfig::default()
        };
        assert_eq!(
            select_rule(&root("A -> B, A"), &config).map(|rule| rule.kind()),
            Some(RuleKind::Implication)
        );
        assert_eq!(
            select_rule(&root("A | B, ~A"), &config).map(|rule| rule.kind()),
            Some(RuleKind::Disjunction)
        );
    }

    #[test]
    fn alpha_rules_follow_insertion_order() {
        assert_eq!(
            selected_kind("A | B, ~(C -> D), E <-> F"),
            Some(RuleKind::NegatedImplication)
        );
        assert_eq!(
            selected_kind("E <-> F, ~(C -> D)"),
            Some(RuleKind::Biconditional)
        );
        assert_eq!(selected_kind("~(A | B)"), Some(RuleKind::NegatedDisjunction));
        assert_eq!(selected_kind("~~A"), Some(RuleKind::DoubleNegation));
    }

    #[test]
    fn saturated_conjunction_is_skipped() {
        assert_eq!(selected_kind("A & B, A, B"), None);
        assert_eq!(selected_kind("A & B, A, B, C | D"), Some(RuleKind::Disjunction));
    }

    #[test]
    fn branching_rules() {
        match selected("~(A <-> B)") {
            Some(Rule::Branch(split)) => {
                assert_eq!(split.kind, RuleKind::NegatedBiconditional);
                assert_eq!(split.sides[0][..], [Formula::literal("A"), !Formula::literal("B")]);
                assert_eq!(split.sides[1][..], [!Formula::literal("A"), Formula::literal("B")]);
            }
            other => panic!("unexpected rule {:?}", other),
        }
        assert_eq!(selected_kind("~(A & B)"), Some(RuleKind::NegatedConjunction));
        assert_eq!(selected_kind("A -> B"), Some(RuleKind::Implication));
        assert!(RuleKind::Implication.is_branching());
        assert!(!RuleKind::ModusPonens.is_branching());
    }

    #[test]
    fn literals_are_saturated() {
        assert_eq!(selected_kind("A, ~B, C"), None);
        assert_eq!(selected_kind(""), None);
    }
}
