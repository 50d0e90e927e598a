//! Propositional formulas.
use std::{fmt, ops, rc::Rc};

/// A binary or unary propositional connective.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Connective {
    Negation,
    Conjunction,
    Disjunction,
    Implication,
    Biconditional,
}

impl Connective {
    /// The ASCII symbol used when rendering and parsing formulas.
    pub fn symbol(self) -> &'static str {
        match self {
            Connective::Negation => "~",
            Connective::Conjunction => "&",
            Connective::Disjunction => "|",
            Connective::Implication => "->",
            Connective::Biconditional => "<->",
        }
    }

    /// Whether the connective takes two operands.
    pub fn is_binary(self) -> bool {
        self != Connective::Negation
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A propositional formula.
///
/// Formulas are immutable trees. Subformulas are reference counted, so cloning a formula or
/// building a larger formula from existing parts never copies the parts.
///
/// Equality and hashing are structural: two formulas are equal iff they are the same variant with
/// equal children in the same order. In particular `A & B` and `B & A` are different formulas and
/// a double negation `~~A` is never identified with `A`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Formula {
    /// An atomic proposition.
    Literal(Rc<str>),
    Negation(Rc<Formula>),
    Conjunction(Rc<Formula>, Rc<Formula>),
    Disjunction(Rc<Formula>, Rc<Formula>),
    Implication(Rc<Formula>, Rc<Formula>),
    Biconditional(Rc<Formula>, Rc<Formula>),
}

impl Formula {
    /// Creates an atomic proposition.
    pub fn literal(name: impl Into<Rc<str>>) -> Formula {
        Formula::Literal(name.into())
    }

    /// Creates the negation of a formula.
    ///
    /// This never simplifies, the negation of `~A` is `~~A`.
    pub fn negation(operand: Formula) -> Formula {
        Formula::Negation(Rc::new(operand))
    }

    pub fn conjunction(left: Formula, right: Formula) -> Formula {
        Formula::Conjunction(Rc::new(left), Rc::new(right))
    }

    pub fn disjunction(left: Formula, right: Formula) -> Formula {
        Formula::Disjunction(Rc::new(left), Rc::new(right))
    }

    pub fn implication(left: Formula, right: Formula) -> Formula {
        Formula::Implication(Rc::new(left), Rc::new(right))
    }

    pub fn biconditional(left: Formula, right: Formula) -> Formula {
        Formula::Biconditional(Rc::new(left), Rc::new(right))
    }

    /// Combines two formulas using a binary connective.
    ///
    /// Panics when called with `Connective::Negation`.
    pub fn binary(connective: Connective, left: Formula, right: Formula) -> Formula {
        match connective {
            Connective::Conjunction => Formula::conjunction(left, right),
            Connective::Disjunction => Formula::disjunction(left, right),
            Connective::Implication => Formula::implication(left, right),
            Connective::Biconditional => Formula::biconditional(left, right),
            Connective::Negation => panic!("negation is not a binary connective"),
        }
    }

    /// The negation of this formula, leaving `self` untouched.
    pub fn negate(&self) -> Formula {
        Formula::negation(self.clone())
    }

    /// The top-level connective or `None` for literals.
    pub fn connective(&self) -> Option<Connective> {
        match self {
            Formula::Literal(_) => None,
            Formula::Negation(_) => Some(Connective::Negation),
            Formula::Conjunction(..) => Some(Connective::Conjunction),
            Formula::Disjunction(..) => Some(Connective::Disjunction),
            Formula::Implication(..) => Some(Connective::Implication),
            Formula::Biconditional(..) => Some(Connective::Biconditional),
        }
    }

    /// Whether this is an atomic proposition.
    pub fn is_literal(&self) -> bool {
        matches!(self, Formula::Literal(_))
    }

    /// Whether this is an atomic proposition or the negation of one.
    pub fn is_signed_literal(&self) -> bool {
        match self {
            Formula::Literal(_) => true,
            Formula::Negation(operand) => operand.is_literal(),
            _ => false,
        }
    }

    /// Name and polarity of a possibly negated atomic proposition.
    ///
    /// Returns `None` for all other formulas.
    pub fn as_signed_literal(&self) -> Option<(&str, bool)> {
        match self {
            Formula::Literal(name) => Some((&**name, true)),
            Formula::Negation(operand) => match &**operand {
                Formula::Literal(name) => Some((&**name, false)),
                _ => None,
            },
            _ => None,
        }
    }

    /// The operand of a negation.
    pub fn negated(&self) -> Option<&Formula> {
        match self {
            Formula::Negation(operand) => Some(&**operand),
            _ => None,
        }
    }

    /// Number of connectives in the formula.
    pub fn size(&self) -> usize {
        match self {
            Formula::Literal(_) => 0,
            Formula::Negation(operand) => 1 + operand.size(),
            Formula::Conjunction(left, right)
            | Formula::Disjunction(left, right)
            | Formula::Implication(left, right)
            | Formula::Biconditional(left, right) => 1 + left.size() + right.size(),
        }
    }

    /// Calls `action` for each atomic proposition in left-to-right order.
    ///
    /// Atoms that occur multiple times are visited multiple times.
    pub fn for_each_atom<'a>(&'a self, action: &mut impl FnMut(&'a str)) {
        match self {
            Formula::Literal(name) => action(&**name),
            Formula::Negation(operand) => operand.for_each_atom(action),
            Formula::Conjunction(left, right)
            | Formula::Disjunction(left, right)
            | Formula::Implication(left, right)
            | Formula::Biconditional(left, right) => {
                left.for_each_atom(action);
                right.for_each_atom(action);
            }
        }
    }

    /// Truth value of the formula under a valuation of the atomic propositions.
    pub fn evaluate(&self, valuation: &mut impl FnMut(&str) -> bool) -> bool {
        match self {
            Formula::Literal(name) => valuation(&**name),
            Formula::Negation(operand) => !operand.evaluate(valuation),
            Formula::Conjunction(left, right) => {
                left.evaluate(valuation) && right.evaluate(valuation)
            }
            Formula::Disjunction(left, right) => {
                left.evaluate(valuation) || right.evaluate(valuation)
            }
            Formula::Implication(left, right) => {
                !left.evaluate(valuation) || right.evaluate(valuation)
            }
            Formula::Biconditional(left, right) => {
                left.evaluate(valuation) == right.evaluate(valuation)
            }
        }
    }
}

impl ops::Not for Formula {
    type Output = Formula;

    #[inline]
    fn not(self) -> Formula {
        Formula::negation(self)
    }
}

impl<'a> ops::Not for &'a Formula {
    type Output = Formula;

    #[inline]
    fn not(self) -> Formula {
        self.negate()
    }
}

/// Canonical infix notation.
///
/// Binary connectives are always parenthesized, so the output parses back to the same formula.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Formula::Literal(name) => f.write_str(name),
            Formula::Negation(operand) => write!(f, "~{}", operand),
            Formula::Conjunction(left, right) => {
                write!(f, "({} {} {})", left, Connective::Conjunction, right)
            }
            Formula::Disjunction(left, right) => {
                write!(f, "({} {} {})", left, Connective::Disjunction, right)
            }
            Formula::Implication(left, right) => {
                write!(f, "({} {} {})", left, Connective::Implication, right)
            }
            Formula::Biconditional(left, right) => {
                write!(f, "({} {} {})", left, Connective::Biconditional, right)
            }
        }
    }
}

/// Uses the canonical infix notation.
impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{prelude::*, *};

    /// Atomic propositions named `A`, `B`, ... using the first `atoms` letters.
    pub fn literal(atoms: usize) -> impl Strategy<Value = Formula> {
        assert!(atoms > 0 && atoms <= 26);
        (0..atoms).prop_map(|index| {
            let name = ((b'A' + index as u8) as char).to_string();
            Formula::literal(name)
        })
    }

    /// Formulas over the first `atoms` letters with at most `depth` nested connectives.
    pub fn formula(atoms: usize, depth: u32) -> impl Strategy<Value = Formula> {
        literal(atoms).prop_recursive(depth, 1 << depth, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(Formula::negation),
                (inner.clone(), inner.clone())
                    .prop_map(|(left, right)| Formula::conjunction(left, right)),
                (inner.clone(), inner.clone())
                    .prop_map(|(left, right)| Formula::disjunction(left, right)),
                (inner.clone(), inner.clone())
                    .prop_map(|(left, right)| Formula::implication(left, right)),
                (inner.clone(), inner).prop_map(|(left, right)| Formula::biconditional(left, right)),
            ]
        })
    }

    /// Lists of formulas as used for the initial set of a tableau.
    pub fn formula_list(
        atoms: usize,
        depth: u32,
        len: impl Into<collection::SizeRange>,
    ) -> impl Strategy<Value = Vec<Formula>> {
        collection::vec(formula(atoms, depth), len)
    }
}

#[cfg(test)]
mod tests {
    use super::{strategy::*, *};

    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use proptest::*;

    fn hash_of(formula: &Formula) -> u64 {
        let mut hasher = DefaultHasher::new();
        formula.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn rendering() {
        let a = Formula::literal("A");
        let b = Formula::literal("B");

        assert_eq!(a.to_string(), "A");
        assert_eq!((!a.clone()).to_string(), "~A");
        assert_eq!(
            Formula::conjunction(a.clone(), b.clone()).to_string(),
            "(A & B)"
        );
        assert_eq!(
            Formula::disjunction(a.clone(), !b.clone()).to_string(),
            "(A | ~B)"
        );
        assert_eq!(
            Formula::implication(a.clone(), b.clone()).to_string(),
            "(A -> B)"
        );
        assert_eq!(
            (!Formula::biconditional(a, b)).to_string(),
            "~(A <-> B)"
        );
    }

    #[test]
    fn operand_order_matters() {
        let a = Formula::literal("A");
        let b = Formula::literal("B");

        assert_ne!(
            Formula::conjunction(a.clone(), b.clone()),
            Formula::conjunction(b, a)
        );
    }

    #[test]
    fn double_negation_is_kept() {
        let a = Formula::literal("A");
        let double = !!a.clone();

        assert_ne!(double, a);
        assert_eq!(double.negated().and_then(Formula::negated), Some(&a));
        assert_eq!(double.to_string(), "~~A");
        assert!(!double.is_signed_literal());
    }

    #[test]
    fn signed_literals() {
        let a = Formula::literal("A");

        assert_eq!(a.as_signed_literal(), Some(("A", true)));
        assert_eq!((!&a).as_signed_literal(), Some(("A", false)));
        assert_eq!(
            Formula::conjunction(a.clone(), a).as_signed_literal(),
            None
        );
    }

    #[test]
    fn evaluation() {
        let a = Formula::literal("A");
        let b = Formula::literal("B");
        let formula = Formula::biconditional(
            Formula::implication(a.clone(), b.clone()),
            Formula::disjunction(!a, b),
        );

        for &(value_a, value_b) in [(false, false), (false, true), (true, false), (true, true)].iter()
        {
            let mut valuation = |name: &str| if name == "A" { value_a } else { value_b };
            assert!(formula.evaluate(&mut valuation));
        }
    }

    proptest! {
        #[test]
        fn structurally_equal_formulas_hash_equal(formula in formula(4, 4)) {
            let rebuilt = rebuild(&formula);
            prop_assert_eq!(&rebuilt, &formula);
            prop_assert_eq!(hash_of(&rebuilt), hash_of(&formula));
        }

        #[test]
        fn size_counts_connectives(formula in formula(3, 4)) {
            let rendered = formula.to_string();
            let symbols = rendered.matches(|c: char| "~&|".contains(c)).count()
                + rendered.matches("->").count();
            prop_assert_eq!(formula.size(), symbols);
        }
    }

    /// Deep copy that shares no allocation with the input.
    fn rebuild(formula: &Formula) -> Formula {
        match formula {
            Formula::Literal(name) => Formula::literal(name.to_string()),
            Formula::Negation(operand) => Formula::negation(rebuild(operand)),
            Formula::Conjunction(left, right) => Formula::conjunction(rebuild(left), rebuild(right)),
            Formula::Disjunction(left, right) => Formula::disjunction(rebuild(left), rebuild(right)),
            Formula::Implication(left, right) => Formula::implication(rebuild(left), rebuild(right)),
            Formula::Biconditional(left, right) => {
                Formula::biconditional(rebuild(left), rebuild(right))
            }
        }
    }
}
