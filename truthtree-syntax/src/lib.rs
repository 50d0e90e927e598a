//! Infix formula parser and writer for the truthtree tableau prover.
//!
//! The accepted syntax uses the operators `~` (not), `&` (and), `|` (or), `->` (implies) and
//! `<->` (if and only if), listed from highest to lowest precedence. Negation, implication and
//! biconditional are right-associative, conjunction and disjunction are left-associative. Atomic
//! propositions match `[A-Za-z][A-Za-z0-9_]*`. The Unicode symbols `∧ ∨ → ↔` can be used instead
//! of `& | -> <->`. Multiple formulas are separated by commas.
use std::{borrow::Borrow, io, iter::Peekable, str::Chars};

use truthtree_formula::{Connective, Formula};

use thiserror::Error;

/// Possible errors while parsing formulas.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error(
        "column {}: Unexpected character in formula input: '{}'",
        column,
        unexpected
    )]
    UnexpectedInput { column: usize, unexpected: char },
    #[error("column {}: Expected a formula but found {}", column, found)]
    MissingOperand { column: usize, found: String },
    #[error("column {}: Expected an operator but found {}", column, found)]
    MissingOperator { column: usize, found: String },
    #[error("column {}: Unbalanced parenthesis", column)]
    UnbalancedParenthesis { column: usize },
    #[error("Input contains no formula")]
    EmptyInput,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum TokenKind {
    Atom(String),
    Operator(Connective),
    Open,
    Close,
    Comma,
    End,
}

impl TokenKind {
    /// Human readable token description used in error messages.
    fn describe(&self) -> String {
        match self {
            TokenKind::Atom(name) => format!("'{}'", name),
            TokenKind::Operator(connective) => format!("'{}'", connective),
            TokenKind::Open => "'('".to_owned(),
            TokenKind::Close => "')'".to_owned(),
            TokenKind::Comma => "','".to_owned(),
            TokenKind::End => "end of input".to_owned(),
        }
    }
}

struct Token {
    kind: TokenKind,
    column: usize,
}

/// Entries of the operator stack.
#[derive(Copy, Clone)]
enum Pending {
    Operator { connective: Connective, column: usize },
    Open { column: usize },
}

fn precedence(connective: Connective) -> u8 {
    match connective {
        Connective::Negation => 5,
        Connective::Conjunction => 4,
        Connective::Disjunction => 3,
        Connective::Implication => 2,
        Connective::Biconditional => 1,
    }
}

fn is_right_associative(connective: Connective) -> bool {
    match connective {
        Connective::Negation | Connective::Implication | Connective::Biconditional => true,
        Connective::Conjunction | Connective::Disjunction => false,
    }
}

/// Parser for comma separated lists of formulas.
///
/// Formulas are produced one at a time using [`next_formula`](FormulaParser::next_formula).
/// Parsing uses operator precedence (shunting-yard) with an explicit check that operands and
/// operators alternate, so malformed input is reported instead of producing a partial formula.
pub struct FormulaParser<'a> {
    chars: Peekable<Chars<'a>>,
    column: usize,
    separator_column: Option<usize>,
}

impl<'a> FormulaParser<'a> {
    /// Create a parser for the given input.
    pub fn new(input: &'a str) -> FormulaParser<'a> {
        FormulaParser {
            chars: input.chars().peekable(),
            column: 0,
            separator_column: None,
        }
    }

    /// Parse a single formula.
    ///
    /// Fails for empty input and for input containing more than one formula.
    pub fn parse(input: &str) -> Result<Formula, ParserError> {
        let mut parser = FormulaParser::new(input);
        let formula = parser.next_formula()?.ok_or(ParserError::EmptyInput)?;
        if let Some(column) = parser.separator_column {
            return Err(ParserError::UnexpectedInput {
                column,
                unexpected: ',',
            });
        }
        Ok(formula)
    }

    /// Parse a comma separated list of formulas.
    ///
    /// Empty list entries are skipped, so an empty input produces an empty list.
    pub fn parse_list(input: &str) -> Result<Vec<Formula>, ParserError> {
        let mut parser = FormulaParser::new(input);
        let mut formulas = vec![];
        while let Some(formula) = parser.next_formula()? {
            formulas.push(formula);
        }
        Ok(formulas)
    }

    /// Parse the next formula of the list.
    ///
    /// Returns `None` when the input is exhausted. If this method returns an error, the parser
    /// is in an unspecified state and should not be used further.
    pub fn next_formula(&mut self) -> Result<Option<Formula>, ParserError> {
        let mut operands: Vec<Formula> = vec![];
        let mut operators: Vec<Pending> = vec![];
        let mut expect_operand = true;
        let mut empty = true;

        loop {
            let token = self.next_token()?;
            let column = token.column;

            if expect_operand {
                match token.kind {
                    TokenKind::Atom(name) => {
                        operands.push(Formula::literal(name));
                        expect_operand = false;
                    }
                    TokenKind::Operator(Connective::Negation) => {
                        operators.push(Pending::Operator {
                            connective: Connective::Negation,
                            column,
                        });
                    }
                    TokenKind::Open => operators.push(Pending::Open { column }),
                    TokenKind::Comma if empty => continue,
                    TokenKind::End if empty => return Ok(None),
                    kind => {
                        return Err(ParserError::MissingOperand {
                            column,
                            found: kind.describe(),
                        })
                    }
                }
                empty = false;
            } else {
                match token.kind {
                    TokenKind::Operator(connective) if connective.is_binary() => {
                        while let Some(&Pending::Operator {
                            connective: top, ..
                        }) = operators.last()
                        {
                            let binds_tighter = precedence(top) > precedence(connective)
                                || (precedence(top) == precedence(connective)
                                    && !is_right_associative(connective));
                            if !binds_tighter {
                                break;
                            }
                            operators.pop();
                            apply(&mut operands, top, column)?;
                        }
                        operators.push(Pending::Operator { connective, column });
                        expect_operand = true;
                    }
                    TokenKind::Close => loop {
                        match operators.pop() {
                            None => return Err(ParserError::UnbalancedParenthesis { column }),
                            Some(Pending::Open { .. }) => break,
                            Some(Pending::Operator { connective, column }) => {
                                apply(&mut operands, connective, column)?
                            }
                        }
                    },
                    TokenKind::Comma | TokenKind::End => {
                        while let Some(pending) = operators.pop() {
                            match pending {
                                Pending::Open { column } => {
                                    return Err(ParserError::UnbalancedParenthesis { column })
                                }
                                Pending::Operator { connective, column } => {
                                    apply(&mut operands, connective, column)?
                                }
                            }
                        }
                        debug_assert_eq!(operands.len(), 1);
                        return Ok(operands.pop());
                    }
                    kind => {
                        return Err(ParserError::MissingOperator {
                            column,
                            found: kind.describe(),
                        })
                    }
                }
            }
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let next = self.chars.next();
        if next.is_some() {
            self.column += 1;
        }
        next
    }

    fn next_token(&mut self) -> Result<Token, ParserError> {
        while let Some(&c) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.next_char();
        }

        let c = match self.next_char() {
            Some(c) => c,
            None => {
                return Ok(Token {
                    kind: TokenKind::End,
                    column: self.column + 1,
                });
            }
        };

        let column = self.column;

        let kind = match c {
            '~' => TokenKind::Operator(Connective::Negation),
            '&' | '∧' => TokenKind::Operator(Connective::Conjunction),
            '|' | '∨' => TokenKind::Operator(Connective::Disjunction),
            '→' => TokenKind::Operator(Connective::Implication),
            '↔' => TokenKind::Operator(Connective::Biconditional),
            '-' => {
                self.expect_char('>', c, column)?;
                TokenKind::Operator(Connective::Implication)
            }
            '<' => {
                self.expect_char('-', c, column)?;
                self.expect_char('>', c, column)?;
                TokenKind::Operator(Connective::Biconditional)
            }
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            ',' => {
                self.separator_column = self.separator_column.or(Some(column));
                TokenKind::Comma
            }
            c if c.is_ascii_alphabetic() => {
                let mut name = c.to_string();
                while let Some(&c) = self.chars.peek() {
                    if !(c.is_ascii_alphanumeric() || c == '_') {
                        break;
                    }
                    name.push(c);
                    self.next_char();
                }
                TokenKind::Atom(name)
            }
            unexpected => return Err(ParserError::UnexpectedInput { column, unexpected }),
        };

        Ok(Token { kind, column })
    }

    /// Consumes the remaining characters of a multi-character operator.
    ///
    /// Errors point at the first character of the operator.
    fn expect_char(
        &mut self,
        expected: char,
        first: char,
        column: usize,
    ) -> Result<(), ParserError> {
        if self.chars.peek() == Some(&expected) {
            self.next_char();
            Ok(())
        } else {
            Err(ParserError::UnexpectedInput {
                column,
                unexpected: first,
            })
        }
    }

}

/// Replaces the topmost operands with the given connective applied to them.
fn apply(
    operands: &mut Vec<Formula>,
    connective: Connective,
    column: usize,
) -> Result<(), ParserError> {
    let missing = || ParserError::MissingOperand {
        column,
        found: format!("'{}' without operand", connective),
    };
    let formula = if connective.is_binary() {
        let right = operands.pop().ok_or_else(missing)?;
        let left = operands.pop().ok_or_else(missing)?;
        Formula::binary(connective, left, right)
    } else {
        Formula::negation(operands.pop().ok_or_else(missing)?)
    };
    operands.push(formula);
    Ok(())
}

/// Parse a single formula.
///
/// Shortcut for [`FormulaParser::parse`].
pub fn parse_formula(input: &str) -> Result<Formula, ParserError> {
    FormulaParser::parse(input)
}

/// Parse a comma separated list of formulas.
///
/// Shortcut for [`FormulaParser::parse_list`].
pub fn parse_formula_list(input: &str) -> Result<Vec<Formula>, ParserError> {
    FormulaParser::parse_list(input)
}

/// Write formulas as a comma separated list.
///
/// The output can be read back using [`parse_formula_list`].
pub fn write_formula_list(
    target: &mut impl io::Write,
    formulas: impl IntoIterator<Item = impl Borrow<Formula>>,
) -> io::Result<()> {
    for (index, formula) in formulas.into_iter().enumerate() {
        if index > 0 {
            target.write_all(b", ")?;
        }
        write!(target, "{}", formula.borrow())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Error;
    use proptest::{test_runner::TestCaseError, *};

    use truthtree_formula::{atom, formula::strategy::*};

    #[test]
    fn precedence_and_associativity() -> Result<(), Error> {
        let a = atom!(A);
        let b = atom!(B);
        let c = atom!(C);

        assert_eq!(
            parse_formula("~A & B | C")?,
            Formula::disjunction(Formula::conjunction(!a.clone(), b.clone()), c.clone())
        );
        assert_eq!(
            parse_formula("A -> B -> C")?,
            Formula::implication(a.clone(), Formula::implication(b.clone(), c.clone()))
        );
        assert_eq!(
            parse_formula("A & B & C")?,
            Formula::conjunction(Formula::conjunction(a.clone(), b.clone()), c.clone())
        );
        assert_eq!(
            parse_formula("A <-> B -> C")?,
            Formula::biconditional(a.clone(), Formula::implication(b.clone(), c.clone()))
        );
        assert_eq!(parse_formula("~~A")?, !!a.clone());
        assert_eq!(
            parse_formula("~(A | B)")?,
            !Formula::disjunction(a.clone(), b.clone())
        );
        assert_eq!(
            parse_formula("(A -> B) -> C")?,
            Formula::implication(Formula::implication(a, b), c)
        );

        Ok(())
    }

    #[test]
    fn unicode_operators() -> Result<(), Error> {
        assert_eq!(
            parse_formula("A ∧ B ∨ C → D ↔ E")?,
            parse_formula("A & B | C -> D <-> E")?
        );
        Ok(())
    }

    #[test]
    fn atom_names() -> Result<(), Error> {
        assert_eq!(parse_formula("  rain_2  ")?, Formula::literal("rain_2"));
        assert_eq!(
            parse_formula("p1&q")?,
            Formula::conjunction(Formula::literal("p1"), Formula::literal("q"))
        );
        Ok(())
    }

    #[test]
    fn lists() -> Result<(), Error> {
        let formulas = parse_formula_list("A -> (B | C), A, ~B,, C -> D, ~D,")?;
        let rendered: Vec<String> = formulas.iter().map(|f| f.to_string()).collect();

        assert_eq!(
            rendered,
            vec!["(A -> (B | C))", "A", "~B", "(C -> D)", "~D"]
        );

        assert!(parse_formula_list("")?.is_empty());
        assert!(parse_formula_list(" , ")?.is_empty());

        Ok(())
    }

    #[test]
    fn writer() -> Result<(), Error> {
        let formulas = parse_formula_list("A & B, ~C")?;
        let mut buf = vec![];
        write_formula_list(&mut buf, &formulas)?;
        assert_eq!(String::from_utf8(buf)?, "(A & B), ~C");
        Ok(())
    }

    macro_rules! expect_error {
        ( $input:expr, $( $cases:tt )* ) => {
            match parse_formula($input) {
                Ok(parsed) => panic!("Expected error but got {:?}", parsed),
                Err(err) => match err {
                    $( $cases )*,
                    _ => panic!("Unexpected error {:?}", err),
                }
            }
        };
    }

    #[test]
    fn unexpected_input() {
        expect_error!("A & ?", ParserError::UnexpectedInput { column: 5, unexpected: '?' } => ());
        expect_error!("A - B", ParserError::UnexpectedInput { column: 3, unexpected: '-' } => ());
        expect_error!("A <- B", ParserError::UnexpectedInput { column: 3, unexpected: '<' } => ());
        expect_error!("1A", ParserError::UnexpectedInput { column: 1, unexpected: '1' } => ());
        expect_error!("A, B", ParserError::UnexpectedInput { column: 2, unexpected: ',' } => ());
    }

    #[test]
    fn unbalanced_parentheses() {
        expect_error!("(A & B", ParserError::UnbalancedParenthesis { column: 1 } => ());
        expect_error!("A & B)", ParserError::UnbalancedParenthesis { column: 6 } => ());
        expect_error!("((A) | B", ParserError::UnbalancedParenthesis { column: 1 } => ());
    }

    #[test]
    fn missing_operands_and_operators() {
        expect_error!("A &", ParserError::MissingOperand { column: 4, .. } => ());
        expect_error!("& A", ParserError::MissingOperand { column: 1, .. } => ());
        expect_error!("~", ParserError::MissingOperand { column: 2, .. } => ());
        expect_error!("()", ParserError::MissingOperand { column: 2, .. } => ());
        expect_error!("A B", ParserError::MissingOperator { column: 3, .. } => ());
        expect_error!("A ~B", ParserError::MissingOperator { column: 3, .. } => ());
        expect_error!("(A) (B)", ParserError::MissingOperator { column: 5, .. } => ());
        expect_error!("", ParserError::EmptyInput => ());
        expect_error!("   ", ParserError::EmptyInput => ());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            parse_formula("A &").unwrap_err().to_string(),
            "column 4: Expected a formula but found end of input"
        );
        assert_eq!(
            parse_formula("A B").unwrap_err().to_string(),
            "column 3: Expected an operator but found 'B'"
        );
    }

    proptest! {
        #[test]
        fn roundtrip(formula in formula(5, 5)) {
            let rendered = formula.to_string();
            let parsed = parse_formula(&rendered).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(parsed, formula);
        }

        #[test]
        fn roundtrip_list(formulas in formula_list(4, 3, 0..6)) {
            let mut buf = vec![];
            write_formula_list(&mut buf, &formulas)?;
            let input = String::from_utf8(buf).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let parsed = parse_formula_list(&input).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(parsed, formulas);
        }
    }
}
