use crate::brackets;
use crate::class::{classify, is_name_char, CharClass};
use crate::error::Error;
use crate::token::{Kind, Op, Token};
use log::trace;

#[must_use]
/// Check if `ident` is a valid variable name
///
/// # Examples
///
/// ```
/// # use polish::is_variable;
///
/// assert_eq!(is_variable("__abc"), true);
/// assert_eq!(is_variable("ab3"), false);
/// assert_eq!(is_variable(""), false);
/// ```
pub fn is_variable(ident: &str) -> bool {
    !ident.is_empty() && ident.chars().all(is_name_char)
}

/// States of the lexer. Each state knows which character classes may come
/// next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for an operand, a left bracket or a unary minus
    Start,
    /// A unary minus was just read
    Signed,
    /// Inside a variable name
    Name,
    /// Inside the integer part of a number
    Integer,
    /// Just read the decimal point of a number
    Point,
    /// Inside the fractional part of a number
    Fraction,
    /// After a right bracket, waiting for an operator or another right bracket
    Closed,
}

impl State {
    /// Human readable description of what the state accepts
    fn expected(self) -> &'static str {
        match self {
            Self::Start => "a number, a name, a left bracket or a unary minus",
            Self::Signed => "a number, a name or a left bracket",
            Self::Name => "a letter, an operator or a right bracket",
            Self::Integer => "a digit, a decimal point, an operator or a right bracket",
            Self::Point => "a digit",
            Self::Fraction => "a digit, an operator or a right bracket",
            Self::Closed => "an operator or a right bracket",
        }
    }

    /// Is the lexer in the middle of an operand?
    fn in_operand(self) -> bool {
        matches!(self, Self::Name | Self::Integer | Self::Fraction)
    }
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: &'a str,
    state: State,
    /// Byte offset where the pending operand starts, sign included
    start: usize,
    /// Number of left brackets read and not yet closed
    depth: usize,
    /// Depths of the negated groups which were wrapped in an extra pair of
    /// brackets, innermost last
    wrapped: Vec<usize>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            input,
            state: State::Start,
            start: 0,
            depth: 0,
            wrapped: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Split the input into tokens, in infix order. Brackets are checked
    /// first, and nothing is tokenized if they are unbalanced.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        if !brackets::validate(self.input) {
            return Err(Error::SyntaxError(format!(
                "unbalanced brackets in '{}'",
                self.input
            )));
        }
        for (position, c) in self.input.char_indices() {
            self.step(position, c)?;
        }
        self.finish()
    }

    fn step(&mut self, position: usize, c: char) -> Result<(), Error> {
        let next = match (self.state, classify(c)) {
            (State::Start, CharClass::Operator(Op::Minus)) => {
                self.start = position;
                State::Signed
            }
            (State::Start, CharClass::LeftBracket) => {
                self.open(c);
                State::Start
            }
            // -(...) is read as -1*(...), and as (-1*(...)) after an operator
            // so that it binds as a single operand
            (State::Signed, CharClass::LeftBracket) => {
                let after_operator =
                    matches!(self.tokens.last().map(Token::kind), Some(Kind::Operator(_)));
                if after_operator {
                    self.tokens.extend(Token::bracket('('));
                }
                self.tokens.push(Token::operand("-1"));
                self.tokens.push(Token::operator(Op::Mul));
                self.open(c);
                if after_operator {
                    self.wrapped.push(self.depth);
                }
                State::Start
            }
            (State::Start, CharClass::Digit) => {
                self.start = position;
                State::Integer
            }
            (State::Start, CharClass::Name) => {
                self.start = position;
                State::Name
            }
            (State::Signed, CharClass::Digit) | (State::Integer, CharClass::Digit) => {
                State::Integer
            }
            (State::Signed, CharClass::Name) | (State::Name, CharClass::Name) => State::Name,
            (State::Integer, CharClass::Point) => State::Point,
            (State::Point, CharClass::Digit) | (State::Fraction, CharClass::Digit) => {
                State::Fraction
            }
            (state, CharClass::Operator(op)) if state.in_operand() || state == State::Closed => {
                self.close_operand(position);
                self.tokens.push(Token::operator(op));
                State::Start
            }
            (state, CharClass::RightBracket) if state.in_operand() || state == State::Closed => {
                self.close_operand(position);
                self.close(c);
                State::Closed
            }
            (state, _) => {
                return Err(Error::SyntaxError(format!(
                    "unexpected character '{}' at position {}, expected {}",
                    c,
                    position,
                    state.expected()
                )));
            }
        };
        trace!("{:?} --{:?}--> {:?}", self.state, c, next);
        self.state = next;
        Ok(())
    }

    fn open(&mut self, c: char) {
        self.tokens.extend(Token::bracket(c));
        self.depth += 1;
    }

    /// Emit the right bracket `c`, and the bracket wrapping its group if any
    fn close(&mut self, c: char) {
        self.tokens.extend(Token::bracket(c));
        if self.wrapped.last() == Some(&self.depth) {
            self.wrapped.pop();
            self.tokens.extend(Token::bracket(')'));
        }
        self.depth -= 1;
    }

    /// Emit the pending operand ending at byte offset `end`, if any
    fn close_operand(&mut self, end: usize) {
        if self.state.in_operand() {
            self.tokens
                .push(Token::operand(&self.input[self.start..end]));
        }
    }

    fn finish(mut self) -> Result<Vec<Token>, Error> {
        if self.input.is_empty() {
            return Err(Error::SyntaxError("empty expression".into()));
        }
        if !self.state.in_operand() && self.state != State::Closed {
            return Err(Error::SyntaxError(format!(
                "unexpected end of input, expected {}",
                self.state.expected()
            )));
        }
        self.close_operand(self.input.len());
        Ok(self.tokens)
    }
}
