use crate::token::Op;

/// The class of a single input character, as seen by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `0` to `9`
    Digit,
    /// The decimal point `.`
    Point,
    /// One of `+ - * /`. A `-` is a unary minus or a subtraction depending on
    /// the lexer state.
    Operator(Op),
    /// `(`, `[` or `{`
    LeftBracket,
    /// `)`, `]` or `}`
    RightBracket,
    /// ASCII letters and `_`
    Name,
    /// Anything else, whitespace included
    Other,
}

/// Classify the character `c`
pub fn classify(c: char) -> CharClass {
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if c == '.' {
        CharClass::Point
    } else if let Some(op) = Op::from_char(c) {
        CharClass::Operator(op)
    } else if is_left_bracket(c) {
        CharClass::LeftBracket
    } else if is_right_bracket(c) {
        CharClass::RightBracket
    } else if is_name_char(c) {
        CharClass::Name
    } else {
        CharClass::Other
    }
}

/// Check if `c` can appear in a variable name
pub fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

pub fn is_left_bracket(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

pub fn is_right_bracket(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Get the right bracket closing the left bracket `c`
pub fn closing(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}
