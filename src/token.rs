use crate::class::{is_left_bracket, is_name_char, is_right_bracket};
use std::fmt::{self, Display, Formatter};

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl Op {
    /// Get the operator matching `c`, if any.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// Get the character for this operator
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first. All operators are left associative.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 0,
            Self::Mul | Self::Div => 1,
        }
    }
}

/// The class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A number or a variable, possibly prefixed by a unary minus
    Operand,
    /// A binary operator
    Operator(Op),
    /// `(`, `[` or `{`
    LeftBracket,
    /// `)`, `]` or `}`
    RightBracket,
}

/// A classified piece of the input string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    text: String,
    kind: Kind,
}

/// A variable name read from an operand token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name<'a> {
    /// The name without its sign marker
    pub ident: &'a str,
    /// Whether the operand was written `-name`
    pub negated: bool,
}

impl Token {
    /// Create an operand token. `text` must not be empty.
    pub(crate) fn operand<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        debug_assert!(!text.is_empty(), "empty operand token");
        Self {
            text,
            kind: Kind::Operand,
        }
    }

    /// Create an operator token.
    pub(crate) fn operator(op: Op) -> Self {
        Self {
            text: op.as_char().to_string(),
            kind: Kind::Operator(op),
        }
    }

    /// Create a bracket token from the bracket character `c`, or `None` if
    /// `c` is not a bracket.
    pub(crate) fn bracket(c: char) -> Option<Self> {
        let kind = if is_left_bracket(c) {
            Kind::LeftBracket
        } else if is_right_bracket(c) {
            Kind::RightBracket
        } else {
            return None;
        };
        Some(Self {
            text: c.to_string(),
            kind,
        })
    }

    /// Get the text of this token, as written in the input
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the class of this token
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// If this token is an operand referring to a variable, get the variable
    /// name and its sign marker. Numeric literals give `None`.
    #[must_use]
    pub fn name(&self) -> Option<Name<'_>> {
        if self.kind != Kind::Operand || !self.text.ends_with(is_name_char) {
            return None;
        }
        match self.text.strip_prefix('-') {
            Some(ident) => Some(Name {
                ident,
                negated: true,
            }),
            None => Some(Name {
                ident: &self.text,
                negated: false,
            }),
        }
    }
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(&self.text)
    }
}
