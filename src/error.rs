use thiserror::Error;

/// Error type for the polish crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed input: unbalanced brackets, illegal character or truncated
    /// token
    #[error("SyntaxError: {0}")]
    SyntaxError(String),
    /// Invalid binding supplied by the caller, such as overwriting a constant
    #[error("ConfigurationError: {0}")]
    ConfigurationError(String),
    /// Unknown variable during evaluation
    #[error("NameError: {0}")]
    NameError(String),
    /// Division by zero
    #[error("ArithmeticError: {0}")]
    ArithmeticError(String),
}

/// The kind of an [`Error`](enum.Error.html), without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::SyntaxError`](enum.Error.html#variant.SyntaxError)
    Syntax,
    /// See [`Error::ConfigurationError`](enum.Error.html#variant.ConfigurationError)
    Configuration,
    /// See [`Error::NameError`](enum.Error.html#variant.NameError)
    Name,
    /// See [`Error::ArithmeticError`](enum.Error.html#variant.ArithmeticError)
    Arithmetic,
}

impl Error {
    /// Get the kind of this error, so callers can branch on it.
    ///
    /// ```
    /// # use polish::{Expr, ErrorKind};
    /// let error = Expr::parse("1/0").unwrap().eval().unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::Arithmetic);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::SyntaxError(_) => ErrorKind::Syntax,
            Self::ConfigurationError(_) => ErrorKind::Configuration,
            Self::NameError(_) => ErrorKind::Name,
            Self::ArithmeticError(_) => ErrorKind::Arithmetic,
        }
    }

    /// Get the message of this error, without the kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match *self {
            Self::SyntaxError(ref message)
            | Self::ConfigurationError(ref message)
            | Self::NameError(ref message)
            | Self::ArithmeticError(ref message) => message,
        }
    }
}
