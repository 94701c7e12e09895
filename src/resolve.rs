use crate::error::Error;
use std::io::{self, BufRead, Write};

/// Provider of values for variables which are not bound when an expression is
/// evaluated.
///
/// Any closure `FnMut(&str) -> Option<f64>` is a resolver, returning `None`
/// when it has no value for a name.
///
/// ```
/// # use polish::Expr;
/// let mut expr = Expr::parse("2*x").unwrap();
/// assert_eq!(expr.eval_with(&mut |_: &str| Some(21.0)), Ok(42.0));
/// ```
pub trait Resolver {
    /// Get the value of the variable `name`
    fn resolve(&mut self, name: &str) -> Result<f64, Error>;
}

impl<F> Resolver for F
where
    F: FnMut(&str) -> Option<f64>,
{
    fn resolve(&mut self, name: &str) -> Result<f64, Error> {
        self(name).ok_or_else(|| Error::NameError(format!("name '{}' is not defined", name)))
    }
}

/// Interactive resolver, asking for the value of each variable.
///
/// The prompt `name = ` is written to `output`, and one line is read from
/// `input`. Lines which are not a number are asked again.
///
/// ```
/// # use polish::{Expr, Prompt};
/// let mut output = Vec::new();
/// let mut prompt = Prompt::new(&b"oops\n4\n"[..], &mut output);
/// let mut expr = Expr::parse("x/2").unwrap();
/// assert_eq!(expr.eval_with(&mut prompt), Ok(2.0));
/// drop(prompt);
/// assert_eq!(output, b"x = x = ");
/// ```
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Create a prompt reading from `input` and writing to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, name: &str) -> io::Result<Option<f64>> {
        let mut line = String::new();
        loop {
            write!(self.output, "{} = ", name)?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if let Ok(value) = line.trim().parse() {
                return Ok(Some(value));
            }
        }
    }
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    /// Create a prompt on the standard input and output
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Resolver for Prompt<R, W> {
    fn resolve(&mut self, name: &str) -> Result<f64, Error> {
        match self.ask(name) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(Error::NameError(format!(
                "no value given for name '{}'",
                name
            ))),
            Err(err) => Err(Error::NameError(format!(
                "could not read a value for name '{}': {}",
                name, err
            ))),
        }
    }
}
