#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::module_name_repetitions
)]

//! Polish, a crate for evaluating arithmetic expressions through reverse
//! polish notation.
//!
//! The easiest way to use this crate is with the [`eval`](fn.eval.html)
//! function, which takes the expression and the values of its variables:
//!
//! ```
//! assert_eq!(polish::eval("3+5*2", Vec::<(&str, f64)>::new()), Ok(13.0));
//! assert_eq!(polish::eval("2*a", vec![("a", 3.5)]), Ok(7.0));
//! ```
//!
//! It is also possible to separate the parsing from the evaluation of an
//! expression with the [`Expr`](struct.Expr.html) type, which also gives
//! access to the postfix form of the expression. Variables which are still
//! missing when evaluating can be asked to a [`Resolver`](trait.Resolver.html),
//! such as a closure or the interactive [`Prompt`](struct.Prompt.html).
//!
//! ```
//! use polish::Expr;
//!
//! let mut expr = Expr::with_bindings("3/c+b", vec![("c", 1.0)]).unwrap();
//! assert_eq!(expr.postfix(), "3c/b+");
//! assert_eq!(expr.unresolved(), vec!["b"]);
//! assert_eq!(expr.eval_with(&mut |_: &str| Some(5.0)), Ok(8.0));
//! ```
//!
//! # Language definition
//!
//! The language contains the following elements, without any whitespace:
//!
//! - number literals: `12`, `0.045`. Both sides of the decimal point are
//!   required;
//! - mathematical operators: `+`, `-`, `*` and `/`, with the usual
//!   precedence. All of them are left associative;
//! - brackets: `(...)`, `[...]` and `{...}`, properly nested;
//! - variables, made of ASCII letters and `_`. `pi` and `e` are constants,
//!   and can not be bound;
//! - unary minus, in front of a number, a variable or a bracket, at the start
//!   of the expression or of a bracket, or after an operator: `-2*(-a)`,
//!   `1-(-(b))`, `2*-3`.
//!
//! Any other symbol is forbidden in the input. Dividing by zero is an error
//! instead of giving an infinity.
//!
//! # Technical details
//!
//! The input is split into tokens by a finite state machine, after checking
//! that the brackets are balanced. The tokens are then reordered with the
//! Shunting-Yard algorithm, and the result is computed by a stack machine.

#[macro_use]
extern crate lazy_static;

mod brackets;
mod class;
mod error;
mod eval;
mod expr;
mod lexer;
mod postfix;
mod resolve;
mod token;
mod variables;

pub use brackets::validate as validate_brackets;
pub use error::{Error, ErrorKind};
pub use expr::{eval, Expr};
pub use lexer::is_variable;
pub use resolve::{Prompt, Resolver};
pub use token::{Kind, Name, Op, Token};
pub use variables::{Variables, CONSTANTS};
