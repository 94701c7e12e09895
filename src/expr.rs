use crate::error::Error;
use crate::eval::evaluate;
use crate::lexer::Lexer;
use crate::postfix::{render, to_postfix};
use crate::resolve::Resolver;
use crate::token::Token;
use crate::variables::Variables;
use log::debug;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Evaluate a single expression from `input`, with the given variable
/// `bindings`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use polish::eval;
/// assert_eq!(eval("45-2*3", Vec::<(&str, f64)>::new()), Ok(39.0));
/// assert_eq!(eval("3*a", vec![("a", -5.0)]), Ok(-15.0));
/// ```
pub fn eval<I, S>(input: &str, bindings: I) -> Result<f64, Error>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    Expr::with_bindings(input, bindings).and_then(|expr| expr.eval())
}

/// A parsed mathematical expression, with its variables.
///
/// The expression is checked and converted to reverse polish notation once,
/// when it is created. Variables missing at evaluation time can be asked to a
/// [`Resolver`](trait.Resolver.html); each name is only asked once.
///
/// # Examples
/// ```
/// # use polish::Expr;
/// let expr = Expr::parse("3+5*2").unwrap();
/// assert_eq!(expr.postfix(), "352*+");
/// assert_eq!(expr.eval(), Ok(13.0));
///
/// let expr = Expr::with_bindings("-2*a", vec![("a", 42.0)]).unwrap();
/// assert_eq!(expr.eval(), Ok(-84.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    source: String,
    infix: Vec<Token>,
    postfix: Vec<Token>,
    variables: Variables,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use polish::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3+5*(-2)").is_ok());
    /// // invalid expressions
    /// assert!(Expr::parse("3 + 5").is_err());
    /// assert!(Expr::parse("(3+5").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let infix = Lexer::new(expression).tokenize()?;
        let postfix = to_postfix(&infix);
        debug!(
            "parsed '{}' into postfix '{}'",
            expression,
            render(&postfix)
        );
        Ok(Self {
            source: expression.to_owned(),
            infix,
            postfix,
            variables: Variables::new(),
        })
    }

    /// Parse `expression`, and bind the variables in `bindings`.
    ///
    /// # Examples
    /// ```
    /// # use polish::{Expr, ErrorKind};
    /// let expr = Expr::with_bindings("a/b", vec![("a", 2.0), ("b", 8.0)]).unwrap();
    /// assert_eq!(expr.eval(), Ok(0.25));
    ///
    /// let error = Expr::with_bindings("1+2", vec![("pi", 3.0)]).unwrap_err();
    /// assert_eq!(error.kind(), ErrorKind::Configuration);
    /// ```
    pub fn with_bindings<I, S>(expression: &str, bindings: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut expr = Self::parse(expression)?;
        for (name, value) in bindings {
            expr.bind(name, value)?;
        }
        Ok(expr)
    }

    /// Bind the variable `name` to `value`, replacing any previous value.
    /// Constants can not be bound.
    pub fn bind<S: Into<String>>(&mut self, name: S, value: f64) -> Result<(), Error> {
        self.variables.bind(name, value)
    }

    /// Get the expression as it was written
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the expression in reverse polish notation, as the concatenation of
    /// its tokens.
    ///
    /// ```
    /// # use polish::Expr;
    /// assert_eq!(Expr::parse("(1+2)*-a").unwrap().postfix(), "12+-a*");
    /// ```
    #[must_use]
    pub fn postfix(&self) -> String {
        render(&self.postfix)
    }

    /// Get the tokens of the expression, in the order they were written
    #[must_use]
    pub fn infix_tokens(&self) -> &[Token] {
        &self.infix
    }

    /// Get the tokens of the expression, in reverse polish notation
    #[must_use]
    pub fn postfix_tokens(&self) -> &[Token] {
        &self.postfix
    }

    /// Get the values of the variables known by this expression
    #[must_use]
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Get the names used in the expression, without their sign and in order
    /// of first appearance. Constants are included.
    ///
    /// ```
    /// # use polish::Expr;
    /// let expr = Expr::parse("a*-b+pi/a").unwrap();
    /// assert_eq!(expr.names(), vec!["a", "b", "pi"]);
    /// ```
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.infix.iter().filter_map(Token::name) {
            if !names.contains(&name.ident) {
                names.push(name.ident);
            }
        }
        names
    }

    /// Get the names used in the expression which have no value yet
    #[must_use]
    pub fn unresolved(&self) -> Vec<&str> {
        self.names()
            .into_iter()
            .filter(|name| !self.variables.contains(name))
            .collect()
    }

    /// Ask `resolver` for the value of every unresolved name, in order of
    /// first appearance. Names which already have a value are not asked
    /// again.
    pub fn resolve<R: Resolver + ?Sized>(&mut self, resolver: &mut R) -> Result<(), Error> {
        let missing: Vec<String> = self.unresolved().into_iter().map(String::from).collect();
        for name in missing {
            let value = resolver.resolve(&name)?;
            debug!("resolved '{}' = {}", name, value);
            self.variables.bind(name, value)?;
        }
        Ok(())
    }

    /// Evaluate the expression with the variables bound so far.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polish::Expr;
    /// let mut expr = Expr::parse("3+a").unwrap();
    /// assert!(expr.eval().is_err());
    ///
    /// expr.bind("a", -5.0).unwrap();
    /// assert_eq!(expr.eval(), Ok(-2.0));
    /// expr.bind("a", 2.0).unwrap();
    /// assert_eq!(expr.eval(), Ok(5.0));
    /// ```
    pub fn eval(&self) -> Result<f64, Error> {
        evaluate(&self.postfix, &self.variables)
    }

    /// Resolve the missing variables with `resolver`, then evaluate the
    /// expression.
    pub fn eval_with<R: Resolver + ?Sized>(&mut self, resolver: &mut R) -> Result<f64, Error> {
        self.resolve(resolver)?;
        self.eval()
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str(&self.source)
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Expr;
    use crate::brackets::validate as validate_brackets;
    use crate::error::{Error, ErrorKind};
    use crate::token::Op;
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    const NO_BINDINGS: [(&str, f64); 0] = [];

    fn eval(input: &str, bindings: &[(&str, f64)]) -> Result<f64, Error> {
        super::eval(input, bindings.iter().copied())
    }

    #[test_case("4", &NO_BINDINGS => 4.0 ; "one positive number")]
    #[test_case("-4", &NO_BINDINGS => -4.0 ; "one negative number")]
    #[test_case("var", &[("var", 4.0)] => 4.0 ; "one positive variable")]
    #[test_case("var", &[("var", -4.0)] => -4.0 ; "one negative variable")]
    #[test_case("-(-1)", &NO_BINDINGS => 1.0 ; "unary minus 1")]
    #[test_case("-(-(-1))", &NO_BINDINGS => -1.0 ; "unary minus 2")]
    #[test_case("2-(-1)", &NO_BINDINGS => 3.0 ; "operation and unary minus 1")]
    #[test_case("2-(-(-1))", &NO_BINDINGS => 1.0 ; "operation and unary minus 2")]
    #[test_case("-(-a)", &[("a", 1.0)] => 1.0 ; "unary minus 1 variable")]
    #[test_case("-(-(-a))", &[("a", 1.0)] => -1.0 ; "unary minus 2 variable")]
    #[test_case("2-(-a)", &[("a", 1.0)] => 3.0 ; "operation and unary minus 1 variable")]
    #[test_case("2-(-(-a))", &[("a", 1.0)] => 1.0 ; "operation and unary minus 2 variable")]
    #[test_case("2/8", &NO_BINDINGS => 0.25 ; "divide positive by positive")]
    #[test_case("2/(-8)", &NO_BINDINGS => -0.25 ; "divide positive by negative")]
    #[test_case("-2/8", &NO_BINDINGS => -0.25 ; "divide negative by positive")]
    #[test_case("-2/(-8)", &NO_BINDINGS => 0.25 ; "divide negative by negative")]
    #[test_case("a/(-b)", &[("a", 2.0), ("b", 8.0)] => -0.25 ; "divide variable by negated variable")]
    #[test_case("-a/(-b)", &[("a", 2.0), ("b", 8.0)] => 0.25 ; "divide negated variables")]
    #[test_case("2*(-8)", &NO_BINDINGS => -16.0 ; "multiply positive by negative")]
    #[test_case("-2*(-8)", &NO_BINDINGS => 16.0 ; "multiply negative by negative")]
    #[test_case("-a*b", &[("a", 2.0), ("b", 8.0)] => -16.0 ; "multiply negated variable")]
    #[test_case("-a*(-b)", &[("a", 2.0), ("b", 8.0)] => 16.0 ; "multiply negated variables")]
    #[test_case("1+2*3", &NO_BINDINGS => 7.0 ; "add and multiply")]
    #[test_case("1+1/2", &NO_BINDINGS => 1.5 ; "add and divide")]
    #[test_case("8/4/2", &NO_BINDINGS => 1.0 ; "left associative division")]
    #[test_case("10-4-3", &NO_BINDINGS => 3.0 ; "left associative subtraction")]
    #[test_case("2*-3", &NO_BINDINGS => -6.0 ; "unary minus after operator")]
    #[test_case("{2+[3*(4-1)]}/11", &NO_BINDINGS => 1.0 ; "bracket kinds")]
    #[test_case("1/-(2)", &NO_BINDINGS => -0.5 ; "divide by negated group")]
    #[test_case("8/-(1+1)", &NO_BINDINGS => -4.0 ; "divide by negated sum")]
    #[test_case("8-(-(2))*3", &NO_BINDINGS => 14.0 ; "multiply negated group")]
    #[test_case("12/-(a)/-(-(b))", &[("a", 2.0), ("b", 3.0)] => -2.0 ; "chained negated groups")]
    fn exact(input: &str, bindings: &[(&str, f64)]) -> f64 {
        eval(input, bindings).unwrap()
    }

    #[test_case("1.2+3.04+10", &NO_BINDINGS, 14.24 ; "positive numbers")]
    #[test_case("-1.2-3.04-10", &NO_BINDINGS, -14.24 ; "negative numbers")]
    #[test_case("1.2-3.04+10", &NO_BINDINGS, 8.16 ; "mixed numbers 1")]
    #[test_case("-1.2+3.04-10", &NO_BINDINGS, -8.16 ; "mixed numbers 2")]
    #[test_case("a+b+c", &[("a", 1.2), ("b", 3.04), ("c", 10.0)], 14.24 ; "positive variables")]
    #[test_case("a+b+c", &[("a", -1.2), ("b", -3.04), ("c", -10.0)], -14.24 ; "negative values")]
    #[test_case("-a-b-c", &[("a", 1.2), ("b", 3.04), ("c", 10.0)], -14.24 ; "negated variables")]
    #[test_case("-a+b-c", &[("a", 1.2), ("b", 3.04), ("c", 10.0)], -8.16 ; "mixed signs")]
    #[test_case("-a+b-c", &[("a", -1.2), ("b", 3.04), ("c", -10.0)], 14.24 ; "mixed signs and values")]
    #[test_case("2*pi*r", &[("r", 0.5)], std::f64::consts::PI ; "constants")]
    #[test_case("-e/e", &NO_BINDINGS, -1.0 ; "negated constant")]
    fn approximate(input: &str, bindings: &[(&str, f64)], expected: f64) {
        let result = eval(input, bindings).unwrap();
        assert!(
            approx_eq!(f64, result, expected, epsilon = 1e-12),
            "{} = {}, expected {}",
            input,
            result,
            expected
        );
    }

    #[test_case("1/0", &NO_BINDINGS ; "literal")]
    #[test_case("1/(2-2)", &NO_BINDINGS ; "computed")]
    #[test_case("1/a", &[("a", 0.0)] ; "variable")]
    #[test_case("1/(a-b)", &[("a", 2.0), ("b", 2.0)] ; "computed from variables")]
    #[test_case("1/-a", &[("a", 0.0)] ; "negated variable")]
    #[test_case("1/-(0)", &NO_BINDINGS ; "negated group")]
    #[test_case("1/-(a-b)", &[("a", 2.0), ("b", 2.0)] ; "negated computed group")]
    fn division_by_zero(input: &str, bindings: &[(&str, f64)]) {
        assert_eq!(eval(input, bindings).unwrap_err().kind(), ErrorKind::Arithmetic);
    }

    #[test_case("(()" ; "unclosed")]
    #[test_case(")(" ; "reversed")]
    #[test_case("())" ; "extra closer")]
    #[test_case("()(" ; "trailing opener")]
    #[test_case(")()" ; "leading closer")]
    #[test_case("1 + 2" ; "whitespace")]
    #[test_case("1+" ; "trailing operator")]
    fn syntax_errors(input: &str) {
        assert_eq!(Expr::parse(input).unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test_case("()" ; "pair")]
    #[test_case("(())" ; "nested")]
    #[test_case("[(){}]" ; "mixed kinds")]
    fn empty_groups_are_balanced_but_rejected(input: &str) {
        assert!(validate_brackets(input));
        assert_eq!(Expr::parse(input).unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test_case("pi" ; "pi")]
    #[test_case("e" ; "e")]
    fn constants_can_not_be_bound(name: &str) {
        for body in &["1", "a+b", name] {
            let error = Expr::with_bindings(body, vec![(name, 1.0)]).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Configuration);
        }
    }

    #[test]
    fn syntax_is_checked_before_bindings() {
        let error = Expr::with_bindings("1+", vec![("pi", 1.0)]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn accessors() {
        let expr: Expr = "-(a+1)*2".parse().unwrap();
        assert_eq!(expr.source(), "-(a+1)*2");
        assert_eq!(expr.to_string(), "-(a+1)*2");
        assert_eq!(expr.postfix(), "-1a1+*2*");
        assert_eq!(expr.infix_tokens().len(), 9);
        assert_eq!(expr.postfix_tokens().len(), 7);
        assert_eq!(expr.names(), vec!["a"]);
        assert_eq!(expr.unresolved(), vec!["a"]);
    }

    #[test]
    fn unresolved_name() {
        let expr = Expr::parse("2*z").unwrap();
        assert_eq!(
            expr.eval().unwrap_err().to_string(),
            "NameError: name 'z' is not defined"
        );
    }

    #[test]
    fn repeated_evaluation() {
        let expr = Expr::with_bindings("a*b-c/d", vec![("a", 1.1), ("b", 2.3), ("c", 7.0), ("d", 3.0)])
            .unwrap();
        let first = expr.eval().unwrap();
        for _ in 0..10 {
            assert_eq!(expr.eval().unwrap().to_bits(), first.to_bits());
        }
    }

    #[test]
    fn names_are_resolved_once() {
        let mut calls = Vec::new();
        let mut resolver = |name: &str| {
            calls.push(name.to_string());
            Some(2.0)
        };
        let mut expr = Expr::with_bindings("a*-a+b/c-pi*a+b", vec![("c", 4.0)]).unwrap();
        assert_eq!(expr.unresolved(), vec!["a", "b"]);
        let first = expr.eval_with(&mut resolver).unwrap();
        let second = expr.eval_with(&mut resolver).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert!(expr.unresolved().is_empty());
        drop(resolver);
        assert_eq!(calls, vec!["a", "b"]);
    }

    #[test]
    fn negated_names_are_stored_unsigned() {
        let mut expr = Expr::parse("-x+x").unwrap();
        assert_eq!(expr.eval_with(&mut |_: &str| Some(3.0)), Ok(0.0));
        assert_eq!(expr.variables().get("x"), Some(3.0));
    }

    #[test]
    fn resolver_failure() {
        let mut expr = Expr::parse("a+b").unwrap();
        let mut resolver = |name: &str| if name == "a" { Some(1.0) } else { None };
        assert_eq!(
            expr.eval_with(&mut resolver),
            Err(Error::NameError("name 'b' is not defined".into()))
        );
        assert_eq!(expr.unresolved(), vec!["b"]);
    }

    /// Random numeric expression, evaluated directly for comparison
    #[derive(Debug, Clone)]
    enum Node {
        Number(String),
        Negated(Box<Node>),
        Binary(Op, Box<Node>, Box<Node>),
    }

    impl Node {
        fn precedence(&self) -> u8 {
            match self {
                Node::Binary(op, _, _) => op.precedence(),
                _ => 2,
            }
        }

        /// Write the expression with only the brackets it needs
        fn infix(&self) -> String {
            match self {
                Node::Number(text) => text.clone(),
                Node::Negated(inner) => format!("-({})", inner.infix()),
                Node::Binary(op, left, right) => {
                    let mut left_text = left.infix();
                    if left.precedence() < op.precedence() {
                        left_text = format!("({})", left_text);
                    }
                    let mut right_text = right.infix();
                    if right.precedence() <= op.precedence() {
                        right_text = format!("[{}]", right_text);
                    }
                    format!("{}{}{}", left_text, op.as_char(), right_text)
                }
            }
        }

        /// `None` when some division has a zero divisor
        #[allow(clippy::float_cmp)]
        fn value(&self) -> Option<f64> {
            match self {
                Node::Number(text) => text.parse().ok(),
                Node::Negated(inner) => inner.value().map(|value| -value),
                Node::Binary(op, left, right) => {
                    let (left, right) = (left.value(), right.value());
                    let (left, right) = (left?, right?);
                    match op {
                        Op::Plus => Some(left + right),
                        Op::Minus => Some(left - right),
                        Op::Mul => Some(left * right),
                        Op::Div if right == 0.0 => None,
                        Op::Div => Some(left / right),
                    }
                }
            }
        }
    }

    fn operator() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Plus), Just(Op::Minus), Just(Op::Mul), Just(Op::Div)]
    }

    fn expression() -> impl Strategy<Value = Node> {
        let leaf = prop_oneof![
            Just(Node::Number("0".to_string())),
            (0u32..1000).prop_map(|n| Node::Number(n.to_string())),
            (1u32..100).prop_map(|n| Node::Number(format!("-{}", n))),
            (0u32..100, 0u32..100).prop_map(|(i, f)| Node::Number(format!("{}.{}", i, f))),
        ];
        leaf.prop_recursive(5, 48, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|node| Node::Negated(Box::new(node))),
                (operator(), inner.clone(), inner)
                    .prop_map(|(op, left, right)| Node::Binary(op, Box::new(left), Box::new(right))),
            ]
        })
    }

    proptest! {
        #[test]
        fn matches_direct_evaluation(node in expression()) {
            let input = node.infix();
            let result = Expr::parse(&input).and_then(|expr| expr.eval());
            match node.value() {
                Some(expected) => {
                    let actual = result.unwrap();
                    prop_assert!(
                        approx_eq!(f64, actual, expected, epsilon = 1e-9, ulps = 4),
                        "{} = {}, expected {}",
                        input,
                        actual,
                        expected
                    );
                }
                None => {
                    prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::Arithmetic);
                }
            }
        }
    }
}
