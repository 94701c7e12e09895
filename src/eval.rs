use crate::error::Error;
use crate::token::{Kind, Op, Token};
use crate::variables::Variables;

/// Evaluate a sequence of tokens in reverse polish notation, looking up
/// variables in `variables`.
pub fn evaluate(postfix: &[Token], variables: &Variables) -> Result<f64, Error> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());
    for token in postfix {
        match token.kind() {
            Kind::Operand => stack.push(operand(token, variables)?),
            Kind::Operator(op) => {
                let right = pop(&mut stack);
                let left = pop(&mut stack);
                stack.push(operate(left, right, op)?);
            }
            other => panic!("Internal error: got {:?} token after shunting yard", other),
        }
    }
    let result = pop(&mut stack);
    assert!(
        stack.is_empty(),
        "Internal bug: {} values left on the stack",
        stack.len()
    );
    Ok(result)
}

fn pop(stack: &mut Vec<f64>) -> f64 {
    match stack.pop() {
        Some(value) => value,
        None => panic!("Internal bug: empty value stack"),
    }
}

fn operand(token: &Token, variables: &Variables) -> Result<f64, Error> {
    if let Some(name) = token.name() {
        let value = variables
            .get(name.ident)
            .ok_or_else(|| Error::NameError(format!("name '{}' is not defined", name.ident)))?;
        if name.negated {
            Ok(-value)
        } else {
            Ok(value)
        }
    } else {
        token
            .text()
            .parse()
            .map_err(|_| Error::SyntaxError(format!("invalid number {}", token.text())))
    }
}

#[allow(clippy::float_cmp)]
fn operate(left: f64, right: f64, op: Op) -> Result<f64, Error> {
    match op {
        Op::Plus => Ok(left + right),
        Op::Minus => Ok(left - right),
        Op::Mul => Ok(left * right),
        Op::Div if right == 0.0 => Err(Error::ArithmeticError(format!(
            "division of {} by zero",
            left
        ))),
        Op::Div => Ok(left / right),
    }
}
