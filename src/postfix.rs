use crate::token::{Kind, Token};

/// Reorder `infix` tokens into reverse polish notation using the
/// shunting-yard algorithm. Brackets are dropped from the output.
///
/// The tokens must come from the lexer, which guarantees that the brackets
/// are balanced.
pub fn to_postfix(infix: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(infix.len());
    let mut operators: Vec<&Token> = Vec::new();

    for token in infix {
        match token.kind() {
            Kind::Operand => output.push(token.clone()),
            Kind::Operator(o1) => {
                'operators: while let Some(&top) = operators.last() {
                    match top.kind() {
                        // all operators are left associative
                        Kind::Operator(o2) if o2.precedence() >= o1.precedence() => {
                            operators.pop();
                            output.push(top.clone());
                        }
                        _ => break 'operators,
                    }
                }
                operators.push(token);
            }
            Kind::LeftBracket => operators.push(token),
            Kind::RightBracket => loop {
                match operators.pop() {
                    Some(top) if top.kind() == Kind::LeftBracket => break,
                    Some(top) => output.push(top.clone()),
                    None => panic!("Internal bug: unbalanced brackets after validation"),
                }
            },
        }
    }

    while let Some(token) = operators.pop() {
        match token.kind() {
            Kind::Operator(_) => output.push(token.clone()),
            other => panic!("Internal bug: found {:?} in operators stack", other),
        }
    }
    output
}

/// Concatenate the text of `tokens`, without separators
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}
