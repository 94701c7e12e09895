use crate::class::{closing, is_right_bracket};

/// Check that the brackets in `input` are balanced and properly nested.
///
/// Each left bracket must be closed by its own kind of right bracket, but any
/// kind may be used for grouping.
///
/// # Examples
///
/// ```
/// # use polish::validate_brackets;
/// assert!(validate_brackets("[(){}]"));
/// assert!(!validate_brackets("(]"));
/// ```
#[must_use]
pub fn validate(input: &str) -> bool {
    let mut expected = Vec::new();
    for c in input.chars() {
        if let Some(right) = closing(c) {
            expected.push(right);
        } else if is_right_bracket(c) && expected.pop() != Some(c) {
            return false;
        }
    }
    expected.is_empty()
}
