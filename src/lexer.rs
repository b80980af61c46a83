//! A module implementing lexical analysis (tokenization) for supply command lines.
//!
//! The command grammar has no quoting, escaping or operators: a token is any
//! maximal run of non-whitespace characters.

/// Splits a command line into whitespace-separated tokens.
///
/// Leading, trailing and repeated whitespace never produces empty tokens, so a
/// blank line yields an empty vector.
pub fn split_into_tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}
