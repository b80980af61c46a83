//! Rule engine: positional matching of tokens against declarative rule sets.
//!
//! A [`RuleSet`] describes one recognizable shape of a token sequence:
//!
//! ```text
//! rules:   [ Convert(text) | Literal("needed_in") | Convert(int) ]
//! tokens:  [ "ward.csv"    | "needed_in"          | "3"          ]
//!                 |                  |                    |
//! values:  [ Text(ward.csv)| Text(needed_in)      | Int(3)       ]
//!
//! outputs: [ Refine(1, to_kind), Keep(0), Refine(0, strip_extension), Keep(2) ]
//!   args:  [ Kind(NeededIn), Text(ward.csv), Text(ward), Int(3) ]
//! ```
//!
//! Matching either succeeds completely or yields [`ParseOutcome::NoMatch`];
//! a failed attempt never leaks partially converted values.

use crate::convert::{Conversion, Refiner, Value};
use std::fmt;

/// How a single output argument is assembled from the converted inputs.
#[derive(Clone, Copy)]
pub enum OutputMapping {
    /// Pass the value converted at this input position through unchanged.
    Keep(usize),
    /// Apply a further conversion to the value at this input position.
    Refine(usize, Refiner),
}

impl fmt::Debug for OutputMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMapping::Keep(pos) => f.debug_tuple("Keep").field(pos).finish(),
            OutputMapping::Refine(pos, _) => write!(f, "Refine({pos}, ..)"),
        }
    }
}

/// Result of matching a token sequence against a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every position matched; the arguments are in output-mapping order.
    Match(Vec<Value>),
    /// The tokens do not have this shape.
    NoMatch,
}

impl ParseOutcome {
    pub fn into_args(self) -> Option<Vec<Value>> {
        match self {
            ParseOutcome::Match(args) => Some(args),
            ParseOutcome::NoMatch => None,
        }
    }
}

/// One command shape: per-position rules plus the output assembly recipe.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: &'static str,
    rules: Vec<Conversion>,
    outputs: Vec<OutputMapping>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<Conversion>, outputs: Vec<OutputMapping>) -> Self {
        Self {
            name,
            rules,
            outputs,
        }
    }

    /// Human-readable name, used in diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of tokens this shape accepts.
    pub fn arity(&self) -> usize {
        self.rules.len()
    }

    pub fn try_parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseOutcome {
        try_parse(&self.rules, &self.outputs, tokens)
    }
}

/// Matches `tokens` position by position against `rules`, then assembles the
/// output arguments according to `outputs`.
///
/// Returns [`ParseOutcome::NoMatch`] when the token count differs from the
/// number of rules, when any rule rejects its token, or when an output mapping
/// cannot be applied.
pub fn try_parse<S: AsRef<str>>(
    rules: &[Conversion],
    outputs: &[OutputMapping],
    tokens: &[S],
) -> ParseOutcome {
    if tokens.len() != rules.len() {
        return ParseOutcome::NoMatch;
    }
    match convert_and_assemble(rules, outputs, tokens) {
        Some(args) => ParseOutcome::Match(args),
        None => ParseOutcome::NoMatch,
    }
}

fn convert_and_assemble<S: AsRef<str>>(
    rules: &[Conversion],
    outputs: &[OutputMapping],
    tokens: &[S],
) -> Option<Vec<Value>> {
    let converted = rules
        .iter()
        .zip(tokens)
        .map(|(rule, token)| rule.apply(token.as_ref()))
        .collect::<Option<Vec<Value>>>()?;

    outputs
        .iter()
        .map(|mapping| match *mapping {
            OutputMapping::Keep(pos) => converted.get(pos).cloned(),
            OutputMapping::Refine(pos, refine) => converted.get(pos).and_then(refine),
        })
        .collect()
}

/// Tries each rule set in order and returns the arguments of the first match.
///
/// The order of `rule_sets` is a precedence order: when several shapes accept
/// the same tokens, the earliest one wins. If none matches, `default` is
/// returned.
pub fn select_first<S: AsRef<str>>(
    rule_sets: &[RuleSet],
    tokens: &[S],
    default: Vec<Value>,
) -> Vec<Value> {
    for rule_set in rule_sets {
        if let Some(args) = rule_set.try_parse(tokens).into_args() {
            tracing::trace!(rule_set = rule_set.name(), "rule set matched");
            return args;
        }
    }
    tracing::trace!(tokens = tokens.len(), "no rule set matched");
    default
}
