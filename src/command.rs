//! Commands understood by the supply tool and the grammar that recognizes them.

use crate::convert::Conversion::{Convert, Literal};
use crate::convert::{Value, int, strip_extension, text, to_kind};
use crate::error::SupplyError;
use crate::parser::OutputMapping::{Keep, Refine};
use crate::parser::{self, RuleSet};

/// The closed set of command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    NeededNow,
    NeededIn,
    RunsOut,
    RunOuts,
    Help,
    Exit,
    Invalid,
}

impl CommandKind {
    const NAMED: [(&'static str, CommandKind); 6] = [
        ("needed_now", CommandKind::NeededNow),
        ("needed_in", CommandKind::NeededIn),
        ("runs_out", CommandKind::RunsOut),
        ("run_outs", CommandKind::RunOuts),
        ("help", CommandKind::Help),
        ("exit", CommandKind::Exit),
    ];

    /// Looks a kind up by its keyword, ignoring ASCII case.
    ///
    /// Unknown names resolve to [`CommandKind::Invalid`]; this never fails.
    pub fn from_name(name: &str) -> CommandKind {
        Self::NAMED
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
            .unwrap_or(CommandKind::Invalid)
    }
}

/// A parsed command line: its kind plus the typed arguments for that kind.
///
/// For the report kinds the arguments are laid out as
/// `[source path, display name, (count)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub args: Vec<Value>,
}

impl Command {
    pub fn invalid() -> Self {
        Self {
            kind: CommandKind::Invalid,
            args: Vec::new(),
        }
    }

    /// Builds a command from parser output whose first value is the kind.
    pub fn from_values(mut values: Vec<Value>) -> Self {
        if values.is_empty() {
            return Self::invalid();
        }
        match values.remove(0).as_kind() {
            Some(kind) => Self { kind, args: values },
            None => Self::invalid(),
        }
    }

    pub fn text_arg(&self, pos: usize) -> Result<&str, SupplyError> {
        self.args
            .get(pos)
            .and_then(Value::as_text)
            .ok_or_else(|| self.missing(pos, "text"))
    }

    pub fn int_arg(&self, pos: usize) -> Result<u64, SupplyError> {
        self.args
            .get(pos)
            .and_then(Value::as_int)
            .ok_or_else(|| self.missing(pos, "integer"))
    }

    fn missing(&self, pos: usize, expected: &str) -> SupplyError {
        SupplyError::BadArgument(format!(
            "{:?} expects {expected} argument at position {pos}",
            self.kind
        ))
    }
}

/// The canonical command grammar, in precedence order.
///
/// Day and item counts go through [`int`], which only accepts non-negative
/// numbers, so `ward.csv needed_in -1` is an invalid command rather than an
/// empty report.
pub fn grammar() -> Vec<RuleSet> {
    vec![
        RuleSet::new(
            "needed_now",
            vec![Convert(text), Literal("needed_now")],
            vec![Refine(1, to_kind), Keep(0), Refine(0, strip_extension)],
        ),
        RuleSet::new(
            "needed_in",
            vec![Convert(text), Literal("needed_in"), Convert(int)],
            vec![Refine(1, to_kind), Keep(0), Refine(0, strip_extension), Keep(2)],
        ),
        RuleSet::new(
            "runs_out",
            vec![Convert(text), Literal("runs_out")],
            vec![Refine(1, to_kind), Keep(0), Refine(0, strip_extension)],
        ),
        RuleSet::new(
            "run_outs",
            vec![Convert(text), Convert(int), Literal("run_outs")],
            vec![Refine(2, to_kind), Keep(0), Refine(0, strip_extension), Keep(1)],
        ),
        RuleSet::new("help", vec![Literal("help")], vec![Refine(0, to_kind)]),
        RuleSet::new("exit", vec![Literal("exit")], vec![Refine(0, to_kind)]),
    ]
}

/// Parses a tokenized line against `rule_sets`, falling back to an invalid command.
pub fn parse_command<S: AsRef<str>>(rule_sets: &[RuleSet], tokens: &[S]) -> Command {
    let values = parser::select_first(
        rule_sets,
        tokens,
        vec![Value::Kind(CommandKind::Invalid)],
    );
    Command::from_values(values)
}
