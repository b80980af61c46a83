use crate::command::{Command, CommandKind};
use crate::env::Environment;
use crate::error::SupplyError;
use crate::inventory::InventoryTable;
use crate::query;
use anyhow::{Context, Result};
use std::io::Write;

/// Printed by `help`, and after a notice for lines no rule set accepts.
pub const USAGE: &str = "Usage:
\t<file_name:str> needed_now        Gets amount of items needed immediately for the day.
\t<file_name:str> needed_in <X:int> Gets amount of items needed in X days.
\t<file_name:str> runs_out          Prints the first item to run out, and in how many days.
\t<file_name:str> <N:int> run_outs  Prints the first N items to run out, and in how many days.
\thelp                              Prints this message.
\texit                              Exits the program.";

pub const INVALID_NOTICE: &str = "Invalid arguments provided.";

/// A report the interpreter can run for a parsed command.
///
/// Reports that read a supply database load it fresh on every execution and
/// compute their whole result before writing anything, so a failing report
/// prints nothing.
pub(crate) trait ReportCommand {
    /// Keyword of the command, e.g. "needed_now"; used for diagnostics.
    fn name(&self) -> &'static str;

    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &Environment) -> Result<()>;
}

/// Builds the report for `command`.
///
/// Returns `Ok(None)` for [`CommandKind::Exit`], which has nothing to print.
pub(crate) fn for_command(
    command: &Command,
) -> Result<Option<Box<dyn ReportCommand>>, SupplyError> {
    let report: Box<dyn ReportCommand> = match command.kind {
        CommandKind::NeededNow => Box::new(NeededNow {
            source: command.text_arg(0)?.to_owned(),
            label: command.text_arg(1)?.to_owned(),
        }),
        CommandKind::NeededIn => Box::new(NeededIn {
            source: command.text_arg(0)?.to_owned(),
            label: command.text_arg(1)?.to_owned(),
            days: command.int_arg(2)?,
        }),
        CommandKind::RunsOut => Box::new(RunsOut {
            source: command.text_arg(0)?.to_owned(),
            label: command.text_arg(1)?.to_owned(),
        }),
        CommandKind::RunOuts => Box::new(RunOuts {
            source: command.text_arg(0)?.to_owned(),
            label: command.text_arg(1)?.to_owned(),
            count: command.int_arg(2)?,
        }),
        CommandKind::Help => Box::new(Usage { notice: None }),
        CommandKind::Invalid => Box::new(Usage {
            notice: Some(INVALID_NOTICE),
        }),
        CommandKind::Exit => return Ok(None),
    };
    Ok(Some(report))
}

fn load(env: &Environment, report: &str, source: &str) -> Result<InventoryTable> {
    env.load_table(source).with_context(|| format!("{report}: {source}"))
}

/// Items needed to cover today's usage.
pub struct NeededNow {
    pub source: String,
    pub label: String,
}

impl ReportCommand for NeededNow {
    fn name(&self) -> &'static str {
        "needed_now"
    }

    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &Environment) -> Result<()> {
        let table = load(env, self.name(), &self.source)?;
        let shortfalls = query::needed_now(&table);

        writeln!(stdout, "Needed Items now for {}:", self.label)?;
        for item in shortfalls {
            writeln!(stdout, "{} x {}", item.amount, item.name)?;
        }
        Ok(())
    }
}

/// Items needed to cover `days` days of usage.
pub struct NeededIn {
    pub source: String,
    pub label: String,
    pub days: u64,
}

impl ReportCommand for NeededIn {
    fn name(&self) -> &'static str {
        "needed_in"
    }

    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &Environment) -> Result<()> {
        let table = load(env, self.name(), &self.source)?;
        let shortfalls = query::needed_in_days(&table, self.days)?;

        writeln!(stdout, "Needed Items in {} day/s for {}:", self.days, self.label)?;
        for item in shortfalls {
            writeln!(stdout, "{} x {}", item.amount, item.name)?;
        }
        Ok(())
    }
}

/// The single item that runs out first.
pub struct RunsOut {
    pub source: String,
    pub label: String,
}

impl ReportCommand for RunsOut {
    fn name(&self) -> &'static str {
        "runs_out"
    }

    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &Environment) -> Result<()> {
        let table = load(env, self.name(), &self.source)?;
        let first = query::first_to_run_out(&table)
            .ok_or_else(|| SupplyError::EmptyInventory(self.source.clone()))?;

        writeln!(stdout, "For {}:", self.label)?;
        writeln!(
            stdout,
            "{} will run out in {} day/s",
            first.name, first.metric.remaining_days
        )?;
        Ok(())
    }
}

/// The first `count` items to run out.
pub struct RunOuts {
    pub source: String,
    pub label: String,
    pub count: u64,
}

impl ReportCommand for RunOuts {
    fn name(&self) -> &'static str {
        "run_outs"
    }

    fn execute(self: Box<Self>, stdout: &mut dyn Write, env: &Environment) -> Result<()> {
        let table = load(env, self.name(), &self.source)?;
        let count = usize::try_from(self.count).unwrap_or(usize::MAX);
        let items = query::first_n_to_run_out(&table, count);

        writeln!(stdout, "For {}:", self.label)?;
        for item in items {
            writeln!(
                stdout,
                "{} will run out in {} day/s",
                item.name, item.metric.remaining_days
            )?;
        }
        Ok(())
    }
}

/// Usage text, optionally preceded by a notice line.
pub struct Usage {
    pub notice: Option<&'static str>,
}

impl ReportCommand for Usage {
    fn name(&self) -> &'static str {
        "help"
    }

    fn execute(self: Box<Self>, stdout: &mut dyn Write, _env: &Environment) -> Result<()> {
        if let Some(notice) = self.notice {
            writeln!(stdout, "{}", notice)?;
        }
        writeln!(stdout, "{}", USAGE)?;
        Ok(())
    }
}
