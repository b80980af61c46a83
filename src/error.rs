//! Error types shared by the inventory, query and report layers.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single supply command.
///
/// None of these end an interactive session; the interpreter prints them and
/// reads the next line.
#[derive(Debug, Error)]
pub enum SupplyError {
    /// A record of the supply database could not be parsed or breaks an invariant.
    #[error("Invalid hospital supply database format. (line {line}: {reason})")]
    DataFormat { line: usize, reason: &'static str },

    /// The supply database could not be opened or read.
    #[error("cannot read supply database {}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A query that needs at least one item ran against an empty table.
    #[error("supply database {0} has no items")]
    EmptyInventory(String),

    /// A command argument is missing or out of range.
    #[error("bad argument: {0}")]
    BadArgument(String),
}

impl SupplyError {
    pub fn data_format(line: usize, reason: &'static str) -> Self {
        Self::DataFormat { line, reason }
    }
}
