//! Command-line options of the `supply_commands` binary.

use crate::env::Environment;
use argh::FromArgs;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Query hospital supply databases interactively.
///
/// Each input line is one command, e.g. `ward.csv needed_in 3`. Type `help`
/// for the full list.
pub struct Options {
    #[argh(option)]
    /// directory that relative database names are resolved against.
    /// Defaults to $SUPPLY_DATA_DIR, then the current directory.
    pub data_dir: Option<PathBuf>,

    #[argh(option, default = "String::new()")]
    /// prompt shown before each line in interactive mode (empty by default).
    pub prompt: String,

    #[argh(option)]
    /// file to load line-editing history from and save it to.
    pub history: Option<PathBuf>,

    #[argh(option)]
    /// tracing filter, e.g. "debug" or "supply_commands=trace". Overrides RUST_LOG.
    pub log: Option<String>,

    #[argh(option, short = 'c')]
    /// run this command line instead of starting the interactive loop; repeatable.
    pub command: Vec<String>,
}

impl Options {
    pub fn environment(&self) -> Environment {
        match &self.data_dir {
            Some(dir) => Environment::with_data_dir(dir),
            None => Environment::new(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.command.is_empty()
    }
}
