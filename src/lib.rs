//! A small command interpreter for querying hospital supply databases.
//!
//! Command lines are matched against a declarative grammar of rule sets
//! ([`parser`]): each rule set checks tokens position by position, converts
//! them into typed values and reorders them into the arguments of a
//! [`Command`]. The [`Interpreter`] dispatches parsed commands to reports that
//! load an [`InventoryTable`] fresh from a comma-separated database and query
//! it through [`query`].
//!
//! ```text
//! ward.csv needed_in 3   ->  Needed Items in 3 day/s for ward:
//!                            5 x Gauze
//! ward.csv 2 run_outs    ->  For ward:
//!                            Mask will run out in 1 day/s
//!                            Syringe will run out in 1 day/s
//! ```

pub mod command;
pub mod config;
pub mod convert;
pub mod env;
pub mod error;
pub mod inventory;
mod interpreter;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod query;
mod report;

pub use command::{Command, CommandKind};
pub use env::Environment;
pub use error::SupplyError;
pub use interpreter::{Interpreter, SessionState};
pub use inventory::{InventoryTable, StockRecord};
