//! In-memory supply inventory loaded from a comma-separated database.
//!
//! Each line of the database holds one record:
//!
//! ```text
//! <item_name>,<quantity>,<daily_usage>
//! ```
//!
//! A table is built fresh for every command that needs it and is never cached.

use crate::convert::Conversion::Convert;
use crate::convert::{int, text};
use crate::error::SupplyError;
use crate::parser::OutputMapping::Keep;
use crate::parser::{ParseOutcome, RuleSet};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Stock level of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockRecord {
    quantity: u64,
    daily_usage: u64,
}

impl StockRecord {
    /// Creates a record, rejecting a zero daily usage.
    pub fn new(quantity: u64, daily_usage: u64) -> Option<Self> {
        (daily_usage > 0).then_some(Self {
            quantity,
            daily_usage,
        })
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Always greater than zero.
    pub fn daily_usage(&self) -> u64 {
        self.daily_usage
    }
}

/// Stock records keyed by item name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryTable {
    items: BTreeMap<String, StockRecord>,
}

impl InventoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for `name`.
    pub fn insert(&mut self, name: impl Into<String>, record: StockRecord) {
        self.items.insert(name.into(), record);
    }

    pub fn get(&self, name: &str) -> Option<&StockRecord> {
        self.items.get(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StockRecord)> {
        self.items.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Reads a whole database. Any malformed line rejects the entire source.
    ///
    /// When a name occurs more than once, the last record wins.
    pub fn from_reader<R: BufRead>(reader: R, origin: &Path) -> Result<Self, SupplyError> {
        let record_rules = record_rules();
        let mut table = InventoryTable::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|source| match source.kind() {
                ErrorKind::InvalidData => {
                    SupplyError::data_format(line_no, "record is not valid UTF-8")
                }
                _ => SupplyError::Resource {
                    path: origin.to_path_buf(),
                    source,
                },
            })?;
            let fields: Vec<&str> = line.split(',').collect();

            let values = match record_rules.try_parse(&fields) {
                ParseOutcome::Match(values) => values,
                ParseOutcome::NoMatch => {
                    return Err(SupplyError::data_format(
                        line_no,
                        "expected <name>,<quantity>,<daily_usage>",
                    ));
                }
            };

            let (Some(name), Some(quantity), Some(daily_usage)) = (
                values[0].as_text(),
                values[1].as_int(),
                values[2].as_int(),
            ) else {
                return Err(SupplyError::data_format(line_no, "unexpected field types"));
            };
            let record = StockRecord::new(quantity, daily_usage)
                .ok_or_else(|| SupplyError::data_format(line_no, "daily usage must be positive"))?;
            table.insert(name, record);
        }

        tracing::debug!(origin = %origin.display(), items = table.len(), "loaded supply database");
        Ok(table)
    }

    /// Opens and reads the database at `path`.
    pub fn load(path: &Path) -> Result<Self, SupplyError> {
        let file = File::open(path).map_err(|source| SupplyError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }
}

fn record_rules() -> RuleSet {
    RuleSet::new(
        "record",
        vec![Convert(text), Convert(int), Convert(int)],
        vec![Keep(0), Keep(1), Keep(2)],
    )
}
