//! CSV export of contracts.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use csv::Writer;
use serde_json::Value;

use crate::error::Error;
use crate::model::Contract;
use crate::model::fields;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes contracts as UTF-8, comma-delimited CSV.
///
/// Columns are every record field in first-seen order. The signing date and
/// global value columns carry the normalized values, and a year column is
/// appended. With [`with_value_in_millions`](Self::with_value_in_millions)
/// the value in millions is appended too.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter {
    value_in_millions: bool,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the `valor_global_por_milhao` column.
    pub fn with_value_in_millions(mut self, enabled: bool) -> Self {
        self.value_in_millions = enabled;
        self
    }

    /// Returns the header row for the given contracts.
    pub fn columns<'a>(&self, contracts: impl IntoIterator<Item = &'a Contract>) -> Vec<String> {
        let derived = [fields::YEAR, fields::GLOBAL_VALUE_MILLIONS];
        let mut seen: HashSet<&str> = HashSet::new();
        let mut columns: Vec<String> = Vec::new();

        for contract in contracts {
            for name in contract.record().field_names() {
                if !derived.contains(&name) && seen.insert(name) {
                    columns.push(name.to_string());
                }
            }
        }

        for required in [fields::SIGNING_DATE, fields::GLOBAL_VALUE] {
            if !seen.contains(required) {
                columns.push(required.to_string());
            }
        }

        columns.push(fields::YEAR.to_string());
        if self.value_in_millions {
            columns.push(fields::GLOBAL_VALUE_MILLIONS.to_string());
        }

        columns
    }

    /// Writes the contracts to any writer.
    pub fn write<W: io::Write>(&self, contracts: &[Contract], writer: W) -> Result<(), Error> {
        let mut wtr = Writer::from_writer(writer);
        let columns = self.columns(contracts);

        wtr.write_record(&columns)?;

        for contract in contracts {
            let row: Vec<String> = columns.iter().map(|c| cell(contract, c)).collect();
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Renders the contracts to a string.
    pub fn export(&self, contracts: &[Contract]) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.write(contracts, &mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::export(format!("UTF-8 conversion error: {}", e)))
    }

    /// Writes the contracts to a file, replacing it if it exists.
    pub fn write_to_path(&self, contracts: &[Contract], path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        self.write(contracts, file)?;
        log::info!("Exported {} contracts to {}", contracts.len(), path.display());
        Ok(())
    }
}

fn cell(contract: &Contract, column: &str) -> String {
    match column {
        fields::SIGNING_DATE => contract
            .signing_date()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        fields::GLOBAL_VALUE => contract.global_value().to_string(),
        fields::YEAR => contract.year().map(|y| y.to_string()).unwrap_or_default(),
        fields::GLOBAL_VALUE_MILLIONS => contract.global_value_millions().normalize().to_string(),
        _ => match contract.record().get(column) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        },
    }
}
