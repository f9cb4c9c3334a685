use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::holding::{Holding, HoldingInput};

/// Column headers of the interchange format, in export order.
///
/// Import only requires that every column is *present*; order does not
/// matter and unknown extra columns are ignored.
pub const CSV_COLUMNS: [&str; 6] = [
    "Symbol",
    "Purchase Price",
    "Fees",
    "Units",
    "Date Purchased",
    "Category",
];

/// High-level CSV operations: import/export holdings from/to strings or files.
pub struct CsvStore;

impl CsvStore {
    /// Serialize holdings to CSV text with the [`CSV_COLUMNS`] header.
    ///
    /// Dates are written as `YYYY-MM-DD`, which is also one of the
    /// accepted import formats, so exports always round-trip.
    pub fn export_to_string(holdings: &[Holding]) -> Result<String, CoreError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(CSV_COLUMNS)
            .map_err(|e| CoreError::FileIO(format!("Failed to write CSV header: {e}")))?;

        for holding in holdings {
            writer
                .write_record(&[
                    holding.symbol.clone(),
                    holding.purchase_price.to_string(),
                    holding.fees.to_string(),
                    holding.units.to_string(),
                    holding.purchase_date.format("%Y-%m-%d").to_string(),
                    holding.category.clone(),
                ])
                .map_err(|e| CoreError::FileIO(format!("Failed to write CSV row: {e}")))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::FileIO(format!("Failed to finish CSV export: {e}")))?;

        String::from_utf8(bytes)
            .map_err(|e| CoreError::FileIO(format!("Exported CSV is not valid UTF-8: {e}")))
    }

    /// Parse CSV text into holdings.
    ///
    /// All-or-nothing: the first problem aborts the import and nothing
    /// is returned, so a caller can safely replace its store with the
    /// result. A header missing any required column is an
    /// [`CoreError::ImportFormatError`]; a row that fails field
    /// validation is a [`CoreError::ValidationError`] naming the row.
    pub fn import_from_string(data: &str) -> Result<Vec<Holding>, CoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| CoreError::ImportFormatError(format!("Unreadable CSV header: {e}")))?
            .clone();

        let mut columns: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            columns.entry(name).or_insert(idx);
        }

        let missing: Vec<&str> = CSV_COLUMNS
            .iter()
            .copied()
            .filter(|name| !columns.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::ImportFormatError(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut holdings = Vec::new();

        for (row_index, record) in reader.records().enumerate() {
            let row = row_index + 1;
            let record = record
                .map_err(|e| CoreError::ImportFormatError(format!("Row {row}: {e}")))?;

            let field = |name: &str| -> String {
                columns
                    .get(name)
                    .and_then(|&idx| record.get(idx))
                    .unwrap_or("")
                    .to_string()
            };

            let input = HoldingInput {
                symbol: field("Symbol"),
                purchase_price: field("Purchase Price"),
                fees: field("Fees"),
                units: field("Units"),
                purchase_date: field("Date Purchased"),
                category: Some(field("Category")),
            };

            let holding = input.validate().map_err(|e| match e {
                CoreError::ValidationError(msg) => {
                    CoreError::ValidationError(format!("Row {row}: {msg}"))
                }
                other => other,
            })?;

            holdings.push(holding);
        }

        Ok(holdings)
    }

    /// Export holdings to a CSV file on disk.
    pub fn export_to_file(holdings: &[Holding], path: &str) -> Result<(), CoreError> {
        let contents = Self::export_to_string(holdings)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Import holdings from a CSV file on disk.
    pub fn import_from_file(path: &str) -> Result<Vec<Holding>, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::import_from_string(&contents)
    }
}
