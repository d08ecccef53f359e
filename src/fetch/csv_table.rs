// src/fetch/csv_table.rs
use crate::error::RetrievalError;
use crate::table::{Cell, Table};
use csv::ReaderBuilder;

/// Load a CSV document as a single table; the first record names the columns.
pub fn parse_csv(text: &str) -> Result<Option<Table>, RetrievalError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(Cell::infer).collect::<Vec<_>>());
    }

    let table = Table::from_rows(headers, rows);
    Ok((!table.columns().is_empty()).then_some(table))
}
