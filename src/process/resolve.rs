// src/process/resolve.rs
use crate::error::{Error, Result};
use crate::process::numeric::extract_numeric;
use crate::table::{Series, Table};
use tracing::debug;

/// Pick the first column whose first cell is numeric and clean it.
///
/// Only row 0 decides; a column with a text header cell is skipped even if
/// every later row would parse. Cells of the chosen column that don't parse
/// are dropped.
pub fn resolve_column(table: &Table) -> Option<Series> {
    let column = table
        .columns()
        .iter()
        .find(|col| col.first().and_then(extract_numeric).is_some())?;

    let values: Vec<f64> = column.cells.iter().filter_map(extract_numeric).collect();
    debug!(
        column = %column.name,
        kept = values.len(),
        dropped = column.cells.len() - values.len(),
        "selected numeric column"
    );
    Some(Series::new(column.name.clone(), values))
}

/// First table yielding a numeric column wins; later tables are not looked at.
pub fn resolve_from_tables(tables: &[Table]) -> Result<Series> {
    tables
        .iter()
        .enumerate()
        .find_map(|(idx, table)| {
            let series = resolve_column(table)?;
            debug!(table = idx, "resolved numeric series");
            Some(series)
        })
        .ok_or(Error::NoNumericDataFound)
}
