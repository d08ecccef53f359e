// src/table.rs
use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens a table cell may hold to mean "no value".
static NA_TOKENS: &[&str] = &[
    "N/A", "NA", "n/a", "nan", "NaN", "null", "NULL", "None", "-", "—", "#N/A",
];

static PLAIN_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("plain number regex")
});

static GROUPED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(?:,\d{3})+(?:\.\d*)?$").expect("grouped number regex")
});

/// A single value in a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Infer a typed cell from already-normalised cell text.
    ///
    /// Only whole-cell numbers become numeric here; `1,234` counts as a
    /// grouped integer, while `12 kg` stays text.
    pub fn infer(raw: &str) -> Cell {
        let s = raw.trim();
        if s.is_empty() || NA_TOKENS.contains(&s) {
            return Cell::Missing;
        }

        let ungrouped;
        let candidate = if GROUPED_NUMBER.is_match(s) {
            ungrouped = s.replace(',', "");
            ungrouped.as_str()
        } else if PLAIN_NUMBER.is_match(s) {
            s
        } else {
            return Cell::Text(s.to_string());
        };

        if let Ok(i) = candidate.parse::<i64>() {
            return Cell::Integer(i);
        }
        match candidate.parse::<f64>() {
            Ok(f) if f.is_finite() => Cell::Float(f),
            _ => Cell::Text(s.to_string()),
        }
    }
}

/// An ordered, named sequence of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// The type discriminator for the whole column.
    pub fn first(&self) -> Option<&Cell> {
        self.cells.first()
    }
}

/// An ordered collection of columns, all of the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build a table from a header and row-major cells, padding short rows
    /// (and a short header) so every column has one cell per row.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);

        let mut columns: Vec<Column> = (0..width)
            .map(|i| {
                let name = headers.get(i).cloned().unwrap_or_else(|| i.to_string());
                Column::new(name, Vec::with_capacity(rows.len()))
            })
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for col in columns.iter_mut() {
                col.cells.push(cells.next().unwrap_or(Cell::Missing));
            }
        }

        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }
}

/// The cleaned numeric values of one column, ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
