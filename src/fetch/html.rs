// src/fetch/html.rs
use crate::table::{Cell, Table};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::trace;

/// Predicate deciding which `<table>` elements are data tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    class: String,
}

impl TableFilter {
    /// Match tables whose `class` attribute contains `token`.
    pub fn class(token: impl Into<String>) -> Self {
        Self {
            class: token.into(),
        }
    }

    pub fn matches(&self, table: &ElementRef<'_>) -> bool {
        table.value().classes().any(|c| c == self.class)
    }
}

impl Default for TableFilter {
    fn default() -> Self {
        Self::class("wikitable")
    }
}

/// Parse every marked table of an HTML document, in document order.
pub fn parse_tables(html: &str, filter: &TableFilter) -> Vec<Table> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("table").expect("`table` selector should parse");

    doc.select(&selector)
        .filter(|el| filter.matches(el))
        .enumerate()
        .map(|(idx, el)| {
            let table = parse_table(el);
            trace!(
                table = idx,
                columns = table.columns().len(),
                rows = table.num_rows(),
                "parsed table"
            );
            table
        })
        .collect()
}

type Rows<'a> = Vec<ElementRef<'a>>;

/// Span limits from the HTML table model.
const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

#[derive(Debug, Clone)]
struct RawCell {
    text: String,
    header: bool,
    colspan: usize,
    rowspan: usize,
}

#[derive(Debug, Clone)]
struct GridCell {
    text: String,
    header: bool,
}

fn parse_table(table: ElementRef<'_>) -> Table {
    let (head, body, foot) = own_rows(table);
    let mut head: Vec<Vec<RawCell>> = head.into_iter().map(row_cells).collect();
    let mut body: Vec<Vec<RawCell>> = body.into_iter().map(row_cells).collect();
    let foot: Vec<Vec<RawCell>> = foot.into_iter().map(row_cells).collect();

    if head.is_empty() {
        let leading = body
            .iter()
            .take_while(|row| !row.is_empty() && row.iter().all(|c| c.header))
            .count();
        head = body.drain(..leading).collect();
    }

    // spans never cross a row group
    let grid = expand_spans(head);
    let mut body_rows = expand_spans(body);
    body_rows.extend(expand_spans(foot));

    let width = grid
        .iter()
        .chain(body_rows.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    let headers = column_names(&grid, width);
    let rows: Vec<Vec<Cell>> = body_rows
        .into_iter()
        .map(|row| row.into_iter().map(|c| Cell::infer(&c.text)).collect())
        .collect();

    Table::from_rows(headers, rows)
}

/// Rows belonging to this table only: direct `<tr>` children and those of
/// direct `<thead>`/`<tbody>`/`<tfoot>` sections.
fn own_rows(table: ElementRef<'_>) -> (Rows<'_>, Rows<'_>, Rows<'_>) {
    let (mut head, mut body, mut foot) = (Vec::new(), Vec::new(), Vec::new());

    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => body.push(child),
            section @ ("thead" | "tbody" | "tfoot") => {
                let rows = child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr");
                match section {
                    "thead" => head.extend(rows),
                    "tfoot" => foot.extend(rows),
                    _ => body.extend(rows),
                }
            }
            _ => {}
        }
    }

    (head, body, foot)
}

fn row_cells(row: ElementRef<'_>) -> Vec<RawCell> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter_map(|cell| {
            let header = match cell.value().name() {
                "th" => true,
                "td" => false,
                _ => return None,
            };
            Some(RawCell {
                text: cell_text(cell),
                header,
                colspan: span(cell, "colspan", MAX_COLSPAN),
                rowspan: span(cell, "rowspan", MAX_ROWSPAN),
            })
        })
        .collect()
}

fn span(cell: ElementRef<'_>, attr: &str, max: usize) -> usize {
    cell.value()
        .attr(attr)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(max))
}

/// Visible text of an element, whitespace collapsed.
fn cell_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                match child.value().name() {
                    "br" => out.push(' '),
                    "style" | "script" => {}
                    _ if is_hidden(child) => {}
                    _ => collect_text(child, out),
                }
            }
            _ => {}
        }
    }
}

fn is_hidden(el: ElementRef<'_>) -> bool {
    el.value().attr("style").map_or(false, |style| {
        style
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .any(|(k, v)| k.trim().eq_ignore_ascii_case("display") && v.trim() == "none")
    })
}

/// Lay out cells on a grid, copying spanned text into every covered slot.
fn expand_spans(rows: Vec<Vec<RawCell>>) -> Vec<Vec<GridCell>> {
    // per column: (rows still covered, cell to copy)
    let mut pending: Vec<Option<(usize, GridCell)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for row in rows {
        let mut out: Vec<GridCell> = Vec::new();
        let mut cells = row.into_iter();

        loop {
            let col = out.len();
            if let Some((left, carried)) = pending.get_mut(col).and_then(Option::take) {
                out.push(carried.clone());
                if left > 1 {
                    pending[col] = Some((left - 1, carried));
                }
                continue;
            }

            let Some(cell) = cells.next() else {
                // fill rowspans reaching past the last real cell
                if pending[col.min(pending.len())..].iter().any(Option::is_some) {
                    out.push(GridCell {
                        text: String::new(),
                        header: false,
                    });
                    continue;
                }
                break;
            };

            let grid_cell = GridCell {
                text: cell.text,
                header: cell.header,
            };
            for _ in 0..cell.colspan {
                let col = out.len();
                if cell.rowspan > 1 {
                    if pending.len() <= col {
                        pending.resize(col + 1, None);
                    }
                    pending[col] = Some((cell.rowspan - 1, grid_cell.clone()));
                }
                out.push(grid_cell.clone());
            }
        }

        grid.push(out);
    }

    grid
}

fn column_names(header_rows: &[Vec<GridCell>], width: usize) -> Vec<String> {
    (0..width)
        .map(|i| {
            if header_rows.is_empty() {
                return i.to_string();
            }
            let mut parts: Vec<&str> = Vec::new();
            for row in header_rows {
                if let Some(cell) = row.get(i) {
                    let t = cell.text.as_str();
                    if !t.is_empty() && !parts.contains(&t) {
                        parts.push(t);
                    }
                }
            }
            if parts.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                parts.join(" ")
            }
        })
        .collect()
}
