/// Header-parsed rectangular sheet slice
use crate::extract_error::ExtractError;
use crate::utils::{clean_header, format_number, normalize_label, parse_year};

/// A single worksheet cell after conversion from the workbook format
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        Cell::Number(value)
    }

    /// Numeric value of the cell
    ///
    /// Text cells are parsed after trimming (the publisher stores some figures
    /// as text). Placeholders such as "-", "k.A." or "x" read as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(f) if f.is_finite() => Some(*f),
            Cell::Number(_) | Cell::Empty => None,
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }

    /// Cell rendered as a label (empty string for blanks)
    pub fn as_label(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(f) => format_number(*f),
            Cell::Text(s) => s.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    fn header_label(&self, col: usize) -> String {
        if self.is_empty() {
            return unnamed(col);
        }
        clean_header(&self.as_label())
    }
}

/// Label given to a blank header cell
pub fn unnamed(col: usize) -> String {
    format!("Unnamed: {col}")
}

/// Sheet slice with one parsed header row
///
/// Every data row has exactly `headers().len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Build a table from a full sheet grid
    ///
    /// Row `skip_rows` becomes the header; at most `row_limit` rows follow it.
    /// Short rows are padded with `Cell::Empty` so the table stays rectangular.
    pub fn from_grid(grid: &[Vec<Cell>], skip_rows: usize, row_limit: Option<usize>) -> Self {
        let Some((header_row, rest)) = grid.get(skip_rows..).and_then(|g| g.split_first()) else {
            return Self::default();
        };

        let data = match row_limit {
            Some(limit) => &rest[..limit.min(rest.len())],
            None => rest,
        };

        let width = data
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header_row.len()))
            .max()
            .unwrap_or(0);

        let headers = (0..width)
            .map(|col| header_row.get(col).unwrap_or(&Cell::Empty).header_label(col))
            .collect();

        let rows = data
            .iter()
            .map(|row| {
                let mut cells = row.clone();
                cells.resize(width, Cell::Empty);
                cells
            })
            .collect();

        Self { headers, rows }
    }

    /// Build a table directly from headers and rows, padding or truncating rows to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the slice had no header row at all
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Header positions that read as calendar years
    pub fn year_columns(&self) -> Vec<(usize, i32)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| parse_year(h).map(|year| (idx, year)))
            .collect()
    }

    /// Remove a column by header name
    pub fn drop_column(&mut self, name: &str, source_name: &str) -> Result<(), ExtractError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| ExtractError::MissingColumn {
                source_name: source_name.to_string(),
                column: name.to_string(),
            })?;
        self.headers.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        Ok(())
    }

    /// Keep only data rows in `range` (clamped to the table)
    pub fn slice_rows(&mut self, start: usize, end: usize) {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        self.rows = self.rows.drain(start..end).collect();
    }

    /// Normalized text of a cell, empty for blanks or out-of-range positions
    pub fn label(&self, row: usize, col: usize) -> String {
        self.cell(row, col)
            .map(|c| normalize_label(&c.as_label()))
            .unwrap_or_default()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).and_then(Cell::as_f64)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Index of the first row whose normalized label in `col` equals `label`
    pub fn find_row(&self, col: usize, label: &str) -> Option<usize> {
        let wanted = normalize_label(label);
        (0..self.rows.len()).find(|&row| self.label(row, col) == wanted)
    }
}
