/// CSV tables with a two-row column header
///
/// Both static sources (reference costs/emissions and the pumped hydro
/// inventory) group their columns by origin, e.g. `dena/pump` or
/// `emission/value`. The first header row names the group, the second the
/// field. A blank group cell continues the group to its left.
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::extract_error::ExtractError;

#[derive(Debug, Clone, Default)]
pub struct MultiHeaderCsv {
    source_name: String,
    columns: Vec<(String, String)>,
    rows: Vec<StringRecord>,
}

impl MultiHeaderCsv {
    /// Parse from a reader, ignoring `skip_lines` leading lines (titles, comments)
    pub fn from_reader<R: Read>(
        reader: R,
        skip_lines: usize,
        source_name: &str,
    ) -> Result<Self, ExtractError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = csv_reader.records().skip(skip_lines);

        let missing_header = |row: usize| ExtractError::InvalidData {
            source_name: source_name.to_string(),
            row,
            msg: "missing header row".to_string(),
        };
        let groups = records.next().ok_or_else(|| missing_header(skip_lines))??;
        let fields = records.next().ok_or_else(|| missing_header(skip_lines + 1))??;

        let width = groups.len().max(fields.len());
        let mut columns = Vec::with_capacity(width);
        let mut current_group = String::new();
        for col in 0..width {
            let group = groups.get(col).map(str::trim).unwrap_or_default();
            if !group.is_empty() {
                current_group = group.to_string();
            }
            let field = fields.get(col).map(str::trim).unwrap_or_default();
            columns.push((current_group.clone(), field.to_string()));
        }

        let rows = records.collect::<Result<Vec<_>, _>>()?;
        debug!("{}: {} columns, {} rows", source_name, columns.len(), rows.len());

        Ok(Self {
            source_name: source_name.to_string(),
            columns,
            rows,
        })
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, group: &str, field: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|(g, f)| g == group && f == field)
    }

    /// Column index, or `MissingColumn` naming `group/field`
    pub fn require_column(&self, group: &str, field: &str) -> Result<usize, ExtractError> {
        self.column(group, field)
            .ok_or_else(|| ExtractError::MissingColumn {
                source_name: self.source_name.clone(),
                column: format!("{group}/{field}"),
            })
    }

    /// Trimmed cell text; `None` for blanks
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Numeric cell; blanks are `None`, unparsable text is an error
    pub fn number(&self, row: usize, col: usize) -> Result<Option<f64>, ExtractError> {
        match self.text(row, col) {
            None => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("nan") => Ok(None),
            Some(s) => s
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ExtractError::InvalidData {
                    source_name: self.source_name.clone(),
                    row,
                    msg: format!("cannot parse number '{s}' in column {col}"),
                }),
        }
    }
}
