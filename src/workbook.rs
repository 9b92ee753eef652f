// Workbook access
//
// The statistics publication is a single workbook with one sheet per table.
// Readers never touch calamine directly: they ask a WorkbookAccessor for a
// sheet at a given row offset and get back a RawTable whose first row has
// been parsed as column headers.

pub mod calamine_accessor;
pub mod raw_table;

use std::collections::HashMap;

use crate::extract_error::ExtractError;

pub use calamine_accessor::CalamineWorkbook;
pub use raw_table::{Cell, RawTable};

/// Source of raw sheet grids
pub trait WorkbookAccessor {
    /// Read `sheet_id`, skipping `skip_rows` rows and parsing the next row as the header.
    ///
    /// `row_limit` bounds the number of data rows after the header. A skip
    /// count past the end of the sheet yields an empty table, not an error.
    fn read_sheet(
        &self,
        sheet_id: &str,
        skip_rows: usize,
        row_limit: Option<usize>,
    ) -> Result<RawTable, ExtractError>;

    /// Names of all sheets in workbook order
    fn sheet_names(&self) -> Vec<String>;
}

/// Workbook held as plain cell grids
///
/// Used for fixtures and for callers that obtained the grid elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<Cell>>)>,
    index: HashMap<String, usize>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a sheet
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => self.sheets[pos].1 = rows,
            None => {
                self.index.insert(name.clone(), self.sheets.len());
                self.sheets.push((name, rows));
            }
        }
        self
    }
}

impl WorkbookAccessor for InMemoryWorkbook {
    fn read_sheet(
        &self,
        sheet_id: &str,
        skip_rows: usize,
        row_limit: Option<usize>,
    ) -> Result<RawTable, ExtractError> {
        let pos = self
            .index
            .get(sheet_id)
            .ok_or_else(|| ExtractError::SheetNotFound(sheet_id.to_string()))?;
        Ok(RawTable::from_grid(&self.sheets[*pos].1, skip_rows, row_limit))
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }
}
