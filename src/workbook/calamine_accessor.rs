use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::raw_table::{Cell, RawTable};
use super::WorkbookAccessor;
use crate::extract_error::ExtractError;

/// Statistics workbook on disk (xls or xlsx, detected from the extension)
pub struct CalamineWorkbook {
    path: PathBuf,
    sheets: RefCell<Sheets<BufReader<File>>>,
}

impl CalamineWorkbook {
    /// Open the workbook (synchronous; the file is read lazily per sheet)
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref().to_path_buf();
        info!("Opening workbook: {}", path.display());

        let sheets = match open_workbook_auto(&path) {
            Ok(wb) => wb,
            Err(e) => return Err(ExtractError::WorkbookOpen(e.to_string())),
        };

        Ok(Self {
            path,
            sheets: RefCell::new(sheets),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_grid(&self, sheet_id: &str) -> Result<Vec<Vec<Cell>>, ExtractError> {
        let mut sheets = self.sheets.borrow_mut();

        if !sheets.sheet_names().iter().any(|n| n == sheet_id) {
            return Err(ExtractError::SheetNotFound(sheet_id.to_string()));
        }

        let range = match sheets.worksheet_range(sheet_id) {
            Ok(range) => range,
            Err(e) => return Err(ExtractError::WorkbookOpen(e.to_string())),
        };

        Ok(range_to_grid(&range))
    }
}

impl WorkbookAccessor for CalamineWorkbook {
    fn read_sheet(
        &self,
        sheet_id: &str,
        skip_rows: usize,
        row_limit: Option<usize>,
    ) -> Result<RawTable, ExtractError> {
        let grid = self.sheet_grid(sheet_id)?;
        debug!(
            "Sheet {} has {} rows, reading from row {}",
            sheet_id,
            grid.len(),
            skip_rows
        );
        Ok(RawTable::from_grid(&grid, skip_rows, row_limit))
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.borrow().sheet_names()
    }
}

/// Expand a calamine range into an absolute grid
///
/// calamine trims leading blank rows and columns from a range; the skip
/// offsets used by the readers count from the first sheet row, so the grid
/// is rebuilt from absolute coordinates with blanks filled in.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    (0..=end_row)
        .map(|row| {
            (0..=end_col)
                .map(|col| range.get_value((row, col)).map(to_cell).unwrap_or(Cell::Empty))
                .collect()
        })
        .collect()
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::Error(_) | Data::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
