/// Gross electricity consumption (sheet 21)
use tracing::debug;

use crate::extract_error::ExtractError;
use crate::workbook::WorkbookAccessor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandLayout {
    pub sheet: String,
    pub skip_rows: usize,
    /// Label of the total row
    pub total_label: String,
}

impl Default for DemandLayout {
    fn default() -> Self {
        Self {
            sheet: "21".to_string(),
            skip_rows: 7,
            total_label: "zusammen".to_string(),
        }
    }
}

/// Annual electricity demand in TWh, `None` when the year is not in the sheet
pub fn annual_electricity_demand<W: WorkbookAccessor + ?Sized>(
    workbook: &W,
    layout: &DemandLayout,
    year: i32,
) -> Result<Option<f64>, ExtractError> {
    let table = workbook.read_sheet(&layout.sheet, layout.skip_rows, None)?;

    let row = table
        .find_row(0, &layout.total_label)
        .ok_or_else(|| ExtractError::MissingRow {
            sheet: layout.sheet.clone(),
            label: layout.total_label.clone(),
        })?;

    let Some(col) = table
        .year_columns()
        .into_iter()
        .find_map(|(col, y)| (y == year).then_some(col))
    else {
        debug!("Year {} not in sheet {}", year, layout.sheet);
        return Ok(None);
    };

    Ok(table.value(row, col))
}
