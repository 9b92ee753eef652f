/// Final energy consumption by sector and application (sheets 7a and 7b)
use tracing::info;

use super::header_locator::{locate, ProbeRange};
use super::hierarchy_decoder::{decode, DecodedTable, StripRule};
use crate::extract_error::ExtractError;
use crate::workbook::WorkbookAccessor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorLayout {
    /// Column whose presence marks the header row
    pub required_column: String,
    pub min_skip: usize,
    pub category_sentinel: String,
    pub strip_rules: Vec<StripRule>,
}

impl Default for SectorLayout {
    fn default() -> Self {
        Self {
            required_column: "2014".to_string(),
            min_skip: 5,
            category_sentinel: "Endenergie".to_string(),
            strip_rules: vec![
                StripRule::remove("nach Anwendungsbereichen "),
                StripRule::remove("Endenergieverbrauch in der "),
                StripRule::remove("Endenergieverbrauch im "),
                StripRule::remove("Endenergieverbrauch in den "),
                StripRule::remove("Sektor "),
                StripRule::new("privaten Haushalten", "private Haushalte"),
            ],
        }
    }
}

/// Locate the header of `sheet_id` and decode its sector hierarchy
pub fn read_sector_table<W: WorkbookAccessor + ?Sized>(
    workbook: &W,
    sheet_id: &str,
    layout: &SectorLayout,
    max_probe_rows: usize,
) -> Result<DecodedTable, ExtractError> {
    info!("Reading sector table from sheet {}", sheet_id);
    let probe = ProbeRange::new(layout.min_skip, max_probe_rows);
    let table = locate(workbook, sheet_id, &layout.required_column, probe)?;
    decode(table, &layout.category_sentinel, &layout.strip_rules)
}
