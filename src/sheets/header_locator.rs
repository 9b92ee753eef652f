/// Header row search for sheets whose layout shifts between editions
///
/// The publisher adds and removes explanatory rows above the tables from one
/// edition to the next, so the header offset cannot be hard-coded. The
/// locator re-reads the sheet at increasing skip counts until the parsed
/// header contains a known column (usually a year).
use tracing::{debug, info};

use crate::extract_error::ExtractError;
use crate::workbook::{RawTable, WorkbookAccessor};

/// Bounded range of skip counts to probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeRange {
    /// First skip count tried
    pub min_skip: usize,
    /// Number of offsets tried before giving up (at least one)
    pub max_probe_rows: usize,
}

impl ProbeRange {
    pub fn new(min_skip: usize, max_probe_rows: usize) -> Self {
        Self {
            min_skip,
            max_probe_rows,
        }
    }

    fn last_skip(&self) -> usize {
        self.min_skip
            .saturating_add(self.max_probe_rows.saturating_sub(1))
    }
}

impl Default for ProbeRange {
    fn default() -> Self {
        Self::new(5, 20)
    }
}

/// Return the table read at the smallest skip count whose header contains `required_column`
///
/// Fails with `HeaderNotFound` once the probe budget is spent or the sheet
/// runs out of rows; a missing sheet surfaces as `SheetNotFound` on the
/// first probe.
pub fn locate<W: WorkbookAccessor + ?Sized>(
    workbook: &W,
    sheet_id: &str,
    required_column: &str,
    probe: ProbeRange,
) -> Result<RawTable, ExtractError> {
    let not_found = |last_skip: usize| ExtractError::HeaderNotFound {
        sheet: sheet_id.to_string(),
        column: required_column.to_string(),
        first_skip: probe.min_skip,
        last_skip,
    };

    if probe.max_probe_rows == 0 {
        return Err(not_found(probe.min_skip));
    }

    let skips = (0..probe.max_probe_rows).map_while(|step| probe.min_skip.checked_add(step));
    for skip in skips {
        let table = workbook.read_sheet(sheet_id, skip, None)?;

        if table.is_empty() {
            debug!("Sheet {} exhausted at skip {}", sheet_id, skip);
            return Err(not_found(skip));
        }

        if table.has_column(required_column) {
            info!(
                "Found header '{}' in sheet {} at skip {}",
                required_column, sheet_id, skip
            );
            return Ok(table);
        }
    }

    Err(not_found(probe.last_skip()))
}
