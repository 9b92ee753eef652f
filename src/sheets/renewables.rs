/// Renewable energy production and installed capacity (sheet 20)
///
/// The sheet repeats one block per source: a heading row followed by
/// energy, capacity and share rows. Blocks are positional; heading text
/// varies between editions and is only logged.
use serde::Serialize;
use tracing::{debug, info};

use crate::extract_error::ExtractError;
use crate::units::YearSeries;
use crate::workbook::WorkbookAccessor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// GWh
    Energy,
    /// MW
    Capacity,
    /// Share of gross electricity consumption
    Fraction,
}

impl Measure {
    pub const ORDER: [Measure; 3] = [Measure::Energy, Measure::Capacity, Measure::Fraction];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenewablesLayout {
    pub sheet: String,
    pub skip_rows: usize,
    pub row_count: usize,
    pub sources: Vec<String>,
}

impl Default for RenewablesLayout {
    fn default() -> Self {
        Self {
            sheet: "20".to_string(),
            skip_rows: 22,
            row_count: 24,
            sources: ["water", "wind", "bioenergy", "biogenic waste", "solar", "geothermal"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenewableSeries {
    pub source: String,
    pub measure: Measure,
    pub values: YearSeries,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenewablesTable {
    pub series: Vec<RenewableSeries>,
}

impl RenewablesTable {
    pub fn get(&self, source: &str, measure: Measure, year: i32) -> Option<f64> {
        self.series
            .iter()
            .find(|s| s.source == source && s.measure == measure)
            .and_then(|s| s.values.get(&year).copied())
    }
}

/// Read energy, capacity and share per renewable source
pub fn re_energy_capacity<W: WorkbookAccessor + ?Sized>(
    workbook: &W,
    layout: &RenewablesLayout,
) -> Result<RenewablesTable, ExtractError> {
    let table = workbook.read_sheet(&layout.sheet, layout.skip_rows, Some(layout.row_count))?;
    let year_columns = table.year_columns();
    let block = Measure::ORDER.len() + 1;

    let expected_rows = layout.sources.len() * block;
    if table.row_count() < expected_rows {
        return Err(ExtractError::InvalidData {
            source_name: format!("sheet {}", layout.sheet),
            row: table.row_count(),
            msg: format!("expected {expected_rows} rows for {} sources", layout.sources.len()),
        });
    }

    let mut series = Vec::with_capacity(layout.sources.len() * Measure::ORDER.len());
    for (block_idx, source) in layout.sources.iter().enumerate() {
        debug!("Block '{}' heading: {}", source, table.label(block_idx * block, 0));
        for (offset, measure) in Measure::ORDER.into_iter().enumerate() {
            let row = block_idx * block + 1 + offset;
            let values = year_columns
                .iter()
                .filter_map(|&(col, year)| table.value(row, col).map(|v| (year, v)))
                .collect();
            series.push(RenewableSeries {
                source: source.clone(),
                measure,
                values,
            });
        }
    }

    info!("Read {} renewable series from sheet {}", series.len(), layout.sheet);
    Ok(RenewablesTable { series })
}
