/// Primary fuel prices from the workbook price sheet
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::merger::FuelName;
use crate::extract_error::ExtractError;
use crate::units::{convert, ConversionTable, SourceUnit, YearSeries};
use crate::utils::normalize_label;
use crate::workbook::WorkbookAccessor;

/// A price row: sheet label, target fuel and the unit the sheet reports it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub label: String,
    pub fuel: String,
    pub unit: SourceUnit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLayout {
    pub sheet: String,
    pub skip_rows: usize,
    /// Data rows `first_row..end_row` after the header hold the import prices
    pub first_row: usize,
    pub end_row: usize,
    pub unit_column: String,
    pub rows: Vec<PriceRow>,
}

impl Default for PriceLayout {
    fn default() -> Self {
        Self {
            sheet: "26".to_string(),
            skip_rows: 6,
            first_row: 4,
            end_row: 7,
            unit_column: "Einheit".to_string(),
            rows: vec![
                PriceRow {
                    label: "- Rohöl".to_string(),
                    fuel: "Oil".to_string(),
                    unit: SourceUnit::MassEquivalent {
                        unit_label: "1 Mio. t Rohöleinheit (RÖE)".to_string(),
                    },
                },
                PriceRow {
                    label: "- Erdgas".to_string(),
                    fuel: "Natural gas".to_string(),
                    unit: SourceUnit::Volume,
                },
                PriceRow {
                    label: "- Steinkohlen".to_string(),
                    fuel: "Hard coal".to_string(),
                    unit: SourceUnit::MassEquivalent {
                        unit_label: "1 Mio. t Steinkohleeinheit (SKE)".to_string(),
                    },
                },
            ],
        }
    }
}

/// Read the price rows and convert them to EUR/J
pub fn prices_from_workbook<W: WorkbookAccessor + ?Sized>(
    workbook: &W,
    layout: &PriceLayout,
    conversions: &ConversionTable,
) -> Result<BTreeMap<FuelName, YearSeries>, ExtractError> {
    let mut table = workbook.read_sheet(&layout.sheet, layout.skip_rows, None)?;
    table.drop_column(&layout.unit_column, &format!("sheet {}", layout.sheet))?;
    table.slice_rows(layout.first_row, layout.end_row);

    let year_columns = table.year_columns();
    let mut prices = BTreeMap::new();

    for price_row in &layout.rows {
        let Some(row) = table.find_row(0, &price_row.label) else {
            return Err(ExtractError::MissingRow {
                sheet: layout.sheet.clone(),
                label: normalize_label(&price_row.label),
            });
        };

        let raw: YearSeries = year_columns
            .iter()
            .filter_map(|&(col, year)| table.value(row, col).map(|v| (year, v)))
            .collect();
        debug!("{}: {} raw price years", price_row.fuel, raw.len());

        let canonical = convert(&raw, &price_row.unit, conversions)?;
        prices.insert(FuelName::new(&price_row.fuel), canonical);
    }

    for row in 0..table.row_count() {
        let label = table.label(row, 0);
        if !layout
            .rows
            .iter()
            .any(|r| normalize_label(&r.label) == label)
        {
            warn!("Unmapped price row '{}' in sheet {}", label, layout.sheet);
        }
    }

    info!("Read primary prices for {} fuels", prices.len());
    Ok(prices)
}
