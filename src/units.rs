// Unit conversion to canonical per-joule units
//
// Prices in the workbook come per tonne of oil or coal equivalent (mass),
// per volume-derived unit for gas, or as plain shares. Everything leaving
// this module is in EUR/J (prices) or g/J (emissions).

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::extract_error::ExtractError;
use crate::utils::normalize_label;
use crate::workbook::WorkbookAccessor;

/// Year → value
pub type YearSeries = BTreeMap<i32, f64>;

const JOULE_PER_PETAJOULE: f64 = 1.0e15;
const TONNES_PER_MIO_TONNES: f64 = 1.0e6;

/// Gas prices are published per TJ-equivalent; one division reaches EUR/J
pub const VOLUME_DIVISOR: f64 = 1.0e12;

/// Reference dataset prices are in EUR/GJ
pub const REFERENCE_PRICE_DIVISOR: f64 = 1.0e9;

/// Reference dataset emission factors are in g/kJ
pub const REFERENCE_EMISSION_DIVISOR: f64 = 1.0e3;

/// Energy content of one unit of a mass-equivalent commodity, in PJ per Mio. t
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionFactor {
    pub label: String,
    pub petajoule_per_mio_tonnes: f64,
}

impl ConversionFactor {
    /// Factor for `label`; `None` unless the value is finite and positive
    pub fn new(label: &str, petajoule_per_mio_tonnes: f64) -> Option<Self> {
        if petajoule_per_mio_tonnes.is_finite() && petajoule_per_mio_tonnes > 0.0 {
            Some(Self {
                label: normalize_label(label),
                petajoule_per_mio_tonnes,
            })
        } else {
            None
        }
    }

    /// Joule per tonne
    fn joule_per_tonne(&self) -> f64 {
        self.petajoule_per_mio_tonnes * JOULE_PER_PETAJOULE / TONNES_PER_MIO_TONNES
    }
}

/// Conversion factors keyed by normalized unit label
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversionTable {
    factors: BTreeMap<String, ConversionFactor>,
}

impl ConversionTable {
    pub fn insert(&mut self, factor: ConversionFactor) -> Option<ConversionFactor> {
        self.factors.insert(factor.label.clone(), factor)
    }

    /// Exact match on the normalized label; substrings never match
    pub fn get(&self, unit_label: &str) -> Result<&ConversionFactor, ExtractError> {
        let key = normalize_label(unit_label);
        self.factors
            .get(&key)
            .ok_or(ExtractError::UnknownUnit(key))
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(String::as_str)
    }
}

impl FromIterator<ConversionFactor> for ConversionTable {
    fn from_iter<I: IntoIterator<Item = ConversionFactor>>(iter: I) -> Self {
        let mut table = ConversionTable::default();
        for factor in iter {
            table.insert(factor);
        }
        table
    }
}

/// Where the conversion sub-table lives in the workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRegion {
    pub sheet: String,
    pub skip_rows: usize,
    pub row_count: usize,
    /// Column removed before reading (blank spacer column)
    pub drop_column: String,
    /// Data rows skipped after the header (a sub-header row)
    pub skip_leading_rows: usize,
    /// Header of the column holding PJ per Mio. t
    pub energy_column: String,
}

impl Default for ConversionRegion {
    fn default() -> Self {
        Self {
            sheet: "0.2".to_string(),
            skip_rows: 6,
            row_count: 6,
            drop_column: "Unnamed: 1".to_string(),
            skip_leading_rows: 1,
            energy_column: "PJ".to_string(),
        }
    }
}

/// How a source series is scaled to canonical units
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUnit {
    /// Currency per tonne of a reference fuel; needs the factor for `unit_label`
    MassEquivalent { unit_label: String },
    /// Currency per volume-derived unit; fixed power-of-ten divisor
    Volume,
    /// Shares and fractions, copied unchanged
    Dimensionless,
}

/// Read the conversion factors from the workbook
pub fn build_conversion_table<W: WorkbookAccessor + ?Sized>(
    workbook: &W,
    region: &ConversionRegion,
) -> Result<ConversionTable, ExtractError> {
    let mut raw = workbook.read_sheet(&region.sheet, region.skip_rows, Some(region.row_count))?;
    let source_name = format!("sheet {}", region.sheet);

    raw.drop_column(&region.drop_column, &source_name)?;
    raw.slice_rows(region.skip_leading_rows, raw.row_count());

    let energy_col = raw
        .column_index(&region.energy_column)
        .ok_or_else(|| ExtractError::MissingColumn {
            source_name: source_name.clone(),
            column: region.energy_column.clone(),
        })?;

    let mut table = ConversionTable::default();
    for row in 0..raw.row_count() {
        let label = raw.label(row, 0);
        if label.is_empty() {
            continue;
        }
        match raw.value(row, energy_col).and_then(|v| ConversionFactor::new(&label, v)) {
            Some(factor) => {
                debug!("Conversion factor {} = {} PJ", factor.label, factor.petajoule_per_mio_tonnes);
                if table.insert(factor).is_some() {
                    warn!("Conversion label '{}' appears twice, keeping the later row", label);
                }
            }
            None => warn!("Skipping conversion row '{}': no positive PJ value", label),
        }
    }

    info!("Read {} conversion factors from {}", table.len(), source_name);
    Ok(table)
}

/// Convert one value to canonical units
pub fn convert_value(
    value: f64,
    unit: &SourceUnit,
    table: &ConversionTable,
) -> Result<f64, ExtractError> {
    match unit {
        SourceUnit::MassEquivalent { unit_label } => {
            let factor = table.get(unit_label)?;
            Ok(value / factor.joule_per_tonne())
        }
        SourceUnit::Volume => Ok(value / VOLUME_DIVISOR),
        SourceUnit::Dimensionless => Ok(value),
    }
}

/// Inverse of [`convert_value`]: canonical units back to the source unit
pub fn to_source_value(
    canonical: f64,
    unit: &SourceUnit,
    table: &ConversionTable,
) -> Result<f64, ExtractError> {
    match unit {
        SourceUnit::MassEquivalent { unit_label } => {
            let factor = table.get(unit_label)?;
            Ok(canonical * factor.joule_per_tonne())
        }
        SourceUnit::Volume => Ok(canonical * VOLUME_DIVISOR),
        SourceUnit::Dimensionless => Ok(canonical),
    }
}

/// Convert a whole series; an unknown mass-equivalent unit fails before any value is produced
pub fn convert(
    series: &YearSeries,
    unit: &SourceUnit,
    table: &ConversionTable,
) -> Result<YearSeries, ExtractError> {
    if let SourceUnit::MassEquivalent { unit_label } = unit {
        table.get(unit_label)?;
    }
    series
        .iter()
        .map(|(&year, &value)| convert_value(value, unit, table).map(|v| (year, v)))
        .collect()
}

/// Reference dataset price (EUR/GJ) to EUR/J
pub fn reference_price_to_canonical(value: f64) -> f64 {
    value / REFERENCE_PRICE_DIVISOR
}

/// Reference dataset emission factor (g/kJ) to g/J
pub fn reference_emission_to_canonical(value: f64) -> f64 {
    value / REFERENCE_EMISSION_DIVISOR
}
