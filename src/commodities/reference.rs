/// Reference cost/emission dataset reader
///
/// CSV layout: one title line, then a two-row header. The first column is
/// the fuel name; `fuel price/value` is in EUR/GJ and `emission/value` in
/// g/kJ.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use super::merger::FuelName;
use crate::extract_error::ExtractError;
use crate::multi_header::MultiHeaderCsv;
use crate::units::{reference_emission_to_canonical, reference_price_to_canonical};

const PRICE_COLUMN: (&str, &str) = ("fuel price", "value");
const EMISSION_COLUMN: (&str, &str) = ("emission", "value");

/// One fuel row in raw dataset units
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFuel {
    pub name: String,
    /// EUR/GJ
    pub fuel_price: Option<f64>,
    /// g/kJ
    pub emission: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceDataset {
    pub fuels: Vec<ReferenceFuel>,
}

impl ReferenceDataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        info!("Reading reference dataset: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, &path.display().to_string())
    }

    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, ExtractError> {
        let csv = MultiHeaderCsv::from_reader(reader, 1, source_name)?;
        let price_col = csv.require_column(PRICE_COLUMN.0, PRICE_COLUMN.1)?;
        let emission_col = csv.require_column(EMISSION_COLUMN.0, EMISSION_COLUMN.1)?;

        let mut fuels = Vec::with_capacity(csv.row_count());
        for row in 0..csv.row_count() {
            let Some(name) = csv.text(row, 0) else {
                warn!("{}: row {} has no fuel name, skipping", source_name, row);
                continue;
            };
            fuels.push(ReferenceFuel {
                name: name.to_string(),
                fuel_price: csv.number(row, price_col)?,
                emission: csv.number(row, emission_col)?,
            });
        }

        info!("Read {} fuels from {}", fuels.len(), source_name);
        Ok(Self { fuels })
    }

    /// Emission factors in g/J
    pub fn emissions(&self) -> BTreeMap<FuelName, f64> {
        self.fuels
            .iter()
            .filter_map(|f| {
                f.emission
                    .map(|e| (FuelName::new(&f.name), reference_emission_to_canonical(e)))
            })
            .collect()
    }

    /// Fallback prices in EUR/J
    pub fn fallback_prices(&self) -> BTreeMap<FuelName, f64> {
        self.fuels
            .iter()
            .filter_map(|f| {
                f.fuel_price
                    .map(|p| (FuelName::new(&f.name), reference_price_to_canonical(p)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Kosten und Emissionen, Stand 2014
,fuel price,fuel price,emission,emission
fuel,value,unit,value,unit
Lignite,1.5,EUR/GJ,0.111,g/kJ
Natural gas,6.5,EUR/GJ,0.0561,g/kJ
Uranium,3.0,EUR/GJ,,g/kJ
";

    #[test]
    fn test_reads_rows() {
        let data = ReferenceDataset::from_reader(SAMPLE.as_bytes(), "znes").unwrap();
        assert_eq!(data.fuels.len(), 3);
        assert_eq!(data.fuels[2].emission, None);
        assert_eq!(data.fuels[1].fuel_price, Some(6.5));
    }

    #[test]
    fn test_canonical_maps() {
        let data = ReferenceDataset::from_reader(SAMPLE.as_bytes(), "znes").unwrap();
        let emissions = data.emissions();
        assert_eq!(emissions.len(), 2);
        let gas = emissions[&FuelName::new("natural gas")];
        assert!((gas - 5.61e-5).abs() < 1.0e-15);

        let prices = data.fallback_prices();
        assert!((prices[&FuelName::new("uranium")] - 3.0e-9).abs() < 1.0e-20);
    }

    #[test]
    fn test_missing_emission_column() {
        let data = "title\n,fuel price\nfuel,value\nOil,9.0\n";
        let err = ReferenceDataset::from_reader(data.as_bytes(), "znes").unwrap_err();
        assert!(matches!(err, ExtractError::MissingColumn { .. }));
    }
}
