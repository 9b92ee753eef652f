use std::env;
use std::path::PathBuf;

use crate::commodities::{MergeOptions, PriceLayout};
use crate::sheets::electricity_demand::DemandLayout;
use crate::sheets::renewables::RenewablesLayout;
use crate::sheets::SectorLayout;
use crate::storage::MissingEfficiency;
use crate::units::ConversionRegion;

#[derive(Debug, Clone)]
pub struct Config {
    pub workbook_path: PathBuf,
    pub reference_dataset_path: PathBuf,
    pub hydro_storage_path: PathBuf,
    pub header_probe_limit: usize,
    pub default_storage_efficiency: Option<f64>,
    pub layouts: SheetLayouts,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            workbook_path: env::var("ENERGY_WORKBOOK")?.into(),
            reference_dataset_path: env::var("REFERENCE_DATASET")
                .unwrap_or_else(|_| "data/znes_costs_emissions.csv".to_string())
                .into(),
            hydro_storage_path: env::var("HYDRO_STORAGE_FILE")
                .unwrap_or_else(|_| "data/pumped_hydro_storage.csv".to_string())
                .into(),
            header_probe_limit: env::var("HEADER_PROBE_LIMIT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            default_storage_efficiency: env::var("DEFAULT_STORAGE_EFFICIENCY")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|e| *e > 0.0 && *e <= 1.0),
            layouts: SheetLayouts::default(),
        })
    }

    /// Policy for facilities without a usable efficiency
    pub fn missing_efficiency(&self) -> MissingEfficiency {
        self.default_storage_efficiency
            .and_then(MissingEfficiency::fill)
            .unwrap_or_default()
    }
}

/// Fixed positions of the tables in the known workbook edition
#[derive(Debug, Clone, Default)]
pub struct SheetLayouts {
    pub sectors: SectorLayout,
    pub conversion: ConversionRegion,
    pub prices: PriceLayout,
    pub renewables: RenewablesLayout,
    pub demand: DemandLayout,
    pub merge: MergeOptions,
}
