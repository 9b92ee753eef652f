/// Pumped hydro storage inventory
///
/// Two-row-header CSV combining three sources: `dena` (pump and turbine
/// capacity in MW, round-trip efficiency), `Wikipedia` (coordinates) and
/// `ZFES` (name, energy capacity in MWh).
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::aggregator::RegionId;
use crate::extract_error::ExtractError;
use crate::multi_header::MultiHeaderCsv;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    pub name: String,
    /// MW
    pub pump: f64,
    /// MW
    pub turbine: f64,
    /// Round-trip efficiency as published; may be missing or out of range
    pub efficiency: Option<f64>,
    /// MWh
    pub energy: Option<f64>,
    pub location: Point,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacilityInventory {
    pub facilities: Vec<Facility>,
}

impl FacilityInventory {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        info!("Reading storage inventory: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Parse the inventory; rows without coordinates are dropped
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, ExtractError> {
        let csv = MultiHeaderCsv::from_reader(reader, 0, source_name)?;

        let pump_col = csv.require_column("dena", "pump")?;
        let turbine_col = csv.require_column("dena", "turbine")?;
        let efficiency_col = csv.require_column("dena", "efficiency")?;
        let lon_col = csv.require_column("Wikipedia", "longitude")?;
        let lat_col = csv.require_column("Wikipedia", "latitude")?;
        let energy_col = csv.require_column("ZFES", "energy")?;
        let name_col = csv.require_column("ZFES", "name")?;

        let mut facilities = Vec::new();
        for row in 0..csv.row_count() {
            let (Some(longitude), Some(latitude)) =
                (csv.number(row, lon_col)?, csv.number(row, lat_col)?)
            else {
                debug!("{}: row {} has no coordinates, dropped", source_name, row);
                continue;
            };

            facilities.push(Facility {
                name: csv
                    .text(row, name_col)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("row {row}")),
                pump: csv.number(row, pump_col)?.unwrap_or(0.0),
                turbine: csv.number(row, turbine_col)?.unwrap_or(0.0),
                efficiency: csv.number(row, efficiency_col)?,
                energy: csv.number(row, energy_col)?,
                location: Point {
                    longitude,
                    latitude,
                },
            });
        }

        info!(
            "Read {} facilities with coordinates from {} rows",
            facilities.len(),
            csv.row_count()
        );
        Ok(Self { facilities })
    }
}

#[derive(Debug, Deserialize)]
struct AssignmentRow {
    facility: String,
    region: String,
}

/// Facility name → region, as produced by an external spatial join
pub fn read_region_assignments<R: Read>(reader: R) -> Result<HashMap<String, RegionId>, ExtractError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut assignments = HashMap::new();
    for record in csv_reader.deserialize() {
        let row: AssignmentRow = record?;
        assignments.insert(row.facility.trim().to_string(), RegionId::new(row.region.trim()));
    }
    debug!("Read {} region assignments", assignments.len());
    Ok(assignments)
}
