use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument};

use crate::extract_error::ExtractError;
use crate::storage::{aggregate, FacilityInventory, MissingEfficiency, RegionAggregate, RegionId, RegionOf};

/// Pumped hydro storage per region
pub struct StorageService {
    missing_efficiency: MissingEfficiency,
}

impl StorageService {
    pub fn new(missing_efficiency: MissingEfficiency) -> Self {
        Self { missing_efficiency }
    }

    /// Aggregate an already loaded inventory
    pub fn pumped_hydro_storage<R: RegionOf + ?Sized>(
        &self,
        inventory: &FacilityInventory,
        region_of: &R,
    ) -> BTreeMap<RegionId, RegionAggregate> {
        aggregate(&inventory.facilities, region_of, self.missing_efficiency)
    }

    /// Read the inventory file and aggregate it
    #[instrument(skip(self, region_of))]
    pub fn pumped_hydro_storage_from_path<R: RegionOf + ?Sized>(
        &self,
        path: &Path,
        region_of: &R,
    ) -> Result<BTreeMap<RegionId, RegionAggregate>, ExtractError> {
        let inventory = FacilityInventory::from_path(path)?;
        let regions = self.pumped_hydro_storage(&inventory, region_of);
        let turbine: f64 = regions.values().map(|r| r.turbine).sum();
        info!("Total turbine capacity {:.0} MW in {} regions", turbine, regions.len());
        Ok(regions)
    }
}
