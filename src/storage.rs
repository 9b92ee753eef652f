// Pumped hydro storage: facility inventory and regional aggregation

pub mod aggregator;
pub mod inventory;

pub use aggregator::{aggregate, MissingEfficiency, RegionAggregate, RegionId, RegionOf};
pub use inventory::{read_region_assignments, Facility, FacilityInventory, Point};
