/// Regional aggregation of storage facilities
///
/// Each facility's round-trip efficiency e is split into equal pump and
/// turbine efficiencies sqrt(e). Capacities are summed per region, and the
/// regional pump (turbine) efficiency is the capacity-weighted mean of the
/// facility values: sum(sqrt(e) * p) / sum(p) over rated facilities.
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, info, warn};

use super::inventory::Facility;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Facility → region assignment (the spatial join itself lives elsewhere)
pub trait RegionOf {
    fn region_of(&self, facility: &Facility) -> Option<RegionId>;
}

impl<F> RegionOf for F
where
    F: Fn(&Facility) -> Option<RegionId>,
{
    fn region_of(&self, facility: &Facility) -> Option<RegionId> {
        self(facility)
    }
}

/// Assignment by facility name
impl RegionOf for HashMap<String, RegionId> {
    fn region_of(&self, facility: &Facility) -> Option<RegionId> {
        self.get(&facility.name).cloned()
    }
}

/// Treatment of facilities without a usable efficiency
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MissingEfficiency {
    /// Capacity counts toward the regional sums but not toward the efficiency
    #[default]
    CountCapacity,
    /// Facility is left out of both sums
    Exclude,
    /// Use a fixed round-trip efficiency instead; must lie in (0, 1]
    Fill(f64),
}

impl MissingEfficiency {
    /// `Fill(efficiency)`, or `None` when the value is outside (0, 1]
    pub fn fill(efficiency: f64) -> Option<Self> {
        valid_efficiency(efficiency).then_some(MissingEfficiency::Fill(efficiency))
    }

    /// Replace an out-of-range `Fill` with `CountCapacity`
    fn checked(self) -> Self {
        match self {
            MissingEfficiency::Fill(e) if !valid_efficiency(e) => {
                warn!("Fill efficiency {} outside (0, 1], counting capacity only", e);
                MissingEfficiency::CountCapacity
            }
            other => other,
        }
    }
}

fn valid_efficiency(e: f64) -> bool {
    e > 0.0 && e <= 1.0
}

/// Per-region sums; efficiencies are `None` where no rated capacity exists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAggregate {
    /// MW
    pub pump: f64,
    /// MW
    pub turbine: f64,
    /// MWh
    pub energy: f64,
    pub pump_efficiency: Option<f64>,
    pub turbine_efficiency: Option<f64>,
    pub facility_count: usize,
}

#[derive(Debug, Default)]
struct Accumulator {
    pump: f64,
    turbine: f64,
    energy: f64,
    rated_pump: f64,
    rated_turbine: f64,
    weighted_pump: f64,
    weighted_turbine: f64,
    facility_count: usize,
}

impl Accumulator {
    fn finish(self) -> RegionAggregate {
        RegionAggregate {
            pump: self.pump,
            turbine: self.turbine,
            energy: self.energy,
            pump_efficiency: ratio(self.weighted_pump, self.rated_pump),
            turbine_efficiency: ratio(self.weighted_turbine, self.rated_turbine),
            facility_count: self.facility_count,
        }
    }
}

fn ratio(weighted: f64, capacity: f64) -> Option<f64> {
    let value = weighted / capacity;
    value.is_finite().then_some(value)
}

/// Efficiency in (0, 1], anything else reads as missing
fn usable_efficiency(facility: &Facility) -> Option<f64> {
    match facility.efficiency {
        Some(e) if valid_efficiency(e) => Some(e),
        Some(e) => {
            warn!("Facility '{}' has efficiency {} outside (0, 1], treated as missing", facility.name, e);
            None
        }
        None => None,
    }
}

/// Group facilities by region and recombine their efficiencies
///
/// Facilities without energy capacity or without a region are skipped.
pub fn aggregate<R: RegionOf + ?Sized>(
    facilities: &[Facility],
    region_of: &R,
    missing: MissingEfficiency,
) -> BTreeMap<RegionId, RegionAggregate> {
    let missing = missing.checked();
    let mut regions: BTreeMap<RegionId, Accumulator> = BTreeMap::new();
    let mut skipped = 0usize;

    for facility in facilities {
        let Some(energy) = facility.energy else {
            debug!("Facility '{}' has no energy capacity, skipped", facility.name);
            skipped += 1;
            continue;
        };
        let Some(region) = region_of.region_of(facility) else {
            debug!("Facility '{}' is outside all regions, skipped", facility.name);
            skipped += 1;
            continue;
        };

        let efficiency = match (usable_efficiency(facility), missing) {
            (Some(e), _) => Some(e),
            (None, MissingEfficiency::Fill(e)) => Some(e),
            (None, MissingEfficiency::CountCapacity) => None,
            (None, MissingEfficiency::Exclude) => {
                debug!("Facility '{}' has no efficiency, excluded", facility.name);
                skipped += 1;
                continue;
            }
        };

        let acc = regions.entry(region).or_default();
        acc.pump += facility.pump;
        acc.turbine += facility.turbine;
        acc.energy += energy;
        acc.facility_count += 1;

        if let Some(e) = efficiency {
            let split = e.sqrt();
            acc.rated_pump += facility.pump;
            acc.rated_turbine += facility.turbine;
            acc.weighted_pump += split * facility.pump;
            acc.weighted_turbine += split * facility.turbine;
        }
    }

    info!(
        "Aggregated {} facilities into {} regions ({} skipped)",
        facilities.len() - skipped,
        regions.len(),
        skipped
    );

    regions
        .into_iter()
        .map(|(region, acc)| (region, acc.finish()))
        .collect()
}
