/// Merge of workbook prices with the reference cost/emission dataset
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{debug, info};

use crate::units::YearSeries;
use crate::utils::normalize_label;

/// Lower-cased fuel name used as the table key
///
/// The schema is open: any name appearing in either source becomes a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FuelName(String);

impl FuelName {
    pub fn new(name: &str) -> Self {
        Self(normalize_label(name).to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FuelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FuelName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Cost (EUR/J) and emission (g/J) for one fuel and year; either may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CommodityValue {
    pub cost: Option<f64>,
    pub emission: Option<f64>,
}

/// Fuel × year table in canonical units
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommodityTable {
    fuels: BTreeMap<FuelName, BTreeMap<i32, CommodityValue>>,
}

impl CommodityTable {
    pub fn get(&self, fuel: &str, year: i32) -> Option<CommodityValue> {
        self.fuels
            .get(&FuelName::new(fuel))
            .and_then(|years| years.get(&year))
            .copied()
    }

    pub fn cost(&self, fuel: &str, year: i32) -> Option<f64> {
        self.get(fuel, year).and_then(|v| v.cost)
    }

    pub fn emission(&self, fuel: &str, year: i32) -> Option<f64> {
        self.get(fuel, year).and_then(|v| v.emission)
    }

    pub fn fuels(&self) -> impl Iterator<Item = &FuelName> {
        self.fuels.keys()
    }

    pub fn years(&self) -> BTreeSet<i32> {
        self.fuels
            .values()
            .flat_map(|years| years.keys().copied())
            .collect()
    }

    fn cell(&mut self, fuel: &FuelName, year: i32) -> &mut CommodityValue {
        self.fuels
            .entry(fuel.clone())
            .or_default()
            .entry(year)
            .or_default()
    }
}

/// Merge settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Years every fuel row spans (primary years outside it are kept too)
    pub years: RangeInclusive<i32>,
    /// Year the fallback prices apply to
    pub reference_year: i32,
    /// Let fallback prices replace primary costs in the reference year
    pub force_secondary: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            years: 1990..=2016,
            reference_year: 2014,
            force_secondary: false,
        }
    }
}

/// Combine primary costs, secondary emissions and secondary fallback prices
///
/// 1. Primary costs seed the table.
/// 2. Emission factors (one scalar per fuel) are written to every year.
/// 3. Fallback prices fill the reference year where no primary cost exists,
///    or always when `force_secondary` is set.
pub fn merge(
    primary_costs: &BTreeMap<FuelName, YearSeries>,
    secondary_emissions: &BTreeMap<FuelName, f64>,
    secondary_fallback_prices: &BTreeMap<FuelName, f64>,
    options: &MergeOptions,
) -> CommodityTable {
    let mut table = CommodityTable::default();

    let mut years: BTreeSet<i32> = options.years.clone().collect();
    years.insert(options.reference_year);
    years.extend(primary_costs.values().flat_map(|s| s.keys().copied()));

    for (fuel, series) in primary_costs {
        for &year in &years {
            table.cell(fuel, year).cost = series.get(&year).copied();
        }
    }
    debug!("Seeded {} fuels from primary costs", primary_costs.len());

    for (fuel, &emission) in secondary_emissions {
        for &year in &years {
            table.cell(fuel, year).emission = Some(emission);
        }
    }

    let mut filled = 0usize;
    let mut forced = 0usize;
    for (fuel, &price) in secondary_fallback_prices {
        let cell = table.cell(fuel, options.reference_year);
        match cell.cost {
            None => {
                cell.cost = Some(price);
                filled += 1;
            }
            Some(_) if options.force_secondary => {
                cell.cost = Some(price);
                forced += 1;
            }
            Some(_) => {}
        }
    }
    // Fuels first seen in the fallback prices still span the whole year range
    for fuel in secondary_fallback_prices.keys() {
        for &year in &years {
            table.cell(fuel, year);
        }
    }

    info!(
        "Merged {} fuels: {} reference-year prices filled, {} overridden",
        table.fuels.len(),
        filled,
        forced
    );
    table
}
