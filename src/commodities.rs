// Commodity sources: fuel costs and emission factors in canonical units

pub mod merger;
pub mod prices;
pub mod reference;

pub use merger::{merge, CommodityTable, CommodityValue, FuelName, MergeOptions};
pub use prices::{prices_from_workbook, PriceLayout, PriceRow};
pub use reference::{ReferenceDataset, ReferenceFuel};
