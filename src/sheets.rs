// Sheet readers
//
// header_locator and hierarchy_decoder are the generic pieces; the other
// modules describe individual tables of the publication.

pub mod electricity_demand;
pub mod header_locator;
pub mod hierarchy_decoder;
pub mod renewables;
pub mod sector_tables;

pub use header_locator::{locate, ProbeRange};
pub use hierarchy_decoder::{decode, DecodedTable, HierarchicalRecord, StripRule};
pub use sector_tables::{read_sector_table, SectorLayout};
