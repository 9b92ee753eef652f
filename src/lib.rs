pub mod commodities;
pub mod config;
pub mod extract_error;
pub mod multi_header;
pub mod services;
pub mod sheets;
pub mod storage;
pub mod units;
pub mod utils;
pub mod workbook;
