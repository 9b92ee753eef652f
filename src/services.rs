pub mod commodity_service;
pub mod storage_service;

pub use commodity_service::CommodityService;
pub use storage_service::StorageService;
