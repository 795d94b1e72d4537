//! Application-wide constants

pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;
pub const DEFAULT_RECONCILE_INTERVAL_SECONDS: u64 = 15;
pub const DEFAULT_IMPORT_PATH: &str = "admin/Menu.xlsx";
pub const PRICE_SCALE: u32 = 2;
