pub mod config;
pub mod driver;

pub use config::{ConfigError, ScanConfig, DEFAULT_UTC_OFFSET_SECS, MAX_ORB};
pub use driver::{MinuteSnapshot, ScanDriver, ScanError, ScanReport};
