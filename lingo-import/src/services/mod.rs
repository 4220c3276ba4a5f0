//! Import pipeline services
//!
//! Planner, discoverer and importer are independent; the runner drives them
//! in sequence.

pub mod cache_cleaner;
pub mod file_discoverer;
pub mod import_runner;
pub mod location_planner;
pub mod merge_importer;

pub use cache_cleaner::CacheCleaner;
pub use file_discoverer::{Discovery, DiscoveryError, FileDiscoverer};
pub use import_runner::ImportRunner;
pub use location_planner::LocationPlanner;
pub use merge_importer::{decide, MergeDecision, MergeImporter};
