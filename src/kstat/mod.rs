//! ZFS kstat parsing and collection

pub mod collector;
pub mod error;
pub mod parser;
pub mod types;


// Re-export commonly used items
pub use collector::{DEFAULT_CATEGORIES, KstatCollector, KstatSample, KstatScrape};
pub use error::{KstatError, KstatResult};
pub use parser::{KstatParser, KstatRows, parse_procfs_file};
pub use types::{KstatRow, MetricValue, ParseMode, ParseSummary, StatIdentifier};
