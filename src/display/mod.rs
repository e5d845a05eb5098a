//! Display module for terminal output and formatting

pub mod formatter;
pub mod terminal;

// Re-export commonly used items
pub use formatter::{format_count, format_sample, identifier_width};
pub use terminal::Terminal;
