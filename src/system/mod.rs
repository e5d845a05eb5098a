//! System interface abstractions for testing and development

pub mod filesystem;

// Re-export commonly used items
pub use filesystem::{DemoFilesystemReader, FilesystemReader, KstatStream, RealFilesystemReader};
