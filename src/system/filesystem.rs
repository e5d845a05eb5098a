use crate::demo;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::Path;

/// Buffered stream handed out by a `FilesystemReader`
pub type KstatStream = Box<dyn BufRead + Send>;

/// Abstraction for filesystem access to enable testing without real files
pub trait FilesystemReader {
    fn open(&self, path: &Path) -> io::Result<KstatStream>;
}

/// Real filesystem reader using std::fs
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFilesystemReader;

impl FilesystemReader for RealFilesystemReader {
    fn open(&self, path: &Path) -> io::Result<KstatStream> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Demo filesystem reader that serves the bundled kstat snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoFilesystemReader;

impl DemoFilesystemReader {
    // Keyed on the file name so a custom procfs root still resolves
    fn get_demo_content(&self, path: &Path) -> Option<&'static str> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(demo::kstat_snapshot)
    }
}

impl FilesystemReader for DemoFilesystemReader {
    fn open(&self, path: &Path) -> io::Result<KstatStream> {
        match self.get_demo_content(path) {
            Some(content) => Ok(Box::new(Cursor::new(content.as_bytes()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Demo: File not mocked: {}", path.display()),
            )),
        }
    }
}
