use super::error::{KstatError, KstatResult};
use super::parser::KstatParser;
use super::types::{MetricValue, ParseMode, ParseSummary, StatIdentifier};
use crate::system::FilesystemReader;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const DEFAULT_PROCFS_ROOT: &str = "/proc";

/// Location of the ZFS kstat files relative to the procfs root
const KSTAT_ZFS_DIR: &str = "spl/kstat/zfs";

/// Categories exported by every ZFS on Linux module
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "arcstats",
    "zfetchstats",
    "zil",
    "vdev_cache_stats",
    "xuio_stats",
];

/// A single parsed metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KstatSample {
    pub identifier: StatIdentifier,
    pub value: MetricValue,
}

/// Outcome of one scrape over several categories
#[derive(Debug, Default)]
pub struct KstatScrape {
    pub samples: Vec<KstatSample>, // Category order, then file order
    pub failures: Vec<(String, KstatError)>,
}

impl KstatScrape {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Value of the first sample with the given identifier
    pub fn get(&self, identifier: &str) -> Option<MetricValue> {
        self.samples
            .iter()
            .find(|sample| sample.identifier == identifier)
            .map(|sample| sample.value)
    }
}

/// Reads kstat files from their fixed procfs location and parses them
#[derive(Debug, Clone)]
pub struct KstatCollector<F: FilesystemReader> {
    filesystem_reader: F,
    procfs_root: PathBuf,
    parser: KstatParser,
}

impl<F: FilesystemReader> KstatCollector<F> {
    pub fn new(filesystem_reader: F) -> Self {
        Self {
            filesystem_reader,
            procfs_root: PathBuf::from(DEFAULT_PROCFS_ROOT),
            parser: KstatParser::default(),
        }
    }

    pub fn with_procfs_root(mut self, procfs_root: impl Into<PathBuf>) -> Self {
        self.procfs_root = procfs_root.into();
        self
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.parser = KstatParser::new(mode);
        self
    }

    /// Path of the kstat file for `category`, e.g. `/proc/spl/kstat/zfs/arcstats`
    pub fn kstat_path(&self, category: &str) -> PathBuf {
        self.procfs_root.join(KSTAT_ZFS_DIR).join(category)
    }

    /// Open and parse one category, calling `emit` for every row.
    ///
    /// The file handle is dropped before returning, on success and on error.
    pub fn collect_category<E>(&self, category: &str, emit: E) -> KstatResult<ParseSummary>
    where
        E: FnMut(StatIdentifier, MetricValue),
    {
        let path = self.kstat_path(category);
        let stream = self
            .filesystem_reader
            .open(&path)
            .map_err(|e| KstatError::stream_error(category, e))?;

        debug!(category, path = %path.display(), "Reading kstat");
        self.parser.parse(stream, category, emit)
    }
}

impl<F> KstatCollector<F>
where
    F: FilesystemReader + Clone + Send + 'static,
{
    /// Parse every category on the blocking pool, one after another.
    ///
    /// A failing category is logged and recorded; the remaining categories
    /// are still collected.
    pub async fn scrape<S: AsRef<str>>(&self, categories: &[S]) -> KstatScrape {
        let mut scrape = KstatScrape::default();

        for category in categories {
            let category = category.as_ref().to_string();
            let collector = self.clone();
            let name = category.clone();

            let result = tokio::task::spawn_blocking(move || {
                let mut samples = Vec::new();
                let summary = collector.collect_category(&name, |identifier, value| {
                    samples.push(KstatSample { identifier, value })
                });
                summary.map(|_| samples)
            })
            .await
            .unwrap_or_else(|e| {
                Err(KstatError::stream_error(
                    &category,
                    io::Error::other(e.to_string()),
                ))
            });

            match result {
                Ok(samples) => scrape.samples.extend(samples),
                Err(e) => {
                    warn!(category = %category, error = %e, "Failed to collect kstat");
                    scrape.failures.push((category, e));
                }
            }
        }

        scrape
    }
}
