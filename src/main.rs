mod report;

use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use zfs_kstat::kstat::collector::DEFAULT_PROCFS_ROOT;
use zfs_kstat::kstat::{DEFAULT_CATEGORIES, ParseMode};

#[derive(Parser)]
#[command(name = "zfs-kstat", about = "Dump ZFS kstat counters", version)]
struct Args {
    /// Kstat categories to read. Defaults to arcstats, zfetchstats, zil,
    /// vdev_cache_stats and xuio_stats.
    categories: Vec<String>,

    /// Path to /proc filesystem.
    #[arg(long, env = "KSTAT_PROCFS_ROOT", default_value = DEFAULT_PROCFS_ROOT)]
    root: PathBuf,

    /// Skip malformed rows instead of failing the whole category.
    #[arg(long)]
    tolerant: bool,

    /// Read bundled snapshots instead of the real filesystem.
    #[arg(long, env = "DEMO_MODE")]
    demo: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_options(self) -> report::ReportOptions {
        let categories = if self.categories.is_empty() {
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
        } else {
            self.categories
        };
        let mode = if self.tolerant {
            ParseMode::Tolerant
        } else {
            ParseMode::Strict
        };

        report::ReportOptions {
            categories,
            procfs_root: self.root,
            mode,
            demo_mode: self.demo,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    let options = args.into_options();
    match rt.block_on(report::run(&options)) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays a clean metric listing. Default level is WARN.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
