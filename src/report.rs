use std::io::{self, Write};
use std::path::PathBuf;
use zfs_kstat::display::{Terminal, format_count, format_sample, identifier_width};
use zfs_kstat::kstat::{KstatCollector, KstatScrape, ParseMode};
use zfs_kstat::system::{DemoFilesystemReader, RealFilesystemReader};

/// What to read and how
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub categories: Vec<String>,
    pub procfs_root: PathBuf,
    pub mode: ParseMode,
    pub demo_mode: bool,
}

/// Scrape once and print the result. Returns `false` if any category failed.
pub async fn run(options: &ReportOptions) -> io::Result<bool> {
    let terminal = Terminal::new();

    let scrape = if options.demo_mode {
        collect(KstatCollector::new(DemoFilesystemReader), options).await
    } else {
        collect(KstatCollector::new(RealFilesystemReader), options).await
    };

    let mut stdout = io::stdout().lock();
    display_header(&mut stdout, &terminal, options)?;
    display_samples(&mut stdout, &terminal, &scrape)?;
    stdout.flush()?;

    display_failures(&mut io::stderr().lock(), &terminal, &scrape)?;
    Ok(scrape.is_complete())
}

async fn collect<F>(collector: KstatCollector<F>, options: &ReportOptions) -> KstatScrape
where
    F: zfs_kstat::system::FilesystemReader + Clone + Send + 'static,
{
    collector
        .with_procfs_root(&options.procfs_root)
        .with_mode(options.mode)
        .scrape(&options.categories)
        .await
}

fn display_header<W: Write>(
    out: &mut W,
    terminal: &Terminal,
    options: &ReportOptions,
) -> io::Result<()> {
    let source = if options.demo_mode {
        "demo snapshots".to_string()
    } else {
        options.procfs_root.join("spl/kstat/zfs").display().to_string()
    };

    writeln!(
        out,
        "{}",
        terminal.header_style().apply_to(format!(
            "# ZFS kstat | Source: {} | Mode: {} | Time: {}",
            source,
            options.mode,
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
        ))
    )
}

fn display_samples<W: Write>(
    out: &mut W,
    terminal: &Terminal,
    scrape: &KstatScrape,
) -> io::Result<()> {
    let width = identifier_width(&scrape.samples);
    for sample in &scrape.samples {
        writeln!(out, "{}", terminal.value_style().apply_to(format_sample(sample, width)))?;
    }
    writeln!(
        out,
        "# {} samples",
        format_count(scrape.samples.len() as u64)
    )
}

fn display_failures<W: Write>(
    out: &mut W,
    terminal: &Terminal,
    scrape: &KstatScrape,
) -> io::Result<()> {
    for (category, error) in &scrape.failures {
        writeln!(
            out,
            "{} {}: {}",
            terminal.error_style().apply_to("Error:"),
            category,
            error
        )?;
    }
    Ok(())
}
