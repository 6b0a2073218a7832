use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::archive;
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::export::{ExportRequest, Exporter};
use crate::processors::{IngestOptions, IngestPipeline, IngestReport};
use crate::queries::{self, SiteQuery};
use crate::store::{BoundingBox, MeasurementStore, MemoryStore};
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Ingest {
            source_dir,
            url,
            skip_download,
            max_workers,
            use_mmap,
            log_dir,
        } => {
            if !skip_download {
                archive::ensure_source_data(&url, &source_dir).await?;
            }

            let store = MemoryStore::new();
            let options = IngestOptions {
                max_workers,
                use_mmap,
                log_dir,
            };
            let report = ingest(&store, &source_dir, options)?;
            print_report(&report);
        }

        Commands::Export {
            request,
            output_dir,
            source_dir,
            max_workers,
        } => {
            let body = fs::read_to_string(&request)?;
            let request = ExportRequest::from_json(&body)?;

            // The reference backend is in-memory, so exports replay the
            // (idempotent) ingest over the local source tree first.
            let store = MemoryStore::new();
            ingest(
                &store,
                &source_dir,
                IngestOptions {
                    max_workers,
                    ..Default::default()
                },
            )?;

            let exporter = Exporter::new(&store, source_dir);
            let path = exporter.export_to_file(&request, &output_dir)?;
            println!("Export archive written to {}", path.display());
        }

        Commands::Sites {
            source_dir,
            start_date,
            end_date,
            min_lat,
            min_lng,
            max_lat,
            max_lng,
            max_workers,
        } => {
            let store = MemoryStore::new();
            ingest(
                &store,
                &source_dir,
                IngestOptions {
                    max_workers,
                    ..Default::default()
                },
            )?;

            let query = SiteQuery {
                bounds: BoundingBox::from_bounds(min_lat, min_lng, max_lat, max_lng),
                start_date,
                end_date,
            };
            let sites = queries::list_sites(&store, &query)?;
            println!("{}", serde_json::to_string_pretty(&sites)?);
        }
    }

    Ok(())
}

fn ingest(
    store: &dyn MeasurementStore,
    source_dir: &Path,
    options: IngestOptions,
) -> Result<IngestReport> {
    let progress = ProgressReporter::new_spinner("Processing archive files...", false);
    let pipeline = IngestPipeline::new(store, options);
    let report = pipeline.run(source_dir, Some(&progress))?;
    progress.finish_with_message(&format!(
        "Loaded {} records ({} already present)",
        report.total_inserted(),
        report.total_skipped()
    ));
    Ok(report)
}

fn print_report(report: &IngestReport) {
    println!("Files discovered: {}", report.files_discovered);
    println!("Files loaded:     {}", report.files_loaded);
    println!("Sites created:    {}", report.sites_created);
    println!("Headers captured: {}", report.headers_registered);
    println!("Rows skipped:     {}", report.rows_skipped);

    let mut summaries: Vec<_> = report.load_summaries.iter().collect();
    summaries.sort_by_key(|(variant, _)| format!("{variant}"));
    for (variant, summary) in summaries {
        println!("  {variant}: {summary}");
    }

    if !report.failures.is_empty() {
        println!("Failures:         {}", report.failures.len());
        if let Some(log) = &report.log_file {
            println!("Failure log:      {}", log.display());
        }
    }
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
    Ok(())
}
