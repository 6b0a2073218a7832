use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{CanonicalMeasurement, DatasetVariant, HeaderRecord, Site};
use crate::processors::header_registry::{build_header_record, HeaderRegistry};
use crate::processors::loader::{BulkLoader, LoadSummary};
use crate::processors::normalizer::{NormalizedFile, RecordNormalizer};
use crate::readers::RawFileReader;
use crate::store::MeasurementStore;
use crate::utils::constants::POLICY_FILES;
use crate::utils::filename::ingest_log_filename;
use crate::utils::progress::ProgressReporter;

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub max_workers: usize,
    pub use_mmap: bool,
    /// Where the per-run failure log lands; current directory when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_workers: num_cpus::get(),
            use_mmap: false,
            log_dir: None,
        }
    }
}

/// One contained failure, with whatever context survived to the point of
/// failure; written to the per-run log for manual reprocessing.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file: String,
    pub cruise: Option<String>,
    pub header_snapshot: Option<String>,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub files_discovered: usize,
    pub files_loaded: usize,
    pub rows_skipped: usize,
    pub sites_created: usize,
    pub headers_registered: usize,
    pub failures: Vec<FileFailure>,
    pub load_summaries: HashMap<DatasetVariant, LoadSummary>,
    pub log_file: Option<PathBuf>,
}

impl IngestReport {
    pub fn total_inserted(&self) -> usize {
        self.load_summaries.values().map(|s| s.inserted).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.load_summaries.values().map(|s| s.skipped).sum()
    }
}

struct ParsedFile {
    file_name: String,
    header_record: HeaderRecord,
    normalized: NormalizedFile,
}

enum FileOutcome {
    Parsed(Box<ParsedFile>),
    Failed(FileFailure),
}

/// Batch ingestion driver: parallel per-file parse + normalize, first-wins
/// header registration, then per-variant loads with a single writer per
/// variant. Workers return per-file outcomes that the driver reduces; no
/// shared mutable counters.
pub struct IngestPipeline<'a> {
    store: &'a dyn MeasurementStore,
    options: IngestOptions,
}

impl<'a> IngestPipeline<'a> {
    pub fn new(store: &'a dyn MeasurementStore, options: IngestOptions) -> Self {
        Self { store, options }
    }

    pub fn run(
        &self,
        source_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<IngestReport> {
        let files = discover_data_files(source_dir)?;
        info!(count = files.len(), dir = %source_dir.display(), "discovered archive files");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.max_workers)
            .build()
            .map_err(|e| ProcessingError::InvalidFormat(e.to_string()))?;

        let reader = RawFileReader::with_mmap(self.options.use_mmap);
        let normalizer = RecordNormalizer::new();

        let outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let outcome = parse_one(&reader, &normalizer, path);
                    if let Some(p) = progress {
                        p.increment(1);
                    }
                    outcome
                })
                .collect()
        });

        let mut report = IngestReport {
            files_discovered: files.len(),
            ..Default::default()
        };

        let mut groups: HashMap<DatasetVariant, Vec<(String, Vec<CanonicalMeasurement>)>> =
            HashMap::new();
        let mut sites: HashMap<String, Site> = HashMap::new();

        let registry = HeaderRegistry::new(self.store);
        for outcome in outcomes {
            match outcome {
                FileOutcome::Failed(failure) => report.failures.push(failure),
                FileOutcome::Parsed(parsed) => {
                    if registry.register_record(parsed.header_record)? {
                        report.headers_registered += 1;
                    }
                    report.rows_skipped += parsed.normalized.rows_skipped;
                    if let Some(site) = parsed.normalized.site {
                        sites.entry(site.name.clone()).or_insert(site);
                    }
                    groups
                        .entry(parsed.normalized.variant)
                        .or_default()
                        .push((parsed.file_name, parsed.normalized.records));
                }
            }
        }

        if let Some(p) = progress {
            p.set_message("loading measurement groups...");
        }

        // Shape groups load in parallel with each other; files within one
        // group stay on a single writer so check-then-insert holds.
        let loader = BulkLoader::new(self.store);
        let group_results: Vec<(DatasetVariant, LoadSummary, Vec<FileFailure>, usize)> = pool
            .install(|| {
                groups
                    .into_par_iter()
                    .map(|(variant, group)| {
                        let mut summary = LoadSummary::default();
                        let mut failures = Vec::new();
                        let mut loaded = 0;
                        for (file_name, records) in group {
                            match loader.load(variant, records) {
                                Ok(s) => {
                                    summary.absorb(s);
                                    loaded += 1;
                                }
                                Err(e) => {
                                    warn!(file = %file_name, %variant, error = %e, "load failed");
                                    failures.push(FileFailure {
                                        file: file_name,
                                        cruise: None,
                                        header_snapshot: None,
                                        error: format!("load into {variant} failed: {e}"),
                                    });
                                }
                            }
                        }
                        (variant, summary, failures, loaded)
                    })
                    .collect()
            });

        for (variant, summary, failures, loaded) in group_results {
            report.load_summaries.insert(variant, summary);
            report.failures.extend(failures);
            report.files_loaded += loaded;
        }

        // Sites land after their measurements so spans compute immediately.
        for site in sites.into_values() {
            if self.store.upsert_site(site)? {
                report.sites_created += 1;
            }
        }

        if !report.failures.is_empty() {
            report.log_file = Some(self.write_failure_log(&report.failures)?);
        }

        info!(
            inserted = report.total_inserted(),
            skipped = report.total_skipped(),
            failures = report.failures.len(),
            "ingestion complete"
        );
        Ok(report)
    }

    fn write_failure_log(&self, failures: &[FileFailure]) -> Result<PathBuf> {
        let dir = self
            .options
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)?;
        let path = dir.join(ingest_log_filename());
        let mut log = fs::File::create(&path)?;
        for failure in failures {
            writeln!(
                log,
                "failed to process {} - cruise: {}",
                failure.file,
                failure.cruise.as_deref().unwrap_or("?")
            )?;
            if let Some(header) = &failure.header_snapshot {
                writeln!(log, "Header: {header}")?;
            }
            writeln!(log, "Error: {}\n", failure.error)?;
        }
        Ok(path)
    }
}

fn parse_one(
    reader: &RawFileReader,
    normalizer: &RecordNormalizer,
    path: &Path,
) -> FileOutcome {
    match reader.read(path) {
        Ok(raw) => {
            let header_record = build_header_record(&raw);
            let normalized = normalizer.normalize(&raw);
            FileOutcome::Parsed(Box::new(ParsedFile {
                file_name: path.display().to_string(),
                header_record,
                normalized,
            }))
        }
        Err(error) => {
            warn!(file = %path.display(), %error, "skipping unreadable file");
            FileOutcome::Failed(FileFailure {
                file: path.display().to_string(),
                cruise: None,
                header_snapshot: None,
                error: error.to_string(),
            })
        }
    }
}

/// Collects every regular file under the source tree except the usage-policy
/// documents and dotfiles. Whether a file is actually a MAN record set is
/// decided by the filename grammar at parse time.
fn discover_data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ProcessingError::InvalidFormat(format!(
            "source path is not a directory: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') {
                continue;
            }
            if path.is_dir() {
                pending.push(path);
            } else if !POLICY_FILES.contains(&name.as_ref()) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
