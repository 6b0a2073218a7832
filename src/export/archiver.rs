use std::fs::{self, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{info, warn};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::{ProcessingError, Result};
use crate::export::request::ExportRequest;
use crate::export::writer::ExportWriter;
use crate::store::{MeasurementFilter, MeasurementStore};
use crate::utils::constants::POLICY_FILES;
use crate::utils::filename::export_archive_stem;

/// The finished download: archive bytes plus the content-disposition name.
#[derive(Debug)]
pub struct ExportArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Runs a full export: per-combination files, policy documents, one zip.
///
/// All intermediate files live in a `TempDir`, so cleanup happens on every
/// exit path — including failures and disconnected clients — when the guard
/// drops.
pub struct Exporter<'a> {
    store: &'a dyn MeasurementStore,
    source_dir: PathBuf,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a dyn MeasurementStore, source_dir: PathBuf) -> Self {
        Self { store, source_dir }
    }

    pub fn export(&self, request: &ExportRequest) -> Result<ExportArchive> {
        let combinations = request.combinations()?;
        let (start_date, end_date) = request.date_range()?;
        let bounds = request.bounding_box();

        let temp = TempDir::new()?;
        let stem = export_archive_stem();
        let out_dir = temp.path().join(&stem);
        fs::create_dir_all(&out_dir)?;

        let writer = ExportWriter::new(self.store);
        let mut materialized = 0;
        for (variant, level) in combinations {
            let filter = MeasurementFilter {
                cruises: Some(request.sites.clone()),
                level: Some(level),
                start_date,
                end_date,
                bounds,
            };
            if writer
                .write_combination(&out_dir, variant, level, &filter)?
                .is_some()
            {
                materialized += 1;
            }
        }

        self.copy_policy_documents(&out_dir)?;

        let bytes = zip_directory(&out_dir, &stem)?;
        info!(combinations = materialized, "export archive packaged");

        Ok(ExportArchive {
            file_name: format!("{stem}.zip"),
            bytes,
        })
    }

    /// Convenience for the CLI: writes the archive under `output_dir`.
    pub fn export_to_file(&self, request: &ExportRequest, output_dir: &Path) -> Result<PathBuf> {
        let archive = self.export(request)?;
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(&archive.file_name);
        fs::write(&path, &archive.bytes)?;
        Ok(path)
    }

    fn copy_policy_documents(&self, out_dir: &Path) -> Result<()> {
        for name in POLICY_FILES {
            let source = self.source_dir.join(name);
            if source.is_file() {
                fs::copy(&source, out_dir.join(name))?;
            } else {
                warn!(file = name, "usage policy document missing from source directory");
            }
        }
        Ok(())
    }
}

/// Zips every file in `dir` under a `prefix/` root, in memory.
fn zip_directory(dir: &Path, prefix: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default();

        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        entries.sort();

        for path in entries {
            if !path.is_file() {
                continue;
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    ProcessingError::Archive(format!("unencodable file name: {}", path.display()))
                })?;
            zip.start_file(format!("{prefix}/{name}"), options)?;
            let mut file = File::open(&path)?;
            std::io::copy(&mut file, &mut zip)?;
        }
        zip.finish()?;
    }
    Ok(buffer)
}
