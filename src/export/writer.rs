use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::models::{CanonicalMeasurement, DatasetVariant, HeaderKey, QualityLevel};
use crate::schema::SchemaCatalogue;
use crate::store::{MeasurementFilter, MeasurementStore};

/// Re-emits persisted measurements as header-faithful delimited files.
pub struct ExportWriter<'a> {
    store: &'a dyn MeasurementStore,
}

impl<'a> ExportWriter<'a> {
    pub fn new(store: &'a dyn MeasurementStore) -> Self {
        Self { store }
    }

    /// Materializes one (variant, level) combination into `out_dir`.
    ///
    /// Returns `None` without output when no HeaderRecord was ever captured
    /// for the combination or when the query matches nothing; a placeholder
    /// file would break format fidelity.
    pub fn write_combination(
        &self,
        out_dir: &Path,
        variant: DatasetVariant,
        level: QualityLevel,
        filter: &MeasurementFilter,
    ) -> Result<Option<PathBuf>> {
        let key = HeaderKey {
            frequency: variant.frequency,
            retrieval: variant.retrieval,
            level,
        };
        let Some(header) = self.store.header(&key)? else {
            debug!(%variant, %level, "no registered header, skipping combination");
            return Ok(None);
        };

        let records = self.store.query_measurements(variant, filter)?;
        if records.is_empty() {
            debug!(%variant, %level, "no matching records, skipping combination");
            return Ok(None);
        }

        let path = out_dir.join(variant.export_file_name(level));
        let mut file = File::create(&path)?;
        writeln!(file, "{}", header.preamble_1)?;
        writeln!(
            file,
            "{},** interpolated 500nm channel **",
            variant.frequency.display_name()
        )?;
        writeln!(file, "{}", header.preamble_2)?;
        writeln!(file, "{}", header.column_header)?;

        let tokens: Vec<&str> = header.column_header.split(',').collect();
        let catalogue = SchemaCatalogue::for_retrieval(variant.retrieval);

        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        for record in &records {
            let row: Vec<String> = tokens
                .iter()
                .map(|token| render_cell(catalogue, record, token, level))
                .collect();
            csv_writer.write_record(&row)?;
        }
        csv_writer.flush()?;

        info!(
            file = %path.display(),
            rows = records.len(),
            "materialized export combination"
        );
        Ok(Some(path))
    }
}

/// One cell of an export row. The synthetic columns come from record
/// metadata; everything else renames the raw header label back to its
/// canonical field.
fn render_cell(
    catalogue: &SchemaCatalogue,
    record: &CanonicalMeasurement,
    token: &str,
    level: QualityLevel,
) -> String {
    match token {
        "Coordinates" => record.coordinates().wkt(),
        "Cruise" => record.cruise().to_string(),
        "Level" => level.code().to_string(),
        "PI" => record.pi().to_string(),
        "PI_EMAIL" => record.pi_email().to_string(),
        raw_label => {
            let canonical = catalogue.canonical_for(raw_label);
            record.field_value(canonical).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::measurement::AodMeasurement;
    use crate::models::variant::{Frequency, Retrieval};
    use crate::models::{GeoPoint, HeaderRecord};
    use crate::store::MemoryStore;
    use chrono::{NaiveDate, NaiveTime};

    const AOD_DAILY: DatasetVariant = DatasetVariant {
        retrieval: Retrieval::Aod,
        frequency: Frequency::Daily,
    };

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();

        let mut m = AodMeasurement::new(
            "Cruise1".to_string(),
            QualityLevel::Lev15,
            "Smith".to_string(),
            "jsmith@example.org".to_string(),
            NaiveDate::from_ymd_opt(2019, 4, 2),
            NaiveTime::from_hms_opt(12, 30, 5).unwrap(),
            GeoPoint::new(-42.5, 11.25),
        );
        m.set_field("aod_500nm", "0.0831");
        store
            .insert_measurements(AOD_DAILY, vec![CanonicalMeasurement::Aod(Box::new(m))])
            .unwrap();

        store
            .register_header(HeaderRecord {
                key: HeaderKey {
                    frequency: Frequency::Daily,
                    retrieval: Retrieval::Aod,
                    level: QualityLevel::Lev15,
                },
                preamble_1: "Level 1.5 MAN Measurements".to_string(),
                preamble_2: "Public domain data".to_string(),
                column_header:
                    "Date(dd:mm:yyyy),Time(hh:mm:ss),AOD_500nm,Coordinates,Cruise,Level,PI,PI_EMAIL"
                        .to_string(),
            })
            .unwrap();
        store
    }

    fn cruise_filter() -> MeasurementFilter {
        MeasurementFilter {
            cruises: Some(vec!["Cruise1".to_string()]),
            level: Some(QualityLevel::Lev15),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_combination_reconstructs_header() {
        let store = seeded_store();
        let dir = tempfile::tempdir().unwrap();

        let path = ExportWriter::new(&store)
            .write_combination(dir.path(), AOD_DAILY, QualityLevel::Lev15, &cruise_filter())
            .unwrap()
            .unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "MAN_DATASET_AOD_DAILY15.csv"
        );

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Level 1.5 MAN Measurements");
        assert_eq!(lines[1], "Daily,** interpolated 500nm channel **");
        assert_eq!(lines[2], "Public domain data");
        assert_eq!(
            lines[3],
            "Date(dd:mm:yyyy),Time(hh:mm:ss),AOD_500nm,Coordinates,Cruise,Level,PI,PI_EMAIL"
        );
        assert_eq!(
            lines[4],
            "02:04:2019,12:30:05,0.0831,POINT (-42.5 11.25),Cruise1,15,Smith,jsmith@example.org"
        );
    }

    #[test]
    fn test_missing_header_skips_combination() {
        let store = seeded_store();
        let dir = tempfile::tempdir().unwrap();

        // Level 2.0 has measurements registered nowhere, and no header.
        let result = ExportWriter::new(&store)
            .write_combination(
                dir.path(),
                AOD_DAILY,
                QualityLevel::Lev20,
                &MeasurementFilter::default(),
            )
            .unwrap();
        assert!(result.is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let store = seeded_store();
        let dir = tempfile::tempdir().unwrap();

        let filter = MeasurementFilter {
            cruises: Some(vec!["Nonexistent".to_string()]),
            ..cruise_filter()
        };
        let result = ExportWriter::new(&store)
            .write_combination(dir.path(), AOD_DAILY, QualityLevel::Lev15, &filter)
            .unwrap();
        assert!(result.is_none());
    }
}
