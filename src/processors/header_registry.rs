use tracing::debug;

use crate::error::Result;
use crate::models::{HeaderKey, HeaderRecord};
use crate::readers::RawMeasurementFile;
use crate::store::MeasurementStore;
use crate::utils::constants::SYNTHETIC_COLUMNS;

/// Captures each (frequency, retrieval, level) preamble the first time it is
/// seen so exports can reconstruct files faithfully.
///
/// Registration is first-wins and order-independent: later files with the
/// same key are silent no-ops, which makes it safe under unordered parallel
/// ingestion.
pub struct HeaderRegistry<'a> {
    store: &'a dyn MeasurementStore,
}

impl<'a> HeaderRegistry<'a> {
    pub fn new(store: &'a dyn MeasurementStore) -> Self {
        Self { store }
    }

    /// Returns true when this file's preamble became the stored one.
    pub fn register(&self, file: &RawMeasurementFile) -> Result<bool> {
        self.register_record(build_header_record(file))
    }

    /// Same first-wins semantics for an already-extracted record.
    pub fn register_record(&self, record: HeaderRecord) -> Result<bool> {
        let key = record.key;
        let stored = self.store.register_header(record)?;
        if !stored {
            debug!(?key, "header already registered for this combination");
        }
        Ok(stored)
    }
}

/// Reconstructs the canonical column-header line: the raw header minus the
/// `Latitude`/`Longitude` tokens, plus the synthetic output-only columns.
pub fn build_header_record(file: &RawMeasurementFile) -> HeaderRecord {
    let mut columns: Vec<&str> = file
        .header
        .iter()
        .map(String::as_str)
        .filter(|token| *token != "Latitude" && *token != "Longitude")
        .collect();
    columns.extend(SYNTHETIC_COLUMNS);

    HeaderRecord {
        key: HeaderKey {
            frequency: file.stamp.frequency,
            retrieval: file.stamp.retrieval,
            level: file.stamp.level,
        },
        preamble_1: file.preamble_1.clone(),
        preamble_2: file.preamble_2.clone(),
        column_header: columns.join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::variant::{Frequency, QualityLevel, Retrieval};
    use crate::store::MemoryStore;
    use crate::utils::filename::FileStamp;
    use std::path::PathBuf;

    fn raw_file(preamble_1: &str) -> RawMeasurementFile {
        RawMeasurementFile {
            path: PathBuf::from("Cruise1_daily.lev15"),
            stamp: FileStamp {
                site: "Cruise1".to_string(),
                retrieval: Retrieval::Aod,
                frequency: Frequency::Daily,
                level: QualityLevel::Lev15,
            },
            cruise: "Cruise1".to_string(),
            pi: "Smith".to_string(),
            pi_email: "jsmith@example.org".to_string(),
            preamble_1: preamble_1.to_string(),
            preamble_2: "legal text".to_string(),
            header: [
                "Date(dd:mm:yyyy)",
                "Time(hh:mm:ss)",
                "Latitude",
                "Longitude",
                "AOD_500nm",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_header_reconstruction() {
        let record = build_header_record(&raw_file("first line"));
        assert_eq!(
            record.column_header,
            "Date(dd:mm:yyyy),Time(hh:mm:ss),AOD_500nm,Coordinates,Cruise,Level,PI,PI_EMAIL"
        );
        assert_eq!(record.key.frequency, Frequency::Daily);
        assert_eq!(record.key.retrieval, Retrieval::Aod);
        assert_eq!(record.key.level, QualityLevel::Lev15);
    }

    #[test]
    fn test_first_registration_wins() {
        let store = MemoryStore::new();
        let registry = HeaderRegistry::new(&store);

        assert!(registry.register(&raw_file("first")).unwrap());
        assert!(!registry.register(&raw_file("second")).unwrap());

        let key = HeaderKey {
            frequency: Frequency::Daily,
            retrieval: Retrieval::Aod,
            level: QualityLevel::Lev15,
        };
        assert_eq!(store.header(&key).unwrap().unwrap().preamble_1, "first");
    }
}
