use chrono::Local;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ProcessingError, Result};
use crate::models::variant::{DatasetVariant, Frequency, QualityLevel, Retrieval};

/// What a raw archive filename declares about its contents.
///
/// The convention is `<site>_<frequency-tag>.<suffix>` with frequency-tag one
/// of `all_points` / `series` / `daily` and the suffix either `lev<code>`
/// (AOD) or `ONEILL_<code>` (SDA). Anything else is a `ParseError` rather
/// than a silent substring guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStamp {
    pub site: String,
    pub retrieval: Retrieval,
    pub frequency: Frequency,
    pub level: QualityLevel,
}

impl FileStamp {
    pub fn parse(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| ProcessingError::parse(path.display().to_string(), "invalid path"))?;

        let (stem, suffix) = file_name.rsplit_once('.').ok_or_else(|| {
            ProcessingError::parse(file_name, "filename has no retrieval suffix")
        })?;

        let (retrieval, code) = if let Some(code) = suffix.strip_prefix("lev") {
            (Retrieval::Aod, code)
        } else if let Some(code) = suffix.strip_prefix("ONEILL_") {
            (Retrieval::Sda, code)
        } else {
            return Err(ProcessingError::parse(
                file_name,
                format!("unrecognized retrieval suffix '.{suffix}'"),
            ));
        };

        let level = QualityLevel::from_suffix(code).ok_or_else(|| {
            ProcessingError::parse(file_name, format!("unrecognized quality level '{code}'"))
        })?;

        // Checked in priority order: all_points, then series, then daily.
        let (site, frequency) = if let Some(site) = stem.strip_suffix("_all_points") {
            (site, Frequency::Point)
        } else if let Some(site) = stem.strip_suffix("_series") {
            (site, Frequency::Series)
        } else if let Some(site) = stem.strip_suffix("_daily") {
            (site, Frequency::Daily)
        } else {
            return Err(ProcessingError::parse(
                file_name,
                "filename has no frequency tag",
            ));
        };

        if site.is_empty() {
            return Err(ProcessingError::parse(file_name, "empty site name"));
        }

        Ok(Self {
            site: site.to_string(),
            retrieval,
            frequency,
            level,
        })
    }

    pub fn variant(&self) -> DatasetVariant {
        DatasetVariant::new(self.retrieval, self.frequency)
    }
}

/// Stem of a download archive: `<unix-timestamp>_MAN_DATA`.
pub fn export_archive_stem() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}_MAN_DATA", timestamp)
}

/// Per-run ingestion failure log name, e.g. `log_ingest_20240301101500.txt`.
pub fn ingest_log_filename() -> String {
    format!("log_ingest_{}.txt", Local::now().format("%Y%m%d%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_aod_stamps() {
        let stamp = FileStamp::parse(&PathBuf::from("/data/Cruise1/Cruise1_all_points.lev15"))
            .unwrap();
        assert_eq!(stamp.site, "Cruise1");
        assert_eq!(stamp.retrieval, Retrieval::Aod);
        assert_eq!(stamp.frequency, Frequency::Point);
        assert_eq!(stamp.level, QualityLevel::Lev15);

        let stamp = FileStamp::parse(&PathBuf::from("Cruise1_daily.lev20")).unwrap();
        assert_eq!(stamp.frequency, Frequency::Daily);
        assert_eq!(stamp.level, QualityLevel::Lev20);
    }

    #[test]
    fn test_parse_sda_stamps() {
        let stamp = FileStamp::parse(&PathBuf::from("Tara_Oceans_series.ONEILL_10")).unwrap();
        assert_eq!(stamp.site, "Tara_Oceans");
        assert_eq!(stamp.retrieval, Retrieval::Sda);
        assert_eq!(stamp.frequency, Frequency::Series);
        assert_eq!(stamp.level, QualityLevel::Lev10);
    }

    #[test]
    fn test_site_names_containing_tag_words() {
        // "series" inside the site name must not confuse the grammar.
        let stamp = FileStamp::parse(&PathBuf::from("series_cruise_all_points.lev10")).unwrap();
        assert_eq!(stamp.site, "series_cruise");
        assert_eq!(stamp.frequency, Frequency::Point);
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        assert!(FileStamp::parse(&PathBuf::from("Cruise1_daily")).is_err());
        assert!(FileStamp::parse(&PathBuf::from("Cruise1_daily.csv")).is_err());
        assert!(FileStamp::parse(&PathBuf::from("Cruise1_hourly.lev15")).is_err());
        assert!(FileStamp::parse(&PathBuf::from("Cruise1_daily.lev25")).is_err());
        assert!(FileStamp::parse(&PathBuf::from("_daily.lev15")).is_err());
    }

    #[test]
    fn test_export_archive_stem() {
        let stem = export_archive_stem();
        assert!(stem.ends_with("_MAN_DATA"));
        let ts: u64 = stem.trim_end_matches("_MAN_DATA").parse().unwrap();
        assert!(ts > 1_500_000_000);
    }
}
