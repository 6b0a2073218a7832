use tracing::{debug, warn};

use crate::error::{ProcessingError, Result};
use crate::models::measurement::{parse_raw_date, parse_raw_time, AodMeasurement, SdaMeasurement};
use crate::models::{CanonicalMeasurement, DatasetVariant, Frequency, GeoPoint, QualityLevel, Retrieval, Site};
use crate::readers::RawMeasurementFile;
use crate::schema::SchemaCatalogue;

/// Output of normalizing one raw file: the canonical records of its variant,
/// plus the Site discovered from it, when the file is the site-defining
/// AOD daily level-1.5 shape.
#[derive(Debug)]
pub struct NormalizedFile {
    pub variant: DatasetVariant,
    pub records: Vec<CanonicalMeasurement>,
    pub site: Option<Site>,
    pub rows_skipped: usize,
}

/// Converts parsed rows into canonical typed records.
///
/// Row-level failures are logged with cruise and file context and skip the
/// row only; the batch always survives.
pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, file: &RawMeasurementFile) -> NormalizedFile {
        let catalogue = SchemaCatalogue::for_retrieval(file.stamp.retrieval);
        let canonical_header: Vec<&str> = file
            .header
            .iter()
            .map(|label| catalogue.canonical_for(label))
            .collect();
        let fields = catalogue.fields(file.stamp.frequency);
        let variant = file.stamp.variant();

        let mut records = Vec::with_capacity(file.rows.len());
        let mut rows_skipped = 0;

        for (index, row) in file.rows.iter().enumerate() {
            match self.normalize_row(file, &canonical_header, fields, index, row) {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(
                        cruise = %file.cruise,
                        file = %file.path.display(),
                        row = index,
                        %error,
                        "skipping row"
                    );
                    rows_skipped += 1;
                }
            }
        }

        let site = self.discover_site(file, &records);

        NormalizedFile {
            variant,
            records,
            site,
            rows_skipped,
        }
    }

    fn normalize_row(
        &self,
        file: &RawMeasurementFile,
        canonical_header: &[&str],
        fields: &[&str],
        index: usize,
        row: &[String],
    ) -> Result<CanonicalMeasurement> {
        let row_error = |message: String| ProcessingError::Normalization {
            cruise: file.cruise.clone(),
            row: index,
            message,
        };

        // Rows are zipped against the header: extra cells are ignored and
        // short rows leave trailing columns missing.
        let cells: Vec<(&str, &str)> = canonical_header
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (*name, value.as_str()))
            .collect();

        let mut date = None;
        let mut time_raw = None;
        let mut latitude = None;
        let mut longitude = None;
        for (name, value) in &cells {
            match *name {
                "date" => date = parse_raw_date(value),
                "time" => time_raw = Some(*value),
                "latitude" => latitude = value.trim().parse::<f64>().ok(),
                "longitude" => longitude = value.trim().parse::<f64>().ok(),
                _ => {}
            }
        }

        let time = time_raw
            .and_then(parse_raw_time)
            .ok_or_else(|| row_error("missing or unparseable time".to_string()))?;
        let latitude =
            latitude.ok_or_else(|| row_error("missing or unparseable latitude".to_string()))?;
        let longitude =
            longitude.ok_or_else(|| row_error("missing or unparseable longitude".to_string()))?;

        // X = longitude, Y = latitude; the raw columns are dropped from the
        // record in favor of the point.
        let coordinates = GeoPoint::new(longitude, latitude);

        let mut record = match file.stamp.retrieval {
            Retrieval::Aod => CanonicalMeasurement::Aod(Box::new(AodMeasurement::new(
                file.cruise.clone(),
                file.stamp.level,
                file.pi.clone(),
                file.pi_email.clone(),
                date,
                time,
                coordinates,
            ))),
            Retrieval::Sda => CanonicalMeasurement::Sda(Box::new(SdaMeasurement::new(
                file.cruise.clone(),
                file.stamp.level,
                file.pi.clone(),
                file.pi_email.clone(),
                date,
                time,
                coordinates,
            ))),
        };

        for (name, value) in &cells {
            if matches!(*name, "date" | "time" | "latitude" | "longitude") {
                continue;
            }
            if !fields.contains(name) {
                debug!(column = name, "column not persisted for this shape");
                continue;
            }
            record.set_field(name, value);
        }

        Ok(record)
    }

    /// New sites enter the system through AOD daily level-1.5 files.
    fn discover_site(
        &self,
        file: &RawMeasurementFile,
        records: &[CanonicalMeasurement],
    ) -> Option<Site> {
        if file.stamp.retrieval != Retrieval::Aod
            || file.stamp.frequency != Frequency::Daily
            || file.stamp.level != QualityLevel::Lev15
        {
            return None;
        }
        let first = records.first()?;
        Some(Site::discovered(
            file.cruise.clone(),
            first.aeronet_number().unwrap_or(0),
        ))
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::filename::FileStamp;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn raw_file(
        frequency: Frequency,
        level: QualityLevel,
        header: &[&str],
        rows: &[&[&str]],
    ) -> RawMeasurementFile {
        RawMeasurementFile {
            path: PathBuf::from("Cruise1_daily.lev15"),
            stamp: FileStamp {
                site: "Cruise1".to_string(),
                retrieval: Retrieval::Aod,
                frequency,
                level,
            },
            cruise: "Cruise1".to_string(),
            pi: "Smith".to_string(),
            pi_email: "jsmith@example.org".to_string(),
            preamble_1: "preamble one".to_string(),
            preamble_2: "preamble two".to_string(),
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    const HEADER: &[&str] = &[
        "Date(dd:mm:yyyy)",
        "Time(hh:mm:ss)",
        "Latitude",
        "Longitude",
        "AOD_500nm",
        "AERONET_Number",
    ];

    #[test]
    fn test_normalize_basic_row() {
        let file = raw_file(
            Frequency::Daily,
            QualityLevel::Lev15,
            HEADER,
            &[&["02:04:2019", "12:30:05", "11.25", "-42.5", "0.0831", "77"]],
        );
        let out = RecordNormalizer::new().normalize(&file);

        assert_eq!(out.records.len(), 1);
        assert_eq!(out.rows_skipped, 0);
        let record = &out.records[0];
        assert_eq!(record.cruise(), "Cruise1");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2019, 4, 2));
        assert_eq!(record.coordinates(), GeoPoint::new(-42.5, 11.25));
        assert_eq!(record.field_value("aod_500nm").unwrap(), "0.0831");
        assert_eq!(record.aeronet_number(), Some(77));
    }

    #[test]
    fn test_unparseable_date_becomes_sentinel_not_error() {
        let file = raw_file(
            Frequency::Daily,
            QualityLevel::Lev15,
            HEADER,
            &[&["99:99:2019", "12:30:05", "11.25", "-42.5", "0.0831", "77"]],
        );
        let out = RecordNormalizer::new().normalize(&file);

        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].date(), None);
        assert_eq!(out.records[0].field_value("aod_500nm").unwrap(), "0.0831");
    }

    #[test]
    fn test_bad_coordinates_skip_row_only() {
        let file = raw_file(
            Frequency::Daily,
            QualityLevel::Lev15,
            HEADER,
            &[
                &["02:04:2019", "12:30:05", "not-a-float", "-42.5", "0.1", "77"],
                &["03:04:2019", "09:00:00", "11.30", "-42.1", "0.2", "77"],
            ],
        );
        let out = RecordNormalizer::new().normalize(&file);

        assert_eq!(out.records.len(), 1);
        assert_eq!(out.rows_skipped, 1);
        assert_eq!(out.records[0].date(), NaiveDate::from_ymd_opt(2019, 4, 3));
    }

    #[test]
    fn test_site_discovery_only_for_daily_lev15() {
        let daily = raw_file(
            Frequency::Daily,
            QualityLevel::Lev15,
            HEADER,
            &[&["02:04:2019", "12:30:05", "11.25", "-42.5", "0.1", "77"]],
        );
        let out = RecordNormalizer::new().normalize(&daily);
        let site = out.site.unwrap();
        assert_eq!(site.name, "Cruise1");
        assert_eq!(site.aeronet_number, 77);
        assert_eq!(site.description, "?");

        let series = raw_file(
            Frequency::Series,
            QualityLevel::Lev15,
            HEADER,
            &[&["02:04:2019", "12:30:05", "11.25", "-42.5", "0.1", "77"]],
        );
        assert!(RecordNormalizer::new().normalize(&series).site.is_none());

        let daily_20 = raw_file(
            Frequency::Daily,
            QualityLevel::Lev20,
            HEADER,
            &[&["02:04:2019", "12:30:05", "11.25", "-42.5", "0.1", "77"]],
        );
        assert!(RecordNormalizer::new().normalize(&daily_20).site.is_none());
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let header = &[
            "Date(dd:mm:yyyy)",
            "Time(hh:mm:ss)",
            "Latitude",
            "Longitude",
            "Mystery_Column",
        ];
        let file = raw_file(
            Frequency::Daily,
            QualityLevel::Lev15,
            header,
            &[&["02:04:2019", "12:30:05", "11.25", "-42.5", "42"]],
        );
        let out = RecordNormalizer::new().normalize(&file);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].field_value("Mystery_Column"), None);
    }

    #[test]
    fn test_short_rows_leave_trailing_columns_missing() {
        let file = raw_file(
            Frequency::Daily,
            QualityLevel::Lev15,
            HEADER,
            &[&["02:04:2019", "12:30:05", "11.25", "-42.5"]],
        );
        let out = RecordNormalizer::new().normalize(&file);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].aeronet_number(), None);
    }
}
