//! Read-only query paths consumed by the site-listing and measurement
//! endpoints; they sit beside the pipeline and read its persisted output.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::HashSet;

use crate::error::{ProcessingError, Result};
use crate::models::measurement::AodMeasurement;
use crate::models::{
    CanonicalMeasurement, DatasetVariant, Frequency, GeoPoint, QualityLevel, Retrieval, Site,
};
use crate::schema::variant_fields;
use crate::store::{BoundingBox, MeasurementFilter, MeasurementStore};

/// The site-defining record set: AOD daily level-1.5.
fn site_source_variant() -> DatasetVariant {
    DatasetVariant::new(Retrieval::Aod, Frequency::Daily)
}

#[derive(Debug, Clone, Default)]
pub struct SiteQuery {
    pub bounds: Option<BoundingBox>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteListing {
    pub name: String,
    pub span_date: Option<(NaiveDate, NaiveDate)>,
}

/// Sites filtered by bounding box (through their daily level-1.5 coordinates)
/// and by date-span intersection, ordered by span start.
pub fn list_sites(store: &dyn MeasurementStore, query: &SiteQuery) -> Result<Vec<SiteListing>> {
    let mut sites = store.sites()?;

    if let Some(bounds) = query.bounds {
        let filter = MeasurementFilter {
            level: Some(QualityLevel::Lev15),
            bounds: Some(bounds),
            ..Default::default()
        };
        let hits = store.query_measurements(site_source_variant(), &filter)?;
        let names: HashSet<String> = hits.iter().map(|m| m.cruise().to_string()).collect();
        if names.is_empty() {
            return Ok(Vec::new());
        }
        sites.retain(|site| names.contains(&site.name));
    }

    if let Some(window) = date_window(query.start_date, query.end_date) {
        sites.retain(|site| site.span_overlaps(window.0, window.1));
    }

    sites.sort_by_key(|site| site.span_date.map(|(start, _)| start));
    Ok(sites.into_iter().map(listing_of).collect())
}

fn listing_of(site: Site) -> SiteListing {
    SiteListing {
        name: site.name,
        span_date: site.span_date,
    }
}

/// Effective [start, end] window for span intersection. A lone start date
/// spans to today; a lone end date must be contained in the site's span.
fn date_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<(NaiveDate, NaiveDate)> {
    match (start, end) {
        (Some(start), Some(end)) => Some((start.min(end), start.max(end))),
        (Some(start), None) => {
            let today = Local::now().date_naive();
            Some((start.min(today), start.max(today)))
        }
        (None, Some(end)) => Some((end, end)),
        (None, None) => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl From<GeoPoint> for Coordinates {
    fn from(point: GeoPoint) -> Self {
        Self {
            lng: point.longitude,
            lat: point.latitude,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteReading {
    pub site: String,
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
    pub coordinates: Coordinates,
    pub aeronet_number: Option<i64>,
    pub value: f64,
}

/// Per-site values of one plottable AOD reading from the daily level-1.5
/// set, with the same bbox/date filters as the site listing.
pub fn site_measurements(
    store: &dyn MeasurementStore,
    reading: &str,
    sites: &[String],
    query: &SiteQuery,
) -> Result<Vec<SiteReading>> {
    if sites.is_empty() {
        return Err(ProcessingError::ExportQuery("no sites selected".to_string()));
    }
    if !display_fields().contains(&reading) {
        return Err(ProcessingError::ExportQuery(format!(
            "unknown reading '{reading}'"
        )));
    }

    let filter = MeasurementFilter {
        cruises: Some(sites.to_vec()),
        level: Some(QualityLevel::Lev15),
        start_date: query.start_date,
        end_date: query.end_date,
        bounds: query.bounds,
    };
    let records = store.query_measurements(site_source_variant(), &filter)?;

    Ok(records
        .into_iter()
        .filter_map(|record| match record {
            CanonicalMeasurement::Aod(m) => {
                let value = m.reading(reading)?;
                Some(SiteReading {
                    site: m.cruise,
                    date: m.date,
                    time: m.time,
                    coordinates: m.coordinates.into(),
                    aeronet_number: m.aeronet_number,
                    value,
                })
            }
            CanonicalMeasurement::Sda(_) => None,
        })
        .collect())
}

/// The plottable (float-valued) canonical fields of the daily AOD shape.
pub fn display_fields() -> Vec<&'static str> {
    let probe = AodMeasurement::new(
        String::new(),
        QualityLevel::Lev15,
        String::new(),
        String::new(),
        None,
        NaiveTime::MIN,
        GeoPoint::new(0.0, 0.0),
    );
    variant_fields(site_source_variant())
        .iter()
        .copied()
        .filter(|field| probe.reading(field).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn record(cruise: &str, day: u32, lng: f64, lat: f64, aod: f64) -> CanonicalMeasurement {
        let mut m = AodMeasurement::new(
            cruise.to_string(),
            QualityLevel::Lev15,
            "Smith".to_string(),
            "jsmith@example.org".to_string(),
            NaiveDate::from_ymd_opt(2019, 4, day),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            GeoPoint::new(lng, lat),
        );
        m.set_field("aod_500nm", &aod.to_string());
        CanonicalMeasurement::Aod(Box::new(m))
    }

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_measurements(
                site_source_variant(),
                vec![
                    record("Cruise1", 2, -42.5, 11.25, 0.08),
                    record("Cruise1", 20, -42.1, 11.30, 0.09),
                    record("Cruise2", 10, 140.0, -35.0, 0.11),
                ],
            )
            .unwrap();
        store.upsert_site(Site::discovered("Cruise1".to_string(), 77)).unwrap();
        store.upsert_site(Site::discovered("Cruise2".to_string(), 88)).unwrap();
        store
    }

    #[test]
    fn test_list_sites_unfiltered() {
        let store = seeded_store();
        let sites = list_sites(&store, &SiteQuery::default()).unwrap();
        assert_eq!(sites.len(), 2);
        // Ordered by span start: Cruise1 begins 2019-04-02.
        assert_eq!(sites[0].name, "Cruise1");
        assert!(sites[0].span_date.is_some());
    }

    #[test]
    fn test_list_sites_bounded() {
        let store = seeded_store();
        // Box around Cruise2 only.
        let query = SiteQuery {
            bounds: BoundingBox::from_bounds(Some(-40.0), Some(130.0), Some(-30.0), Some(150.0)),
            ..Default::default()
        };
        let sites = list_sites(&store, &query).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].name, "Cruise2");
    }

    #[test]
    fn test_list_sites_date_window() {
        let store = seeded_store();
        let query = SiteQuery {
            start_date: NaiveDate::from_ymd_opt(2019, 4, 15),
            end_date: NaiveDate::from_ymd_opt(2019, 4, 25),
            ..Default::default()
        };
        let sites = list_sites(&store, &query).unwrap();
        // Cruise1 spans 04-02..04-20 and overlaps; Cruise2 is a single day 04-10.
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].name, "Cruise1");
    }

    #[test]
    fn test_site_measurements() {
        let store = seeded_store();
        let readings = site_measurements(
            &store,
            "aod_500nm",
            &["Cruise1".to_string()],
            &SiteQuery::default(),
        )
        .unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].site, "Cruise1");
        assert_eq!(readings[0].value, 0.08);
        assert_eq!(readings[0].coordinates.lng, -42.5);
    }

    #[test]
    fn test_site_measurements_rejects_bad_input() {
        let store = seeded_store();
        assert!(site_measurements(&store, "aod_500nm", &[], &SiteQuery::default()).is_err());
        assert!(site_measurements(
            &store,
            "not_a_reading",
            &["Cruise1".to_string()],
            &SiteQuery::default()
        )
        .is_err());
    }

    #[test]
    fn test_display_fields() {
        let fields = display_fields();
        assert!(fields.contains(&"aod_500nm"));
        assert!(fields.contains(&"std_500nm"));
        assert!(!fields.contains(&"date"));
        assert!(!fields.contains(&"aeronet_number"));
    }
}
