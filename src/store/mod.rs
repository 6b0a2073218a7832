//! Storage collaborator interface.
//!
//! The pipeline only assumes a store with atomic batch writes, key probes and
//! filtered range/containment queries. The in-memory backend here is the
//! reference implementation used by the CLI and tests; a relational backend
//! satisfies the same trait.

pub mod memory;

pub use memory::MemoryStore;

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::error::Result;
use crate::models::{
    CanonicalMeasurement, DatasetVariant, GeoPoint, HeaderKey, HeaderRecord, MeasurementKey,
    QualityLevel, Site,
};

/// Geographic bounding box with per-axis min/max containment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Builds a box only when all four bounds are present and ordered;
    /// partial or inverted bounds mean "no geographic filter", never an error.
    pub fn from_bounds(
        min_lat: Option<f64>,
        min_lng: Option<f64>,
        max_lat: Option<f64>,
        max_lng: Option<f64>,
    ) -> Option<Self> {
        match (min_lat, min_lng, max_lat, max_lng) {
            (Some(min_lat), Some(min_lng), Some(max_lat), Some(max_lng))
                if min_lat <= max_lat && min_lng <= max_lng =>
            {
                Some(Self {
                    min_lng,
                    min_lat,
                    max_lng,
                    max_lat,
                })
            }
            _ => None,
        }
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
            && point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
    }
}

/// Predicate over persisted measurements of one variant.
#[derive(Debug, Clone, Default)]
pub struct MeasurementFilter {
    /// Restrict to these cruises; `None` means all.
    pub cruises: Option<Vec<String>>,
    pub level: Option<QualityLevel>,
    /// Inclusive, open-ended on either side when unset. Records whose date is
    /// the null sentinel never match a bounded range.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub bounds: Option<BoundingBox>,
}

impl MeasurementFilter {
    pub fn matches(&self, record: &CanonicalMeasurement) -> bool {
        if let Some(ref cruises) = self.cruises {
            if !cruises.iter().any(|c| c == record.cruise()) {
                return false;
            }
        }
        if let Some(level) = self.level {
            if record.level() != level {
                return false;
            }
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            match record.date() {
                None => return false,
                Some(date) => {
                    if let Some(start) = self.start_date {
                        if date < start {
                            return false;
                        }
                    }
                    if let Some(end) = self.end_date {
                        if date > end {
                            return false;
                        }
                    }
                }
            }
        }
        if let Some(ref bounds) = self.bounds {
            if !bounds.contains(&record.coordinates()) {
                return false;
            }
        }
        true
    }
}

/// Write/query interface the pipeline is built against.
pub trait MeasurementStore: Send + Sync {
    /// Which of the candidate keys already exist for this variant.
    fn existing_keys(
        &self,
        variant: DatasetVariant,
        candidates: &[MeasurementKey],
    ) -> Result<HashSet<MeasurementKey>>;

    /// Persists a batch atomically, skipping records whose natural key is
    /// already present (unique-constraint conflicts count as "already
    /// present", not failures). Returns the number actually inserted.
    fn insert_measurements(
        &self,
        variant: DatasetVariant,
        records: Vec<CanonicalMeasurement>,
    ) -> Result<usize>;

    fn query_measurements(
        &self,
        variant: DatasetVariant,
        filter: &MeasurementFilter,
    ) -> Result<Vec<CanonicalMeasurement>>;

    fn count_measurements(&self, variant: DatasetVariant) -> Result<usize>;

    /// Creates the site if new, otherwise leaves the stored description in
    /// place; either way the date span is recomputed. Returns true on create.
    fn upsert_site(&self, site: Site) -> Result<bool>;

    fn sites(&self) -> Result<Vec<Site>>;

    /// First-wins registration; returns false when the key was already taken.
    fn register_header(&self, record: HeaderRecord) -> Result<bool>;

    fn header(&self, key: &HeaderKey) -> Result<Option<HeaderRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_requires_all_ordered_bounds() {
        assert!(BoundingBox::from_bounds(
            Some(-10.0),
            Some(-50.0),
            Some(10.0),
            Some(-40.0)
        )
        .is_some());

        // Partial bounds are ignored.
        assert!(BoundingBox::from_bounds(Some(-10.0), None, Some(10.0), Some(-40.0)).is_none());
        // Inverted bounds are ignored, not rejected.
        assert!(BoundingBox::from_bounds(
            Some(10.0),
            Some(-50.0),
            Some(-10.0),
            Some(-40.0)
        )
        .is_none());
    }

    #[test]
    fn test_bounding_box_containment() {
        let bbox = BoundingBox::from_bounds(Some(-10.0), Some(-50.0), Some(10.0), Some(-40.0))
            .unwrap();
        assert!(bbox.contains(&GeoPoint::new(-45.0, 0.0)));
        assert!(bbox.contains(&GeoPoint::new(-50.0, -10.0)));
        assert!(!bbox.contains(&GeoPoint::new(-39.0, 0.0)));
        assert!(!bbox.contains(&GeoPoint::new(-45.0, 11.0)));
    }
}
