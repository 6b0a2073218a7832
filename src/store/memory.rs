use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use crate::error::{ProcessingError, Result};
use crate::models::{
    CanonicalMeasurement, DatasetVariant, Frequency, HeaderKey, HeaderRecord, MeasurementKey,
    QualityLevel, Retrieval, Site,
};
use crate::store::{MeasurementFilter, MeasurementStore};

/// In-memory reference backend.
///
/// One write lock guards all tables, so every trait call is atomic; the
/// per-variant key maps double as the unique constraint.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    measurements: HashMap<DatasetVariant, BTreeMap<MeasurementKey, CanonicalMeasurement>>,
    sites: BTreeMap<String, Site>,
    headers: HashMap<HeaderKey, HeaderRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_guard(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|e| ProcessingError::InvalidFormat(format!("store lock poisoned: {e}")))
    }

    fn write_guard(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|e| ProcessingError::InvalidFormat(format!("store lock poisoned: {e}")))
    }
}

impl StoreInner {
    /// Date span of a site over its persisted AOD daily level-1.5 records,
    /// the set the Site aggregate is defined against.
    fn recompute_span(&mut self, cruise: &str) {
        let variant = DatasetVariant::new(Retrieval::Aod, Frequency::Daily);
        let span = self
            .measurements
            .get(&variant)
            .map(|records| {
                records
                    .values()
                    .filter(|m| m.cruise() == cruise && m.level() == QualityLevel::Lev15)
                    .filter_map(|m| m.date())
                    .fold(None, |acc: Option<(_, _)>, date| match acc {
                        None => Some((date, date)),
                        Some((lo, hi)) => Some((lo.min(date), hi.max(date))),
                    })
            })
            .unwrap_or(None);

        if let Some(site) = self.sites.get_mut(cruise) {
            site.span_date = span;
        }
    }
}

impl MeasurementStore for MemoryStore {
    fn existing_keys(
        &self,
        variant: DatasetVariant,
        candidates: &[MeasurementKey],
    ) -> Result<HashSet<MeasurementKey>> {
        let inner = self.read_guard()?;
        let Some(records) = inner.measurements.get(&variant) else {
            return Ok(HashSet::new());
        };
        Ok(candidates
            .iter()
            .filter(|key| records.contains_key(key))
            .cloned()
            .collect())
    }

    fn insert_measurements(
        &self,
        variant: DatasetVariant,
        records: Vec<CanonicalMeasurement>,
    ) -> Result<usize> {
        let mut inner = self.write_guard()?;
        let mut inserted = 0;
        let mut touched_cruises: HashSet<String> = HashSet::new();

        let span_source = variant == DatasetVariant::new(Retrieval::Aod, Frequency::Daily);

        let table = inner.measurements.entry(variant).or_default();
        for record in records {
            let key = record.key();
            if span_source && record.level() == QualityLevel::Lev15 {
                touched_cruises.insert(key.cruise.clone());
            }
            // Conflict on the natural key counts as already present.
            table.entry(key).or_insert_with(|| {
                inserted += 1;
                record
            });
        }

        for cruise in touched_cruises {
            inner.recompute_span(&cruise);
        }

        Ok(inserted)
    }

    fn query_measurements(
        &self,
        variant: DatasetVariant,
        filter: &MeasurementFilter,
    ) -> Result<Vec<CanonicalMeasurement>> {
        let inner = self.read_guard()?;
        let Some(records) = inner.measurements.get(&variant) else {
            return Ok(Vec::new());
        };
        Ok(records
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    fn count_measurements(&self, variant: DatasetVariant) -> Result<usize> {
        let inner = self.read_guard()?;
        Ok(inner
            .measurements
            .get(&variant)
            .map(|records| records.len())
            .unwrap_or(0))
    }

    fn upsert_site(&self, site: Site) -> Result<bool> {
        let mut inner = self.write_guard()?;
        let name = site.name.clone();
        let created = !inner.sites.contains_key(&name);
        inner.sites.entry(name.clone()).or_insert(site);
        inner.recompute_span(&name);
        Ok(created)
    }

    fn sites(&self) -> Result<Vec<Site>> {
        let inner = self.read_guard()?;
        Ok(inner.sites.values().cloned().collect())
    }

    fn register_header(&self, record: HeaderRecord) -> Result<bool> {
        let mut inner = self.write_guard()?;
        if inner.headers.contains_key(&record.key) {
            return Ok(false);
        }
        inner.headers.insert(record.key, record);
        Ok(true)
    }

    fn header(&self, key: &HeaderKey) -> Result<Option<HeaderRecord>> {
        let inner = self.read_guard()?;
        Ok(inner.headers.get(key).cloned())
    }
}
