use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::{CanonicalMeasurement, DatasetVariant, MeasurementKey};
use crate::store::MeasurementStore;

/// Outcome of one bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
}

impl LoadSummary {
    pub fn absorb(&mut self, other: LoadSummary) {
        self.inserted += other.inserted;
        self.skipped += other.skipped;
    }
}

impl std::fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} inserted, {} skipped", self.inserted, self.skipped)
    }
}

/// Persists normalized records idempotently.
///
/// Check-then-insert: probe the store for the candidate natural keys, drop
/// candidates already present (or repeated within the batch), then write the
/// remainder in one atomic batch. Correct only when loads for one variant are
/// serialized; the store's unique constraint backstops the race by treating
/// conflicts as "already present".
pub struct BulkLoader<'a> {
    store: &'a dyn MeasurementStore,
}

impl<'a> BulkLoader<'a> {
    pub fn new(store: &'a dyn MeasurementStore) -> Self {
        Self { store }
    }

    /// Zero new records is the normal terminal case when re-ingesting
    /// already-loaded data, never an error.
    pub fn load(
        &self,
        variant: DatasetVariant,
        records: Vec<CanonicalMeasurement>,
    ) -> Result<LoadSummary> {
        if records.is_empty() {
            return Ok(LoadSummary::default());
        }

        let candidate_keys: Vec<MeasurementKey> = records.iter().map(|r| r.key()).collect();
        let mut seen: HashSet<MeasurementKey> = self
            .store
            .existing_keys(variant, &candidate_keys)
            .map_err(|e| load_error(variant, e))?;

        let mut fresh = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for record in records {
            let key = record.key();
            if seen.contains(&key) {
                skipped += 1;
            } else {
                seen.insert(key);
                fresh.push(record);
            }
        }

        if fresh.is_empty() {
            debug!(%variant, skipped, "nothing new to load");
            return Ok(LoadSummary { inserted: 0, skipped });
        }

        let attempted = fresh.len();
        let inserted = self
            .store
            .insert_measurements(variant, fresh)
            .map_err(|e| load_error(variant, e))?;
        // Keys that landed between the probe and the insert surface here as
        // constraint conflicts; they count as skipped, not failures.
        skipped += attempted - inserted;

        info!(%variant, inserted, skipped, "bulk load complete");
        Ok(LoadSummary { inserted, skipped })
    }
}

fn load_error(variant: DatasetVariant, source: ProcessingError) -> ProcessingError {
    ProcessingError::Load {
        variant: variant.to_string(),
        message: source.to_string(),
    }
}
