use serde::{Deserialize, Serialize};

use crate::models::variant::{Frequency, QualityLevel, Retrieval};

/// Identity of a stored file preamble: one per (frequency, retrieval, level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeaderKey {
    pub frequency: Frequency,
    pub retrieval: Retrieval,
    pub level: QualityLevel,
}

/// The preamble captured from the first file seen for a key, reused verbatim
/// when exports reconstruct that combination. Registration is first-wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub key: HeaderKey,
    pub preamble_1: String,
    pub preamble_2: String,
    pub column_header: String,
}
