use serde::{Deserialize, Serialize};

/// Top-level retrieval kind of a MAN record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Retrieval {
    /// Direct aerosol optical depth retrieval (`.lev*` files).
    Aod,
    /// Spectral Deconvolution Algorithm retrieval (`.ONEILL_*` files).
    Sda,
}

impl Retrieval {
    pub fn from_request_label(label: &str) -> Option<Self> {
        match label {
            "AOD" => Some(Retrieval::Aod),
            "SDA" => Some(Retrieval::Sda),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Retrieval::Aod => "AOD",
            Retrieval::Sda => "SDA",
        }
    }
}

impl std::fmt::Display for Retrieval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Temporal aggregation of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Point,
    Series,
    Daily,
}

impl Frequency {
    /// Filename tag, e.g. `Chief_all_points.lev15`.
    pub fn file_tag(&self) -> &'static str {
        match self {
            Frequency::Point => "all_points",
            Frequency::Series => "series",
            Frequency::Daily => "daily",
        }
    }

    /// Matched in priority order: `all_points` before `series` before `daily`.
    pub fn from_file_tag(tag: &str) -> Option<Self> {
        match tag {
            "all_points" => Some(Frequency::Point),
            "series" => Some(Frequency::Series),
            "daily" => Some(Frequency::Daily),
            _ => None,
        }
    }

    pub fn from_request_label(label: &str) -> Option<Self> {
        match label {
            "Point" => Some(Frequency::Point),
            "Series" => Some(Frequency::Series),
            "Daily" => Some(Frequency::Daily),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Frequency::Point => "Point",
            Frequency::Series => "Series",
            Frequency::Daily => "Daily",
        }
    }

    /// Uppercase tag used in export dataset filenames.
    pub fn export_tag(&self) -> &'static str {
        match self {
            Frequency::Point => "POINT",
            Frequency::Series => "SERIES",
            Frequency::Daily => "DAILY",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Processing maturity tier of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityLevel {
    Lev10,
    Lev15,
    Lev20,
}

impl QualityLevel {
    pub const ALL: [QualityLevel; 3] = [QualityLevel::Lev10, QualityLevel::Lev15, QualityLevel::Lev20];

    /// Numeric code used in filename suffixes and export names (10/15/20).
    pub fn code(&self) -> u8 {
        match self {
            QualityLevel::Lev10 => 10,
            QualityLevel::Lev15 => 15,
            QualityLevel::Lev20 => 20,
        }
    }

    /// Parses the filename suffix digits (`lev15` / `ONEILL_15` -> "15").
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "10" => Some(QualityLevel::Lev10),
            "15" => Some(QualityLevel::Lev15),
            "20" => Some(QualityLevel::Lev20),
            _ => None,
        }
    }

    /// Parses the quality labels used by export requests.
    pub fn from_request_label(label: &str) -> Option<Self> {
        match label {
            "Level 1.0" => Some(QualityLevel::Lev10),
            "Level 1.5" => Some(QualityLevel::Lev15),
            "Level 2.0" => Some(QualityLevel::Lev20),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QualityLevel::Lev10 => "1.0",
            QualityLevel::Lev15 => "1.5",
            QualityLevel::Lev20 => "2.0",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One of the six persisted record shapes (retrieval kind x frequency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetVariant {
    pub retrieval: Retrieval,
    pub frequency: Frequency,
}

impl DatasetVariant {
    pub const ALL: [DatasetVariant; 6] = [
        DatasetVariant { retrieval: Retrieval::Aod, frequency: Frequency::Point },
        DatasetVariant { retrieval: Retrieval::Aod, frequency: Frequency::Series },
        DatasetVariant { retrieval: Retrieval::Aod, frequency: Frequency::Daily },
        DatasetVariant { retrieval: Retrieval::Sda, frequency: Frequency::Point },
        DatasetVariant { retrieval: Retrieval::Sda, frequency: Frequency::Series },
        DatasetVariant { retrieval: Retrieval::Sda, frequency: Frequency::Daily },
    ];

    pub fn new(retrieval: Retrieval, frequency: Frequency) -> Self {
        Self { retrieval, frequency }
    }

    /// Stem of the per-combination export files, e.g. `MAN_DATASET_AOD_DAILY`.
    pub fn export_stem(&self) -> String {
        format!("MAN_DATASET_{}_{}", self.retrieval.as_str(), self.frequency.export_tag())
    }

    /// Full export filename for one quality level, e.g. `MAN_DATASET_AOD_DAILY15.csv`.
    pub fn export_file_name(&self, level: QualityLevel) -> String {
        format!("{}{}.csv", self.export_stem(), level.code())
    }
}

impl std::fmt::Display for DatasetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.retrieval, self.frequency)
    }
}
