use chrono::NaiveDate;

/// Fixed upstream location of the full MAN archive.
pub const MAN_ARCHIVE_URL: &str =
    "https://aeronet.gsfc.nasa.gov/new_web/All_MAN_Data_V3.tar.gz";

/// Default directory the tarball is unpacked into.
pub const DEFAULT_SOURCE_DIR: &str = "src_data";

/// Missing-value sentinel used throughout the MAN archives.
pub const MISSING_VALUE: f64 = -999.0;

/// Usage-policy documents copied into every export archive.
pub const POLICY_FILES: [&str; 2] = ["data_usage_policy.txt", "data_usage_policy.pdf"];

/// Earliest cruise in the MAN record; a request starting here means "no lower bound".
pub fn man_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2004, 10, 16).unwrap()
}

/// Raw date format used by the archives, after `:` has been normalized to `-`.
pub const RAW_DATE_FORMAT: &str = "%d-%m-%Y";

/// Time-of-day format used by the archives.
pub const RAW_TIME_FORMAT: &str = "%H:%M:%S";

/// Number of header lines before the data rows in a raw file.
pub const PREAMBLE_LINES: usize = 5;

/// Annotation suffix some integer-precision channels carry in the header line.
pub const INT_ANNOTATION: &str = "(int)";

/// Synthetic output-only columns appended to every reconstructed header.
pub const SYNTHETIC_COLUMNS: [&str; 5] = ["Coordinates", "Cruise", "Level", "PI", "PI_EMAIL"];

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
