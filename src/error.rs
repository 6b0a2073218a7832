use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive download failed: {0}")]
    Download(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse '{file}': {message}")]
    Parse { file: String, message: String },

    #[error("Row {row} of cruise '{cruise}' could not be normalized: {message}")]
    Normalization {
        cruise: String,
        row: usize,
        message: String,
    },

    #[error("Load into {variant} failed: {message}")]
    Load { variant: String, message: String },

    #[error("Invalid export request: {0}")]
    ExportQuery(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Archive packaging error: {0}")]
    Archive(String),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        ProcessingError::Parse {
            file: file.into(),
            message: message.into(),
        }
    }
}
