#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read fixture file {path}: {source}", path = path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture JSON: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize scan data: {0}")]
    Serialization(serde_json::Error),
    #[error("fixture schema mismatch at {path}: {message}")]
    Translation { path: String, message: String },
    #[error("pain area at index {index} is missing a location")]
    MissingLocation { index: usize },
    #[error("duplicate pain area location {location:?} at indices {first} and {second}")]
    DuplicateLocation {
        location: String,
        first: usize,
        second: usize,
    },
    #[error("invalid value at {path}: {source}")]
    InvalidField {
        path: String,
        #[source]
        source: scan_types::TypesError,
    },
    #[error(transparent)]
    Types(#[from] scan_types::TypesError),
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
