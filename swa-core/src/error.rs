/// Error types for the SWA core library
use thiserror::Error;

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum SwaError {
    /// A column does not line up with the epoch axis
    #[error("Column '{column}' has {found} values but {expected} epochs")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Requested column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Angular coordinates are undefined at the origin
    #[error("Undefined angle: {0}")]
    UndefinedAngle(String),

    /// Trajectory cannot support the requested analysis
    #[error("Degenerate trajectory: {0}")]
    DegenerateTrajectory(String),

    /// Too few usable spectral bins for a slope fit
    #[error("Insufficient spectrum for slope fit (needed: {needed}, found: {found})")]
    InsufficientSpectrum { needed: usize, found: usize },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to read input data
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Epoch parsing failed
    #[error("Failed to parse epoch: {0}")]
    EpochParse(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// A rendering sink rejected a series
    #[error("Failed to render series: {0}")]
    Render(String),
}

/// Type alias for Results using SwaError
pub type Result<T> = std::result::Result<T, SwaError>;
