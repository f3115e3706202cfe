use thiserror::Error;

/// General encoding errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid input data: unsupported pixel layout, or odd dimensions
    /// for a subsampled layout.
    #[error("Invalid input data: {0}")]
    InvalidData(String),
    /// Unsupported configuration option: a prediction method outside
    /// the accepted range, or one of the rejected predictor variants.
    #[error("Option not found: {0}")]
    OptionNotFound(String),
    /// Scratch or packet buffer could not be sized/allocated.
    #[error("Allocation failure: {0}")]
    Alloc(String),
}

/// A specialised `Result` type for encoding operations.
pub type Result<T> = ::std::result::Result<T, Error>;
