//! Error types

mod api;
mod field;

pub use api::*;
pub use field::*;

/// Errors returned by fetch and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page request failed or its body could not be decoded.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server kept reporting outstanding records past the page ceiling.
    #[error(
        "Page limit of {max_pages} reached with {remaining} records outstanding ({collected} of {total} collected)"
    )]
    PageLimitExceeded {
        /// The configured ceiling.
        max_pages: u32,
        /// Server-reported total.
        total: u64,
        /// Records accumulated before giving up.
        collected: usize,
        /// Records the server still claimed to have.
        remaining: i64,
    },

    /// Failed to write CSV output.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error while exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export produced invalid output.
    #[error("Export error: {0}")]
    Export(String),
}

impl Error {
    /// Creates an export error.
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }
}
