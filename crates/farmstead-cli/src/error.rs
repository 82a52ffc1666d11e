//! Error types for the Farmstead binary.
//!
//! [`CliError`] is the top-level error type that `main` propagates with `?`.
//! Game rule violations never reach it; they are printed and play goes on.

/// Top-level error for the Farmstead binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: farmstead_core::ConfigError,
    },

    /// Reading commands or writing output failed.
    #[error("terminal I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
