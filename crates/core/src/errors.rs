use thiserror::Error;

/// Unified error type for the price-pulse-core library.
///
/// Per-symbol data conditions (missing series, not enough history) are NOT
/// errors; they surface as [`crate::models::change::SkipReason`] or as a
/// degraded baseline on the record. `CoreError` is reserved for caller
/// defects, bad input data and collaborator failures.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input / Configuration ───────────────────────────────────────
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Unknown period selector: {0}")]
    UnknownPeriod(String),

    #[error("Unknown status mode: {0}")]
    UnknownStatus(String),

    // ── Snapshots ───────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Providers ───────────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("No provider available for asset category: {0}")]
    NoProvider(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
