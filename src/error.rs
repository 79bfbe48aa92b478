use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("Unknown source \"{input}\" (expected one of: {expected})")]
    UnknownSource { input: String, expected: String },

    #[error("Invalid year: {input}")]
    InvalidYear { input: i32 },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
