use thiserror::Error;

pub const ACCESS_DENIED: &str = "Access denied. Check API key.";
pub const GEOCODE_NOT_FOUND: &str = "No data for this city.";
pub const WEATHER_NOT_FOUND: &str = "No weather data for this city.";

/// Failures surfaced by the lookup pipeline.
///
/// The `Display` text is what the user sees, so variants carrying provider
/// detail print it verbatim.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{}", ACCESS_DENIED)]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    /// Any other non-success HTTP status.
    #[error("{detail}")]
    Provider { status: u16, detail: String },

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse {0}")]
    Decode(String),

    /// A newer submission started before this one finished.
    #[error("Request superseded by a newer one")]
    Superseded,
}

impl WeatherError {
    pub fn decode(what: &str, err: serde_json::Error) -> Self {
        Self::Decode(format!("{what}: {err}"))
    }
}

/// Failures of the best-effort key-value store. Never escalated by the
/// resolver; callers that persist user settings may report them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store contents are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}
