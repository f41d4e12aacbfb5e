use reqwest::StatusCode;

/// Everything that can go wrong while building a dashboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Unexpected response from {url}: {source}")]
    Shape {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Provider response is missing `{0}`")]
    MissingField(&'static str),

    #[error("No {0} forecast periods available")]
    EmptySequence(&'static str),

    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Unknown timezone '{0}'. Use an IANA name such as America/New_York.")]
    UnknownTimezone(String),

    #[error("Forecast offset of {0} hours is out of range")]
    InvalidOffset(i64),

    #[error("The sun does not both rise and set at this location on {0}")]
    NoSunEvent(chrono::NaiveDate),
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
