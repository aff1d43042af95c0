/// Error types for loading the tax and district datasets
use thiserror::Error;

/// Failure while fetching or parsing one of the two page datasets.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The request never produced a response (network error, CORS, aborted)
    #[error("Request for {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The server answered with a non-success status
    #[error("Request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read as text
    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },

    /// The tax dataset is not a JSON array of `{name, tax}` objects
    #[error("Failed to parse tax dataset: {0}")]
    TaxParse(#[from] serde_json::Error),

    /// The geographic dataset is not valid GeoJSON
    #[error("Failed to parse district dataset: {0}")]
    DistrictParse(#[from] geojson::Error),

    /// The geographic dataset parsed, but is a bare geometry or feature
    #[error("District dataset must be a FeatureCollection, found {0}")]
    NotFeatureCollection(&'static str),
}

/// Type alias for Results using DataLoadError
pub type Result<T> = std::result::Result<T, DataLoadError>;
