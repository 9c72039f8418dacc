pub mod detect;
pub mod report;
pub mod series;
pub mod usgs;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Error fetching data for `{state}`: {status}")]
    Status { state: String, status: u16 },
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
