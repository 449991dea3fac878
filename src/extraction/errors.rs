use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Extraction error: the service returned an empty response")]
    EmptyResponse,
    #[error("Extraction error: response is not a valid record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Extraction error: response is missing required fields [{}]", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("Extraction error: {0}")]
    Service(String)
}
