use std::future::Future;

use tracing::debug;

use crate::extraction::ExtractionError;
use crate::models::ExtractedRecord;

/// MIME type assumed when a payload does not declare one.
pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// Receipt image as handed over by the client, usually a `data:` URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePayload {
    mime_type: Option<String>,
    data: String
}

impl ImagePayload {
    /// Splits a `data:<mime>;base64,<data>` URL. A string without a comma is taken as bare data.
    pub fn from_data_url(data_url: &str) -> Self {
        let data_url = data_url.trim();

        match data_url.split_once(',') {
            Some((header, data)) => Self {
                mime_type: header.strip_prefix("data:")
                    .and_then(|header| header.split(';').next())
                    .filter(|mime_type| !mime_type.is_empty())
                    .map(str::to_string),
                data: data.to_string()
            },
            None => Self {
                mime_type: None,
                data: data_url.to_string()
            }
        }
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or(DEFAULT_IMAGE_MIME_TYPE)
    }

    /// Base64 body without the URL header.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Image understanding service that reads a receipt into a partial record.
pub trait Extractor {
    fn extract(&self, image: &ImagePayload) -> impl Future<Output = Result<ExtractedRecord, ExtractionError>> + Send;
}

/// Validates a raw service response.
///
/// The service contract requires `type`, `status`, `piAmount`, `usdtAmount` and
/// `timestamp`; a response lacking any of them is malformed.
pub fn parse_response(text: &str) -> Result<ExtractedRecord, ExtractionError> {
    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyResponse)
    }

    let extracted: ExtractedRecord = serde_json::from_str(text)?;
    let missing = extracted.missing_required_fields();

    if !missing.is_empty() {
        return Err(ExtractionError::MissingFields(missing))
    }

    Ok(extracted)
}

/// Replays a previously captured service response regardless of the image.
pub struct RecordedExtractor {
    response: String
}

impl RecordedExtractor {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into()
        }
    }
}

impl Extractor for RecordedExtractor {
    async fn extract(&self, image: &ImagePayload) -> Result<ExtractedRecord, ExtractionError> {
        debug!("Replaying recorded extraction for a {} payload of {} bytes", image.mime_type(), image.data().len());
        parse_response(&self.response)
    }
}
