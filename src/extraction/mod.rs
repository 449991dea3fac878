mod errors;
mod intake;
mod service;
#[cfg(test)]
mod tests;

pub use errors::ExtractionError;
pub use intake::{Intake, IntakeState};
pub use service::{parse_response, Extractor, ImagePayload, RecordedExtractor, DEFAULT_IMAGE_MIME_TYPE};
