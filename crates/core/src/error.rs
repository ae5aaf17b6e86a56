use thiserror::Error;

/// Failures raised by a carrier client.
///
/// The shipment workflow never wraps or translates these; they reach the
/// caller exactly as the client produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarrierError {
    /// Client could not be built from the supplied credentials or settings
    #[error("Carrier client configuration error: {0}")]
    Configuration(String),

    /// Network failure or timeout talking to the carrier
    #[error("Carrier transport error: {0}")]
    Transport(String),

    /// Carrier answered with an error payload instead of a result
    #[error("Carrier rejected request: {code} - {description}")]
    Rejected { code: String, description: String },
}

impl CarrierError {
    pub fn rejected(code: impl Into<String>, description: impl Into<String>) -> Self {
        CarrierError::Rejected {
            code: code.into(),
            description: description.into(),
        }
    }
}
