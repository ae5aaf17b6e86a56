use thiserror::Error;
use ups_ship_core::{CarrierError, CarrierResponse, ShipmentDigest};

/// Failure of the combined confirm-then-accept submission.
///
/// Carrier errors are carried as-is. When accept fails the shipment is already
/// confirmed on the carrier side, so the digest travels with the error and the
/// caller decides whether to accept again or abandon it.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Shipment confirm failed: {0}")]
    Confirm(#[source] CarrierError),

    #[error("Shipment confirm response carried no ShipmentDigest")]
    MissingDigest { response: CarrierResponse },

    #[error("Shipment accept failed for digest {digest}: {source}")]
    Accept {
        digest: ShipmentDigest,
        #[source]
        source: CarrierError,
    },
}

impl SubmitError {
    /// Digest of a shipment that was confirmed but not accepted.
    pub fn digest(&self) -> Option<&ShipmentDigest> {
        match self {
            SubmitError::Accept { digest, .. } => Some(digest),
            _ => None,
        }
    }

    pub fn carrier_error(&self) -> Option<&CarrierError> {
        match self {
            SubmitError::Confirm(err) | SubmitError::Accept { source: err, .. } => Some(err),
            SubmitError::MissingDigest { .. } => None,
        }
    }

    pub fn into_carrier_error(self) -> Option<CarrierError> {
        match self {
            SubmitError::Confirm(err) | SubmitError::Accept { source: err, .. } => Some(err),
            SubmitError::MissingDigest { .. } => None,
        }
    }
}
