//! Shipment digest generation for clients that issue their own digests.

use base64::prelude::*;
use sha2::{Digest, Sha256};
use ups_ship_core::{ShipmentDigest, ShipmentRequest};

/// Compute SHA-256 digest in base64 format
pub fn compute_sha256_base64(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    BASE64_STANDARD.encode(hasher.finalize())
}

/// Issue a digest bound to `shipment`. A random nonce keeps two confirms of
/// the same request from sharing a digest.
pub fn issue_digest(shipment: &ShipmentRequest) -> ShipmentDigest {
    let mut payload = shipment.as_value().to_string().into_bytes();
    payload.extend_from_slice(uuid::Uuid::new_v4().as_bytes());
    ShipmentDigest::new(compute_sha256_base64(&payload))
}
