use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// UPS account credentials handed to the carrier client once, at construction.
/// Never serialized; `Debug` redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct CarrierCredentials {
    pub access_key: String,
    pub user_name: String,
    pub password: String,
}

impl CarrierCredentials {
    pub fn new(
        access_key: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// True when any of the three values is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        [&self.access_key, &self.user_name, &self.password]
            .iter()
            .any(|v| v.trim().is_empty())
    }
}

impl fmt::Debug for CarrierCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarrierCredentials")
            .field("access_key", &self.access_key)
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How strictly the carrier checks addresses and contents during confirm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationFlag {
    #[default]
    #[serde(rename = "nonvalidate")]
    NoValidation,
    #[serde(rename = "validate")]
    Validate,
    #[serde(rename = "validate_loose")]
    ValidateAndLoose,
}

impl ValidationFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationFlag::NoValidation => "nonvalidate",
            ValidationFlag::Validate => "validate",
            ValidationFlag::ValidateAndLoose => "validate_loose",
        }
    }
}

impl fmt::Display for ValidationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipment description (shipper, ship-to, packages, service). Carrier-defined shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentRequest(Value);

impl ShipmentRequest {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ShipmentRequest {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Label output settings. Absent means the carrier's default label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSpecification(Value);

impl LabelSpecification {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for LabelSpecification {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Receipt output settings. Absent means the carrier's default receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptSpecification(Value);

impl ReceiptSpecification {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ReceiptSpecification {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Token returned by confirm and required by the paired accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentDigest(String);

impl ShipmentDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ShipmentDigest {
    fn from(digest: String) -> Self {
        Self(digest)
    }
}

impl From<&str> for ShipmentDigest {
    fn from(digest: &str) -> Self {
        Self(digest.to_string())
    }
}

impl fmt::Display for ShipmentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const SHIPMENT_DIGEST_FIELD: &str = "ShipmentDigest";
pub const SHIPMENT_IDENTIFICATION_NUMBER_FIELD: &str = "ShipmentIdentificationNumber";
pub const LABEL_IMAGE_POINTER: &str = "/PackageResults/LabelImage/GraphicImage";

/// Result of a confirm or accept call, exactly as the carrier returned it.
///
/// The field set is carrier-defined. Only [`CarrierResponse::shipment_digest`]
/// is relied upon by the submit workflow; the other accessors are read-only
/// conveniences over the fields documented in the UPS Shipping Package XML
/// developer guide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarrierResponse(Map<String, Value>);

impl CarrierResponse {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a nested field by JSON pointer (RFC 6901), e.g.
    /// `/PackageResults/TrackingNumber`. The empty pointer matches nothing.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let path = pointer.strip_prefix('/')?;
        let (head, rest) = match path.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };
        let key = head.replace("~1", "/").replace("~0", "~");
        let value = self.0.get(&key)?;
        match rest {
            Some(rest) => value.pointer(&format!("/{rest}")),
            None => Some(value),
        }
    }

    pub fn shipment_digest(&self) -> Option<ShipmentDigest> {
        self.get(SHIPMENT_DIGEST_FIELD)
            .and_then(Value::as_str)
            .map(ShipmentDigest::from)
    }

    /// UPS tracking number of the shipment.
    pub fn shipment_identification_number(&self) -> Option<&str> {
        self.get(SHIPMENT_IDENTIFICATION_NUMBER_FIELD)
            .and_then(Value::as_str)
    }

    /// Base64 encoded label data of the first package.
    pub fn label_image(&self) -> Option<&str> {
        self.pointer(LABEL_IMAGE_POINTER).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for CarrierResponse {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> CarrierResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reads_digest_and_tracking_number() {
        let resp = response(json!({
            "ShipmentDigest": "ABC123",
            "ShipmentIdentificationNumber": "1Z999",
        }));
        assert_eq!(resp.shipment_digest(), Some(ShipmentDigest::from("ABC123")));
        assert_eq!(resp.shipment_identification_number(), Some("1Z999"));
    }

    #[test]
    fn non_string_digest_is_treated_as_absent() {
        let resp = response(json!({ "ShipmentDigest": 42 }));
        assert_eq!(resp.shipment_digest(), None);
    }

    #[test]
    fn reads_nested_label_image() {
        let resp = response(json!({
            "PackageResults": {
                "LabelImage": { "GraphicImage": "R0lGODlh" }
            }
        }));
        assert_eq!(resp.label_image(), Some("R0lGODlh"));
        assert!(resp.pointer("/PackageResults/Missing").is_none());
        assert!(resp.pointer("PackageResults").is_none());
    }

    #[test]
    fn pointer_unescapes_keys_at_every_depth() {
        let raw = json!({ "a/b": 1, "m~n": 3, "x": { "a/b": 2 } });
        let resp = response(raw.clone());
        for pointer in ["/a~1b", "/m~0n", "/x/a~1b", "/x"] {
            assert_eq!(resp.pointer(pointer), raw.pointer(pointer), "{pointer}");
        }
        assert_eq!(resp.pointer("/a~1b"), Some(&json!(1)));
        assert!(resp.pointer("").is_none());
    }

    #[test]
    fn validation_flag_defaults_to_no_validation() {
        assert_eq!(ValidationFlag::default(), ValidationFlag::NoValidation);
        assert_eq!(
            serde_json::to_value(ValidationFlag::ValidateAndLoose).unwrap(),
            json!("validate_loose")
        );
        assert_eq!(ValidationFlag::Validate.to_string(), "validate");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = CarrierCredentials::new("key", "user", "s3cret");
        let printed = format!("{creds:?}");
        assert!(printed.contains("key"));
        assert!(!printed.contains("s3cret"));
    }

    #[test]
    fn blank_credentials_are_detected() {
        assert!(CarrierCredentials::new("key", " ", "pw").is_blank());
        assert!(!CarrierCredentials::new("key", "user", "pw").is_blank());
    }

    #[test]
    fn response_serializes_back_to_the_same_map() {
        let raw = json!({ "ShipmentDigest": "ABC123", "Extra": { "a": 1 } });
        let resp = response(raw.clone());
        assert_eq!(serde_json::to_value(&resp).unwrap(), raw);
    }
}
