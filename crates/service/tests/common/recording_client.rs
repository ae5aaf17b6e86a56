//! Recording carrier client for testing
//!
//! Scripted confirm/accept results plus call tracking, so tests can check
//! exactly which carrier calls the service made and with what arguments.

use super::response;
use async_trait::async_trait;
use carrier::{ClientConfig, ShippingClient};
use serde_json::json;
use std::sync::Mutex;
use ups_ship_core::{
    CarrierError, CarrierResponse, LabelSpecification, ReceiptSpecification, ShipmentDigest,
    ShipmentRequest, ValidationFlag,
};

/// Access key `connect` refuses, to exercise construction failures
pub const REJECTED_ACCESS_KEY: &str = "revoked-key";

/// Call record for `confirm`
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmCall {
    pub validation: ValidationFlag,
    pub shipment: ShipmentRequest,
    pub label_spec: Option<LabelSpecification>,
    pub receipt_spec: Option<ReceiptSpecification>,
}

pub struct RecordingClient {
    config: ClientConfig,
    confirm_result: Mutex<Result<CarrierResponse, CarrierError>>,
    accept_result: Mutex<Result<CarrierResponse, CarrierError>>,
    // Call tracking
    confirm_calls: Mutex<Vec<ConfirmCall>>,
    accept_calls: Mutex<Vec<ShipmentDigest>>,
}

impl RecordingClient {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // === Scripting methods ===

    pub fn set_confirm_response(&self, resp: CarrierResponse) {
        *self.confirm_result.lock().unwrap() = Ok(resp);
    }

    pub fn set_accept_response(&self, resp: CarrierResponse) {
        *self.accept_result.lock().unwrap() = Ok(resp);
    }

    /// Make `confirm` return an error
    pub fn fail_confirm(&self, err: CarrierError) {
        *self.confirm_result.lock().unwrap() = Err(err);
    }

    /// Make `accept` return an error
    pub fn fail_accept(&self, err: CarrierError) {
        *self.accept_result.lock().unwrap() = Err(err);
    }

    // === Call verification methods ===

    pub fn confirm_calls(&self) -> Vec<ConfirmCall> {
        self.confirm_calls.lock().unwrap().clone()
    }

    pub fn accept_calls(&self) -> Vec<ShipmentDigest> {
        self.accept_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShippingClient for RecordingClient {
    fn connect(config: ClientConfig) -> Result<Self, CarrierError> {
        if config.credentials.access_key == REJECTED_ACCESS_KEY {
            return Err(CarrierError::Configuration(
                "access key has been revoked".to_string(),
            ));
        }
        Ok(Self {
            config,
            confirm_result: Mutex::new(Ok(response(json!({ "ShipmentDigest": "ABC123" })))),
            accept_result: Mutex::new(Ok(response(json!({
                "ShipmentIdentificationNumber": "1Z999",
                "LabelImage": "<base64>"
            })))),
            confirm_calls: Mutex::new(Vec::new()),
            accept_calls: Mutex::new(Vec::new()),
        })
    }

    async fn confirm(
        &self,
        validation: ValidationFlag,
        shipment: &ShipmentRequest,
        label_spec: Option<&LabelSpecification>,
        receipt_spec: Option<&ReceiptSpecification>,
    ) -> Result<CarrierResponse, CarrierError> {
        self.confirm_calls.lock().unwrap().push(ConfirmCall {
            validation,
            shipment: shipment.clone(),
            label_spec: label_spec.cloned(),
            receipt_spec: receipt_spec.cloned(),
        });
        self.confirm_result.lock().unwrap().clone()
    }

    async fn accept(&self, digest: &ShipmentDigest) -> Result<CarrierResponse, CarrierError> {
        self.accept_calls.lock().unwrap().push(digest.clone());
        self.accept_result.lock().unwrap().clone()
    }
}
