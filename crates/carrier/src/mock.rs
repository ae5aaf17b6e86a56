use super::{digest::issue_digest, ClientConfig, Environment, ShippingClient};
use async_trait::async_trait;
use base64::prelude::*;
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::{sleep, Duration};
use ups_ship_core::{
    CarrierError, CarrierResponse, LabelSpecification, ReceiptSpecification, ShipmentDigest,
    ShipmentRequest, ValidationFlag,
};

const DEFAULT_LABEL_FORMAT: &str = "GIF";
const SIMULATED_LATENCY: Duration = Duration::from_millis(50);

/// Offline sandbox client. Issues digests on confirm and honours each one
/// exactly once on accept, without touching the network.
pub struct MockClient {
    environment: Environment,
    logger: tracing::Span,
    // confirmed shipments awaiting accept, keyed by digest; entries that are
    // never accepted live as long as the client
    confirmed: Mutex<HashMap<ShipmentDigest, ConfirmedShipment>>,
}

struct ConfirmedShipment {
    tracking_number: String,
    label_format: String,
    with_receipt: bool,
}

impl MockClient {
    pub fn environment(&self) -> Environment {
        self.environment
    }

    fn tracking_number() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        format!("1Z{suffix}")
    }

    fn check_addresses(shipment: &ShipmentRequest) -> Result<(), CarrierError> {
        for party in ["Shipper", "ShipTo"] {
            if shipment.as_value().get(party).is_none() {
                return Err(CarrierError::rejected(
                    "missing_party",
                    format!("Shipment has no {party}"),
                ));
            }
        }
        Ok(())
    }

    fn label_format(label_spec: Option<&LabelSpecification>) -> String {
        label_spec
            .and_then(|spec| spec.as_value().pointer("/LabelImageFormat/Code"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_LABEL_FORMAT)
            .to_string()
    }

    fn fake_image(kind: &str, tracking_number: &str) -> String {
        BASE64_STANDARD.encode(format!("{kind}:{tracking_number}"))
    }
}

#[async_trait]
impl ShippingClient for MockClient {
    fn connect(config: ClientConfig) -> Result<Self, CarrierError> {
        if config.credentials.is_blank() {
            return Err(CarrierError::Configuration(
                "access key, user name and password are required".to_string(),
            ));
        }
        Ok(Self {
            environment: config.environment(),
            logger: config.logger,
            confirmed: Mutex::new(HashMap::new()),
        })
    }

    async fn confirm(
        &self,
        validation: ValidationFlag,
        shipment: &ShipmentRequest,
        label_spec: Option<&LabelSpecification>,
        receipt_spec: Option<&ReceiptSpecification>,
    ) -> Result<CarrierResponse, CarrierError> {
        if validation != ValidationFlag::NoValidation {
            Self::check_addresses(shipment)?;
        }

        // simulate network latency
        sleep(SIMULATED_LATENCY).await;

        let digest = issue_digest(shipment);
        let tracking_number = Self::tracking_number();
        let label_format = Self::label_format(label_spec);

        tracing::info!(
            parent: &self.logger,
            endpoint = %self.environment.endpoint("ShipConfirm"),
            %validation,
            %tracking_number,
            "Shipment confirmed by sandbox carrier"
        );

        self.confirmed
            .lock()
            .map_err(|_| CarrierError::Transport("sandbox state poisoned".to_string()))?
            .insert(
                digest.clone(),
                ConfirmedShipment {
                    tracking_number: tracking_number.clone(),
                    label_format,
                    with_receipt: receipt_spec.is_some(),
                },
            );

        let mut fields = Map::new();
        fields.insert("ShipmentDigest".into(), json!(digest.as_str()));
        fields.insert("ShipmentIdentificationNumber".into(), json!(tracking_number));
        Ok(CarrierResponse::new(fields))
    }

    async fn accept(&self, digest: &ShipmentDigest) -> Result<CarrierResponse, CarrierError> {
        sleep(SIMULATED_LATENCY).await;

        let shipment = self
            .confirmed
            .lock()
            .map_err(|_| CarrierError::Transport("sandbox state poisoned".to_string()))?
            .remove(digest)
            .ok_or_else(|| {
                CarrierError::rejected(
                    "invalid_digest",
                    "Shipment digest is unknown or already accepted",
                )
            })?;

        tracing::info!(
            parent: &self.logger,
            endpoint = %self.environment.endpoint("ShipAccept"),
            tracking_number = %shipment.tracking_number,
            "Shipment accepted by sandbox carrier"
        );

        let mut fields = Map::new();
        fields.insert(
            "ShipmentIdentificationNumber".into(),
            json!(shipment.tracking_number),
        );
        fields.insert(
            "PackageResults".into(),
            json!({
                "TrackingNumber": shipment.tracking_number,
                "LabelImage": {
                    "LabelImageFormat": { "Code": shipment.label_format },
                    "GraphicImage": Self::fake_image("label", &shipment.tracking_number),
                },
            }),
        );
        if shipment.with_receipt {
            fields.insert(
                "ControlLogReceipt".into(),
                json!({
                    "ImageFormat": { "Code": "HTML" },
                    "GraphicImage": Self::fake_image("receipt", &shipment.tracking_number),
                }),
            );
        }
        Ok(CarrierResponse::new(fields))
    }
}
