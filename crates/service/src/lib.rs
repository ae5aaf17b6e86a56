//! Two-phase UPS shipment submission.
//!
//! [`UpsShipmentService`] wraps a [`ShippingClient`] and exposes Ship Confirm,
//! Ship Accept and a one-step submit that chains them. Requests and responses
//! pass through untouched; carrier errors are never caught or retried here.

mod error;

pub use error::SubmitError;

use anyhow::{Context, Result};
use carrier::{ClientConfig, ShippingClient};
use tracing::Instrument;
use ups_ship_core::{
    CarrierCredentials, CarrierError, CarrierResponse, LabelSpecification, ReceiptSpecification,
    ShipmentDigest, ShipmentRequest, ValidationFlag,
};

pub struct UpsShipmentService<C: ShippingClient> {
    client: C,
    logger: tracing::Span,
}

impl<C: ShippingClient> UpsShipmentService<C> {
    /// Build the service and its carrier client.
    ///
    /// `is_production` selects the production host; otherwise the client is
    /// pointed at the customer integration environment. Errors come from the
    /// client's own construction.
    pub fn new(
        access_key: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
        is_production: bool,
        logger: tracing::Span,
    ) -> Result<Self, CarrierError> {
        let credentials = CarrierCredentials::new(access_key, user_name, password);
        Self::connect(ClientConfig::new(credentials, !is_production).with_logger(logger))
    }

    /// Like [`UpsShipmentService::new`], with an HTTP client the carrier client must use.
    pub fn with_transport(
        credentials: CarrierCredentials,
        is_production: bool,
        transport: reqwest::Client,
        logger: tracing::Span,
    ) -> Result<Self, CarrierError> {
        Self::connect(
            ClientConfig::new(credentials, !is_production)
                .with_transport(transport)
                .with_logger(logger),
        )
    }

    /// Build the service from the settings file in the user's config directory.
    pub fn from_stored_config(logger: tracing::Span) -> Result<Self> {
        let app = config::load()?;
        Self::from_config(&app.ups, logger)
    }

    /// Build the service from settings, with credentials from env and keychain.
    pub fn from_config(cfg: &config::UpsConfig, logger: tracing::Span) -> Result<Self> {
        Self::from_config_with(cfg, config::env_or_keychain, logger)
    }

    /// Same as [`UpsShipmentService::from_config`] with an injectable credential lookup.
    pub fn from_config_with<F>(
        cfg: &config::UpsConfig,
        lookup: F,
        logger: tracing::Span,
    ) -> Result<Self>
    where
        F: Fn(config::Source<'_>) -> Option<String>,
    {
        let credentials = config::resolve_credentials_with(cfg, lookup)
            .context("Failed to resolve UPS credentials")?;
        let client_config =
            ClientConfig::new(credentials, !cfg.production).with_logger(logger);
        Self::connect(client_config).context("Failed to create UPS shipping client")
    }

    fn connect(client_config: ClientConfig) -> Result<Self, CarrierError> {
        let logger = client_config.logger.clone();
        tracing::debug!(
            parent: &logger,
            environment = ?client_config.environment(),
            "Creating UPS shipping client"
        );
        let client = C::connect(client_config)?;
        Ok(Self { client, logger })
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Ship Confirm request. The response's `ShipmentDigest` feeds
    /// [`UpsShipmentService::accept_shipment`].
    pub async fn confirm_shipment(
        &self,
        shipment: &ShipmentRequest,
        validation: ValidationFlag,
        label_spec: Option<&LabelSpecification>,
        receipt_spec: Option<&ReceiptSpecification>,
    ) -> Result<CarrierResponse, CarrierError> {
        self.client
            .confirm(validation, shipment, label_spec, receipt_spec)
            .instrument(self.logger.clone())
            .await
    }

    /// Ship Accept request for a digest returned by a previous confirm.
    ///
    /// The response carries `ShipmentIdentificationNumber` (tracking number)
    /// and `PackageResults/LabelImage/GraphicImage` (base64 label).
    pub async fn accept_shipment(
        &self,
        digest: &ShipmentDigest,
    ) -> Result<CarrierResponse, CarrierError> {
        self.client
            .accept(digest)
            .instrument(self.logger.clone())
            .await
    }

    /// One-step submission: confirm, then accept with the issued digest.
    ///
    /// Nothing is undone when accept fails; [`SubmitError::Accept`] hands the
    /// digest back so the caller can retry the accept or let the shipment lapse.
    pub async fn submit_shipment(
        &self,
        shipment: &ShipmentRequest,
        validation: ValidationFlag,
        label_spec: Option<&LabelSpecification>,
        receipt_spec: Option<&ReceiptSpecification>,
    ) -> Result<CarrierResponse, SubmitError> {
        let confirmed = self
            .confirm_shipment(shipment, validation, label_spec, receipt_spec)
            .await
            .map_err(SubmitError::Confirm)?;

        let Some(digest) = confirmed.shipment_digest() else {
            tracing::warn!(parent: &self.logger, "Confirm response has no ShipmentDigest");
            return Err(SubmitError::MissingDigest {
                response: confirmed,
            });
        };

        match self.accept_shipment(&digest).await {
            Ok(accepted) => {
                tracing::info!(
                    parent: &self.logger,
                    tracking_number = accepted.shipment_identification_number().unwrap_or_default(),
                    "Shipment submitted"
                );
                Ok(accepted)
            }
            Err(source) => {
                tracing::warn!(
                    parent: &self.logger,
                    digest = %digest,
                    error = %source,
                    "Shipment confirmed but not accepted"
                );
                Err(SubmitError::Accept { digest, source })
            }
        }
    }
}
