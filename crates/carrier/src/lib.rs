use async_trait::async_trait;
use std::fmt;
use ups_ship_core::{
    CarrierCredentials, CarrierError, CarrierResponse, LabelSpecification, ReceiptSpecification,
    ShipmentDigest, ShipmentRequest, ValidationFlag,
};

pub mod digest;
pub mod mock;

const PRODUCTION_BASE_URL: &str = "https://onlinetools.ups.com";
const TESTING_BASE_URL: &str = "https://wwwcie.ups.com";

/// UPS environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Testing,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Testing => TESTING_BASE_URL,
        }
    }

    /// URL of an XML tool endpoint, e.g. `ShipConfirm` or `ShipAccept`.
    pub fn endpoint(&self, tool: &str) -> String {
        format!("{}/ups.app/xml/{}", self.base_url(), tool)
    }
}

/// Everything a carrier client is built from.
#[derive(Clone)]
pub struct ClientConfig {
    pub credentials: CarrierCredentials,
    pub testing_environment: bool,
    /// HTTP client to use instead of the client's own
    pub transport: Option<reqwest::Client>,
    /// Span the client records its requests and responses under
    pub logger: tracing::Span,
}

impl ClientConfig {
    pub fn new(credentials: CarrierCredentials, testing_environment: bool) -> Self {
        Self {
            credentials,
            testing_environment,
            transport: None,
            logger: tracing::Span::none(),
        }
    }

    pub fn with_transport(mut self, transport: reqwest::Client) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_logger(mut self, logger: tracing::Span) -> Self {
        self.logger = logger;
        self
    }

    pub fn environment(&self) -> Environment {
        if self.testing_environment {
            Environment::Testing
        } else {
            Environment::Production
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials)
            .field("testing_environment", &self.testing_environment)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

/// Carrier client exposing the two-phase UPS shipping workflow.
///
/// Implementations own request building, transport and response parsing.
/// Callers only see opaque requests and responses.
#[async_trait]
pub trait ShippingClient: Send + Sync {
    /// Build a client. Credential problems surface here as
    /// [`CarrierError::Configuration`].
    fn connect(config: ClientConfig) -> Result<Self, CarrierError>
    where
        Self: Sized;

    /// Ship Confirm: validate and rate a shipment, returning a `ShipmentDigest`.
    async fn confirm(
        &self,
        validation: ValidationFlag,
        shipment: &ShipmentRequest,
        label_spec: Option<&LabelSpecification>,
        receipt_spec: Option<&ReceiptSpecification>,
    ) -> Result<CarrierResponse, CarrierError>;

    /// Ship Accept: finalize a confirmed shipment, returning tracking number and labels.
    async fn accept(&self, digest: &ShipmentDigest) -> Result<CarrierResponse, CarrierError>;
}
