pub mod error;
pub mod models;

pub use error::CarrierError;
pub use models::{
    CarrierCredentials, CarrierResponse, LabelSpecification, ReceiptSpecification,
    ShipmentDigest, ShipmentRequest, ValidationFlag,
};
