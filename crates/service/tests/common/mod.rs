//! Shared helpers for shipment workflow tests

#![allow(dead_code)]

pub mod recording_client;

use serde_json::{json, Value};
use ups_ship_core::{CarrierResponse, ShipmentRequest};

/// Install a test-writer subscriber so client and service events show up
/// in failing test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

pub fn response(value: Value) -> CarrierResponse {
    serde_json::from_value(value).expect("response fixture must be a JSON object")
}

pub fn make_shipment() -> ShipmentRequest {
    ShipmentRequest::new(json!({
        "Description": "Spare parts",
        "Shipper": {
            "Name": "ACME Widgets",
            "ShipperNumber": "X1234",
            "Address": { "City": "Atlanta", "StateProvinceCode": "GA", "CountryCode": "US" }
        },
        "ShipTo": {
            "CompanyName": "Example Corp",
            "Address": { "City": "Timonium", "StateProvinceCode": "MD", "CountryCode": "US" }
        },
        "Service": { "Code": "03" },
        "Package": [{ "PackagingType": { "Code": "02" }, "PackageWeight": { "Weight": "5" } }]
    }))
}
