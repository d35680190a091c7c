//! Shipping directory, quote and tracking types.

use super::serde_helpers::{null_as_default, string_or_number};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    /// Province id
    #[serde(deserialize_with = "string_or_number")]
    pub province_id: String,
    /// Province name
    pub province: String,
}

/// A city or regency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// City id, used as shipping origin or destination
    #[serde(deserialize_with = "string_or_number")]
    pub city_id: String,
    /// Parent province id
    #[serde(deserialize_with = "string_or_number")]
    pub province_id: String,
    /// Parent province name
    #[serde(default)]
    pub province: String,
    /// `Kota` or `Kabupaten`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// City name
    pub city_name: String,
    /// Postal code
    #[serde(default)]
    pub postal_code: String,
}

/// Price and estimate for one courier service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDetail {
    /// Price
    pub value: Decimal,
    /// Delivery estimate, in days
    #[serde(default)]
    pub etd: String,
    /// Courier note
    #[serde(default)]
    pub note: String,
}

/// One courier service quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingCost {
    /// Service code
    pub service: String,
    /// Service description
    #[serde(default)]
    pub description: String,
    /// Quotes for the service
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost: Vec<CostDetail>,
}

/// Quotes from one courier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierResult {
    /// Courier code
    pub code: String,
    /// Courier name
    #[serde(default)]
    pub name: String,
    /// Services offered
    #[serde(default, deserialize_with = "null_as_default")]
    pub costs: Vec<ShippingCost>,
}

impl CourierResult {
    /// Cheapest quote across all services, with its service code.
    pub fn cheapest(&self) -> Option<(&str, &CostDetail)> {
        self.costs
            .iter()
            .flat_map(|svc| svc.cost.iter().map(move |c| (svc.service.as_str(), c)))
            .min_by_key(|(_, c)| c.value)
    }
}

/// Waybill summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackingSummary {
    /// Courier code
    pub courier_code: String,
    /// Courier name
    pub courier_name: String,
    /// Waybill number
    pub waybill_number: String,
    /// Service code
    pub service_code: String,
    /// Waybill date
    pub waybill_date: String,
    /// Sender
    pub shipper_name: String,
    /// Recipient
    pub receiver_name: String,
    /// Origin city
    pub origin: String,
    /// Destination city
    pub destination: String,
    /// Current status
    pub status: String,
}

/// One tracking checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManifestEntry {
    /// Checkpoint description
    pub manifest_description: String,
    /// Checkpoint date
    pub manifest_date: String,
    /// Checkpoint time
    pub manifest_time: String,
    /// Checkpoint city
    pub city_name: String,
}

/// Proof of delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeliveryStatus {
    /// Delivery status
    pub status: String,
    /// Person who received the parcel
    pub pod_receiver: String,
    /// Delivery date
    pub pod_date: String,
    /// Delivery time
    pub pod_time: String,
}

/// Tracking result for a waybill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackingResult {
    /// Whether the parcel was delivered
    pub delivered: bool,
    /// Waybill summary
    pub summary: TrackingSummary,
    /// Checkpoints, oldest first as reported by the courier
    #[serde(deserialize_with = "null_as_default")]
    pub manifest: Vec<ManifestEntry>,
    /// Proof of delivery
    pub delivery_status: DeliveryStatus,
}
