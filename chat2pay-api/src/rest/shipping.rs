//! Shipping directory, quotes and tracking.

use super::require;
use crate::constants::endpoints;
use crate::types::{City, CourierResult, Province, TrackingResult};
use crate::Chat2Pay;
use chat2pay_core::{ReadOptions, Result};

impl Chat2Pay {
    /// Lists provinces.
    pub async fn fetch_provinces(&self) -> Result<Vec<Province>> {
        self.get_envelope(endpoints::SHIPPING_PROVINCES, ReadOptions::default())
            .await?
            .into_data_or_default("Failed to get provinces")
    }

    /// Lists cities, optionally within one province.
    pub async fn fetch_cities(&self, province_id: Option<&str>) -> Result<Vec<City>> {
        let province_id = province_id.map(str::trim).filter(|id| !id.is_empty());
        let options = ReadOptions::default().with_param("province_id", province_id);
        self.get_envelope(endpoints::SHIPPING_CITIES, options)
            .await?
            .into_data_or_default("Failed to get cities")
    }

    /// Quotes shipping from `origin` to `destination` city ids for a parcel
    /// of `weight` grams, across all couriers unless one is named.
    pub async fn fetch_shipping_cost(
        &self,
        origin: &str,
        destination: &str,
        weight: u32,
        courier: Option<&str>,
    ) -> Result<Vec<CourierResult>> {
        let options = ReadOptions::default()
            .with_param("origin", require("origin", origin)?)
            .with_param("destination", require("destination", destination)?)
            .with_param("weight", weight)
            .with_param("courier", courier.filter(|c| !c.is_empty()));
        self.get_envelope(endpoints::SHIPPING_COST, options)
            .await?
            .into_data_or_default("Failed to get shipping cost")
    }

    /// Tracks a waybill with its courier.
    pub async fn track_shipment(&self, waybill: &str, courier: &str) -> Result<TrackingResult> {
        let options = ReadOptions::default()
            .with_param("waybill", require("waybill", waybill)?)
            .with_param("courier", require("courier", courier)?);
        self.get_envelope(endpoints::SHIPPING_TRACK, options)
            .await?
            .into_data("Failed to track shipment")
    }
}
