//! Order types.

use super::serde_helpers::{null_as_default, string_or_number};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line of an order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemRequest {
    /// Product to buy
    pub product_id: String,
    /// Quantity, at least one
    pub quantity: u32,
}

impl OrderItemRequest {
    /// Creates an order line.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Checkout payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOrderRequest {
    /// Order lines
    pub items: Vec<OrderItemRequest>,
    /// Street address
    pub shipping_address: String,
    /// City name
    pub shipping_city: String,
    /// City id from the shipping directory
    pub shipping_city_id: String,
    /// Province name
    pub shipping_province: String,
    /// Postal code
    pub shipping_postal_code: String,
    /// Courier code, e.g. `jne`
    pub courier: String,
    /// Courier service, e.g. `REG`
    pub courier_service: String,
    /// Quoted shipping cost, sent as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost: Decimal,
    /// Quoted delivery estimate
    pub shipping_etd: String,
    /// Note to the merchant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Line of a placed order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItem {
    /// Line id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Product id
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
    /// Product name at purchase time
    #[serde(default)]
    pub product_name: String,
    /// Unit price at purchase time
    pub product_price: Decimal,
    /// Quantity
    pub quantity: u32,
    /// Line total
    pub subtotal: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Order id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Buyer
    #[serde(deserialize_with = "string_or_number")]
    pub customer_id: String,
    /// Seller
    #[serde(deserialize_with = "string_or_number")]
    pub merchant_id: String,
    /// Fulfilment status
    pub status: String,
    /// Sum of the lines
    pub subtotal: Decimal,
    /// Shipping charge
    pub shipping_cost: Decimal,
    /// Amount due
    pub total: Decimal,
    /// Courier code
    #[serde(default)]
    pub courier: Option<String>,
    /// Courier service
    #[serde(default)]
    pub courier_service: Option<String>,
    /// Delivery estimate
    #[serde(default)]
    pub shipping_etd: Option<String>,
    /// Waybill number once shipped
    #[serde(default)]
    pub tracking_number: Option<String>,
    /// Street address
    #[serde(default)]
    pub shipping_address: Option<String>,
    /// City name
    #[serde(default)]
    pub shipping_city: Option<String>,
    /// Province name
    #[serde(default)]
    pub shipping_province: Option<String>,
    /// Postal code
    #[serde(default)]
    pub shipping_postal_code: Option<String>,
    /// Payment method
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Payment status
    #[serde(default)]
    pub payment_status: String,
    /// Hosted payment page
    #[serde(default)]
    pub payment_url: Option<String>,
    /// Payment time
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    /// Note to the merchant
    #[serde(default)]
    pub notes: Option<String>,
    /// Order lines
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderItem>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrderList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) orders: Vec<Order>,
}

/// Merchant-side status change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderStatusUpdate {
    /// New status, e.g. `shipped`
    pub status: String,
    /// Waybill number, when shipping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

impl OrderStatusUpdate {
    /// Status change without a waybill.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            tracking_number: None,
        }
    }

    /// Attaches a waybill number.
    pub fn with_tracking_number(mut self, tracking_number: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking_number.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_order_decodes() {
        let order: Order = serde_json::from_value(json!({
            "id": "o-1",
            "customer_id": 5,
            "merchant_id": "m-2",
            "status": "pending",
            "subtotal": 20000,
            "shipping_cost": 9000,
            "total": 29000,
            "payment_status": "unpaid",
            "items": [{
                "id": "i-1", "product_id": "p-1", "product_name": "Tea",
                "product_price": 10000, "quantity": 2, "subtotal": 20000
            }],
            "created_at": "2024-03-03T08:00:00+07:00"
        }))
        .unwrap();
        assert_eq!(order.customer_id, "5");
        assert_eq!(order.total, dec!(29000));
        assert_eq!(order.items[0].quantity, 2);
        assert!(order.paid_at.is_none());
    }

    #[test]
    fn test_create_order_body() {
        let body = serde_json::to_value(CreateOrderRequest {
            items: vec![OrderItemRequest::new("p-1", 2)],
            shipping_cost: dec!(9000),
            courier: "jne".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body["items"], json!([{"product_id": "p-1", "quantity": 2}]));
        assert!(body["shipping_cost"].is_number());
        assert!(body.get("notes").is_none());
    }

    #[test]
    fn test_status_update_body() {
        assert_eq!(
            serde_json::to_value(OrderStatusUpdate::new("shipped").with_tracking_number("WB1"))
                .unwrap(),
            json!({"status": "shipped", "tracking_number": "WB1"})
        );
    }
}
