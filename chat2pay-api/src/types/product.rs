//! Catalogue types.

use super::serde_helpers::{null_as_default, option_string_or_number, string_or_number};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product category reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    /// Category id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Category name
    pub name: String,
}

/// Product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Public image URL
    pub image_url: String,
    /// Whether this is the cover image
    #[serde(default)]
    pub is_primary: bool,
}

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Owning merchant
    #[serde(deserialize_with = "string_or_number")]
    pub merchant_id: String,
    /// Outlet holding the stock
    #[serde(default, deserialize_with = "option_string_or_number")]
    pub outlet_id: Option<String>,
    /// Category id
    #[serde(default, deserialize_with = "option_string_or_number")]
    pub category_id: Option<String>,
    /// Expanded category
    #[serde(default)]
    pub category: Option<ProductCategory>,
    /// Product name
    pub name: String,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// Stock keeping unit
    #[serde(default)]
    pub sku: Option<String>,
    /// Unit price
    pub price: Decimal,
    /// Units in stock
    #[serde(default)]
    pub stock: i64,
    /// Listing status
    #[serde(default)]
    pub status: String,
    /// Single image URL used by lightweight listings
    #[serde(default)]
    pub image: Option<String>,
    /// Image gallery
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProductImage>,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the cover image URL: the primary gallery image, the first
    /// gallery image, or the single `image` field.
    pub fn cover_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
            .map(|img| img.image_url.as_str())
            .or(self.image.as_deref())
    }
}

/// One page of products.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductList {
    /// Products on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
    /// Total matching products
    #[serde(default)]
    pub total: i64,
    /// Page number, 1-based
    #[serde(default)]
    pub page: u32,
    /// Page size
    #[serde(default)]
    pub limit: u32,
}

/// Filter for [`Chat2Pay::fetch_products`](crate::Chat2Pay::fetch_products).
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Restrict to one merchant
    pub merchant_id: Option<String>,
    /// Page number, 1-based
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Products of one merchant.
    pub fn merchant(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: Some(merchant_id.into()),
            ..Default::default()
        }
    }

    /// Sets the page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// New product payload. The merchant id is supplied separately.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Long description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stock keeping unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Unit price, sent as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units in stock
    pub stock: i64,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Weight in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Length in centimetres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Width in centimetres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in centimetres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Assistant reply to a product question.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LlmResponse {
    /// Matching products; empty when the reply is text only
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
    /// Assistant text
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn product_json() -> serde_json::Value {
        json!({
            "id": "p-1",
            "merchant_id": 4,
            "name": "Batik Shirt",
            "price": 150000.5,
            "stock": 3,
            "status": "active",
            "images": [
                {"id": "i-1", "image_url": "https://img/1.jpg", "is_primary": false},
                {"id": "i-2", "image_url": "https://img/2.jpg", "is_primary": true}
            ],
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        })
    }

    #[test]
    fn test_product_decodes() {
        let product: Product = serde_json::from_value(product_json()).unwrap();
        assert_eq!(product.merchant_id, "4");
        assert_eq!(product.price, dec!(150000.5));
        assert_eq!(product.cover_image(), Some("https://img/2.jpg"));
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_product_string_price_and_null_images() {
        let product: Product = serde_json::from_value(json!({
            "id": 1, "merchant_id": "m", "name": "x", "price": "9.99", "images": null,
            "image": "https://img/solo.jpg"
        }))
        .unwrap();
        assert_eq!(product.price, dec!(9.99));
        assert_eq!(product.cover_image(), Some("https://img/solo.jpg"));
    }

    #[test]
    fn test_new_product_price_is_number() {
        let body = serde_json::to_value(NewProduct {
            name: "Kopi".into(),
            price: dec!(25000),
            stock: 10,
            ..Default::default()
        })
        .unwrap();
        assert!(body["price"].is_number());
        assert_eq!(body["price"], json!(25000.0));
        assert!(body.get("sku").is_none());
    }

    #[test]
    fn test_llm_response_null_products() {
        let reply: LlmResponse =
            serde_json::from_value(json!({"products": null, "message": "hi"})).unwrap();
        assert!(reply.products.is_empty());
        assert_eq!(reply.message, "hi");
    }
}
