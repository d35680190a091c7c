//! Catalogue operations and the shopping assistant.

use super::require;
use crate::constants::endpoints;
use crate::types::{LlmResponse, NewProduct, Product, ProductList, ProductQuery};
use crate::Chat2Pay;
use chat2pay_core::{ReadOptions, Result};
use serde_json::{Value, json};
use tracing::{debug, instrument};

impl Chat2Pay {
    /// Fetches one page of products. The backend requires a merchant id;
    /// without one it answers 400.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<ProductList> {
        let options = ReadOptions::default()
            .with_param("merchant_id", query.merchant_id.clone())
            .with_param("page", query.page)
            .with_param("limit", query.limit);
        self.get_envelope(endpoints::PRODUCTS, options)
            .await?
            .into_data_or_default("Failed to get products")
    }

    /// Fetches the first page of a merchant's products.
    pub async fn fetch_merchant_products(&self, merchant_id: &str) -> Result<Vec<Product>> {
        let merchant_id = require("merchant_id", merchant_id)?;
        let page = self
            .fetch_products(&ProductQuery::merchant(merchant_id))
            .await?;
        Ok(page.products)
    }

    /// Fetches a product by id.
    pub async fn fetch_product(&self, id: &str) -> Result<Product> {
        let id = require("product id", id)?;
        self.get_envelope(&endpoints::product(id), ReadOptions::default())
            .await?
            .into_data("Failed to get product")
    }

    /// Creates a product under `merchant_id`.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, merchant_id: &str, product: &NewProduct) -> Result<Product> {
        let merchant_id = require("merchant_id", merchant_id)?;
        let mut body = serde_json::to_value(product)?;
        if let Value::Object(map) = &mut body {
            map.insert("merchant_id".to_string(), Value::String(merchant_id.to_string()));
        }
        self.post_envelope(endpoints::PRODUCTS, &body)
            .await?
            .into_data("Failed to create product")
    }

    /// Asks the shopping assistant a free-form question.
    #[instrument(skip(self, prompt))]
    pub async fn ask_product(&self, prompt: &str) -> Result<LlmResponse> {
        let prompt = require("prompt", prompt)?;
        let reply: LlmResponse = self
            .post_envelope(endpoints::PRODUCTS_ASK, &json!({ "prompt": prompt }))
            .await?
            .into_data("Failed to get response")?;
        debug!(products = reply.products.len(), "Assistant replied");
        Ok(reply)
    }
}
