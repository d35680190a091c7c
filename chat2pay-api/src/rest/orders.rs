//! Checkout and order management.

use super::require;
use crate::constants::endpoints;
use crate::types::order::OrderList;
use crate::types::{CreateOrderRequest, Order, OrderStatusUpdate};
use crate::Chat2Pay;
use chat2pay_core::{Error, ReadOptions, Result};
use tracing::{info, instrument};

impl Chat2Pay {
    /// Places an order for the signed-in customer.
    #[instrument(skip_all, fields(items = request.items.len(), courier = %request.courier))]
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        if request.items.is_empty() {
            return Err(Error::invalid_request("Order has no items"));
        }
        let order: Order = self
            .post_envelope(endpoints::ORDERS, request)
            .await?
            .into_data("Failed to create order")?;
        info!(order_id = %order.id, total = %order.total, "Order created");
        Ok(order)
    }

    /// Orders of the signed-in customer.
    pub async fn fetch_customer_orders(&self) -> Result<Vec<Order>> {
        self.fetch_order_list(endpoints::ORDERS_CUSTOMER).await
    }

    /// Orders received by the signed-in merchant.
    pub async fn fetch_merchant_orders(&self) -> Result<Vec<Order>> {
        self.fetch_order_list(endpoints::ORDERS_MERCHANT).await
    }

    /// Fetches one of the signed-in customer's orders.
    pub async fn fetch_order(&self, id: &str) -> Result<Order> {
        let id = require("order id", id)?;
        self.get_envelope(&endpoints::order(id), ReadOptions::default())
            .await?
            .into_data("Failed to get order")
    }

    /// Fetches one of the signed-in merchant's orders.
    pub async fn fetch_merchant_order(&self, id: &str) -> Result<Order> {
        let id = require("order id", id)?;
        self.get_envelope(&endpoints::merchant_order(id), ReadOptions::default())
            .await?
            .into_data("Failed to get order")
    }

    /// Moves an order to a new status, optionally recording the waybill.
    #[instrument(skip(self, update), fields(status = %update.status))]
    pub async fn update_order_status(&self, id: &str, update: &OrderStatusUpdate) -> Result<Order> {
        let id = require("order id", id)?;
        self.patch_envelope(&endpoints::order_status(id), update)
            .await?
            .into_data("Failed to update order status")
    }

    async fn fetch_order_list(&self, path: &str) -> Result<Vec<Order>> {
        let list: OrderList = self
            .get_envelope(path, ReadOptions::default())
            .await?
            .into_data_or_default("Failed to get orders")?;
        Ok(list.orders)
    }
}
