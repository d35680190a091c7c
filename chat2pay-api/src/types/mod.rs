//! Request and response types of the Chat2Pay backend.
//!
//! Identifiers are kept as `String` whatever their JSON type; money uses
//! [`Decimal`](rust_decimal::Decimal).

mod serde_helpers;

pub mod auth;
pub mod chat;
pub mod merchant;
pub mod order;
pub mod product;
pub mod shipping;

pub use auth::{
    CustomerAuth, CustomerRegistration, LoginCredentials, MerchantAuth, MerchantRegistration,
    MerchantSummary,
};
pub use chat::{ChatMessage, ChatRole, NewChatMessage};
pub use merchant::{Merchant, MerchantList};
pub use order::{CreateOrderRequest, Order, OrderItem, OrderItemRequest, OrderStatusUpdate};
pub use product::{
    LlmResponse, NewProduct, Product, ProductCategory, ProductImage, ProductList, ProductQuery,
};
pub use shipping::{
    City, CostDetail, CourierResult, DeliveryStatus, ManifestEntry, Province, ShippingCost,
    TrackingResult, TrackingSummary,
};
