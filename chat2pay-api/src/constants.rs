//! Chat2Pay API constants.
//!
//! Backend paths, relative to the API base URL.

/// API Endpoints
pub mod endpoints {
    /// Customer registration
    pub const CUSTOMER_REGISTER: &str = "/api/auth/customer/register";
    /// Customer login
    pub const CUSTOMER_LOGIN: &str = "/api/auth/customer/login";
    /// Merchant registration
    pub const MERCHANT_REGISTER: &str = "/api/auth/merchant/register";
    /// Merchant login
    pub const MERCHANT_LOGIN: &str = "/api/auth/merchant/login";

    /// Product list and creation
    pub const PRODUCTS: &str = "/api/products";
    /// Product question for the shopping assistant
    pub const PRODUCTS_ASK: &str = "/api/products/ask";

    /// Merchant directory
    pub const MERCHANTS: &str = "/api/merchants";

    /// Order creation
    pub const ORDERS: &str = "/api/orders";
    /// Orders of the signed-in customer
    pub const ORDERS_CUSTOMER: &str = "/api/orders/customer";
    /// Orders of the signed-in merchant
    pub const ORDERS_MERCHANT: &str = "/api/orders/merchant";

    /// Province directory
    pub const SHIPPING_PROVINCES: &str = "/api/shipping/provinces";
    /// City directory
    pub const SHIPPING_CITIES: &str = "/api/shipping/cities";
    /// Shipping quotes
    pub const SHIPPING_COST: &str = "/api/shipping/cost";
    /// Waybill tracking
    pub const SHIPPING_TRACK: &str = "/api/shipping/track";

    /// Chat history (GET to read, DELETE to clear)
    pub const CHAT_HISTORY: &str = "/api/chat/history";
    /// Chat message persistence
    pub const CHAT_MESSAGES: &str = "/api/chat/messages";

    /// `/api/products/{id}`
    pub fn product(id: &str) -> String {
        format!("{PRODUCTS}/{id}")
    }

    /// `/api/merchants/{id}`
    pub fn merchant(id: &str) -> String {
        format!("{MERCHANTS}/{id}")
    }

    /// `/api/orders/{id}`
    pub fn order(id: &str) -> String {
        format!("{ORDERS}/{id}")
    }

    /// `/api/orders/merchant/{id}`
    pub fn merchant_order(id: &str) -> String {
        format!("{ORDERS_MERCHANT}/{id}")
    }

    /// `/api/orders/{id}/status`
    pub fn order_status(id: &str) -> String {
        format!("{ORDERS}/{id}/status")
    }
}
