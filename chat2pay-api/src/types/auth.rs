//! Authentication requests and responses.

use super::serde_helpers::{option_string_or_number, string_or_number};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email and password credentials, shared by customer and merchant login.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl LoginCredentials {
    /// Creates credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Customer sign-up payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerRegistration {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Password, at least six characters server-side
    pub password: String,
}

/// Merchant sign-up payload: the merchant and its first user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MerchantRegistration {
    /// Trading name of the merchant
    pub merchant_name: String,
    /// Registered legal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    /// Account email
    pub email: String,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Name of the merchant user
    pub name: String,
    /// Password
    pub password: String,
}

/// Successful customer login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerAuth {
    /// Customer id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Email, when on file
    #[serde(default)]
    pub email: Option<String>,
    /// Phone, when on file
    #[serde(default)]
    pub phone: Option<String>,
    /// Always `customer`
    #[serde(default)]
    pub role: String,
    /// Bearer token for subsequent calls
    pub access_token: String,
}

/// Merchant summary embedded in a merchant login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MerchantSummary {
    /// Merchant id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Trading name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Account status
    #[serde(default)]
    pub status: String,
}

/// Successful merchant login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MerchantAuth {
    /// Merchant user id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Owning merchant
    #[serde(default, deserialize_with = "option_string_or_number")]
    pub merchant_id: Option<String>,
    /// Owning merchant details, when expanded
    #[serde(default)]
    pub merchant: Option<MerchantSummary>,
    /// User name
    pub name: String,
    /// User email
    #[serde(default)]
    pub email: String,
    /// User role within the merchant
    #[serde(default)]
    pub role: String,
    /// User status
    #[serde(default)]
    pub status: String,
    /// Bearer token for subsequent calls
    pub access_token: String,
}
