//! Merchant directory types.

use super::serde_helpers::{null_as_default, string_or_number};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    /// Merchant id
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Trading name
    pub name: String,
    /// Registered legal name
    #[serde(default)]
    pub legal_name: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Account status
    #[serde(default)]
    pub status: String,
    /// Creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of merchants.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MerchantList {
    /// Merchants on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub merchants: Vec<Merchant>,
    /// Total merchants
    #[serde(default)]
    pub total: i64,
    /// Page number
    #[serde(default)]
    pub page: u32,
    /// Page size
    #[serde(default)]
    pub limit: u32,
}
