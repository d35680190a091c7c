//! Merchant directory.

use super::require;
use crate::constants::endpoints;
use crate::types::{Merchant, MerchantList};
use crate::Chat2Pay;
use chat2pay_core::{ReadOptions, Result};

impl Chat2Pay {
    /// Fetches one page of merchants. The backend defaults to page 1 of 10.
    pub async fn fetch_merchants(&self, page: Option<u32>, limit: Option<u32>) -> Result<MerchantList> {
        let options = ReadOptions::default()
            .with_param("page", page)
            .with_param("limit", limit);
        self.get_envelope(endpoints::MERCHANTS, options)
            .await?
            .into_data_or_default("Failed to get merchants")
    }

    /// Fetches a merchant by id.
    pub async fn fetch_merchant(&self, id: &str) -> Result<Merchant> {
        let id = require("merchant id", id)?;
        self.get_envelope(&endpoints::merchant(id), ReadOptions::default())
            .await?
            .into_data("Failed to get merchant")
    }
}
