//! REST operations, one module per backend area.

mod auth;
mod chat;
mod merchants;
mod orders;
mod products;
mod shipping;

use chat2pay_core::{Error, Result};

/// Returns the trimmed value, rejecting blanks.
pub(crate) fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::invalid_request(format!("{field} is required")));
    }
    Ok(value)
}
