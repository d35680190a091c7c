//! Customer and merchant authentication.
//!
//! A successful login stores the access token in the client's session, so
//! every later call is authenticated.

use crate::constants::endpoints;
use crate::types::{
    CustomerAuth, CustomerRegistration, LoginCredentials, MerchantAuth, MerchantRegistration,
};
use crate::Chat2Pay;
use chat2pay_core::Result;
use tracing::{info, instrument};

impl Chat2Pay {
    /// Signs a customer in and stores the access token.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login_customer(&self, credentials: &LoginCredentials) -> Result<CustomerAuth> {
        let auth: CustomerAuth = self
            .post_envelope(endpoints::CUSTOMER_LOGIN, credentials)
            .await?
            .into_data("Login failed")?;
        self.session().set(auth.access_token.clone());
        info!(customer_id = %auth.id, "Customer signed in");
        Ok(auth)
    }

    /// Registers a customer. The session is left unchanged.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> Result<CustomerAuth> {
        self.post_envelope(endpoints::CUSTOMER_REGISTER, registration)
            .await?
            .into_data("Registration failed")
    }

    /// Signs a merchant user in and stores the access token.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login_merchant(&self, credentials: &LoginCredentials) -> Result<MerchantAuth> {
        let auth: MerchantAuth = self
            .post_envelope(endpoints::MERCHANT_LOGIN, credentials)
            .await?
            .into_data("Login failed")?;
        self.session().set(auth.access_token.clone());
        info!(user_id = %auth.id, merchant_id = ?auth.merchant_id, "Merchant signed in");
        Ok(auth)
    }

    /// Registers a merchant and its first user. The session is left unchanged.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn register_merchant(
        &self,
        registration: &MerchantRegistration,
    ) -> Result<MerchantAuth> {
        self.post_envelope(endpoints::MERCHANT_REGISTER, registration)
            .await?
            .into_data("Registration failed")
    }

    /// Drops the session token. Later calls go out unauthenticated.
    pub fn logout(&self) {
        self.session().clear();
    }
}
