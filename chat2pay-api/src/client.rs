//! The Chat2Pay client.

use crate::builder::Chat2PayBuilder;
use crate::envelope::BackendResponse;
use chat2pay_core::{
    ApiResponse, ChatSocketConfig, HttpClient, ReadOptions, RequestOptions, Result, SessionToken,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Typed client for the Chat2Pay backend.
///
/// Cloning is cheap; clones share the HTTP connection pool and the session
/// token, so a login through one clone authenticates all of them.
///
/// # Example
///
/// ```no_run
/// use chat2pay_api::Chat2Pay;
/// use chat2pay_api::types::LoginCredentials;
///
/// # async fn example() -> chat2pay_core::Result<()> {
/// let client = Chat2Pay::builder().base_url("http://localhost:8080").build()?;
/// client
///     .login_customer(&LoginCredentials::new("ana@example.com", "secret"))
///     .await?;
/// let orders = client.fetch_customer_orders().await?;
/// println!("{} orders", orders.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Chat2Pay {
    http: HttpClient,
    session: SessionToken,
    ws_base_url: String,
    socket_config: ChatSocketConfig,
}

impl Chat2Pay {
    /// Creates a builder.
    pub fn builder() -> Chat2PayBuilder {
        Chat2PayBuilder::new()
    }

    pub(crate) fn from_parts(
        http: HttpClient,
        session: SessionToken,
        ws_base_url: String,
        socket_config: ChatSocketConfig,
    ) -> Self {
        Self {
            http,
            session,
            ws_base_url,
            socket_config,
        }
    }

    /// Underlying HTTP client, for endpoints without a typed wrapper.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Session token attached to every request.
    pub fn session(&self) -> &SessionToken {
        &self.session
    }

    /// Whether a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_set()
    }

    /// Realtime chat base URL.
    pub fn ws_base_url(&self) -> &str {
        &self.ws_base_url
    }

    pub(crate) fn socket_config(&self) -> &ChatSocketConfig {
        &self.socket_config
    }

    pub(crate) async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        options: ReadOptions,
    ) -> Result<BackendResponse<T>> {
        let response = self.http.get(path, options).await?;
        Self::envelope(&response)
    }

    pub(crate) async fn post_envelope<B, T>(&self, path: &str, body: &B) -> Result<BackendResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(path, RequestOptions::default().with_json(body)?)
            .await?;
        Self::envelope(&response)
    }

    pub(crate) async fn patch_envelope<B, T>(&self, path: &str, body: &B) -> Result<BackendResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .patch(path, RequestOptions::default().with_json(body)?)
            .await?;
        Self::envelope(&response)
    }

    fn envelope<T: DeserializeOwned>(response: &ApiResponse) -> Result<BackendResponse<T>> {
        BackendResponse::from_response(response)?.decode()
    }
}
