//! Bearer token sources.

use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Supplies the bearer token for each request.
///
/// The provider is invoked once per request. `None` or an empty string means
/// the request is sent without an `Authorization` header.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the current token, if any.
    async fn token(&self) -> Option<String>;
}

#[async_trait]
impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    async fn token(&self) -> Option<String> {
        self()
    }
}

/// A token fixed at construction.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wraps `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticToken").field(&"***").finish()
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// A shared, replaceable token.
///
/// Clones share the same slot, so a login stored through one clone is seen
/// by every client holding another.
#[derive(Clone, Default)]
pub struct SessionToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionToken {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token`, replacing any previous one.
    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(token.into());
    }

    /// Forgets the stored token.
    pub fn clear(&self) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    /// Returns a copy of the stored token.
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` when a token is stored.
    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("is_set", &self.is_set())
            .finish()
    }
}

#[async_trait]
impl TokenProvider for SessionToken {
    async fn token(&self) -> Option<String> {
        self.get()
    }
}
