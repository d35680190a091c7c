//! Retry strategy module.
//!
//! One policy object for "retry with bounded attempts and increasing delay",
//! shared by the chat transport (reconnect schedule) and by callers that want
//! to wrap HTTP calls:
//! - Fixed delay
//! - Linear backoff
//! - Exponential backoff
//! - Configurable retry conditions
//!
//! The HTTP client never retries on its own; [`RetryStrategy::run`] is opt-in.

use crate::error::{ConfigValidationError, Error, NetworkError, ValidationResult};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry strategy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStrategyType {
    /// Fixed delay: wait a constant duration between retries.
    Fixed,
    /// Exponential backoff: delay grows exponentially (base_delay * 2^(attempt-1)).
    Exponential,
    /// Linear backoff: delay grows linearly (base_delay * attempt).
    Linear,
}

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Type of retry strategy to use.
    pub strategy_type: RetryStrategyType,
    /// Base delay in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds.
    pub max_delay_ms: u64,
    /// Whether to retry on connection failures.
    pub retry_on_network_error: bool,
    /// Whether to retry on HTTP 429.
    pub retry_on_rate_limit: bool,
    /// Whether to retry on HTTP 5xx.
    pub retry_on_server_error: bool,
    /// Whether to retry on timeouts.
    pub retry_on_timeout: bool,
    /// Jitter factor (0.0-1.0) added on top of the computed delay.
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            strategy_type: RetryStrategyType::Exponential,
            base_delay_ms: 100,
            max_delay_ms: 30000,
            retry_on_network_error: true,
            retry_on_rate_limit: true,
            retry_on_server_error: true,
            retry_on_timeout: true,
            jitter_factor: 0.1,
        }
    }
}

impl RetryConfig {
    /// Creates a conservative retry configuration with fewer retries and shorter delays.
    pub fn conservative() -> Self {
        Self {
            max_retries: 2,
            strategy_type: RetryStrategyType::Fixed,
            base_delay_ms: 500,
            max_delay_ms: 5000,
            retry_on_network_error: true,
            retry_on_rate_limit: true,
            retry_on_server_error: false,
            retry_on_timeout: false,
            jitter_factor: 0.0,
        }
    }

    /// Reconnect schedule of the realtime chat transport: five attempts,
    /// waiting `attempt × 1000 ms` before each, no jitter.
    pub fn chat_reconnect() -> Self {
        Self {
            max_retries: 5,
            strategy_type: RetryStrategyType::Linear,
            base_delay_ms: 1000,
            max_delay_ms: 30000,
            retry_on_network_error: true,
            retry_on_rate_limit: true,
            retry_on_server_error: true,
            retry_on_timeout: true,
            jitter_factor: 0.0,
        }
    }

    /// Validates the retry configuration parameters.
    ///
    /// - `max_retries` must be <= 10
    /// - `base_delay_ms` must be >= 10
    /// - `jitter_factor` must lie in `0.0..=1.0`
    ///
    /// ```rust
    /// use chat2pay_core::retry_strategy::RetryConfig;
    ///
    /// assert!(RetryConfig::chat_reconnect().validate().is_ok());
    ///
    /// let invalid = RetryConfig { max_retries: 15, ..Default::default() };
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<ValidationResult, ConfigValidationError> {
        let mut result = ValidationResult::new();

        if self.max_retries > 10 {
            return Err(ConfigValidationError::too_high(
                "max_retries",
                self.max_retries,
                10,
            ));
        }

        if self.base_delay_ms < 10 {
            return Err(ConfigValidationError::too_low(
                "base_delay_ms",
                self.base_delay_ms,
                10,
            ));
        }

        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err(ConfigValidationError::invalid(
                "jitter_factor",
                format!("{} is outside 0.0..=1.0", self.jitter_factor),
            ));
        }

        if self.max_delay_ms < self.base_delay_ms {
            result.add_warning(format!(
                "max_delay_ms {} is below base_delay_ms {}, every delay will be capped",
                self.max_delay_ms, self.base_delay_ms
            ));
        }

        Ok(result)
    }
}

/// Retry strategy.
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    config: RetryConfig,
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl RetryStrategy {
    /// Creates a new retry strategy with the given configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Returns `true` while `attempt` (1-based) is within the attempt ceiling.
    pub fn allows_attempt(&self, attempt: u32) -> bool {
        attempt >= 1 && attempt <= self.config.max_retries
    }

    /// Determines whether an error should be retried.
    ///
    /// # Arguments
    ///
    /// * `error` - The error to evaluate.
    /// * `attempt` - The retry attempt that would follow (1-based).
    pub fn should_retry(&self, error: &Error, attempt: u32) -> bool {
        if !self.allows_attempt(attempt) {
            return false;
        }
        match error.root_cause() {
            Error::Network(ne) => match ne.as_ref() {
                NetworkError::Timeout => self.config.retry_on_timeout,
                NetworkError::ConnectionFailed(_) => self.config.retry_on_network_error,
                NetworkError::Transport(_) => false,
            },
            Error::Timeout(_) => self.config.retry_on_timeout,
            Error::Api(details) if details.status == 429 => self.config.retry_on_rate_limit,
            Error::Api(details) if details.is_server_error() => self.config.retry_on_server_error,
            _ => false,
        }
    }

    /// Calculates the delay before retry `attempt` (1-based).
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let base_delay = match self.config.strategy_type {
            RetryStrategyType::Fixed => self.config.base_delay_ms,
            RetryStrategyType::Exponential => self
                .config
                .base_delay_ms
                .saturating_mul(2_u64.saturating_pow(attempt - 1)),
            RetryStrategyType::Linear => self.config.base_delay_ms.saturating_mul(u64::from(attempt)),
        };

        let mut delay = base_delay.min(self.config.max_delay_ms);
        if self.config.jitter_factor > 0.0 {
            delay = self.apply_jitter(delay);
        }

        Duration::from_millis(delay)
    }

    fn apply_jitter(&self, delay_ms: u64) -> u64 {
        use rand::Rng;
        let mut rng = rand::rng();
        #[allow(clippy::cast_precision_loss)]
        #[allow(clippy::cast_possible_truncation)]
        let jitter_range = (delay_ms as f64 * self.config.jitter_factor) as u64;
        let jitter = rng.random_range(0..=jitter_range);
        delay_ms + jitter
    }

    /// Runs `operation` until it succeeds, the error is not retryable, or
    /// the attempt ceiling is reached.
    ///
    /// ```rust,no_run
    /// use chat2pay_core::http_client::{HttpClient, HttpConfig, ReadOptions};
    /// use chat2pay_core::retry_strategy::{RetryConfig, RetryStrategy};
    ///
    /// # async fn example() -> chat2pay_core::Result<()> {
    /// let client = HttpClient::new(HttpConfig::with_base_url("http://localhost:8080"))?;
    /// let strategy = RetryStrategy::new(RetryConfig::conservative());
    /// let response = strategy
    ///     .run(|| client.get("/api/merchants", ReadOptions::default()))
    ///     .await?;
    /// # let _ = response;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    debug!(attempts = attempt + 1, "Operation completed successfully");
                    return Ok(value);
                }
                Err(e) => {
                    attempt += 1;
                    if !self.should_retry(&e, attempt) {
                        debug!(
                            attempts = attempt,
                            error = %e,
                            is_retryable = e.is_retryable(),
                            "Operation failed, not retrying"
                        );
                        return Err(e);
                    }

                    let delay = self.calculate_delay(attempt);
                    warn!(
                        attempt = attempt,
                        delay_ms = %delay.as_millis(),
                        error = %e,
                        "Operation failed, retrying after delay"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Returns a reference to the retry configuration.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Returns the maximum number of retries.
    pub fn max_retries(&self) -> u32 {
        self.config.max_retries
    }
}
