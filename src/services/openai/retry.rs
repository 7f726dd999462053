use backoff::{backoff::Backoff, ExponentialBackoff};
use std::time::Duration;

use super::errors::{OpenAiError, RetryError};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    pub jitter: bool,
    pub total_timeout: Duration,
    pub ignore_server_retry_after: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            jitter: true,
            total_timeout: Duration::from_secs(300),
            ignore_server_retry_after: false,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    pub fn with_ignore_server_retry_after(mut self, ignore: bool) -> Self {
        self.ignore_server_retry_after = ignore;
        self
    }

    pub fn with_total_timeout(mut self, timeout: Duration) -> Self {
        self.total_timeout = timeout;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }
}

pub struct RetryHandler {
    config: RetryConfig,
    backoff: ExponentialBackoff,
    start_time: std::time::Instant,
    attempts: usize,
}

impl RetryHandler {
    pub fn new(config: RetryConfig) -> Self {
        let mut backoff = ExponentialBackoff {
            initial_interval: config.initial_delay,
            max_interval: config.max_delay,
            multiplier: config.multiplier,
            max_elapsed_time: Some(config.total_timeout),
            ..Default::default()
        };

        if !config.jitter {
            backoff.randomization_factor = 0.0;
        }

        Self {
            config,
            backoff,
            start_time: std::time::Instant::now(),
            attempts: 0,
        }
    }

    pub async fn retry<F, Fut, T>(&mut self, mut operation: F) -> Result<T, RetryError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, OpenAiError>>,
    {
        loop {
            self.attempts += 1;

            if self.attempts > self.config.max_attempts {
                return Err(RetryError::MaxAttemptsExceeded);
            }

            if self.start_time.elapsed() > self.config.total_timeout {
                return Err(RetryError::TimeoutExceeded);
            }

            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !error.is_retryable() {
                        return Err(RetryError::NonRetryable { source: error });
                    }

                    // For the last attempt, don't wait
                    if self.attempts >= self.config.max_attempts {
                        return Err(RetryError::MaxAttemptsExceeded);
                    }

                    let delay = if !self.config.ignore_server_retry_after {
                        if let Some(retry_after) = error.retry_after_seconds() {
                            Duration::from_secs(retry_after)
                        } else {
                            self.backoff.next_backoff().unwrap_or(self.config.max_delay)
                        }
                    } else {
                        self.backoff.next_backoff().unwrap_or(self.config.max_delay)
                    };

                    tracing::warn!(
                        "Attempt {} failed with retryable error: {}. Retrying in {:?}",
                        self.attempts,
                        error,
                        delay
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

pub async fn with_retry<F, Fut, T>(config: RetryConfig, operation: F) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, OpenAiError>>,
{
    let mut handler = RetryHandler::new(config);
    handler.retry(operation).await
}
