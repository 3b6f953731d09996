//! Roblox client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RobloxError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Rate limited (HTTP 429)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Inventory not publicly visible (HTTP 403)")]
    PrivateInventory,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Body(String),
}

impl RobloxError {
    /// Whether another attempt could reasonably succeed.
    ///
    /// Transport failures, 429s, and 5xx statuses are transient; 403 and
    /// the remaining 4xx are terminal for the call.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::RateLimited { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::PrivateInventory | Self::Body(_) => false,
        }
    }

    /// Upstream `Retry-After` hint in milliseconds, when one was sent.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms } => *retry_after_ms,
            _ => None,
        }
    }
}

pub type RobloxResult<T> = Result<T, RobloxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(RobloxError::RateLimited {
            retry_after_ms: None
        }
        .is_retryable());
        assert!(RobloxError::Status {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!RobloxError::Status {
            status: 400,
            body: String::new()
        }
        .is_retryable());
        assert!(!RobloxError::PrivateInventory.is_retryable());
        assert!(!RobloxError::Body("truncated".to_string()).is_retryable());
    }

    #[test]
    fn test_retry_after_hint_only_on_rate_limit() {
        let err = RobloxError::RateLimited {
            retry_after_ms: Some(2_000),
        };
        assert_eq!(err.retry_after_ms(), Some(2_000));
        assert_eq!(RobloxError::PrivateInventory.retry_after_ms(), None);
    }
}
