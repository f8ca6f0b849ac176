use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Files read and tokenized at once when nothing else is configured
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10;

/// Configuration for an index build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherConfig {
    /// Maximum number of files being read/tokenized simultaneously
    pub concurrency_limit: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }
}

impl HasherConfig {
    pub fn with_concurrency_limit(concurrency_limit: usize) -> Self {
        Self { concurrency_limit }
    }
}

/// Shared flag used to stop a running build
///
/// Clones share the same flag. Once cancelled, a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Counters for a finished build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Files read and tokenized
    pub files: usize,
    /// Distinct words in the index
    pub words: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_concurrency_limit() {
        assert_eq!(HasherConfig::default().concurrency_limit, 10);
        assert_eq!(HasherConfig::with_concurrency_limit(3).concurrency_limit, 3);
    }

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_config_serialization() {
        let config: HasherConfig = serde_json::from_str(r#"{"concurrency_limit": 4}"#).unwrap();
        assert_eq!(config.concurrency_limit, 4);
    }
}
