//! Cache-aside orchestration: lookup before compute, fall back on any
//! cache trouble, persist results best-effort.
//!
//! The contract is that cache unavailability or malfunction never fails
//! a request that would otherwise succeed; only an evaluator error
//! propagates to the caller.

use std::sync::Arc;

use fibserve_core::{format_for_cache, parse_from_cache, Complex, Evaluator, InstabilityError};

use crate::cache::CacheStore;

/// Prefix making the memo key input-derived: `fib:<cache string of z>`.
const KEY_PREFIX: &str = "fib:";

pub struct Orchestrator {
    evaluator: Arc<dyn Evaluator>,
    cache: Option<Arc<dyn CacheStore>>,
    ttl_secs: u64,
}

impl Orchestrator {
    pub fn new(
        evaluator: Arc<dyn Evaluator>,
        cache: Option<Arc<dyn CacheStore>>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            evaluator,
            cache,
            ttl_secs,
        }
    }

    /// Compute the Fibonacci value for `z`, consulting the cache first
    /// when one is configured.
    ///
    /// Per-request sequence: GET → on hit return the stored value, on
    /// miss evaluate and best-effort SETEX. A GET transport error or an
    /// unparseable stored value marks the cache unhealthy for this
    /// request: evaluate directly, attempt no further writes.
    pub async fn compute(&self, z: Complex) -> Result<Complex, InstabilityError> {
        let Some(cache) = &self.cache else {
            tracing::debug!("cache not configured, computing directly");
            return self.evaluator.evaluate(z);
        };

        let key = format!("{KEY_PREFIX}{}", format_for_cache(z));

        match cache.get(&key).await {
            Ok(Some(raw)) => match parse_from_cache(&raw) {
                Ok(result) => {
                    tracing::debug!(key = %key, "cache hit");
                    Ok(result)
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "unparseable cached value, computing directly");
                    self.evaluator.evaluate(z)
                }
            },
            Ok(None) => {
                tracing::debug!(key = %key, "cache miss");
                let result = self.evaluator.evaluate(z)?;
                let value = format_for_cache(result);
                if let Err(e) = cache.set_ex(&key, &value, self.ttl_secs).await {
                    // The result is already in hand; a failed store only
                    // costs a recomputation next time.
                    tracing::warn!(key = %key, error = %e, "failed to store result");
                } else {
                    tracing::debug!(key = %key, "cached result");
                }
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "cache error, computing directly");
                self.evaluator.evaluate(z)
            }
        }
    }
}
