//! Provider client with caching and selective retry.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};
use url::Url;

use super::cache::GeoCache;
use super::retry::RetryPolicy;
use super::types::{CacheKey, GeoRecord, Target};
use crate::config::{Config, TOKEN_QUERY_PARAM};
use crate::error_handling::{
    categorize_reqwest_error, get_retry_strategy, GeoError, InitializationError,
};
use crate::initialization::init_client;

/// Looks up IP geolocation records from the provider.
///
/// The client owns its cache: a successful lookup is stored under its
/// [`CacheKey`] and every later lookup with the same key is answered from
/// memory. Failures are never cached.
///
/// `fetch` takes `&mut self`, so only one lookup can be in flight and the
/// cache needs no locking.
pub struct GeoClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    policy: RetryPolicy,
    cache: GeoCache,
}

impl std::fmt::Debug for GeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoClient")
            .field("base_url", &self.base_url.as_str())
            .field("policy", &self.policy)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl GeoClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the HTTP client cannot be built or
    /// the provider URL is not a usable base URL.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let http = init_client(config)?;
        Self::with_client(http, &config.provider_url, &config.token, config.retry_policy())
    }

    /// Creates a client around an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        provider_url: &str,
        token: &str,
        policy: RetryPolicy,
    ) -> Result<Self, InitializationError> {
        let base_url =
            Url::parse(provider_url).map_err(|e| InitializationError::ProviderUrlError {
                url: provider_url.to_string(),
                reason: e.to_string(),
            })?;
        if base_url.cannot_be_a_base() {
            return Err(InitializationError::ProviderUrlError {
                url: provider_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            http,
            base_url,
            token: token.to_string(),
            policy,
            cache: GeoCache::new(),
        })
    }

    /// Geolocates `target`, or the caller's own address when `target` is
    /// `None` or blank.
    ///
    /// Returns the cached record without any network I/O when the same
    /// request already succeeded. Otherwise queries the provider, retrying
    /// according to the [`RetryPolicy`], and caches the record on success.
    ///
    /// # Errors
    ///
    /// - `GeoError::Timeout` if the last attempt timed out
    /// - `GeoError::HttpError` for a non-retryable or retry-exhausted status
    /// - `GeoError::TransportError` for connection-level failures
    /// - `GeoError::MalformedResponse` if the body is not a valid record
    pub async fn fetch(&mut self, target: Option<&str>) -> Result<GeoRecord, GeoError> {
        let target = Target::from_input(target);
        let key = CacheKey::new(&target, &self.token);

        if let Some(record) = self.cache.get(&key) {
            debug!("Using cached data for {}", target);
            return Ok(record.clone());
        }

        let record = self.fetch_with_retry(&target).await?;
        self.cache.insert(key, record.clone());
        debug!("Cached lookup for {} ({} entries)", target, self.cache.len());
        Ok(record)
    }

    /// Reports whether a lookup for `target` would be served from the cache.
    pub fn is_cached(&self, target: Option<&str>) -> bool {
        let key = CacheKey::new(&Target::from_input(target), &self.token);
        self.cache.contains(&key)
    }

    /// Number of cached lookups.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Builds `{base}/{target}/json?token=...`, or `{base}/json?token=...`
    /// for the caller's own address. The target is percent-encoded as a
    /// single path segment.
    pub(crate) fn request_url(&self, target: &Target) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            if let Target::Address(address) = target {
                segments.push(address);
            }
            segments.push("json");
        }
        url.query_pairs_mut()
            .append_pair(TOKEN_QUERY_PARAM, &self.token);
        url
    }

    async fn fetch_with_retry(&self, target: &Target) -> Result<GeoRecord, GeoError> {
        let url = self.request_url(target);
        let attempts = AtomicUsize::new(0);

        let result = tokio_retry::RetryIf::spawn(
            get_retry_strategy(&self.policy),
            || {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                self.attempt(url.clone(), target, attempt)
            },
            |error: &GeoError| {
                let retry = self.policy.is_retryable(error);
                if retry {
                    warn!("Lookup for {} failed ({}), retrying: {}", target, error.kind(), error);
                }
                retry
            },
        )
        .await;

        if let Err(ref error) = result {
            warn!(
                "Lookup for {} failed after {} attempt(s): {}",
                target,
                attempts.load(Ordering::SeqCst),
                error
            );
        }
        result
    }

    async fn attempt(&self, url: Url, target: &Target, attempt: usize) -> Result<GeoRecord, GeoError> {
        debug!(
            "Attempt {}/{} for {} via {}",
            attempt,
            self.policy.max_attempts,
            target,
            self.base_url
        );

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(categorize_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::HttpError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(categorize_reqwest_error)?;
        GeoRecord::parse(&body)
    }
}
