//! Resource cache with tag-based invalidation
//!
//! Cached collection reads are grouped by resource tag. Every tag carries a
//! generation counter and entries are keyed under the generation they were
//! fetched in; invalidating a tag bumps the counter, which makes every
//! cached read of that tag unreachable in one step. A fetch in flight
//! across an invalidation still resolves for the caller that started it,
//! but inserts only under its start generation, so readers arriving after
//! the invalidation always trigger a fresh fetch.
//!
//! Fetch failures leave previously cached state intact (stale-but-available
//! until the caller clears it).

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::trace;

use meplus_types::{ListResponse, Task, Template, UsageReport};

use crate::metrics;
use crate::ClientError;

/// Resource types tracked by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceTag {
    /// Generated tasks
    Task,
    /// Saved templates
    Template,
    /// Usage snapshot and limits
    Usage,
}

impl ResourceTag {
    /// Get the tag name for logs and metrics labels.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Template => "template",
            Self::Usage => "usage",
        }
    }
}

/// Configuration for the resource cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached collections.
    /// Default: 5 minutes (invalidations, not expiry, drive freshness)
    pub ttl: Duration,

    /// Maximum number of cached collections per tag.
    /// Default: 256
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 256,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collection TTL.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of cached collections per tag.
    #[must_use]
    pub fn with_max_entries(mut self, max: u64) -> Self {
        self.max_entries = max;
        self
    }
}

/// One tag's entries plus its generation counter.
struct TaggedCache<T> {
    tag: ResourceTag,
    entries: Cache<String, Arc<T>>,
    generation: AtomicU64,
}

impl<T: Send + Sync + 'static> TaggedCache<T> {
    fn new(tag: ResourceTag, config: &CacheConfig) -> Self {
        Self {
            tag,
            entries: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(config.ttl)
                .build(),
            generation: AtomicU64::new(0),
        }
    }

    fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    async fn get_or_fetch<F, Fut>(&self, params_key: &str, fetch: F) -> Result<Arc<T>, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let generation = self.generation.load(Ordering::SeqCst);
        let key = format!("{generation}:{params_key}");

        if let Some(hit) = self.entries.get(&key).await {
            trace!(tag = self.tag.as_str(), "resource cache hit");
            metrics::record_cache_hit(self.tag.as_str());
            return Ok(hit);
        }

        metrics::record_cache_miss(self.tag.as_str());
        let value = Arc::new(fetch().await?);

        // Insert only if no mutation landed while the fetch was in flight;
        // the caller that started the fetch still gets its value.
        if self.generation.load(Ordering::SeqCst) == generation {
            self.entries.insert(key, value.clone()).await;
        }

        Ok(value)
    }
}

/// Tag-invalidated store of fetched collections.
///
/// The cache is the only shared mutable structure in the client; all
/// invalidation goes through [`ResourceCache::invalidate`], called by the
/// resource clients after a successful mutation.
pub struct ResourceCache {
    tasks: TaggedCache<ListResponse<Task>>,
    templates: TaggedCache<ListResponse<Template>>,
    usage: TaggedCache<UsageReport>,
    config: CacheConfig,
}

impl ResourceCache {
    /// Create a cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            tasks: TaggedCache::new(ResourceTag::Task, &config),
            templates: TaggedCache::new(ResourceTag::Template, &config),
            usage: TaggedCache::new(ResourceTag::Usage, &config),
            config,
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Read a task collection, fetching on miss.
    pub async fn get_or_fetch_tasks<F, Fut>(
        &self,
        params_key: &str,
        fetch: F,
    ) -> Result<Arc<ListResponse<Task>>, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ListResponse<Task>, ClientError>>,
    {
        self.tasks.get_or_fetch(params_key, fetch).await
    }

    /// Read a template collection, fetching on miss.
    pub async fn get_or_fetch_templates<F, Fut>(
        &self,
        params_key: &str,
        fetch: F,
    ) -> Result<Arc<ListResponse<Template>>, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ListResponse<Template>, ClientError>>,
    {
        self.templates.get_or_fetch(params_key, fetch).await
    }

    /// Read the usage report, fetching on miss.
    pub async fn get_or_fetch_usage<F, Fut>(
        &self,
        params_key: &str,
        fetch: F,
    ) -> Result<Arc<UsageReport>, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<UsageReport, ClientError>>,
    {
        self.usage.get_or_fetch(params_key, fetch).await
    }

    /// Invalidate every cached read of a resource type.
    ///
    /// The next read of that tag is guaranteed to fetch fresh server state,
    /// even with identical parameters.
    pub fn invalidate(&self, tag: ResourceTag) {
        trace!(tag = tag.as_str(), "invalidating resource tag");
        match tag {
            ResourceTag::Task => self.tasks.invalidate(),
            ResourceTag::Template => self.templates.invalidate(),
            ResourceTag::Usage => self.usage.invalidate(),
        }
    }

    /// Drop everything, including stale-but-available state.
    pub fn clear(&self) {
        self.tasks.invalidate();
        self.templates.invalidate();
        self.usage.invalidate();
        self.tasks.entries.invalidate_all();
        self.templates.entries.invalidate_all();
        self.usage.entries.invalidate_all();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            task_entries: self.tasks.entry_count(),
            template_entries: self.templates.entry_count(),
            usage_entries: self.usage.entry_count(),
        }
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("config", &self.config)
            .field("task_entries", &self.tasks.entry_count())
            .field("template_entries", &self.templates.entry_count())
            .field("usage_entries", &self.usage.entry_count())
            .finish()
    }
}

/// Stable cache key for a query's parameters.
pub(crate) fn params_key<T: serde::Serialize>(params: &T) -> Result<String, ClientError> {
    serde_json::to_string(params).map_err(|e| ClientError::Serialization(e.to_string()))
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cached task collections
    pub task_entries: u64,
    /// Number of cached template collections
    pub template_entries: u64,
    /// Number of cached usage reports
    pub usage_entries: u64,
}

impl CacheStats {
    /// Total number of cached collections.
    pub fn total_entries(&self) -> u64 {
        self.task_entries + self.template_entries + self.usage_entries
    }
}
