/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! In-memory HTTP response cache.
//!
//! Entries are keyed by request method and URL. Freshness follows the
//! standard rule: a stored response is served while `now - Date < max-age`,
//! using the `Cache-Control` and `Date` headers stored with it. Anything
//! else is a miss and the session goes back to the network.

use crate::transport::HttpResponse;
use chrono::{DateTime, Duration, Utc};
use reqwest::header::{HeaderMap, CACHE_CONTROL, DATE};
use reqwest::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// Identity of a cacheable request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  method: Method,
  url: Url,
}

impl CacheKey {
  pub fn new(method: Method, url: Url) -> Self {
    Self { method, url }
  }

  pub fn url(&self) -> &Url {
    &self.url
  }
}

#[derive(Debug, Clone)]
struct CacheEntry {
  response: HttpResponse,
  size: usize,
  sequence: u64,
}

#[derive(Debug)]
struct CacheInner {
  entries: HashMap<CacheKey, CacheEntry>,
  capacity: usize,
  current_size: usize,
  next_sequence: u64,
}

impl CacheInner {
  fn new(capacity: usize) -> Self {
    Self { entries: HashMap::new(), capacity, current_size: 0, next_sequence: 0 }
  }

  fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
    let entry = self.entries.remove(key)?;
    self.current_size -= entry.size;
    Some(entry)
  }

  fn evict_oldest(&mut self) -> bool {
    let oldest =
      self.entries.iter().min_by_key(|(_, entry)| entry.sequence).map(|(key, _)| key.clone());

    match oldest {
      Some(key) => {
        debug!("Evicting cached response for {}", key.url);
        self.remove(&key);
        true
      }
      None => false,
    }
  }

  fn insert(&mut self, key: CacheKey, response: HttpResponse) -> bool {
    let size = entry_size(&response);
    if size > self.capacity {
      return false;
    }

    self.remove(&key);
    while self.current_size + size > self.capacity {
      if !self.evict_oldest() {
        break;
      }
    }

    let sequence = self.next_sequence;
    self.next_sequence += 1;
    self.current_size += size;
    self.entries.insert(key, CacheEntry { response, size, sequence });
    true
  }
}

/// Thread-safe, size-bounded response cache shared by cloned handles
#[derive(Debug, Clone)]
pub struct ResponseCache {
  inner: Arc<RwLock<CacheInner>>,
}

impl ResponseCache {
  /// Create a cache holding at most `capacity` bytes
  pub fn new(capacity: usize) -> Self {
    Self { inner: Arc::new(RwLock::new(CacheInner::new(capacity))) }
  }

  /// Return the stored response for `key` if it is still fresh at `now`
  pub async fn lookup(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<HttpResponse> {
    let store = self.inner.read().await;
    let entry = store.entries.get(key)?;

    if is_fresh(&entry.response, now) {
      Some(entry.response.clone())
    } else {
      debug!("Cached response for {} is stale", key.url);
      None
    }
  }

  /// Return the stored response for `key`, fresh or not
  pub async fn peek(&self, key: &CacheKey) -> Option<HttpResponse> {
    let store = self.inner.read().await;
    store.entries.get(key).map(|entry| entry.response.clone())
  }

  /// Store `response`, evicting the oldest entries when over capacity.
  ///
  /// Returns `false` when the response is larger than the whole cache or
  /// forbids storage (`no-store`).
  pub async fn store(&self, key: CacheKey, response: HttpResponse) -> bool {
    if response.headers().map(forbids_storage).unwrap_or(false) {
      return false;
    }

    let mut store = self.inner.write().await;
    store.insert(key, response)
  }

  pub async fn remove(&self, key: &CacheKey) -> Option<HttpResponse> {
    let mut store = self.inner.write().await;
    store.remove(key).map(|entry| entry.response)
  }

  /// Drop every entry that is stale at `now`, returning how many were removed
  pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
    let mut store = self.inner.write().await;
    let stale: Vec<CacheKey> = store
      .entries
      .iter()
      .filter(|(_, entry)| !is_fresh(&entry.response, now))
      .map(|(key, _)| key.clone())
      .collect();

    for key in &stale {
      store.remove(key);
    }

    if !stale.is_empty() {
      info!("Purged {} expired cached responses", stale.len());
    }
    stale.len()
  }

  pub async fn clear(&self) {
    let mut store = self.inner.write().await;
    store.entries.clear();
    store.current_size = 0;
  }

  /// Number of entries, including stale ones not yet purged
  pub async fn len(&self) -> usize {
    self.inner.read().await.entries.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.inner.read().await.entries.is_empty()
  }

  /// Bytes currently accounted to stored entries
  pub async fn current_size(&self) -> usize {
    self.inner.read().await.current_size
  }

  pub async fn capacity(&self) -> usize {
    self.inner.read().await.capacity
  }
}

impl Default for ResponseCache {
  fn default() -> Self {
    Self::new(tc_core::DEFAULT_MEMORY_CAPACITY)
  }
}

fn entry_size(response: &HttpResponse) -> usize {
  let header_bytes: usize = response
    .headers()
    .map(|headers| headers.iter().map(|(name, value)| name.as_str().len() + value.len()).sum())
    .unwrap_or(0);
  response.body.len() + header_bytes
}

fn cache_directives(headers: &HeaderMap) -> impl Iterator<Item = String> + '_ {
  headers
    .get_all(CACHE_CONTROL)
    .into_iter()
    .filter_map(|value| value.to_str().ok())
    .flat_map(|value| value.split(','))
    .map(|directive| directive.trim().to_ascii_lowercase())
}

fn forbids_storage(headers: &HeaderMap) -> bool {
  cache_directives(headers).any(|directive| directive == "no-store")
}

/// `max-age` from `Cache-Control`, `None` when absent or when the response
/// must be revalidated.
///
/// Values beyond what a `Duration` can hold saturate instead of failing.
pub fn max_age(headers: &HeaderMap) -> Option<Duration> {
  let mut max_age = None;
  for directive in cache_directives(headers) {
    if directive == "no-cache" || directive == "no-store" {
      return None;
    }
    if let Some(seconds) = directive.strip_prefix("max-age=") {
      max_age = seconds.trim_matches('"').parse::<i64>().ok().map(saturating_seconds);
    }
  }
  max_age
}

fn saturating_seconds(seconds: i64) -> Duration {
  Duration::try_seconds(seconds).unwrap_or(if seconds < 0 { Duration::MIN } else { Duration::MAX })
}

/// `Date` header parsed as an RFC 1123 timestamp
pub fn response_date(headers: &HeaderMap) -> Option<DateTime<Utc>> {
  let raw = headers.get(DATE)?.to_str().ok()?;
  DateTime::parse_from_rfc2822(raw).ok().map(|date| date.with_timezone(&Utc))
}

/// Whether a stored response may still be served at `now`
pub fn is_fresh(response: &HttpResponse, now: DateTime<Utc>) -> bool {
  let Some(headers) = response.headers() else {
    return false;
  };
  let (Some(lifetime), Some(date)) = (max_age(headers), response_date(headers)) else {
    return false;
  };

  let age = (now - date).max(Duration::zero());
  age < lifetime
}
