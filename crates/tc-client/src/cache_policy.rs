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

//! Decides how long crypto responses stay cached.
//!
//! Before the session stores a network response it hands it to a
//! [`CachedResponseHandler`]. The crypto handler rewrites `Cache-Control` to
//! `public, max-age=<N>` and stamps a `Date` header when the server sent
//! none, so the cache store can compute `age = now - Date`.

use crate::transport::HttpResponse;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderValue, CACHE_CONTROL, DATE};
use tc_core::CacheConfiguration;
use tracing::debug;

/// RFC 1123 layout used for HTTP `Date` headers
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Interception point run on every response before it is cached.
///
/// Returning `None` keeps the response out of the cache.
pub trait CachedResponseHandler: Send + Sync {
  fn will_cache(&self, response: HttpResponse, now: DateTime<Utc>) -> Option<HttpResponse>;
}

/// Applies the expiration window from a [`CacheConfiguration`]
#[derive(Debug, Clone)]
pub struct CryptoCachedResponseHandler {
  cache_configuration: CacheConfiguration,
}

impl CryptoCachedResponseHandler {
  pub fn new(cache_configuration: CacheConfiguration) -> Self {
    Self { cache_configuration }
  }

  pub fn cache_configuration(&self) -> &CacheConfiguration {
    &self.cache_configuration
  }
}

impl CachedResponseHandler for CryptoCachedResponseHandler {
  fn will_cache(&self, response: HttpResponse, now: DateTime<Utc>) -> Option<HttpResponse> {
    let expiration_secs = self.cache_configuration.expiration_secs();
    debug!(max_age = max_age_seconds(expiration_secs), "Rewriting cache headers for {}", response.url);
    Some(rewrite_cache_headers(response, expiration_secs, now))
  }
}

/// Seconds written into `max-age`; negative intervals become 0
pub fn max_age_seconds(expiration_secs: i64) -> i64 {
  expiration_secs.max(0)
}

/// `Cache-Control` value for an expiration window
pub fn cache_control_value(expiration_secs: i64) -> String {
  format!("public, max-age={}", max_age_seconds(expiration_secs))
}

/// Format `now` as an HTTP date, e.g. `Thu, 14 Aug 2025 10:00:00 GMT`
pub fn http_date(now: DateTime<Utc>) -> String {
  now.format(HTTP_DATE_FORMAT).to_string()
}

/// Rewrite the caching headers of `response`.
///
/// Sets `Cache-Control: public, max-age=<expiration_secs>` and adds a `Date`
/// of `now` if none is present. Responses without an HTTP head come back
/// untouched.
pub fn rewrite_cache_headers(
  mut response: HttpResponse,
  expiration_secs: i64,
  now: DateTime<Utc>,
) -> HttpResponse {
  let Some(head) = response.head.as_mut() else {
    return response;
  };

  if let Ok(value) = HeaderValue::from_str(&cache_control_value(expiration_secs)) {
    head.headers.insert(CACHE_CONTROL, value);
  }

  if !head.headers.contains_key(DATE) {
    if let Ok(value) = HeaderValue::from_str(&http_date(now)) {
      head.headers.insert(DATE, value);
    }
  }

  response
}
