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

//! Configuration for the top-cryptos client

use chrono::Duration;
use dotenvy::dotenv;
use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

/// Errors raised while assembling configuration at composition time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  /// Required variable missing
  #[error("{0} not set")]
  Missing(&'static str),

  /// Variable present but unusable
  #[error("Invalid {name}: {value}")]
  Invalid { name: &'static str, value: String },
}

/// Network settings shared by every request the client builds
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkConfiguration {
  /// Base URL for the API, without a trailing path
  pub base_url: String,

  /// API key for authentication
  pub api_key: String,

  /// Headers applied verbatim to every request
  pub common_headers: BTreeMap<String, String>,
}

impl NetworkConfiguration {
  pub fn new(
    base_url: impl Into<String>,
    api_key: impl Into<String>,
    common_headers: BTreeMap<String, String>,
  ) -> Self {
    Self { base_url: base_url.into(), api_key: api_key.into(), common_headers }
  }

  /// CoinMarketCap base URL plus the API key and `Accept` headers
  pub fn coin_market_cap(api_key: impl Into<String>) -> Self {
    let api_key = api_key.into();
    let mut headers = BTreeMap::new();
    headers.insert(crate::API_KEY_HEADER.to_string(), api_key.clone());
    headers.insert("Accept".to_string(), "application/json".to_string());

    Self::new(crate::COIN_MARKET_CAP_BASE_URL, api_key, headers)
  }

  /// Builder: replace the base URL (mock servers, sandbox endpoints)
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Builder: add or replace one common header
  pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.common_headers.insert(name.into(), value.into());
    self
  }

  /// Load a CoinMarketCap configuration from the environment (and `.env`).
  ///
  /// `CMC_API_KEY` is required, `CMC_BASE_URL` overrides the default host.
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let api_key = lookup("CMC_API_KEY")
      .filter(|key| !key.trim().is_empty())
      .ok_or(ConfigError::Missing("CMC_API_KEY"))?;

    let config = Self::coin_market_cap(api_key);
    match lookup("CMC_BASE_URL") {
      Some(base_url) => Ok(config.with_base_url(base_url.trim_end_matches('/'))),
      None => Ok(config),
    }
  }
}

impl std::fmt::Debug for NetworkConfiguration {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let headers: BTreeMap<&str, &str> = self
      .common_headers
      .iter()
      .map(|(name, value)| {
        if name.eq_ignore_ascii_case(crate::API_KEY_HEADER) {
          (name.as_str(), "<redacted>")
        } else {
          (name.as_str(), value.as_str())
        }
      })
      .collect();

    f.debug_struct("NetworkConfiguration")
      .field("base_url", &self.base_url)
      .field("api_key", &"<redacted>")
      .field("common_headers", &headers)
      .finish()
  }
}

/// How long a cached response stays fresh.
///
/// The interval is signed and not validated here; the cache policy decides
/// what a zero or negative value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfiguration {
  pub expiration_interval: Duration,
}

impl CacheConfiguration {
  pub fn new(expiration_interval: Duration) -> Self {
    Self { expiration_interval }
  }

  /// Interval of `seconds`, saturating at the bounds of `Duration`
  pub fn from_secs(seconds: i64) -> Self {
    let interval = Duration::try_seconds(seconds)
      .unwrap_or(if seconds < 0 { Duration::MIN } else { Duration::MAX });
    Self::new(interval)
  }

  /// One minute expiry, handy while developing against the live API
  pub fn testing() -> Self {
    Self::from_secs(crate::TESTING_CACHE_EXPIRATION_SECS)
  }

  /// Whole seconds of the expiration interval (fractions truncated)
  pub fn expiration_secs(&self) -> i64 {
    self.expiration_interval.num_seconds()
  }

  /// Read `CMC_CACHE_TTL_SECS`, falling back to the 24 hour default
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    match lookup("CMC_CACHE_TTL_SECS") {
      Some(raw) => raw
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(Duration::try_seconds)
        .map(Self::new)
        .ok_or(ConfigError::Invalid { name: "CMC_CACHE_TTL_SECS", value: raw }),
      None => Ok(Self::default()),
    }
  }
}

impl Default for CacheConfiguration {
  fn default() -> Self {
    Self::from_secs(crate::DEFAULT_CACHE_EXPIRATION_SECS)
  }
}
