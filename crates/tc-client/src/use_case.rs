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

//! Caller-facing entry point and the fetched list it produces.

use crate::service::CryptoService;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tc_core::{Clock, NetworkError, DEFAULT_CURRENCY, DEFAULT_LIMIT};
use tc_models::Crypto;

/// Fetch the top cryptocurrencies through a [`CryptoService`]
#[derive(Clone)]
pub struct GetTopCryptos {
  service: Arc<dyn CryptoService>,
}

impl GetTopCryptos {
  pub fn new(service: Arc<dyn CryptoService>) -> Self {
    Self { service }
  }

  pub async fn execute(&self, limit: u32, currency: &str) -> Result<Vec<Crypto>, NetworkError> {
    self.service.get_top_cryptos(limit, currency).await
  }

  /// Top five in USD
  pub async fn execute_default(&self) -> Result<Vec<Crypto>, NetworkError> {
    self.execute(DEFAULT_LIMIT, DEFAULT_CURRENCY).await
  }

  /// Fetch and stamp the result with the time it was loaded
  pub async fn load(
    &self,
    limit: u32,
    currency: &str,
    clock: &dyn Clock,
  ) -> Result<CryptoSnapshot, NetworkError> {
    let cryptos = self.execute(limit, currency).await?;
    Ok(CryptoSnapshot::new(cryptos, clock.now()))
  }
}

impl std::fmt::Debug for GetTopCryptos {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GetTopCryptos").finish_non_exhaustive()
  }
}

/// A fetched, ordered crypto list and when it was loaded.
///
/// Detail reads go through [`CryptoSnapshot::details`] and never hit the
/// network.
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoSnapshot {
  cryptos: Vec<Crypto>,
  last_updated: DateTime<Utc>,
}

impl CryptoSnapshot {
  pub fn new(cryptos: Vec<Crypto>, last_updated: DateTime<Utc>) -> Self {
    Self { cryptos, last_updated }
  }

  /// Entity with the given CoinMarketCap id, if it was part of the fetch
  pub fn details(&self, id: i64) -> Option<&Crypto> {
    self.cryptos.iter().find(|crypto| crypto.id() == id)
  }

  pub fn get(&self, index: usize) -> Option<&Crypto> {
    self.cryptos.get(index)
  }

  pub fn len(&self) -> usize {
    self.cryptos.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cryptos.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Crypto> {
    self.cryptos.iter()
  }

  pub fn last_updated(&self) -> DateTime<Utc> {
    self.last_updated
  }

  pub fn into_inner(self) -> Vec<Crypto> {
    self.cryptos
  }
}

impl<'a> IntoIterator for &'a CryptoSnapshot {
  type Item = &'a Crypto;
  type IntoIter = std::slice::Iter<'a, Crypto>;

  fn into_iter(self) -> Self::IntoIter {
    self.cryptos.iter()
  }
}
