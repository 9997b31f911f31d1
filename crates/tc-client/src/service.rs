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

//! Two-stage acquisition of the top cryptocurrencies.
//!
//! Stage one fetches the ranked listings with prices in the requested
//! currency. Stage two fetches logo metadata for exactly the identifiers that
//! came back. The two are merged into [`Crypto`] entities in listing order.

use crate::routing::{ApiRequest, CryptoApiRouter, RequestError};
use crate::transport::{Session, TransportError};
use async_trait::async_trait;
use std::sync::Arc;
use tc_core::{CacheConfiguration, NetworkConfiguration, NetworkError};
use tc_models::{Crypto, ListingsResponse, MetadataResponse};
use tracing::{debug, info, instrument};

/// Source of the ranked crypto list
#[async_trait]
pub trait CryptoService: Send + Sync {
  /// Fetch up to `limit` cryptocurrencies priced in `currency`, ordered by rank.
  async fn get_top_cryptos(&self, limit: u32, currency: &str) -> Result<Vec<Crypto>, NetworkError>;
}

/// [`CryptoService`] backed by the CoinMarketCap API
///
/// # Examples
///
/// ```ignore
/// use tc_client::{CryptoApiService, CryptoService};
/// use tc_core::CacheConfiguration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let service = CryptoApiService::coin_market_cap("my-api-key", CacheConfiguration::default())?;
///     for crypto in service.get_top_cryptos(5, "USD").await? {
///         println!("#{} {} {:.2}", crypto.rank(), crypto.symbol(), crypto.price());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CryptoApiService {
  session: Arc<Session>,
  configuration: NetworkConfiguration,
}

impl CryptoApiService {
  pub fn new(session: Arc<Session>, configuration: NetworkConfiguration) -> Self {
    Self { session, configuration }
  }

  /// Service against the public CoinMarketCap endpoint with a caching,
  /// logging session.
  pub fn coin_market_cap(
    api_key: impl Into<String>,
    cache_configuration: CacheConfiguration,
  ) -> Result<Self, NetworkError> {
    let session = Session::crypto(cache_configuration, true)?;
    Ok(Self::new(Arc::new(session), NetworkConfiguration::coin_market_cap(api_key)))
  }

  pub fn session(&self) -> &Arc<Session> {
    &self.session
  }

  pub fn configuration(&self) -> &NetworkConfiguration {
    &self.configuration
  }

  async fn fetch_listings(&self, limit: u32, currency: &str) -> Result<ListingsResponse, NetworkError> {
    let request =
      ApiRequest::new(CryptoApiRouter::top_cryptos(limit, currency), &self.configuration)
        .as_http_request()?;
    Ok(self.session.execute(request).await?)
  }

  async fn fetch_metadata(&self, ids: String) -> Result<MetadataResponse, NetworkError> {
    let request = ApiRequest::new(CryptoApiRouter::crypto_metadata(ids), &self.configuration)
      .as_http_request()?;
    Ok(self.session.execute(request).await?)
  }
}

#[async_trait]
impl CryptoService for CryptoApiService {
  #[instrument(skip(self), fields(limit = limit, currency = %currency))]
  async fn get_top_cryptos(&self, limit: u32, currency: &str) -> Result<Vec<Crypto>, NetworkError> {
    validate(limit, currency)?;

    let listings = self.fetch_listings(limit, currency).await?;
    if listings.data.is_empty() {
      debug!("No listings returned, skipping metadata request");
      return Ok(Vec::new());
    }

    let metadata = self.fetch_metadata(listings.joined_ids()).await?;
    let cryptos = merge_listings(&listings, &metadata, currency);

    info!("Fetched {} of {} listings in {}", cryptos.len(), listings.data.len(), currency);
    Ok(cryptos)
  }
}

fn validate(limit: u32, currency: &str) -> Result<(), NetworkError> {
  if limit == 0 {
    return Err(NetworkError::network("limit must be greater than zero"));
  }
  if currency.trim().is_empty() {
    return Err(NetworkError::network("currency must not be empty"));
  }
  Ok(())
}

/// Join listings with their logos.
///
/// Listing order is kept. Records without a quote in `currency` are dropped;
/// records without metadata get an empty image URL.
pub fn merge_listings(
  listings: &ListingsResponse,
  metadata: &MetadataResponse,
  currency: &str,
) -> Vec<Crypto> {
  listings
    .data
    .iter()
    .filter_map(|record| {
      let logo = metadata.logo_for(record.id).unwrap_or_default();
      let crypto = record.to_domain(currency, logo);
      if crypto.is_none() {
        debug!("Dropping {} ({}): no {} quote", record.symbol, record.id, currency);
      }
      crypto
    })
    .collect()
}

impl From<TransportError> for NetworkError {
  fn from(err: TransportError) -> Self {
    match err {
      TransportError::UnacceptableStatus { status } => NetworkError::Http { status_code: status },
      TransportError::Decoding(e) => NetworkError::decoding(e),
      TransportError::InvalidResponse => NetworkError::InvalidResponse,
      TransportError::Connection(e) => NetworkError::Network(e),
      TransportError::Request(e) => NetworkError::network(e),
    }
  }
}

impl From<RequestError> for NetworkError {
  fn from(err: RequestError) -> Self {
    NetworkError::network(err)
  }
}
