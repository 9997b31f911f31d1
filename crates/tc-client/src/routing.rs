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

//! CoinMarketCap endpoint routing.
//!
//! [`CryptoApiRouter`] describes *what* to call; [`ApiRequest`] pairs it with a
//! [`NetworkConfiguration`] to produce a complete [`HttpRequest`]. There is no
//! way to build a request without a configuration.

use crate::transport::HttpRequest;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tc_core::NetworkConfiguration;
use thiserror::Error;
use url::Url;

/// Path of the ranked listings endpoint
pub const LISTINGS_LATEST_PATH: &str = "/v1/cryptocurrency/listings/latest";

/// Path of the metadata (logo) endpoint
pub const CRYPTO_INFO_PATH: &str = "/v2/cryptocurrency/info";

/// Errors raised while turning a route into a request
#[derive(Error, Debug)]
pub enum RequestError {
  #[error("Invalid URL {url}: {source}")]
  InvalidUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },

  #[error("Invalid header {name}")]
  InvalidHeader { name: String },
}

/// CoinMarketCap endpoints used by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoApiRouter {
  /// Top `limit` assets by rank, priced in `currency`
  TopCryptos { limit: u32, currency: String },
  /// Metadata for a comma-separated identifier list
  CryptoMetadata { ids: String },
}

impl CryptoApiRouter {
  pub fn top_cryptos(limit: u32, currency: impl Into<String>) -> Self {
    CryptoApiRouter::TopCryptos { limit, currency: currency.into() }
  }

  pub fn crypto_metadata(ids: impl Into<String>) -> Self {
    CryptoApiRouter::CryptoMetadata { ids: ids.into() }
  }

  pub fn path(&self) -> &'static str {
    match self {
      CryptoApiRouter::TopCryptos { .. } => LISTINGS_LATEST_PATH,
      CryptoApiRouter::CryptoMetadata { .. } => CRYPTO_INFO_PATH,
    }
  }

  pub fn method(&self) -> Method {
    match self {
      CryptoApiRouter::TopCryptos { .. } | CryptoApiRouter::CryptoMetadata { .. } => Method::GET,
    }
  }

  /// Query parameters in the order they are appended to the URL
  pub fn parameters(&self) -> Vec<(&'static str, String)> {
    match self {
      CryptoApiRouter::TopCryptos { limit, currency } => {
        vec![("limit", limit.to_string()), ("convert", currency.clone())]
      }
      CryptoApiRouter::CryptoMetadata { ids } => vec![("id", ids.clone())],
    }
  }
}

/// A route bound to the configuration it will be sent with
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
  router: CryptoApiRouter,
  configuration: &'a NetworkConfiguration,
}

impl<'a> ApiRequest<'a> {
  pub fn new(router: CryptoApiRouter, configuration: &'a NetworkConfiguration) -> Self {
    Self { router, configuration }
  }

  pub fn router(&self) -> &CryptoApiRouter {
    &self.router
  }

  /// Build the request: base URL + path, query parameters, configured headers.
  pub fn as_http_request(&self) -> Result<HttpRequest, RequestError> {
    let raw = format!("{}{}", self.configuration.base_url, self.router.path());
    let mut url =
      Url::parse(&raw).map_err(|source| RequestError::InvalidUrl { url: raw.clone(), source })?;

    if url.cannot_be_a_base() {
      return Err(RequestError::InvalidUrl { url: raw, source: url::ParseError::RelativeUrlWithoutBase });
    }

    {
      let mut query_pairs = url.query_pairs_mut();
      for (key, value) in self.router.parameters() {
        query_pairs.append_pair(key, &value);
      }
    }

    let mut headers = HeaderMap::with_capacity(self.configuration.common_headers.len());
    for (name, value) in &self.configuration.common_headers {
      let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| RequestError::InvalidHeader { name: name.clone() })?;
      let header_value = HeaderValue::from_str(value)
        .map_err(|_| RequestError::InvalidHeader { name: name.clone() })?;
      headers.insert(header_name, header_value);
    }

    Ok(HttpRequest { method: self.router.method(), url, headers })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn configuration() -> NetworkConfiguration {
    NetworkConfiguration::coin_market_cap("test-key")
  }

  fn query(request: &HttpRequest) -> Vec<(String, String)> {
    request.url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
  }

  #[test]
  fn test_top_cryptos_route() {
    let router = CryptoApiRouter::top_cryptos(10, "USD");

    assert_eq!(router.path(), "/v1/cryptocurrency/listings/latest");
    assert_eq!(router.method(), Method::GET);
    assert_eq!(
      router.parameters(),
      vec![("limit", "10".to_string()), ("convert", "USD".to_string())]
    );
  }

  #[test]
  fn test_crypto_metadata_route() {
    let router = CryptoApiRouter::crypto_metadata("1,1027,825");

    assert_eq!(router.path(), "/v2/cryptocurrency/info");
    assert_eq!(router.method(), Method::GET);
    assert_eq!(router.parameters(), vec![("id", "1,1027,825".to_string())]);
  }

  #[test]
  fn test_listings_request_has_absolute_url_query_and_headers() {
    let config = configuration();
    let request = ApiRequest::new(CryptoApiRouter::top_cryptos(50, "EUR"), &config)
      .as_http_request()
      .unwrap();

    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url.host_str(), Some("pro-api.coinmarketcap.com"));
    assert_eq!(request.url.path(), "/v1/cryptocurrency/listings/latest");
    assert_eq!(
      query(&request),
      vec![("limit".to_string(), "50".to_string()), ("convert".to_string(), "EUR".to_string())]
    );
    assert_eq!(request.headers.get("X-CMC_PRO_API_KEY").unwrap(), "test-key");
    assert_eq!(request.headers.get("accept").unwrap(), "application/json");
  }

  #[test]
  fn test_metadata_request_keeps_id_list_intact() {
    let config = configuration();
    let request = ApiRequest::new(CryptoApiRouter::crypto_metadata("1,1027"), &config)
      .as_http_request()
      .unwrap();

    assert_eq!(request.url.path(), "/v2/cryptocurrency/info");
    assert_eq!(query(&request), vec![("id".to_string(), "1,1027".to_string())]);
  }

  #[test]
  fn test_custom_headers_are_applied_verbatim() {
    let config = configuration().with_header("X-Trace", "abc-123");
    let request = ApiRequest::new(CryptoApiRouter::crypto_metadata("1"), &config)
      .as_http_request()
      .unwrap();

    assert_eq!(request.headers.len(), 3);
    assert_eq!(request.headers.get("x-trace").unwrap(), "abc-123");
  }

  #[test]
  fn test_malformed_base_url_fails() {
    let config = configuration().with_base_url("not a url");
    let err = ApiRequest::new(CryptoApiRouter::top_cryptos(5, "USD"), &config)
      .as_http_request()
      .unwrap_err();

    assert!(matches!(err, RequestError::InvalidUrl { .. }));
  }

  #[test]
  fn test_invalid_header_fails() {
    let config = configuration().with_header("Bad Header", "value");
    let err = ApiRequest::new(CryptoApiRouter::top_cryptos(5, "USD"), &config)
      .as_http_request()
      .unwrap_err();

    assert!(matches!(err, RequestError::InvalidHeader { ref name } if name == "Bad Header"));
  }
}
