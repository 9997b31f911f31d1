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

use crate::crypto::Crypto;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `/v1/cryptocurrency/listings/latest` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingsResponse {
  pub data: Vec<ListingRecord>,
}

impl ListingsResponse {
  /// Identifiers joined with commas, in listing order (`"1,1027,825"`)
  pub fn joined_ids(&self) -> String {
    self.data.iter().map(|record| record.id.to_string()).collect::<Vec<_>>().join(",")
  }
}

/// One asset's rank, identity and per-currency quotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub cmc_rank: i64,
  /// Quotes keyed by currency code (`USD`, `EUR`, ...)
  pub quote: HashMap<String, QuoteData>,
}

/// Price information in one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
  pub price: f64,
  pub percent_change_24h: Option<f64>,
  pub last_updated: String,
}

impl ListingRecord {
  /// Build the domain entity using the quote for `currency`.
  ///
  /// Returns `None` when the record has no quote in that currency; a missing
  /// 24h change becomes 0.0.
  pub fn to_domain(&self, currency: &str, image_url: impl Into<String>) -> Option<Crypto> {
    let quote = self.quote.get(currency)?;

    Some(Crypto::new(
      self.id,
      self.name.clone(),
      self.symbol.clone(),
      quote.price,
      quote.percent_change_24h.unwrap_or(0.0),
      0.0,
      self.cmc_rank,
      image_url,
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tc_core::test_utils::{assert_percentage_eq, assert_price_eq};

  const BITCOIN_LISTING: &str = r#"{
    "status": {"error_code": 0, "credit_count": 1},
    "data": [
      {
        "id": 1,
        "name": "Bitcoin",
        "symbol": "BTC",
        "slug": "bitcoin",
        "cmc_rank": 1,
        "quote": {
          "USD": {
            "price": 45000.50,
            "volume_24h": 20000000000,
            "percent_change_24h": 2.5,
            "last_updated": "2025-08-14T10:00:00.000Z"
          }
        }
      },
      {
        "id": 1027,
        "name": "Ethereum",
        "symbol": "ETH",
        "cmc_rank": 2,
        "quote": {
          "USD": {
            "price": 3000.0,
            "percent_change_24h": null,
            "last_updated": "2025-08-14T10:00:00.000Z"
          }
        }
      }
    ]
  }"#;

  #[test]
  fn test_listing_response_parsing_ignores_unknown_fields() {
    let response: ListingsResponse = serde_json::from_str(BITCOIN_LISTING).unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0].symbol, "BTC");
    assert_eq!(response.data[1].cmc_rank, 2);
    assert_eq!(response.joined_ids(), "1,1027");
  }

  #[test]
  fn test_to_domain_uses_requested_currency() {
    let response: ListingsResponse = serde_json::from_str(BITCOIN_LISTING).unwrap();
    let btc = response.data[0].to_domain("USD", "https://x/btc.png").unwrap();

    assert_eq!(btc.id(), 1);
    assert_eq!(btc.rank(), 1);
    assert_price_eq(btc.price(), 45000.50);
    assert_percentage_eq(btc.percent_change_24h(), 2.5);
    assert_price_eq(btc.market_cap(), 0.0);
    assert_eq!(btc.image_url(), "https://x/btc.png");
  }

  #[test]
  fn test_to_domain_defaults_missing_change_to_zero() {
    let response: ListingsResponse = serde_json::from_str(BITCOIN_LISTING).unwrap();
    let eth = response.data[1].to_domain("USD", "").unwrap();

    assert_percentage_eq(eth.percent_change_24h(), 0.0);
  }

  #[test]
  fn test_to_domain_without_currency_quote_is_none() {
    let response: ListingsResponse = serde_json::from_str(BITCOIN_LISTING).unwrap();
    assert!(response.data[0].to_domain("EUR", "").is_none());
  }

  #[test]
  fn test_listing_missing_price_fails_to_decode() {
    let json = r#"{"data": [{"id": 1, "name": "Bitcoin", "symbol": "BTC", "cmc_rank": 1,
      "quote": {"USD": {"last_updated": "2025-08-14T10:00:00.000Z"}}}]}"#;
    assert!(serde_json::from_str::<ListingsResponse>(json).is_err());
  }

  #[test]
  fn test_empty_listing_has_no_ids() {
    let response: ListingsResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
    assert!(response.data.is_empty());
    assert_eq!(response.joined_ids(), "");
  }
}
