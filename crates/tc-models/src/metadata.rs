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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `/v2/cryptocurrency/info` response, keyed by identifier as a string
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetadataResponse {
  pub data: HashMap<String, MetadataRecord>,
}

impl MetadataResponse {
  /// Logo URL for an asset identifier, if the response carried one
  pub fn logo_for(&self, id: i64) -> Option<&str> {
    self.data.get(&id.to_string()).map(|record| record.logo.as_str())
  }
}

/// Descriptive data for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
  pub id: i64,
  pub name: String,
  pub symbol: String,
  pub logo: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_metadata_response_parsing() {
    let json = r#"{
      "data": {
        "1": {
          "id": 1,
          "name": "Bitcoin",
          "symbol": "BTC",
          "category": "coin",
          "logo": "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png"
        },
        "1027": {
          "id": 1027,
          "name": "Ethereum",
          "symbol": "ETH",
          "logo": "https://s2.coinmarketcap.com/static/img/coins/64x64/1027.png"
        }
      }
    }"#;

    let response: MetadataResponse = serde_json::from_str(json).unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data["1027"].symbol, "ETH");
    assert_eq!(
      response.logo_for(1),
      Some("https://s2.coinmarketcap.com/static/img/coins/64x64/1.png")
    );
    assert_eq!(response.logo_for(825), None);
  }

  #[test]
  fn test_metadata_record_requires_logo() {
    let json = r#"{"data": {"1": {"id": 1, "name": "Bitcoin", "symbol": "BTC"}}}"#;
    assert!(serde_json::from_str::<MetadataResponse>(json).is_err());
  }
}
