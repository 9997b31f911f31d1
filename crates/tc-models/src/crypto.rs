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

use serde::Serialize;

/// A ranked cryptocurrency as shown by the list and detail screens.
///
/// Fields are read-only once built; the acquisition pipeline is the only
/// producer outside of tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crypto {
  id: i64,
  name: String,
  symbol: String,
  price: f64,
  percent_change_24h: f64,
  market_cap: f64,
  rank: i64,
  image_url: String,
}

impl Crypto {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    id: i64,
    name: impl Into<String>,
    symbol: impl Into<String>,
    price: f64,
    percent_change_24h: f64,
    market_cap: f64,
    rank: i64,
    image_url: impl Into<String>,
  ) -> Self {
    Self {
      id,
      name: name.into(),
      symbol: symbol.into(),
      price,
      percent_change_24h,
      market_cap,
      rank,
      image_url: image_url.into(),
    }
  }

  /// CoinMarketCap identifier, unique per asset
  pub fn id(&self) -> i64 {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Ticker symbol, e.g. `BTC`
  pub fn symbol(&self) -> &str {
    &self.symbol
  }

  /// Price in the currency the list was requested in
  pub fn price(&self) -> f64 {
    self.price
  }

  /// Signed 24 hour change in percent
  pub fn percent_change_24h(&self) -> f64 {
    self.percent_change_24h
  }

  /// Not populated by the listing pipeline; always 0.0 there
  pub fn market_cap(&self) -> f64 {
    self.market_cap
  }

  /// 1-based rank from the source ranking
  pub fn rank(&self) -> i64 {
    self.rank
  }

  /// Logo URL, empty when no metadata was available
  pub fn image_url(&self) -> &str {
    &self.image_url
  }

  pub fn has_image(&self) -> bool {
    !self.image_url.is_empty()
  }
}
