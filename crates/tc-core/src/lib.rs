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

//! # tc-core
//!
//! Shared building blocks for the top-cryptos client: network and cache
//! configuration, the domain error taxonomy, and a clock abstraction used
//! wherever "now" matters (cache freshness, `Date` headers, snapshot stamps).

pub mod clock;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CacheConfiguration, ConfigError, NetworkConfiguration};
pub use error::{BoxError, NetworkError, Result};

/// Base URL for the CoinMarketCap pro API
pub const COIN_MARKET_CAP_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Header carrying the CoinMarketCap API key
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Currency used for price conversion when the caller does not pick one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Number of assets fetched when the caller does not pick a limit
pub const DEFAULT_LIMIT: u32 = 5;

/// Default cache expiration: 24 hours
pub const DEFAULT_CACHE_EXPIRATION_SECS: i64 = 24 * 60 * 60;

/// Short cache expiration used while testing: 1 minute
pub const TESTING_CACHE_EXPIRATION_SECS: i64 = 60;

/// In-memory response cache capacity (10 MiB)
pub const DEFAULT_MEMORY_CAPACITY: usize = 10 * 1024 * 1024;
