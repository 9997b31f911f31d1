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

//! # tc-client
//!
//! Fetches the top-ranked cryptocurrencies from CoinMarketCap and joins them
//! with their logos.
//!
//! ## Features
//!
//! - **Two-stage fetch**: ranked listings, then metadata for exactly those ids
//! - **HTTP caching**: responses are cached in memory with a configurable
//!   `max-age` (24 hours by default)
//! - **Typed errors**: every failure surfaces as a `tc_core::NetworkError`
//! - **Pluggable transport**: reqwest by default, any [`HttpTransport`] in tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tc_client::{CryptoApiService, GetTopCryptos};
//! use tc_core::{CacheConfiguration, SystemClock};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = CryptoApiService::coin_market_cap("my-api-key", CacheConfiguration::default())?;
//!     let top = GetTopCryptos::new(Arc::new(service));
//!
//!     let snapshot = top.load(5, "USD", &SystemClock).await?;
//!     for crypto in &snapshot {
//!         println!("#{} {} {:.2}", crypto.rank(), crypto.symbol(), crypto.price());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Transport failures map onto `NetworkError`: non-2xx statuses become
//! `Http { status_code }`, malformed bodies `Decoding`, responses without an
//! HTTP head `InvalidResponse`, and everything else `Network`.

#![warn(clippy::all)]

pub mod cache;
pub mod cache_policy;
pub mod logger;
pub mod routing;
pub mod service;
pub mod transport;
pub mod use_case;

pub use cache::{CacheKey, ResponseCache};
pub use cache_policy::{CachedResponseHandler, CryptoCachedResponseHandler};
pub use logger::{EventMonitor, NetworkLogger};
pub use routing::{ApiRequest, CryptoApiRouter, RequestError};
pub use service::{merge_listings, CryptoApiService, CryptoService};
pub use transport::{
  HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, Session, SessionBuilder,
  TransportError,
};
pub use use_case::{CryptoSnapshot, GetTopCryptos};

pub use tc_core::{CacheConfiguration, NetworkConfiguration, NetworkError};
pub use tc_models::Crypto;
