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

//! # tc-models
//!
//! Data models for the CoinMarketCap responses consumed by the top-cryptos
//! client, plus the [`Crypto`] domain entity the pipeline produces.
//!
//! - [`listing`]: `/v1/cryptocurrency/listings/latest` wire shapes
//! - [`metadata`]: `/v2/cryptocurrency/info` wire shapes
//! - [`crypto`]: the immutable domain record handed to presentation
//!
//! ## Usage
//!
//! ```ignore
//! use tc_models::ListingsResponse;
//!
//! let listings: ListingsResponse = serde_json::from_str(&response_json)?;
//! let btc = listings.data[0].to_domain("USD", "https://x/btc.png");
//! ```

#![warn(clippy::all)]

pub mod crypto;
pub mod listing;
pub mod metadata;

pub use crypto::*;
pub use listing::*;
pub use metadata::*;
