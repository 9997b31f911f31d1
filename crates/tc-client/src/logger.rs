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

//! Session event monitors.

use crate::transport::{HttpRequest, HttpResponse, TransportError};
use reqwest::header::HeaderMap;
use tc_core::API_KEY_HEADER;
use tracing::{debug, info, warn};

/// Placeholder written in place of credential header values
pub const REDACTED: &str = "<redacted>";

/// Observer of request lifecycle events emitted by a [`Session`](crate::Session).
///
/// Monitors are called synchronously from the task that executes the request.
pub trait EventMonitor: Send + Sync {
  /// A request is about to go out on the wire
  fn request_did_resume(&self, request: &HttpRequest);

  /// A response arrived, either from the network or from the cache
  fn did_receive_response(&self, _request: &HttpRequest, _response: &HttpResponse, _from_cache: bool) {}

  fn did_fail(&self, _request: &HttpRequest, _error: &TransportError) {}
}

/// Logs requests and responses through `tracing`.
///
/// The API key header is always redacted. Response bodies are only logged
/// with the `debug-logging` feature.
#[derive(Debug, Default, Clone)]
pub struct NetworkLogger;

impl NetworkLogger {
  pub fn new() -> Self {
    Self
  }
}

impl EventMonitor for NetworkLogger {
  fn request_did_resume(&self, request: &HttpRequest) {
    info!("Request started: {} {}", request.method, request.url);
    debug!("Request headers: {:?}", redacted_headers(&request.headers));
  }

  fn did_receive_response(&self, request: &HttpRequest, response: &HttpResponse, from_cache: bool) {
    match response.status() {
      Some(status) => info!(
        status = status.as_u16(),
        from_cache,
        bytes = response.body.len(),
        "Response received for {}",
        request.url
      ),
      None => warn!("Non-HTTP response received for {}", request.url),
    }

    #[cfg(feature = "debug-logging")]
    debug!("Response body: {}", String::from_utf8_lossy(&response.body));
  }

  fn did_fail(&self, request: &HttpRequest, error: &TransportError) {
    warn!("Request failed: {} {}: {}", request.method, request.url, error);
  }
}

/// Header name/value pairs safe to write to logs
pub fn redacted_headers(headers: &HeaderMap) -> Vec<(String, String)> {
  headers
    .iter()
    .map(|(name, value)| {
      let shown = if name.as_str().eq_ignore_ascii_case(API_KEY_HEADER) {
        REDACTED.to_string()
      } else {
        value.to_str().unwrap_or("<binary>").to_string()
      };
      (name.as_str().to_string(), shown)
    })
    .collect()
}
