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

//! HTTP transport layer: request/response types, the pluggable wire transport
//! and the caching [`Session`] that decodes responses.

use crate::cache::{CacheKey, ResponseCache};
use crate::cache_policy::{CachedResponseHandler, CryptoCachedResponseHandler};
use crate::logger::{EventMonitor, NetworkLogger};
use crate::routing::RequestError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tc_core::{BoxError, CacheConfiguration, Clock, SystemClock};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default request timeout for [`ReqwestTransport`]
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A fully formed request, as produced by the router
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
  pub method: Method,
  pub url: Url,
  pub headers: HeaderMap,
}

impl HttpRequest {
  pub fn new(method: Method, url: Url) -> Self {
    Self { method, url, headers: HeaderMap::new() }
  }

  /// Key under which a response to this request is cached
  pub fn cache_key(&self) -> CacheKey {
    CacheKey::new(self.method.clone(), self.url.clone())
  }
}

/// Status line and headers of an HTTP response
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseHead {
  pub status: StatusCode,
  pub headers: HeaderMap,
}

/// A response as delivered by a transport and as stored in the cache.
///
/// `head` is `None` when the transport produced something that is not an
/// HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
  pub url: Url,
  pub head: Option<ResponseHead>,
  pub body: Vec<u8>,
}

impl HttpResponse {
  pub fn new(url: Url, status: StatusCode, headers: HeaderMap, body: impl Into<Vec<u8>>) -> Self {
    Self { url, head: Some(ResponseHead { status, headers }), body: body.into() }
  }

  /// Response without an HTTP head
  pub fn opaque(url: Url, body: impl Into<Vec<u8>>) -> Self {
    Self { url, head: None, body: body.into() }
  }

  pub fn status(&self) -> Option<StatusCode> {
    self.head.as_ref().map(|head| head.status)
  }

  pub fn headers(&self) -> Option<&HeaderMap> {
    self.head.as_ref().map(|head| &head.headers)
  }

  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers().and_then(|headers| headers.get(name)).and_then(|value| value.to_str().ok())
  }
}

/// Failures raised while executing a request
#[derive(Error, Debug)]
pub enum TransportError {
  /// The request could not be built
  #[error(transparent)]
  Request(#[from] RequestError),

  /// Connection, TLS, timeout or body read failure
  #[error("Request failed: {0}")]
  Connection(#[source] BoxError),

  /// The transport returned something that is not an HTTP response
  #[error("Response is not an HTTP response")]
  InvalidResponse,

  /// Status outside 200..300
  #[error("Response status code was unacceptable: {status}")]
  UnacceptableStatus { status: u16 },

  /// Body did not match the expected shape
  #[error("Response could not be decoded: {0}")]
  Decoding(#[source] serde_json::Error),
}

/// Sends one request over the wire. No caching, no status validation.
#[async_trait]
pub trait HttpTransport: Send + Sync {
  async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: Client,
}

impl ReqwestTransport {
  /// Create a transport with the given request timeout
  pub fn new(timeout: Duration) -> Result<Self, TransportError> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(concat!("tc-client/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| TransportError::Connection(Box::new(e)))?;

    Ok(Self { client })
  }

  /// Wrap an already configured reqwest client
  pub fn with_client(client: Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let response = self
      .client
      .request(request.method.clone(), request.url.clone())
      .headers(request.headers.clone())
      .send()
      .await
      .map_err(|e| {
        if e.is_timeout() {
          warn!("Request timed out: {}", request.url);
        }
        TransportError::Connection(Box::new(e))
      })?;

    let url = response.url().clone();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(|e| TransportError::Connection(Box::new(e)))?;

    Ok(HttpResponse::new(url, status, headers, body.to_vec()))
  }
}

/// Executes requests through the response cache, validates status codes and
/// decodes bodies.
pub struct Session {
  transport: Arc<dyn HttpTransport>,
  cache: Option<ResponseCache>,
  cache_handler: Option<Arc<dyn CachedResponseHandler>>,
  monitors: Vec<Arc<dyn EventMonitor>>,
  clock: Arc<dyn Clock>,
}

impl Session {
  pub fn builder() -> SessionBuilder {
    SessionBuilder::default()
  }

  /// Session wired with the crypto cache policy and a default-sized cache
  pub fn crypto(
    cache_configuration: CacheConfiguration,
    enable_logging: bool,
  ) -> Result<Self, TransportError> {
    Self::builder()
      .with_cache(ResponseCache::default())
      .with_cache_handler(Arc::new(CryptoCachedResponseHandler::new(cache_configuration)))
      .with_logging(enable_logging)
      .build()
  }

  /// The shared response cache, if caching is enabled
  pub fn cache(&self) -> Option<&ResponseCache> {
    self.cache.as_ref()
  }

  /// Execute `request` and decode the body as `T`.
  ///
  /// A fresh cached response is served without touching the network. Network
  /// responses with a 2xx status pass through the cache handler before they
  /// are stored; other statuses are never cached.
  #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
  pub async fn execute<T>(&self, request: HttpRequest) -> Result<T, TransportError>
  where
    T: DeserializeOwned,
  {
    let key = request.cache_key();

    if let Some(cache) = &self.cache {
      if let Some(cached) = cache.lookup(&key, self.clock.now()).await {
        debug!("Serving cached response for {}", request.url);
        self.notify_response(&request, &cached, true);
        return self.decode(&request, &cached);
      }
    }

    for monitor in &self.monitors {
      monitor.request_did_resume(&request);
    }

    let response = match self.transport.send(&request).await {
      Ok(response) => response,
      Err(e) => {
        self.notify_failure(&request, &e);
        return Err(e);
      }
    };
    self.notify_response(&request, &response, false);

    let status = match response.status() {
      Some(status) => status,
      None => {
        let error = TransportError::InvalidResponse;
        self.notify_failure(&request, &error);
        return Err(error);
      }
    };

    if !status.is_success() {
      let error = TransportError::UnacceptableStatus { status: status.as_u16() };
      self.notify_failure(&request, &error);
      return Err(error);
    }

    self.store(key, &response).await;
    self.decode(&request, &response)
  }

  async fn store(&self, key: CacheKey, response: &HttpResponse) {
    let Some(cache) = &self.cache else {
      return;
    };

    let candidate = match &self.cache_handler {
      Some(handler) => handler.will_cache(response.clone(), self.clock.now()),
      None => Some(response.clone()),
    };

    match candidate {
      Some(candidate) => {
        if !cache.store(key, candidate).await {
          debug!("Response for {} not cached", response.url);
        }
      }
      None => debug!("Cache handler declined to cache {}", response.url),
    }
  }

  fn decode<T>(&self, request: &HttpRequest, response: &HttpResponse) -> Result<T, TransportError>
  where
    T: DeserializeOwned,
  {
    serde_json::from_slice::<T>(&response.body).map_err(|e| {
      let error = TransportError::Decoding(e);
      self.notify_failure(request, &error);
      error
    })
  }

  fn notify_response(&self, request: &HttpRequest, response: &HttpResponse, from_cache: bool) {
    for monitor in &self.monitors {
      monitor.did_receive_response(request, response, from_cache);
    }
  }

  fn notify_failure(&self, request: &HttpRequest, error: &TransportError) {
    for monitor in &self.monitors {
      monitor.did_fail(request, error);
    }
  }
}

impl std::fmt::Debug for Session {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Session")
      .field("cache", &self.cache)
      .field("cache_handler", &self.cache_handler.is_some())
      .field("monitors", &self.monitors.len())
      .finish()
  }
}

/// Builder for [`Session`]; logging is on by default
pub struct SessionBuilder {
  transport: Option<Arc<dyn HttpTransport>>,
  cache: Option<ResponseCache>,
  cache_handler: Option<Arc<dyn CachedResponseHandler>>,
  monitors: Vec<Arc<dyn EventMonitor>>,
  enable_logging: bool,
  clock: Arc<dyn Clock>,
  timeout: Duration,
}

impl Default for SessionBuilder {
  fn default() -> Self {
    Self {
      transport: None,
      cache: None,
      cache_handler: None,
      monitors: Vec::new(),
      enable_logging: true,
      clock: Arc::new(SystemClock),
      timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
  }
}

impl SessionBuilder {
  /// Builder: use a custom transport instead of reqwest
  pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
    self.transport = Some(transport);
    self
  }

  /// Builder: enable response caching backed by `cache`
  pub fn with_cache(mut self, cache: ResponseCache) -> Self {
    self.cache = Some(cache);
    self
  }

  /// Builder: intercept responses before they are cached
  pub fn with_cache_handler(mut self, handler: Arc<dyn CachedResponseHandler>) -> Self {
    self.cache_handler = Some(handler);
    self
  }

  /// Builder: attach the tracing-based [`NetworkLogger`]
  pub fn with_logging(mut self, enabled: bool) -> Self {
    self.enable_logging = enabled;
    self
  }

  /// Builder: attach an additional event monitor
  pub fn with_event_monitor(mut self, monitor: Arc<dyn EventMonitor>) -> Self {
    self.monitors.push(monitor);
    self
  }

  /// Builder: clock used for cache freshness and `Date` stamping
  pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  /// Builder: timeout for the default reqwest transport
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn build(self) -> Result<Session, TransportError> {
    let transport = match self.transport {
      Some(transport) => transport,
      None => Arc::new(ReqwestTransport::new(self.timeout)?),
    };

    let mut monitors = self.monitors;
    if self.enable_logging {
      monitors.insert(0, Arc::new(NetworkLogger::new()));
    }

    Ok(Session {
      transport,
      cache: self.cache,
      cache_handler: self.cache_handler,
      monitors,
      clock: self.clock,
    })
  }
}
