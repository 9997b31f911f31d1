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

use std::sync::Arc;
use std::time::Duration;
use tc_client::{
  CryptoApiService, CryptoCachedResponseHandler, CryptoService, GetTopCryptos, ResponseCache,
  Session,
};
use tc_core::test_utils::{assert_percentage_eq, assert_price_eq};
use tc_core::{CacheConfiguration, NetworkConfiguration, NetworkError};
use wiremock::matchers::{header, method, path, query_param};
use tracing_subscriber::EnvFilter;
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTINGS_PATH: &str = "/v1/cryptocurrency/listings/latest";
const INFO_PATH: &str = "/v2/cryptocurrency/info";

const BITCOIN_LISTINGS: &str = r#"{
  "status": {"error_code": 0, "error_message": null, "credit_count": 1},
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
          "percent_change_24h": 2.5,
          "market_cap": 880000000000.0,
          "last_updated": "2025-08-14T10:00:00.000Z"
        }
      }
    }
  ]
}"#;

const BITCOIN_INFO: &str = r#"{
  "status": {"error_code": 0, "credit_count": 1},
  "data": {
    "1": {
      "id": 1,
      "name": "Bitcoin",
      "symbol": "BTC",
      "category": "coin",
      "logo": "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png"
    }
  }
}"#;

fn json(status: u16, body: &str) -> ResponseTemplate {
  ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/json")
}

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

fn service_for(server: &MockServer, cache_configuration: CacheConfiguration) -> CryptoApiService {
  init_tracing();
  let session = Session::builder()
    .with_cache(ResponseCache::default())
    .with_cache_handler(Arc::new(CryptoCachedResponseHandler::new(cache_configuration)))
    .with_logging(true)
    .with_timeout(Duration::from_secs(5))
    .build()
    .expect("session");

  let configuration = NetworkConfiguration::coin_market_cap("test-key").with_base_url(server.uri());
  CryptoApiService::new(Arc::new(session), configuration)
}

async fn requests_to(server: &MockServer, endpoint: &str) -> usize {
  server
    .received_requests()
    .await
    .unwrap_or_default()
    .iter()
    .filter(|request| request.url.path() == endpoint)
    .count()
}

#[tokio::test]
async fn top_cryptos_sends_key_accept_and_query() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .and(query_param("limit", "1"))
    .and(query_param("convert", "USD"))
    .and(header("x-cmc_pro_api_key", "test-key"))
    .and(header("accept", "application/json"))
    .respond_with(json(200, BITCOIN_LISTINGS))
    .expect(1)
    .mount(&server)
    .await;

  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .and(query_param("id", "1"))
    .and(header("x-cmc_pro_api_key", "test-key"))
    .respond_with(json(200, BITCOIN_INFO))
    .expect(1)
    .mount(&server)
    .await;

  let cryptos = service_for(&server, CacheConfiguration::testing())
    .get_top_cryptos(1, "USD")
    .await
    .expect("top cryptos");

  assert_eq!(cryptos.len(), 1);
  let bitcoin = &cryptos[0];
  assert_eq!(bitcoin.id(), 1);
  assert_eq!(bitcoin.name(), "Bitcoin");
  assert_eq!(bitcoin.symbol(), "BTC");
  assert_price_eq(bitcoin.price(), 45000.50);
  assert_percentage_eq(bitcoin.percent_change_24h(), 2.5);
  assert_eq!(bitcoin.market_cap(), 0.0);
  assert_eq!(bitcoin.rank(), 1);
  assert_eq!(bitcoin.image_url(), "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png");
}

#[tokio::test]
async fn second_call_is_served_from_cache() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(200, BITCOIN_LISTINGS))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .respond_with(json(200, BITCOIN_INFO))
    .expect(1)
    .mount(&server)
    .await;

  let service = service_for(&server, CacheConfiguration::testing());
  let first = service.get_top_cryptos(1, "USD").await.expect("first call");
  let second = service.get_top_cryptos(1, "USD").await.expect("second call");

  assert_eq!(first, second);
  assert_eq!(service.session().cache().expect("cache").len().await, 2);
}

#[tokio::test]
async fn zero_expiration_always_hits_network() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(200, BITCOIN_LISTINGS))
    .expect(2)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .respond_with(json(200, BITCOIN_INFO))
    .expect(2)
    .mount(&server)
    .await;

  let service = service_for(&server, CacheConfiguration::from_secs(0));
  service.get_top_cryptos(1, "USD").await.expect("first call");
  service.get_top_cryptos(1, "USD").await.expect("second call");
}

#[tokio::test]
async fn empty_listings_skip_metadata_request() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(200, r#"{"status": {"error_code": 0}, "data": []}"#))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .respond_with(json(200, BITCOIN_INFO))
    .expect(0)
    .mount(&server)
    .await;

  let cryptos = service_for(&server, CacheConfiguration::testing())
    .get_top_cryptos(5, "USD")
    .await
    .expect("empty result");

  assert!(cryptos.is_empty());
  assert_eq!(requests_to(&server, INFO_PATH).await, 0);
}

#[tokio::test]
async fn listings_server_error_maps_to_http_and_stops() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(500, r#"{"status": {"error_code": 500, "error_message": "boom"}}"#))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .respond_with(json(200, BITCOIN_INFO))
    .expect(0)
    .mount(&server)
    .await;

  let err = service_for(&server, CacheConfiguration::testing())
    .get_top_cryptos(5, "USD")
    .await
    .unwrap_err();

  assert!(matches!(err, NetworkError::Http { status_code: 500 }));
  assert_eq!(err.to_string(), "HTTP error with status code: 500");
}

#[tokio::test]
async fn metadata_failure_fails_whole_call() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(200, BITCOIN_LISTINGS))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .respond_with(json(404, r#"{"status": {"error_code": 404}}"#))
    .mount(&server)
    .await;

  let err = service_for(&server, CacheConfiguration::testing())
    .get_top_cryptos(1, "USD")
    .await
    .unwrap_err();

  assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn listing_without_requested_currency_is_dropped() {
  let server = MockServer::start().await;

  let listings = r#"{
    "data": [
      {"id": 1, "name": "Bitcoin", "symbol": "BTC", "cmc_rank": 1,
       "quote": {"EUR": {"price": 41000.0, "percent_change_24h": 2.1, "last_updated": "2025-08-14T10:00:00.000Z"}}},
      {"id": 1027, "name": "Ethereum", "symbol": "ETH", "cmc_rank": 2,
       "quote": {"USD": {"price": 3200.25, "percent_change_24h": -1.2, "last_updated": "2025-08-14T10:00:00.000Z"}}}
    ]
  }"#;
  let info = r#"{"data": {"1": {"id": 1, "name": "Bitcoin", "symbol": "BTC", "logo": "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png"}}}"#;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(200, listings))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .and(query_param("id", "1,1027"))
    .respond_with(json(200, info))
    .expect(1)
    .mount(&server)
    .await;

  let cryptos = service_for(&server, CacheConfiguration::testing())
    .get_top_cryptos(2, "USD")
    .await
    .expect("top cryptos");

  assert_eq!(cryptos.len(), 1);
  assert_eq!(cryptos[0].symbol(), "ETH");
  assert_eq!(cryptos[0].image_url(), "");
}

#[tokio::test]
async fn malformed_body_maps_to_decoding() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(200, "<html>maintenance</html>"))
    .mount(&server)
    .await;

  let err = service_for(&server, CacheConfiguration::testing())
    .get_top_cryptos(5, "USD")
    .await
    .unwrap_err();

  assert!(matches!(err, NetworkError::Decoding(_)));
}

#[tokio::test]
async fn unreachable_server_maps_to_network() {
  let session = Session::builder()
    .with_logging(false)
    .with_timeout(Duration::from_secs(2))
    .build()
    .expect("session");
  let configuration =
    NetworkConfiguration::coin_market_cap("test-key").with_base_url("http://127.0.0.1:1");
  let service = CryptoApiService::new(Arc::new(session), configuration);

  let err = service.get_top_cryptos(5, "USD").await.unwrap_err();
  assert!(matches!(err, NetworkError::Network(_)));
}

#[tokio::test]
async fn cancelled_call_never_requests_metadata() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .respond_with(json(200, BITCOIN_LISTINGS).set_delay(Duration::from_secs(2)))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .respond_with(json(200, BITCOIN_INFO))
    .expect(0)
    .mount(&server)
    .await;

  let service = service_for(&server, CacheConfiguration::testing());
  let outcome =
    tokio::time::timeout(Duration::from_millis(200), service.get_top_cryptos(1, "USD")).await;

  assert!(outcome.is_err(), "call should have been cancelled");
  assert_eq!(requests_to(&server, INFO_PATH).await, 0);
  assert!(service.session().cache().expect("cache").is_empty().await);
}

#[tokio::test]
async fn use_case_defaults_to_top_five_in_usd() {
  let server = MockServer::start().await;

  Mock::given(method("GET"))
    .and(path(LISTINGS_PATH))
    .and(query_param("limit", "5"))
    .and(query_param("convert", "USD"))
    .respond_with(json(200, BITCOIN_LISTINGS))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(INFO_PATH))
    .respond_with(json(200, BITCOIN_INFO))
    .mount(&server)
    .await;

  let service: Arc<dyn CryptoService> = Arc::new(service_for(&server, CacheConfiguration::testing()));
  let cryptos = GetTopCryptos::new(service).execute_default().await.expect("default fetch");

  assert_eq!(cryptos.len(), 1);
  assert!(cryptos[0].has_image());
}
