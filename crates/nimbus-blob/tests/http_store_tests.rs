//! HTTP blob store tests against a stubbed store API.

use nimbus_blob::HttpBlobStore;
use nimbus_core::Error;
use nimbus_core::config::StoreConfig;
use nimbus_core::ports::{BlobStore, PutOptions};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store(server: &MockServer) -> HttpBlobStore {
    HttpBlobStore::new(&StoreConfig {
        endpoint: server.uri(),
        token: "write-token".to_string(),
        public_base_url: server.uri(),
    })
}

#[tokio::test]
async fn test_put_sends_upsert_options_and_returns_address() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/cache/latest.json"))
        .and(header("authorization", "Bearer write-token"))
        .and(header("x-content-type", "application/json"))
        .and(header("x-access", "public"))
        .and(header("x-allow-overwrite", "1"))
        .and(header("x-add-random-suffix", "0"))
        .and(header("x-cache-control-max-age", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({"url": "https://public.store.test/cache/latest.json"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let stored = store(&server)
        .put(
            "cache/latest.json",
            b"{}".to_vec(),
            &PutOptions::snapshot("application/json"),
        )
        .await
        .expect("put succeeds");

    assert_eq!(stored.url, "https://public.store.test/cache/latest.json");
}

#[tokio::test]
async fn test_put_failure_is_surfaced_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(403).set_body_string("no access"))
        .expect(1)
        .mount(&server)
        .await;

    let err = store(&server)
        .put("cache/latest.json", b"{}".to_vec(), &PutOptions::snapshot("application/json"))
        .await
        .expect_err("must fail");

    assert!(matches!(err, Error::Store(_)));
}

#[tokio::test]
async fn test_get_reads_public_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cache/latest.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"data\":{}}"))
        .mount(&server)
        .await;

    let body = store(&server)
        .get("cache/latest.json")
        .await
        .expect("get succeeds")
        .expect("object present");

    assert_eq!(body, b"{\"data\":{}}");
}

#[tokio::test]
async fn test_get_non_success_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let body = store(&server).get("cache/latest.json").await.expect("no transport error");
    assert!(body.is_none());
}
