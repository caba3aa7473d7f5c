use serde_json::json;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

mod common;

// NOTE: Metrics use a global Prometheus recorder.
// Tests are serial because they share it and mutate the environment.

#[tokio::test]
#[serial]
async fn metrics_endpoint_with_prometheus() {
    // ---
    common::setup_test_env();
    std::env::set_var("SKIN_METRICS_TYPE", "prom");

    let server = common::TestServer::new().await;

    // Drive the auth flow so the domain counters move.
    let _token = server.login("+14155550200", "Metrics").await;
    let _ = server.client.get(server.url("/health")).send().await.unwrap();
    let _ = server
        .client
        .get(server.url("/conditions/acne"))
        .send()
        .await
        .unwrap();

    // Give metrics a moment to be recorded
    sleep(Duration::from_millis(50)).await;

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    // Check status before consuming the response
    assert!(
        res.status().is_success(),
        "Metrics endpoint should return success"
    );

    let body = res.text().await.unwrap();
    println!("Metrics response body: '{body}'");

    assert!(body.contains("otp_sent_total"), "missing OTP counter");
    assert!(body.contains("otp_verified_total"), "missing verify counter");
    assert!(
        body.contains("/conditions/{name}"),
        "requests should be labelled with the route template"
    );

    // Clean up environment variable
    std::env::remove_var("SKIN_METRICS_TYPE");
}

#[tokio::test]
#[serial]
async fn metrics_endpoint_with_noop() {
    // ---
    common::setup_test_env();
    std::env::set_var("SKIN_METRICS_TYPE", "noop");

    let server = common::TestServer::new().await;

    let _ = server
        .post_json("/auth/send-otp", json!({ "phoneNumber": "+14155550201" }))
        .await;

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();

    // Should still return success even with noop metrics
    assert!(
        res.status().is_success(),
        "Metrics endpoint should return success even with noop"
    );

    let body = res.text().await.unwrap();
    println!("Noop metrics response: '{body}'");
    assert!(!body.contains("otp_sent_total"));
}

#[tokio::test]
#[serial]
async fn metrics_endpoint_survives_load() {
    // ---
    common::setup_test_env();
    std::env::set_var("SKIN_METRICS_TYPE", "prom");

    let server = Arc::new(common::TestServer::new().await);

    // Generate some load
    let futures = (0..20).map(|i| {
        let server = Arc::clone(&server);
        async move {
            let endpoint = match i % 3 {
                0 => "/health",
                1 => "/",
                _ => "/metrics",
            };
            server.client.get(server.url(endpoint)).send().await
        }
    });

    let responses = futures::future::join_all(futures).await;

    // All requests should succeed
    for (i, response) in responses.into_iter().enumerate() {
        // ---

        let response = response.unwrap_or_else(|_| panic!("Request {i} should succeed"));
        assert!(
            response.status().is_success(),
            "Request {i} should return success"
        );
    }

    let res = server
        .client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());

    let content_type = res.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(
        content_type.starts_with("text/plain"),
        "Content type should be Prometheus text: {content_type}"
    );

    let body = res.text().await.unwrap();
    assert!(!body.is_empty());

    std::env::remove_var("SKIN_METRICS_TYPE");
}
