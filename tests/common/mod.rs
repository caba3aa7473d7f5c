// Test helpers are intentionally partially used
#![allow(dead_code)]

use reqwest::Client;
use serde_json::{json, Value};
use skin_analyzer::create_router;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

// ============================================================================
// Test Setup
// ============================================================================

/// Point every backend at its in-process variant and echo OTPs back.
///
/// Always overwrites: individual tests flip some of these and rely on the
/// next setup call to restore them.
pub fn setup_test_env() {
    // ---
    std::env::set_var("SKIN_STORE_TYPE", "memory");
    std::env::set_var("SKIN_INFERENCE_TYPE", "offline");
    std::env::set_var("SKIN_SMS_TYPE", "log");
    std::env::set_var("SKIN_SCORER_TYPE", "random");
    std::env::set_var("SKIN_EXPOSE_OTP", "true");
    std::env::set_var("SKIN_METRICS_TYPE", "noop");
    std::env::remove_var("SKIN_HISTORY_LIMIT");
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // --

        // Enable debug logging only when requested
        if std::env::var("TEST_DEBUG").is_ok() {
            std::env::set_var("RUST_LOG", "debug");
            std::env::set_var("NO_COLOR", "1");
        }

        let app = create_router().await.expect("Should be able to create router");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        // ---
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// Run send-otp and verify-otp for `phone`, returning the session token.
    pub async fn login(&self, phone: &str, name: &str) -> String {
        // ---
        let res = self
            .post_json("/auth/send-otp", json!({ "phoneNumber": phone }))
            .await;
        assert_eq!(res.status(), 200, "send-otp should succeed");
        let body: Value = res.json().await.unwrap();
        let otp = body["otp"].as_str().expect("OTP echo is enabled").to_string();

        let res = self
            .post_json(
                "/auth/verify-otp",
                json!({ "phoneNumber": phone, "otp": otp, "name": name }),
            )
            .await;
        assert_eq!(res.status(), 200, "verify-otp should succeed");
        let body: Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

/// A report shaped like `/analyze-skin` output with the given score.
pub fn sample_analysis(score: u32, acne: f64) -> Value {
    // ---
    json!({
        "overallScore": score,
        "skinType": "Oily",
        "concerns": [
            { "name": "Acne", "severity": acne, "description": "Moderate acne detected" }
        ],
        "recommendations": [],
        "regions": []
    })
}
