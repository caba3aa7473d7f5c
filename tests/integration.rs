use anyhow::{ensure, Result};
use serde_json::{json, Value};
use skin_analyzer::create_router;

mod common;

use common::{sample_analysis, setup_test_env, TestServer};

#[tokio::test]
#[serial_test::serial]
async fn basic_integration_test() {
    // ---
    setup_test_env();
    // Test that the router can be created successfully
    let _router = create_router().await.expect("Should be able to create router");
}

#[tokio::test]
#[serial_test::serial]
async fn unknown_backend_is_a_startup_error() {
    // ---
    setup_test_env();
    std::env::set_var("SKIN_SCORER_TYPE", "crystal-ball");

    assert!(create_router().await.is_err());

    std::env::set_var("SKIN_SCORER_TYPE", "random");
}

#[tokio::test]
#[serial_test::serial]
async fn health_endpoint_works() {
    // ---
    setup_test_env();
    let server = TestServer::new().await;

    for path in ["/health", "/health?mode=full"] {
        let response = server
            .client
            .get(server.url(path))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
    }
}

#[tokio::test]
#[serial_test::serial]
async fn root_endpoint_works() {
    // ---
    setup_test_env();
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body = response.text().await.expect("Failed to read response body");
    assert!(body.contains("/auth/send-otp"));
    assert!(body.contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
#[serial_test::serial]
async fn otp_flow_issues_session_once() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;
    let phone = "+14155550100";

    let res = server
        .post_json("/auth/send-otp", json!({ "phoneNumber": phone }))
        .await;
    ensure!(res.status() == 200, "send-otp failed: {}", res.status());
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "OTP sent successfully");
    let otp = body["otp"].as_str().unwrap().to_string();
    assert_eq!(otp.len(), 6);

    let verify = json!({ "phoneNumber": phone, "otp": otp, "name": "Ada" });
    let res = server.post_json("/auth/verify-otp", verify.clone()).await;
    ensure!(res.status() == 200, "verify-otp failed: {}", res.status());
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "OTP verified successfully");
    assert_eq!(body["user"]["phoneNumber"], phone);
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["hasUsedService"], false);
    assert!(!body["token"].as_str().unwrap().is_empty());

    // Same code again is a replay.
    let res = server.post_json("/auth/verify-otp", verify).await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "OTP already verified");

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn returning_user_keeps_identity() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;
    let phone = "+14155550101";

    let first = server.login(phone, "Grace").await;
    let second = server.login(phone, "Someone Else").await;
    assert_ne!(first, second, "each verification mints a new token");

    // Both tokens resolve to the same user, so one history.
    let res = server
        .client
        .post(server.url("/store-analysis"))
        .bearer_auth(&first)
        .json(&json!({ "imageUrl": "img-1", "analysisData": sample_analysis(80, 0.4) }))
        .send()
        .await?;
    assert_eq!(res.status(), 200);

    let res = server
        .client
        .get(server.url("/history"))
        .bearer_auth(&second)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn otp_requests_are_validated() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;

    for bad in [json!({}), json!({ "phoneNumber": "4155550123" }), json!({ "phoneNumber": "+0123" })] {
        let res = server.post_json("/auth/send-otp", bad).await;
        assert_eq!(res.status(), 400);
        let body: Value = res.json().await?;
        assert!(body["error"].as_str().unwrap().contains("Invalid phone number"));
    }

    let res = server
        .post_json(
            "/auth/verify-otp",
            json!({ "phoneNumber": "+14155550102", "otp": "123456" }),
        )
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Phone number, OTP, and name are required");

    let res = server
        .post_json(
            "/auth/verify-otp",
            json!({ "phoneNumber": "+14155550102", "otp": "123456", "name": "Ada" }),
        )
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "OTP expired or not found");

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn otp_is_hidden_unless_exposed() -> Result<()> {
    // ---
    setup_test_env();
    std::env::set_var("SKIN_EXPOSE_OTP", "false");
    let server = TestServer::new().await;

    let res = server
        .post_json("/auth/send-otp", json!({ "phoneNumber": "+14155550103" }))
        .await;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;
    assert!(body.get("otp").is_none());

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn mark_used_is_single_use() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;
    let phone = "+14155550104";
    let token = server.login(phone, "Linus").await;

    let mark = || {
        server
            .client
            .post(server.url("/auth/mark-used"))
            .bearer_auth(&token)
            .send()
    };

    let res = mark().await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "User marked as having used the service");

    let res = mark().await?;
    assert_eq!(res.status(), 403);

    // The phone number can no longer request codes.
    let res = server
        .post_json("/auth/send-otp", json!({ "phoneNumber": phone }))
        .await;
    assert_eq!(res.status(), 403);
    let body: Value = res.json().await?;
    assert!(body["error"].as_str().unwrap().contains("already been used"));

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn protected_routes_require_session() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;

    let res = server
        .client
        .post(server.url("/auth/mark-used"))
        .send()
        .await?;
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Unauthorized");

    let res = server
        .client
        .post(server.url("/auth/mark-used"))
        .bearer_auth("not-a-real-token")
        .send()
        .await?;
    assert_eq!(res.status(), 401);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Invalid or expired session");

    let res = server
        .client
        .post(server.url("/store-analysis"))
        .header("authorization", "Token abc")
        .json(&json!({ "imageUrl": "x", "analysisData": {} }))
        .send()
        .await?;
    assert_eq!(res.status(), 401);

    let res = server.client.get(server.url("/history")).send().await?;
    assert_eq!(res.status(), 401);

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn store_analysis_marks_user_and_caps_history() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;
    let phone = "+14155550105";
    let token = server.login(phone, "Barbara").await;

    let res = server
        .client
        .post(server.url("/store-analysis"))
        .bearer_auth(&token)
        .json(&json!({ "imageUrl": "img" }))
        .send()
        .await?;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Image URL and analysis data are required");

    let mut ids = Vec::new();
    for i in 0..7u32 {
        let res = server
            .client
            .post(server.url("/store-analysis"))
            .bearer_auth(&token)
            .json(&json!({
                "imageUrl": format!("img-{i}"),
                "analysisData": sample_analysis(70 + i, 0.1 * f64::from(i)),
            }))
            .send()
            .await?;
        assert_eq!(res.status(), 200);
        let body: Value = res.json().await?;
        assert_eq!(body["message"], "Analysis stored successfully");
        ids.push(body["analysisId"].as_str().unwrap().to_string());
    }

    let res = server
        .client
        .get(server.url("/history"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;

    // Five most recent, oldest first.
    let entries = body["entries"].as_array().unwrap();
    let got: Vec<&str> = entries.iter().map(|e| e["id"].as_str().unwrap()).collect();
    assert_eq!(got, ids[2..].iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(entries[0]["imageUrl"], "img-2");
    assert_eq!(entries[0]["analysisData"]["overallScore"], 72);

    let progress = &body["progress"];
    assert_eq!(progress["scores"], json!([72, 73, 74, 75, 76]));
    assert_eq!(progress["scoreChange"], 4);
    assert_eq!(progress["concerns"][0]["name"], "Acne");
    assert_eq!(progress["concerns"][0]["severities"], json!([20, 30, 40, 50, 60]));

    // Storing counts as using the service.
    let res = server
        .client
        .post(server.url("/auth/mark-used"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), 403);

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn history_limit_is_configurable() -> Result<()> {
    // ---
    setup_test_env();
    std::env::set_var("SKIN_HISTORY_LIMIT", "2");
    let server = TestServer::new().await;
    let token = server.login("+14155550106", "Edsger").await;

    for i in 0..3u32 {
        let res = server
            .client
            .post(server.url("/store-analysis"))
            .bearer_auth(&token)
            .json(&json!({ "imageUrl": format!("img-{i}"), "analysisData": sample_analysis(80, 0.5) }))
            .send()
            .await?;
        assert_eq!(res.status(), 200);
    }

    let res = server
        .client
        .get(server.url("/history"))
        .bearer_auth(&token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["imageUrl"], "img-2");
    assert_eq!(body["progress"]["scoreChange"], 0);

    std::env::remove_var("SKIN_HISTORY_LIMIT");
    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn condition_reference_lookup() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;

    let res = server
        .client
        .get(server.url("/conditions/ROSACEA"))
        .send()
        .await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Rosacea");
    assert!(body["about"].as_str().unwrap().contains("redness"));

    let res = server
        .client
        .get(server.url("/conditions/freckles"))
        .send()
        .await?;
    assert_eq!(res.status(), 404);

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn malformed_bodies_are_bad_requests() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;

    // Wrong field type.
    let res = server
        .post_json("/auth/send-otp", json!({ "phoneNumber": 14155550123u64 }))
        .await;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await?;
    assert!(body["error"].as_str().unwrap().contains("phoneNumber"));

    // Not JSON at all.
    let res = server
        .client
        .post(server.url("/auth/verify-otp"))
        .header("content-type", "application/json")
        .body("{\"phoneNumber\": ")
        .send()
        .await?;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await?;
    assert!(body["error"].is_string());

    // Authenticated route, body of the wrong shape.
    let token = server.login("+14155550108", "Edsger").await;
    let res = server
        .client
        .post(server.url("/store-analysis"))
        .bearer_auth(&token)
        .json(&json!({ "imageUrl": ["a", "b"], "analysisData": {} }))
        .send()
        .await?;
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
#[serial_test::serial]
async fn progress_counts_reports_without_region_areas() -> Result<()> {
    // ---
    setup_test_env();
    let server = TestServer::new().await;
    let token = server.login("+14155550109", "Frances").await;

    let report = json!({
        "overallScore": 80,
        "skinType": "Combination",
        "concerns": [
            { "name": "Acne", "severity": 0.4, "description": "Mild acne detected" }
        ],
        "recommendations": [],
        "regions": [
            { "x": 1, "y": 2, "width": 3, "height": 4, "condition": "acne", "severity": 0.4 }
        ]
    });

    let res = server
        .client
        .post(server.url("/store-analysis"))
        .bearer_auth(&token)
        .json(&json!({ "imageUrl": "img", "analysisData": report }))
        .send()
        .await?;
    assert_eq!(res.status(), 200);

    let res = server
        .client
        .get(server.url("/history"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await?;

    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["progress"]["scores"], json!([80]));
    assert_eq!(body["progress"]["concerns"][0]["name"], "Acne");
    assert_eq!(body["progress"]["concerns"][0]["severities"], json!([40]));

    Ok(())
}
