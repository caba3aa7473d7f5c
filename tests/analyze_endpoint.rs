use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use serial_test::serial;
use skin_analyzer::create_router;
use std::io::Cursor;
use tower::ServiceExt;

mod common;

const BOUNDARY: &str = "skin-analyzer-test-boundary";

fn sample_png() -> Vec<u8> {
    // ---
    let img = RgbImage::from_fn(80, 120, |x, y| Rgb([(x * 3) as u8, (y * 2) as u8, 128]));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

fn multipart_body(field: &str, bytes: &[u8]) -> Vec<u8> {
    // ---
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"face.png\"\r\n\
             Content-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload(field: &str, bytes: &[u8]) -> Request<Body> {
    // ---
    Request::builder()
        .method("POST")
        .uri("/analyze-skin")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, bytes)))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    // ---
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
#[serial]
async fn analyze_returns_full_report() {
    // ---
    common::setup_test_env();
    let app = create_router().await.unwrap();

    let response = app.oneshot(upload("image", &sample_png())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = json_body(response).await;

    let score = report["overallScore"].as_u64().unwrap();
    assert!((60..=95).contains(&score), "score out of range: {score}");

    // Offline inference detects nothing, so the default layout applies.
    let regions = report["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 5);
    assert_eq!(regions[0]["area"], "forehead");
    assert_eq!(regions[0]["x"], 150.0);
    assert_eq!(regions[0]["width"], 200.0);
    for region in regions {
        let severity = region["severity"].as_f64().unwrap();
        assert!((0.3..=0.9).contains(&severity));
    }

    let kinds: Vec<&str> = report["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["Cleanser", "Moisturizer", "Treatment", "Sunscreen"]);

    let concerns = report["concerns"].as_array().unwrap();
    assert!(!concerns.is_empty());
    let severities: Vec<f64> = concerns
        .iter()
        .map(|c| c["severity"].as_f64().unwrap())
        .collect();
    assert!(severities.windows(2).all(|w| w[0] >= w[1]));

    assert!(report["skinType"].is_string());
}

#[tokio::test]
#[serial]
async fn undecodable_upload_still_analyzed() {
    // ---
    common::setup_test_env();
    let app = create_router().await.unwrap();

    let response = app
        .oneshot(upload("image", b"not really a png"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn missing_image_is_rejected() {
    // ---
    common::setup_test_env();
    let app = create_router().await.unwrap();

    let response = app
        .clone()
        .oneshot(upload("photo", &sample_png()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No image provided");

    let response = app.oneshot(upload("image", b"")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn model_scorer_is_deterministic() {
    // ---
    common::setup_test_env();
    std::env::set_var("SKIN_SCORER_TYPE", "model");
    let app = create_router().await.unwrap();

    let first = json_body(app.clone().oneshot(upload("image", &sample_png())).await.unwrap()).await;
    let second = json_body(app.oneshot(upload("image", &sample_png())).await.unwrap()).await;
    assert_eq!(first, second);

    std::env::set_var("SKIN_SCORER_TYPE", "random");
}
