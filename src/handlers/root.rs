use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"Welcome to the Skin Analyzer API 👋
Version: {version}

Available endpoints:
  - POST /auth/send-otp       - Send a one-time code to a phone number
  - POST /auth/verify-otp     - Verify the code and receive a session token
  - POST /auth/mark-used      - Mark the session's user as having used the service
  - POST /analyze-skin        - Analyze an uploaded face photo (multipart field "image")
  - POST /store-analysis      - Save an analysis to the session user's history
  - GET  /history             - Recent analyses with a progress summary
  - GET  /conditions/{{name}}   - Reference text for a skin condition
  - GET  /health              - Light health check
  - GET  /health?mode=full    - Full health check (includes key-value store and database)
  - GET  /metrics             - Prometheus metrics

Each phone number may complete one analysis.
"#
    )
}
