pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::generation::handlers as generation;
use crate::state::AppState;

/// Room for multipart framing and the text fields on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/api/health", get(health::health_handler))
        // ATS API
        .route("/api/ats-score", post(ats::handle_ats_score))
        .route("/api/analyze", post(ats::handle_analyze))
        // Generation API
        .route("/api/rewrite", post(generation::handle_rewrite))
        .route("/api/cover-letter", post(generation::handle_cover_letter))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::ats::wordlists::WordLists;
    use crate::config::Config;
    use crate::llm_client::testing::StubProvider;
    use crate::llm_client::TextProvider;

    const CODE: &str = "open-sesame";
    const BOUNDARY: &str = "resumeboost-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn state_with(llm: Option<Arc<dyn TextProvider>>) -> AppState {
        AppState {
            config: Config {
                access_code: Some(CODE.to_string()),
                max_jd_chars: 200,
                ..Config::default()
            },
            llm,
            wordlists: Arc::new(WordLists::builtin().unwrap()),
        }
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn form_request(uri: &str, code: Option<&str>, parts: &[Part]) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri).header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(code) = code {
            builder = builder.header("x-access-code", code);
        }
        builder.body(Body::from(multipart_body(parts))).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-access-code", CODE)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> Response {
        build_router(state).oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = send(state_with(None), request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_missing_access_code_is_forbidden() {
        let request = form_request(
            "/api/ats-score",
            None,
            &[Part::Text("resume_text", "Rust"), Part::Text("jd_text", "Rust")],
        );
        let response = send(state_with(None), request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "FORBIDDEN");
        assert_eq!(body["error"]["message"], "Invalid or missing Access Code");
    }

    #[tokio::test]
    async fn test_unconfigured_access_code_forbids_everyone() {
        let mut state = state_with(None);
        state.config.access_code = None;
        let request = form_request(
            "/api/ats-score",
            Some(CODE),
            &[Part::Text("resume_text", "Rust"), Part::Text("jd_text", "Rust")],
        );
        assert_eq!(send(state, request).await.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_ats_score_works_without_provider() {
        let request = form_request(
            "/api/ats-score",
            Some(CODE),
            &[
                Part::Text("resume_text", "Rust and Kafka engineer"),
                Part::Text("jd_text", "Rust, Kafka and Terraform"),
            ],
        );
        let response = send(state_with(None), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["missing_skills"], json!(["terraform"]));
        assert_eq!(body["overlap_skills"], json!(["kafka", "rust"]));
        assert!(body["ats_score"].as_u64().unwrap() <= 100);
    }

    #[tokio::test]
    async fn test_uploaded_file_wins_over_resume_text() {
        let request = form_request(
            "/api/ats-score",
            Some(CODE),
            &[
                Part::Text("resume_text", "Python"),
                Part::File("resume_file", "resume.txt", b"Kafka consultant"),
                Part::Text("jd_text", "Kafka"),
            ],
        );
        let body = body_json(send(state_with(None), request).await).await;
        assert_eq!(body["resume_skills"], json!(["consultant", "kafka"]));
    }

    #[tokio::test]
    async fn test_missing_resume_is_a_validation_error() {
        let request = form_request("/api/ats-score", Some(CODE), &[Part::Text("jd_text", "Rust")]);
        let response = send(state_with(None), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_non_utf8_upload_is_rejected() {
        let request = form_request(
            "/api/ats-score",
            Some(CODE),
            &[
                Part::File("resume_file", "resume.txt", &[0xff, 0xfe]),
                Part::Text("jd_text", "Rust"),
            ],
        );
        let response = send(state_with(None), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Could not decode file as UTF-8"
        );
    }

    #[tokio::test]
    async fn test_upload_past_body_limit_is_file_too_large() {
        let mut state = state_with(None);
        state.config.max_upload_bytes = 10;
        let file = vec![b'a'; 400 * 1024];
        let request = form_request(
            "/api/ats-score",
            Some(CODE),
            &[
                Part::Text("jd_text", "Rust"),
                Part::File("resume_file", "resume.txt", &file),
            ],
        );
        let response = send(state, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("File too large"));
    }

    #[tokio::test]
    async fn test_overlong_jd_is_rejected() {
        let jd = "rust ".repeat(100);
        let request = form_request(
            "/api/ats-score",
            Some(CODE),
            &[Part::Text("resume_text", "Rust"), Part::Text("jd_text", &jd)],
        );
        assert_eq!(
            send(state_with(None), request).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_analyze_without_provider_is_unavailable() {
        let request = form_request(
            "/api/analyze",
            Some(CODE),
            &[Part::Text("resume_text", "Rust"), Part::Text("jd_text", "Rust")],
        );
        let response = send(state_with(None), request).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["error"]["code"], "PROVIDER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_analyze_with_provider_includes_generated_content() {
        let provider: Arc<dyn TextProvider> = Arc::new(StubProvider::replying("Dear team"));
        let request = form_request(
            "/api/analyze",
            Some(CODE),
            &[
                Part::Text("resume_text", "Rust engineer"),
                Part::Text("jd_text", "Rust role"),
            ],
        );
        let response = send(state_with(Some(provider)), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["cover_letter"], "Dear team");
        assert_eq!(body["tailored_resume"], "Dear team");
        assert!(body["ats_breakdown"].is_object());
    }

    #[tokio::test]
    async fn test_rewrite_returns_bullets() {
        let provider: Arc<dyn TextProvider> =
            Arc::new(StubProvider::replying(r#"["Shipped Rust services"]"#));
        let request = json_request(
            "/api/rewrite",
            json!({"bullets": ["Wrote services"], "jd_text": "Rust role"}),
        );
        let response = send(state_with(Some(provider)), request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"rewritten_bullets": ["Shipped Rust services"]})
        );
    }

    #[tokio::test]
    async fn test_cover_letter_provider_failure_is_llm_error() {
        let provider: Arc<dyn TextProvider> = Arc::new(StubProvider::failing(500));
        let request = json_request(
            "/api/cover-letter",
            json!({"resume_text": "Jane Doe", "jd_text": "Rust role"}),
        );
        let response = send(state_with(Some(provider)), request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
    }
}
