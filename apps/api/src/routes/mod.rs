pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Delivery
        .route("/api/cv/generate", post(render::handle_generate))
        .route("/api/cv/pdf", get(render::handle_download))
        // Form controller
        .route(
            "/api/cv",
            get(editor::handle_get_cv).patch(editor::handle_update_cv),
        )
        .route("/api/cv/personal", put(editor::handle_set_personal))
        .route("/api/cv/reset", post(editor::handle_reset))
        .route("/api/cv/sample", post(editor::handle_load_sample))
        .route("/api/cv/:section", post(editor::handle_add_entry))
        .route(
            "/api/cv/:section/:index",
            patch(editor::handle_edit_entry).delete(editor::handle_remove_entry),
        )
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, StoreBackend};
    use crate::editor::CvEditor;
    use crate::models::cv::CvRecord;
    use crate::store::{CvRepository, MemoryStore};

    async fn app() -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".into(),
            store: StoreBackend::Memory,
        };
        let repo = CvRepository::new(Arc::new(MemoryStore::default()));
        let editor = CvEditor::open(repo).await;
        build_router(AppState::new(config, editor))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }

    #[tokio::test]
    async fn test_generate_returns_pdf_attachment() {
        let app = app().await;
        let response = send(
            &app,
            Method::POST,
            "/api/cv/generate",
            Some(json!({
                "name": "John Doe",
                "email": "john@example.com",
                "experience": [],
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"John_Doe_CV.pdf\""
        );
        let pdf = body_bytes(response).await;
        assert!(pdf.starts_with(b"%PDF-"));
        assert!(contains(&pdf, b"(John Doe)"));
        assert!(contains(&pdf, b"(john@example.com)"));
        assert!(!contains(&pdf, b"(Work Experience)"));
    }

    #[tokio::test]
    async fn test_generate_skips_headless_entries() {
        let app = app().await;
        let response = send(
            &app,
            Method::POST,
            "/api/cv/generate",
            Some(json!({
                "name": "A",
                "experience": [{"jobTitle": "", "company": "", "description": "orphan text"}],
                "skills": "Rust, SQL",
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let pdf = body_bytes(response).await;
        assert!(!contains(&pdf, b"orphan text"));
        assert!(contains(&pdf, b"(Rust, SQL)"));
    }

    #[tokio::test]
    async fn test_generate_unreadable_body_is_generation_failure() {
        let app = app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/cv/generate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to generate PDF");
        assert!(body["details"].is_string());

        let response = send(
            &app,
            Method::POST,
            "/api/cv/generate",
            Some(json!({"name": "A", "skills": ["Rust", "SQL"]})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Failed to generate PDF");
    }

    #[tokio::test]
    async fn test_generate_accepts_null_fields() {
        let app = app().await;
        let response = send(
            &app,
            Method::POST,
            "/api/cv/generate",
            Some(json!({
                "name": "Jane Roe",
                "email": "jane@example.com",
                "phone": null,
                "summary": null,
                "experience": [{"jobTitle": "Dev", "company": null, "description": null}],
                "skills": null,
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let pdf = body_bytes(response).await;
        assert!(contains(&pdf, b"(Jane Roe)"));
        assert!(contains(&pdf, b"(Dev)"));
    }

    #[tokio::test]
    async fn test_form_controller_flow() {
        let app = app().await;

        let cv = body_json(send(&app, Method::GET, "/api/cv", None).await).await;
        assert_eq!(cv, serde_json::to_value(CvRecord::default()).unwrap());

        let cv = body_json(send(&app, Method::POST, "/api/cv/sample", None).await).await;
        assert_eq!(cv["personalInfo"]["fullName"], "Alex Johnson");

        let cv = body_json(
            send(
                &app,
                Method::PATCH,
                "/api/cv",
                Some(json!({"personalInfo": {"email": "alex@new.dev"}, "summary": "Hi"})),
            )
            .await,
        )
        .await;
        assert_eq!(cv["personalInfo"]["fullName"], "Alex Johnson");
        assert_eq!(cv["personalInfo"]["email"], "alex@new.dev");
        assert_eq!(cv["summary"], "Hi");

        let cv = body_json(
            send(
                &app,
                Method::PUT,
                "/api/cv/personal",
                Some(json!({"field": "phone", "value": "555"})),
            )
            .await,
        )
        .await;
        assert_eq!(cv["personalInfo"]["phone"], "555");

        let cv = body_json(send(&app, Method::POST, "/api/cv/experience", None).await).await;
        assert_eq!(cv["experience"].as_array().unwrap().len(), 3);

        let cv = body_json(
            send(
                &app,
                Method::PATCH,
                "/api/cv/experience/2",
                Some(json!({"field": "jobTitle", "value": "Staff Engineer"})),
            )
            .await,
        )
        .await;
        assert_eq!(cv["experience"][2]["jobTitle"], "Staff Engineer");

        let cv = body_json(send(&app, Method::DELETE, "/api/cv/experience/0", None).await).await;
        assert_eq!(cv["experience"].as_array().unwrap().len(), 2);
        assert_eq!(cv["experience"][1]["jobTitle"], "Staff Engineer");

        let response = send(&app, Method::GET, "/api/cv/pdf", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Alex_Johnson_CV.pdf\""
        );
        assert!(contains(&body_bytes(response).await, b"(Staff Engineer)"));

        let cv = body_json(send(&app, Method::POST, "/api/cv/reset", None).await).await;
        assert_eq!(cv, serde_json::to_value(CvRecord::default()).unwrap());
    }

    #[tokio::test]
    async fn test_edit_errors() {
        let app = app().await;

        let response = send(&app, Method::DELETE, "/api/cv/skills/0", None).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"], "Edit rejected");

        let response = send(&app, Method::POST, "/api/cv/hobbies", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, "/api/cv/skills/seven", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::PATCH,
            "/api/cv/skills/0",
            Some(json!({"field": "company", "value": "x"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            Method::PATCH,
            "/api/cv/skills/4",
            Some(json!({"field": "name", "value": "x"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
