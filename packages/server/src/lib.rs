//! # Pagecraft Server
//!
//! HTTP surface over the editing engine.
//!
//! Editor state lives in one shared [`EditorSession`] behind the `/api`
//! routes. Every unmatched request falls through to the SSR renderer, which
//! is stateless, computed fresh per request, and never reads the session.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

use pagecraft_editor::{EditorSession, ElementRecord, SelectedElement};
use pagecraft_ssr::{SsrError, SsrRenderer};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    #[error("Render error: {0}")]
    Render(#[from] SsrError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::UnknownElementType(_) => StatusCode::NOT_FOUND,
            ServerError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<EditorSession>>,
    renderer: Arc<SsrRenderer>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(EditorSession::new())),
            renderer: Arc::new(SsrRenderer::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/document", get(get_document).post(set_document))
        .route("/api/document/undo", post(undo_document))
        .route("/api/document/redo", post(redo_document))
        .route("/api/elements/:element_type", get(list_elements))
        .route(
            "/api/elements/:element_type/:element_id/text",
            post(edit_element_text),
        )
        .route(
            "/api/elements/:element_type/:element_id/select",
            post(select_element),
        )
        .route("/api/hover/:element_id/enter", post(hover_enter))
        .route("/api/hover/:element_id/leave", post(hover_leave))
        .fallback(render_page)
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(port: u16) -> std::io::Result<()> {
    let app = router(AppState::new());
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await
}

#[derive(Debug, Serialize)]
struct DocumentResponse {
    html: String,
    version: u64,
    history_length: usize,
    current_index: usize,
    can_undo: bool,
    can_redo: bool,
    selected_element: Option<SelectedElement>,
}

fn document_snapshot(session: &EditorSession) -> DocumentResponse {
    let store = session.store();
    DocumentResponse {
        html: store.html().to_string(),
        version: store.version(),
        history_length: store.history().len(),
        current_index: store.current_index(),
        can_undo: store.can_undo(),
        can_redo: store.can_redo(),
        selected_element: store.selected_element().cloned(),
    }
}

#[derive(Debug, Deserialize)]
struct SetDocumentRequest {
    html: String,
}

#[derive(Debug, Serialize)]
struct MutationResponse {
    applied: bool,
    #[serde(flatten)]
    document: DocumentResponse,
}

#[derive(Debug, Serialize)]
struct ElementListResponse {
    element_type: String,
    records: Vec<ElementRecord>,
    empty_message: Option<String>,
    placeholder_hint: String,
}

#[derive(Debug, Deserialize)]
struct EditTextRequest {
    text: String,
}

#[derive(Debug, Serialize)]
struct SelectResponse {
    applied: bool,
    selected_element: Option<SelectedElement>,
    scroll_to: Option<String>,
}

#[derive(Debug, Serialize)]
struct HoverResponse {
    applied: bool,
}

async fn get_document(State(state): State<AppState>) -> Json<DocumentResponse> {
    let session = state.session.lock().unwrap();
    Json(document_snapshot(&session))
}

async fn set_document(
    State(state): State<AppState>,
    Json(request): Json<SetDocumentRequest>,
) -> Json<DocumentResponse> {
    let mut session = state.session.lock().unwrap();
    session.set_html(request.html);
    tracing::info!(
        history_length = session.store().history().len(),
        "document committed"
    );
    Json(document_snapshot(&session))
}

async fn undo_document(State(state): State<AppState>) -> Json<MutationResponse> {
    let mut session = state.session.lock().unwrap();
    let applied = session.undo();
    Json(MutationResponse {
        applied,
        document: document_snapshot(&session),
    })
}

async fn redo_document(State(state): State<AppState>) -> Json<MutationResponse> {
    let mut session = state.session.lock().unwrap();
    let applied = session.redo();
    Json(MutationResponse {
        applied,
        document: document_snapshot(&session),
    })
}

async fn list_elements(
    State(state): State<AppState>,
    Path(element_type): Path<String>,
) -> Result<Json<ElementListResponse>, ServerError> {
    let session = state.session.lock().unwrap();
    let locator = session
        .locator(&element_type)
        .ok_or_else(|| ServerError::UnknownElementType(element_type.clone()))?;

    Ok(Json(ElementListResponse {
        element_type: element_type.clone(),
        records: locator.records().to_vec(),
        empty_message: locator.is_empty().then(|| locator.empty_message()),
        placeholder_hint: locator.placeholder_hint(),
    }))
}

async fn edit_element_text(
    State(state): State<AppState>,
    Path((element_type, element_id)): Path<(String, String)>,
    Json(request): Json<EditTextRequest>,
) -> Result<Json<MutationResponse>, ServerError> {
    let mut session = state.session.lock().unwrap();
    if session.locator(&element_type).is_none() {
        return Err(ServerError::UnknownElementType(element_type));
    }
    let applied = session.edit_element_text(&element_type, &element_id, &request.text);
    tracing::info!(%element_type, %element_id, applied, "text edit");
    Ok(Json(MutationResponse {
        applied,
        document: document_snapshot(&session),
    }))
}

async fn select_element(
    State(state): State<AppState>,
    Path((element_type, element_id)): Path<(String, String)>,
) -> Result<Json<SelectResponse>, ServerError> {
    let mut session = state.session.lock().unwrap();
    if session.locator(&element_type).is_none() {
        return Err(ServerError::UnknownElementType(element_type));
    }
    let applied = session.select_element(&element_type, &element_id);
    let scroll_to = session.take_pending_scroll();
    Ok(Json(SelectResponse {
        applied,
        selected_element: session.selected_element().cloned(),
        scroll_to,
    }))
}

async fn hover_enter(
    State(state): State<AppState>,
    Path(element_id): Path<String>,
) -> Json<HoverResponse> {
    let mut session = state.session.lock().unwrap();
    Json(HoverResponse {
        applied: session.hover_enter(&element_id),
    })
}

async fn hover_leave(
    State(state): State<AppState>,
    Path(element_id): Path<String>,
) -> Json<HoverResponse> {
    let mut session = state.session.lock().unwrap();
    Json(HoverResponse {
        applied: session.hover_leave(&element_id),
    })
}

/// Every unmatched path is served by the SSR renderer.
async fn render_page(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<String>, ServerError> {
    tracing::debug!(path = uri.path(), "ssr render");
    let document = state.renderer.render(uri.path())?;
    Ok(Html(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_fallback_serves_ssr_document() {
        let app = router(AppState::new());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let document = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains("window.__QUERY_STATE__"));
    }

    #[tokio::test]
    async fn test_editor_page_is_noindex() {
        let app = router(AppState::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/editor")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let document = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(document.contains("noindex,nofollow"));
    }

    #[tokio::test]
    async fn test_document_commit_and_undo() {
        let app = router(AppState::new());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/document",
                serde_json::json!({ "html": "<html><body><p>x</p></body></html>" }),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["history_length"], 2);
        assert_eq!(body["can_undo"], true);

        let response = app
            .clone()
            .oneshot(post_json("/api/document/undo", serde_json::json!({})))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["applied"], true);
        assert_eq!(body["can_redo"], true);
    }

    #[tokio::test]
    async fn test_element_listing_and_edit() {
        let app = router(AppState::new());

        app.clone()
            .oneshot(post_json(
                "/api/document",
                serde_json::json!({ "html": "<html><body><h1>A</h1><h1>B</h1></body></html>" }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/elements/h1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["records"].as_array().unwrap().len(), 2);
        assert_eq!(body["records"][1]["element_id"], "h1-1");
        assert_eq!(body["empty_message"], Value::Null);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/elements/h1/h1-1/text",
                serde_json::json!({ "text": "Hello" }),
            ))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["applied"], true);
        assert!(body["html"].as_str().unwrap().contains(">Hello</h1>"));
    }

    #[tokio::test]
    async fn test_unknown_element_type_is_404() {
        let app = router(AppState::new());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/elements/video")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
