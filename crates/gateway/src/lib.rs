//! HTTP session boundary for Advisor.
//!
//! Exposes the workflow graph behind a small REST surface:
//!
//! - `POST /v1/consult`        — run a request through the graph
//! - `GET  /v1/sessions/{id}`  — inspect a persisted session
//! - `GET  /health`            — liveness check
//!
//! This is the only layer that converts failures into status codes: the
//! executor and steps propagate errors untouched, and this boundary maps
//! them onto structured JSON error responses for its own caller.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use advisor_core::{ConversationState, Error, SessionId};
use advisor_workflow::{ConsultantGraph, SessionStore};

/// Shared state for the gateway.
pub struct GatewayState {
    pub graph: ConsultantGraph,
    pub sessions: Arc<dyn SessionStore>,
    pub max_iterations: u32,
}

pub type SharedGatewayState = Arc<GatewayState>;

/// Build the gateway router.
pub fn build_router(state: SharedGatewayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/consult", post(consult_handler))
        .route("/v1/sessions/{id}", get(get_session_handler))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve the gateway until the process exits.
pub async fn serve(state: SharedGatewayState, host: &str, port: u16) -> advisor_core::Result<()> {
    let router = build_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("failed to bind {addr}: {e}")))?;

    info!(%addr, "gateway listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| Error::Internal(format!("server error: {e}")))
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConsultRequest {
    /// The user's message.
    pub message: String,

    /// Offering hints for knowledge filtering.
    #[serde(default)]
    pub offerings: Vec<String>,

    /// Existing session ID (omit to start a new session).
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsultResponse {
    pub session_id: String,
    pub message: String,
    pub deliverables: Vec<DeliverableSummary>,
    pub specialist: Option<String>,
}

/// Deliverable projection: full content stays in the persisted state.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeliverableSummary {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub offering: String,
    pub specialist: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub messages: usize,
    pub deliverables: Vec<DeliverableSummary>,
    pub iteration_count: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map an internal failure onto a boundary response.
///
/// Collaborator failures are upstream problems (502); everything else is
/// our fault (500).
fn map_run_error(err: Error) -> ApiError {
    error!(%err, "workflow run failed");
    match err {
        Error::Reasoning(_) | Error::Knowledge(_) => {
            api_error(StatusCode::BAD_GATEWAY, err.to_string())
        }
        _ => api_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn consult_handler(
    State(state): State<SharedGatewayState>,
    Json(payload): Json<ConsultRequest>,
) -> Result<Json<ConsultResponse>, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No message provided"));
    }

    let session_id = payload
        .session_id
        .unwrap_or_else(|| SessionId::new().to_string());

    // Resume the session when a snapshot exists, otherwise start fresh.
    let prior = state
        .sessions
        .load(&session_id)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let initial = match prior {
        Some(mut snapshot) => {
            snapshot.push_user_message(&payload.message);
            snapshot
        }
        None => ConversationState::new(&payload.message, payload.offerings)
            .with_max_iterations(state.max_iterations),
    };

    info!(%session_id, "running consult request");

    let result = state.graph.run(initial).await.map_err(map_run_error)?;

    state
        .sessions
        .save(&session_id, &result)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let response_text = result
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();

    Ok(Json(ConsultResponse {
        session_id,
        message: response_text,
        deliverables: result.deliverables.iter().map(summarize).collect(),
        specialist: result.active_step.map(|s| s.to_string()),
    }))
}

async fn get_session_handler(
    State(state): State<SharedGatewayState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let snapshot = state
        .sessions
        .load(&id)
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("unknown session: {id}")))?;

    Ok(Json(SessionResponse {
        session_id: id,
        messages: snapshot.messages.len(),
        deliverables: snapshot.deliverables.iter().map(summarize).collect(),
        iteration_count: snapshot.iteration_count,
    }))
}

fn summarize(d: &advisor_core::Deliverable) -> DeliverableSummary {
    DeliverableSummary {
        title: d.title.clone(),
        kind: d.kind.clone(),
        offering: d.offering.clone(),
        specialist: d.produced_by.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    use advisor_core::{
        Finding, KnowledgeBase, KnowledgeError, ReasoningError, ReasoningService,
    };
    use advisor_workflow::InMemorySessionStore;

    struct ScriptedReasoning {
        responses: Mutex<Vec<String>>,
    }

    impl ScriptedReasoning {
        fn new(responses: Vec<&str>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().map(str::to_string).collect()),
            }
        }
    }

    #[async_trait]
    impl ReasoningService for ScriptedReasoning {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn generate(&self, _s: &str, _c: &str) -> Result<String, ReasoningError> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ReasoningError::EmptyCompletion("scripted".into()))
        }
    }

    struct FailingReasoning;

    #[async_trait]
    impl ReasoningService for FailingReasoning {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _s: &str, _c: &str) -> Result<String, ReasoningError> {
            Err(ReasoningError::Network("connection refused".into()))
        }
    }

    struct EmptyKnowledge;

    #[async_trait]
    impl KnowledgeBase for EmptyKnowledge {
        fn name(&self) -> &str {
            "empty"
        }

        async fn search(
            &self,
            _q: &str,
            _o: &[String],
            _k: usize,
        ) -> Result<Vec<Finding>, KnowledgeError> {
            Ok(Vec::new())
        }
    }

    fn test_state(reasoning: Arc<dyn ReasoningService>) -> SharedGatewayState {
        let graph = ConsultantGraph::standard(reasoning, Arc::new(EmptyKnowledge), 5).unwrap();
        Arc::new(GatewayState {
            graph,
            sessions: Arc::new(InMemorySessionStore::new()),
            max_iterations: 10,
        })
    }

    fn consult_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/consult")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(
        response: axum::response::Response,
    ) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_ok() {
        let router = build_router(test_state(Arc::new(ScriptedReasoning::new(vec![]))));

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn consult_runs_deliverable_flow() {
        let router = build_router(test_state(Arc::new(ScriptedReasoning::new(vec![
            "Plan: tier systems by RTO.",
        ]))));

        let response = router
            .oneshot(consult_request(serde_json::json!({
                "message": "Create a disaster recovery plan",
                "offerings": ["bcdr"],
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ConsultResponse = json_body(response).await;
        assert_eq!(body.specialist.as_deref(), Some("bcdr"));
        assert_eq!(body.deliverables.len(), 1);
        assert_eq!(body.deliverables[0].kind, "bc_dr_plan");
        assert!(!body.session_id.is_empty());
    }

    #[tokio::test]
    async fn empty_message_is_bad_request() {
        let router = build_router(test_state(Arc::new(ScriptedReasoning::new(vec![]))));

        let response = router
            .oneshot(consult_request(serde_json::json!({ "message": "  " })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = json_body(response).await;
        assert!(body.error.contains("No message"));
    }

    #[tokio::test]
    async fn collaborator_failure_maps_to_bad_gateway() {
        let router = build_router(test_state(Arc::new(FailingReasoning)));

        let response = router
            .oneshot(consult_request(serde_json::json!({
                "message": "Create a disaster recovery plan",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn session_persists_across_calls() {
        let state = test_state(Arc::new(ScriptedReasoning::new(vec![
            "First answer.",
            "Second answer.",
        ])));

        let response = build_router(state.clone())
            .oneshot(consult_request(serde_json::json!({
                "message": "What is application rationalization?",
            })))
            .await
            .unwrap();
        let first: ConsultResponse = json_body(response).await;

        let response = build_router(state.clone())
            .oneshot(consult_request(serde_json::json!({
                "message": "What about portfolio information?",
                "session_id": first.session_id,
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let second: ConsultResponse = json_body(response).await;
        assert_eq!(second.session_id, first.session_id);

        // The persisted snapshot accumulated both turns.
        let saved = state
            .sessions
            .load(&first.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.iteration_count, 2);
        assert!(saved.messages.len() >= 4);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let router = build_router(test_state(Arc::new(ScriptedReasoning::new(vec![]))));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/v1/sessions/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
