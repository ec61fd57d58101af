// Health Registry Service - Web Server
// REST API with Axum over the in-memory registry core

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use health_registry::{Client, Enrollment, RegistryError, RegistryService};

/// Shared application state
#[derive(Clone)]
struct AppState {
    service: RegistryService,
}

// ============================================================================
// Wire shapes
// ============================================================================

// Absent body fields arrive as empty strings and are rejected by the core.

#[derive(Deserialize)]
struct RegisterRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    dob: String,
    #[serde(default)]
    contact: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrollRequest {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    program: String,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    term: String,
}

#[derive(Serialize)]
struct RegisterResponse {
    message: String,
    client: Client,
}

#[derive(Serialize)]
struct EnrollResponse {
    message: String,
    enrollment: Enrollment,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<Client>,
}

#[derive(Serialize)]
struct EnrollmentsResponse {
    enrollments: Vec<Enrollment>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Map the core error taxonomy onto HTTP status codes
fn error_response(err: RegistryError) -> Response {
    let status = match err {
        RegistryError::Validation(_) => StatusCode::BAD_REQUEST,
        RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::Conflict(_) => StatusCode::CONFLICT,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /api/clients - Register a new client
async fn register_client(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    match state.service.register_client(&req.name, &req.dob, &req.contact) {
        Ok(client) => {
            tracing::info!(id = %client.id, "client registered");
            (
                StatusCode::CREATED,
                Json(RegisterResponse {
                    message: "Client registered successfully".to_string(),
                    client,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("registration rejected: {}", e);
            error_response(e)
        }
    }
}

/// POST /api/enrollments - Enroll a client in a program
async fn enroll_client(
    State(state): State<AppState>,
    Json(req): Json<EnrollRequest>,
) -> Response {
    match state.service.enroll_client(&req.client_id, &req.program) {
        Ok(enrollment) => {
            tracing::info!(id = %enrollment.client_id, program = %enrollment.program, "client enrolled");
            (
                StatusCode::CREATED,
                Json(EnrollResponse {
                    message: "Client enrolled successfully".to_string(),
                    enrollment,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!("enrollment rejected: {}", e);
            error_response(e)
        }
    }
}

/// GET /api/clients/search?term=... - Search clients by id or name
async fn search_clients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.service.search_clients(&params.term) {
        Ok(results) => (StatusCode::OK, Json(SearchResponse { results })).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/clients/:id - Client profile with enrollments
async fn get_client_profile(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Response {
    match state.service.client_profile(&client_id) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/client_enrollments/:id - Enrollments for one client
async fn get_client_enrollments(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Response {
    let enrollments = state.service.enrollments_by_client(&client_id);
    (StatusCode::OK, Json(EnrollmentsResponse { enrollments })).into_response()
}

/// GET / - Serve the landing page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("health_registry=info,registry_server=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("🏥 Health Registry Service - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let service = RegistryService::new();
    println!(
        "✓ Program catalog loaded: {} programs",
        service.ledger().catalog().count()
    );

    let state = AppState { service };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/clients", post(register_client))
        .route("/clients/search", get(search_clients))
        .route("/clients/:id", get(get_client_profile))
        .route("/client_enrollments/:id", get(get_client_enrollments))
        .route("/enrollments", post(enroll_client))
        .with_state(state);

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr =
        std::env::var("REGISTRY_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/clients/search?term=CLIENT", addr);
    println!("   UI:  http://{}", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await?;

    Ok(())
}
