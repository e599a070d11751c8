//! MCP-compatible HTTP server.
//!
//! Exposes the extraction pipeline via a JSON HTTP API suitable for
//! integration with MCP-compatible AI tools.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/tools/list` | List all tools with schemas |
//! | `POST` | `/tools/{name}` | Call a tool by name |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Tools
//!
//! - `compile_parameters` — validate a request and compile corpus query
//!   parameters.
//! - `extract_records` — extract, score and rank records from a corpus
//!   document supplied in the request body.
//! - `list_scopes` — enumerate the geographic scope catalog.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "validation_failed", "message": "search word must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `validation_failed` (422),
//! `not_found` (404), `internal` (500). `validation_failed` covers both
//! request validation and unusable documents; `bad_request` covers
//! malformed tool parameters.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients and cross-origin MCP tool calls.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::extract::{ExtractError, HomeArea};
use crate::params;
use crate::pipeline;
use crate::request::RawSearchRequest;
use crate::scope;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
}

/// Starts the MCP-compatible HTTP server.
///
/// Binds to the address configured in `[server].bind` and runs until the
/// process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/tools/list", get(handle_list_tools))
        .route("/tools/{name}", post(handle_tool_call))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    println!("MCP server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 422 error for request validation failures.
fn validation_failed(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        code: "validation_failed".to_string(),
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /tools/list ============

/// One tool entry in `GET /tools/list` output.
#[derive(Serialize)]
struct ToolInfo {
    name: String,
    description: String,
    /// OpenAI function-calling parameter schema.
    parameters: serde_json::Value,
}

/// JSON response body for `GET /tools/list`.
#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolInfo>,
}

fn tool_catalog() -> Vec<ToolInfo> {
    vec![
        ToolInfo {
            name: "compile_parameters".to_string(),
            description: "Validate a search request and compile corpus query parameters"
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "word": { "type": "string", "description": "German search word" },
                    "scope": { "type": "string", "description": "Geographic scope token" },
                    "town": { "type": "string", "description": "Free-text town override" },
                    "exact": { "type": "boolean", "description": "Exact-match search" }
                },
                "required": ["word"]
            }),
        },
        ToolInfo {
            name: "extract_records".to_string(),
            description: "Extract, score and rank dialect records from a corpus XML document"
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "document": { "type": "string", "description": "Corpus XML document" },
                    "word": { "type": "string", "description": "German search word" }
                },
                "required": ["document", "word"]
            }),
        },
        ToolInfo {
            name: "list_scopes".to_string(),
            description: "Enumerate the geographic scope catalog".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

async fn handle_list_tools() -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: tool_catalog(),
    })
}

// ============ POST /tools/{name} ============

/// Parameters for the `extract_records` tool.
#[derive(Deserialize)]
struct ExtractParams {
    document: String,
    word: String,
}

/// Handler for `POST /tools/{name}`.
///
/// Returns `404` for unknown tools, `400` for malformed parameters, `422`
/// for invalid requests or unusable documents, and wraps successful output
/// as `{ "result": ... }`.
async fn handle_tool_call(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = match name.as_str() {
        "compile_parameters" => run_compile_parameters(body)?,
        "extract_records" => run_extract_records(&state, body)?,
        "list_scopes" => serde_json::json!({ "scopes": scope::catalog() }),
        _ => {
            return Err(not_found(format!(
                "no tool registered with name: {}",
                name
            )))
        }
    };

    Ok(Json(serde_json::json!({ "result": result })))
}

fn run_compile_parameters(body: serde_json::Value) -> Result<serde_json::Value, AppError> {
    let raw: RawSearchRequest =
        serde_json::from_value(body).map_err(|e| bad_request(e.to_string()))?;
    let request = raw.validate().map_err(|e| validation_failed(e.to_string()))?;
    let compiled = params::compile(&request);
    Ok(serde_json::json!({
        "scope": request.scope.as_str(),
        "parameters": compiled,
    }))
}

fn run_extract_records(
    state: &AppState,
    body: serde_json::Value,
) -> Result<serde_json::Value, AppError> {
    let params: ExtractParams =
        serde_json::from_value(body).map_err(|e| bad_request(e.to_string()))?;
    if params.word.trim().is_empty() {
        return Err(validation_failed("search word must not be empty"));
    }

    let home = HomeArea {
        district_code: state.config.home.district_code.clone(),
        town: state.config.home.town.clone(),
    };
    let extraction = pipeline::run(&params.document, &params.word, &home)
        .map_err(classify_extract_error)?;

    serde_json::to_value(&extraction).map_err(|e| AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: e.to_string(),
    })
}

/// Document-level extraction failures are caller errors: the document they
/// supplied is unusable.
fn classify_extract_error(err: ExtractError) -> AppError {
    match err {
        ExtractError::EmptyDocument
        | ExtractError::Malformed(_)
        | ExtractError::MissingMetadata => validation_failed(err.to_string()),
    }
}
