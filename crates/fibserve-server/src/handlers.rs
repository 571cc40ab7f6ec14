use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use fibserve_core::{format_display, parse_input, ComputeError};

use crate::orchestrator::Orchestrator;

/// Shared state for every request: the orchestrator carries the
/// evaluator constants and the optional cache handle, both safe for
/// unsynchronized concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

#[derive(Deserialize)]
pub struct FibonacciRequest {
    number: String,
}

#[derive(Serialize)]
struct FibonacciResponse {
    input: String,
    result: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// `GET /fibonacci?number=<input>`
pub async fn get_fibonacci(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    let Some(input) = params.get("number") else {
        tracing::warn!("missing 'number' parameter in GET request");
        return bad_request("Missing 'number' parameter").into_response();
    };
    handle(&state, input).await
}

/// `POST /fibonacci` with JSON body `{"number": "<input>"}`
pub async fn post_fibonacci(
    State(state): State<AppState>,
    payload: Result<Json<FibonacciRequest>, JsonRejection>,
) -> axum::response::Response {
    match payload {
        Ok(Json(req)) => handle(&state, &req.number).await,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "invalid JSON body in POST request");
            bad_request("Invalid JSON format").into_response()
        }
    }
}

/// Common pipeline for both trigger shapes: parse, orchestrate, format.
///
/// Only parse and evaluator failures reach the client, always as a 400
/// carrying the failure's message; cache trouble is absorbed in the
/// orchestrator.
async fn handle(state: &AppState, input: &str) -> axum::response::Response {
    match run_pipeline(state, input).await {
        Ok(result) => {
            tracing::info!(input = %input, result = %result, "request served");
            (
                StatusCode::OK,
                Json(FibonacciResponse {
                    input: input.to_owned(),
                    result,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::warn!(input = %input, error = %e, "request rejected");
            bad_request(e.to_string()).into_response()
        }
    }
}

async fn run_pipeline(state: &AppState, input: &str) -> Result<String, ComputeError> {
    let z = parse_input(input)?;
    let result = state.orchestrator.compute(z).await?;
    Ok(format_display(result))
}

/// Any other method/path combination.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".into(),
        }),
    )
}

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'a str,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}
