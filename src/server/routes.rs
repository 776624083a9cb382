//! REST API routes for the web server.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::state::AppState;
use crate::error::Error;

/// Create the API router
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/initialize", post(initialize))
        .route("/api/board", get(board))
        .route("/api/evolve", post(evolve))
}

#[derive(Deserialize, Default)]
struct InitializeRequest {
    size: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResponse {
    board: Vec<Vec<bool>>,
    neighbor_counts: Vec<Vec<u8>>,
}

#[derive(Serialize)]
struct BoardResponse {
    board: Vec<Vec<bool>>,
}

/// Error body returned as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::SizeTooLarge { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::OutOfBounds { .. } | Error::NotSquare { .. } => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// A missing or unreadable body falls back to the default size.
async fn initialize(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<InitializeRequest>>,
) -> Result<Json<InitializeResponse>, ApiError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let grid = state.initialize(request.size).await?;
    Ok(Json(InitializeResponse {
        board: grid.alive_matrix(),
        neighbor_counts: grid.count_matrix(),
    }))
}

async fn board(State(state): State<Arc<AppState>>) -> Json<BoardResponse> {
    let grid = state.board().await;
    Json(BoardResponse {
        board: grid.alive_matrix(),
    })
}

async fn evolve(State(state): State<Arc<AppState>>) -> Json<BoardResponse> {
    let grid = state.evolve().await;
    Json(BoardResponse {
        board: grid.alive_matrix(),
    })
}
