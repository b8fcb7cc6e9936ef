use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use baghchal_core::{Error, Game, Move, Piece, Position};

use crate::AppState;

/// Core error carried to the HTTP layer
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError(error)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            Error::GameNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidMove | Error::GameOver | Error::InvalidConfig(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NoLegalMove => StatusCode::CONFLICT,
            Error::Storage(_) | Error::Database(_) | Error::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_storage() {
            tracing::error!(error = %self.0, "storage failure");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub player_id: String,
    #[serde(default, rename = "isAIGame")]
    pub is_ai_game: bool,
    /// Wider than the stored level so out-of-range values reach validation
    #[serde(default)]
    pub ai_level: i64,
}

impl CreateGameRequest {
    /// Level to store. Values outside `u8` are rejected for AI games and
    /// dropped to 0 for two-player games, where the level is unused.
    fn level(&self) -> Result<u8, Error> {
        match u8::try_from(self.ai_level) {
            Ok(level) => Ok(level),
            Err(_) if self.is_ai_game => Err(Error::InvalidConfig(format!(
                "AI level must be 1, 2 or 3, got {}",
                self.ai_level
            ))),
            Err(_) => Ok(0),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
    pub piece_type: Piece,
}

impl From<MoveRequest> for Move {
    fn from(req: MoveRequest) -> Self {
        Move::step(req.piece_type, req.from, req.to)
    }
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateGameRequest>,
) -> ApiResult<(StatusCode, Json<Game>)> {
    let level = req.level()?;
    let game = state
        .games
        .create_game(&req.player_id, req.is_ai_game, level)?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Game>> {
    Ok(Json(state.games.get_game(&id)?))
}

pub async fn submit_move(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> ApiResult<Json<Game>> {
    let game = state.games.submit_move(&id, req.into())?;
    Ok(Json(game))
}

pub async fn list_player_games(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<String>,
) -> ApiResult<Json<Vec<Game>>> {
    Ok(Json(state.games.list_games_for_player(&player_id)?))
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.games.delete_game(&id)?;
    Ok(Json(json!({ "message": "game deleted" })))
}

pub async fn health() -> &'static str {
    "OK"
}
