//! HTTP surface for the board.
//!
//! Thin layer over [`ClientStore`]: handlers validate the raw path/query/body
//! values, delegate to the store, and translate [`BoardError`] into the
//! `{message, long_message}` bodies callers expect.

use crate::{
    domain::{sort_clients, Client, Lane, MoveRequest, SortField, SortOrder},
    error::BoardError,
    storage::ClientStore,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, sync::Arc};

pub type SharedStore = Arc<dyn ClientStore>;

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/api/v1/clients", get(list_clients))
        .route("/api/v1/clients/:id", get(get_client).put(update_client))
        .with_state(store)
}

async fn banner() -> &'static str {
    "laneboard: kanban client tracking service"
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    status: Option<String>,
    sort: Option<String>,
    order: Option<String>,
}

async fn list_clients(
    State(store): State<SharedStore>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let mut clients = match &params.status {
        Some(raw) => {
            let lane = Lane::from_str(raw)?;
            store.clients_in_lane(lane).await?
        }
        None => store.list_clients().await?,
    };

    if params.sort.is_some() || params.order.is_some() {
        let field = match &params.sort {
            Some(raw) => SortField::from_str(raw).map_err(BoardError::InvalidSort)?,
            None => SortField::Status,
        };
        let order = match &params.order {
            Some(raw) => SortOrder::from_str(raw).map_err(BoardError::InvalidSort)?,
            None => SortOrder::Ascending,
        };
        sort_clients(&mut clients, field, order);
    }

    Ok(Json(clients))
}

async fn get_client(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(store.client_by_id(id).await?))
}

#[derive(Debug, Default, Deserialize)]
struct UpdateBody {
    status: Option<String>,
    priority: Option<i64>,
}

async fn update_client(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let id = parse_id(&id)?;
    let Json(body) = body
        .map_err(|rejection| ApiError::bad_request("Invalid request body.", rejection.body_text()))?;

    let lane = body.status.as_deref().map(Lane::from_str).transpose()?;
    let priority = match body.priority {
        Some(p) if p < 1 => return Err(BoardError::InvalidPriority(p).into()),
        other => other,
    };

    let clients = store.move_client(id, MoveRequest { lane, priority }).await?;
    Ok(Json(clients))
}

fn parse_id(raw: &str) -> Result<i64, BoardError> {
    raw.parse().map_err(|_| BoardError::InvalidId(raw.to_string()))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    long_message: String,
}

/// HTTP-facing error: a status code plus the two-part message body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn bad_request(message: &str, long_message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                message: message.to_string(),
                long_message: long_message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::ClientNotFound(_) => {
                Self::bad_request("Invalid id provided.", "Cannot find client with that id.")
            }
            BoardError::InvalidId(_) => {
                Self::bad_request("Invalid id provided.", "Id needs to be a number.")
            }
            BoardError::InvalidLane(raw) => Self::bad_request(
                "Invalid status provided.",
                format!("'{raw}' is not one of backlog, in-progress, complete."),
            ),
            BoardError::InvalidPriority(_) => Self::bad_request(
                "Invalid priority provided.",
                "Priority needs to be a positive whole number.",
            ),
            BoardError::InvalidSort(detail) => Self::bad_request("Invalid sort provided.", detail),
            other => {
                tracing::error!(error = %other, "request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody {
                        message: "Internal server error.".to_string(),
                        long_message: "The request could not be completed.".to_string(),
                    },
                }
            }
        }
    }
}
