//! HTTP surface
//!
//! Warp filters over a [`BoardService`]. CORS is permissive (any origin);
//! errors map to statuses here and nowhere else: validation 400, not-found
//! 404, everything store-shaped 500 with a generic body.

use crate::error::ServiceError;
use crate::service::BoardService;
use letterboard_model::{Tile, ValidationError};
use letterboard_store::DocumentStore;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Wire shape of an error response
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
struct ApiError(ServiceError);

impl warp::reject::Reject for ApiError {}

fn reject(err: ServiceError) -> Rejection {
    warp::reject::custom(ApiError(err))
}

/// Build the full route tree for one shared board
pub fn routes<S>(
    service: Arc<BoardService<S>>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone
where
    S: DocumentStore + 'static,
{
    let with_service = warp::any().map(move || Arc::clone(&service));

    let hello = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::json(&"Hi!"));

    let board = warp::path!("board")
        .and(warp::get())
        .and(with_service.clone())
        .and_then(get_board);

    let list = warp::path!("letters")
        .and(warp::get())
        .and(with_service.clone())
        .and_then(list_tiles);

    let get_one = warp::path!("letters" / String)
        .and(warp::get())
        .and(with_service.clone())
        .and_then(get_tile);

    let put_one = warp::path!("letters" / String)
        .and(warp::put())
        .and(warp::body::content_length_limit(16 * 1024))
        .and(warp::body::json())
        .and(with_service)
        .and_then(put_tile);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "PUT"])
        .allow_header("content-type");

    hello
        .or(board)
        .or(list)
        .or(get_one)
        .or(put_one)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::trace::request())
}

async fn get_board<S: DocumentStore + 'static>(
    service: Arc<BoardService<S>>,
) -> Result<impl Reply, Rejection> {
    service
        .board_style()
        .await
        .map(|style| warp::reply::json(&style))
        .map_err(reject)
}

async fn list_tiles<S: DocumentStore + 'static>(
    service: Arc<BoardService<S>>,
) -> Result<impl Reply, Rejection> {
    service
        .list_tiles()
        .await
        .map(|tiles| warp::reply::json(&tiles))
        .map_err(reject)
}

async fn get_tile<S: DocumentStore + 'static>(
    index: String,
    service: Arc<BoardService<S>>,
) -> Result<impl Reply, Rejection> {
    let index = parse_index(&index)?;
    service
        .tile(index)
        .await
        .map(|tile| warp::reply::json(&tile))
        .map_err(reject)
}

async fn put_tile<S: DocumentStore + 'static>(
    index: String,
    proposal: Tile,
    service: Arc<BoardService<S>>,
) -> Result<impl Reply, Rejection> {
    let index = parse_index(&index)?;
    service
        .update_tile(index, &proposal)
        .await
        .map(|tile| warp::reply::json(&tile))
        .map_err(reject)
}

fn parse_index(raw: &str) -> Result<usize, Rejection> {
    raw.parse::<usize>()
        .map_err(|_| reject(ValidationError::InvalidIndex(raw.to_string()).into()))
}

fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotSeeded => StatusCode::NOT_FOUND,
        ServiceError::Repo(e) if e.is_not_found() => StatusCode::NOT_FOUND,
        ServiceError::Repo(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(ApiError(e)) = err.find::<ApiError>() {
        let status = status_for(e);
        if status.is_server_error() {
            tracing::error!(error = %e, "request failed");
        }
        let message = if status.is_server_error() {
            "internal error".to_string()
        } else {
            e.to_string()
        };
        (status, message)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        tracing::error!(?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
    };

    let body = warp::reply::json(&ErrorBody { error: message });
    Ok(warp::reply::with_status(body, status))
}
