pub mod auth_handlers;
pub mod health_handlers;
pub mod post_handlers;
pub mod project_handlers;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::error;

use crate::dtos::ApiResponse;
use crate::repositories::supabase::RepoError;

/// Maps a repository failure to the error envelope. `what` names the
/// resource in the 404 message, e.g. "Post".
pub(crate) fn repo_error_response(err: &RepoError, what: &str) -> HttpResponse {
    match err {
        RepoError::NotFound => ApiResponse::respond(StatusCode::NOT_FOUND, format!("{} not found", what)),
        RepoError::Validation(msg) => ApiResponse::respond(StatusCode::BAD_REQUEST, msg.clone()),
        RepoError::Conflict => ApiResponse::respond(StatusCode::CONFLICT, err.to_string()),
        other => {
            error!("{} storage failure: {}", what, other);
            ApiResponse::respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to process {}", what.to_lowercase()),
            )
        }
    }
}
