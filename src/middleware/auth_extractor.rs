use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use log::debug;
use uuid::Uuid;

use crate::dtos::ApiResponse;
use crate::services::auth_services::AuthService;

/// A caller whose bearer token verified against the Supabase JWT secret.
/// Use `Option<AuthenticatedUser>` on routes that also serve anonymous callers.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let svc = req
        .app_data::<web::Data<AuthService>>()
        .ok_or_else(|| rejection(StatusCode::INTERNAL_SERVER_ERROR, "auth service not configured"))?;

    let header = req
        .headers()
        .get("Authorization")
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Invalid header format"))?;

    let token = bearer_token(header).ok_or_else(|| unauthorized("Invalid auth header format"))?;

    let user_id = svc
        .verify_access_token(token)
        .map_err(|_| unauthorized("Invalid token"))?;

    debug!("authenticated {}", user_id);
    Ok(AuthenticatedUser { user_id })
}

/// Error whose response body is the usual `ApiResponse` envelope.
fn rejection(status: StatusCode, message: &'static str) -> Error {
    InternalError::from_response(message, ApiResponse::respond(status, message)).into()
}

fn unauthorized(message: &'static str) -> Error {
    rejection(StatusCode::UNAUTHORIZED, message)
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
