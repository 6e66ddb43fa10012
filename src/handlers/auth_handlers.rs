use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info, warn};
use regex::Regex;

use crate::dtos::auth::{LoginIn, LoginResponse, SignupIn, SignupResponse};
use crate::dtos::ApiResponse;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::user::{NewUser, UserPublic};
use crate::services::auth_services::{AuthError, AuthService};

const MIN_PASSWORD_LEN: usize = 6;

fn looks_like_email(email: &str) -> bool {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$")
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

fn valid_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9_]{3,32}$")
        .map(|re| re.is_match(username))
        .unwrap_or(false)
}

fn trimmed(v: &Option<String>) -> Option<String> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// POST /auth/signup
/// Creates the account and its profile row. The client logs in next.
#[post("/signup")]
pub async fn signup(svc: web::Data<AuthService>, body: web::Json<SignupIn>) -> impl Responder {
    let input = body.into_inner();
    let email = input.email.trim().to_lowercase();

    if !looks_like_email(&email) {
        return ApiResponse::respond(StatusCode::BAD_REQUEST, "Invalid email format");
    }

    if input.password.len() < MIN_PASSWORD_LEN {
        return ApiResponse::respond(
            StatusCode::BAD_REQUEST,
            format!("Password must be at least {} characters long", MIN_PASSWORD_LEN),
        );
    }

    let username = trimmed(&input.username);
    if let Some(u) = &username {
        if !valid_username(u) {
            return ApiResponse::respond(
                StatusCode::BAD_REQUEST,
                "Username must be 3-32 letters, digits or underscores",
            );
        }
    }
    let full_name = trimmed(&input.full_name);

    let signup_data = SignupIn {
        email: email.clone(),
        password: input.password,
        username: username.clone(),
        full_name: full_name.clone(),
    };

    let user_id = match svc.signup_only(&signup_data).await {
        Ok(id) => id,
        Err(AuthError::AlreadyRegistered) => {
            return ApiResponse::respond(
                StatusCode::CONFLICT,
                "Email already exists. Please login instead.",
            );
        }
        Err(AuthError::Supabase(msg)) => {
            warn!("signup rejected for {}: {}", email, msg);
            return ApiResponse::respond(StatusCode::BAD_REQUEST, msg);
        }
        Err(e) => {
            error!("signup failed for {}: {}", email, e);
            return ApiResponse::respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create account. Please try again.",
            );
        }
    };

    if let Err(e) = svc
        .upsert_profile(&NewUser::new(user_id, &email, username, full_name))
        .await
    {
        error!("account {} created but profile insert failed: {}", user_id, e);
        return ApiResponse::respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Account created but profile could not be saved",
        );
    }

    info!("signup complete for {}", user_id);

    HttpResponse::Created().json(ApiResponse::success(
        "Account created",
        SignupResponse {
            user_id,
            message: "Account created successfully. Please log in to continue.".to_string(),
            next_step: "login".to_string(),
        },
    ))
}

/// POST /auth/login
/// Returns the session, plus the profile when one exists.
#[post("/login")]
pub async fn login(svc: web::Data<AuthService>, body: web::Json<LoginIn>) -> impl Responder {
    let login_data = body.into_inner();

    let (session, user_id) = match svc.login_with_user_id(&login_data).await {
        Ok(ok) => ok,
        Err(AuthError::InvalidCredentials) => {
            return ApiResponse::respond(StatusCode::UNAUTHORIZED, "Invalid email or password");
        }
        Err(e) => {
            error!("login failed: {}", e);
            return ApiResponse::respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Login is temporarily unavailable",
            );
        }
    };

    // a missing profile still lets the user in
    let user = match svc.get_user(user_id).await {
        Ok(u) => u.map(UserPublic::from),
        Err(e) => {
            warn!("profile lookup failed for {}: {}", user_id, e);
            None
        }
    };

    let (message, next_step) = match &user {
        Some(_) => ("Login successful", "dashboard"),
        None => ("Profile required", "complete_profile"),
    };

    HttpResponse::Ok().json(ApiResponse::success(
        message,
        LoginResponse {
            session,
            user,
            next_step: next_step.to_string(),
        },
    ))
}

/// GET /auth/me
#[get("/me")]
pub async fn me(svc: web::Data<AuthService>, user: AuthenticatedUser) -> impl Responder {
    match svc.get_user(user.user_id).await {
        Ok(Some(u)) => HttpResponse::Ok().json(ApiResponse::success(
            "Profile retrieved successfully",
            UserPublic::from(u),
        )),
        Ok(None) => ApiResponse::respond(StatusCode::NOT_FOUND, "Profile not found"),
        Err(e) => {
            error!("failed to get profile for {}: {}", user.user_id, e);
            ApiResponse::respond(StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve profile")
        }
    }
}
