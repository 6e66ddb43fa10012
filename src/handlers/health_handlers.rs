use actix_web::{get, web, HttpResponse, Responder};
use log::error;
use serde_json::json;

use crate::AppState;

/// GET /health
/// Reports whether PostgREST answers.
#[get("/health")]
pub async fn health(app_state: web::Data<AppState>) -> impl Responder {
    match app_state.rest.ping().await {
        Ok(status) if status.is_success() => HttpResponse::Ok().json(json!({
            "status": "success",
            "supabase_status": status.as_u16(),
        })),
        Ok(status) => HttpResponse::BadGateway().json(json!({
            "status": "error",
            "supabase_status": status.as_u16(),
        })),
        Err(e) => {
            error!("supabase unreachable: {}", e);
            HttpResponse::BadGateway().json(json!({
                "status": "error",
                "message": format!("Supabase connection failed: {}", e),
            }))
        }
    }
}
