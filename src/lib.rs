pub mod client;
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use actix_web::web;

use crate::repositories::supabase::SupabaseRest;

#[derive(Clone)]
pub struct AppState {
    pub rest: SupabaseRest,
    pub feed_page_size: u32,
}

/// Registers every route. Shared by `main` and the integration tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use crate::handlers::{auth_handlers, health_handlers, post_handlers, project_handlers};

    cfg.service(
        web::scope("/auth")
            .service(auth_handlers::signup) // POST /auth/signup
            .service(auth_handlers::login) // POST /auth/login
            .service(auth_handlers::me), // GET /auth/me
    )
    .service(
        web::scope("/api")
            .service(project_handlers::create_project)
            .service(project_handlers::list_projects)
            .service(project_handlers::list_project_posts)
            .service(project_handlers::get_project)
            .service(project_handlers::update_project)
            .service(project_handlers::delete_project)
            .service(post_handlers::create_post)
            .service(post_handlers::list_posts)
            .service(post_handlers::get_post)
            .service(post_handlers::delete_post)
            .service(post_handlers::like_post)
            .service(post_handlers::unlike_post)
            .service(post_handlers::add_comment)
            .service(post_handlers::delete_comment),
    )
    .service(health_handlers::health);
}
