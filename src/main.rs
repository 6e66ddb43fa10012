use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use reqwest::Client;

use showcase_be::config::{mask_key, AppConfig};
use showcase_be::repositories::supabase::SupabaseRest;
use showcase_be::services::auth_services::AuthService;
use showcase_be::{configure_routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Supabase URL: {}", cfg.supabase_url);
    info!("Supabase service key: {}", mask_key(&cfg.supabase_service_role_key));

    let http_client = Client::builder()
        .user_agent(concat!("showcase-be/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(std::io::Error::other)?;

    let auth_data = web::Data::new(AuthService::new(http_client.clone(), &cfg));
    let state = web::Data::new(AppState {
        rest: SupabaseRest::new(http_client, &cfg.supabase_url, &cfg.supabase_service_role_key),
        feed_page_size: cfg.feed_page_size,
    });

    let allowed_origins = cfg.allowed_origins.clone();
    info!("Starting server on {}", cfg.bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept", "x-requested-with"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth_data.clone())
            .configure(configure_routes)
    })
    .bind(&cfg.bind_address)?
    .run()
    .await
}
