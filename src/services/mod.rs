pub mod auth_services;
pub mod post_services;
