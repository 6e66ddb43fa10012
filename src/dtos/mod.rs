pub mod api_response;
pub mod auth_dtos;
pub mod post_dtos;
pub mod project_dtos;

pub use api_response::ApiResponse;
// so callers can write `crate::dtos::auth`
pub use auth_dtos as auth;
