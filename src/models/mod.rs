pub mod comment;
pub mod post;
pub mod project;
pub mod user;
