pub mod comment_repository;
pub mod post_repository;
pub mod profile_repository;
pub mod project_repository;
pub mod supabase;
