use actix_web::{delete, get, post, web, HttpResponse, Responder};
use log::debug;
use uuid::Uuid;

use crate::dtos::post_dtos::{page_size, CommentOut, CreateCommentDTO, CreatePostDTO, LikeOut, ListPostsQuery, PostOut};
use crate::dtos::ApiResponse;
use crate::handlers::repo_error_response;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::comment::NewComment;
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::project_repository::ProjectRepository;
use crate::repositories::supabase::RepoError;
use crate::services::post_services;
use crate::AppState;

#[post("/posts")]
pub async fn create_post(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> impl Responder {
    let new_post = body.into_inner().into_new_post();
    if let Err(msg) = new_post.validate() {
        return repo_error_response(&RepoError::Validation(msg), "Post");
    }

    // posts must point at an existing project
    match ProjectRepository::get_project(&app_state.rest, &new_post.project_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return repo_error_response(&RepoError::NotFound, "Project"),
        Err(e) => return repo_error_response(&e, "Project"),
    }

    match PostRepository::create_post(&app_state.rest, user.user_id, new_post).await {
        Ok(post) => HttpResponse::Created().json(ApiResponse::success(
            "Post created successfully",
            PostOut::from_post(post, Some(user.user_id)),
        )),
        Err(e) => repo_error_response(&e, "Post"),
    }
}

#[get("/posts")]
pub async fn list_posts(
    app_state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    query: web::Query<ListPostsQuery>,
) -> impl Responder {
    let viewer = user.map(|u| u.user_id);
    let limit = page_size(query.limit, app_state.feed_page_size);

    match PostRepository::list_posts(&app_state.rest, query.project_id.as_deref(), limit).await {
        Ok(posts) => {
            debug!("posts retrieved: {} items", posts.len());
            let out: Vec<PostOut> = posts.into_iter().map(|p| PostOut::from_post(p, viewer)).collect();
            HttpResponse::Ok().json(ApiResponse::success("Posts retrieved successfully", out))
        }
        Err(e) => repo_error_response(&e, "Post"),
    }
}

#[get("/posts/{id}")]
pub async fn get_post(
    app_state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let viewer = user.map(|u| u.user_id);

    match PostRepository::get_post(&app_state.rest, path.into_inner()).await {
        Ok(Some(post)) => HttpResponse::Ok().json(ApiResponse::success(
            "Post retrieved successfully",
            PostOut::from_post(post, viewer),
        )),
        Ok(None) => repo_error_response(&RepoError::NotFound, "Post"),
        Err(e) => repo_error_response(&e, "Post"),
    }
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> impl Responder {
    let post_id = path.into_inner();

    match PostRepository::delete_post(&app_state.rest, post_id, user.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Post deleted", post_id)),
        Err(e) => repo_error_response(&e, "Post"),
    }
}

#[post("/posts/{id}/like")]
pub async fn like_post(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_like(&app_state, path.into_inner(), user, true).await
}

#[delete("/posts/{id}/like")]
pub async fn unlike_post(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> impl Responder {
    set_like(&app_state, path.into_inner(), user, false).await
}

async fn set_like(app_state: &AppState, post_id: Uuid, user: AuthenticatedUser, liked: bool) -> HttpResponse {
    match post_services::set_like(&app_state.rest, post_id, user.user_id, liked).await {
        Ok(post) => {
            let out = LikeOut {
                post_id,
                likes: post.likes,
                liked: post.is_liked_by(&user.user_id),
            };
            let message = if liked { "Post liked" } else { "Post unliked" };
            HttpResponse::Ok().json(ApiResponse::success(message, out))
        }
        Err(e) => repo_error_response(&e, "Post"),
    }
}

#[post("/posts/{id}/comments")]
pub async fn add_comment(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentDTO>,
) -> impl Responder {
    let post_id = path.into_inner();
    let comment = NewComment::new(&body.content);
    if let Err(msg) = comment.validate() {
        return repo_error_response(&RepoError::Validation(msg), "Comment");
    }

    match PostRepository::get_post(&app_state.rest, post_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return repo_error_response(&RepoError::NotFound, "Post"),
        Err(e) => return repo_error_response(&e, "Post"),
    }

    match CommentRepository::add_comment(&app_state.rest, post_id, user.user_id, comment).await {
        Ok(c) => HttpResponse::Created().json(ApiResponse::success("Comment added", CommentOut::from(c))),
        Err(e) => repo_error_response(&e, "Comment"),
    }
}

#[delete("/posts/{post_id}/comments/{comment_id}")]
pub async fn delete_comment(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (post_id, comment_id) = path.into_inner();

    match CommentRepository::delete_comment(&app_state.rest, post_id, comment_id, user.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Comment deleted", comment_id)),
        Err(e) => repo_error_response(&e, "Comment"),
    }
}
