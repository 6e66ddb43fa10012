use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

use crate::dtos::post_dtos::{page_size, PostOut};
use crate::dtos::project_dtos::{CreateProjectDTO, ListProjectsQuery, ProjectOut, UpdateProjectDTO};
use crate::dtos::ApiResponse;
use crate::handlers::repo_error_response;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::project_repository::ProjectRepository;
use crate::repositories::supabase::RepoError;
use crate::AppState;

#[post("/projects")]
pub async fn create_project(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateProjectDTO>,
) -> impl Responder {
    let project = body.into_inner().into_new_project();

    match ProjectRepository::create_project(&app_state.rest, user.user_id, project).await {
        Ok(p) => HttpResponse::Created().json(ApiResponse::success(
            "Project created successfully",
            ProjectOut::from_project(p, Some(user.user_id)),
        )),
        Err(e) => repo_error_response(&e, "Project"),
    }
}

#[get("/projects")]
pub async fn list_projects(
    app_state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    query: web::Query<ListProjectsQuery>,
) -> impl Responder {
    let viewer = user.map(|u| u.user_id);
    let limit = page_size(query.limit, app_state.feed_page_size);

    match ProjectRepository::list_projects(&app_state.rest, query.owner, limit).await {
        Ok(projects) => {
            let out: Vec<ProjectOut> = projects
                .into_iter()
                .map(|p| ProjectOut::from_project(p, viewer))
                .collect();
            HttpResponse::Ok().json(ApiResponse::success("Projects retrieved successfully", out))
        }
        Err(e) => repo_error_response(&e, "Project"),
    }
}

#[get("/projects/{id}")]
pub async fn get_project(
    app_state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    path: web::Path<String>,
) -> impl Responder {
    let viewer = user.map(|u| u.user_id);

    match ProjectRepository::get_project(&app_state.rest, &path).await {
        Ok(Some(p)) => HttpResponse::Ok().json(ApiResponse::success(
            "Project retrieved successfully",
            ProjectOut::from_project(p, viewer),
        )),
        Ok(None) => repo_error_response(&RepoError::NotFound, "Project"),
        Err(e) => repo_error_response(&e, "Project"),
    }
}

#[put("/projects/{id}")]
pub async fn update_project(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateProjectDTO>,
) -> impl Responder {
    let patch = body.into_inner().into_patch();

    match ProjectRepository::update_project(&app_state.rest, &path, user.user_id, patch).await {
        Ok(p) => HttpResponse::Ok().json(ApiResponse::success(
            "Project updated successfully",
            ProjectOut::from_project(p, Some(user.user_id)),
        )),
        Err(e) => repo_error_response(&e, "Project"),
    }
}

#[delete("/projects/{id}")]
pub async fn delete_project(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> impl Responder {
    match ProjectRepository::delete_project(&app_state.rest, &path, user.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success("Project deleted", path.into_inner())),
        Err(e) => repo_error_response(&e, "Project"),
    }
}

/// GET /api/projects/{id}/posts
#[get("/projects/{id}/posts")]
pub async fn list_project_posts(
    app_state: web::Data<AppState>,
    user: Option<AuthenticatedUser>,
    path: web::Path<String>,
) -> impl Responder {
    let viewer = user.map(|u| u.user_id);

    match ProjectRepository::get_project(&app_state.rest, &path).await {
        Ok(Some(_)) => {}
        Ok(None) => return repo_error_response(&RepoError::NotFound, "Project"),
        Err(e) => return repo_error_response(&e, "Project"),
    }

    match PostRepository::list_posts(&app_state.rest, Some(path.as_str()), app_state.feed_page_size).await {
        Ok(posts) => {
            let out: Vec<PostOut> = posts.into_iter().map(|p| PostOut::from_post(p, viewer)).collect();
            HttpResponse::Ok().json(ApiResponse::success("Posts retrieved successfully", out))
        }
        Err(e) => repo_error_response(&e, "Post"),
    }
}
