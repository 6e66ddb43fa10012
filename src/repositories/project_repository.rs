use log::info;
use serde_json::json;
use uuid::Uuid;

use crate::models::project::{NewProject, Project, ProjectPatch, ProjectRow};
use crate::repositories::supabase::{RepoError, SupabaseRest};

const TABLE: &str = "projects";
/// Owner profile embedded under `owner`.
const SELECT: &str = "*,owner:profiles(id,username,full_name)";

pub struct ProjectRepository;

impl ProjectRepository {
    pub async fn create_project(
        rest: &SupabaseRest,
        user_id: Uuid,
        project: NewProject,
    ) -> Result<Project, RepoError> {
        project.validate().map_err(RepoError::Validation)?;

        let payload = json!({
            "id": Uuid::new_v4().to_string(),
            "user_id": user_id,
            "name": project.name,
            "description": project.description,
            "link": project.link,
        });

        let resp = rest
            .insert(TABLE)
            .query(&[("select", SELECT)])
            .json(&payload)
            .send()
            .await?;

        let row: ProjectRow = SupabaseRest::single(resp).await?;
        info!("project {} created by {}", row.id, user_id);
        Ok(row.into())
    }

    pub async fn get_project(rest: &SupabaseRest, id: &str) -> Result<Option<Project>, RepoError> {
        let resp = rest
            .get(TABLE)
            .query(&[("id", format!("eq.{}", id)), ("select", SELECT.to_string())])
            .send()
            .await?;

        let rows: Vec<ProjectRow> = SupabaseRest::rows(resp).await?;
        Ok(rows.into_iter().next().map(Project::from))
    }

    /// Newest first, optionally restricted to one owner.
    pub async fn list_projects(
        rest: &SupabaseRest,
        owner: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<Project>, RepoError> {
        let mut query = vec![
            ("select", SELECT.to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(owner) = owner {
            query.push(("user_id", format!("eq.{}", owner)));
        }

        let resp = rest.get(TABLE).query(&query).send().await?;
        let rows: Vec<ProjectRow> = SupabaseRest::rows(resp).await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Only the owner can update; anything else reads as `NotFound`.
    pub async fn update_project(
        rest: &SupabaseRest,
        id: &str,
        owner: Uuid,
        patch: ProjectPatch,
    ) -> Result<Project, RepoError> {
        patch.validate().map_err(RepoError::Validation)?;

        let resp = rest
            .patch(TABLE)
            .query(&[
                ("id", format!("eq.{}", id)),
                ("user_id", format!("eq.{}", owner)),
                ("select", SELECT.to_string()),
            ])
            .json(&patch.to_json())
            .send()
            .await?;

        let row: ProjectRow = SupabaseRest::single(resp).await?;
        Ok(row.into())
    }

    pub async fn delete_project(rest: &SupabaseRest, id: &str, owner: Uuid) -> Result<(), RepoError> {
        let resp = rest
            .delete(TABLE)
            .query(&[("id", format!("eq.{}", id)), ("user_id", format!("eq.{}", owner))])
            .send()
            .await?;

        let _deleted: ProjectRow = SupabaseRest::single(resp).await?;
        info!("project {} deleted by {}", id, owner);
        Ok(())
    }
}
