use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::project::{NewProject, Project, ProjectOwner, ProjectPatch};

#[derive(Debug, Deserialize)]
pub struct CreateProjectDTO {
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl CreateProjectDTO {
    pub fn into_new_project(self) -> NewProject {
        NewProject::normalized(&self.name, self.description.as_deref(), self.link.as_deref())
    }
}

/// Omitted fields stay untouched; an empty string clears `description`/`link`.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectDTO {
    pub name: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl UpdateProjectDTO {
    pub fn into_patch(self) -> ProjectPatch {
        ProjectPatch::normalized(
            self.name.as_deref(),
            self.description.as_deref(),
            self.link.as_deref(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub owner: Option<Uuid>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ProjectOut {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub user: ProjectOwner,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub is_own_project: bool,
}

impl ProjectOut {
    pub fn from_project(p: Project, viewer: Option<Uuid>) -> Self {
        let is_own_project = viewer == Some(p.user.id);
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            link: p.link,
            user: p.user,
            created_at: p.created_at,
            updated_at: p.updated_at,
            is_own_project,
        }
    }
}
