use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_LINK_LEN: usize = 2048;

/// A project published by a user. `description` and `link` are optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub user: ProjectOwner,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// The owning user. The project references it, it does not own the user row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectOwner {
    pub id: Uuid,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

impl ProjectOwner {
    pub fn bare(id: Uuid) -> Self {
        Self { id, username: None, full_name: None }
    }
}

/// Row shape of `projects` as PostgREST returns it, with the owner profile
/// embedded under `owner` when the join resolves.
#[derive(Debug, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub user_id: Uuid,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub owner: Option<ProjectOwner>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        let user = match row.owner {
            Some(owner) if owner.id == row.user_id => owner,
            _ => ProjectOwner::bare(row.user_id),
        };

        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            link: row.link,
            user,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub link: Option<String>,
}

impl NewProject {
    /// Trims fields and drops blank optionals.
    pub fn normalized(name: &str, description: Option<&str>, link: Option<&str>) -> Self {
        Self {
            name: name.trim().to_string(),
            description: non_blank(description),
            link: non_blank(link),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_name(&self.name)?;
        if let Some(d) = &self.description {
            validate_description(d)?;
        }
        if let Some(l) = &self.link {
            validate_link(l)?;
        }
        Ok(())
    }
}

/// Partial update. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub link: Option<Option<String>>,
}

impl ProjectPatch {
    /// An empty string for `description` or `link` means "clear it".
    pub fn normalized(name: Option<&str>, description: Option<&str>, link: Option<&str>) -> Self {
        Self {
            name: name.map(|n| n.trim().to_string()),
            description: description.map(|d| non_blank(Some(d))),
            link: link.map(|l| non_blank(Some(l))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.link.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("Nothing to update".to_string());
        }
        if let Some(n) = &self.name {
            validate_name(n)?;
        }
        if let Some(Some(d)) = &self.description {
            validate_description(d)?;
        }
        if let Some(Some(l)) = &self.link {
            validate_link(l)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if let Some(n) = &self.name {
            body.insert("name".into(), n.clone().into());
        }
        if let Some(d) = &self.description {
            body.insert("description".into(), d.clone().into());
        }
        if let Some(l) = &self.link {
            body.insert("link".into(), l.clone().into());
        }
        serde_json::Value::Object(body)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Project name must be at most {} characters", MAX_NAME_LEN));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        ));
    }
    Ok(())
}

/// Absolute http(s) URL, bounded length.
pub fn validate_link(link: &str) -> Result<(), String> {
    if link.len() > MAX_LINK_LEN {
        return Err(format!("Link must be at most {} characters", MAX_LINK_LEN));
    }
    match Url::parse(link) {
        Ok(u) if matches!(u.scheme(), "http" | "https") && u.host().is_some() => Ok(()),
        _ => Err(format!("Invalid link: {}", link)),
    }
}
