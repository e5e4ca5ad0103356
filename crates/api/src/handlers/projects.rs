//! Handlers for portfolio projects: the public grid and detail page, and
//! admin create/update/delete with image assembly.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::embed::embed_url;
use folio_core::error::CoreError;
use folio_core::project::{
    arrange_images, check_image_count, normalize_tech_stack, resolve_links, LinkKind,
};
use folio_db::models::project::{Project, ProjectInput};
use folio_db::repositories::project_repo::ALL_CATEGORIES;
use folio_db::repositories::ProjectRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::services::services_or_defaults;
use crate::handlers::uploads::{compress_images, decode_image_data_url};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many same-category projects the detail page shows.
const RELATED_LIMIT: usize = 3;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub category: Option<String>,
}

/// A project with what the detail page needs around it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    /// Embeddable form of `videoUrl`, when there is one.
    pub embed_url: Option<String>,
    pub related: Vec<Project>,
}

/// Everything the portfolio grid renders.
#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    /// `"All"` followed by every service title.
    pub categories: Vec<String>,
    pub projects: Vec<Project>,
}

/// Body of project create and edit.
///
/// `newImages` are image data URLs; they are recompressed before storage.
/// On edit, omitting `existingImages` keeps the stored images.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub existing_images: Option<Vec<String>>,
    #[serde(default)]
    pub new_images: Vec<String>,
    #[serde(default)]
    pub thumbnail_index: usize,
    #[serde(default)]
    pub link_type: LinkKind,
    #[serde(default)]
    pub link: Option<String>,
}

impl ProjectPayload {
    fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.category = self.category.trim().to_string();
        self.description = self.description.trim().to_string();
        self.full_description = self.full_description.trim().to_string();
        self
    }
}

/// Validate the payload, compress new images and assemble the stored fields.
async fn build_input(payload: ProjectPayload, kept: Vec<String>) -> AppResult<ProjectInput> {
    let payload = payload.trimmed();
    payload.validate()?;
    check_image_count(kept.len(), payload.new_images.len())?;

    let uploads = payload
        .new_images
        .iter()
        .map(|image| decode_image_data_url(image))
        .collect::<AppResult<Vec<_>>>()?;
    let compressed = compress_images(uploads).await?;

    let image_urls = arrange_images(kept, compressed, payload.thumbnail_index)?;
    let links = resolve_links(payload.link_type, payload.link.as_deref());

    Ok(ProjectInput {
        title: payload.title,
        category: payload.category,
        description: payload.description,
        full_description: payload.full_description,
        tech_stack: normalize_tech_stack(payload.tech_stack),
        image_url: image_urls.first().cloned().unwrap_or_default(),
        image_urls,
        project_url: links.project_url,
        video_url: links.video_url,
    })
}

// ---------------------------------------------------------------------------
// Public handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects?category=
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(state.store(), query.category.as_deref()).await?;
    Ok(Json(DataResponse::new(projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_by_id(state.store(), &id).await?;
    let related = ProjectRepo::related(state.store(), &project, RELATED_LIMIT).await?;
    let embed_url = project.video_url.as_deref().and_then(embed_url);

    Ok(Json(DataResponse::new(ProjectDetail {
        project,
        embed_url,
        related,
    })))
}

/// GET /api/v1/portfolio
pub async fn portfolio(State(state): State<AppState>) -> AppResult<Json<DataResponse<PortfolioResponse>>> {
    let services = services_or_defaults(state.store()).await?;
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for service in services {
        if !categories.contains(&service.title) {
            categories.push(service.title);
        }
    }
    let projects = ProjectRepo::list(state.store(), None).await?;

    Ok(Json(DataResponse::new(PortfolioResponse {
        categories,
        projects,
    })))
}

// ---------------------------------------------------------------------------
// Admin handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/projects
pub async fn create_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(payload): Json<ProjectPayload>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let kept = payload.existing_images.clone().unwrap_or_default();
    let input = build_input(payload, kept).await?;
    let project = ProjectRepo::create(state.store(), &input).await?;
    tracing::info!(id = %project.id, images = project.image_urls.len(), "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(project))))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    Json(payload): Json<ProjectPayload>,
) -> AppResult<Json<DataResponse<Project>>> {
    let current = ProjectRepo::find_by_id(state.store(), &id).await?;
    let kept = payload
        .existing_images
        .clone()
        .unwrap_or(current.image_urls);
    let input = build_input(payload, kept).await?;
    let project = ProjectRepo::update(state.store(), &id, &input).await?;
    tracing::info!(id = %project.id, images = project.image_urls.len(), "Project updated");
    Ok(Json(DataResponse::new(project)))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    if !ProjectRepo::delete(state.store(), &id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "project",
            id,
        }));
    }
    tracing::info!(%id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn payload(value: serde_json::Value) -> ProjectPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn blank_title_is_rejected_after_trimming() {
        let err = build_input(
            payload(json!({"title": "  ", "category": "Web", "description": "d"})),
            Vec::new(),
        )
        .await
        .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(m)) if m == "Title is required");
    }

    #[tokio::test]
    async fn video_link_clears_project_url_and_kept_images_stay() {
        let input = build_input(
            payload(json!({
                "title": "Reel",
                "category": "Video Editing",
                "description": "Showreel",
                "techStack": [" Premiere ", "", "Premiere"],
                "thumbnailIndex": 1,
                "linkType": "video",
                "link": " https://youtu.be/abc "
            })),
            vec!["data:image/jpeg;base64,AA==".into(), "data:image/jpeg;base64,BB==".into()],
        )
        .await
        .unwrap();

        assert_eq!(input.tech_stack, vec!["Premiere".to_string()]);
        assert_eq!(input.image_urls[0], "data:image/jpeg;base64,BB==");
        assert_eq!(input.image_url, input.image_urls[0]);
        assert_eq!(input.project_url, None);
        assert_eq!(input.video_url.as_deref(), Some("https://youtu.be/abc"));
    }

    #[tokio::test]
    async fn too_many_new_images_are_rejected() {
        let images: Vec<String> = (0..6).map(|_| "data:image/png;base64,AA==".to_string()).collect();
        let err = build_input(
            payload(json!({"title": "t", "category": "c", "description": "d", "newImages": images})),
            Vec::new(),
        )
        .await
        .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(m)) if m == "Maximum 5 images allowed");
    }

    #[tokio::test]
    async fn kept_images_count_toward_the_limit() {
        let kept: Vec<String> = (0..4).map(|i| format!("data:image/jpeg;base64,{i}A==")).collect();
        let err = build_input(
            payload(json!({
                "title": "t",
                "category": "c",
                "description": "d",
                "newImages": ["data:image/png;base64,AA==", "data:image/png;base64,AA=="]
            })),
            kept,
        )
        .await
        .unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::Validation(m)) if m == "Maximum 5 images allowed");
    }
}
