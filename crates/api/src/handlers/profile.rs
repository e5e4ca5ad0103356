//! Handlers for the about/contact profile and the resume download.

use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use folio_core::encoding::{encode_pdf, DataUrl};
use folio_core::error::CoreError;
use folio_db::models::profile::{dedupe_social_links, Profile, SocialLink};
use folio_db::repositories::ProfileRepo;
use folio_db::{to_fields, Fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::{compress_images, decode_image_data_url, read_file_field};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// File name offered for the resume download.
pub const RESUME_FILE_NAME: &str = "Resume.pdf";

/// Partial profile update. Absent fields are left as stored; `experience`
/// merges key by key.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<ExperienceUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<Vec<SocialLink>>,
    /// A plain resume link. Uploaded PDFs go through `PUT /admin/about/cv`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
    /// New profile picture as an image data URL; `""` removes it.
    #[serde(skip_serializing)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ExperienceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clients: Option<String>,
}

/// A resume link the download can redirect to: an absolute http(s) URL made
/// of printable ASCII only.
fn is_resume_link(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
        && url.chars().all(|c| c.is_ascii_graphic())
}

impl ProfileUpdate {
    /// Clean list fields and check the resume link. An empty `cvUrl`
    /// clears the link.
    fn normalized(mut self) -> AppResult<Self> {
        if let Some(skills) = self.skills.take() {
            self.skills = Some(
                skills
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }
        self.social_links = self.social_links.take().map(dedupe_social_links);
        self.cv_url = self.cv_url.take().map(|u| u.trim().to_string());
        if let Some(url) = self.cv_url.as_deref() {
            if !url.is_empty() && !is_resume_link(url) {
                return Err(AppError::Core(CoreError::Validation(
                    "Resume link must be an http or https URL".into(),
                )));
            }
        }
        Ok(self)
    }
}

/// GET /api/v1/about
///
/// The stored profile, or placeholder copy before the first save.
pub async fn get_about(State(state): State<AppState>) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::get(state.store())
        .await?
        .unwrap_or_else(Profile::placeholder);
    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/admin/about
pub async fn update_about(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let update = update.normalized()?;
    let mut fields: Fields = to_fields(&update)?;

    match update.profile_image.as_deref().map(str::trim) {
        None => {}
        Some("") => {
            fields.insert("profileImageUrl".into(), Value::Null);
        }
        Some(data_url) => {
            let bytes = decode_image_data_url(data_url)?;
            let url = compress_images(vec![bytes])
                .await?
                .pop()
                .ok_or_else(|| AppError::InternalError("Compression returned no image".into()))?;
            fields.insert("profileImageUrl".into(), Value::String(url));
        }
    }

    let profile = ProfileRepo::merge(state.store(), fields).await?;
    tracing::info!("Profile updated");
    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/admin/about/cv
///
/// Accepts a multipart PDF `file` and stores it inline as `cvUrl`.
pub async fn upload_cv(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Profile>>> {
    let file = read_file_field(multipart).await?;
    let url = encode_pdf(&file.bytes, &file.content_type)?;

    let mut fields = Fields::new();
    fields.insert("cvUrl".into(), Value::String(url));
    let profile = ProfileRepo::merge(state.store(), fields).await?;
    tracing::info!(bytes = file.bytes.len(), "Resume uploaded");
    Ok(Json(DataResponse::new(profile)))
}

/// DELETE /api/v1/admin/about/cv
pub async fn delete_cv(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<StatusCode> {
    let mut fields = Fields::new();
    fields.insert("cvUrl".into(), Value::Null);
    ProfileRepo::merge(state.store(), fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/resume
///
/// Streams an uploaded PDF as an attachment, redirects to a linked one, or
/// answers 404 when neither is set.
pub async fn download_resume(State(state): State<AppState>) -> AppResult<Response> {
    let cv_url = ProfileRepo::get(state.store())
        .await?
        .and_then(|p| p.cv_url)
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::NotFound("No resume has been uploaded".into()))?;

    if !DataUrl::is_data_url(&cv_url) {
        if !is_resume_link(&cv_url) {
            tracing::warn!("Stored resume link is not a usable URL");
            return Err(AppError::NotFound("No resume has been uploaded".into()));
        }
        return Ok(Redirect::temporary(&cv_url).into_response());
    }

    let pdf = DataUrl::parse(&cv_url)?;
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, pdf.mime)
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{RESUME_FILE_NAME}\""),
        )
        .body(Body::from(pdf.data))
        .map_err(|e| AppError::InternalError(format!("Failed to build resume response: {e}")))
}
