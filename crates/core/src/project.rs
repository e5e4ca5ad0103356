//! Assembly rules for project payloads written by the dashboard.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of images a project holds, kept and new together.
pub const MAX_IMAGES: usize = 5;

/// Upper bound on the summed length of every stored image string.
pub const MAX_TOTAL_IMAGE_LEN: usize = 900_000;

/// Which link a project shows: a live project or a video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    #[default]
    Project,
    Video,
}

/// The resolved pair of link fields; exactly one side may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLinks {
    pub project_url: Option<String>,
    pub video_url: Option<String>,
}

/// Route a single URL to `projectUrl` or `videoUrl`, clearing the other.
pub fn resolve_links(kind: LinkKind, url: Option<&str>) -> ProjectLinks {
    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    match kind {
        LinkKind::Project => ProjectLinks {
            project_url: url,
            video_url: None,
        },
        LinkKind::Video => ProjectLinks {
            project_url: None,
            video_url: url,
        },
    }
}

/// Checked before any new image is decoded, so an over-full edit is
/// rejected without compressing anything.
pub fn check_image_count(kept: usize, new: usize) -> Result<(), CoreError> {
    if kept.saturating_add(new) > MAX_IMAGES {
        return Err(CoreError::Validation(format!(
            "Maximum {MAX_IMAGES} images allowed"
        )));
    }
    Ok(())
}

/// Combine kept and newly compressed images, move the thumbnail to the
/// front, and enforce the total size bound.
///
/// `thumbnail_index` indexes the combined list (kept images first).
pub fn arrange_images(
    existing: Vec<String>,
    new: Vec<String>,
    thumbnail_index: usize,
) -> Result<Vec<String>, CoreError> {
    let mut images = existing;
    images.extend(new);

    if !images.is_empty() {
        if thumbnail_index >= images.len() {
            return Err(CoreError::Validation(format!(
                "Thumbnail index {thumbnail_index} is out of range for {} images",
                images.len()
            )));
        }
        let thumbnail = images.remove(thumbnail_index);
        images.insert(0, thumbnail);
    }

    let total: usize = images.iter().map(String::len).sum();
    if total > MAX_TOTAL_IMAGE_LEN {
        return Err(CoreError::Validation(
            "Total image size is too large. Please reduce the number of images or their quality."
                .into(),
        ));
    }

    Ok(images)
}

/// Trim entries, drop blanks and keep only the first occurrence of each.
pub fn normalize_tech_stack(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let trimmed = item.trim();
        if !trimmed.is_empty() && !out.iter().any(|existing| existing == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}
