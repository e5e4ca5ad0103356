//! The single `about/profile` document.

use folio_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::lenient::{list, or_default};

/// Headline counters shown in the about section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "or_default")]
    pub years: String,
    #[serde(deserialize_with = "or_default")]
    pub projects: String,
    #[serde(deserialize_with = "or_default")]
    pub clients: String,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            years: "5+".into(),
            projects: "100+".into(),
            clients: "50+".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "or_default")]
    pub platform: String,
    #[serde(deserialize_with = "or_default")]
    pub url: String,
}

/// The about/contact profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(deserialize_with = "or_default")]
    pub text: String,
    #[serde(deserialize_with = "list")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "or_default")]
    pub experience: Experience,
    #[serde(deserialize_with = "or_default")]
    pub email: String,
    #[serde(deserialize_with = "or_default")]
    pub phone: String,
    #[serde(deserialize_with = "or_default")]
    pub location: String,
    #[serde(deserialize_with = "list")]
    pub social_links: Vec<SocialLink>,
    #[serde(deserialize_with = "or_default")]
    pub profile_image_url: Option<String>,
    /// Either a PDF data URL or a plain link.
    #[serde(deserialize_with = "or_default")]
    pub cv_url: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub created_at: Option<Timestamp>,
    #[serde(deserialize_with = "or_default")]
    pub updated_at: Option<Timestamp>,
}

impl Profile {
    /// Served while no profile has been saved yet.
    pub fn placeholder() -> Self {
        Self {
            text: "I am a passionate creative professional with expertise in graphic design, \
                   full-stack development, and video editing. I love turning ideas into reality \
                   through beautiful designs and functional applications."
                .into(),
            skills: vec![
                "Graphic Designing".into(),
                "Web Development".into(),
                "App Development".into(),
                "Video Editing".into(),
            ],
            ..Self::default()
        }
    }
}

/// Keep one link per platform.
///
/// A platform keeps the position of its first occurrence and the URL of its
/// last. Links with a blank URL are dropped.
pub fn dedupe_social_links(links: Vec<SocialLink>) -> Vec<SocialLink> {
    let mut out: Vec<SocialLink> = Vec::with_capacity(links.len());
    for link in links {
        if link.url.trim().is_empty() {
            continue;
        }
        match out.iter_mut().find(|l| l.platform == link.platform) {
            Some(existing) => existing.url = link.url,
            None => out.push(link),
        }
    }
    out
}
