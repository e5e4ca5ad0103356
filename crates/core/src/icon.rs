//! Keyword based icon detection for service and project titles.
//!
//! The keyword table is ordered and evaluated first-match-wins, so a title
//! containing several keywords resolves to whichever keyword appears first
//! in [`ICON_KEYWORDS`] (e.g. "Web App" hits `web` before `app`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Every icon the keyword table can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    Code,
    Palette,
    Smartphone,
    Video,
    Film,
    Camera,
    Music,
    Briefcase,
    Image,
    Globe,
    Monitor,
}

impl Icon {
    /// Collapse onto the four icons a service card can render.
    pub fn service_icon_name(self) -> &'static str {
        match self {
            Icon::Palette | Icon::Camera | Icon::Image => "Palette",
            Icon::Smartphone => "Smartphone",
            Icon::Video | Icon::Film | Icon::Music => "Video",
            Icon::Code | Icon::Briefcase | Icon::Globe | Icon::Monitor => "Code",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Icon used when no keyword matches.
pub const DEFAULT_ICON: Icon = Icon::Code;

/// Icon names accepted on a service record.
pub const SERVICE_ICON_NAMES: [&str; 4] = ["Code", "Palette", "Smartphone", "Video"];

/// Ordered keyword table. `website` keeps its first slot (right after
/// `web`) but maps to `Globe`.
pub const ICON_KEYWORDS: &[(&str, Icon)] = &[
    // Design & graphics
    ("design", Icon::Palette),
    ("graphic", Icon::Palette),
    ("logo", Icon::Palette),
    ("brand", Icon::Palette),
    ("illustration", Icon::Palette),
    ("ui", Icon::Palette),
    ("ux", Icon::Palette),
    ("photoshop", Icon::Palette),
    ("illustrator", Icon::Palette),
    // Web development
    ("web", Icon::Code),
    ("website", Icon::Globe),
    ("frontend", Icon::Code),
    ("backend", Icon::Code),
    ("react", Icon::Code),
    ("javascript", Icon::Code),
    ("html", Icon::Code),
    ("css", Icon::Code),
    ("node", Icon::Code),
    ("api", Icon::Code),
    ("full stack", Icon::Code),
    // App development
    ("app", Icon::Smartphone),
    ("mobile", Icon::Smartphone),
    ("android", Icon::Smartphone),
    ("ios", Icon::Smartphone),
    ("flutter", Icon::Smartphone),
    ("react native", Icon::Smartphone),
    ("app development", Icon::Smartphone),
    // Video & media
    ("video", Icon::Video),
    ("editing", Icon::Video),
    ("film", Icon::Film),
    ("cinema", Icon::Film),
    ("production", Icon::Video),
    ("youtube", Icon::Video),
    ("after effects", Icon::Video),
    ("premiere", Icon::Video),
    ("motion", Icon::Video),
    // Photography
    ("photo", Icon::Camera),
    ("photography", Icon::Camera),
    ("camera", Icon::Camera),
    ("portrait", Icon::Camera),
    // Music & audio
    ("music", Icon::Music),
    ("audio", Icon::Music),
    ("sound", Icon::Music),
    // Other
    ("business", Icon::Briefcase),
    ("portfolio", Icon::Briefcase),
    ("image", Icon::Image),
    ("monitor", Icon::Monitor),
];

/// Detect the icon for a free-text title.
///
/// Matching is a case-insensitive substring test against each keyword in
/// table order. Empty titles and titles without a keyword yield
/// [`DEFAULT_ICON`].
pub fn detect_icon(title: &str) -> Icon {
    let lowered = title.to_lowercase();
    if lowered.trim().is_empty() {
        return DEFAULT_ICON;
    }

    ICON_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

/// Detect the service icon name (`Code`, `Palette`, `Smartphone`, `Video`)
/// for a title.
pub fn detect_icon_name(title: &str) -> &'static str {
    detect_icon(title).service_icon_name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_keyword_maps_to_its_icon() {
        assert_eq!(detect_icon_name("Logo Design"), "Palette");
        assert_eq!(detect_icon_name("Android Apps"), "Smartphone");
        assert_eq!(detect_icon_name("Video Editing"), "Video");
        assert_eq!(detect_icon_name("Backend Services"), "Code");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(detect_icon("GRAPHIC DESIGNING"), Icon::Palette);
        assert_eq!(detect_icon("fLuTtEr"), Icon::Smartphone);
    }

    #[test]
    fn unmatched_title_falls_back_to_code() {
        assert_eq!(detect_icon_name("Untitled Project"), "Code");
        assert_eq!(detect_icon(""), Icon::Code);
        assert_eq!(detect_icon("   "), Icon::Code);
    }

    #[test]
    fn first_keyword_in_table_order_wins() {
        // "web" precedes "app" in the table.
        assert_eq!(detect_icon("Web App"), Icon::Code);
        assert_eq!(detect_icon("App for the Web"), Icon::Code);
        // "design" precedes "video".
        assert_eq!(detect_icon("Video Design"), Icon::Palette);
    }

    #[test]
    fn website_is_shadowed_by_web() {
        assert_eq!(detect_icon("My Website"), Icon::Code);
    }

    #[test]
    fn secondary_icons_collapse_to_service_icons() {
        assert_eq!(detect_icon("Cinema reel"), Icon::Film);
        assert_eq!(detect_icon_name("Cinema reel"), "Video");
        assert_eq!(detect_icon_name("Portrait Photography"), "Palette");
        assert_eq!(detect_icon_name("Sound Mixing"), "Video");
        assert_eq!(detect_icon_name("Business Consulting"), "Code");
        assert_eq!(detect_icon_name("Image Retouching"), "Palette");
        assert_eq!(detect_icon_name("Monitor Calibration"), "Code");
    }

    #[test]
    fn substring_matches_inside_words() {
        // "building" contains "ui".
        assert_eq!(detect_icon("Building things"), Icon::Palette);
    }

    #[test]
    fn every_service_icon_name_is_renderable() {
        for (_, icon) in ICON_KEYWORDS {
            assert!(SERVICE_ICON_NAMES.contains(&icon.service_icon_name()));
        }
    }
}
