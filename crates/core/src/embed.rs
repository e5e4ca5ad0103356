//! Conversion of shared video links into embeddable player URLs.

use std::sync::LazyLock;

use regex::Regex;

static DIRECT_VIDEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|webm|ogg|mov)$").expect("valid regex"));

/// Whether `url` points straight at a video file.
pub fn is_direct_video(url: &str) -> bool {
    DIRECT_VIDEO_RE.is_match(url)
}

/// Map a video link to the URL a player iframe (or `<video>`) should load.
///
/// Returns `None` for empty input, or when a YouTube/Vimeo link carries no
/// video id. Unknown hosts pass through unchanged.
pub fn embed_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if url.contains("youtube.com") || url.contains("youtu.be") {
        let id = if url.contains("youtu.be") {
            segment_after(url, "youtu.be/", &['?'])
        } else {
            segment_after(url, "v=", &['&'])
        };
        return id.map(|id| format!("https://www.youtube.com/embed/{id}?autoplay=1&loop=1&playlist={id}"));
    }

    if url.contains("vimeo.com") {
        return segment_after(url, "vimeo.com/", &['?'])
            .map(|id| format!("https://player.vimeo.com/video/{id}?autoplay=1&loop=1"));
    }

    if url.contains("instagram.com") {
        return Some(format!("{url}embed/"));
    }

    if url.contains("tiktok.com") {
        return Some(url.replace("/video/", "/embed/"));
    }

    if url.contains("facebook.com") || url.contains("fb.watch") {
        return Some(format!(
            "https://www.facebook.com/plugins/video.php?href={}&show_text=false&autoplay=true",
            encode_uri_component(url)
        ));
    }

    Some(url.to_string())
}

/// Text following the first `marker`, cut at the first terminator.
fn segment_after<'a>(url: &'a str, marker: &str, terminators: &[char]) -> Option<&'a str> {
    let (_, rest) = url.split_once(marker)?;
    let id = rest.split(terminators).next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

/// Percent-encode everything outside the URI-component unreserved set.
fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
