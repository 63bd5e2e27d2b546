//! YouTube player helpers.
//!
//! Playback happens in an embedded web view; all we produce is the URL it
//! loads, plus parsing of the links parents paste in.

use url::Url;

/// Query parameters for the kid-safe embedded player
const EMBED_PARAMS: &[(&str, &str)] = &[
    ("autoplay", "1"),
    ("rel", "0"),
    ("playsinline", "0"),
    ("enablejsapi", "1"),
    ("disablekb", "1"),
    ("loop", "0"),
    ("controls", "0"),
    ("modestbranding", "1"),
    ("iv_load_policy", "3"),
    ("color", "white"),
    ("fs", "1"),
    ("origin", "*"),
];

/// Length of a YouTube video id
pub const VIDEO_ID_LEN: usize = 11;

/// Build the embed URL for a YouTube video id
pub fn embed_url(video_id: &str) -> String {
    let query = EMBED_PARAMS
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    format!("https://www.youtube.com/embed/{}?{}", video_id, query)
}

/// Default thumbnail URL for a YouTube video id
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// Check whether a string looks like a bare YouTube video id
pub fn is_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Hosts that serve `watch?v=`, `/embed/`, `/shorts/` and `/v/` links
const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com"];

/// Host of `youtu.be/<id>` short links
const SHORT_HOST: &str = "youtu.be";

/// Extract the video id from a bare id or a YouTube URL
///
/// Supports `watch?v=`, `youtu.be/`, `/embed/`, `/shorts/` and `/v/` links.
/// A missing scheme is treated as `https`.
pub fn parse_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if is_video_id(input) {
        return Some(input.to_string());
    }

    let url = if input.contains("://") {
        Url::parse(input).ok()?
    } else {
        Url::parse(&format!("https://{}", input)).ok()?
    };
    let host = url.host_str()?;

    let candidate = if host.eq_ignore_ascii_case(SHORT_HOST) {
        url.path_segments()?.next().map(str::to_string)
    } else if YOUTUBE_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)) {
        let mut segments = url.path_segments()?;
        match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            "embed" | "shorts" | "v" => segments.next().map(str::to_string),
            _ => None,
        }
    } else {
        None
    };

    candidate.filter(|id| is_video_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_url_parameters() {
        let url = embed_url("dQw4w9WgXcQ");

        assert!(url.starts_with("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&"));
        assert!(url.contains("&controls=0&"));
        assert!(url.contains("&iv_load_policy=3&"));
        assert!(url.ends_with("&origin=*"));
    }

    #[test]
    fn test_parse_video_id_variants() {
        let expected = Some("dQw4w9WgXcQ".to_string());

        assert_eq!(parse_video_id("dQw4w9WgXcQ"), expected);
        assert_eq!(parse_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(
            parse_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42"),
            expected
        );
        assert_eq!(parse_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"), expected);
        assert_eq!(parse_video_id("youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(parse_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"), expected);
        assert_eq!(parse_video_id("https://m.youtube.com/v/dQw4w9WgXcQ"), expected);
        // Hosts are matched regardless of case
        assert_eq!(parse_video_id("https://YOUTU.BE/dQw4w9WgXcQ"), expected);
        assert_eq!(parse_video_id("https://WWW.YouTube.com/watch?v=dQw4w9WgXcQ"), expected);
    }

    #[test]
    fn test_parse_video_id_rejects_other_input() {
        assert!(parse_video_id("https://example.com/watch?v=dQw4w9WgXcQ").is_none());
        assert!(parse_video_id("https://www.youtube.com/watch?v=short").is_none());
        assert!(parse_video_id("not a video").is_none());
        // Lookalike hosts
        assert!(parse_video_id("https://notyoutube.com/watch?v=dQw4w9WgXcQ").is_none());
        assert!(parse_video_id("https://youtu.be.example.com/dQw4w9WgXcQ").is_none());
        // "youtube.com" outside the host does not count
        assert!(parse_video_id("https://example.com/watch?ref=youtube.com&v=dQw4w9WgXcQ").is_none());
        assert!(parse_video_id("https://www.youtube.com/channel/dQw4w9WgXcQ").is_none());
    }

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(
            thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }
}
