use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use regex::Regex;

/// Recognized media hosts, scheme optional, path/query up to the first whitespace.
/// The link must start the text or follow whitespace or an opening quote/bracket,
/// so a host or path that merely contains an allowed name does not match.
#[allow(clippy::expect_used)]
static MEDIA_LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:^|[\s"'(<\[])((?:https?://)?(?:(?:www|m|music)\.)?(?:youtube\.com|youtu\.be)/\S+)"#,
    )
    .expect("media link regex is valid")
});

/// Get current Unix timestamp in milliseconds
pub fn get_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Extract the first recognized media link from pasted text.
///
/// Text without a recognized link is returned unchanged.
pub fn normalize_link(text: &str) -> String {
    MEDIA_LINK_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|link| link.as_str().to_string())
        .unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp() {
        let ts = get_timestamp_millis();
        assert!(ts > 1_700_000_000_000); // Sanity check
    }

    #[test]
    fn test_normalize_extracts_link_from_sentence() {
        assert_eq!(
            normalize_link("check this out https://youtu.be/abc123 thanks"),
            "https://youtu.be/abc123"
        );
    }

    #[test]
    fn test_normalize_without_scheme_and_mixed_case() {
        assert_eq!(
            normalize_link("see WWW.YouTube.com/watch?v=xyz&t=10 now"),
            "WWW.YouTube.com/watch?v=xyz&t=10"
        );
        assert_eq!(normalize_link("m.youtube.com/shorts/q1"), "m.youtube.com/shorts/q1");
    }

    #[test]
    fn test_normalize_returns_first_match() {
        assert_eq!(
            normalize_link("https://youtu.be/one and https://youtu.be/two"),
            "https://youtu.be/one"
        );
    }

    #[test]
    fn test_normalize_passes_through_unrecognized_text() {
        assert_eq!(normalize_link(""), "");
        assert_eq!(normalize_link("just words"), "just words");
        assert_eq!(
            normalize_link("https://vimeo.com/123"),
            "https://vimeo.com/123"
        );
    }

    #[test]
    fn test_normalize_ignores_allowed_names_inside_foreign_links() {
        for input in [
            "https://notyoutube.com/watch?v=1",
            "notyoutube.com/watch?v=1",
            "https://vimeo.com/x/youtu.be/abc",
            "vimeo.com/x/youtu.be/abc",
            "https://evil.example/?next=youtube.com/watch",
        ] {
            assert_eq!(normalize_link(input), input);
        }
    }

    #[test]
    fn test_normalize_after_quote_or_bracket() {
        assert_eq!(
            normalize_link("link: (https://youtu.be/abc)"),
            "https://youtu.be/abc)"
        );
        assert_eq!(
            normalize_link("\"youtube.com/watch?v=q\""),
            "youtube.com/watch?v=q\""
        );
    }

    #[test]
    fn test_normalize_is_idempotent_and_substring() {
        let inputs = [
            "check this out https://youtu.be/abc123 thanks",
            "http://youtube.com/watch?v=1\nsecond line",
            "no link here",
            "  padded  ",
            "music.youtube.com/watch?v=z",
            "https://notyoutube.com/watch?v=1",
            "see (youtu.be/p) here",
        ];
        for input in inputs {
            let once = normalize_link(input);
            assert_eq!(normalize_link(&once), once);
            assert!(input.contains(once.as_str()));
        }
    }
}
