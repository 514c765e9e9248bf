use super::model::MediaFormat;

/// Re-derives the quality after a format change.
///
/// The previous quality survives only when the new format accepts it; otherwise
/// the new format's default is used. Called synchronously on every format change
/// so a cross-format value can never reach a submission.
pub fn derive_quality(
    format: MediaFormat,
    previous_format: MediaFormat,
    previous_quality: &str,
) -> String {
    if format.accepts(previous_quality) {
        return previous_quality.to_string();
    }

    tracing::debug!(
        from = ?previous_format,
        to = ?format,
        stale = previous_quality,
        "resetting quality to format default"
    );
    format.default_quality().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_to_audio_resets_to_first_bitrate() {
        assert_eq!(
            derive_quality(MediaFormat::Audio, MediaFormat::Video, "720p"),
            "320k"
        );
    }

    #[test]
    fn test_audio_to_video_resets_to_best() {
        assert_eq!(
            derive_quality(MediaFormat::Video, MediaFormat::Audio, "128k"),
            "best"
        );
    }

    #[test]
    fn test_same_format_keeps_quality() {
        assert_eq!(
            derive_quality(MediaFormat::Audio, MediaFormat::Audio, "192k"),
            "192k"
        );
    }

    #[test]
    fn test_every_transition_lands_in_valid_set() {
        for from in MediaFormat::ALL {
            for to in MediaFormat::ALL {
                for quality in from.qualities().iter().chain(["", "bogus"].iter()) {
                    let derived = derive_quality(to, from, quality);
                    assert!(to.accepts(&derived), "{:?} -> {:?} gave {}", from, to, derived);
                }
            }
        }
    }
}
