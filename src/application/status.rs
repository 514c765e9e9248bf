use crate::domain::{DownloadOutcome, DownloadPhase, OrchestrationState, TransportFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub category: StatusCategory,
}

impl StatusLine {
    fn new(text: &str, category: StatusCategory) -> Self {
        Self {
            text: text.to_string(),
            category,
        }
    }
}

pub fn present(outcome: &DownloadOutcome) -> StatusLine {
    match outcome {
        DownloadOutcome::Success { .. } => {
            StatusLine::new("Download complete.", StatusCategory::Success)
        }
        DownloadOutcome::Rejected(_) => {
            StatusLine::new("Please enter a valid YouTube URL.", StatusCategory::Error)
        }
        DownloadOutcome::TransportFailure(TransportFailure::Status(_)) => {
            StatusLine::new("Download failed. Please try again.", StatusCategory::Error)
        }
        DownloadOutcome::TransportFailure(TransportFailure::Network(_)) => {
            StatusLine::new("Something went wrong. Try again.", StatusCategory::Error)
        }
        DownloadOutcome::PermissionDenied(_) => StatusLine::new(
            "Clipboard access denied. Please paste manually.",
            StatusCategory::Error,
        ),
    }
}

/// Status line for the whole state; `None` means nothing to show.
pub fn present_state(state: &OrchestrationState) -> Option<StatusLine> {
    if state.phase == DownloadPhase::InFlight {
        return Some(StatusLine::new("Download started...", StatusCategory::Info));
    }
    state.last_outcome.as_ref().map(present)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_every_outcome_has_a_category() {
        let cases = [
            (
                DownloadOutcome::Success {
                    payload: Bytes::new(),
                    file_name: "video.mp4".to_string(),
                },
                StatusCategory::Success,
            ),
            (
                DownloadOutcome::Rejected("empty link".to_string()),
                StatusCategory::Error,
            ),
            (
                DownloadOutcome::TransportFailure(TransportFailure::Status(503)),
                StatusCategory::Error,
            ),
            (
                DownloadOutcome::TransportFailure(TransportFailure::Network("reset".to_string())),
                StatusCategory::Error,
            ),
            (
                DownloadOutcome::PermissionDenied("denied".to_string()),
                StatusCategory::Error,
            ),
        ];
        for (outcome, category) in cases {
            let line = present(&outcome);
            assert_eq!(line.category, category);
            assert!(!line.text.is_empty());
        }
    }

    #[test]
    fn test_state_presentation() {
        assert_eq!(present_state(&OrchestrationState::default()), None);

        let in_flight = OrchestrationState {
            phase: DownloadPhase::InFlight,
            last_outcome: None,
        };
        assert_eq!(
            present_state(&in_flight).map(|line| line.category),
            Some(StatusCategory::Info)
        );
    }
}
