use std::fmt;

use bytes::Bytes;

const VIDEO_QUALITIES: &[&str] = &["best", "1080p", "720p", "480p", "360p"];
const AUDIO_QUALITIES: &[&str] = &["320k", "256k", "192k", "128k", "64k"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFormat {
    #[default]
    Video,
    Audio,
}

impl MediaFormat {
    pub const ALL: [MediaFormat; 2] = [MediaFormat::Video, MediaFormat::Audio];

    /// Value sent in the `format` query parameter.
    pub fn wire_value(self) -> &'static str {
        match self {
            MediaFormat::Video => "mp4",
            MediaFormat::Audio => "mp3",
        }
    }

    /// Ordered quality set; the first entry is the default.
    pub fn qualities(self) -> &'static [&'static str] {
        match self {
            MediaFormat::Video => VIDEO_QUALITIES,
            MediaFormat::Audio => AUDIO_QUALITIES,
        }
    }

    pub fn default_quality(self) -> &'static str {
        self.qualities()[0]
    }

    pub fn accepts(self, quality: &str) -> bool {
        self.qualities().contains(&quality)
    }

    /// File name for a saved payload. Never taken from the server.
    pub fn file_name(self) -> &'static str {
        match self {
            MediaFormat::Video => "video.mp4",
            MediaFormat::Audio => "audio.mp3",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaFormat::Video => write!(f, "MP4 (Video)"),
            MediaFormat::Audio => write!(f, "MP3 (Audio)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub link: String,
    pub format: MediaFormat,
    pub quality: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The request never completed: connect, body or timeout errors.
    Network(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Status(code) => write!(f, "endpoint returned status {}", code),
            TransportFailure::Network(detail) => write!(f, "{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success { payload: Bytes, file_name: String },
    Rejected(String),
    TransportFailure(TransportFailure),
    PermissionDenied(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadPhase {
    #[default]
    Idle,
    InFlight,
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrchestrationState {
    pub phase: DownloadPhase,
    pub last_outcome: Option<DownloadOutcome>,
}

impl OrchestrationState {
    pub fn is_in_flight(&self) -> bool {
        self.phase == DownloadPhase::InFlight
    }
}
