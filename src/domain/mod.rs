pub mod error;
pub mod model;
pub mod quality;

pub use error::AppError;
pub use model::{
    DownloadOutcome, DownloadPhase, DownloadRequest, MediaFormat, OrchestrationState,
    TransportFailure,
};
pub use quality::derive_quality;
