pub mod clipboard;
pub mod delivery;
pub mod download_coordinator;
pub mod orchestrator;
pub mod status;

pub use download_coordinator::{DownloadCoordinator, DownloadEvent};
pub use orchestrator::{Command, DownloadOrchestrator, OrchestratorEvent};
