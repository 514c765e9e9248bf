//! Download orchestration state machine.
//!
//! `reduce` is a pure transition function over [`OrchestrationState`]. It never
//! performs I/O; side effects are requested through the returned [`Command`] and
//! their results come back in as further [`OrchestratorEvent`]s.

use bytes::Bytes;

use crate::domain::{
    AppError, DownloadOutcome, DownloadPhase, DownloadRequest, OrchestrationState,
    TransportFailure,
};

const EMPTY_LINK: &str = "empty link";

#[derive(Debug, Clone)]
pub enum OrchestratorEvent {
    Submit(DownloadRequest),
    ResponseOk(Bytes),
    ResponseFailed(TransportFailure),
    Pasted,
    ClipboardDenied(String),
    /// Any user action that clears a settled status.
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Issue(DownloadRequest),
    Save { payload: Bytes, file_name: String },
}

/// Local guard run before any network call is issued.
pub fn validate(request: &DownloadRequest) -> Result<(), AppError> {
    if request.link.trim().is_empty() {
        return Err(AppError::InputRejected(EMPTY_LINK.to_string()));
    }
    Ok(())
}

pub fn reduce(
    state: &OrchestrationState,
    pending: Option<&DownloadRequest>,
    event: OrchestratorEvent,
) -> (OrchestrationState, Command) {
    match (state.phase, event) {
        (DownloadPhase::InFlight, OrchestratorEvent::Submit(_)) => {
            tracing::warn!("submit ignored, a request is already in flight");
            (state.clone(), Command::None)
        }
        (_, OrchestratorEvent::Submit(request)) => match validate(&request) {
            Err(AppError::InputRejected(reason)) => (
                OrchestrationState {
                    phase: DownloadPhase::Idle,
                    last_outcome: Some(DownloadOutcome::Rejected(reason)),
                },
                Command::None,
            ),
            Err(other) => (
                OrchestrationState {
                    phase: DownloadPhase::Idle,
                    last_outcome: Some(DownloadOutcome::Rejected(other.to_string())),
                },
                Command::None,
            ),
            Ok(()) => (
                OrchestrationState {
                    phase: DownloadPhase::InFlight,
                    last_outcome: None,
                },
                Command::Issue(request),
            ),
        },
        (DownloadPhase::InFlight, OrchestratorEvent::ResponseOk(payload)) => {
            let Some(request) = pending else {
                tracing::warn!("response arrived without the request that issued it");
                return (state.clone(), Command::None);
            };
            let file_name = request.format.file_name().to_string();
            (
                OrchestrationState {
                    phase: DownloadPhase::Settled,
                    last_outcome: Some(DownloadOutcome::Success {
                        payload: payload.clone(),
                        file_name: file_name.clone(),
                    }),
                },
                Command::Save { payload, file_name },
            )
        }
        (DownloadPhase::InFlight, OrchestratorEvent::ResponseFailed(failure)) => (
            OrchestrationState {
                phase: DownloadPhase::Settled,
                last_outcome: Some(DownloadOutcome::TransportFailure(failure)),
            },
            Command::None,
        ),
        (_, OrchestratorEvent::ResponseOk(_)) | (_, OrchestratorEvent::ResponseFailed(_)) => {
            tracing::warn!(phase = ?state.phase, "response arrived with no request in flight");
            (state.clone(), Command::None)
        }
        (DownloadPhase::InFlight, OrchestratorEvent::Pasted)
        | (DownloadPhase::InFlight, OrchestratorEvent::ClipboardDenied(_))
        | (DownloadPhase::InFlight, OrchestratorEvent::Dismiss) => (state.clone(), Command::None),
        (_, OrchestratorEvent::ClipboardDenied(detail)) => (
            OrchestrationState {
                phase: DownloadPhase::Settled,
                last_outcome: Some(DownloadOutcome::PermissionDenied(detail)),
            },
            Command::None,
        ),
        (_, OrchestratorEvent::Pasted) | (_, OrchestratorEvent::Dismiss) => {
            (OrchestrationState::default(), Command::None)
        }
    }
}

/// Sole owner of the orchestration state.
#[derive(Debug, Default)]
pub struct DownloadOrchestrator {
    state: OrchestrationState,
    pending: Option<DownloadRequest>,
}

impl DownloadOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OrchestrationState {
        &self.state
    }

    pub fn dispatch(&mut self, event: OrchestratorEvent) -> Command {
        let (mut next, command) = reduce(&self.state, self.pending.as_ref(), event);

        // The save command owns the payload from here; the settled state keeps only the name.
        if let (
            Command::Save { .. },
            Some(DownloadOutcome::Success { payload, .. }),
        ) = (&command, next.last_outcome.as_mut())
        {
            *payload = Bytes::new();
        }

        if next.phase != self.state.phase {
            tracing::info!(from = ?self.state.phase, to = ?next.phase, "orchestration transition");
        }
        match &command {
            Command::Issue(request) => self.pending = Some(request.clone()),
            _ if next.phase != DownloadPhase::InFlight => self.pending = None,
            _ => {}
        }

        self.state = next;
        command
    }
}
