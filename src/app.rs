use std::path::PathBuf;

use iced::Task;

use crate::application::{
    clipboard::read_clipboard_text, status::present_state, Command, DownloadCoordinator,
    DownloadEvent, DownloadOrchestrator, OrchestratorEvent,
};
use crate::domain::{AppError, DownloadPhase};
use crate::ui::{DownloadMessage, DownloadView};

pub struct DownloadApp {
    view: DownloadView,
    orchestrator: DownloadOrchestrator,
    coordinator: DownloadCoordinator,
}

impl DownloadApp {
    pub fn new(coordinator: DownloadCoordinator) -> Self {
        Self {
            view: DownloadView::default(),
            orchestrator: DownloadOrchestrator::new(),
            coordinator,
        }
    }

    fn dispatch(&mut self, event: OrchestratorEvent) -> Task<Message> {
        let command = self.orchestrator.dispatch(event);
        self.run(command)
    }

    fn run(&mut self, command: Command) -> Task<Message> {
        match command {
            Command::None => Task::none(),
            Command::Issue(request) => {
                self.view.download_progress = 0.0;
                self.view.save_note = None;
                Task::stream(self.coordinator.fetch_stream(request)).map(Message::Download)
            }
            Command::Save { payload, file_name } => {
                let coordinator = self.coordinator.clone();
                Task::perform(
                    async move { coordinator.save(payload, file_name).await },
                    Message::SaveFinished,
                )
            }
        }
    }

    fn refresh(&mut self) {
        let state = self.orchestrator.state();
        self.view.is_downloading = state.is_in_flight();
        self.view.status = present_state(state);
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    ClipboardRead(Result<String, AppError>),
    Download(DownloadEvent),
    /// Saved path, or `None` when the save dialog was dismissed
    SaveFinished(Result<Option<PathBuf>, AppError>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    let task = match message {
        Message::UiMessage(DownloadMessage::DownloadPressed) => {
            let request = app.view.form.snapshot();
            app.dispatch(OrchestratorEvent::Submit(request))
        }
        Message::UiMessage(DownloadMessage::PastePressed) => {
            if app.orchestrator.state().is_in_flight() {
                Task::none()
            } else {
                read_clipboard_text().map(Message::ClipboardRead)
            }
        }
        Message::UiMessage(ui_msg) => {
            if app.orchestrator.state().is_in_flight() {
                Task::none()
            } else {
                app.view.update(ui_msg);
                if app.orchestrator.state().phase == DownloadPhase::Settled {
                    app.dispatch(OrchestratorEvent::Dismiss)
                } else {
                    Task::none()
                }
            }
        }
        Message::ClipboardRead(Ok(text)) => {
            if !app.orchestrator.state().is_in_flight() {
                app.view.form.set_link(&text);
            }
            app.dispatch(OrchestratorEvent::Pasted)
        }
        Message::ClipboardRead(Err(err)) => {
            tracing::warn!(error = %err, "clipboard read refused");
            let detail = match err {
                AppError::PermissionDenied(detail) => detail,
                other => other.to_string(),
            };
            app.dispatch(OrchestratorEvent::ClipboardDenied(detail))
        }
        Message::Download(DownloadEvent::Progress(progress)) => {
            app.view.download_progress = progress;
            Task::none()
        }
        Message::Download(DownloadEvent::Finished(Ok(payload))) => {
            app.dispatch(OrchestratorEvent::ResponseOk(payload))
        }
        Message::Download(DownloadEvent::Finished(Err(failure))) => {
            tracing::warn!(%failure, "download settled with transport failure");
            app.dispatch(OrchestratorEvent::ResponseFailed(failure))
        }
        Message::SaveFinished(result) => {
            app.view.save_note = match result {
                Ok(Some(path)) => Some(format!("Saved: {}", path.display())),
                Ok(None) => Some("Save cancelled".to_string()),
                Err(e) => {
                    tracing::warn!(error = %e, "saving payload failed");
                    Some(format!("Could not save file: {}", e))
                }
            };
            Task::none()
        }
    };

    app.refresh();
    task
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
