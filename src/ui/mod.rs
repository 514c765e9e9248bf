use iced::{
    widget::{button, column, pick_list, progress_bar, row, text, text_input, Space},
    Element, Length, Theme,
};

use crate::{
    application::status::{StatusCategory, StatusLine},
    domain::{derive_quality, DownloadRequest, MediaFormat},
    utils::normalize_link,
};

/// Input fields owned by the form; the orchestrator only ever sees snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestForm {
    link: String,
    format: MediaFormat,
    quality: String,
}

impl Default for RequestForm {
    fn default() -> Self {
        let format = MediaFormat::default();
        Self {
            link: String::new(),
            format,
            quality: format.default_quality().to_string(),
        }
    }
}

impl RequestForm {
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn format(&self) -> MediaFormat {
        self.format
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    pub fn set_link(&mut self, text: &str) {
        self.link = normalize_link(text);
    }

    pub fn select_format(&mut self, format: MediaFormat) {
        let previous = self.format;
        self.format = format;
        self.quality = derive_quality(format, previous, &self.quality);
    }

    /// Ignores values outside the current format's set.
    pub fn select_quality(&mut self, quality: &str) -> bool {
        if !self.format.accepts(quality) {
            return false;
        }
        self.quality = quality.to_string();
        true
    }

    pub fn snapshot(&self) -> DownloadRequest {
        DownloadRequest {
            link: self.link.clone(),
            format: self.format,
            quality: self.quality.clone(),
        }
    }
}

/// Main view state
#[derive(Default)]
pub struct DownloadView {
    pub form: RequestForm,
    pub status: Option<StatusLine>,
    pub save_note: Option<String>,
    pub is_downloading: bool,
    pub download_progress: f32,
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    LinkChanged(String),
    FormatSelected(MediaFormat),
    QualitySelected(&'static str),
    PastePressed,
    DownloadPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::LinkChanged(text) => self.form.set_link(&text),
            DownloadMessage::FormatSelected(format) => self.form.select_format(format),
            DownloadMessage::QualitySelected(quality) => {
                self.form.select_quality(quality);
            }
            DownloadMessage::PastePressed | DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let idle = !self.is_downloading;
        let format = self.form.format();
        let selected_quality = format
            .qualities()
            .iter()
            .copied()
            .find(|q| *q == self.form.quality());

        let link_input = text_input("Paste your YouTube link...", self.form.link())
            .on_input_maybe(idle.then_some(DownloadMessage::LinkChanged))
            .padding(10);

        let paste = button("Paste")
            .on_press_maybe(idle.then_some(DownloadMessage::PastePressed))
            .padding(10);

        let can_submit = idle && !self.form.link().trim().is_empty();
        let download = button(if self.is_downloading {
            "Downloading..."
        } else {
            "Start Download"
        })
        .on_press_maybe(can_submit.then_some(DownloadMessage::DownloadPressed))
        .padding([10, 20]);

        let mut content = column![
            text("Quick Grab").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("YouTube Video Link").size(16),
            row![link_input, paste].spacing(10),
            row![
                column![
                    text("Format").size(14),
                    pick_list(
                        MediaFormat::ALL,
                        Some(format),
                        DownloadMessage::FormatSelected
                    ),
                ]
                .spacing(5),
                column![
                    text("Quality").size(14),
                    pick_list(
                        format.qualities(),
                        selected_quality,
                        DownloadMessage::QualitySelected
                    ),
                ]
                .spacing(5),
            ]
            .spacing(20),
            Space::new().height(Length::Fixed(10.0)),
            download,
        ]
        .padding(20)
        .spacing(10);

        if self.is_downloading {
            content = content.push(progress_bar(0.0..=1.0, self.download_progress));
        }

        if let Some(status) = &self.status {
            let style: fn(&Theme) -> text::Style = match status.category {
                StatusCategory::Info => text::default,
                StatusCategory::Success => text::success,
                StatusCategory::Error => text::danger,
            };
            content = content.push(text(&status.text).size(14).style(style));
        }

        if let Some(note) = &self.save_note {
            content = content.push(text(note).size(12));
        }

        content.into()
    }
}
