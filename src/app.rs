use chrono::{DateTime, Local, TimeDelta};

use crate::clipboard::MarkdownClipboard;
use crate::controller::{DownloadOutcome, JobController};
use crate::events::JobEvent;
use crate::models::{GenerationRequest, GenerationStatus, Notice, GENRES, TONES};

/// How long a notice stays on the status line.
const NOTICE_TTL_SECS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Genre,
    Topic,
    Description,
    Tone,
    Audience,
}

impl FormField {
    pub const ALL: [Self; 5] = [
        Self::Genre,
        Self::Topic,
        Self::Description,
        Self::Tone,
        Self::Audience,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Topic => "Topic",
            Self::Description => "Description (optional)",
            Self::Tone => "Tone",
            Self::Audience => "Target Audience",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Genre => "Select a genre",
            Self::Topic => "e.g., Building habits for success",
            Self::Description => "Provide additional details about your book...",
            Self::Tone => "Select a tone",
            Self::Audience => "e.g., Young professionals, entrepreneurs",
        }
    }

    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Genre | Self::Tone)
    }

    const fn index(self) -> usize {
        match self {
            Self::Genre => 0,
            Self::Topic => 1,
            Self::Description => 2,
            Self::Tone => 3,
            Self::Audience => 4,
        }
    }

    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorForm {
    pub genre: Option<usize>,
    pub topic: String,
    pub description: String,
    pub tone: Option<usize>,
    pub audience: String,
}

impl GeneratorForm {
    pub fn genre(&self) -> Option<&'static str> {
        self.genre.and_then(|i| GENRES.get(i).copied())
    }

    pub fn tone(&self) -> Option<&'static str> {
        self.tone.and_then(|i| TONES.get(i).copied())
    }

    /// Text shown for a field, `None` when it is still empty.
    pub fn value(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::Genre => return self.genre(),
            FormField::Tone => return self.tone(),
            FormField::Topic => &self.topic,
            FormField::Description => &self.description,
            FormField::Audience => &self.audience,
        };
        (!value.is_empty()).then_some(value.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.genre().is_some() && !self.topic.trim().is_empty()
    }

    pub fn to_request(&self) -> Option<GenerationRequest> {
        let genre = self.genre()?;
        let topic = self.topic.trim();
        if topic.is_empty() {
            return None;
        }

        let description = self.description.trim();
        Some(GenerationRequest {
            genre: genre.to_string(),
            topic: topic.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            tone: self.tone().unwrap_or(TONES[0]).to_string(),
            audience: self.audience.trim().to_string(),
        })
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Topic => Some(&mut self.topic),
            FormField::Description => Some(&mut self.description),
            FormField::Audience => Some(&mut self.audience),
            FormField::Genre | FormField::Tone => None,
        }
    }

    fn cycle(&mut self, field: FormField, forward: bool) {
        let (slot, len) = match field {
            FormField::Genre => (&mut self.genre, GENRES.len()),
            FormField::Tone => (&mut self.tone, TONES.len()),
            _ => return,
        };
        *slot = Some(match (*slot, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
    }
}

pub struct App {
    pub should_quit: bool,
    pub exit_pending: bool,
    pub show_help: bool,
    pub form: GeneratorForm,
    pub focus: FormField,
    pub scroll_offset: usize,
    pub notice: Option<Notice>,
    pub controller: JobController,
    clipboard: Box<dyn MarkdownClipboard>,
}

impl App {
    pub fn new(controller: JobController, clipboard: Box<dyn MarkdownClipboard>) -> Self {
        Self {
            should_quit: false,
            exit_pending: false,
            show_help: false,
            form: GeneratorForm::default(),
            focus: FormField::Genre,
            scroll_offset: 0,
            notice: None,
            controller,
            clipboard,
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn is_generating(&self) -> bool {
        self.controller.status() == GenerationStatus::Running
    }

    pub fn can_submit(&self) -> bool {
        !self.is_generating() && self.form.is_complete()
    }

    pub const fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub const fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn type_char(&mut self, c: char) {
        if self.is_generating() {
            return;
        }
        if let Some(text) = self.form.text_mut(self.focus) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_generating() {
            return;
        }
        if let Some(text) = self.form.text_mut(self.focus) {
            text.pop();
        }
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        if !self.is_generating() {
            self.form.cycle(self.focus, forward);
        }
    }

    /// Submit the form. Returns false when the form is incomplete or a run is
    /// already going.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let Some(request) = self.form.to_request() else {
            return false;
        };

        self.scroll_offset = 0;
        self.controller.submit(request);
        true
    }

    pub fn new_generation(&mut self) {
        self.controller.reset();
        self.scroll_offset = 0;
    }

    pub fn download_pdf(&mut self) {
        if self.controller.status() != GenerationStatus::Completed {
            return;
        }
        let notice = match self.controller.download_artifact(self.controller.job_handle()) {
            Ok(DownloadOutcome::Opened(url)) => Notice::info(format!("Opening {url} in your browser")),
            Ok(DownloadOutcome::DemoMode) => Notice::info("Demo mode: PDF download would happen here"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to open PDF download");
                Notice::error(format!("Could not open download: {e}"))
            }
        };
        self.notice = Some(notice);
    }

    pub fn copy_markdown(&mut self) {
        if self.controller.status() != GenerationStatus::Completed {
            return;
        }
        let notice = match self.clipboard.copy(self.controller.content()) {
            Ok(()) => Notice::success("Markdown copied to clipboard!"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to copy markdown");
                Notice::error(format!("Could not copy markdown: {e}"))
            }
        };
        self.notice = Some(notice);
    }

    pub fn handle_job_event(&mut self, event: JobEvent) {
        if let Some(notice) = self.controller.apply(event) {
            self.notice = Some(notice);
        }
    }

    /// The current notice, unless it has expired by `now`.
    pub fn visible_notice(&self, now: DateTime<Local>) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|n| now.signed_duration_since(n.at) < TimeDelta::seconds(NOTICE_TTL_SECS))
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub const fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        // Clamped to the real content height when the preview is rendered
        self.scroll_offset = usize::MAX;
    }
}
