// ── Notification surface ──
//
// The flows only describe what to ask and what to tell; a surface
// decides how it looks. The CLI renders these with terminal widgets,
// tests script the answers.

/// A single-line text question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub label: String,
    pub placeholder: String,
}

/// A yes/no question with custom button labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A one-shot message to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Where prompts, confirmations, notices and progress indicators go.
pub trait NotificationSurface {
    /// Ask for text. `None` means the user dismissed the prompt.
    fn prompt_text(&mut self, prompt: &Prompt) -> Option<String>;

    /// `true` only when the user picked the confirm button.
    fn confirm(&mut self, confirmation: &Confirmation) -> bool;

    fn notify(&mut self, notice: &Notice);

    /// Show a blocking progress indicator until [`dismiss_progress`](Self::dismiss_progress).
    fn show_progress(&mut self, message: &str);

    fn dismiss_progress(&mut self);
}
