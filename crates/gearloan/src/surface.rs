//! Terminal notification surface.
//!
//! Prompts and confirmations go through dialoguer, the progress
//! indicator is an indicatif spinner on stderr, and notices are single
//! colored lines on stderr.

use std::time::Duration;

use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::warn;

use gearloan_core::{Confirmation, Notice, NoticeLevel, NotificationSurface, Prompt};

/// How much of the notice stream reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every notice is shown (browse).
    Interactive,
    /// Only success notices are shown; failures surface as the
    /// command's error diagnostic instead.
    OneShot,
}

pub struct TerminalSurface {
    mode: Mode,
    color: bool,
    quiet: bool,
    /// Answer for the next text prompt, from `--name`.
    preset_text: Option<String>,
    /// Answer yes to confirmations, from `--yes`.
    assume_yes: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalSurface {
    pub fn new(mode: Mode, color: bool, quiet: bool) -> Self {
        Self {
            mode,
            color,
            quiet,
            preset_text: None,
            assume_yes: false,
            spinner: None,
        }
    }

    pub fn with_preset_text(mut self, text: Option<String>) -> Self {
        self.preset_text = text;
        self
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    fn line(&self, level: NoticeLevel, text: &str) -> String {
        let icon = match level {
            NoticeLevel::Success => "✓",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "✗",
        };
        if !self.color {
            return format!("{icon} {text}");
        }
        match level {
            NoticeLevel::Success => format!("{} {text}", icon.green().bold()),
            NoticeLevel::Warning => format!("{} {}", icon.yellow().bold(), text.yellow()),
            NoticeLevel::Error => format!("{} {}", icon.red().bold(), text.red()),
        }
    }
}

impl NotificationSurface for TerminalSurface {
    fn prompt_text(&mut self, prompt: &Prompt) -> Option<String> {
        if let Some(text) = self.preset_text.take() {
            return Some(text);
        }
        eprintln!("{}", prompt.title);
        match Input::<String>::new()
            .with_prompt(&prompt.label)
            .allow_empty(true)
            .interact_text()
        {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "prompt failed");
                None
            }
        }
    }

    fn confirm(&mut self, confirmation: &Confirmation) -> bool {
        if self.assume_yes {
            return true;
        }
        eprintln!("{}", confirmation.title);
        let choice = Select::new()
            .with_prompt(&confirmation.message)
            .items(&[&confirmation.confirm_label, &confirmation.cancel_label])
            .default(1)
            .interact_opt();
        match choice {
            Ok(picked) => picked == Some(0),
            Err(e) => {
                warn!(error = %e, "confirmation failed");
                false
            }
        }
    }

    fn notify(&mut self, notice: &Notice) {
        if self.quiet || (self.mode == Mode::OneShot && notice.level != NoticeLevel::Success) {
            return;
        }
        let text = match self.mode {
            Mode::Interactive => format!("{}: {}", notice.title, notice.message),
            Mode::OneShot => notice.message.clone(),
        };
        eprintln!("{}", self.line(notice.level, &text));
    }

    fn show_progress(&mut self, message: &str) {
        if self.quiet {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_owned());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn dismiss_progress(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_answers_skip_the_terminal() {
        let mut surface = TerminalSurface::new(Mode::OneShot, false, true)
            .with_preset_text(Some("Alice".into()))
            .assume_yes(true);
        let prompt = Prompt {
            title: "Borrow".into(),
            label: "Borrower name".into(),
            placeholder: String::new(),
        };
        assert_eq!(surface.prompt_text(&prompt), Some("Alice".into()));
        assert!(surface.confirm(&Confirmation {
            title: "Confirm return?".into(),
            message: "Return \"Tripod\"?".into(),
            confirm_label: "Yes, return it".into(),
            cancel_label: "Cancel".into(),
        }));
    }

    #[test]
    fn plain_lines_without_color() {
        let surface = TerminalSurface::new(Mode::Interactive, false, false);
        assert_eq!(surface.line(NoticeLevel::Success, "Item borrowed"), "✓ Item borrowed");
        assert_eq!(surface.line(NoticeLevel::Error, "boom"), "✗ boom");
    }
}
