//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use tabled::Tabled;

use gearloan_core::{Item, StatusFilter, StatusLabels};

use crate::cli::StatusArg;
use crate::config::Context;
use crate::error::CliError;
use crate::surface::{Mode, TerminalSurface};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Borrower")]
    borrower: String,
    #[tabled(rename = "Since")]
    since: String,
}

impl ItemRow {
    pub fn new(item: &Arc<Item>, labels: &StatusLabels) -> Self {
        let loan = item.loan();
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            kind: item.kind.clone(),
            status: labels.label(item.status()).to_owned(),
            borrower: loan.map(|l| l.borrower.clone()).unwrap_or_default(),
            since: loan.map(|l| l.borrowed_on.clone()).unwrap_or_default(),
        }
    }
}

/// Multi-line detail view for `show` and after a write.
pub fn detail(item: &Item, labels: &StatusLabels) -> String {
    let mut lines = vec![
        format!("ID:       {}", item.id),
        format!("Name:     {}", item.name),
        format!("Type:     {}", if item.kind.is_empty() { "-" } else { item.kind.as_str() }),
        format!("Status:   {} ({})", labels.label(item.status()), item.status()),
    ];
    if let Some(loan) = item.loan() {
        lines.push(format!("Borrower: {}", loan.borrower));
        let since = loan.borrowed_at().map_or_else(
            || loan.borrowed_on.clone(),
            |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
        );
        lines.push(format!("Since:    {since}"));
    }
    lines.push(format!("Image:    {}", item.image_or_placeholder()));
    lines.join("\n")
}

/// One-line summary used by the interactive browser.
pub fn summary(item: &Item, labels: &StatusLabels) -> String {
    let meta = if item.kind.is_empty() {
        item.id.to_string()
    } else {
        format!("{} • {}", item.kind, item.id)
    };
    match item.loan() {
        Some(loan) => format!(
            "{}  ({meta})  [{}: {}, {}]",
            item.name,
            labels.label(item.status()),
            loan.borrower,
            loan.borrowed_on
        ),
        None => format!("{}  ({meta})  [{}]", item.name, labels.label(item.status())),
    }
}

pub fn status_filter(arg: StatusArg) -> StatusFilter {
    match arg {
        StatusArg::All => StatusFilter::All,
        StatusArg::Ready => StatusFilter::ReadyOnly,
        StatusArg::Borrowed => StatusFilter::BorrowedOnly,
    }
}

/// Surface for single commands: failures become the command's error.
pub fn oneshot_surface(ctx: &Context) -> TerminalSurface {
    TerminalSurface::new(Mode::OneShot, ctx.color, ctx.quiet)
}

/// Fail early when a prompt would be needed but nobody can answer it.
pub fn require_terminal(command: &str, hint: &str) -> Result<(), CliError> {
    if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        Ok(())
    } else {
        Err(CliError::NonInteractive {
            command: command.into(),
            hint: hint.into(),
        })
    }
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
