//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use gearloan_config::ConfigError;
use gearloan_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Record store ─────────────────────────────────────────────────
    #[error("Record store request failed: {message}")]
    #[diagnostic(
        code(gearloan::store),
        help(
            "Check that the endpoint is reachable and returns the item list.\n\
             Try: gearloan list -vv"
        )
    )]
    Store { message: String },

    // ── Items ────────────────────────────────────────────────────────
    #[error("Item '{item_id}' not found")]
    #[diagnostic(
        code(gearloan::not_found),
        help("Run: gearloan list to see available items")
    )]
    NotFound { item_id: String },

    #[error("Cannot {action} item '{item_id}': it is currently {status}")]
    #[diagnostic(
        code(gearloan::invalid_transition),
        help("Check its state with: gearloan show {item_id}")
    )]
    InvalidTransition {
        item_id: String,
        status: String,
        action: String,
    },

    #[error(
        "The record store did not apply the {action} of '{item_id}' \
         (expected {expected}, found {observed})"
    )]
    #[diagnostic(
        code(gearloan::rejected),
        help(
            "Someone else may have changed this item at the same moment.\n\
             Check its state with: gearloan show {item_id}"
        )
    )]
    Rejected {
        item_id: String,
        action: String,
        expected: String,
        observed: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gearloan::validation))]
    Validation { field: String, reason: String },

    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(gearloan::non_interactive),
        help("{hint}")
    )]
    NonInteractive { command: String, hint: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gearloan::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: gearloan config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No record store configured")]
    #[diagnostic(
        code(gearloan::no_config),
        help(
            "Create a profile with: gearloan config init\n\
             Or pass --endpoint / set GEARLOAN_ENDPOINT.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(gearloan::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(gearloan::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Store { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidTransition { .. } | Self::Rejected { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::NonInteractive { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. }
            | Self::NoConfig { .. }
            | Self::Config(_)
            | Self::Io(_)
            | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::NotFound { item_id } => CliError::NotFound {
                item_id: item_id.to_string(),
            },

            CoreError::InvalidTransition {
                item_id,
                status,
                action,
            } => CliError::InvalidTransition {
                item_id: item_id.to_string(),
                status: status.to_string(),
                action: action.to_string(),
            },

            CoreError::Transport { message, .. } => CliError::Store { message },

            CoreError::BackendRejection {
                item_id,
                action,
                expected,
                observed,
            } => CliError::Rejected {
                item_id: item_id.to_string(),
                action: action.to_string(),
                expected: expected.to_string(),
                observed: observed.map_or_else(|| "no such item".into(), |s| s.to_string()),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(Box::new(other)),
        }
    }
}
