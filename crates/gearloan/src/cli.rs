//! Clap derive structures for the `gearloan` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace crates so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gearloan -- borrow and return shared equipment
#[derive(Debug, Parser)]
#[command(
    name = "gearloan",
    version,
    about = "Borrow and return shared equipment from the command line",
    long_about = "Track a shared pool of equipment kept in a remote record store.\n\n\
        Every item is either ready to lend or borrowed. Borrowing and returning\n\
        send one request to the store, then re-read the whole catalog.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Store profile to use
    #[arg(long, short = 'p', env = "GEARLOAN_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Record store endpoint URL (overrides profile)
    #[arg(long, short = 'e', env = "GEARLOAN_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "GEARLOAN_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "GEARLOAN_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (no timeout unless set)
    #[arg(long, env = "GEARLOAN_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Status facet for `list`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusArg {
    /// Every item
    #[default]
    All,
    /// Items ready to lend
    Ready,
    /// Items on loan
    Borrowed,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List equipment, optionally filtered
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one item in detail
    Show(ShowArgs),

    /// Borrow a ready item
    Borrow(BorrowArgs),

    /// Return a borrowed item
    Return(ReturnArgs),

    /// Browse the catalog interactively
    #[command(alias = "ui")]
    Browse,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Item commands ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive substring of the item name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only show items in this state
    #[arg(long, value_enum, default_value_t = StatusArg::All)]
    pub status: StatusArg,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Item id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct BorrowArgs {
    /// Item id
    pub id: String,

    /// Borrower name (prompted for when omitted)
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReturnArgs {
    /// Item id
    pub id: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (endpoint, timeout, insecure, ca_cert, ready_label, borrowed_label)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
