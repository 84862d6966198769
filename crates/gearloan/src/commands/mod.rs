//! Command handlers, one module per command group.

pub mod browse;
pub mod config_cmd;
pub mod items;
pub mod lend;
pub mod util;

use gearloan_core::Lending;

use crate::cli::{Command, GlobalOpts};
use crate::config::{self, Context};
use crate::error::CliError;

/// Run a command that talks to the record store.
pub async fn dispatch(cmd: Command, global: &GlobalOpts, ctx: &Context) -> Result<(), CliError> {
    let store = config::build_store_config(global, ctx)?;
    let lending = Lending::new(&store)?;
    tracing::debug!(endpoint = %store.endpoint, "record store resolved");

    match cmd {
        Command::List(args) => items::list(args, lending, ctx).await,
        Command::Show(args) => items::show(args, lending, ctx).await,
        Command::Borrow(args) => lend::borrow(args, lending, ctx).await,
        Command::Return(args) => lend::return_item(args, lending, ctx).await,
        Command::Browse => browse::run(lending, ctx).await,
        // Both run in `main` without a store.
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
