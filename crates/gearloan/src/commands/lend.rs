//! Write commands: `borrow` and `return`.
//!
//! Both reuse the interaction flows with a one-shot surface, so the
//! same checks and readback confirmation apply as in `browse`.
//! An unconfirmed readback fails the command with a conflict exit code.

use gearloan_core::{FlowOutcome, Interaction, ItemId, Lending, LendingCommand};

use crate::cli::{BorrowArgs, ReturnArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;
use crate::surface::TerminalSurface;

use super::util;

pub async fn borrow(args: BorrowArgs, lending: Lending, ctx: &Context) -> Result<(), CliError> {
    match &args.name {
        // There is nobody to re-prompt, so a blank --name fails up front.
        Some(name) => LendingCommand::Borrow {
            id: ItemId::from(args.id.as_str()),
            borrower: name.clone(),
        }
        .check_input()?,
        None => util::require_terminal("borrow", "pass the borrower with --name")?,
    }

    let surface = util::oneshot_surface(ctx).with_preset_text(args.name);
    let mut ui = Interaction::new(lending, surface);
    ui.start().await?;

    let id = ItemId::from(args.id);
    let outcome = ui.borrow_flow(&id).await;
    finish(outcome, &ui, &id, ctx)
}

pub async fn return_item(
    args: ReturnArgs,
    lending: Lending,
    ctx: &Context,
) -> Result<(), CliError> {
    if !ctx.yes {
        util::require_terminal("return", "pass --yes to skip the confirmation")?;
    }

    let surface = util::oneshot_surface(ctx).assume_yes(ctx.yes);
    let mut ui = Interaction::new(lending, surface);
    ui.start().await?;

    let id = ItemId::from(args.id);
    let outcome = ui.return_flow(&id).await;
    finish(outcome, &ui, &id, ctx)
}

fn finish(
    outcome: FlowOutcome,
    ui: &Interaction<TerminalSurface>,
    id: &ItemId,
    ctx: &Context,
) -> Result<(), CliError> {
    match outcome {
        FlowOutcome::Completed(transition) => {
            transition.into_rejection()?;
        }
        FlowOutcome::Cancelled => {
            if !ctx.quiet {
                eprintln!("Cancelled");
            }
            return Ok(());
        }
        FlowOutcome::Rejected(e) | FlowOutcome::Failed(e) | FlowOutcome::Unavailable(e) => {
            return Err(e.into());
        }
    }

    // Show the record as the store now has it.
    let snapshot = ui.lending().catalog().snapshot();
    if let Some(item) = snapshot.get(id) {
        let labels = ui.lending().labels();
        let out = output::render_single(
            &ctx.output,
            item,
            |i| util::detail(i, labels),
            |i| i.id.to_string(),
        )?;
        output::print_output(&out, ctx.quiet);
    }
    Ok(())
}
