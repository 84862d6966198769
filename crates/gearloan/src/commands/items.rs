//! Read-only item commands: `list` and `show`.

use gearloan_core::{Intent, Interaction, ItemId, Lending};

use crate::cli::{ListArgs, ShowArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util::{self, ItemRow};

pub async fn list(args: ListArgs, lending: Lending, ctx: &Context) -> Result<(), CliError> {
    let mut ui = Interaction::new(lending, util::oneshot_surface(ctx));
    ui.start().await?;

    ui.dispatch(Intent::SetSearch(args.search.unwrap_or_default()));
    ui.dispatch(Intent::SetStatusFilter(util::status_filter(args.status)));

    let items = ui.visible_items();
    let labels = ui.lending().labels();
    let out = output::render_list(
        &ctx.output,
        &items,
        |item| ItemRow::new(item, labels),
        |item| item.id.to_string(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

pub async fn show(args: ShowArgs, lending: Lending, ctx: &Context) -> Result<(), CliError> {
    let snapshot = lending.refresh().await?;
    let id = ItemId::from(args.id);
    let item = snapshot.get(&id).ok_or_else(|| CliError::NotFound {
        item_id: id.to_string(),
    })?;

    let labels = lending.labels();
    let out = output::render_single(
        &ctx.output,
        item,
        |i| util::detail(i, labels),
        |i| i.id.to_string(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
