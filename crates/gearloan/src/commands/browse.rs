//! Interactive catalog browser.
//!
//! A menu loop over the current snapshot: picking a ready item starts the
//! borrow flow, picking a borrowed one starts the return flow. Search,
//! status filter, and refresh live at the bottom of the menu.

use std::sync::Arc;

use dialoguer::{Input, Select};

use gearloan_core::{Intent, Interaction, Item, Lending, StatusFilter};

use crate::config::Context;
use crate::error::CliError;
use crate::surface::{Mode, TerminalSurface};

use super::util::{self, prompt_err};

enum Choice {
    Item(Arc<Item>),
    Search,
    Filter,
    Refresh,
    Quit,
}

pub async fn run(lending: Lending, ctx: &Context) -> Result<(), CliError> {
    util::require_terminal("browse", "use list, borrow --name, or return --yes in scripts")?;

    let surface = TerminalSurface::new(Mode::Interactive, ctx.color, false);
    let mut ui = Interaction::new(lending, surface);
    // A failed first load is already on screen; the menu still offers refresh.
    let _ = ui.start().await;

    loop {
        let choices = menu(&ui);
        let labels: Vec<String> = choices.iter().map(|(label, _)| label.clone()).collect();

        let picked = Select::new()
            .with_prompt(header(&ui))
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_err)?;
        let Some(index) = picked else { break };
        let Some((_, choice)) = choices.into_iter().nth(index) else {
            continue;
        };

        match choice {
            Choice::Item(item) => {
                // The surface has already reported how the flow ended.
                let outcome = if item.is_ready() {
                    ui.borrow_flow(&item.id).await
                } else {
                    ui.return_flow(&item.id).await
                };
                if let Some(e) = outcome.error() {
                    tracing::debug!(item = %item.id, error = %e, "flow ended without a write");
                }
            }
            Choice::Search => {
                let term: String = Input::new()
                    .with_prompt("Search by name")
                    .with_initial_text(ui.session().search.clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_err)?;
                ui.dispatch(Intent::SetSearch(term));
            }
            Choice::Filter => {
                let filters = [
                    StatusFilter::All,
                    StatusFilter::ReadyOnly,
                    StatusFilter::BorrowedOnly,
                ];
                let names = filters.map(|f| f.to_string());
                let current = filters
                    .iter()
                    .position(|f| *f == ui.session().status_filter)
                    .unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("Show")
                    .items(&names)
                    .default(current)
                    .interact_opt()
                    .map_err(prompt_err)?;
                if let Some(filter) = picked.and_then(|i| filters.get(i)) {
                    ui.dispatch(Intent::SetStatusFilter(*filter));
                }
            }
            Choice::Refresh => {
                let _ = ui.reload().await;
            }
            Choice::Quit => break,
        }
    }
    Ok(())
}

fn header(ui: &Interaction<TerminalSurface>) -> String {
    let counts = ui.lending().catalog().snapshot().counts();
    let session = ui.session();
    let mut header = format!(
        "Equipment ({} ready, {} borrowed)",
        counts.ready, counts.borrowed
    );
    if !session.search.trim().is_empty() {
        header.push_str(&format!("  search: \"{}\"", session.search.trim()));
    }
    if session.status_filter != StatusFilter::All {
        header.push_str(&format!("  showing: {}", session.status_filter));
    }
    header
}

fn menu(ui: &Interaction<TerminalSurface>) -> Vec<(String, Choice)> {
    let labels = ui.lending().labels();
    let mut choices: Vec<(String, Choice)> = ui
        .visible_items()
        .into_iter()
        .map(|item| (util::summary(&item, labels), Choice::Item(item)))
        .collect();
    choices.push(("[search]".into(), Choice::Search));
    choices.push(("[filter]".into(), Choice::Filter));
    choices.push(("[refresh]".into(), Choice::Refresh));
    choices.push(("[quit]".into(), Choice::Quit));
    choices
}
