use crate::catalog::StatusFilter;
use crate::model::ItemId;

/// Everything that may change a [`Session`](super::Session).
///
/// User actions (typing a search term, picking an item, cancelling) and
/// flow events (a write starting or finishing) both arrive here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetSearch(String),
    SetStatusFilter(StatusFilter),
    SelectBorrow(ItemId),
    SelectReturn(ItemId),
    /// Close a prompt or confirmation without acting.
    Cancel,
    /// The open prompt or confirmation was accepted; a write starts.
    BeginSaving,
    /// The write finished, whatever its result.
    Finish,
}
