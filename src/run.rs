mod cli;
mod tui;

pub(crate) use cli::{as_cli, shellexpand};
pub(crate) use tui::as_tui;

use crate::api::ExpenseStore;
use crate::session::SessionStore;

/// What the front-ends need from the outside world: the backend and the
/// session file.
#[derive(Clone, Copy)]
pub(crate) struct Services<'a> {
    pub(crate) store: &'a dyn ExpenseStore,
    pub(crate) sessions: &'a SessionStore,
}
