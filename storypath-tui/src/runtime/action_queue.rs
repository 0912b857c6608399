use crate::app::Route;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    /// Fetch whatever the route displays.
    LoadRoute(Route),
    SubmitProjectForm,
    SubmitLocationForm,
    ConfirmDelete,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
