use crate::app::App;
use crossterm::event::KeyEvent;

/// Any key acknowledges the notice.
pub(super) fn handle_notice_key(_key: KeyEvent, app: &mut App) {
    app.dismiss_notice();
}
