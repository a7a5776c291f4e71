mod admin_dashboard;
mod admin_login;
mod all;
mod chatbot;
mod dialogs;
mod footer;
mod form;
mod home;
mod log;
mod navbar;
mod saved_schemes;
mod scheme_detail;
mod schemes;

use self::log::log;
use super::*;
use dialogs::dialogs;
use footer::footer;
use form::form;
use navbar::navbar;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub use all::all as render;

/// Return a rectangle centered within the given one, sized by percentages.
///
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
