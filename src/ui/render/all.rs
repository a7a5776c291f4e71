use super::{
    admin_dashboard, admin_login, chatbot, dialogs, footer, form, home, log, navbar,
    saved_schemes, scheme_detail, schemes, Frame,
};
use crate::state::{Route, State};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

const NAVBAR_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 1;
const LOG_HEIGHT: u16 = 8;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();

    let mut constraints = vec![Constraint::Length(NAVBAR_HEIGHT), Constraint::Min(0)];
    if state.is_log_visible() {
        constraints.push(Constraint::Length(LOG_HEIGHT));
    }
    constraints.push(Constraint::Length(FOOTER_HEIGHT));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    navbar(frame, rows[0], state);
    body(frame, rows[1], state);
    if state.is_log_visible() {
        log(frame, rows[2], state);
    }
    footer(frame, rows[rows.len() - 1], state);

    form(frame, size, state);
    dialogs(frame, size, state);
}

/// Render the page for the current route.
///
fn body(frame: &mut Frame, size: Rect, state: &mut State) {
    match state.route() {
        Route::Home => home::home(frame, size, state),
        Route::Schemes => schemes::schemes(frame, size, state),
        Route::SchemeDetail(id) => scheme_detail::scheme_detail(frame, size, state, id),
        Route::SavedSchemes => saved_schemes::saved_schemes(frame, size, state),
        Route::Chatbot => chatbot::chatbot(frame, size, state),
        Route::AdminLogin => admin_login::admin_login(frame, size, state),
        Route::AdminDashboard => admin_dashboard::admin_dashboard(frame, size, state),
    }
}
