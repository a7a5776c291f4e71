use super::Frame;
use crate::state::{Route, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the key hints for the given route.
///
fn hints(route: Route, state: &State) -> &'static str {
    if state.form().is_some() {
        return " Tab: next field, Enter: submit, Ctrl-r: switch sign in/register, Esc: cancel";
    }
    match route {
        Route::Home => " 1-7: pages, Ctrl-l: log, Ctrl-c: quit",
        Route::Schemes => {
            " j/k: navigate, Enter: view, f: search & filters, F1-F5: category, c: clear, r: reload, Ctrl-c: quit"
        }
        Route::SchemeDetail(_) => {
            " j/k: scroll, a: apply, s: save/unsave, u: sign in/out, Esc: back, Ctrl-c: quit"
        }
        Route::SavedSchemes => " j/k: navigate, Enter: view, d: remove, r: reload, Ctrl-c: quit",
        Route::Chatbot => " Type a question, Enter: send, Esc: back, Ctrl-c: quit",
        Route::AdminLogin => " Tab: next field, Enter: sign in, Esc: back, Ctrl-c: quit",
        Route::AdminDashboard => {
            " j/k: navigate, n: add, e: edit, d: delete, o: logout, r: reload, Ctrl-c: quit"
        }
    }
}

/// Render footer widget according to state.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let line = match state.notice() {
        Some(notice) => Line::from(Span::styled(
            format!(" {}", notice),
            styling::success_style(theme),
        )),
        None => Line::from(Span::styled(
            hints(state.route(), state),
            styling::muted_text_style(theme),
        )),
    };
    frame.render_widget(Paragraph::new(line), size);
}
