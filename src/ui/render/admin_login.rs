use super::form::form_lines;
use super::{centered_rect, Frame};
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Paragraph},
};

/// Render admin login page according to state.
///
pub fn admin_login(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let area = centered_rect(50, 50, size);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "Admin Login",
            styling::active_block_title_style(),
        ))
        .border_style(styling::active_block_border_style(theme));
    let lines = form_lines(state.admin_login_form(), theme, spinner::frame(state));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
