use super::{centered_rect, Frame};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the confirmation dialog or the alert on top of everything.
///
pub fn dialogs(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let (title, message, hint, border) = if let Some(alert) = state.alert() {
        (
            "Error",
            alert.to_owned(),
            "Enter/Esc: dismiss",
            styling::error_style(theme),
        )
    } else if let Some(confirmation) = state.confirmation() {
        (
            "Confirm",
            confirmation.prompt(),
            "y/Enter: confirm, n/Esc: cancel",
            styling::warning_style(theme),
        )
    } else {
        return;
    };

    let area = centered_rect(50, 25, size);
    frame.render_widget(Clear, area);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, styling::normal_text_style(theme))),
        Line::from(""),
        Line::from(Span::styled(hint, styling::muted_text_style(theme))),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, border))
                .border_style(border),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
