use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render chatbot page according to state.
///
pub fn chatbot(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(size);

    let mut lines = vec![];
    for message in state.chat_messages() {
        let (author, style) = if message.from_user {
            ("You", styling::active_list_item_style(theme))
        } else {
            ("Assistant", styling::label_style(theme))
        };
        lines.push(Line::from(vec![
            Span::styled(author, style),
            Span::styled(
                format!("  {}", message.time_label()),
                styling::muted_text_style(theme),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            message.text.clone(),
            styling::normal_text_style(theme),
        )));
        lines.push(Line::from(""));
    }
    if state.is_chat_pending() {
        lines.push(Line::from(vec![
            Span::styled(spinner::frame(state), styling::active_list_item_style(theme)),
            Span::styled(" Thinking...", styling::muted_text_style(theme)),
        ]));
    }

    // Keep the latest messages in view. Wrapped lines are not counted.
    let visible = rows[0].height.saturating_sub(2) as usize;
    let offset = lines.len().saturating_sub(visible) as u16;
    let transcript = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("AI Assistant")
                .border_style(styling::normal_block_border_style(theme)),
        )
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    frame.render_widget(transcript, rows[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", styling::active_list_item_style(theme)),
        Span::styled(state.chat_input().to_owned(), styling::normal_text_style(theme)),
        Span::styled("_", styling::muted_text_style(theme)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Ask about schemes, eligibility, or how to apply")
            .border_style(styling::active_block_border_style(theme)),
    );
    frame.render_widget(input, rows[1]);
}
