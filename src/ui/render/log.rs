use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let block = Block::default()
        .title("Log (Ctrl-l to hide)")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    // Only the most recent entries that fit are shown.
    let visible = size.height.saturating_sub(2) as usize;
    let entries = state.log_entries();
    let skip = entries.len().saturating_sub(visible);
    let items: Vec<ListItem> = entries
        .iter()
        .skip(skip)
        .map(|entry| {
            let style = if entry.contains(" ERROR ") {
                styling::error_style(theme)
            } else if entry.contains(" WARN ") {
                styling::warning_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Line::from(vec![Span::styled(entry.clone(), style)]))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .block(block);
    frame.render_widget(list, size);
}
