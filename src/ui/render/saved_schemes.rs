use super::schemes::{banner, scheme_item};
use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

const BLOCK_TITLE: &str = "Saved Schemes";
const EMPTY_MESSAGE: &str = "No saved schemes yet. Browse schemes and press s to save one.";

/// Render saved schemes page according to state.
///
pub fn saved_schemes(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();
    let banner_height = if state.saved().error().is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
        .split(size);
    if let Some(error) = state.saved().error() {
        banner(frame, rows[0], &theme, error);
    }

    let saved = state.saved();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(
            format!("{} ({})", BLOCK_TITLE, saved.data().len()),
            styling::active_block_title_style(),
        ));

    if saved.is_loading() {
        frame.render_widget(
            spinner::widget(state, "Loading saved schemes...", rows[1].height).block(block),
            rows[1],
        );
        return;
    }
    if saved.data().is_empty() {
        let empty = Paragraph::new(Span::styled(EMPTY_MESSAGE, styling::muted_text_style(&theme)))
            .block(block);
        frame.render_widget(empty, rows[1]);
        return;
    }

    let items: Vec<ListItem> = saved
        .data()
        .iter()
        .map(|scheme| scheme_item(scheme, "", &theme))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(styling::current_list_item_style(&theme));
    frame.render_stateful_widget(list, rows[1], state.saved_list_state());
}
