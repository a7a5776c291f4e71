use super::Frame;
use crate::state::{Page, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BRAND: &str = " Gov Schemes ";

/// Render navigation bar according to state.
///
pub fn navbar(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let current = state.route().page();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme))
        .title(Span::styled(BRAND, styling::banner_style(theme)));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)])
        .split(inner);

    let mut tabs = vec![];
    for (index, page) in Page::ALL.iter().enumerate() {
        let style = if *page == current {
            styling::current_list_item_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        tabs.push(Span::styled(format!(" {} {} ", index + 1, page.title()), style));
        tabs.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tabs)), columns[0]);

    let session = state.session();
    let mut identity = vec![];
    if let Some(admin) = session.admin() {
        identity.push(Span::styled(
            format!("admin: {} ", admin.username),
            styling::warning_style(theme),
        ));
    }
    match session.user() {
        Some(user) => identity.push(Span::styled(
            format!("Hi, {}", user.name),
            styling::success_style(theme),
        )),
        None => identity.push(Span::styled("Guest", styling::muted_text_style(theme))),
    }
    frame.render_widget(
        Paragraph::new(Line::from(identity)).alignment(Alignment::Right),
        columns[1],
    );
}
