use super::Frame;
use crate::api::Scheme;
use crate::state::{State, CATEGORIES};
use crate::ui::widgets::{spinner, styling};
use crate::ui::Theme;
use crate::utils::text_processing::{highlight_matches, truncate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const BLOCK_TITLE: &str = "Schemes";
const EMPTY_MESSAGE: &str = "No schemes found matching your criteria.";
const SUMMARY_WIDTH: usize = 90;

/// Render schemes page according to state.
///
pub fn schemes(frame: &mut Frame, size: Rect, state: &mut State) {
    let banner_height = if state.schemes().error().is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(0),
        ])
        .split(size);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[2]);

    filter_bar(frame, rows[0], state);
    if let Some(error) = state.schemes().error() {
        banner(frame, rows[1], state.theme(), error);
    }
    scheme_list(frame, columns[0], state);
    facets(frame, columns[1], state);
}

/// Render the category shortcuts followed by a summary of active filters.
///
fn filter_bar(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let mut spans = vec![];
    for (index, (label, _)) in CATEGORIES.iter().enumerate() {
        let style = if state.active_category() == Some(index) {
            styling::current_list_item_style(theme)
        } else {
            styling::normal_text_style(theme)
        };
        spans.push(Span::styled(format!(" F{} {} ", index + 1, label), style));
        spans.push(Span::raw(" "));
    }

    let filters = state.active_filters();
    let mut active = vec![];
    if let Some(q) = &filters.q {
        active.push(format!("search \"{}\"", q));
    }
    if let Some(s) = &filters.state {
        active.push(format!("state {}", s));
    }
    if let Some(m) = &filters.ministry {
        active.push(format!("ministry {}", m));
    }
    if !active.is_empty() {
        spans.push(Span::styled(
            format!("| {}", active.join(", ")),
            styling::muted_text_style(theme),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Categories")
        .border_style(styling::normal_block_border_style(theme));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), size);
}

/// Render a load failure banner.
///
pub fn banner(frame: &mut Frame, size: Rect, theme: &Theme, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::error_style(theme));
    let text = Paragraph::new(Span::styled(message.to_owned(), styling::error_style(theme)))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, size);
}

/// Return a two-line list item for the scheme with the search term
/// highlighted in its name.
///
pub fn scheme_item(scheme: &Scheme, term: &str, theme: &Theme) -> ListItem<'static> {
    let mut title: Vec<Span<'static>> = highlight_matches(&scheme.name, term)
        .into_iter()
        .map(|(segment, matched)| {
            let style = if matched {
                styling::match_style(theme)
            } else {
                styling::label_style(theme)
            };
            Span::styled(segment.to_owned(), style)
        })
        .collect();
    if !scheme.is_active {
        title.push(Span::styled(" (inactive)", styling::muted_text_style(theme)));
    }
    let summary = format!(
        "  {} | {} | {}",
        scheme.ministry,
        scheme.state,
        truncate(&scheme.description, SUMMARY_WIDTH)
    );
    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(summary, styling::muted_text_style(theme))),
    ])
}

fn scheme_list(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();
    let schemes = state.schemes();
    let title = format!("{} ({})", BLOCK_TITLE, schemes.data().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(title, styling::active_block_title_style()));

    if schemes.is_loading() {
        frame.render_widget(
            spinner::widget(state, "Loading schemes...", size.height).block(block),
            size,
        );
        return;
    }
    if schemes.data().is_empty() {
        let empty = Paragraph::new(Span::styled(EMPTY_MESSAGE, styling::muted_text_style(&theme)))
            .block(block);
        frame.render_widget(empty, size);
        return;
    }

    let term = state.active_filters().q.clone().unwrap_or_default();
    let items: Vec<ListItem> = schemes
        .data()
        .iter()
        .map(|scheme| scheme_item(scheme, &term, &theme))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(styling::current_list_item_style(&theme));
    frame.render_stateful_widget(list, size, state.schemes_list_state());
}

fn facets(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Ministries")
        .border_style(styling::normal_block_border_style(theme));
    let active = state.active_filters().ministry.as_deref();
    let items: Vec<ListItem> = state
        .ministries()
        .iter()
        .map(|ministry| {
            let style = if Some(ministry.as_str()) == active {
                styling::active_list_item_style(theme)
            } else {
                styling::normal_text_style(theme)
            };
            ListItem::new(Span::styled(ministry.clone(), style))
        })
        .collect();
    frame.render_widget(List::new(items).block(block), size);
}
