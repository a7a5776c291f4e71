use super::schemes::banner;
use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use crate::utils::text_processing::truncate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Paragraph, Row, Table},
};

const BLOCK_TITLE: &str = "Manage Schemes";

/// Render admin dashboard page according to state.
///
pub fn admin_dashboard(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();
    let banner_height = if state.admin_schemes().error().is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
        .split(size);
    if let Some(error) = state.admin_schemes().error() {
        banner(frame, rows[0], &theme, error);
    }

    let admin = state
        .session()
        .admin()
        .map(|admin| admin.username.clone())
        .unwrap_or_default();
    let schemes = state.admin_schemes();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(&theme))
        .title(Span::styled(
            format!("{} ({}) - signed in as {}", BLOCK_TITLE, schemes.data().len(), admin),
            styling::active_block_title_style(),
        ));

    if schemes.is_loading() {
        frame.render_widget(
            spinner::widget(state, "Loading schemes...", rows[1].height).block(block),
            rows[1],
        );
        return;
    }
    if schemes.data().is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No schemes yet. Press n to add one.",
            styling::muted_text_style(&theme),
        ))
        .block(block);
        frame.render_widget(empty, rows[1]);
        return;
    }

    let table_rows: Vec<Row> = schemes
        .data()
        .iter()
        .map(|scheme| {
            Row::new(vec![
                truncate(&scheme.name, 40),
                truncate(&scheme.ministry, 32),
                scheme.state.clone(),
                scheme
                    .launch_year
                    .map(|year| year.to_string())
                    .unwrap_or_default(),
                if scheme.is_active { "Active" } else { "Inactive" }.to_string(),
            ])
            .style(styling::normal_text_style(&theme))
        })
        .collect();
    let widths = [
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(15),
        Constraint::Percentage(8),
        Constraint::Percentage(12),
    ];
    let table = Table::new(table_rows, widths)
        .header(
            Row::new(vec!["Name", "Ministry", "State", "Year", "Status"])
                .style(styling::label_style(&theme)),
        )
        .block(block)
        .highlight_style(styling::current_list_item_style(&theme));
    frame.render_stateful_widget(table, rows[1], state.admin_table_state());
}
