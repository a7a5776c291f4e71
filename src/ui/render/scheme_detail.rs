use super::schemes::banner;
use super::Frame;
use crate::state::State;
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render scheme detail page according to state.
///
pub fn scheme_detail(frame: &mut Frame, size: Rect, state: &mut State, id: u64) {
    let theme = state.theme();
    let detail = state.detail();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(Span::styled(
            format!("Scheme #{}", id),
            styling::active_block_title_style(),
        ));

    if detail.is_loading() {
        frame.render_widget(
            spinner::widget(state, "Loading scheme details...", size.height).block(block),
            size,
        );
        return;
    }
    let scheme = match detail.data() {
        Some(scheme) => scheme,
        None => {
            let message = detail.error().unwrap_or("Scheme not found.");
            banner(frame, size, theme, message);
            return;
        }
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(size);

    let mut lines = vec![
        Line::from(Span::styled(scheme.name.clone(), styling::banner_style(theme))),
        Line::from(Span::styled(
            scheme.ministry.clone(),
            styling::muted_text_style(theme),
        )),
        Line::from(""),
    ];
    let launch_year = scheme
        .launch_year
        .map(|year| year.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let status = if scheme.is_active { "Active" } else { "Inactive" };
    let sections = [
        ("Description", scheme.description.as_str()),
        ("Eligibility", scheme.eligibility.as_str()),
        ("Target Group", scheme.target_group.as_str()),
        ("Benefits", scheme.benefits.as_str()),
        ("State", scheme.state.as_str()),
        ("Launch Year", launch_year.as_str()),
        ("Status", status),
        ("Apply Link", scheme.apply_link().unwrap_or("Not available")),
    ];
    for (label, value) in sections.iter() {
        lines.push(Line::from(Span::styled(*label, styling::label_style(theme))));
        lines.push(Line::from(Span::styled(
            value.to_string(),
            styling::normal_text_style(theme),
        )));
        lines.push(Line::from(""));
    }
    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll(), 0));
    frame.render_widget(content, rows[0]);

    let save_label = if state.is_detail_saving() {
        format!("{} Saving...", spinner::frame(state))
    } else if state.is_detail_saved() {
        "★ Saved".to_string()
    } else {
        "☆ Save".to_string()
    };
    let mut actions = vec![
        Span::styled(" a ", styling::current_list_item_style(theme)),
        Span::styled(" Apply Now  ", styling::normal_text_style(theme)),
        Span::styled(" s ", styling::current_list_item_style(theme)),
        Span::styled(format!(" {}  ", save_label), styling::normal_text_style(theme)),
    ];
    if let Some(error) = detail.error() {
        actions.push(Span::styled(error.to_owned(), styling::error_style(theme)));
    }
    let bar = Paragraph::new(Line::from(actions)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(bar, rows[1]);
}
