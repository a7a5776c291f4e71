use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const BANNER: &str = r"
   ____                 ____       _
  / ___| _____   __   / ___|  ___| |__   ___ _ __ ___   ___  ___
 | |  _ / _ \ \ / /   \___ \ / __| '_ \ / _ \ '_ ` _ \ / _ \/ __|
 | |_| | (_) \ V /     ___) | (__| | | |  __/ | | | | |  __/\__ \
  \____|\___/ \_/     |____/ \___|_| |_|\___|_| |_| |_|\___||___/
";

const FEATURES: [(&str, &str); 4] = [
    (
        "Browse schemes",
        "Search central and state welfare schemes by name, state or ministry.",
    ),
    (
        "Check eligibility",
        "Read benefits, eligibility and target groups before you apply.",
    ),
    (
        "Save for later",
        "Sign in to keep a list of the schemes that matter to you.",
    ),
    (
        "Ask the assistant",
        "Get answers about schemes and application processes from the AI assistant.",
    ),
];

/// Render home page according to state.
///
pub fn home(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)].as_ref())
        .margin(2)
        .split(size);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Home")
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(block, size);

    let banner = Text::styled(BANNER, styling::banner_style(theme));
    frame.render_widget(Paragraph::new(banner), rows[0]);

    let mut lines = vec![
        Line::from(Span::styled(
            "Discover the government schemes you are eligible for.",
            styling::normal_text_style(theme),
        )),
        Line::from(""),
    ];
    for (title, summary) in FEATURES.iter() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<18}", title), styling::label_style(theme)),
            Span::styled(*summary, styling::normal_text_style(theme)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Press ", styling::muted_text_style(theme)),
        Span::styled("2", styling::active_list_item_style(theme)),
        Span::styled(" to explore schemes or ", styling::muted_text_style(theme)),
        Span::styled("5", styling::active_list_item_style(theme)),
        Span::styled(" to talk to the assistant.", styling::muted_text_style(theme)),
    ]));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        rows[1],
    );
}
