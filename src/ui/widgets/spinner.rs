use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Braille frames cycled while a request is in flight.
///
pub const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Return the current spinner frame.
///
pub fn frame(state: &State) -> &'static str {
    FRAMES[state.spinner_index() % FRAMES.len()]
}

/// Return a spinner line with the given label, vertically centered within
/// the given height.
///
pub fn widget<'a>(state: &State, label: &'a str, height: u16) -> Paragraph<'a> {
    let theme = state.theme();
    let mut lines = vec![Line::from(""); (height / 2).saturating_sub(1) as usize];
    lines.push(Line::from(vec![
        Span::styled(frame(state), styling::active_list_item_style(theme)),
        Span::styled(format!(" {}", label), styling::muted_text_style(theme)),
    ]));
    Paragraph::new(lines).alignment(Alignment::Center)
}
