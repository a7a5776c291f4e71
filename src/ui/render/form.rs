use super::{centered_rect, Frame};
use crate::state::{Form, FormKind, PendingAction, State};
use crate::ui::widgets::{spinner, styling};
use crate::ui::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Return the lines showing every field of the form, the inline error and
/// the submission status.
///
pub fn form_lines(form: &Form, theme: &Theme, spinner_frame: &'static str) -> Vec<Line<'static>> {
    let mut lines = vec![];
    for (index, field) in form.fields().iter().enumerate() {
        let focused = index == form.focus();
        let marker = if focused { "▶ " } else { "  " };
        let label = if field.required {
            format!("{}{} *", marker, field.label)
        } else {
            format!("{}{}", marker, field.label)
        };
        lines.push(Line::from(Span::styled(label, styling::label_style(theme))));

        let mut value = vec![Span::styled(
            format!("  {}", field.display_value()),
            styling::normal_text_style(theme),
        )];
        if focused {
            value.push(Span::styled("_", styling::active_list_item_style(theme)));
        }
        lines.push(Line::from(value));
    }
    lines.push(Line::from(""));
    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            error.to_owned(),
            styling::error_style(theme),
        )));
    }
    if form.is_submitting() {
        lines.push(Line::from(vec![
            Span::styled(spinner_frame, styling::active_list_item_style(theme)),
            Span::styled(" Submitting...", styling::muted_text_style(theme)),
        ]));
    }
    lines
}

/// Render the modal form on top of the current page, if any.
///
pub fn form(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let form = match state.form() {
        Some(form) => form,
        None => return,
    };
    let height = match form.kind() {
        FormKind::SchemeEditor { .. } => 90,
        _ => 60,
    };
    let area = centered_rect(60, height, size);
    frame.render_widget(Clear, area);

    let mut lines = vec![];
    match state.pending_action() {
        Some(PendingAction::Apply(_)) => lines.push(Line::from(Span::styled(
            "Sign in to apply for this scheme.",
            styling::warning_style(theme),
        ))),
        Some(PendingAction::Save(_)) => lines.push(Line::from(Span::styled(
            "Sign in to save this scheme.",
            styling::warning_style(theme),
        ))),
        None => {}
    }
    lines.extend(form_lines(form, theme, spinner::frame(state)));
    match form.kind() {
        FormKind::UserLogin => lines.push(Line::from(Span::styled(
            "Don't have an account? Press Ctrl-r to sign up.",
            styling::muted_text_style(theme),
        ))),
        FormKind::UserRegister => lines.push(Line::from(Span::styled(
            "Already have an account? Press Ctrl-r to sign in.",
            styling::muted_text_style(theme),
        ))),
        _ => {}
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            form.kind().title(),
            styling::active_block_title_style(),
        ))
        .border_style(styling::active_block_border_style(theme));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
