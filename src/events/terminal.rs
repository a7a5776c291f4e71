use crate::state::{Page, Route, State};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => warn!("Failed to read terminal event: {}", e),
                },
                Ok(false) => (),
                Err(e) => warn!("Failed to poll terminal events: {}", e),
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => Ok(handle_key(state, event)),
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }
}

/// Apply a key press to the state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, event: KeyEvent) -> bool {
    state.clear_notice();
    match event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            state.toggle_log();
        }
        _ if state.alert().is_some() => handle_alert_key(state, event),
        _ if state.confirmation().is_some() => handle_confirmation_key(state, event),
        _ if state.form().is_some() => handle_form_key(state, event),
        _ => match state.route() {
            Route::AdminLogin => handle_admin_login_key(state, event),
            Route::Chatbot => handle_chat_key(state, event),
            route => handle_page_key(state, route, event),
        },
    }
    true
}

fn handle_alert_key(state: &mut State, event: KeyEvent) {
    if let KeyCode::Enter | KeyCode::Esc = event.code {
        debug!("Processing dismiss alert event '{:?}'...", event);
        state.dismiss_alert();
    }
}

fn handle_confirmation_key(state: &mut State, event: KeyEvent) {
    match event.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            debug!("Processing confirm event '{:?}'...", event);
            state.confirm();
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            debug!("Processing cancel confirmation event '{:?}'...", event);
            state.cancel_confirmation();
        }
        _ => {}
    }
}

fn handle_form_key(state: &mut State, event: KeyEvent) {
    match event {
        KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            state.switch_auth_mode();
        }
        KeyEvent {
            code: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => {
            if let Some(form) = state.form_mut() {
                form.clear_field();
            }
        }
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => {
            if let Some(form) = state.form_mut() {
                form.push_char(c);
            }
        }
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => {
            if let Some(form) = state.form_mut() {
                form.pop_char();
            }
        }
        KeyEvent {
            code: KeyCode::Tab | KeyCode::Down,
            ..
        } => {
            if let Some(form) = state.form_mut() {
                form.next_field();
            }
        }
        KeyEvent {
            code: KeyCode::BackTab | KeyCode::Up,
            ..
        } => {
            if let Some(form) = state.form_mut() {
                form.previous_field();
            }
        }
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => {
            debug!("Processing submit form event '{:?}'...", event);
            state.submit_form();
        }
        KeyEvent {
            code: KeyCode::Esc, ..
        } => {
            debug!("Processing close form event '{:?}'...", event);
            state.close_form();
        }
        _ => {}
    }
}

fn handle_admin_login_key(state: &mut State, event: KeyEvent) {
    match event {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => {
            state.admin_login_form_mut().push_char(c);
        }
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => {
            state.admin_login_form_mut().pop_char();
        }
        KeyEvent {
            code: KeyCode::Tab | KeyCode::Down,
            ..
        } => {
            state.admin_login_form_mut().next_field();
        }
        KeyEvent {
            code: KeyCode::BackTab | KeyCode::Up,
            ..
        } => {
            state.admin_login_form_mut().previous_field();
        }
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => {
            debug!("Processing admin login event '{:?}'...", event);
            state.submit_admin_login();
        }
        KeyEvent {
            code: KeyCode::Esc, ..
        } => {
            state.navigate(Page::Home, None);
        }
        _ => {}
    }
}

fn handle_chat_key(state: &mut State, event: KeyEvent) {
    match event {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        } => {
            state.push_chat_char(c);
        }
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => {
            state.pop_chat_char();
        }
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => {
            debug!("Processing send chat event '{:?}'...", event);
            state.send_chat();
        }
        KeyEvent {
            code: KeyCode::Esc, ..
        } => {
            state.navigate(Page::Home, None);
        }
        _ => {}
    }
}

fn handle_page_key(state: &mut State, route: Route, event: KeyEvent) {
    match event {
        KeyEvent {
            code: KeyCode::Char(c @ '1'..='7'),
            modifiers: KeyModifiers::NONE,
            ..
        } => {
            let index = c as usize - '1' as usize;
            let page = Page::ALL[index];
            debug!("Processing navigate to '{}' event '{:?}'...", page, event);
            state.navigate(page, None);
        }
        KeyEvent {
            code: KeyCode::Char('j') | KeyCode::Down,
            modifiers: KeyModifiers::NONE,
            ..
        } => {
            state.move_selection(true);
        }
        KeyEvent {
            code: KeyCode::Char('k') | KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            ..
        } => {
            state.move_selection(false);
        }
        KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            ..
        } => {
            debug!("Processing refresh event '{:?}'...", event);
            state.refresh();
        }
        KeyEvent {
            code: KeyCode::Char('u'),
            modifiers: KeyModifiers::NONE,
            ..
        } => {
            if state.session().is_user_authenticated() {
                debug!("Processing user logout event '{:?}'...", event);
                state.logout_user();
            } else {
                state.open_user_auth(None);
            }
        }
        _ => match route {
            Route::Schemes => handle_schemes_key(state, event),
            Route::SchemeDetail(_) => handle_detail_key(state, event),
            Route::SavedSchemes => handle_saved_key(state, event),
            Route::AdminDashboard => handle_dashboard_key(state, event),
            Route::Home | Route::Chatbot | Route::AdminLogin => {}
        },
    }
}

fn handle_schemes_key(state: &mut State, event: KeyEvent) {
    match event.code {
        KeyCode::Enter => {
            state.open_selected();
        }
        KeyCode::Char('f') | KeyCode::Char('/') => {
            state.open_filters();
        }
        KeyCode::Char('c') => {
            debug!("Processing clear filters event '{:?}'...", event);
            state.clear_filters();
        }
        KeyCode::F(n @ 1..=5) => {
            debug!("Processing toggle category event '{:?}'...", event);
            state.toggle_category(n as usize - 1);
        }
        _ => {}
    }
}

fn handle_detail_key(state: &mut State, event: KeyEvent) {
    match event.code {
        KeyCode::Char('a') => {
            debug!("Processing apply event '{:?}'...", event);
            state.apply();
        }
        KeyCode::Char('s') => {
            debug!("Processing toggle saved event '{:?}'...", event);
            state.toggle_saved();
        }
        KeyCode::Esc | KeyCode::Backspace => {
            state.navigate(Page::Schemes, None);
        }
        _ => {}
    }
}

fn handle_saved_key(state: &mut State, event: KeyEvent) {
    match event.code {
        KeyCode::Enter => {
            state.open_selected();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            state.request_remove_saved();
        }
        _ => {}
    }
}

fn handle_dashboard_key(state: &mut State, event: KeyEvent) {
    match event.code {
        KeyCode::Char('n') => {
            state.open_scheme_editor(false);
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            state.open_scheme_editor(true);
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            state.request_delete_scheme();
        }
        KeyCode::Char('o') => {
            debug!("Processing admin logout event '{:?}'...", event);
            state.logout_admin();
        }
        _ => {}
    }
}
