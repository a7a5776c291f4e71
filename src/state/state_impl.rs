use super::chat::{ChatMessage, CHAT_FAILED, CHAT_GREETING};
use super::form::{Confirmation, Form, FormKind};
use super::navigation::{Navigator, Page, Route};
use super::remote::Loadable;
use crate::api::{AdminLogin, Scheme, SchemeFilters, UserLogin};
use crate::app::NetworkEventSender;
use crate::events::network::{Credentials, Event as NetworkEvent};
use crate::session::Session;
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use crate::utils::{clipboard, text_processing::ministry_facets};
use chrono::Datelike;
use log::*;
use ratatui::widgets::{ListState, TableState};

pub const SCHEMES_LOAD_FAILED: &str = "Failed to load schemes. Please check your backend connection.";
pub const DETAIL_LOAD_FAILED: &str = "Failed to load scheme details.";
pub const SAVED_LOAD_FAILED: &str = "Failed to load saved schemes.";
pub const ADMIN_LOAD_FAILED: &str = "Failed to load schemes";
pub const TOGGLE_SAVED_FAILED: &str = "Failed to save/unsave scheme. Please try again.";
pub const REMOVE_SAVED_FAILED: &str = "Failed to remove scheme. Please try again.";
pub const ADMIN_SAVE_FAILED: &str = "Failed to save scheme";
pub const ADMIN_DELETE_FAILED: &str = "Failed to delete scheme";
pub const APPLY_LINK_MISSING: &str = "Apply link not available for this scheme.";
pub const ADMIN_LOGIN_FAILED: &str = "Invalid username or password.";

/// Quick category shortcuts on the schemes page: label and ministry filter.
///
pub const CATEGORIES: [(&str, &str); 5] = [
    ("Finance", "Ministry of Finance"),
    ("Health", "Ministry of Health & Family Welfare"),
    ("Agriculture", "Ministry of Agriculture & Farmers Welfare"),
    ("MSME/Industry", "Ministry of MSME"),
    ("Education", "Ministry of Education"),
];

const LOG_CAPACITY: usize = 500;

/// Detail-page action waiting for the user to sign in.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PendingAction {
    Apply(u64),
    Save(u64),
}

/// Houses data representative of application state.
///
pub struct State {
    net_sender: Option<NetworkEventSender>,
    session: Session,
    navigator: Navigator,
    theme: Theme,
    spinner_index: usize,
    log_entries: Vec<String>,
    log_visible: bool,
    schemes: Loadable<Vec<Scheme>>,
    ministries: Vec<String>,
    active_filters: SchemeFilters,
    active_category: Option<usize>,
    schemes_list_state: ListState,
    detail: Loadable<Option<Scheme>>,
    detail_saved: bool,
    detail_saving: bool,
    detail_scroll: u16,
    saved: Loadable<Vec<Scheme>>,
    saved_list_state: ListState,
    chat_messages: Vec<ChatMessage>,
    chat_input: String,
    chat_pending: bool,
    chat_session: u64,
    admin_login_form: Form,
    admin_schemes: Loadable<Vec<Scheme>>,
    admin_table_state: TableState,
    form: Option<Form>,
    confirmation: Option<Confirmation>,
    alert: Option<String>,
    notice: Option<String>,
    pending_action: Option<PendingAction>,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            net_sender: None,
            session: Session::in_memory(),
            navigator: Navigator::default(),
            theme: Theme::default(),
            spinner_index: 0,
            log_entries: vec![],
            log_visible: true,
            schemes: Loadable::default(),
            ministries: vec![],
            active_filters: SchemeFilters::default(),
            active_category: None,
            schemes_list_state: ListState::default(),
            detail: Loadable::default(),
            detail_saved: false,
            detail_saving: false,
            detail_scroll: 0,
            saved: Loadable::default(),
            saved_list_state: ListState::default(),
            chat_messages: vec![ChatMessage::assistant(CHAT_GREETING)],
            chat_input: String::new(),
            chat_pending: false,
            chat_session: 0,
            admin_login_form: Form::admin_login(),
            admin_schemes: Loadable::default(),
            admin_table_state: TableState::default(),
            form: None,
            confirmation: None,
            alert: None,
            notice: None,
            pending_action: None,
        }
    }
}

impl State {
    pub fn new(net_sender: NetworkEventSender, session: Session, navigator: Navigator, theme: Theme) -> Self {
        State {
            net_sender: Some(net_sender),
            session,
            navigator,
            theme,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Return the view to render.
    ///
    pub fn route(&self) -> Route {
        self.navigator.route()
    }

    /// Switch to the given page, applying the access guards and starting the
    /// page's data load.
    ///
    pub fn navigate(&mut self, page: Page, scheme_id: Option<u64>) -> &mut Self {
        let target = match page {
            Page::SavedSchemes if !self.session.is_user_authenticated() => {
                info!("Saved schemes need a signed-in user; returning home.");
                Page::Home
            }
            Page::AdminDashboard if !self.session.is_admin_authenticated() => {
                info!("Dashboard needs a signed-in administrator; opening admin login.");
                Page::AdminLogin
            }
            other => other,
        };
        debug!("Navigating to '{}' (scheme id: {:?})...", target, scheme_id);
        self.navigator.navigate(target, scheme_id);
        self.form = None;
        self.confirmation = None;
        self.pending_action = None;
        self.enter(self.navigator.route());
        self
    }

    /// Load the current page again.
    ///
    pub fn refresh(&mut self) -> &mut Self {
        self.enter(self.navigator.route());
        self
    }

    fn enter(&mut self, route: Route) {
        match route {
            Route::Home => {}
            Route::Schemes => {
                self.active_category = None;
                self.load_schemes(SchemeFilters::default());
            }
            Route::SchemeDetail(id) => {
                *self.detail.start().data_mut() = None;
                self.detail_saved = false;
                self.detail_saving = false;
                self.detail_scroll = 0;
                self.dispatch(NetworkEvent::LoadSchemeDetail { id });
            }
            Route::SavedSchemes => {
                self.saved.start();
                self.dispatch(NetworkEvent::LoadSavedSchemes);
            }
            Route::Chatbot => {
                self.chat_messages = vec![ChatMessage::assistant(CHAT_GREETING)];
                self.chat_input.clear();
                self.chat_pending = false;
                self.chat_session = self.chat_session.wrapping_add(1);
            }
            Route::AdminLogin => {
                self.admin_login_form = Form::admin_login();
            }
            Route::AdminDashboard => {
                self.admin_schemes.start();
                self.dispatch(NetworkEvent::AdminLoadSchemes);
            }
        }
    }

    /// Advance the spinner index.
    ///
    pub fn advance_spinner_index(&mut self) -> &mut Self {
        self.spinner_index += 1;
        if self.spinner_index >= SPINNER_FRAME_COUNT {
            self.spinner_index = 0;
        }
        self
    }

    /// Return the current spinner index.
    ///
    pub fn spinner_index(&self) -> usize {
        self.spinner_index
    }

    /// Append a formatted log line, dropping the oldest past capacity.
    ///
    pub fn push_log(&mut self, entry: String) -> &mut Self {
        self.log_entries.push(entry);
        if self.log_entries.len() > LOG_CAPACITY {
            let excess = self.log_entries.len() - LOG_CAPACITY;
            self.log_entries.drain(..excess);
        }
        self
    }

    pub fn log_entries(&self) -> &[String] {
        &self.log_entries
    }

    pub fn is_log_visible(&self) -> bool {
        self.log_visible
    }

    pub fn toggle_log(&mut self) -> &mut Self {
        self.log_visible = !self.log_visible;
        self
    }

    // Schemes

    pub fn schemes(&self) -> &Loadable<Vec<Scheme>> {
        &self.schemes
    }

    pub fn ministries(&self) -> &[String] {
        &self.ministries
    }

    pub fn active_filters(&self) -> &SchemeFilters {
        &self.active_filters
    }

    pub fn active_category(&self) -> Option<usize> {
        self.active_category
    }

    pub fn schemes_list_state(&mut self) -> &mut ListState {
        &mut self.schemes_list_state
    }

    /// Request the scheme listing for the given filters.
    ///
    pub fn load_schemes(&mut self, filters: SchemeFilters) -> &mut Self {
        self.active_filters = filters.clone();
        self.schemes.start();
        self.dispatch(NetworkEvent::LoadSchemes { filters });
        self
    }

    /// Toggle the quick category with the given index. Selecting the active
    /// category again clears the ministry filter.
    ///
    pub fn toggle_category(&mut self, index: usize) -> &mut Self {
        let Some((label, ministry)) = CATEGORIES.get(index) else {
            return self;
        };
        if self.active_category == Some(index) {
            debug!("Clearing category '{}'.", label);
            self.active_category = None;
            self.load_schemes(SchemeFilters::default())
        } else {
            debug!("Filtering by category '{}'.", label);
            self.active_category = Some(index);
            self.load_schemes(SchemeFilters::ministry(ministry))
        }
    }

    /// Drop every filter and reload the full listing.
    ///
    pub fn clear_filters(&mut self) -> &mut Self {
        self.active_category = None;
        self.load_schemes(SchemeFilters::default())
    }

    /// Store a listing response. Facets only follow unfiltered listings.
    ///
    pub fn set_schemes(&mut self, filters: &SchemeFilters, schemes: Vec<Scheme>) -> &mut Self {
        if filters.is_empty() {
            self.ministries = ministry_facets(&schemes);
        }
        self.schemes_list_state
            .select(if schemes.is_empty() { None } else { Some(0) });
        self.schemes.succeed(schemes);
        self
    }

    pub fn schemes_failed(&mut self) -> &mut Self {
        self.schemes.fail(SCHEMES_LOAD_FAILED);
        self
    }

    // Lists

    fn select_step(list_state: &mut ListState, len: usize, forward: bool) {
        if len == 0 {
            list_state.select(None);
            return;
        }
        let next = match list_state.selected() {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        list_state.select(Some(next));
    }

    /// Move the selection of the current page's list, or scroll the detail
    /// page.
    ///
    pub fn move_selection(&mut self, forward: bool) -> &mut Self {
        match self.route() {
            Route::Schemes => {
                let len = self.schemes.data().len();
                Self::select_step(&mut self.schemes_list_state, len, forward);
            }
            Route::SavedSchemes => {
                let len = self.saved.data().len();
                Self::select_step(&mut self.saved_list_state, len, forward);
            }
            Route::AdminDashboard => {
                let len = self.admin_schemes.data().len();
                let mut rows = ListState::default().with_selected(self.admin_table_state.selected());
                Self::select_step(&mut rows, len, forward);
                self.admin_table_state.select(rows.selected());
            }
            Route::SchemeDetail(_) => {
                self.detail_scroll = if forward {
                    self.detail_scroll.saturating_add(1)
                } else {
                    self.detail_scroll.saturating_sub(1)
                };
            }
            Route::Home | Route::Chatbot | Route::AdminLogin => {}
        }
        self
    }

    /// Return the highlighted scheme of the current page's list.
    ///
    pub fn selected_scheme(&self) -> Option<&Scheme> {
        let (list, index) = match self.route() {
            Route::Schemes => (self.schemes.data(), self.schemes_list_state.selected()),
            Route::SavedSchemes => (self.saved.data(), self.saved_list_state.selected()),
            Route::AdminDashboard => (self.admin_schemes.data(), self.admin_table_state.selected()),
            _ => return None,
        };
        index.and_then(|i| list.get(i))
    }

    /// Open the detail page of the highlighted scheme.
    ///
    pub fn open_selected(&mut self) -> &mut Self {
        match self.selected_scheme().map(|s| s.id) {
            Some(id) => self.navigate(Page::SchemeDetail, Some(id)),
            None => self,
        }
    }

    // Scheme detail

    pub fn detail(&self) -> &Loadable<Option<Scheme>> {
        &self.detail
    }

    pub fn is_detail_saved(&self) -> bool {
        self.detail_saved
    }

    pub fn is_detail_saving(&self) -> bool {
        self.detail_saving
    }

    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    /// Returns true if a detail response for the id should still be shown.
    ///
    pub fn awaits_detail(&self, id: u64) -> bool {
        self.route() == Route::SchemeDetail(id)
    }

    pub fn set_detail(&mut self, id: u64, scheme: Scheme) -> &mut Self {
        if !self.awaits_detail(id) {
            debug!("Discarding stale detail response for scheme {}.", id);
            return self;
        }
        self.detail.succeed(Some(scheme));
        self
    }

    pub fn detail_failed(&mut self, id: u64) -> &mut Self {
        if !self.awaits_detail(id) {
            debug!("Discarding stale detail failure for scheme {}.", id);
            return self;
        }
        self.detail.fail(DETAIL_LOAD_FAILED);
        self
    }

    /// Record whether the displayed scheme is in the user's saved list.
    ///
    pub fn set_detail_saved(&mut self, id: u64, saved: bool) -> &mut Self {
        if self.awaits_detail(id) {
            self.detail_saved = saved;
        }
        self
    }

    fn detail_scheme_id(&self) -> Option<u64> {
        match self.route() {
            Route::SchemeDetail(id) => self
                .detail
                .data()
                .as_ref()
                .filter(|s| s.id == id)
                .map(|s| s.id),
            _ => None,
        }
    }

    /// Copy the displayed scheme's apply link, asking the user to sign in
    /// first if needed.
    ///
    pub fn apply(&mut self) -> &mut Self {
        let Some(id) = self.detail_scheme_id() else {
            return self;
        };
        if !self.session.is_user_authenticated() {
            return self.open_user_auth(Some(PendingAction::Apply(id)));
        }
        self.open_apply_link()
    }

    fn open_apply_link(&mut self) -> &mut Self {
        let link = self
            .detail
            .data()
            .as_ref()
            .and_then(|s| s.apply_link())
            .map(str::to_owned);
        match link {
            Some(link) => {
                self.notice = Some(if clipboard::copy(&link) {
                    format!("Apply link copied to clipboard: {}", link)
                } else {
                    format!("Apply at: {}", link)
                });
            }
            None => self.show_alert(APPLY_LINK_MISSING),
        }
        self
    }

    /// Save or unsave the displayed scheme, asking the user to sign in first
    /// if needed.
    ///
    pub fn toggle_saved(&mut self) -> &mut Self {
        let Some(id) = self.detail_scheme_id() else {
            return self;
        };
        if !self.session.is_user_authenticated() {
            return self.open_user_auth(Some(PendingAction::Save(id)));
        }
        if self.detail_saving {
            return self;
        }
        self.detail_saving = true;
        let saved = self.detail_saved;
        self.dispatch(NetworkEvent::ToggleSaved { id, saved });
        self
    }

    pub fn saved_toggled(&mut self, id: u64, saved: bool) -> &mut Self {
        self.detail_saving = false;
        self.set_detail_saved(id, saved)
    }

    pub fn toggle_saved_failed(&mut self) -> &mut Self {
        self.detail_saving = false;
        self.show_alert(TOGGLE_SAVED_FAILED);
        self
    }

    // Saved schemes

    pub fn saved(&self) -> &Loadable<Vec<Scheme>> {
        &self.saved
    }

    pub fn saved_list_state(&mut self) -> &mut ListState {
        &mut self.saved_list_state
    }

    pub fn set_saved(&mut self, schemes: Vec<Scheme>) -> &mut Self {
        let len = schemes.len();
        self.saved.succeed(schemes);
        match self.saved_list_state.selected() {
            _ if len == 0 => self.saved_list_state.select(None),
            Some(i) if i < len => {}
            _ => self.saved_list_state.select(Some(0)),
        }
        self
    }

    pub fn saved_failed(&mut self) -> &mut Self {
        self.saved.fail(SAVED_LOAD_FAILED);
        self
    }

    /// Ask to remove the highlighted saved scheme.
    ///
    pub fn request_remove_saved(&mut self) -> &mut Self {
        if self.route() != Route::SavedSchemes {
            return self;
        }
        let confirmation = self.selected_scheme().map(|scheme| Confirmation::RemoveSaved {
            id: scheme.id,
            name: scheme.name.to_owned(),
        });
        if confirmation.is_some() {
            self.confirmation = confirmation;
        }
        self
    }

    pub fn saved_removed(&mut self, id: u64) -> &mut Self {
        let mut remaining = self.saved.data().clone();
        remaining.retain(|s| s.id != id);
        self.set_saved(remaining)
    }

    pub fn remove_saved_failed(&mut self) -> &mut Self {
        self.show_alert(REMOVE_SAVED_FAILED);
        self
    }

    // Chat

    pub fn chat_messages(&self) -> &[ChatMessage] {
        &self.chat_messages
    }

    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    pub fn is_chat_pending(&self) -> bool {
        self.chat_pending
    }

    pub fn push_chat_char(&mut self, c: char) -> &mut Self {
        self.chat_input.push(c);
        self
    }

    pub fn pop_chat_char(&mut self) -> &mut Self {
        self.chat_input.pop();
        self
    }

    /// Send the compose line to the assistant. Blank prompts and prompts
    /// sent while a reply is pending are ignored.
    ///
    pub fn send_chat(&mut self) -> &mut Self {
        if self.chat_input.trim().is_empty() || self.chat_pending {
            return self;
        }
        let prompt = std::mem::take(&mut self.chat_input);
        self.chat_messages.push(ChatMessage::user(&prompt));
        self.chat_pending = true;
        self.dispatch(NetworkEvent::SendChat {
            prompt,
            session: self.chat_session,
        });
        self
    }

    /// Returns true while a reply for the given transcript is still wanted.
    /// Re-entering the chatbot starts a new transcript.
    ///
    pub fn awaits_chat(&self, session: u64) -> bool {
        self.chat_pending && self.chat_session == session
    }

    pub fn chat_replied(&mut self, session: u64, reply: &str) -> &mut Self {
        if !self.awaits_chat(session) {
            debug!("Discarding chat reply for an earlier transcript.");
            return self;
        }
        self.chat_messages.push(ChatMessage::assistant(reply));
        self.chat_pending = false;
        self
    }

    pub fn chat_failed(&mut self, session: u64) -> &mut Self {
        self.chat_replied(session, CHAT_FAILED)
    }

    // Administrator

    pub fn admin_login_form(&self) -> &Form {
        &self.admin_login_form
    }

    pub fn admin_login_form_mut(&mut self) -> &mut Form {
        &mut self.admin_login_form
    }

    /// Send the admin login form.
    ///
    pub fn submit_admin_login(&mut self) -> &mut Self {
        if self.admin_login_form.is_submitting() {
            return self;
        }
        match self.admin_login_form.credentials() {
            Ok((login, password)) => {
                self.admin_login_form.set_submitting(true).set_error(None);
                self.dispatch(NetworkEvent::AdminLogin {
                    credentials: Credentials { login, password },
                });
            }
            Err(e) => {
                self.admin_login_form.set_error(Some(e.to_string()));
            }
        }
        self
    }

    /// Store the administrator identity and open the dashboard.
    ///
    pub fn admin_signed_in(&mut self, login: AdminLogin) -> &mut Self {
        if let Err(e) = self.session.login_admin(login.token, login.admin) {
            error!("Failed to persist administrator session: {}", e);
        }
        self.admin_login_form = Form::admin_login();
        self.navigate(Page::AdminDashboard, None)
    }

    pub fn admin_login_failed(&mut self) -> &mut Self {
        self.admin_login_form
            .set_submitting(false)
            .set_error(Some(ADMIN_LOGIN_FAILED.to_string()));
        self
    }

    pub fn logout_admin(&mut self) -> &mut Self {
        if let Err(e) = self.session.logout_admin() {
            error!("Failed to clear administrator session: {}", e);
        }
        if self.navigator.current_page() == Page::AdminDashboard {
            self.navigate(Page::AdminLogin, None);
        }
        self
    }

    pub fn admin_schemes(&self) -> &Loadable<Vec<Scheme>> {
        &self.admin_schemes
    }

    pub fn admin_table_state(&mut self) -> &mut TableState {
        &mut self.admin_table_state
    }

    pub fn set_admin_schemes(&mut self, schemes: Vec<Scheme>) -> &mut Self {
        let len = schemes.len();
        self.admin_schemes.succeed(schemes);
        match self.admin_table_state.selected() {
            _ if len == 0 => self.admin_table_state.select(None),
            Some(i) if i < len => {}
            _ => self.admin_table_state.select(Some(0)),
        }
        self
    }

    pub fn admin_schemes_failed(&mut self) -> &mut Self {
        self.admin_schemes.fail(ADMIN_LOAD_FAILED);
        self
    }

    /// Open the scheme editor, pre-filled with the highlighted scheme when
    /// editing.
    ///
    pub fn open_scheme_editor(&mut self, edit: bool) -> &mut Self {
        if self.route() != Route::AdminDashboard {
            return self;
        }
        let year = chrono::Local::now().year();
        let selected = self.selected_scheme().cloned();
        self.form = match (edit, selected) {
            (true, Some(scheme)) => Some(Form::scheme_editor(Some(&scheme), year)),
            (true, None) => return self,
            (false, _) => Some(Form::scheme_editor(None, year)),
        };
        self
    }

    /// Ask to delete the highlighted scheme.
    ///
    pub fn request_delete_scheme(&mut self) -> &mut Self {
        if self.route() != Route::AdminDashboard {
            return self;
        }
        let confirmation = self.selected_scheme().map(|scheme| Confirmation::DeleteScheme {
            id: scheme.id,
            name: scheme.name.to_owned(),
        });
        if confirmation.is_some() {
            self.confirmation = confirmation;
        }
        self
    }

    /// Close the editor and reload the table after a successful write.
    ///
    pub fn scheme_saved(&mut self) -> &mut Self {
        self.form = None;
        self.admin_schemes.start();
        self.dispatch(NetworkEvent::AdminLoadSchemes);
        self
    }

    pub fn save_scheme_failed(&mut self) -> &mut Self {
        if let Some(form) = self.form.as_mut() {
            form.set_submitting(false);
        }
        self.show_alert(ADMIN_SAVE_FAILED);
        self
    }

    pub fn scheme_deleted(&mut self) -> &mut Self {
        self.admin_schemes.start();
        self.dispatch(NetworkEvent::AdminLoadSchemes);
        self
    }

    pub fn delete_scheme_failed(&mut self) -> &mut Self {
        self.show_alert(ADMIN_DELETE_FAILED);
        self
    }

    // User authentication

    /// Open the sign-in modal, remembering the action to resume after login.
    ///
    pub fn open_user_auth(&mut self, pending: Option<PendingAction>) -> &mut Self {
        self.pending_action = pending;
        self.form = Some(Form::user_login());
        self
    }

    /// Switch the sign-in modal between login and registration.
    ///
    pub fn switch_auth_mode(&mut self) -> &mut Self {
        let next = match self.form.as_ref().map(Form::kind) {
            Some(FormKind::UserLogin) => Form::user_register(),
            Some(FormKind::UserRegister) => Form::user_login(),
            _ => return self,
        };
        self.form = Some(next);
        self
    }

    pub fn pending_action(&self) -> Option<PendingAction> {
        self.pending_action
    }

    /// Store the user identity, close the modal and resume the pending
    /// detail-page action.
    ///
    pub fn user_signed_in(&mut self, login: UserLogin) -> &mut Self {
        if let Err(e) = self.session.login_user(login.token, login.user) {
            error!("Failed to persist user session: {}", e);
        }
        self.form = None;
        let pending = self.pending_action.take();
        let shown = self.detail_scheme_id();
        match pending {
            Some(PendingAction::Apply(id)) if shown == Some(id) => self.open_apply_link(),
            Some(PendingAction::Save(id)) if shown == Some(id) => self.toggle_saved(),
            _ => self,
        }
    }

    pub fn user_auth_failed(&mut self, message: &str) -> &mut Self {
        if let Some(form) = self.form.as_mut() {
            form.set_submitting(false).set_error(Some(message.to_owned()));
        }
        self
    }

    pub fn logout_user(&mut self) -> &mut Self {
        if let Err(e) = self.session.logout_user() {
            error!("Failed to clear user session: {}", e);
        }
        self.detail_saved = false;
        if self.navigator.current_page() == Page::SavedSchemes {
            self.navigate(Page::Home, None);
        }
        self
    }

    // Forms and dialogs

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.form.as_mut()
    }

    /// Open the filter bar with the active filters.
    ///
    pub fn open_filters(&mut self) -> &mut Self {
        if self.route() == Route::Schemes {
            self.form = Some(Form::filters(&self.active_filters));
        }
        self
    }

    pub fn close_form(&mut self) -> &mut Self {
        self.form = None;
        self.pending_action = None;
        self
    }

    /// Submit the open modal form.
    ///
    pub fn submit_form(&mut self) -> &mut Self {
        let Some(kind) = self.form.as_ref().map(Form::kind) else {
            return self;
        };
        if self.form.as_ref().map_or(false, Form::is_submitting) {
            return self;
        }
        if kind == FormKind::Filters {
            let filters = self.form.take().map(|f| f.scheme_filters()).unwrap_or_default();
            self.active_category = None;
            return self.load_schemes(filters);
        }
        let Some(form) = self.form.as_mut() else {
            return self;
        };
        let event = match kind {
            FormKind::UserLogin | FormKind::AdminLogin => form
                .credentials()
                .map(|(login, password)| Credentials { login, password })
                .map(|credentials| match kind {
                    FormKind::AdminLogin => NetworkEvent::AdminLogin { credentials },
                    _ => NetworkEvent::UserLogin { credentials },
                }),
            FormKind::UserRegister => form
                .new_user()
                .map(|new_user| NetworkEvent::UserRegister { new_user }),
            FormKind::SchemeEditor { scheme_id } => form
                .scheme_payload()
                .map(|payload| NetworkEvent::AdminSaveScheme { id: scheme_id, payload }),
            FormKind::Filters => return self,
        };
        match event {
            Ok(event) => {
                form.set_submitting(true).set_error(None);
                self.dispatch(event);
            }
            Err(e) => {
                form.set_error(Some(e.to_string()));
            }
        }
        self
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Carry out the confirmed action.
    ///
    pub fn confirm(&mut self) -> &mut Self {
        match self.confirmation.take() {
            Some(Confirmation::DeleteScheme { id, .. }) => {
                self.dispatch(NetworkEvent::AdminDeleteScheme { id });
            }
            Some(Confirmation::RemoveSaved { id, .. }) => {
                self.dispatch(NetworkEvent::RemoveSaved { id });
            }
            None => {}
        }
        self
    }

    pub fn cancel_confirmation(&mut self) -> &mut Self {
        self.confirmation = None;
        self
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn show_alert(&mut self, message: &str) {
        warn!("{}", message);
        self.alert = Some(message.to_owned());
    }

    pub fn dismiss_alert(&mut self) -> &mut Self {
        self.alert = None;
        self
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) -> &mut Self {
        self.notice = None;
        self
    }

    /// Send the event to the network thread.
    ///
    pub fn dispatch(&self, event: NetworkEvent) {
        if let Some(net_sender) = &self.net_sender {
            if let Err(err) = net_sender.send(event) {
                error!("Received error from network dispatch: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AdminProfile, UserProfile};
    use crate::session::{MemoryStore, ADMIN_DATA_KEY, ADMIN_TOKEN_KEY, USER_DATA_KEY, USER_TOKEN_KEY};
    use fake::{Fake, Faker};
    use std::sync::mpsc::{self, Receiver};

    fn connected(session: Session) -> (State, Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        let state = State::new(tx, session, Navigator::new(), Theme::default());
        (state, rx)
    }

    fn user_session() -> Session {
        let user: UserProfile = Faker.fake();
        let data = serde_json::to_string(&user).unwrap();
        Session::hydrate(Box::new(MemoryStore::with_entries(&[
            (USER_TOKEN_KEY, "user-token"),
            (USER_DATA_KEY, data.as_str()),
        ])))
    }

    fn admin_session() -> Session {
        let admin: AdminProfile = Faker.fake();
        let data = serde_json::to_string(&admin).unwrap();
        Session::hydrate(Box::new(MemoryStore::with_entries(&[
            (ADMIN_TOKEN_KEY, "admin-token"),
            (ADMIN_DATA_KEY, data.as_str()),
        ])))
    }

    fn scheme(id: u64, name: &str, link: Option<&str>) -> Scheme {
        let mut scheme: Scheme = Faker.fake();
        scheme.id = id;
        scheme.name = name.to_string();
        scheme.apply_link = link.map(str::to_string);
        scheme
    }

    fn open_detail(state: &mut State, scheme: Scheme) {
        let id = scheme.id;
        state.navigate(Page::SchemeDetail, Some(id));
        state.set_detail(id, scheme);
    }

    #[test]
    fn saved_schemes_without_user_redirects_home() {
        let (mut state, rx) = connected(Session::in_memory());
        state.navigate(Page::SavedSchemes, None);
        assert_eq!(state.route(), Route::Home);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dashboard_without_admin_redirects_to_login() {
        let (mut state, rx) = connected(Session::in_memory());
        state.navigate(Page::AdminDashboard, None);
        assert_eq!(state.route(), Route::AdminLogin);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dashboard_with_admin_loads_table() {
        let (mut state, rx) = connected(admin_session());
        state.navigate(Page::AdminDashboard, None);
        assert_eq!(state.route(), Route::AdminDashboard);
        assert!(state.admin_schemes().is_loading());
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::AdminLoadSchemes)));
    }

    #[test]
    fn entering_schemes_resets_filters() {
        let (mut state, rx) = connected(Session::in_memory());
        state.toggle_category(0);
        assert!(matches!(
            rx.try_recv(),
            Ok(NetworkEvent::LoadSchemes { filters }) if filters == SchemeFilters::ministry("Ministry of Finance")
        ));
        state.navigate(Page::Home, None).navigate(Page::Schemes, None);
        assert_eq!(state.active_category(), None);
        assert!(state.active_filters().is_empty());
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::LoadSchemes { filters }) if filters.is_empty()));
    }

    #[test]
    fn toggling_active_category_clears_filter() {
        let (mut state, rx) = connected(Session::in_memory());
        state.toggle_category(1).toggle_category(1);
        assert_eq!(state.active_category(), None);
        let events: Vec<NetworkEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], NetworkEvent::LoadSchemes { filters } if filters.is_empty()));
    }

    #[test]
    fn facets_only_follow_unfiltered_listings() {
        let mut state = State::default();
        let mut finance = scheme(1, "Stand-Up India", None);
        finance.ministry = "Ministry of Finance".to_string();
        let mut education = scheme(2, "PM eVidya", None);
        education.ministry = "Ministry of Education".to_string();

        state.set_schemes(&SchemeFilters::default(), vec![finance.clone(), education]);
        assert_eq!(state.ministries(), ["Ministry of Education", "Ministry of Finance"]);

        state.set_schemes(&SchemeFilters::ministry("Ministry of Finance"), vec![finance]);
        assert_eq!(state.schemes().data().len(), 1);
        assert_eq!(state.ministries().len(), 2);
    }

    #[test]
    fn stale_detail_response_is_discarded() {
        let (mut state, _rx) = connected(Session::in_memory());
        state.navigate(Page::SchemeDetail, Some(1));
        state.navigate(Page::SchemeDetail, Some(2));
        state.set_detail(1, scheme(1, "Old", None));
        assert!(state.detail().data().is_none());
        assert!(state.detail().is_loading());
        state.detail_failed(2);
        assert_eq!(state.detail().error(), Some(DETAIL_LOAD_FAILED));
    }

    #[test]
    fn apply_without_user_opens_auth_modal() {
        let (mut state, _rx) = connected(Session::in_memory());
        open_detail(&mut state, scheme(4, "PMAY", Some("https://pmaymis.gov.in")));
        state.apply();
        assert_eq!(state.form().map(Form::kind), Some(FormKind::UserLogin));
        assert_eq!(state.pending_action(), Some(PendingAction::Apply(4)));
    }

    #[test]
    fn apply_without_link_raises_alert() {
        let (mut state, _rx) = connected(user_session());
        open_detail(&mut state, scheme(4, "PMAY", Some("  ")));
        state.apply();
        assert_eq!(state.alert(), Some(APPLY_LINK_MISSING));
        state.dismiss_alert();
        assert_eq!(state.alert(), None);
    }

    #[test]
    fn pending_save_resumes_after_login() {
        let (mut state, rx) = connected(Session::in_memory());
        open_detail(&mut state, scheme(9, "PM-KISAN", None));
        let _ = rx.try_iter().count();
        state.toggle_saved();
        assert_eq!(state.pending_action(), Some(PendingAction::Save(9)));

        state.user_signed_in(UserLogin {
            token: "user-token".to_string(),
            user: Faker.fake(),
        });
        assert!(state.session().is_user_authenticated());
        assert!(state.form().is_none());
        assert!(state.is_detail_saving());
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::ToggleSaved { id: 9, saved: false })));
    }

    #[test]
    fn toggle_saved_failure_raises_alert() {
        let (mut state, _rx) = connected(user_session());
        open_detail(&mut state, scheme(9, "PM-KISAN", None));
        state.toggle_saved().toggle_saved_failed();
        assert!(!state.is_detail_saving());
        assert!(!state.is_detail_saved());
        assert_eq!(state.alert(), Some(TOGGLE_SAVED_FAILED));
    }

    #[test]
    fn send_chat_ignores_blank_and_pending() {
        let (mut state, rx) = connected(Session::in_memory());
        state.navigate(Page::Chatbot, None);
        state.push_chat_char(' ').send_chat();
        assert_eq!(state.chat_messages().len(), 1);

        for c in "eligibility?".chars() {
            state.push_chat_char(c);
        }
        state.send_chat();
        assert!(state.is_chat_pending());
        assert_eq!(state.chat_input(), "");
        for c in "again".chars() {
            state.push_chat_char(c);
        }
        state.send_chat();
        assert_eq!(state.chat_messages().len(), 2);
        assert_eq!(rx.try_iter().count(), 1);

        state.chat_failed(1);
        assert!(!state.is_chat_pending());
        assert_eq!(
            state.chat_messages().last().map(|m| m.text.as_str()),
            Some(CHAT_FAILED)
        );
    }

    #[test]
    fn entering_chatbot_resets_transcript() {
        let mut state = State::default();
        state.navigate(Page::Chatbot, None);
        for c in "hello".chars() {
            state.push_chat_char(c);
        }
        state.send_chat();
        assert_eq!(state.chat_messages().len(), 2);
        state.navigate(Page::Chatbot, None);
        assert_eq!(state.chat_messages().len(), 1);
        assert_eq!(state.chat_messages()[0].text, CHAT_GREETING);
    }

    #[test]
    fn reply_for_earlier_transcript_is_discarded() {
        let (mut state, rx) = connected(Session::in_memory());
        let ask = |state: &mut State, question: &str| -> u64 {
            for c in question.chars() {
                state.push_chat_char(c);
            }
            state.send_chat();
            match rx.try_recv() {
                Ok(NetworkEvent::SendChat { session, .. }) => session,
                other => panic!("unexpected event {:?}", other),
            }
        };

        state.navigate(Page::Chatbot, None);
        let first = ask(&mut state, "question A");
        state.navigate(Page::Home, None).navigate(Page::Chatbot, None);
        let second = ask(&mut state, "question B");
        assert_ne!(first, second);

        state.chat_replied(first, "answer to A");
        assert!(state.is_chat_pending());
        let texts: Vec<&str> = state.chat_messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec![CHAT_GREETING, "question B"]);

        state.chat_replied(second, "answer to B");
        assert!(!state.is_chat_pending());
        assert_eq!(
            state.chat_messages().last().map(|m| m.text.as_str()),
            Some("answer to B")
        );
    }

    #[test]
    fn admin_login_success_opens_dashboard() {
        let (mut state, rx) = connected(Session::in_memory());
        state.navigate(Page::AdminLogin, None);
        state.admin_signed_in(AdminLogin {
            token: "admin-token".to_string(),
            admin: Faker.fake(),
        });
        assert_eq!(state.route(), Route::AdminDashboard);
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::AdminLoadSchemes)));
    }

    #[test]
    fn admin_login_failure_shows_message() {
        let mut state = State::default();
        state.admin_login_form_mut().set_submitting(true);
        state.admin_login_failed();
        assert!(!state.admin_login_form().is_submitting());
        assert_eq!(state.admin_login_form().error(), Some(ADMIN_LOGIN_FAILED));
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut state, rx) = connected(admin_session());
        state.navigate(Page::AdminDashboard, None);
        state.set_admin_schemes(vec![scheme(3, "Startup India", None)]);
        let _ = rx.try_iter().count();

        state.request_delete_scheme();
        assert!(rx.try_recv().is_err());
        assert!(state.confirmation().unwrap().prompt().contains("Startup India"));

        state.confirm();
        assert!(state.confirmation().is_none());
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::AdminDeleteScheme { id: 3 })));
    }

    #[test]
    fn invalid_editor_stays_open_with_error() {
        let (mut state, rx) = connected(admin_session());
        state.navigate(Page::AdminDashboard, None);
        let _ = rx.try_iter().count();
        state.open_scheme_editor(false).submit_form();
        let form = state.form().unwrap();
        assert!(form.error().is_some());
        assert!(!form.is_submitting());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn filter_form_submission_reloads_listing() {
        let (mut state, rx) = connected(Session::in_memory());
        state.navigate(Page::Schemes, None);
        let _ = rx.try_iter().count();
        state.open_filters();
        for c in "scholarship".chars() {
            state.form_mut().unwrap().push_char(c);
        }
        state.submit_form();
        assert!(state.form().is_none());
        assert_eq!(state.active_filters().q.as_deref(), Some("scholarship"));
        assert!(matches!(rx.try_recv(), Ok(NetworkEvent::LoadSchemes { .. })));
    }

    #[test]
    fn saved_removed_drops_entry() {
        let mut state = State::default();
        state.set_saved(vec![scheme(1, "A", None), scheme(2, "B", None)]);
        state.saved_removed(1);
        assert_eq!(state.saved().data().len(), 1);
        assert_eq!(state.saved().data()[0].id, 2);
    }

    #[test]
    fn logout_user_leaves_saved_page() {
        let (mut state, _rx) = connected(user_session());
        state.navigate(Page::SavedSchemes, None);
        assert_eq!(state.route(), Route::SavedSchemes);
        state.logout_user();
        assert!(!state.session().is_user_authenticated());
        assert_eq!(state.route(), Route::Home);
    }

    #[test]
    fn log_is_bounded() {
        let mut state = State::default();
        for i in 0..(LOG_CAPACITY + 10) {
            state.push_log(format!("line {}", i));
        }
        assert_eq!(state.log_entries().len(), LOG_CAPACITY);
        assert_eq!(state.log_entries()[0], "line 10");
    }

    #[test]
    fn selection_wraps() {
        let (mut state, _rx) = connected(Session::in_memory());
        state.navigate(Page::Schemes, None);
        state.set_schemes(
            &SchemeFilters::default(),
            vec![scheme(1, "A", None), scheme(2, "B", None)],
        );
        state.move_selection(false);
        assert_eq!(state.selected_scheme().map(|s| s.id), Some(2));
        state.move_selection(true);
        assert_eq!(state.selected_scheme().map(|s| s.id), Some(1));
    }
}
