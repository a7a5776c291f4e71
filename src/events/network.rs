use crate::api::{Api, ApiError, NewUser, SchemeFilters, SchemePayload};
use crate::state::{State, StateError};
use anyhow::Result;
use log::*;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Login name and password typed into a sign-in form.
///
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadSchemes { filters: SchemeFilters },
    LoadSchemeDetail { id: u64 },
    ToggleSaved { id: u64, saved: bool },
    LoadSavedSchemes,
    RemoveSaved { id: u64 },
    SendChat { prompt: String, session: u64 },
    AdminLogin { credentials: Credentials },
    AdminLoadSchemes,
    AdminSaveScheme { id: Option<u64>, payload: SchemePayload },
    AdminDeleteScheme { id: u64 },
    UserLogin { credentials: Credentials },
    UserRegister { new_user: NewUser },
}

/// Pick the message shown in a sign-in form after a failed request.
///
fn auth_failure_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Status { status, message } if (400..500).contains(status) && message.len() <= 120 => {
            message.to_owned()
        }
        _ => fallback.to_owned(),
    }
}

/// Handle the event on its own task so a slow request does not hold up the
/// ones sent after it.
///
pub fn spawn(state: Arc<Mutex<State>>, api: Arc<Api>, event: Event) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut handler = Handler::new(&state, &api);
        if let Err(e) = handler.handle(event).await {
            error!("Failed to handle network event: {}", e);
        }
    })
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a Api,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, api: &'a Api) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::LoadSchemes { filters } => self.load_schemes(filters).await?,
            Event::LoadSchemeDetail { id } => self.load_scheme_detail(id).await?,
            Event::ToggleSaved { id, saved } => self.toggle_saved(id, saved).await?,
            Event::LoadSavedSchemes => self.load_saved_schemes().await?,
            Event::RemoveSaved { id } => self.remove_saved(id).await?,
            Event::SendChat { prompt, session } => self.send_chat(prompt, session).await?,
            Event::AdminLogin { credentials } => self.admin_login(credentials).await?,
            Event::AdminLoadSchemes => self.admin_load_schemes().await?,
            Event::AdminSaveScheme { id, payload } => self.admin_save_scheme(id, payload).await?,
            Event::AdminDeleteScheme { id } => self.admin_delete_scheme(id).await?,
            Event::UserLogin { credentials } => self.user_login(credentials).await?,
            Event::UserRegister { new_user } => self.user_register(new_user).await?,
        }
        Ok(())
    }

    async fn user_token(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.session().user_token().map(str::to_owned)
    }

    async fn admin_token(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.session().admin_token().map(str::to_owned)
    }

    /// Update state with the scheme listing for the given filters.
    ///
    async fn load_schemes(&mut self, filters: SchemeFilters) -> Result<()> {
        info!("Fetching schemes...");
        let result = self.api.schemes(&filters).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(schemes) => {
                info!("Received {} schemes.", schemes.len());
                state.set_schemes(&filters, schemes);
            }
            Err(_) => {
                state.schemes_failed();
            }
        }
        Ok(())
    }

    /// Update state with a single scheme and, for a signed-in user, whether
    /// it is saved.
    ///
    async fn load_scheme_detail(&mut self, id: u64) -> Result<()> {
        info!("Fetching scheme {}...", id);
        match self.api.scheme(id).await {
            Ok(scheme) => {
                let mut state = self.state.lock().await;
                state.set_detail(id, scheme);
            }
            Err(_) => {
                let mut state = self.state.lock().await;
                state.detail_failed(id);
                return Ok(());
            }
        }
        if let Some(token) = self.user_token().await {
            match self.api.saved_schemes(&token).await {
                Ok(saved) => {
                    let is_saved = saved.iter().any(|s| s.id == id);
                    let mut state = self.state.lock().await;
                    state.set_detail_saved(id, is_saved);
                }
                Err(e) => {
                    warn!("Could not look up saved state of scheme {}: {}", id, e);
                }
            }
        }
        Ok(())
    }

    /// Save or unsave a scheme for the signed-in user.
    ///
    async fn toggle_saved(&mut self, id: u64, saved: bool) -> Result<()> {
        let Some(token) = self.user_token().await else {
            self.state.lock().await.toggle_saved_failed();
            return Err(StateError::UserNotSignedIn.into());
        };
        let result = if saved {
            self.api.delete_saved_scheme(id, &token).await
        } else {
            self.api.save_scheme(id, &token).await
        };
        let mut state = self.state.lock().await;
        match result {
            Ok(_) => {
                info!("Scheme {} is now {}.", id, if saved { "unsaved" } else { "saved" });
                state.saved_toggled(id, !saved);
            }
            Err(_) => {
                state.toggle_saved_failed();
            }
        }
        Ok(())
    }

    /// Update state with the signed-in user's saved schemes.
    ///
    async fn load_saved_schemes(&mut self) -> Result<()> {
        let Some(token) = self.user_token().await else {
            self.state.lock().await.saved_failed();
            return Err(StateError::UserNotSignedIn.into());
        };
        info!("Fetching saved schemes...");
        let result = self.api.saved_schemes(&token).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(schemes) => {
                info!("Received {} saved schemes.", schemes.len());
                state.set_saved(schemes);
            }
            Err(_) => {
                state.saved_failed();
            }
        }
        Ok(())
    }

    /// Remove a scheme from the signed-in user's saved list.
    ///
    async fn remove_saved(&mut self, id: u64) -> Result<()> {
        let Some(token) = self.user_token().await else {
            self.state.lock().await.remove_saved_failed();
            return Err(StateError::UserNotSignedIn.into());
        };
        let result = self.api.delete_saved_scheme(id, &token).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(_) => {
                state.saved_removed(id);
            }
            Err(_) => {
                state.remove_saved_failed();
            }
        }
        Ok(())
    }

    /// Append the assistant's reply to the transcript it was asked from.
    ///
    async fn send_chat(&mut self, prompt: String, session: u64) -> Result<()> {
        let result = self.api.chat(&prompt).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(reply) => {
                state.chat_replied(session, &reply);
            }
            Err(_) => {
                state.chat_failed(session);
            }
        }
        Ok(())
    }

    async fn admin_login(&mut self, credentials: Credentials) -> Result<()> {
        let result = self
            .api
            .admin_login(&credentials.login, &credentials.password)
            .await;
        let mut state = self.state.lock().await;
        match result {
            Ok(login) => {
                state.admin_signed_in(login);
            }
            Err(_) => {
                state.admin_login_failed();
            }
        }
        Ok(())
    }

    /// Update state with the full scheme table.
    ///
    async fn admin_load_schemes(&mut self) -> Result<()> {
        let Some(token) = self.admin_token().await else {
            self.state.lock().await.admin_schemes_failed();
            return Err(StateError::AdminNotSignedIn.into());
        };
        info!("Fetching admin scheme table...");
        let result = self.api.admin_schemes(&token).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(schemes) => {
                info!("Received {} schemes for the dashboard.", schemes.len());
                state.set_admin_schemes(schemes);
            }
            Err(_) => {
                state.admin_schemes_failed();
            }
        }
        Ok(())
    }

    /// Create a scheme, or update it when an id is given.
    ///
    async fn admin_save_scheme(&mut self, id: Option<u64>, payload: SchemePayload) -> Result<()> {
        let Some(token) = self.admin_token().await else {
            self.state.lock().await.save_scheme_failed();
            return Err(StateError::AdminNotSignedIn.into());
        };
        let result = match id {
            Some(id) => self.api.admin_update_scheme(id, &payload, &token).await,
            None => self.api.admin_add_scheme(&payload, &token).await,
        };
        let mut state = self.state.lock().await;
        match result {
            Ok(_) => {
                info!("Saved scheme '{}'.", payload.name);
                state.scheme_saved();
            }
            Err(_) => {
                state.save_scheme_failed();
            }
        }
        Ok(())
    }

    async fn admin_delete_scheme(&mut self, id: u64) -> Result<()> {
        let Some(token) = self.admin_token().await else {
            self.state.lock().await.delete_scheme_failed();
            return Err(StateError::AdminNotSignedIn.into());
        };
        let result = self.api.admin_delete_scheme(id, &token).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(_) => {
                info!("Deleted scheme {}.", id);
                state.scheme_deleted();
            }
            Err(_) => {
                state.delete_scheme_failed();
            }
        }
        Ok(())
    }

    async fn user_login(&mut self, credentials: Credentials) -> Result<()> {
        let result = self
            .api
            .login_user(&credentials.login, &credentials.password)
            .await;
        let mut state = self.state.lock().await;
        match result {
            Ok(login) => {
                state.user_signed_in(login);
            }
            Err(e) => {
                state.user_auth_failed(&auth_failure_message(&e, LOGIN_FAILED));
            }
        }
        Ok(())
    }

    /// Register a user. If the response does not sign the user in, log in
    /// with the same credentials.
    ///
    async fn user_register(&mut self, new_user: NewUser) -> Result<()> {
        let registration = match self.api.register_user(&new_user).await {
            Ok(registration) => registration,
            Err(e) => {
                let mut state = self.state.lock().await;
                state.user_auth_failed(&auth_failure_message(&e, REGISTRATION_FAILED));
                return Ok(());
            }
        };
        if let Some(message) = &registration.message {
            info!("Registration: {}", message);
        }
        match registration.into_login() {
            Some(login) => {
                let mut state = self.state.lock().await;
                state.user_signed_in(login);
                Ok(())
            }
            None => {
                debug!("Registration returned no session; logging in...");
                self.user_login(Credentials {
                    login: new_user.email,
                    password: new_user.password,
                })
                .await
            }
        }
    }
}
