//! Session store module.
//!
//! Holds the two independent identity slots (administrator and end user) and
//! mirrors every change into a durable [`KeyValueStore`] so a restart restores
//! the previous identities.

mod error;
mod store;

pub use error::SessionError;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::api::{AdminProfile, UserProfile};
use log::*;
use serde::{de::DeserializeOwned, Serialize};

pub const ADMIN_TOKEN_KEY: &str = "adminToken";
pub const ADMIN_DATA_KEY: &str = "adminData";
pub const USER_TOKEN_KEY: &str = "userToken";
pub const USER_DATA_KEY: &str = "userData";

/// A bearer token together with the profile it was issued for.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity<P> {
    pub token: String,
    pub profile: P,
}

/// Owns both identity slots and their durable copy.
///
pub struct Session {
    store: Box<dyn KeyValueStore>,
    admin: Option<Identity<AdminProfile>>,
    user: Option<Identity<UserProfile>>,
}

impl Session {
    /// Read the store once and restore every complete identity pair.
    ///
    pub fn hydrate(store: Box<dyn KeyValueStore>) -> Session {
        let mut session = Session {
            store,
            admin: None,
            user: None,
        };
        session.admin = session.restore(ADMIN_TOKEN_KEY, ADMIN_DATA_KEY);
        session.user = session.restore(USER_TOKEN_KEY, USER_DATA_KEY);
        debug!(
            "Session restored (admin: {}, user: {}).",
            session.is_admin_authenticated(),
            session.is_user_authenticated()
        );
        session
    }

    /// Returns a session with no identities and nothing persisted.
    ///
    pub fn in_memory() -> Session {
        Session::hydrate(Box::new(MemoryStore::new()))
    }

    fn restore<P: DeserializeOwned>(&mut self, token_key: &str, data_key: &str) -> Option<Identity<P>> {
        let token = self.store.get(token_key).filter(|t| !t.trim().is_empty())?;
        let data = self.store.get(data_key)?;
        match serde_json::from_str::<P>(&data) {
            Ok(profile) => Some(Identity { token, profile }),
            Err(e) => {
                warn!("Discarding malformed '{}' entry: {}", data_key, e);
                if let Err(e) = self.forget(token_key, data_key) {
                    error!("Failed to clear malformed identity: {}", e);
                }
                None
            }
        }
    }

    fn persist<P: Serialize>(
        &mut self,
        token_key: &str,
        data_key: &str,
        token: &str,
        profile: &P,
    ) -> Result<(), SessionError> {
        let data = serde_json::to_string(profile)?;
        self.store.set(token_key, token)?;
        self.store.set(data_key, &data)?;
        Ok(())
    }

    fn forget(&mut self, token_key: &str, data_key: &str) -> Result<(), SessionError> {
        self.store.remove(token_key)?;
        self.store.remove(data_key)?;
        Ok(())
    }

    /// Replace the administrator identity and persist it.
    ///
    pub fn login_admin(&mut self, token: String, admin: AdminProfile) -> Result<(), SessionError> {
        info!("Administrator '{}' signed in.", admin.username);
        let result = self.persist(ADMIN_TOKEN_KEY, ADMIN_DATA_KEY, &token, &admin);
        self.admin = Some(Identity {
            token,
            profile: admin,
        });
        result
    }

    /// Clear the administrator identity and its persisted keys.
    ///
    pub fn logout_admin(&mut self) -> Result<(), SessionError> {
        if let Some(admin) = self.admin.take() {
            info!("Administrator '{}' signed out.", admin.profile.username);
        }
        self.forget(ADMIN_TOKEN_KEY, ADMIN_DATA_KEY)
    }

    /// Replace the user identity and persist it.
    ///
    pub fn login_user(&mut self, token: String, user: UserProfile) -> Result<(), SessionError> {
        info!("User '{}' signed in.", user.email);
        let result = self.persist(USER_TOKEN_KEY, USER_DATA_KEY, &token, &user);
        self.user = Some(Identity {
            token,
            profile: user,
        });
        result
    }

    /// Clear the user identity and its persisted keys.
    ///
    pub fn logout_user(&mut self) -> Result<(), SessionError> {
        if let Some(user) = self.user.take() {
            info!("User '{}' signed out.", user.profile.email);
        }
        self.forget(USER_TOKEN_KEY, USER_DATA_KEY)
    }

    pub fn is_admin_authenticated(&self) -> bool {
        self.admin.is_some()
    }

    pub fn is_user_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn admin(&self) -> Option<&AdminProfile> {
        self.admin.as_ref().map(|i| &i.profile)
    }

    pub fn admin_token(&self) -> Option<&str> {
        self.admin.as_ref().map(|i| i.token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref().map(|i| &i.profile)
    }

    pub fn user_token(&self) -> Option<&str> {
        self.user.as_ref().map(|i| i.token.as_str())
    }

    #[cfg(test)]
    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use serde_json::Value;

    fn stored_json(session: &Session, key: &str) -> Option<Value> {
        session
            .store()
            .get(key)
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn login_admin_persists_both_keys() {
        let admin: AdminProfile = Faker.fake();
        let mut session = Session::in_memory();
        session.login_admin("t".to_string(), admin.clone()).unwrap();

        assert!(session.is_admin_authenticated());
        assert!(!session.is_user_authenticated());
        assert_eq!(session.admin_token(), Some("t"));
        assert_eq!(session.store().get(ADMIN_TOKEN_KEY).as_deref(), Some("t"));
        assert_eq!(
            stored_json(&session, ADMIN_DATA_KEY),
            Some(serde_json::to_value(&admin).unwrap())
        );
        assert_eq!(session.store().get(USER_TOKEN_KEY), None);
    }

    #[test]
    fn logout_admin_removes_keys() {
        let mut session = Session::in_memory();
        session.login_admin("t".to_string(), Faker.fake()).unwrap();
        session.logout_admin().unwrap();

        assert!(!session.is_admin_authenticated());
        assert_eq!(session.store().get(ADMIN_TOKEN_KEY), None);
        assert_eq!(session.store().get(ADMIN_DATA_KEY), None);
    }

    #[test]
    fn logout_is_idempotent() {
        let mut session = Session::in_memory();
        session.logout_user().unwrap();
        session.logout_user().unwrap();
        assert!(!session.is_user_authenticated());
    }

    #[test]
    fn slots_are_independent() {
        let mut session = Session::in_memory();
        session.login_admin("a".to_string(), Faker.fake()).unwrap();
        session.login_user("u".to_string(), Faker.fake()).unwrap();
        session.logout_admin().unwrap();

        assert!(!session.is_admin_authenticated());
        assert!(session.is_user_authenticated());
        assert_eq!(session.store().get(USER_TOKEN_KEY).as_deref(), Some("u"));
    }

    #[test]
    fn login_overwrites_previous_identity() {
        let first: UserProfile = Faker.fake();
        let second: UserProfile = Faker.fake();
        let mut session = Session::in_memory();
        session.login_user("one".to_string(), first).unwrap();
        session.login_user("two".to_string(), second.clone()).unwrap();

        assert_eq!(session.user(), Some(&second));
        assert_eq!(session.store().get(USER_TOKEN_KEY).as_deref(), Some("two"));
    }

    #[test]
    fn hydrate_restores_complete_pairs() {
        let store = MemoryStore::with_entries(&[
            (USER_TOKEN_KEY, "u"),
            (USER_DATA_KEY, r#"{"id":3,"name":"Asha","email":"asha@example.com"}"#),
            (ADMIN_TOKEN_KEY, "a"),
            (ADMIN_DATA_KEY, r#"{"id":1,"username":"root"}"#),
        ]);
        let session = Session::hydrate(Box::new(store));

        assert!(session.is_user_authenticated());
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Asha"));
        assert!(session.is_admin_authenticated());
        assert_eq!(session.admin().map(|a| a.id), Some(1));
    }

    #[test]
    fn hydrate_rejects_partial_pair() {
        let store = MemoryStore::with_entries(&[(USER_TOKEN_KEY, "u")]);
        let session = Session::hydrate(Box::new(store));
        assert!(!session.is_user_authenticated());
        assert!(!session.is_admin_authenticated());
    }

    #[test]
    fn hydrate_treats_empty_token_as_signed_out() {
        let store = MemoryStore::with_entries(&[
            (USER_TOKEN_KEY, ""),
            (USER_DATA_KEY, r#"{"id":3,"name":"Asha","email":"asha@example.com"}"#),
            (ADMIN_TOKEN_KEY, "  "),
            (ADMIN_DATA_KEY, r#"{"id":1,"username":"root"}"#),
        ]);
        let session = Session::hydrate(Box::new(store));

        assert!(!session.is_user_authenticated());
        assert!(!session.is_admin_authenticated());
    }

    #[test]
    fn hydrate_clears_malformed_profile() {
        let store = MemoryStore::with_entries(&[
            (ADMIN_TOKEN_KEY, "a"),
            (ADMIN_DATA_KEY, "{broken"),
        ]);
        let session = Session::hydrate(Box::new(store));

        assert!(!session.is_admin_authenticated());
        assert_eq!(session.store().get(ADMIN_TOKEN_KEY), None);
        assert_eq!(session.store().get(ADMIN_DATA_KEY), None);
    }
}
