//! Schemes API module.
//!
//! One method per remote endpoint. Every call issues exactly one request,
//! logs its outcome and hands any error back to the caller unchanged.

mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use serde::Deserialize;
use serde_json::{json, Value};

/// Default address of the hosted schemes API.
///
pub const DEFAULT_BASE_URL: &str = "https://govt-conntect-backend.vercel.app/api";

/// Responsible for asynchronous interaction with the schemes API including
/// transformation of response data into explicitly-defined types.
///
pub struct Api {
    client: Client,
}

/// Log the outcome of a call and pass it through untouched.
///
fn logged<T>(context: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    match &result {
        Ok(_) => debug!("{} succeeded.", context),
        Err(e) => error!("{} failed: {}", context, e),
    }
    result
}

impl Api {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Result<Api, ApiError> {
        debug!("Initializing schemes API client for {}...", base_url);
        Ok(Api {
            client: Client::new(base_url)?,
        })
    }

    /// Returns the base URL requests are sent to.
    ///
    pub fn base_url(&self) -> &str {
        &self.client.base_url
    }

    /// Returns schemes matching the given filters.
    ///
    pub async fn schemes(&self, filters: &SchemeFilters) -> Result<Vec<Scheme>, ApiError> {
        debug!("Requesting schemes with filters {:?}...", filters.query_pairs());
        let result = self
            .client
            .get::<Vec<Scheme>>("schemes", &filters.query_pairs(), None)
            .await;
        logged("Fetching schemes", result)
    }

    /// Returns the scheme with the given id.
    ///
    pub async fn scheme(&self, id: u64) -> Result<Scheme, ApiError> {
        debug!("Requesting scheme {}...", id);
        let result = self
            .client
            .get::<Scheme>(&format!("schemes/{}", id), &[], None)
            .await;
        logged(&format!("Fetching scheme {}", id), result)
    }

    /// Send a prompt to the assistant and return its reply.
    ///
    pub async fn chat(&self, prompt: &str) -> Result<String, ApiError> {
        #[derive(Deserialize)]
        struct Reply {
            reply: String,
        }

        debug!("Sending chat prompt ({} chars)...", prompt.chars().count());
        let result = self
            .client
            .post::<Reply, _>("chat", &json!({ "prompt": prompt }), None)
            .await
            .map(|r| r.reply);
        logged("Sending chat message", result)
    }

    /// Exchange administrator credentials for a token and profile.
    ///
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<AdminLogin, ApiError> {
        debug!("Logging in administrator '{}'...", username);
        let result = self
            .client
            .post::<AdminLogin, _>(
                "admin/login",
                &json!({ "username": username, "password": password }),
                None,
            )
            .await;
        logged("Admin login", result)
    }

    /// Returns every scheme, including inactive ones.
    ///
    pub async fn admin_schemes(&self, token: &str) -> Result<Vec<Scheme>, ApiError> {
        debug!("Requesting admin scheme table...");
        let result = self
            .client
            .get::<Vec<Scheme>>("admin/schemes", &[], Some(token))
            .await;
        logged("Fetching admin schemes", result)
    }

    /// Create a scheme.
    ///
    pub async fn admin_add_scheme(&self, payload: &SchemePayload, token: &str) -> Result<Value, ApiError> {
        debug!("Creating scheme '{}'...", payload.name);
        let result = self
            .client
            .post::<Value, _>("admin/schemes", payload, Some(token))
            .await;
        logged("Adding scheme", result)
    }

    /// Replace the scheme with the given id.
    ///
    pub async fn admin_update_scheme(
        &self,
        id: u64,
        payload: &SchemePayload,
        token: &str,
    ) -> Result<Value, ApiError> {
        debug!("Updating scheme {}...", id);
        let result = self
            .client
            .put::<Value, _>(&format!("admin/schemes/{}", id), payload, Some(token))
            .await;
        logged(&format!("Updating scheme {}", id), result)
    }

    /// Delete the scheme with the given id.
    ///
    pub async fn admin_delete_scheme(&self, id: u64, token: &str) -> Result<Value, ApiError> {
        debug!("Deleting scheme {}...", id);
        let result = self
            .client
            .delete::<Value>(&format!("admin/schemes/{}", id), Some(token))
            .await;
        logged(&format!("Deleting scheme {}", id), result)
    }

    /// Register a new end user.
    ///
    pub async fn register_user(&self, new_user: &NewUser) -> Result<UserRegistration, ApiError> {
        debug!("Registering user '{}'...", new_user.email);
        let result = self
            .client
            .post::<Option<UserRegistration>, _>("users/register", new_user, None)
            .await
            .map(Option::unwrap_or_default);
        logged("User registration", result)
    }

    /// Exchange user credentials for a token and profile.
    ///
    pub async fn login_user(&self, email: &str, password: &str) -> Result<UserLogin, ApiError> {
        debug!("Logging in user '{}'...", email);
        let result = self
            .client
            .post::<UserLogin, _>(
                "users/login",
                &json!({ "email": email, "password": password }),
                None,
            )
            .await;
        logged("User login", result)
    }

    /// Bookmark a scheme for the signed-in user.
    ///
    pub async fn save_scheme(&self, scheme_id: u64, token: &str) -> Result<Value, ApiError> {
        debug!("Saving scheme {}...", scheme_id);
        let result = self
            .client
            .post::<Value, _>("saved-schemes/save", &json!({ "scheme_id": scheme_id }), Some(token))
            .await;
        logged(&format!("Saving scheme {}", scheme_id), result)
    }

    /// Returns the schemes bookmarked by the signed-in user.
    ///
    pub async fn saved_schemes(&self, token: &str) -> Result<Vec<Scheme>, ApiError> {
        debug!("Requesting saved schemes...");
        let result = self
            .client
            .get::<Vec<Scheme>>("saved-schemes", &[], Some(token))
            .await;
        logged("Fetching saved schemes", result)
    }

    /// Remove a bookmark for the signed-in user.
    ///
    pub async fn delete_saved_scheme(&self, scheme_id: u64, token: &str) -> Result<Value, ApiError> {
        debug!("Removing saved scheme {}...", scheme_id);
        let result = self
            .client
            .delete::<Value>(&format!("saved-schemes/{}", scheme_id), Some(token))
            .await;
        logged(&format!("Removing saved scheme {}", scheme_id), result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::uuid::UUIDv4;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use uuid::Uuid;

    fn api(server: &MockServer) -> Api {
        Api::new(&server.base_url()).unwrap()
    }

    #[tokio::test]
    async fn schemes_encodes_filters() {
        let schemes: [Scheme; 2] = Faker.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/schemes")
                    .query_param("ministry", "Ministry of Health & Family Welfare")
                    .query_param("q", "insurance");
                then.status(200).json_body(json!(schemes));
            })
            .await;

        let filters = SchemeFilters {
            q: Some("insurance".to_string()),
            ministry: Some("Ministry of Health & Family Welfare".to_string()),
            state: None,
        };
        let result = api(&server).schemes(&filters).await.unwrap();
        assert_eq!(result, schemes.to_vec());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn scheme_by_id_success() {
        let scheme: Scheme = Faker.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path(format!("/schemes/{}", scheme.id));
                then.status(200).json_body(json!(scheme));
            })
            .await;

        assert_eq!(api(&server).scheme(scheme.id).await.unwrap(), scheme);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn scheme_by_id_not_found() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/schemes/99");
                then.status(404).json_body(json!({ "message": "Scheme not found" }));
            })
            .await;

        let error = api(&server).scheme(99).await.unwrap_err();
        assert_eq!(error.status(), Some(404));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_returns_reply_field() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/chat")
                    .json_body(json!({ "prompt": "Who is eligible for PM-KISAN?" }));
                then.status(200)
                    .json_body(json!({ "reply": "Small and marginal farmers." }));
            })
            .await;

        let reply = api(&server)
            .chat("Who is eligible for PM-KISAN?")
            .await
            .unwrap();
        assert_eq!(reply, "Small and marginal farmers.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn admin_login_success() {
        let token: Uuid = UUIDv4.fake();
        let admin: AdminProfile = Faker.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/admin/login")
                    .json_body(json!({ "username": "root", "password": "hunter2" }));
                then.status(200)
                    .json_body(json!({ "token": token.to_string(), "admin": admin }));
            })
            .await;

        let login = api(&server).admin_login("root", "hunter2").await.unwrap();
        assert_eq!(login.token, token.to_string());
        assert_eq!(login.admin, admin);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn admin_login_unauthorized() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/admin/login");
                then.status(401);
            })
            .await;

        assert!(api(&server).admin_login("root", "wrong").await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn admin_routes_send_bearer_token() {
        let token: Uuid = UUIDv4.fake();
        let payload: SchemePayload = Faker.fake();
        let bearer = format!("Bearer {}", token);
        let server = MockServer::start();

        let list = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/admin/schemes")
                    .header("Authorization", &bearer);
                then.status(200).json_body(json!([]));
            })
            .await;
        let add = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/admin/schemes")
                    .header("Authorization", &bearer)
                    .json_body(json!(payload));
                then.status(201).json_body(json!({ "id": 12 }));
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/admin/schemes/12")
                    .header("Authorization", &bearer)
                    .json_body(json!(payload));
                then.status(200).json_body(json!({ "id": 12 }));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method("DELETE")
                    .path("/admin/schemes/12")
                    .header("Authorization", &bearer);
                then.status(204);
            })
            .await;

        let api = api(&server);
        let token = token.to_string();
        assert!(api.admin_schemes(&token).await.unwrap().is_empty());
        api.admin_add_scheme(&payload, &token).await.unwrap();
        api.admin_update_scheme(12, &payload, &token).await.unwrap();
        assert_eq!(api.admin_delete_scheme(12, &token).await.unwrap(), Value::Null);
        list.assert_async().await;
        add.assert_async().await;
        update.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn register_user_accepts_message_only_response() {
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/users/register")
                    .json_body(json!({
                        "name": "Asha",
                        "email": "asha@example.com",
                        "password": "secret"
                    }));
                then.status(201).json_body(json!({ "message": "User registered" }));
            })
            .await;

        let registration = api(&server)
            .register_user(&NewUser {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: None,
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert!(registration.into_login().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_user_success() {
        let user: UserProfile = Faker.fake();
        let server = MockServer::start();
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/users/login")
                    .json_body(json!({ "email": "asha@example.com", "password": "secret" }));
                then.status(200)
                    .json_body(json!({ "token": "user-token", "user": user }));
            })
            .await;

        let login = api(&server)
            .login_user("asha@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(login.user, user);
        assert_eq!(login.token, "user-token");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn saved_scheme_routes() {
        let saved: [Scheme; 2] = Faker.fake();
        let server = MockServer::start();
        let save = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/saved-schemes/save")
                    .header("Authorization", "Bearer user-token")
                    .json_body(json!({ "scheme_id": 5 }));
                then.status(201).json_body(json!({ "message": "Saved" }));
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/saved-schemes")
                    .header("Authorization", "Bearer user-token");
                then.status(200).json_body(json!(saved));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method("DELETE")
                    .path("/saved-schemes/5")
                    .header("Authorization", "Bearer user-token");
                then.status(200).json_body(json!({ "message": "Removed" }));
            })
            .await;

        let api = api(&server);
        api.save_scheme(5, "user-token").await.unwrap();
        assert_eq!(api.saved_schemes("user-token").await.unwrap(), saved.to_vec());
        api.delete_saved_scheme(5, "user-token").await.unwrap();
        save.assert_async().await;
        list.assert_async().await;
        delete.assert_async().await;
    }
}
