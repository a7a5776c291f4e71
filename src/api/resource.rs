use fake::Dummy;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_active() -> bool {
    true
}

/// Defines scheme data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: u64,
    pub name: String,
    pub ministry: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub target_group: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub launch_year: Option<i32>,
    #[serde(default)]
    pub apply_link: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Scheme {
    /// Returns the apply link when one is set and non-blank.
    ///
    pub fn apply_link(&self) -> Option<&str> {
        self.apply_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}

/// Defines the body sent when an administrator creates or updates a scheme.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemePayload {
    pub name: String,
    pub ministry: String,
    pub description: String,
    pub eligibility: String,
    pub target_group: String,
    pub state: String,
    pub benefits: String,
    pub launch_year: i32,
    pub apply_link: String,
}

impl From<&Scheme> for SchemePayload {
    fn from(scheme: &Scheme) -> Self {
        SchemePayload {
            name: scheme.name.to_owned(),
            ministry: scheme.ministry.to_owned(),
            description: scheme.description.to_owned(),
            eligibility: scheme.eligibility.to_owned(),
            target_group: scheme.target_group.to_owned(),
            state: scheme.state.to_owned(),
            benefits: scheme.benefits.to_owned(),
            launch_year: scheme.launch_year.unwrap_or_default(),
            apply_link: scheme.apply_link.clone().unwrap_or_default(),
        }
    }
}

/// Defines the optional filters accepted by the public schemes listing.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemeFilters {
    pub q: Option<String>,
    pub state: Option<String>,
    pub ministry: Option<String>,
}

impl SchemeFilters {
    /// Returns filters narrowing the listing to a single ministry.
    ///
    pub fn ministry(ministry: &str) -> Self {
        SchemeFilters {
            ministry: Some(ministry.to_owned()),
            ..SchemeFilters::default()
        }
    }

    /// Returns true if no member carries a non-blank value.
    ///
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Returns the non-blank members as query parameter pairs.
    ///
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", self.q.as_deref()),
            ("state", self.state.as_deref()),
            ("ministry", self.ministry.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }
}

/// Defines administrator profile data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: u64,
    pub username: String,
}

/// Defines end-user profile data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Response of a successful administrator login.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AdminLogin {
    pub token: String,
    pub admin: AdminProfile,
}

/// Response of a successful user login.
///
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserLogin {
    pub token: String,
    pub user: UserProfile,
}

/// Response of a user registration. The backend may or may not sign the new
/// user in directly.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserRegistration {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl UserRegistration {
    /// Returns the login carried by the response, if complete.
    ///
    pub fn into_login(self) -> Option<UserLogin> {
        match (self.token, self.user) {
            (Some(token), Some(user)) => Some(UserLogin { token, user }),
            _ => None,
        }
    }
}

/// Defines the body of a user registration request.
///
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use serde_json::json;

    #[test]
    fn scheme_tolerates_missing_optional_fields() {
        let scheme: Scheme = serde_json::from_value(json!({
            "id": 7,
            "name": "PM-KISAN",
            "ministry": "Ministry of Agriculture & Farmers Welfare",
            "apply_link": null
        }))
        .unwrap();
        assert_eq!(scheme.id, 7);
        assert!(scheme.is_active);
        assert_eq!(scheme.launch_year, None);
        assert_eq!(scheme.apply_link(), None);
    }

    #[test]
    fn blank_apply_link_is_treated_as_absent() {
        let mut scheme: Scheme = fake::Faker.fake();
        scheme.apply_link = Some("   ".to_string());
        assert_eq!(scheme.apply_link(), None);
        scheme.apply_link = Some("https://pmkisan.gov.in".to_string());
        assert_eq!(scheme.apply_link(), Some("https://pmkisan.gov.in"));
    }

    #[test]
    fn filters_skip_blank_members() {
        let filters = SchemeFilters {
            q: Some("  ".to_string()),
            state: Some("Tamil Nadu".to_string()),
            ministry: None,
        };
        assert_eq!(filters.query_pairs(), vec![("state", "Tamil Nadu")]);
        assert!(!filters.is_empty());
        assert!(SchemeFilters::default().is_empty());
    }

    #[test]
    fn registration_without_token_has_no_login() {
        let registration: UserRegistration =
            serde_json::from_value(json!({ "message": "User registered" })).unwrap();
        assert_eq!(registration.message.as_deref(), Some("User registered"));
        assert!(registration.into_login().is_none());
    }

    #[test]
    fn new_user_omits_missing_phone() {
        let body = serde_json::to_value(NewUser {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: None,
            password: "secret".to_string(),
        })
        .unwrap();
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn new_user_debug_hides_password() {
        let new_user = NewUser {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: Some("9876543210".to_string()),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", new_user);
        assert!(printed.contains("asha@example.com"));
        assert!(!printed.contains("hunter2"));
    }
}
