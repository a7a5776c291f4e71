//! Form editing state types.
//!
//! This module contains the text forms used across the application (logins,
//! registration, the filter bar and the admin scheme editor) together with
//! the confirmation dialogs.

use super::StateError;
use crate::api::{NewUser, Scheme, SchemeFilters, SchemePayload};
use crate::utils::text_processing::is_valid_apply_link;

/// Specifying the different forms.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormKind {
    AdminLogin,
    UserLogin,
    UserRegister,
    Filters,
    SchemeEditor { scheme_id: Option<u64> },
}

impl FormKind {
    /// Returns the title shown above the form.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::AdminLogin => "Admin Login",
            FormKind::UserLogin => "Sign In",
            FormKind::UserRegister => "Create Account",
            FormKind::Filters => "Search & Filters",
            FormKind::SchemeEditor { scheme_id: Some(_) } => "Edit Scheme",
            FormKind::SchemeEditor { scheme_id: None } => "Add New Scheme",
        }
    }
}

/// A single text input of a form.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub secret: bool,
    pub required: bool,
}

impl FormField {
    fn new(key: &'static str, label: &'static str) -> Self {
        FormField {
            key,
            label,
            value: String::new(),
            secret: false,
            required: true,
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_owned();
        self
    }

    /// Returns the text to display, masking secrets.
    ///
    pub fn display_value(&self) -> String {
        if self.secret {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// An editable form with one focused field.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Form {
    kind: FormKind,
    fields: Vec<FormField>,
    focus: usize,
    error: Option<String>,
    submitting: bool,
}

impl Form {
    fn new(kind: FormKind, fields: Vec<FormField>) -> Self {
        Form {
            kind,
            fields,
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn admin_login() -> Self {
        Form::new(
            FormKind::AdminLogin,
            vec![
                FormField::new("username", "Username"),
                FormField::new("password", "Password").secret(),
            ],
        )
    }

    pub fn user_login() -> Self {
        Form::new(
            FormKind::UserLogin,
            vec![
                FormField::new("email", "Email"),
                FormField::new("password", "Password").secret(),
            ],
        )
    }

    pub fn user_register() -> Self {
        Form::new(
            FormKind::UserRegister,
            vec![
                FormField::new("name", "Full Name"),
                FormField::new("email", "Email"),
                FormField::new("phone", "Phone").optional(),
                FormField::new("password", "Password").secret(),
            ],
        )
    }

    /// Returns the filter bar pre-filled with the active filters.
    ///
    pub fn filters(active: &SchemeFilters) -> Self {
        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        Form::new(
            FormKind::Filters,
            vec![
                FormField::new("q", "Search").optional().with_value(&value(&active.q)),
                FormField::new("state", "State (e.g. Tamil Nadu)")
                    .optional()
                    .with_value(&value(&active.state)),
                FormField::new("ministry", "Ministry (e.g. Education)")
                    .optional()
                    .with_value(&value(&active.ministry)),
            ],
        )
    }

    /// Returns the scheme editor, pre-filled from an existing scheme when
    /// editing or with the given launch year when adding.
    ///
    pub fn scheme_editor(scheme: Option<&Scheme>, default_year: i32) -> Self {
        let payload = match scheme {
            Some(scheme) => SchemePayload::from(scheme),
            None => SchemePayload {
                name: String::new(),
                ministry: String::new(),
                description: String::new(),
                eligibility: String::new(),
                target_group: String::new(),
                state: String::new(),
                benefits: String::new(),
                launch_year: default_year,
                apply_link: String::new(),
            },
        };
        Form::new(
            FormKind::SchemeEditor {
                scheme_id: scheme.map(|s| s.id),
            },
            vec![
                FormField::new("name", "Scheme Name").with_value(&payload.name),
                FormField::new("ministry", "Ministry").with_value(&payload.ministry),
                FormField::new("state", "State").with_value(&payload.state),
                FormField::new("description", "Description").with_value(&payload.description),
                FormField::new("eligibility", "Eligibility").with_value(&payload.eligibility),
                FormField::new("target_group", "Target Group").with_value(&payload.target_group),
                FormField::new("launch_year", "Launch Year")
                    .with_value(&payload.launch_year.to_string()),
                FormField::new("benefits", "Benefits").with_value(&payload.benefits),
                FormField::new("apply_link", "Apply Link")
                    .optional()
                    .with_value(&payload.apply_link),
            ],
        )
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) -> &mut Self {
        self.error = error;
        self
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_submitting(&mut self, submitting: bool) -> &mut Self {
        self.submitting = submitting;
        self
    }

    /// Append a character to the focused field.
    ///
    pub fn push_char(&mut self, c: char) -> &mut Self {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
        self.error = None;
        self
    }

    /// Remove the last character of the focused field.
    ///
    pub fn pop_char(&mut self) -> &mut Self {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
        self
    }

    /// Empty the focused field.
    ///
    pub fn clear_field(&mut self) -> &mut Self {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.clear();
        }
        self
    }

    pub fn next_field(&mut self) -> &mut Self {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
        self
    }

    pub fn previous_field(&mut self) -> &mut Self {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
        self
    }

    /// Returns the trimmed value of the field with the given key.
    ///
    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.trim())
            .unwrap_or("")
    }

    fn optional_value(&self, key: &str) -> Option<String> {
        Some(self.value(key))
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    /// Check that every required field has a value.
    ///
    pub fn validate(&self) -> Result<(), StateError> {
        match self
            .fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
        {
            Some(field) => Err(StateError::InvalidForm(format!("{} is required", field.label))),
            None => Ok(()),
        }
    }

    /// Returns the two credential fields of a login form.
    ///
    pub fn credentials(&self) -> Result<(String, String), StateError> {
        self.validate()?;
        let login = match self.kind {
            FormKind::AdminLogin => "username",
            _ => "email",
        };
        // Passwords keep surrounding whitespace.
        let password = self
            .fields
            .iter()
            .find(|f| f.key == "password")
            .map(|f| f.value.clone())
            .unwrap_or_default();
        Ok((self.value(login).to_owned(), password))
    }

    /// Build a registration request from the form.
    ///
    pub fn new_user(&self) -> Result<NewUser, StateError> {
        let (email, password) = self.credentials()?;
        Ok(NewUser {
            name: self.value("name").to_owned(),
            email,
            phone: self.optional_value("phone"),
            password,
        })
    }

    /// Build scheme filters from the filter bar.
    ///
    pub fn scheme_filters(&self) -> SchemeFilters {
        SchemeFilters {
            q: self.optional_value("q"),
            state: self.optional_value("state"),
            ministry: self.optional_value("ministry"),
        }
    }

    /// Build the admin write body from the scheme editor.
    ///
    pub fn scheme_payload(&self) -> Result<SchemePayload, StateError> {
        self.validate()?;
        let launch_year = self
            .value("launch_year")
            .parse::<i32>()
            .map_err(|_| StateError::InvalidForm("Launch Year must be a number".to_string()))?;
        let apply_link = self.value("apply_link").to_owned();
        if !apply_link.is_empty() && !is_valid_apply_link(&apply_link) {
            return Err(StateError::InvalidForm(
                "Apply Link must be an http(s) URL".to_string(),
            ));
        }
        Ok(SchemePayload {
            name: self.value("name").to_owned(),
            ministry: self.value("ministry").to_owned(),
            description: self.value("description").to_owned(),
            eligibility: self.value("eligibility").to_owned(),
            target_group: self.value("target_group").to_owned(),
            state: self.value("state").to_owned(),
            benefits: self.value("benefits").to_owned(),
            launch_year,
            apply_link,
        })
    }
}

/// Specifying the destructive actions that need confirmation.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Confirmation {
    DeleteScheme { id: u64, name: String },
    RemoveSaved { id: u64, name: String },
}

impl Confirmation {
    /// Returns the question shown in the dialog.
    ///
    pub fn prompt(&self) -> String {
        match self {
            Confirmation::DeleteScheme { name, .. } => {
                format!("Are you sure you want to delete \"{}\"?", name)
            }
            Confirmation::RemoveSaved { name, .. } => {
                format!("Remove \"{}\" from your saved schemes?", name)
            }
        }
    }
}
