//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct composing the session, the navigator and view data
//! - Navigation types (Page, Route, Navigator)
//! - Form editing and confirmation types
//! - State error handling

mod chat;
mod error;
mod form;
mod navigation;
mod remote;

pub use error::StateError;
pub use form::{Form, FormKind};
pub use navigation::{Navigator, Page, Route};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::*;
