//! Navigation-related state types.
//!
//! This module contains the closed set of pages, the route actually rendered
//! for a page, and the navigator holding the current page together with the
//! selected scheme id.

use super::StateError;
use std::{fmt, str::FromStr};

/// Specifying the different pages.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Page {
    Home,
    Schemes,
    SchemeDetail,
    SavedSchemes,
    Chatbot,
    AdminLogin,
    AdminDashboard,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Schemes,
        Page::SchemeDetail,
        Page::SavedSchemes,
        Page::Chatbot,
        Page::AdminLogin,
        Page::AdminDashboard,
    ];

    /// Returns the kebab-case page name.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Schemes => "schemes",
            Page::SchemeDetail => "scheme-detail",
            Page::SavedSchemes => "saved-schemes",
            Page::Chatbot => "chatbot",
            Page::AdminLogin => "admin-login",
            Page::AdminDashboard => "admin",
        }
    }

    /// Returns the human readable page title.
    ///
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Schemes => "Schemes",
            Page::SchemeDetail => "Scheme Details",
            Page::SavedSchemes => "Saved Schemes",
            Page::Chatbot => "AI Assistant",
            Page::AdminLogin => "Admin Login",
            Page::AdminDashboard => "Admin Dashboard",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = StateError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .iter()
            .find(|page| page.name() == name)
            .copied()
            .ok_or_else(|| StateError::UnknownPage(name.to_owned()))
    }
}

/// What is actually rendered for the current page.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Route {
    Home,
    Schemes,
    SchemeDetail(u64),
    SavedSchemes,
    Chatbot,
    AdminLogin,
    AdminDashboard,
}

impl Route {
    /// The page whose tab is highlighted while this route is shown.
    ///
    pub fn page(&self) -> Page {
        match self {
            Route::Home => Page::Home,
            Route::Schemes => Page::Schemes,
            Route::SchemeDetail(_) => Page::SchemeDetail,
            Route::SavedSchemes => Page::SavedSchemes,
            Route::Chatbot => Page::Chatbot,
            Route::AdminLogin => Page::AdminLogin,
            Route::AdminDashboard => Page::AdminDashboard,
        }
    }
}

/// Holds the current page and the scheme id threaded to the detail page.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Navigator {
    current_page: Page,
    selected_scheme_id: Option<u64>,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator {
            current_page: Page::Home,
            selected_scheme_id: None,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator::default()
    }

    /// Switch to the given page. The selected scheme id is only replaced when
    /// an id is supplied; otherwise the previous one is kept.
    ///
    pub fn navigate(&mut self, page: Page, scheme_id: Option<u64>) -> &mut Self {
        self.current_page = page;
        if let Some(id) = scheme_id {
            self.selected_scheme_id = Some(id);
        }
        self
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn selected_scheme_id(&self) -> Option<u64> {
        self.selected_scheme_id
    }

    /// Resolve the current page into the route to render. The detail page
    /// without any selected id falls back to the schemes list.
    ///
    pub fn route(&self) -> Route {
        match self.current_page {
            Page::Home => Route::Home,
            Page::Schemes => Route::Schemes,
            Page::SchemeDetail => match self.selected_scheme_id {
                Some(id) => Route::SchemeDetail(id),
                None => Route::Schemes,
            },
            Page::SavedSchemes => Route::SavedSchemes,
            Page::Chatbot => Route::Chatbot,
            Page::AdminLogin => Route::AdminLogin,
            Page::AdminDashboard => Route::AdminDashboard,
        }
    }
}
