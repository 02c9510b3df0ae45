//! Render state - data structure sent from App layer to UI for rendering

use crate::app::pages::{AdminPage, CatalogPage, DetailsPage, LoginPage, ProfilePage, RegisterPage};
use crate::app::router::{Route, Screen};
use crate::messages::ui_events::{InputMode, KeyContext};
use crate::models::User;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Navigation
    pub route: Route,
    pub screen: Screen,

    // Session and appearance
    pub user: Option<User>,
    pub session_loading: bool,
    pub dark_mode: bool,

    // UI state
    pub input_mode: InputMode,
    pub show_help: bool,
    /// Transient notice shown in the status bar
    pub status: Option<String>,

    // Pages
    pub catalog: CatalogPage,
    pub details: DetailsPage,
    pub admin: AdminPage,
    pub profile: ProfilePage,
    pub login: LoginPage,
    pub register: RegisterPage,
}

impl RenderState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Context for mapping the next key press
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            screen: self.screen,
            input_mode: self.input_mode,
            show_help: self.show_help,
            is_authenticated: self.user.is_some(),
            is_admin: self.is_admin(),
        }
    }
}
