//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use crate::app::appearance::Appearance;
use crate::app::pages::{AdminPage, CatalogPage, DetailsPage, LoginPage, ProfilePage, RegisterPage};
use crate::app::router::{Route, Screen};
use crate::app::session::SessionStore;
use crate::messages::{InputMode, NetworkCommand, RenderState};
use crate::storage::{self, SharedStorage, Storage};

/// Why a call was sent; decides where its reply lands.
///
/// Page-bound purposes carry the mount they were issued from. A reply for an
/// older mount belongs to a page that no longer exists and is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Purpose {
    /// `signing_in` when the fetch follows a login that returned no user
    SessionInit { signing_in: bool },
    Login,
    Register,
    CatalogLoad { mount: u64 },
    DetailsLoad { mount: u64 },
    ReviewsLoad { mount: u64 },
    ReviewSubmit { mount: u64 },
    AdminLoad { mount: u64 },
    /// Edit target at the time the save went out
    AdminSave { mount: u64, editing: Option<String> },
    AdminDelete { mount: u64 },
    ProfileLoad { mount: u64 },
    ProfileSave { mount: u64 },
}

impl Purpose {
    /// Mount this call was issued from, for page-bound purposes
    pub fn mount(&self) -> Option<u64> {
        match self {
            Purpose::SessionInit { .. } | Purpose::Login | Purpose::Register => None,
            Purpose::CatalogLoad { mount }
            | Purpose::DetailsLoad { mount }
            | Purpose::ReviewsLoad { mount }
            | Purpose::ReviewSubmit { mount }
            | Purpose::AdminLoad { mount }
            | Purpose::AdminSave { mount, .. }
            | Purpose::AdminDelete { mount }
            | Purpose::ProfileLoad { mount }
            | Purpose::ProfileSave { mount } => Some(*mount),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Navigation
    pub route: Route,
    pub screen: Screen,

    // Context objects
    pub storage: SharedStorage,
    pub session: SessionStore,
    pub appearance: Appearance,

    // UI state
    pub input_mode: InputMode,
    pub show_help: bool,
    pub status: Option<String>,

    // Pages
    pub catalog: CatalogPage,
    pub details: DetailsPage,
    pub admin: AdminPage,
    pub profile: ProfilePage,
    pub login: LoginPage,
    pub register: RegisterPage,

    /// Bumped on every page mount
    pub mount_seq: u64,

    // In-flight calls
    pub next_request_id: u64,
    pub pending: HashMap<u64, Purpose>,
    outbox: Vec<NetworkCommand>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Storage::in_memory().shared())
    }
}

impl AppState {
    pub fn new(storage: SharedStorage) -> Self {
        let appearance = Appearance::load(&storage::lock(&storage));
        AppState {
            route: Route::Catalog,
            screen: Screen::Loading,
            storage,
            session: SessionStore::new(),
            appearance,
            input_mode: InputMode::Normal,
            show_help: false,
            status: None,
            catalog: CatalogPage::default(),
            details: DetailsPage::default(),
            admin: AdminPage::default(),
            profile: ProfilePage::default(),
            login: LoginPage::default(),
            register: RegisterPage::default(),
            mount_seq: 0,
            next_request_id: 1,
            pending: HashMap::new(),
            outbox: Vec::new(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Queue a command for the network layer
    pub(crate) fn push_command(&mut self, command: NetworkCommand) {
        self.outbox.push(command);
    }

    /// Drain commands queued since the last call
    pub fn take_commands(&mut self) -> Vec<NetworkCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            route: self.route.clone(),
            screen: self.screen,
            user: self.session.user().cloned(),
            session_loading: self.session.is_loading(),
            dark_mode: self.appearance.is_dark(),
            input_mode: self.input_mode,
            show_help: self.show_help,
            status: self.status.clone(),
            catalog: self.catalog.clone(),
            details: self.details.clone(),
            admin: self.admin.clone(),
            profile: self.profile.clone(),
            login: self.login.clone(),
            register: self.register.clone(),
        }
    }
}
