//! Command handlers - business logic for processing UI events

use crate::app::pages::{
    AdminPage, CatalogPage, DetailsPage, FormField, LoginPage, ProfilePage, RegisterPage,
};
use crate::app::router::{self, Guard, Route, Screen};
use crate::app::state::Purpose;
use crate::app::AppState;
use crate::app::input::TextInput;
use crate::error::ApiError;
use crate::messages::{ApiCall, ApiReply, InputMode, NetworkCommand, NetworkResponse};
use crate::models::{AuthResponse, Movie, Review, User};
use crate::storage;

/// Narrow a reply to the variant a purpose expects
fn narrow<T>(
    result: Result<ApiReply, ApiError>,
    pick: impl FnOnce(ApiReply) -> Option<T>,
) -> Result<T, ApiError> {
    result.and_then(|reply| {
        let kind = reply.kind();
        pick(reply).ok_or_else(|| ApiError::Decode(format!("unexpected {} reply", kind)))
    })
}

fn profile(reply: ApiReply) -> Option<User> {
    match reply {
        ApiReply::Profile(user) => Some(user),
        _ => None,
    }
}

fn auth(reply: ApiReply) -> Option<AuthResponse> {
    match reply {
        ApiReply::Auth(auth) => Some(auth),
        _ => None,
    }
}

fn movies(reply: ApiReply) -> Option<Vec<Movie>> {
    match reply {
        ApiReply::Movies(movies) => Some(movies),
        _ => None,
    }
}

fn movie(reply: ApiReply) -> Option<Movie> {
    match reply {
        ApiReply::Movie(movie) => Some(movie),
        _ => None,
    }
}

fn reviews(reply: ApiReply) -> Option<Vec<Review>> {
    match reply {
        ApiReply::Reviews(reviews) => Some(reviews),
        _ => None,
    }
}

impl AppState {
    // ========================
    // Dispatch
    // ========================

    fn dispatch(&mut self, purpose: Purpose, call: ApiCall) {
        let id = self.next_id();
        tracing::debug!(id, call = call.name(), ?purpose, "Dispatching call");
        self.pending.insert(id, purpose);
        self.push_command(NetworkCommand::Call { id, call });
    }

    fn dispatch_opt(&mut self, purpose: Purpose, call: Option<ApiCall>) {
        if let Some(call) = call {
            self.dispatch(purpose, call);
        }
    }

    // ========================
    // Session and navigation
    // ========================

    /// Initialize the session and show the requested route once it is known
    pub fn start(&mut self, route: Route) {
        self.init_session(route, false);
    }

    fn init_session(&mut self, route: Route, signing_in: bool) {
        self.route = route;
        let call = self.session.initialize(&storage::lock(&self.storage));
        match call {
            Some(call) => {
                self.screen = Screen::Loading;
                self.dispatch(Purpose::SessionInit { signing_in }, call);
            }
            None => {
                let route = self.route.clone();
                self.navigate(route);
            }
        }
    }

    /// Guard the route, then mount it (or its redirect)
    pub fn navigate(&mut self, route: Route) {
        self.input_mode = InputMode::Normal;
        self.status = None;
        match router::guard(&route, &self.session) {
            Guard::Wait => {
                self.route = route;
                self.screen = Screen::Loading;
            }
            Guard::Redirect(target) => {
                tracing::info!(from = ?route, to = ?target, "Redirecting");
                self.mount(target);
            }
            Guard::Render(route) => self.mount(route),
        }
    }

    /// Fresh page state plus its load call
    fn mount(&mut self, route: Route) {
        self.mount_seq += 1;
        let mount = self.mount_seq;
        self.route = route.clone();
        self.screen = route.screen();
        match route {
            Route::Catalog => {
                let (page, call) = CatalogPage::mount();
                self.catalog = page;
                self.dispatch(Purpose::CatalogLoad { mount }, call);
            }
            Route::Details(id) => {
                let (page, call) = DetailsPage::mount(id);
                self.details = page;
                self.dispatch(Purpose::DetailsLoad { mount }, call);
            }
            Route::Admin => {
                let (page, call) = AdminPage::mount();
                self.admin = page;
                self.dispatch(Purpose::AdminLoad { mount }, call);
            }
            Route::Profile => {
                let (page, call) = ProfilePage::mount();
                self.profile = page;
                self.dispatch(Purpose::ProfileLoad { mount }, call);
            }
            Route::Login => {
                self.login = LoginPage::default();
                self.input_mode = InputMode::Editing;
            }
            Route::Register => {
                self.register = RegisterPage::default();
                self.input_mode = InputMode::Editing;
            }
        }
    }

    pub fn back(&mut self) {
        match self.screen {
            Screen::Details | Screen::Admin | Screen::Profile => self.navigate(Route::Catalog),
            _ => {}
        }
    }

    pub fn logout(&mut self) {
        self.session.logout(&mut storage::lock(&self.storage));
        tracing::info!("Logged out");
        self.navigate(Route::Login);
    }

    pub fn toggle_theme(&mut self) {
        self.appearance.toggle(&mut storage::lock(&self.storage));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        let editable = match self.screen {
            Screen::Catalog | Screen::Details | Screen::Login | Screen::Register => true,
            Screen::Admin => !self.admin.loading,
            Screen::Profile => self.profile.editing,
            Screen::Loading => false,
        };
        if editable {
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Text input receiving keystrokes on the current screen
    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.screen {
            Screen::Catalog => Some(&mut self.catalog.search),
            Screen::Details => Some(&mut self.details.review_text),
            Screen::Admin => self.admin.form.focused_input(),
            Screen::Profile if self.profile.editing => Some(self.profile.form.focused_input()),
            Screen::Login => Some(self.login.focused_input()),
            Screen::Register => Some(self.register.focused_input()),
            _ => None,
        }
    }

    fn admin_on_genres(&self) -> bool {
        self.screen == Screen::Admin && self.admin.form.focus == FormField::Genres
    }

    pub fn enter_char(&mut self, c: char) {
        if self.admin_on_genres() {
            if c == ' ' {
                self.admin.form.toggle_genre();
            }
            return;
        }
        if let Some(input) = self.focused_input() {
            input.enter_char(c);
        }
        if self.screen == Screen::Catalog {
            self.catalog.refilter();
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(input) = self.focused_input() {
            input.delete_char();
        }
        if self.screen == Screen::Catalog {
            self.catalog.refilter();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.admin_on_genres() {
            self.admin.form.genre_cursor_prev();
        } else if let Some(input) = self.focused_input() {
            input.move_cursor_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.admin_on_genres() {
            self.admin.form.genre_cursor_next();
        } else if let Some(input) = self.focused_input() {
            input.move_cursor_right();
        }
    }

    pub fn next_field(&mut self) {
        match self.screen {
            Screen::Admin => self.admin.form.next_field(),
            Screen::Profile => self.profile.form.focus = self.profile.form.focus.next(),
            Screen::Login => self.login.next_field(),
            Screen::Register => self.register.next_field(),
            _ => {}
        }
    }

    pub fn prev_field(&mut self) {
        match self.screen {
            Screen::Admin => self.admin.form.prev_field(),
            Screen::Profile => self.profile.form.focus = self.profile.form.focus.prev(),
            // two fields: prev and next coincide
            Screen::Login => self.login.next_field(),
            Screen::Register => self.register.prev_field(),
            _ => {}
        }
    }

    // ========================
    // Lists
    // ========================

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Catalog => self.catalog.select_next(),
            Screen::Admin => self.admin.select_next(),
            _ => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Catalog => self.catalog.select_prev(),
            Screen::Admin => self.admin.select_prev(),
            _ => {}
        }
    }

    pub fn next_genre(&mut self) {
        if self.screen == Screen::Catalog {
            self.catalog.next_genre();
        }
    }

    pub fn prev_genre(&mut self) {
        if self.screen == Screen::Catalog {
            self.catalog.prev_genre();
        }
    }

    pub fn open_selected(&mut self) {
        if self.screen != Screen::Catalog {
            return;
        }
        if let Some(id) = self.catalog.selected_movie().map(|m| m.id.clone()) {
            self.navigate(Route::Details(id));
        }
    }

    /// Re-run the current screen's load
    pub fn reload(&mut self) {
        match self.screen {
            Screen::Catalog | Screen::Admin | Screen::Profile => {
                let route = self.route.clone();
                self.navigate(route);
            }
            // the movie never loaded; retry the whole page
            Screen::Details if self.details.movie.is_none() => {
                if !self.details.loading {
                    let route = self.route.clone();
                    self.navigate(route);
                }
            }
            Screen::Details => {
                let call = self.details.reload_reviews();
                self.dispatch_opt(Purpose::ReviewsLoad { mount: self.mount_seq }, call);
            }
            _ => {}
        }
    }

    pub fn scroll_up(&mut self) {
        if self.screen == Screen::Details {
            self.details.scroll_up();
        }
    }

    pub fn scroll_down(&mut self) {
        if self.screen == Screen::Details {
            self.details.scroll_down();
        }
    }

    // ========================
    // Review form
    // ========================

    pub fn rating_up(&mut self) {
        if self.screen == Screen::Details {
            self.details.rating_up();
        }
    }

    pub fn rating_down(&mut self) {
        if self.screen == Screen::Details {
            self.details.rating_down();
        }
    }

    // ========================
    // Admin
    // ========================

    pub fn edit_selected(&mut self) {
        if self.screen == Screen::Admin && self.admin.selected_movie().is_some() {
            self.admin.edit_selected();
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn new_movie(&mut self) {
        if self.screen == Screen::Admin {
            self.admin.new_movie();
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn delete_selected(&mut self) {
        if self.screen == Screen::Admin {
            let call = self.admin.delete_selected();
            self.dispatch_opt(Purpose::AdminDelete { mount: self.mount_seq }, call);
        }
    }

    pub fn cancel_edit(&mut self) {
        match self.screen {
            Screen::Admin => self.admin.cancel_edit(),
            Screen::Profile => self.profile.cancel_edit(),
            _ => {}
        }
    }

    // ========================
    // Profile
    // ========================

    pub fn edit_profile(&mut self) {
        if self.screen == Screen::Profile {
            self.profile.start_edit();
            if self.profile.editing {
                self.input_mode = InputMode::Editing;
            }
        }
    }

    // ========================
    // Submit
    // ========================

    /// Submit the form of the current screen
    pub fn submit(&mut self) {
        match self.screen {
            Screen::Details => {
                let call = self.details.submit();
                if call.is_some() {
                    self.input_mode = InputMode::Normal;
                }
                self.dispatch_opt(Purpose::ReviewSubmit { mount: self.mount_seq }, call);
            }
            Screen::Admin => {
                let editing = self.admin.editing.clone();
                let call = self.admin.submit();
                if call.is_some() {
                    self.input_mode = InputMode::Normal;
                }
                let mount = self.mount_seq;
                self.dispatch_opt(Purpose::AdminSave { mount, editing }, call);
            }
            Screen::Profile => {
                let call = self.profile.submit();
                if call.is_some() {
                    self.input_mode = InputMode::Normal;
                }
                self.dispatch_opt(Purpose::ProfileSave { mount: self.mount_seq }, call);
            }
            Screen::Login => {
                let call = self.login.submit();
                self.dispatch_opt(Purpose::Login, call);
            }
            Screen::Register => {
                let call = self.register.submit();
                self.dispatch_opt(Purpose::Register, call);
            }
            Screen::Catalog => self.stop_editing(),
            Screen::Loading => {}
        }
    }

    // ========================
    // Network responses
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let NetworkResponse::Completed { id, result, time_ms } = response;
        let Some(purpose) = self.pending.remove(&id) else {
            tracing::debug!(id, "Response for unknown request");
            return;
        };
        tracing::debug!(id, ?purpose, time_ms, ok = result.is_ok(), "Handling response");

        // a profile save still refreshes the session after its page is gone
        let current = purpose.mount().map_or(true, |mount| mount == self.mount_seq);
        if !current && !matches!(purpose, Purpose::ProfileSave { .. }) {
            tracing::debug!(id, ?purpose, "Dropping reply for a remounted page");
            return;
        }

        match purpose {
            Purpose::SessionInit { signing_in } => {
                let result = narrow(result, profile);
                self.session
                    .finish_initialize(result, &mut storage::lock(&self.storage));
                let route = self.route.clone();
                self.navigate(route);
                if signing_in && !self.session.is_authenticated() {
                    self.login.error = Some("Failed to load profile".to_string());
                }
            }
            Purpose::Login => match narrow(result, auth) {
                Ok(response) => self.signed_in(response),
                Err(e) => self.login.on_failed(e),
            },
            Purpose::Register => match narrow(result, auth) {
                Ok(response) => self.signed_in(response),
                Err(e) => self.register.on_failed(e),
            },
            Purpose::CatalogLoad { .. } => self.catalog.on_loaded(narrow(result, movies)),
            Purpose::DetailsLoad { .. } => self.details.on_loaded(narrow(result, movie)),
            Purpose::ReviewsLoad { .. } => self.details.on_reviews(narrow(result, reviews)),
            Purpose::ReviewSubmit { .. } => {
                self.details.on_submitted(narrow(result, |reply| match reply {
                    ApiReply::ReviewCreated(review) => Some(review),
                    _ => None,
                }))
            }
            Purpose::AdminLoad { .. } => self.admin.on_loaded(narrow(result, movies)),
            Purpose::AdminSave { editing, .. } => {
                self.admin.on_saved(editing, narrow(result, movie))
            }
            Purpose::AdminDelete { .. } => {
                self.admin.on_deleted(narrow(result, |reply| match reply {
                    ApiReply::MovieDeleted(id) => Some(id),
                    _ => None,
                }))
            }
            Purpose::ProfileLoad { .. } => self.profile.on_loaded(narrow(result, profile)),
            Purpose::ProfileSave { .. } => {
                let result = narrow(result, |reply| match reply {
                    ApiReply::ProfileUpdated(updated) => Some(updated),
                    _ => None,
                });
                match result {
                    Ok(updated) => {
                        if let Some(token) = updated.token {
                            if let Err(e) = storage::lock(&self.storage).replace_token(token) {
                                tracing::warn!(error = %e, "Failed to persist refreshed token");
                            }
                        }
                        self.session.set_user(updated.user.clone());
                        if current {
                            self.profile.on_saved(Ok(updated.user));
                            self.status = Some("Profile updated".to_string());
                        }
                    }
                    Err(e) if current => self.profile.on_saved(Err(e)),
                    Err(e) => tracing::warn!(error = %e, "Profile update failed"),
                }
            }
        }
    }

    /// Login or register succeeded
    fn signed_in(&mut self, response: AuthResponse) {
        let has_user = response.user.is_some();
        self.session
            .authenticated(response, &mut storage::lock(&self.storage));
        if has_user {
            tracing::info!("Signed in");
            self.navigate(Route::Catalog);
        } else {
            // the token alone; fetch who it belongs to
            self.init_session(Route::Catalog, true);
        }
    }
}
