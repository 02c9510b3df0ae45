//! Routes and the authentication guard

use crate::app::session::SessionStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Details(String),
    Admin,
    Profile,
    Login,
    Register,
}

impl Route {
    /// Routes that need an authenticated user
    pub fn is_private(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    pub fn screen(&self) -> Screen {
        match self {
            Route::Catalog => Screen::Catalog,
            Route::Details(_) => Screen::Details,
            Route::Admin => Screen::Admin,
            Route::Profile => Screen::Profile,
            Route::Login => Screen::Login,
            Route::Register => Screen::Register,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Catalog => "Latest Movies",
            Route::Details(_) => "Movie",
            Route::Admin => "Admin",
            Route::Profile => "Profile",
            Route::Login => "Login",
            Route::Register => "Register",
        }
    }
}

/// What is on screen, without route parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    /// Session still initializing
    #[default]
    Loading,
    Catalog,
    Details,
    Admin,
    Profile,
    Login,
    Register,
}

/// Outcome of guarding a route
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Session not initialized yet; render nothing
    Wait,
    Render(Route),
    Redirect(Route),
}

pub fn guard(route: &Route, session: &SessionStore) -> Guard {
    if session.is_loading() {
        return Guard::Wait;
    }
    if route.is_private() && !session.is_authenticated() {
        return Guard::Redirect(Route::Login);
    }
    Guard::Render(route.clone())
}
