//! Session store - who is logged in
//!
//! The cached credential is only a hint: at startup the profile is fetched
//! and a failure is treated as a silent logout.

use crate::error::ApiError;
use crate::messages::ApiCall;
use crate::models::{AuthResponse, User};
use crate::storage::Storage;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionStore {
    user: Option<User>,
    loading: bool,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A store that has not been initialized yet
    pub fn new() -> Self {
        SessionStore {
            user: None,
            loading: true,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Start initialization. Returns the profile fetch to run when a
    /// credential is cached; otherwise the store is ready immediately.
    pub fn initialize(&mut self, storage: &Storage) -> Option<ApiCall> {
        if storage.token().is_some() {
            self.loading = true;
            Some(ApiCall::GetProfile)
        } else {
            self.user = None;
            self.loading = false;
            None
        }
    }

    /// Apply the outcome of the startup profile fetch
    pub fn finish_initialize(&mut self, result: Result<User, ApiError>, storage: &mut Storage) {
        match result {
            Ok(user) => {
                tracing::info!(user = %user.email, "Session restored");
                self.user = Some(user);
            }
            Err(e) => {
                if e.is_unauthorized() {
                    tracing::warn!(error = %e, "Cached credential rejected, clearing it");
                } else {
                    tracing::warn!(error = %e, "Auth initialization failed, clearing credential");
                }
                if let Err(e) = storage.clear_credential() {
                    tracing::warn!(error = %e, "Failed to clear stored credential");
                }
                self.user = None;
            }
        }
        self.loading = false;
    }

    /// Login or register succeeded: cache the token and adopt the user
    pub fn authenticated(&mut self, response: AuthResponse, storage: &mut Storage) {
        if let Err(e) = storage.store_credential(response.token) {
            tracing::warn!(error = %e, "Failed to persist credential");
        }
        self.user = response.user;
        self.loading = false;
    }

    /// Replace the user after a profile edit
    pub fn set_user(&mut self, user: User) {
        if self.user.is_some() {
            self.user = Some(user);
        }
    }

    pub fn logout(&mut self, storage: &mut Storage) {
        if let Err(e) = storage.clear_credential() {
            tracing::warn!(error = %e, "Failed to clear stored credential");
        }
        self.user = None;
    }
}
