//! Profile page: view and edit the signed-in account

use crate::app::input::TextInput;
use crate::app::validation;
use crate::constants::MIN_PASSWORD_LEN;
use crate::error::ApiError;
use crate::messages::ApiCall;
use crate::models::{ProfileUpdate, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    Name,
    Email,
    Bio,
    Avatar,
    CurrentPassword,
    NewPassword,
    ConfirmPassword,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Bio,
        ProfileField::Avatar,
        ProfileField::CurrentPassword,
        ProfileField::NewPassword,
        ProfileField::ConfirmPassword,
    ];

    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(pos + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Name",
            ProfileField::Email => "Email",
            ProfileField::Bio => "Bio",
            ProfileField::Avatar => "Avatar URL",
            ProfileField::CurrentPassword => "Current Password",
            ProfileField::NewPassword => "New Password",
            ProfileField::ConfirmPassword => "Confirm New Password",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileForm {
    pub name: TextInput,
    pub email: TextInput,
    pub bio: TextInput,
    pub avatar: TextInput,
    pub current_password: TextInput,
    pub new_password: TextInput,
    pub confirm_password: TextInput,
    pub focus: ProfileField,
}

impl Default for ProfileForm {
    fn default() -> Self {
        ProfileForm {
            name: TextInput::new(),
            email: TextInput::new(),
            bio: TextInput::new(),
            avatar: TextInput::new(),
            current_password: TextInput::masked(),
            new_password: TextInput::masked(),
            confirm_password: TextInput::masked(),
            focus: ProfileField::Name,
        }
    }
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        ProfileForm {
            name: TextInput::with_value(user.name.clone()),
            email: TextInput::with_value(user.email.clone()),
            bio: TextInput::with_value(user.bio.clone().unwrap_or_default()),
            avatar: TextInput::with_value(user.avatar.clone().unwrap_or_default()),
            ..Default::default()
        }
    }

    pub fn input(&self, field: ProfileField) -> &TextInput {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Bio => &self.bio,
            ProfileField::Avatar => &self.avatar,
            ProfileField::CurrentPassword => &self.current_password,
            ProfileField::NewPassword => &self.new_password,
            ProfileField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Bio => &mut self.bio,
            ProfileField::Avatar => &mut self.avatar,
            ProfileField::CurrentPassword => &mut self.current_password,
            ProfileField::NewPassword => &mut self.new_password,
            ProfileField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    pub fn clear_passwords(&mut self) {
        self.current_password.clear();
        self.new_password.clear();
        self.confirm_password.clear();
    }

    /// Password fields only go out when a new password was typed
    pub fn validate(&self) -> Result<ProfileUpdate, ApiError> {
        let name = validation::required(self.name.value(), "Name")?;
        let email = validation::email(self.email.value())?;

        let mut update = ProfileUpdate {
            name,
            email,
            bio: self.bio.value().to_string(),
            avatar: self.avatar.value().trim().to_string(),
            current_password: None,
            new_password: None,
        };

        let new_password = self.new_password.value();
        if !new_password.is_empty() {
            if self.current_password.value().is_empty() {
                return Err(ApiError::validation(
                    "Current password is required to change password",
                ));
            }
            if new_password.chars().count() < MIN_PASSWORD_LEN {
                return Err(ApiError::validation(format!(
                    "New password must be at least {} characters long",
                    MIN_PASSWORD_LEN
                )));
            }
            if new_password != self.confirm_password.value() {
                return Err(ApiError::validation("New passwords do not match"));
            }
            update.current_password = Some(self.current_password.value().to_string());
            update.new_password = Some(new_password.to_string());
        }
        Ok(update)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfilePage {
    pub profile: Option<User>,
    pub loading: bool,
    pub load_error: Option<String>,
    pub editing: bool,
    pub form: ProfileForm,
    pub saving: bool,
    pub error: Option<String>,
}

impl ProfilePage {
    pub fn mount() -> (Self, ApiCall) {
        let page = ProfilePage {
            loading: true,
            ..Default::default()
        };
        (page, ApiCall::GetProfile)
    }

    pub fn on_loaded(&mut self, result: Result<User, ApiError>) {
        self.loading = false;
        match result {
            Ok(user) => {
                self.form = ProfileForm::from_user(&user);
                self.profile = Some(user);
                self.load_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching profile");
                self.load_error = Some("Failed to load profile".to_string());
            }
        }
    }

    pub fn start_edit(&mut self) {
        if let Some(user) = &self.profile {
            self.form = ProfileForm::from_user(user);
            self.editing = true;
            self.error = None;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.error = None;
        if let Some(user) = &self.profile {
            self.form = ProfileForm::from_user(user);
        }
    }

    pub fn submit(&mut self) -> Option<ApiCall> {
        if self.saving || !self.editing {
            return None;
        }
        match self.form.validate() {
            Ok(update) => {
                self.saving = true;
                self.error = None;
                Some(ApiCall::UpdateProfile(update))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Apply the saved profile. Token handling belongs to the caller.
    pub fn on_saved(&mut self, result: Result<User, ApiError>) {
        self.saving = false;
        match result {
            Ok(user) => {
                tracing::info!(user = %user.email, "Profile updated");
                self.profile = Some(user);
                self.editing = false;
                self.form.clear_passwords();
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error updating profile");
                self.error = Some(e.to_string());
            }
        }
    }
}
