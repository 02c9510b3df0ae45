//! Login and register forms

use crate::app::input::TextInput;
use crate::app::validation;
use crate::error::ApiError;
use crate::messages::ApiCall;
use crate::models::{LoginRequest, RegisterRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoginPage {
    pub email: TextInput,
    pub password: TextInput,
    pub focus: LoginField,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for LoginPage {
    fn default() -> Self {
        LoginPage {
            email: TextInput::new(),
            password: TextInput::masked(),
            focus: LoginField::Email,
            error: None,
            loading: false,
        }
    }
}

impl LoginPage {
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn submit(&mut self) -> Option<ApiCall> {
        if self.loading {
            return None;
        }
        let request = validation::email(self.email.value()).and_then(|email| {
            if self.password.value().is_empty() {
                return Err(ApiError::validation("Password is required"));
            }
            Ok(LoginRequest {
                email,
                password: self.password.value().to_string(),
            })
        });
        match request {
            Ok(request) => {
                self.loading = true;
                self.error = None;
                Some(ApiCall::Login(request))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Record a failed attempt; success navigates away
    pub fn on_failed(&mut self, error: ApiError) {
        tracing::warn!(error = %error, "Login failed");
        self.loading = false;
        self.password.clear();
        self.error = Some(error.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Name,
    Email,
    Password,
    Confirm,
}

impl RegisterField {
    pub fn next(self) -> Self {
        match self {
            RegisterField::Name => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Confirm,
            RegisterField::Confirm => RegisterField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RegisterField::Name => RegisterField::Confirm,
            RegisterField::Email => RegisterField::Name,
            RegisterField::Password => RegisterField::Email,
            RegisterField::Confirm => RegisterField::Password,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegisterPage {
    pub name: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub confirm: TextInput,
    pub focus: RegisterField,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for RegisterPage {
    fn default() -> Self {
        RegisterPage {
            name: TextInput::new(),
            email: TextInput::new(),
            password: TextInput::masked(),
            confirm: TextInput::masked(),
            focus: RegisterField::Name,
            error: None,
            loading: false,
        }
    }
}

impl RegisterPage {
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            RegisterField::Name => &mut self.name,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::Confirm => &mut self.confirm,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    fn validate(&self) -> Result<RegisterRequest, ApiError> {
        let name = validation::required(self.name.value(), "Name")?;
        let email = validation::email(self.email.value())?;
        let password = validation::new_password(self.password.value(), self.confirm.value())?;
        Ok(RegisterRequest {
            name,
            email,
            password,
        })
    }

    pub fn submit(&mut self) -> Option<ApiCall> {
        if self.loading {
            return None;
        }
        match self.validate() {
            Ok(request) => {
                self.loading = true;
                self.error = None;
                Some(ApiCall::Register(request))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn on_failed(&mut self, error: ApiError) {
        tracing::warn!(error = %error, "Registration failed");
        self.loading = false;
        self.error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let mut page = LoginPage::default();
        assert!(page.submit().is_none());
        assert_eq!(page.error.as_deref(), Some("Email is required"));

        page.email.set("kim@example.com");
        assert!(page.submit().is_none());
        assert_eq!(page.error.as_deref(), Some("Password is required"));

        page.password.set("secret1");
        let call = page.submit().unwrap();
        assert_eq!(
            call,
            ApiCall::Login(LoginRequest {
                email: "kim@example.com".into(),
                password: "secret1".into(),
            })
        );
        assert!(page.loading);
        assert!(page.submit().is_none());
    }

    #[test]
    fn test_login_failure_clears_password() {
        let mut page = LoginPage::default();
        page.email.set("kim@example.com");
        page.password.set("wrong-pass");
        page.submit();
        page.on_failed(ApiError::Server {
            status: 401,
            message: "Invalid email or password".into(),
        });
        assert!(!page.loading);
        assert!(page.password.value().is_empty());
        assert_eq!(page.error.as_deref(), Some("Invalid email or password"));
    }

    #[test]
    fn test_register_password_mismatch() {
        let mut page = RegisterPage::default();
        page.name.set("Kim");
        page.email.set("kim@example.com");
        page.password.set("secret1");
        page.confirm.set("secret2");
        assert!(page.submit().is_none());
        assert_eq!(page.error.as_deref(), Some("Passwords do not match"));
        assert!(!page.loading);
    }

    #[test]
    fn test_register_field_cycle() {
        let mut page = RegisterPage::default();
        page.prev_field();
        assert_eq!(page.focus, RegisterField::Confirm);
        page.next_field();
        page.focused_input().enter_char('K');
        assert_eq!(page.name.value(), "K");
        assert!(page.password.display().is_empty());
    }
}
