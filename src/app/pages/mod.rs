//! Per-screen state. Each page is mounted fresh on navigation and returns
//! the call that loads its data.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod details;
pub mod profile;

pub use admin::{AdminPage, FormField, MovieForm};
pub use auth::{LoginField, LoginPage, RegisterField, RegisterPage};
pub use catalog::{CatalogPage, GenreFilter};
pub use details::DetailsPage;
pub use profile::{ProfileField, ProfileForm, ProfilePage};
