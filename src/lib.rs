//! # Marquee
//!
//! A terminal client for a movie-catalog backend.
//!
//! ## Features
//! - Browse the catalog with search and genre filters
//! - Movie details with reviews and a five-star review form
//! - Admin dashboard to create, edit and delete movies
//! - Login, registration and profile editing
//! - Persisted session token and light/dark appearance
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use models::{Movie, MovieDraft, Review, ReviewDraft, Role, User};
pub use storage::{SharedStorage, Storage};
pub use messages::{ApiCall, ApiReply, UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, Route, SessionStore};
pub use network::{HttpGateway, MovieApi, NetworkActor};
