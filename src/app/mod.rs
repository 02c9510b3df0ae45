//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod appearance;
pub mod input;
pub mod pages;
pub mod router;
pub mod session;
pub mod validation;

pub use state::{AppState, Purpose};
pub use actor::AppActor;
pub use appearance::Appearance;
pub use router::{Route, Screen};
pub use session::SessionStore;
