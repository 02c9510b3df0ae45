//! Network layer - backend gateway and the actor that drives it
//!
//! The Network actor receives API calls and sends back their results.

pub mod actor;
pub mod client;
pub mod gateway;
pub mod payload;

pub use actor::NetworkActor;
pub use client::HttpGateway;
pub use gateway::MovieApi;
