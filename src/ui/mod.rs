//! UI layer - synchronous rendering of [`RenderState`](crate::messages::RenderState) snapshots

pub mod views;
pub mod widgets;

pub use views::draw_ui;
pub use widgets::Palette;
