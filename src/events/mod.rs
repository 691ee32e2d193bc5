//! Turn resolution events for the presentation layer.

pub mod event;

pub use event::GameEvent;
