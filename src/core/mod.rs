//! Core module - states, events, configuration, and the walking animation.
//!
//! This module provides the foundation that all other plugins build upon.

mod config;
mod events;
mod plugin;
mod states;
mod tween;

pub use config::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use tween::*;
