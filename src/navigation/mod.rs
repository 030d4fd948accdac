//! Navigation module - where the player stands and how it moves.

mod movement;
mod plugin;
mod state;

pub use movement::{activation_for, commit_move, plan_click, PendingMove, Step, Walk, WalkPlan};
pub use plugin::NavigationPlugin;
pub use state::NavigationState;
