//! Controller module - the engine-independent first-person movement core.
//!
//! Nothing in here touches the ECS. The game layer implements the handle
//! traits and calls [`FirstPersonController::tick`] once per frame.

mod character;
mod config;
mod error;
mod handles;
mod state;

pub mod crouch;
pub mod headbob;
pub mod locomotion;
pub mod look;
pub mod motion;
pub mod vertical;

pub use character::{FirstPersonController, TickReport};
pub use config::*;
pub use error::*;
pub use handles::*;
pub use state::*;
