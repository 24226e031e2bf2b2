//! Input module - action bindings and per-frame device sampling.

mod actions;
mod bindings;
mod plugin;
mod sampler;

pub use actions::*;
pub use bindings::*;
pub use plugin::{ActionInputPlugin, InputSet};
pub use sampler::{update_action_state, DeviceSnapshot};
