//! Data structures shared between the store, the owner gate and the CLI.

pub mod owner;
pub mod record;
pub mod settings;
