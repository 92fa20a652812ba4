//! Core business logic modules.

pub mod export;
pub mod generator;
pub mod owner;
pub mod paths;
pub mod settings;
pub mod store;
pub mod strength;
pub mod table;
