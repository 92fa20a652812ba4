//! Local, single-owner password vault for the terminal.
//!
//! Credentials live in a SQLite file under the data directory. Access is
//! gated by one owner identity whose secret is stored as an Argon2id hash.
//!
//! ## Modules
//! - `cli` - argument parsing, the owner gate and the interactive menu
//! - `core` - store, owner identity, generator, strength policy, table export
//! - `models` - records, owner file layout and settings
//! - `util` - filesystem and path helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod util;
