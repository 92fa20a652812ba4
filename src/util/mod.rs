//! Filesystem and path helpers.

pub mod fs;
pub mod path;
