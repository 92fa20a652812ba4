//! Error taxonomy shared by the store, the owner gate and the session.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("no owner is configured yet - run with --setup first")]
    NotConfigured,

    #[error("wrong owner credentials were entered, exiting")]
    NotOwner,

    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    #[error("a record for network '{0}' already exists")]
    DuplicateKey(String),

    #[error("no record with id {0}")]
    RecordNotFound(i64),

    #[error("credential store unavailable: {0}")]
    StorageUnavailable(String),

    #[error("credential store refused the operation: {0}")]
    Storage(String),

    #[error("cannot export to {}: {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("length {given} is not in the {min}..={max} range")]
    LengthNotInRange {
        given: usize,
        min: usize,
        max: usize,
    },

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("interrupted")]
    Interrupted,
}

impl VaultError {
    /// Whether the session may report this error and keep running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            VaultError::InvalidChoice(_)
                | VaultError::DuplicateKey(_)
                | VaultError::RecordNotFound(_)
                | VaultError::Storage(_)
                | VaultError::ExportIo { .. }
                | VaultError::LengthNotInRange { .. }
                | VaultError::EmptyField(_)
        )
    }
}

pub type Result<T, E = VaultError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(VaultError::InvalidChoice("x".into()).is_recoverable());
        assert!(VaultError::DuplicateKey("svc".into()).is_recoverable());
        assert!(VaultError::RecordNotFound(3).is_recoverable());
        assert!(VaultError::EmptyField("network").is_recoverable());
    }

    #[test]
    fn test_fatal_kinds() {
        assert!(!VaultError::NotOwner.is_recoverable());
        assert!(!VaultError::NotConfigured.is_recoverable());
        assert!(!VaultError::Interrupted.is_recoverable());
        assert!(!VaultError::StorageUnavailable("disk".into()).is_recoverable());
    }

    #[test]
    fn test_length_message() {
        let err = VaultError::LengthNotInRange {
            given: 2,
            min: 4,
            max: 128,
        };
        assert_eq!(err.to_string(), "length 2 is not in the 4..=128 range");
    }
}
