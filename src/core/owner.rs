//! Single-owner identity persisted in `config.json`.
//!
//! State machine: `Absent -> set -> Present -> reset -> Absent`. The secret is
//! only ever stored as an Argon2id PHC string.

use crate::constants;
use crate::error::{Result, VaultError};
use crate::models::owner::{OwnerFile, StoredOwner};
use crate::util::fs as vault_fs;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct OwnerIdentity {
    path: PathBuf,
}

impl OwnerIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.load()?.is_some())
    }

    /// Persist `name` and a salted hash of `secret`, replacing any prior identity.
    pub fn set(&self, name: &str, secret: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(VaultError::EmptyField("owner name"));
        }
        if secret.is_empty() {
            return Err(VaultError::EmptyField("owner secret"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let secret_hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| VaultError::Config(format!("hash owner secret: {}", e)))?
            .to_string();

        let owner = StoredOwner {
            name: name.to_string(),
            secret_hash,
        };
        let json = serde_json::to_string_pretty(&OwnerFile::from(&owner))
            .map_err(|e| VaultError::Config(format!("serialize owner: {}", e)))?;
        vault_fs::write_atomic(&self.path, json.as_bytes(), constants::PRIVATE_FILE_MODE)
            .map_err(|e| VaultError::Config(format!("{:#}", e)))?;

        info!(path = %self.path.display(), "owner identity stored");
        Ok(())
    }

    /// Check `name` and `secret` against the stored identity.
    ///
    /// The hash is always computed, even when the name differs, so the
    /// response time does not reveal which half was wrong.
    pub fn verify(&self, name: &str, secret: &str) -> Result<bool> {
        let owner = self.load()?.ok_or(VaultError::NotConfigured)?;
        let parsed = PasswordHash::new(&owner.secret_hash)
            .map_err(|e| VaultError::Config(format!("stored secret hash is malformed: {}", e)))?;

        let secret_ok = Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok();
        let name_ok = owner.name == name.trim();
        debug!(name_ok, secret_ok, "owner check");
        Ok(name_ok && secret_ok)
    }

    /// Clear the identity; the next launch runs first-run setup again.
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "owner identity cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VaultError::Config(format!(
                "remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn load(&self) -> Result<Option<StoredOwner>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(VaultError::Config(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        let file: OwnerFile = serde_json::from_str(&content)
            .map_err(|e| VaultError::Config(format!("parse {}: {}", self.path.display(), e)))?;
        if file.is_legacy_cleartext() {
            warn!(
                path = %self.path.display(),
                "ignoring cleartext owner config; run --setup to store a hashed secret"
            );
            return Ok(None);
        }
        Ok(file.into_owner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn identity() -> (TempDir, OwnerIdentity) {
        let dir = TempDir::new().unwrap();
        let owner = OwnerIdentity::new(dir.path().join("config.json"));
        (dir, owner)
    }

    #[test]
    fn test_absent_by_default() {
        let (_dir, owner) = identity();
        assert!(!owner.exists().unwrap());
        assert!(matches!(
            owner.verify("me", "pw"),
            Err(VaultError::NotConfigured)
        ));
    }

    #[test]
    fn test_set_then_verify() {
        let (_dir, owner) = identity();
        owner.set("alice", "s3cret!").unwrap();
        assert!(owner.exists().unwrap());
        assert!(owner.verify("alice", "s3cret!").unwrap());
        assert!(!owner.verify("alice", "s3cret?").unwrap());
        assert!(!owner.verify("bob", "s3cret!").unwrap());
    }

    #[test]
    fn test_secret_not_stored_in_cleartext() {
        let (_dir, owner) = identity();
        owner.set("alice", "plain-text-secret").unwrap();
        let raw = fs::read_to_string(owner.path()).unwrap();
        assert!(!raw.contains("plain-text-secret"));
        assert!(raw.contains("$argon2id$"));
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, owner) = identity();
        owner.set("alice", "one").unwrap();
        owner.set("bob", "two").unwrap();
        assert!(!owner.verify("alice", "one").unwrap());
        assert!(owner.verify("bob", "two").unwrap());
    }

    #[test]
    fn test_reset_clears_state() {
        let (_dir, owner) = identity();
        owner.set("alice", "pw").unwrap();
        owner.reset().unwrap();
        assert!(!owner.exists().unwrap());
        assert!(matches!(
            owner.verify("alice", "pw"),
            Err(VaultError::NotConfigured)
        ));
        owner.reset().unwrap();
    }

    #[test]
    fn test_legacy_layouts_count_as_absent() {
        let (_dir, owner) = identity();
        fs::write(owner.path(), "{}").unwrap();
        assert!(!owner.exists().unwrap());

        fs::write(owner.path(), r#"{"name": "alice", "password": "pw"}"#).unwrap();
        assert!(!owner.exists().unwrap());
    }

    #[test]
    fn test_corrupt_config_is_error() {
        let (_dir, owner) = identity();
        fs::write(owner.path(), "{not json").unwrap();
        assert!(matches!(owner.exists(), Err(VaultError::Config(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let (_dir, owner) = identity();
        assert!(matches!(
            owner.set("  ", "pw"),
            Err(VaultError::EmptyField("owner name"))
        ));
        assert!(!owner.exists().unwrap());
    }
}
