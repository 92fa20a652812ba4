use serde::{Deserialize, Serialize};

/// On-disk form of the owner identity (`config.json`).
///
/// Every field is optional so that the legacy `{}` reset marker and the
/// cleartext `{"name", "password"}` layout still parse; both count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_hash: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

/// A complete, usable owner identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOwner {
    pub name: String,
    pub secret_hash: String,
}

impl OwnerFile {
    pub fn into_owner(self) -> Option<StoredOwner> {
        match (self.name, self.secret_hash) {
            (Some(name), Some(secret_hash)) if !secret_hash.is_empty() => {
                Some(StoredOwner { name, secret_hash })
            }
            _ => None,
        }
    }

    pub fn is_legacy_cleartext(&self) -> bool {
        self.password.is_some() && self.secret_hash.is_none()
    }
}

impl From<&StoredOwner> for OwnerFile {
    fn from(owner: &StoredOwner) -> Self {
        Self {
            name: Some(owner.name.clone()),
            secret_hash: Some(owner.secret_hash.clone()),
            password: None,
        }
    }
}
