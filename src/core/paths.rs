//! Data directory resolution and file layout.

use crate::constants;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub database: PathBuf,
    pub settings: PathBuf,
}

impl AppPaths {
    /// Resolve the data directory from CLI arg, env var, or the platform data dir.
    pub fn resolve(root_arg: Option<PathBuf>) -> Self {
        if let Some(root) = root_arg {
            return Self::from_root(root);
        }
        if let Ok(root) = env::var(constants::HOME_ENV) {
            if !root.trim().is_empty() {
                return Self::from_root(PathBuf::from(root));
            }
        }
        if let Some(data) = dirs::data_dir() {
            return Self::from_root(data.join(constants::APP_DIR_NAME));
        }
        Self::from_root(PathBuf::from(constants::FALLBACK_DATA_DIR))
    }

    /// Lay out the data files under a root directory.
    pub fn from_root(root: PathBuf) -> Self {
        let config = root.join(constants::CONFIG_FILE);
        let database = root.join(constants::DATABASE_FILE);
        let settings = root.join(constants::SETTINGS_FILE);
        Self {
            root,
            config,
            database,
            settings,
        }
    }
}

impl std::fmt::Display for AppPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "passman@{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root() {
        let paths = AppPaths::from_root(PathBuf::from("/test"));
        assert_eq!(paths.root, PathBuf::from("/test"));
        assert_eq!(paths.config, PathBuf::from("/test/config.json"));
        assert_eq!(paths.database, PathBuf::from("/test/passwords.db"));
        assert_eq!(paths.settings, PathBuf::from("/test/settings.toml"));
    }

    #[test]
    fn test_explicit_root_wins() {
        let paths = AppPaths::resolve(Some(PathBuf::from("/explicit")));
        assert_eq!(paths.root, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_display() {
        let paths = AppPaths::from_root(PathBuf::from("/v"));
        assert_eq!(paths.to_string(), "passman@/v");
    }
}
