//! Centralized constants for permissions, paths, and limits.

/// Fallback data directory when no platform data dir is available.
pub const FALLBACK_DATA_DIR: &str = "./data";

/// Directory name created under the platform data dir.
pub const APP_DIR_NAME: &str = "passman";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "PASSMAN_HOME";

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "PASSMAN_LOG";

/// Owner identity file name.
pub const CONFIG_FILE: &str = "config.json";

/// SQLite store file name.
pub const DATABASE_FILE: &str = "passwords.db";

/// Optional tunables file name.
pub const SETTINGS_FILE: &str = "settings.toml";

/// File name written by the export action.
pub const EXPORT_FILE: &str = "passwords.txt";

/// Permission mode for the data directory.
pub const DATA_DIR_MODE: u32 = 0o700;

/// Permission mode for config.json, passwords.db and settings.toml.
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Permission mode for exported tables.
pub const EXPORT_FILE_MODE: u32 = 0o600;

/// Generated password length bounds (inclusive).
pub const MIN_GENERATED_LENGTH: usize = 4;
pub const MAX_GENERATED_LENGTH: usize = 128;

/// Default length for `genpass` when none is given.
pub const DEFAULT_GENERATED_LENGTH: usize = 16;

/// Character pools for the generator. Lowercase is always included.
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const SPECIAL: &str = "!@#$%^&*()";

/// Strength policy: length window and the accepted special characters.
pub const STRONG_MIN_LENGTH: usize = 8;
pub const STRONG_MAX_LENGTH: usize = 30;
pub const STRONG_SPECIAL: &str = "!@#$%^&*";

/// Separator printed between menu actions.
pub const DASH_LINE: &str = "----------------------------------------";

/// Column headers for the show/export table.
pub const RECORD_COLUMNS: &[&str] = &["id", "network", "email", "content", "saved_at"];

pub const APP_INFO: &str = concat!(
    "passman v",
    env!("CARGO_PKG_VERSION"),
    " - a password manager for people who live in the terminal.\n",
    "  1. Everything stays in a local database; nothing leaves this machine.\n",
    "  2. Access is gated by a single owner name and secret.\n",
    "  3. The owner secret is stored as a salted Argon2id hash.\n",
    "Run without flags to open the interactive menu."
);
