//! First-run setup and the owner login check.

use crate::core::owner::OwnerIdentity;
use crate::core::settings;
use crate::core::strength;
use crate::cli::prompt::Prompt;
use crate::error::{Result, VaultError};
use crate::models::settings::Settings;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Ask for a name and a confirmed secret and store them as the owner identity.
pub fn setup<P: Prompt, W: Write>(
    owner: &OwnerIdentity,
    settings_path: &Path,
    settings: &Settings,
    prompt: &mut P,
    out: &mut W,
) -> Result<()> {
    let name = prompt.line("Choose the owner name")?;
    if name.is_empty() {
        return Err(VaultError::EmptyField("owner name"));
    }
    let secret = prompt.new_secret("Choose the owner secret")?;
    owner.set(&name, &secret)?;

    if let Err(e) = settings::ensure_defaults(settings_path) {
        warn!("cannot write default settings: {:#}", e);
    }

    writeln!(out, "Owner configured. Run passman again to log in.")?;
    if settings.setup.echo_credentials {
        writeln!(out, "name: {}", name)?;
        writeln!(out, "secret: {}", secret.as_str())?;
    }
    if !strength::is_strong(&secret) {
        writeln!(out, "note: the owner secret looks weak; consider running --setup again.")?;
    }
    Ok(())
}

/// Check the owner, allowing `attempts` tries. Returns the accepted name.
pub fn login<P: Prompt, W: Write>(
    owner: &OwnerIdentity,
    prompt: &mut P,
    out: &mut W,
    attempts: u32,
) -> Result<String> {
    for attempt in 1..=attempts {
        let name = prompt.line("Owner name")?;
        let secret = prompt.secret("Owner secret")?;
        if owner.verify(&name, &secret)? {
            info!(attempt, "owner logged in");
            return Ok(name);
        }
        warn!(attempt, attempts, "owner check failed");
        if attempt < attempts {
            writeln!(out, "Wrong credentials, {} attempt(s) left.", attempts - attempt)?;
        }
    }
    Err(VaultError::NotOwner)
}
