//! CLI routing, the owner gate and command dispatch.

use crate::constants;
use crate::core::owner::OwnerIdentity;
use crate::core::paths::AppPaths;
use crate::core::settings;
use crate::core::store::{CredentialStore, StoreOptions};
use crate::models::settings::Settings;
use crate::util::fs as vault_fs;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

pub mod commands;
pub mod gate;
pub mod interrupt;
pub mod menu;
pub mod prompt;
pub mod session;

use interrupt::ExitHooks;
use prompt::{Prompt, TermPrompt};
use session::Session;

/// Shared context passed to the gate and command handlers.
pub struct CliContext {
    pub paths: AppPaths,
    pub settings: Settings,
}

impl CliContext {
    pub fn owner(&self) -> OwnerIdentity {
        OwnerIdentity::new(&self.paths.config)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            unique_networks: self.settings.store.unique_networks,
        }
    }

    pub fn open_store(&self) -> crate::error::Result<CredentialStore> {
        CredentialStore::initialize(&self.paths.database, self.store_options())
    }
}

#[derive(Parser, Debug)]
#[command(name = "passman", version, about = "Local, single-owner password vault")]
pub struct Cli {
    /// Data directory holding config.json, passwords.db and settings.toml
    #[arg(long, global = true, value_name = "PATH", env = constants::HOME_ENV)]
    pub root: Option<PathBuf>,

    /// Configure (or replace) the owner identity and exit
    #[arg(short, long)]
    pub setup: bool,

    /// Print information about passman and exit
    #[arg(short, long)]
    pub info: bool,

    /// Clear the owner identity after this session (also accepted as -rc)
    #[arg(long)]
    pub reset_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// What the gate should do once the data directory is ready.
#[derive(Debug, Default)]
pub struct Invocation {
    pub setup: bool,
    pub reset_config: bool,
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self, hooks: &ExitHooks) -> Result<()> {
        let Cli {
            root,
            setup,
            info,
            reset_config,
            command,
        } = self;

        if info {
            println!("{}", constants::APP_INFO);
            return Ok(());
        }

        let paths = AppPaths::resolve(root);
        vault_fs::ensure_dir(&paths.root, constants::DATA_DIR_MODE)?;

        // Settings are optional tunables; a broken file falls back to defaults.
        let settings = match settings::load(&paths.settings) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: cannot read settings, using defaults: {:#}", e);
                Settings::default()
            }
        };
        let ctx = CliContext { paths, settings };
        debug!(vault = %ctx.paths, "context ready");

        let invocation = Invocation {
            setup,
            reset_config,
            command,
        };
        run_with(
            &ctx,
            invocation,
            &mut TermPrompt,
            &mut io::stdout(),
            dirs::home_dir(),
            hooks,
        )
    }
}

/// The owner gate: setup, login, then the session or a subcommand.
pub fn run_with<P: Prompt, W: Write>(
    ctx: &CliContext,
    invocation: Invocation,
    prompt: &mut P,
    out: &mut W,
    home: Option<PathBuf>,
    hooks: &ExitHooks,
) -> Result<()> {
    let owner = ctx.owner();

    if invocation.setup {
        gate::setup(&owner, &ctx.paths.settings, &ctx.settings, prompt, out)?;
        return Ok(());
    }

    let command = match invocation.command {
        Some(Commands::Genpass(args)) => return commands::run_genpass(args, out),
        Some(Commands::Strength(args)) => return commands::run_strength(args, out),
        other => other,
    };

    if !owner.exists()? {
        writeln!(out, "No owner is configured yet. Let's set one up.")?;
        gate::setup(&owner, &ctx.paths.settings, &ctx.settings, prompt, out)?;
        return Ok(());
    }

    let name = gate::login(&owner, prompt, out, ctx.settings.login.attempts())?;
    writeln!(out, "Welcome back, {}!", name)?;

    if invocation.reset_config {
        hooks.arm_reset(ctx.owner());
    }
    let outcome = run_gated(ctx, command, prompt, out, home);

    if invocation.reset_config {
        hooks.disarm_reset();
        match owner.reset() {
            Ok(()) => writeln!(
                out,
                "Owner configuration cleared; the next launch runs setup again."
            )?,
            Err(e) if outcome.is_err() => warn!("cannot clear owner configuration: {}", e),
            Err(e) => return Err(e.into()),
        }
    }
    outcome
}

/// Open the store and run either the interactive session or one subcommand.
fn run_gated<P: Prompt, W: Write>(
    ctx: &CliContext,
    command: Option<Commands>,
    prompt: &mut P,
    out: &mut W,
    home: Option<PathBuf>,
) -> Result<()> {
    let store = ctx.open_store()?;

    match command {
        None => Session::new(&store, &mut *prompt, &mut *out, home).run()?,
        Some(Commands::Save(args)) => commands::run_save(&store, args, prompt, out)?,
        Some(Commands::Delete(args)) => commands::run_delete(&store, args, out)?,
        Some(Commands::Show(args)) => commands::run_show(&store, args, out)?,
        Some(Commands::Export(args)) => commands::run_export(&store, args, home.as_deref(), out)?,
        Some(Commands::Genpass(args)) => commands::run_genpass(args, out)?,
        Some(Commands::Strength(args)) => commands::run_strength(args, out)?,
    }
    Ok(())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a random password
    Genpass(commands::GenpassArgs),
    /// Check a password against the strength policy
    Strength(commands::StrengthArgs),
    /// Save a credential
    Save(commands::SaveArgs),
    /// Delete a credential by id
    Delete(commands::DeleteArgs),
    /// List saved credentials
    Show(commands::ShowArgs),
    /// Write all credentials to <home>/<PATH_FRAGMENT>/passwords.txt
    Export(commands::ExportArgs),
}

/// Rewrite the legacy `-rc` spelling, which clap cannot express as a short flag.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-rc" {
                OsString::from("--reset-config")
            } else {
                arg
            }
        })
        .collect()
}
