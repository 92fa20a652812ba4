//! One-shot subcommands that bypass the interactive menu.

use crate::cli::prompt::Prompt;
use crate::constants;
use crate::core::export;
use crate::core::generator::{self, CharsetOptions};
use crate::core::store::{CredentialStore, RowChange};
use crate::core::strength;
use crate::core::table;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::Write;
use std::path::Path;
use zeroize::Zeroizing;

#[derive(Args, Debug)]
pub struct GenpassArgs {
    /// Password length (4..=128)
    #[arg(default_value_t = constants::DEFAULT_GENERATED_LENGTH)]
    pub length: usize,

    /// Include digits
    #[arg(long)]
    pub digits: bool,

    /// Include uppercase letters
    #[arg(long)]
    pub uppercase: bool,

    /// Include special characters
    #[arg(long)]
    pub special: bool,
}

#[derive(Args, Debug)]
pub struct StrengthArgs {
    /// Password to check
    pub password: String,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Network or service the credential belongs to
    pub network: String,

    /// Account email or login
    pub email: String,

    /// Secret content (prompted without echo when omitted)
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Record id as shown by `show`
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format: table|json
    #[arg(long, default_value = "table")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory under the home directory, e.g. Desktop/main
    pub path_fragment: String,
}

pub fn run_genpass<W: Write>(args: GenpassArgs, out: &mut W) -> Result<()> {
    let options = CharsetOptions {
        digits: args.digits,
        uppercase: args.uppercase,
        special: args.special,
    };
    let password = Zeroizing::new(generator::generate(args.length, options)?);
    writeln!(out, "{}", password.as_str())?;
    Ok(())
}

/// Prints the verdict; a weak password is reported as an error so scripts can test the exit code.
pub fn run_strength<W: Write>(args: StrengthArgs, out: &mut W) -> Result<()> {
    let password = Zeroizing::new(args.password);
    let report = strength::analyze(&password);
    if report.passed() {
        writeln!(out, "The password is valid.")?;
        return Ok(());
    }
    bail!("password is weak, it needs: {}", report.missing().join(", "));
}

pub fn run_save<P: Prompt, W: Write>(
    store: &CredentialStore,
    args: SaveArgs,
    prompt: &mut P,
    out: &mut W,
) -> Result<()> {
    let content = match args.content {
        Some(c) => Zeroizing::new(c),
        None => prompt.secret(&format!("Password for {}", args.network))?,
    };
    let id = store.add(&args.network, &args.email, &content)?;
    writeln!(out, "Saved record #{} for {}.", id, args.network.trim())?;
    if !strength::is_strong(&content) {
        writeln!(out, "note: this password looks weak.")?;
    }
    Ok(())
}

pub fn run_delete<W: Write>(store: &CredentialStore, args: DeleteArgs, out: &mut W) -> Result<()> {
    match store.remove(args.id)? {
        RowChange::Applied => writeln!(out, "Deleted record #{}.", args.id)?,
        RowChange::NotFound => bail!("no record with id {}", args.id),
    }
    Ok(())
}

pub fn run_show<W: Write>(store: &CredentialStore, args: ShowArgs, out: &mut W) -> Result<()> {
    if args.format != "table" && args.format != "json" {
        bail!("invalid format: {} (use table|json)", args.format);
    }

    let records = store.list_all()?;
    if args.format == "json" {
        let json = serde_json::to_string_pretty(&records).context("serialize records")?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "No passwords saved yet.")?;
        return Ok(());
    }
    writeln!(out, "{}", table::render_records(&records))?;
    Ok(())
}

pub fn run_export<W: Write>(
    store: &CredentialStore,
    args: ExportArgs,
    home: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let home = home.context("cannot determine the home directory")?;
    let records = store.list_all()?;
    let path = export::export_table(home, &args.path_fragment, &table::render_records(&records))?;
    writeln!(out, "Exported {} record(s) to {}.", records.len(), path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompt::scripted::ScriptedPrompt;
    use crate::core::store::StoreOptions;
    use crate::models::record::Record;
    use tempfile::TempDir;

    fn store() -> CredentialStore {
        CredentialStore::in_memory(StoreOptions::default()).unwrap()
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_genpass_default_pool() {
        let mut out = Vec::<u8>::new();
        let args = GenpassArgs {
            length: 20,
            digits: false,
            uppercase: false,
            special: false,
        };
        run_genpass(args, &mut out).unwrap();
        let line = text(out);
        assert_eq!(line.trim_end().len(), 20);
        assert!(line.trim_end().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_genpass_rejects_short_length() {
        let args = GenpassArgs {
            length: 3,
            digits: true,
            uppercase: true,
            special: true,
        };
        let err = run_genpass(args, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("4..=128"));
    }

    #[test]
    fn test_strength_verdicts() {
        let mut out = Vec::<u8>::new();
        let strong = StrengthArgs {
            password: "Abcdef1!".into(),
        };
        run_strength(strong, &mut out).unwrap();
        assert!(text(out).contains("valid"));

        let weak = StrengthArgs {
            password: "abc".into(),
        };
        let err = run_strength(weak, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("weak"));
    }

    #[test]
    fn test_save_prompts_when_content_missing() {
        let store = store();
        let mut prompt = ScriptedPrompt::new(["Hidden1!x"]);
        let mut out = Vec::<u8>::new();
        let args = SaveArgs {
            network: "github".into(),
            email: "me@x.com".into(),
            content: None,
        };
        run_save(&store, args, &mut prompt, &mut out).unwrap();
        assert_eq!(prompt.asked, vec!["Password for github".to_string()]);
        assert_eq!(store.list_all().unwrap()[0].content, "Hidden1!x");
        assert!(text(out).contains("Saved record #1"));
    }

    #[test]
    fn test_save_duplicate_fails() {
        let store = store();
        store.add("github", "", "x").unwrap();
        let args = SaveArgs {
            network: "github".into(),
            email: "".into(),
            content: Some("y".into()),
        };
        let err = run_save(&store, args, &mut ScriptedPrompt::default(), &mut Vec::<u8>::new())
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_delete_missing_is_error() {
        let store = store();
        let id = store.add("svc", "", "pw").unwrap();
        run_delete(&store, DeleteArgs { id }, &mut Vec::<u8>::new()).unwrap();
        assert!(run_delete(&store, DeleteArgs { id }, &mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_show_json_and_bad_format() {
        let store = store();
        store.add("svc", "e@x.com", "pw").unwrap();

        let mut out = Vec::<u8>::new();
        let args = ShowArgs {
            format: "json".into(),
        };
        run_show(&store, args, &mut out).unwrap();
        let records: Vec<Record> = serde_json::from_slice(&out).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].network, "svc");

        let args = ShowArgs {
            format: "xml".into(),
        };
        assert!(run_show(&store, args, &mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_export_requires_home() {
        let store = store();
        let args = ExportArgs {
            path_fragment: "Desktop".into(),
        };
        assert!(run_export(&store, args, None, &mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_export_writes_file() {
        let home = TempDir::new().unwrap();
        let store = store();
        store.add("svc", "e@x.com", "pw").unwrap();
        let args = ExportArgs {
            path_fragment: "/".into(),
        };
        let mut out = Vec::<u8>::new();
        run_export(&store, args, Some(home.path()), &mut out).unwrap();
        assert!(home.path().join(constants::EXPORT_FILE).is_file());
        assert!(text(out).contains("Exported 1 record(s)"));
    }
}
