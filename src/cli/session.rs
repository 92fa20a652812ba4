//! Interactive menu loop.
//!
//! The session owns the repeat protocol: repeatable actions are wrapped in an
//! explicit loop that asks whether to run them again. Recoverable errors are
//! printed and the loop carries on; anything else unwinds to the caller.

use crate::cli::menu::{self, Action, MenuEntry, MENU};
use crate::cli::prompt::{self, Prompt};
use crate::constants;
use crate::core::export;
use crate::core::generator::{self, CharsetOptions};
use crate::core::store::{CredentialStore, RowChange};
use crate::core::strength;
use crate::core::table;
use crate::error::{Result, VaultError};
use std::io::{self, Write};
use std::path::PathBuf;
use zeroize::Zeroizing;

pub struct Session<'a, P: Prompt, W: Write> {
    store: &'a CredentialStore,
    prompt: P,
    out: W,
    home: Option<PathBuf>,
    menu: &'static [MenuEntry],
}

impl<'a, P: Prompt, W: Write> Session<'a, P, W> {
    pub fn new(store: &'a CredentialStore, prompt: P, out: W, home: Option<PathBuf>) -> Self {
        Self {
            store,
            prompt,
            out,
            home,
            menu: MENU,
        }
    }

    /// Show the menu and dispatch selections until the owner quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.out, "{}", menu::render(self.menu))?;
            writeln!(self.out, "{}", constants::DASH_LINE)?;

            let raw = self.prompt.line("What option would you choose?")?;
            let action = match menu::parse_selection(self.menu, &raw) {
                Ok(action) => action,
                Err(e) => {
                    self.report(&e)?;
                    continue;
                }
            };
            if action == Action::Quit {
                writeln!(self.out, "Bye.")?;
                return Ok(());
            }
            self.run_action(action)?;
        }
    }

    /// Run one action, then keep offering repeats if the action is repeatable.
    pub fn run_action(&mut self, action: Action) -> Result<()> {
        loop {
            if let Err(e) = self.perform(action) {
                if !e.is_recoverable() {
                    return Err(e);
                }
                self.report(&e)?;
            }
            writeln!(self.out, "{}", constants::DASH_LINE)?;

            if !action.repeatable() || !self.ask_repeat()? {
                return Ok(());
            }
        }
    }

    fn ask_repeat(&mut self) -> Result<bool> {
        loop {
            let answer = self.prompt.line("Do you want to repeat (y/n)?")?;
            match prompt::parse_choice(&answer) {
                Ok(choice) => return Ok(choice),
                Err(e) => self.report(&e)?,
            }
        }
    }

    fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Generate => self.generate(),
            Action::Save => self.save(),
            Action::CheckStrength => self.check_strength(),
            Action::Show => self.show(),
            Action::Export => self.export(),
            Action::Update => self.update(),
            Action::Delete => self.delete(),
            Action::Statistics => self.statistics(),
            Action::Quit => Ok(()),
        }
    }

    fn generate(&mut self) -> Result<()> {
        let raw = self.prompt.line("Enter the length")?;
        let length: usize = raw
            .parse()
            .map_err(|_| VaultError::InvalidChoice(format!("'{}' is not a length", raw)))?;
        generator::check_length(length)?;

        let options = CharsetOptions {
            digits: self.ask_option("digits")?,
            uppercase: self.ask_option("uppercase letters")?,
            special: self.ask_option("special characters")?,
        };
        let password = Zeroizing::new(generator::generate(length, options)?);
        writeln!(self.out, "{}", password.as_str())?;
        Ok(())
    }

    fn ask_option(&mut self, name: &str) -> Result<bool> {
        let answer = self.prompt.line(&format!("Include {}? (y/n)", name))?;
        prompt::parse_choice(&answer)
    }

    fn save(&mut self) -> Result<()> {
        let network = self.prompt.line("Enter the network")?;
        if network.is_empty() {
            return Err(VaultError::EmptyField("network"));
        }
        let email = self.prompt.line("Enter the email")?;
        let content = self.prompt.secret("Enter the password")?;

        let id = self.store.add(&network, &email, &content)?;
        writeln!(self.out, "Saved record #{} for {}.", id, network)?;
        if !strength::is_strong(&content) {
            writeln!(self.out, "note: this password looks weak.")?;
        }
        Ok(())
    }

    fn check_strength(&mut self) -> Result<()> {
        let candidate = self.prompt.secret("Enter the password that should be checked")?;
        let report = strength::analyze(&candidate);
        if report.passed() {
            writeln!(self.out, "The password is valid.")?;
        } else {
            writeln!(
                self.out,
                "This password looks weak. It needs: {}.",
                report.missing().join(", ")
            )?;
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        let records = self.store.list_all()?;
        if records.is_empty() {
            writeln!(self.out, "No passwords saved yet.")?;
            return Ok(());
        }
        writeln!(self.out, "{}", table::render_records(&records))?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let fragment = self.prompt.line(
            "Enter the directory under your home to save passwords.txt in (e.g. Desktop/main)",
        )?;
        let home = self.home.clone().ok_or_else(|| VaultError::ExportIo {
            path: PathBuf::from(&fragment),
            source: io::Error::new(io::ErrorKind::NotFound, "home directory is unknown"),
        })?;

        let records = self.store.list_all()?;
        let path = export::export_table(&home, &fragment, &table::render_records(&records))?;
        writeln!(
            self.out,
            "Exported {} record(s) to {}.",
            records.len(),
            path.display()
        )?;
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let id = self.ask_id("Enter the id of the record to update")?;
        let Some(current) = self.store.get(id)? else {
            return self.notice_missing(id);
        };

        let network = self.prompt.line(&format!("Network [{}]", current.network))?;
        let email = self.prompt.line(&format!("Email [{}]", current.email))?;
        let content = self
            .prompt
            .secret("New password (leave empty to keep the current one)")?;

        let network = if network.is_empty() { current.network } else { network };
        let email = if email.is_empty() { current.email } else { email };
        let content = if content.is_empty() {
            Zeroizing::new(current.content)
        } else {
            content
        };

        match self.store.update(id, &network, &email, &content)? {
            RowChange::Applied => writeln!(self.out, "Updated record #{}.", id)?,
            RowChange::NotFound => self.notice_missing(id)?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let id = self.ask_id("Enter the id of the record to delete")?;
        match self.store.remove(id)? {
            RowChange::Applied => writeln!(self.out, "Deleted record #{}.", id)?,
            RowChange::NotFound => self.notice_missing(id)?,
        }
        Ok(())
    }

    fn statistics(&mut self) -> Result<()> {
        let stats = self.store.stats()?;
        writeln!(self.out, "Records: {}", stats.records)?;
        writeln!(self.out, "Distinct networks: {}", stats.distinct_networks)?;
        if let (Some(oldest), Some(newest)) = (stats.oldest, stats.newest) {
            writeln!(self.out, "Oldest: {}", oldest.format("%Y-%m-%d %H:%M:%S"))?;
            writeln!(self.out, "Newest: {}", newest.format("%Y-%m-%d %H:%M:%S"))?;
        }
        Ok(())
    }

    fn ask_id(&mut self, question: &str) -> Result<i64> {
        let raw = self.prompt.line(question)?;
        raw.parse()
            .map_err(|_| VaultError::InvalidChoice(format!("'{}' is not a record id", raw)))
    }

    fn notice_missing(&mut self, id: i64) -> Result<()> {
        writeln!(
            self.out,
            "notice: {}; nothing changed.",
            VaultError::RecordNotFound(id)
        )?;
        Ok(())
    }

    fn report(&mut self, err: &VaultError) -> Result<()> {
        writeln!(self.out, "error: {}", err)?;
        Ok(())
    }

    #[cfg(test)]
    fn into_parts(self) -> (P, W) {
        (self.prompt, self.out)
    }
}
