//! The ordered menu table and selection parsing.

use crate::error::{Result, VaultError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    Save,
    CheckStrength,
    Show,
    Export,
    Update,
    Delete,
    Statistics,
    Quit,
}

impl Action {
    /// Whether the session offers to run this action again right away.
    pub fn repeatable(self) -> bool {
        matches!(self, Action::Generate | Action::Save | Action::CheckStrength)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub action: Action,
    pub label: &'static str,
}

impl MenuEntry {
    pub const fn new(action: Action, label: &'static str) -> Self {
        Self { action, label }
    }
}

/// Menu slots in display order; slot `n` is `MENU[n - 1]`.
pub const MENU: &[MenuEntry] = &[
    MenuEntry::new(Action::Generate, "Generate a password"),
    MenuEntry::new(Action::Save, "Save a password"),
    MenuEntry::new(Action::CheckStrength, "Check password strength"),
    MenuEntry::new(Action::Show, "Show all saved passwords"),
    MenuEntry::new(Action::Export, "Export all passwords"),
    MenuEntry::new(Action::Update, "Update a saved password"),
    MenuEntry::new(Action::Delete, "Delete a saved password"),
    MenuEntry::new(Action::Statistics, "Show vault statistics"),
    MenuEntry::new(Action::Quit, "Quit"),
];

pub fn render(menu: &[MenuEntry]) -> String {
    let mut out = String::from("\tWelcome to the passman menu.\nAvailable actions:\n");
    for (i, entry) in menu.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, entry.label));
    }
    out
}

/// Map 1-based user input to an action of `menu`.
pub fn parse_selection(menu: &[MenuEntry], input: &str) -> Result<Action> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(VaultError::InvalidChoice("no option entered".into()));
    }
    let index: usize = trimmed
        .parse()
        .map_err(|_| VaultError::InvalidChoice(format!("'{}' is not a menu number", trimmed)))?;
    index
        .checked_sub(1)
        .and_then(|i| menu.get(i))
        .map(|entry| entry.action)
        .ok_or_else(|| {
            VaultError::InvalidChoice(format!(
                "{} is not between 1 and {}",
                index,
                menu.len()
            ))
        })
}
