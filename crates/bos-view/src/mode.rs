//! The four small state machines the wallet screens move through.
//!
//! Each enum parses from the `data-val` strings the markup carries and maps
//! to the CSS class of the section it activates.

use std::fmt;
use std::str::FromStr;

use crate::error::ViewError;

/// Onboarding steps inside `article.new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginMode {
    Start,
    Create,
    Phrase,
    Check,
    Loading,
}

impl LoginMode {
    pub const ALL: [LoginMode; 5] = [
        LoginMode::Start,
        LoginMode::Create,
        LoginMode::Phrase,
        LoginMode::Check,
        LoginMode::Loading,
    ];

    pub fn class(self) -> &'static str {
        match self {
            LoginMode::Start => "start",
            LoginMode::Create => "create",
            LoginMode::Phrase => "phrase",
            LoginMode::Check => "check",
            LoginMode::Loading => "loading",
        }
    }
}

impl FromStr for LoginMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoginMode::ALL
            .into_iter()
            .find(|m| m.class() == s.trim())
            .ok_or_else(|| ViewError::unknown_mode("login", s))
    }
}

/// Top-level panels inside `article.main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Dash,
    Account,
    Block,
    Config,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 4] = [
        LayoutMode::Dash,
        LayoutMode::Account,
        LayoutMode::Block,
        LayoutMode::Config,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutMode::Dash => "dash",
            LayoutMode::Account => "account",
            LayoutMode::Block => "block",
            LayoutMode::Config => "config",
        }
    }

    /// Class of the `section` element holding this panel.
    pub fn class(self) -> &'static str {
        match self {
            LayoutMode::Dash => "da",
            LayoutMode::Account => "ac",
            LayoutMode::Block => "bl",
            LayoutMode::Config => "co",
        }
    }
}

impl FromStr for LayoutMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutMode::ALL
            .into_iter()
            .find(|m| m.name() == s.trim())
            .ok_or_else(|| ViewError::unknown_mode("layout", s))
    }
}

/// Collapsible entries of the account panel's toggle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleMenu {
    Init,
    Receive,
    Send,
    Transaction,
    Backup,
}

impl ToggleMenu {
    pub const ENTRIES: [ToggleMenu; 4] = [
        ToggleMenu::Receive,
        ToggleMenu::Send,
        ToggleMenu::Transaction,
        ToggleMenu::Backup,
    ];

    /// Position of the entry in the list; `Init` has none.
    pub fn index(self) -> Option<usize> {
        ToggleMenu::ENTRIES.iter().position(|m| *m == self)
    }

    pub fn from_index(index: usize) -> Result<Self, ViewError> {
        ToggleMenu::ENTRIES
            .get(index)
            .copied()
            .ok_or_else(|| ViewError::unknown_mode("toggle", index.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            ToggleMenu::Init => "init",
            ToggleMenu::Receive => "receive",
            ToggleMenu::Send => "send",
            ToggleMenu::Transaction => "transaction",
            ToggleMenu::Backup => "backup",
        }
    }
}

impl FromStr for ToggleMenu {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == ToggleMenu::Init.name() {
            return Ok(ToggleMenu::Init);
        }
        ToggleMenu::ENTRIES
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ViewError::unknown_mode("toggle", s))
    }
}

/// Panels of the popup layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PopupPanel {
    Freezing,
    UnFreezing,
    SendBos,
    SendBosCancel,
    SendBosOk,
    /// Any other `section.<name>` inside the popup layer.
    Other(String),
}

impl PopupPanel {
    pub const KNOWN: [PopupPanel; 5] = [
        PopupPanel::Freezing,
        PopupPanel::UnFreezing,
        PopupPanel::SendBos,
        PopupPanel::SendBosCancel,
        PopupPanel::SendBosOk,
    ];

    pub fn class(&self) -> &str {
        match self {
            PopupPanel::Freezing => "freezing",
            PopupPanel::UnFreezing => "un-freezing",
            PopupPanel::SendBos => "send-bos",
            PopupPanel::SendBosCancel => "send-bos-cancel",
            PopupPanel::SendBosOk => "send-bos-ok",
            PopupPanel::Other(name) => name,
        }
    }

    pub fn selector(&self) -> String {
        format!("section.{}", self.class())
    }
}

impl FromStr for PopupPanel {
    type Err = ViewError;

    /// Accepts either `section.<name>` or a bare `<name>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let name = s.strip_prefix("section.").unwrap_or(s);
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ViewError::unknown_mode("popup", s));
        }
        Ok(PopupPanel::KNOWN
            .into_iter()
            .find(|p| p.class() == name)
            .unwrap_or_else(|| PopupPanel::Other(name.to_owned())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupMode {
    Close,
    Show(PopupPanel),
}

impl FromStr for PopupMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "close" {
            return Ok(PopupMode::Close);
        }
        s.parse().map(PopupMode::Show)
    }
}

impl fmt::Display for PopupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopupMode::Close => f.write_str("close"),
            PopupMode::Show(panel) => f.write_str(&panel.selector()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_modes_parse_from_data_val() {
        for mode in LoginMode::ALL {
            assert_eq!(mode.class().parse::<LoginMode>().unwrap(), mode);
        }
        assert!("signup".parse::<LoginMode>().is_err());
    }

    #[test]
    fn toggle_indices_follow_list_order() {
        assert_eq!(ToggleMenu::Init.index(), None);
        assert_eq!(ToggleMenu::Receive.index(), Some(0));
        assert_eq!(ToggleMenu::Backup.index(), Some(3));
        assert_eq!(ToggleMenu::from_index(2).unwrap(), ToggleMenu::Transaction);
        assert!(ToggleMenu::from_index(4).is_err());
    }

    #[test]
    fn popup_modes_parse_selectors() {
        assert_eq!("close".parse::<PopupMode>().unwrap(), PopupMode::Close);
        assert_eq!(
            "section.send-bos".parse::<PopupMode>().unwrap(),
            PopupMode::Show(PopupPanel::SendBos)
        );
        assert_eq!(
            "section.X".parse::<PopupMode>().unwrap(),
            PopupMode::Show(PopupPanel::Other("X".to_owned()))
        );
        assert!("section.a b".parse::<PopupMode>().is_err());
        assert!("section.".parse::<PopupMode>().is_err());
    }
}
