//! The DOM as the controller sees it.
//!
//! `Target` and `Slot` name every element the wallet screens touch and own
//! the CSS selectors that locate them, so the browser implementation and the
//! test double agree on the markup contract.

use crate::error::ViewResult;
use crate::mode::{LayoutMode, LoginMode, PopupPanel, ToggleMenu};

/// Class that marks the active section, entry or open layer.
pub const ON: &str = "on";
/// Class on the freezing control while funds are frozen.
pub const FREEZING: &str = "freezing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Onboarding,
    Main,
    Popup,
}

impl Region {
    pub fn selector(self) -> &'static str {
        match self {
            Region::Onboarding => "article.new",
            Region::Main => "article.main",
            Region::Popup => "article.popup",
        }
    }
}

/// Content slots whose text or children are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    PhraseList,
    CheckInputs,
    AccountCards,
    DashAddress,
    DashCoin,
    AccountAddress,
    AccountBalance,
    AvailableBalance,
    PendingBalance,
    FreezingControl,
    TransactionRows,
    ReceiveRows,
    DashReceiveBadge,
    AccountReceiveBadge,
    AccountReceiveHeader,
    SendReceiver,
    SendAmount,
    SendMemo,
    ErrorBanner,
}

impl Slot {
    pub fn selector(self) -> &'static str {
        match self {
            Slot::PhraseList => "article.new > section.phrase ul.list",
            Slot::CheckInputs => "article.new > section.check ul.write",
            Slot::AccountCards => "section.da nav",
            Slot::DashAddress => "section.da nav > section:last-child .address",
            Slot::DashCoin => "section.da nav > section:last-child .coin",
            Slot::AccountAddress => "section.ac .address em",
            Slot::AccountBalance => "section.ac .account span",
            Slot::AvailableBalance => "section.ac .available span",
            Slot::PendingBalance => "section.ac .pending span",
            Slot::FreezingControl => "nav.freezing-cont",
            Slot::TransactionRows => ".my-transaction table tbody",
            Slot::ReceiveRows => "section.ac dl.receive table tbody",
            Slot::DashReceiveBadge => "section.da .ctl .receive i.badge",
            Slot::AccountReceiveBadge => "section.ac .toggle dl.receive dt span i.badge",
            Slot::AccountReceiveHeader => "section.ac .toggle dl.receive dt span",
            Slot::SendReceiver => "ul.form input.receiver",
            Slot::SendAmount => "ul.form input.amount",
            Slot::SendMemo => "ul.form input.memo",
            Slot::ErrorBanner => "#statusBanner",
        }
    }

    /// Optional slots may be absent from the page without it being an error.
    pub fn required(self) -> bool {
        !matches!(
            self,
            Slot::DashReceiveBadge
                | Slot::AccountReceiveBadge
                | Slot::AccountReceiveHeader
                | Slot::ErrorBanner
        )
    }

    /// Selector for the counted children of a list slot.
    pub fn items_selector(self) -> String {
        let item = match self {
            Slot::AccountCards => "section",
            Slot::TransactionRows | Slot::ReceiveRows => "tr",
            Slot::PhraseList | Slot::CheckInputs => "li",
            _ => "*",
        };
        format!("{} > {item}", self.selector())
    }
}

/// Anything that can be shown, hidden or have a class toggled.
///
/// The plural variants address every member of a group and never fail on
/// an empty match; the singular ones must match at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Region(Region),
    LoginSection(LoginMode),
    LoginSections,
    LayoutSection(LayoutMode),
    LayoutSections,
    ToggleEntry(usize),
    ToggleEntries,
    ConfigEntry(usize),
    PopupPanel(PopupPanel),
    PopupPanels,
    Slot(Slot),
}

impl Target {
    pub fn selector(&self) -> String {
        match self {
            Target::Region(region) => region.selector().to_owned(),
            Target::LoginSection(mode) => format!("article.new > section.{}", mode.class()),
            Target::LoginSections => "article.new > section".to_owned(),
            Target::LayoutSection(mode) => format!("article.main > section.{}", mode.class()),
            Target::LayoutSections => "article.main > section".to_owned(),
            Target::ToggleEntry(index) => {
                format!("section.ac .toggle dl:nth-of-type({})", index + 1)
            }
            Target::ToggleEntries => "section.ac .toggle dl".to_owned(),
            Target::ConfigEntry(index) => {
                format!("section.co .toggle dl:nth-of-type({})", index + 1)
            }
            Target::PopupPanel(panel) => format!("article.popup {}", panel.selector()),
            Target::PopupPanels => "article.popup section.layer".to_owned(),
            Target::Slot(slot) => slot.selector().to_owned(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(
            self,
            Target::LoginSections
                | Target::LayoutSections
                | Target::ToggleEntries
                | Target::PopupPanels
        )
    }

    /// Whether an empty match is acceptable.
    pub fn optional(&self) -> bool {
        match self {
            Target::Slot(slot) => !slot.required(),
            other => other.is_group(),
        }
    }

    /// Singular members of a group target, as far as they are statically known.
    pub fn members(&self) -> Vec<Target> {
        match self {
            Target::LoginSections => LoginMode::ALL.into_iter().map(Target::LoginSection).collect(),
            Target::LayoutSections => LayoutMode::ALL
                .into_iter()
                .map(Target::LayoutSection)
                .collect(),
            Target::ToggleEntries => (0..ToggleMenu::ENTRIES.len())
                .map(Target::ToggleEntry)
                .collect(),
            Target::PopupPanels => PopupPanel::KNOWN
                .into_iter()
                .map(Target::PopupPanel)
                .collect(),
            other => vec![other.clone()],
        }
    }
}

impl From<Slot> for Target {
    fn from(slot: Slot) -> Self {
        Target::Slot(slot)
    }
}

impl From<Region> for Target {
    fn from(region: Region) -> Self {
        Target::Region(region)
    }
}

/// DOM operations the controller needs.
///
/// Implementations report a missing non-optional target as
/// [`ViewError::MissingTarget`](crate::ViewError::MissingTarget).
pub trait Surface {
    fn set_visible(&self, target: &Target, visible: bool) -> ViewResult;

    fn set_class(&self, target: &Target, class: &str, on: bool) -> ViewResult;

    fn has_class(&self, target: &Target, class: &str) -> bool;

    /// Whether at least one element matches the target.
    fn contains(&self, target: &Target) -> bool;

    fn set_text(&self, slot: Slot, text: &str) -> ViewResult;

    /// Replace all children of the slot with the given markup.
    fn replace_html(&self, slot: Slot, html: &str) -> ViewResult;

    fn append_html(&self, slot: Slot, html: &str) -> ViewResult;

    fn child_count(&self, slot: Slot) -> usize;

    fn input_value(&self, slot: Slot) -> ViewResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_members_cover_every_mode() {
        assert_eq!(Target::LoginSections.members().len(), LoginMode::ALL.len());
        assert_eq!(Target::ToggleEntries.members().len(), 4);
        assert_eq!(
            Target::ToggleEntry(2).selector(),
            "section.ac .toggle dl:nth-of-type(3)"
        );
    }

    #[test]
    fn optional_targets() {
        assert!(Target::PopupPanels.optional());
        assert!(Target::Slot(Slot::ErrorBanner).optional());
        assert!(!Target::Slot(Slot::AccountCards).optional());
        assert!(!Target::LoginSection(LoginMode::Start).optional());
        assert!(Target::Slot(Slot::AccountReceiveHeader).optional());
    }

    #[test]
    fn account_cards_count_only_sections() {
        assert_eq!(Slot::AccountCards.items_selector(), "section.da nav > section");
        assert_eq!(
            Slot::ReceiveRows.items_selector(),
            "section.ac dl.receive table tbody > tr"
        );
    }
}
