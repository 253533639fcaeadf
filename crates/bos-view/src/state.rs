//! In-memory UI state owned by the controller.

use bos_api_types::{AccountAddress, NotificationPayload};

/// Monotonic request counters.
///
/// Each async flow takes a ticket before it suspends and checks it when it
/// resumes; a newer ticket means the result is stale and must not render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Epochs {
    pub login: u64,
    pub account: u64,
    pub transactions: u64,
}

#[derive(Debug, Default, Clone)]
pub struct UiState {
    pub current_account: Option<AccountAddress>,
    pub passphrase: Vec<String>,
    pub last_notification: Option<NotificationPayload>,
    pub unread_receipts: u32,
    pub last_error: Option<String>,
    /// Set while the first dashboard visit is creating its account.
    pub bootstrapping_dash: bool,
    pub epochs: Epochs,
}

impl UiState {
    /// Store the current account; an empty address clears it.
    pub fn set_current_account(&mut self, address: AccountAddress) {
        self.current_account = (!address.is_empty()).then_some(address);
    }

    pub fn next_login_epoch(&mut self) -> u64 {
        self.epochs.login += 1;
        self.epochs.login
    }

    pub fn next_account_epoch(&mut self) -> u64 {
        self.epochs.account += 1;
        self.epochs.account
    }

    pub fn next_transactions_epoch(&mut self) -> u64 {
        self.epochs.transactions += 1;
        self.epochs.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_address_clears_current_account() {
        let mut state = UiState::default();
        state.set_current_account(AccountAddress("GA".to_owned()));
        assert!(state.current_account.is_some());
        state.set_current_account(AccountAddress(String::new()));
        assert!(state.current_account.is_none());
    }

    #[test]
    fn epochs_are_independent() {
        let mut state = UiState::default();
        assert_eq!(state.next_login_epoch(), 1);
        assert_eq!(state.next_login_epoch(), 2);
        assert_eq!(state.next_account_epoch(), 1);
        assert_eq!(state.epochs.transactions, 0);
    }
}
