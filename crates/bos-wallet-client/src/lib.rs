use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bos_api_types::{
    AccountAddress, AccountCreated, AccountDetail, SeedResponse, SendBosReceipt, SendBosRequest,
    TransactionRecord,
};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::debug;

/// Data operations the wallet UI delegates to the node.
///
/// The browser is single-threaded and fetch futures are not `Send`, so the
/// trait is declared `?Send`.
#[async_trait(?Send)]
pub trait WalletApi {
    async fn create_seed(&self) -> Result<SeedResponse>;
    async fn create_account(&self) -> Result<AccountCreated>;
    async fn get_account(&self, address: &AccountAddress) -> Result<AccountDetail>;
    async fn get_account_transactions(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransactionRecord>>;
    async fn send_bos(&self, req: &SendBosRequest) -> Result<SendBosReceipt>;
}

/// One call made against [`InMemoryWalletApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    CreateSeed,
    CreateAccount,
    GetAccount(AccountAddress),
    GetAccountTransactions(AccountAddress),
    SendBos(String),
}

const WORDS: [&str; 24] = [
    "anchor", "bridge", "candle", "desert", "ember", "falcon", "garden", "harbor", "island",
    "jungle", "kettle", "lantern", "meadow", "needle", "orchid", "pepper", "quartz", "river",
    "saddle", "timber", "umbrella", "velvet", "willow", "zephyr",
];

const PHRASE_LEN: usize = 12;

#[derive(Default)]
struct Ledger {
    seeds_issued: usize,
    accounts: Vec<AccountDetail>,
    transactions: HashMap<AccountAddress, Vec<TransactionRecord>>,
    calls: Vec<ApiCall>,
}

/// Deterministic node stand-in for offline mode and tests.
#[derive(Default)]
pub struct InMemoryWalletApi {
    ledger: RefCell<Ledger>,
}

impl InMemoryWalletApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.ledger.borrow().calls.clone()
    }

    pub fn insert_account(&self, detail: AccountDetail) {
        let mut ledger = self.ledger.borrow_mut();
        ledger
            .accounts
            .retain(|a| a.account_address != detail.account_address);
        ledger.accounts.push(detail);
    }

    pub fn insert_transactions(&self, address: &AccountAddress, records: Vec<TransactionRecord>) {
        self.ledger
            .borrow_mut()
            .transactions
            .insert(address.clone(), records);
    }

    fn record(&self, call: ApiCall) {
        debug!(?call, "in-memory wallet api");
        self.ledger.borrow_mut().calls.push(call);
    }
}

#[async_trait(?Send)]
impl WalletApi for InMemoryWalletApi {
    async fn create_seed(&self) -> Result<SeedResponse> {
        self.record(ApiCall::CreateSeed);
        let mut ledger = self.ledger.borrow_mut();
        let offset = ledger.seeds_issued;
        ledger.seeds_issued += 1;
        let passphrase = (0..PHRASE_LEN)
            .map(|i| WORDS[(offset * 7 + i * 5) % WORDS.len()])
            .collect::<Vec<_>>()
            .join(" ");
        Ok(SeedResponse { passphrase })
    }

    async fn create_account(&self) -> Result<AccountCreated> {
        self.record(ApiCall::CreateAccount);
        let mut ledger = self.ledger.borrow_mut();
        let address = AccountAddress(format!("BOS{:012}", ledger.accounts.len() + 1));
        ledger.accounts.push(AccountDetail {
            account_address: address.clone(),
            account_balance: "0".to_owned(),
            available_balance: "0".to_owned(),
            pending_balance: "0".to_owned(),
            freezing_status: false,
        });
        Ok(AccountCreated {
            account_address: address,
        })
    }

    async fn get_account(&self, address: &AccountAddress) -> Result<AccountDetail> {
        self.record(ApiCall::GetAccount(address.clone()));
        self.ledger
            .borrow()
            .accounts
            .iter()
            .find(|a| &a.account_address == address)
            .cloned()
            .ok_or_else(|| anyhow!("unknown account: {address}"))
    }

    async fn get_account_transactions(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransactionRecord>> {
        self.record(ApiCall::GetAccountTransactions(address.clone()));
        Ok(self
            .ledger
            .borrow()
            .transactions
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_bos(&self, req: &SendBosRequest) -> Result<SendBosReceipt> {
        let param = req.to_param_string();
        self.record(ApiCall::SendBos(param.clone()));
        Ok(serde_json::json!({ "accepted": true, "param": param }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_accounts_are_retrievable() -> Result<()> {
        let api = InMemoryWalletApi::new();
        let created = api.create_account().await?;
        let detail = api.get_account(&created.account_address).await?;
        assert_eq!(detail.account_address, created.account_address);
        assert_eq!(detail.account_balance, "0");
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::CreateAccount,
                ApiCall::GetAccount(created.account_address.clone())
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn unknown_account_is_an_error() {
        let api = InMemoryWalletApi::new();
        let err = api
            .get_account(&AccountAddress("nope".to_owned()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown account"));
    }

    #[tokio::test]
    async fn seeds_have_twelve_words_and_differ() -> Result<()> {
        let api = InMemoryWalletApi::new();
        let first = api.create_seed().await?.words();
        let second = api.create_seed().await?.words();
        assert_eq!(first.len(), PHRASE_LEN);
        assert_ne!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn send_records_param_string() -> Result<()> {
        let api = InMemoryWalletApi::new();
        let receipt = api
            .send_bos(&SendBosRequest {
                sender: AccountAddress("A".to_owned()),
                receiver: AccountAddress("B".to_owned()),
                amount: "3".to_owned(),
                memo: String::new(),
            })
            .await?;
        assert_eq!(receipt["param"], "A/B/3/");
        assert_eq!(api.calls(), vec![ApiCall::SendBos("A/B/3/".to_owned())]);
        Ok(())
    }
}
