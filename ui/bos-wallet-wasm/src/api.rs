//! HTTP client for the BOS node.
//!
//! Implements `WalletApi` over `fetch` (via `gloo-net`) against the base URL
//! resolved in `config`.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use bos_api_types::{
    AccountAddress, AccountCreated, AccountDetail, SeedResponse, SendBosBody, SendBosReceipt,
    SendBosRequest, TransactionRecord,
};
use bos_wallet_client::WalletApi;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

pub struct HttpWalletApi {
    base_url: String,
}

impl HttpWalletApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let resp = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| anyhow!("fetch error: {e}"))?;
        read_json(path, resp).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Option<&SendBosBody>) -> Result<T> {
        debug!(path, "POST");
        let builder = Request::post(&self.url(path));
        let sent = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| anyhow!("encode {path}: {e}"))?
                .send()
                .await,
            None => builder.send().await,
        };
        let resp = sent.map_err(|e| anyhow!("fetch error: {e}"))?;
        read_json(path, resp).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T> {
    let text = resp
        .text()
        .await
        .map_err(|e| anyhow!("text error: {e}"))?;
    if !resp.ok() {
        bail!("{} {}: {}", resp.status(), resp.status_text(), text);
    }
    serde_json::from_str(&text).map_err(|e| anyhow!("JSON parse error on {path}: {e} (raw: {text})"))
}

fn encode(address: &AccountAddress) -> String {
    String::from(js_sys::encode_uri_component(address.as_str()))
}

#[async_trait(?Send)]
impl WalletApi for HttpWalletApi {
    async fn create_seed(&self) -> Result<SeedResponse> {
        self.post("/seed", None).await
    }

    async fn create_account(&self) -> Result<AccountCreated> {
        self.post("/account", None).await
    }

    async fn get_account(&self, address: &AccountAddress) -> Result<AccountDetail> {
        self.get(&format!("/account/{}", encode(address))).await
    }

    async fn get_account_transactions(
        &self,
        address: &AccountAddress,
    ) -> Result<Vec<TransactionRecord>> {
        self.get(&format!("/account/{}/transactions", encode(address)))
            .await
    }

    async fn send_bos(&self, req: &SendBosRequest) -> Result<SendBosReceipt> {
        let body = SendBosBody {
            param: req.to_param_string(),
        };
        self.post("/send", Some(&body)).await
    }
}
