use serde::{Deserialize, Deserializer, Serialize};

pub mod notification;

pub use notification::{InboundEvent, NotificationPayload, ParseError, ReceiveNotification};

/// Label rendered next to every BOS amount.
pub const BOS_UNIT: &str = "BOS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress(pub String);

impl AccountAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedResponse {
    pub passphrase: String,
}

impl SeedResponse {
    /// Passphrase split into its ordered words.
    pub fn words(&self) -> Vec<String> {
        self.passphrase
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreated {
    pub account_address: AccountAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    pub account_address: AccountAddress,
    #[serde(deserialize_with = "scalar_string")]
    pub account_balance: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub available_balance: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub pending_balance: String,
    #[serde(default, deserialize_with = "truthy")]
    pub freezing_status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(deserialize_with = "scalar_string")]
    pub timestamp: String,
    #[serde(deserialize_with = "scalar_string")]
    pub amount: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub fee: String,
    pub account_address: AccountAddress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendBosRequest {
    pub sender: AccountAddress,
    pub receiver: AccountAddress,
    pub amount: String,
    pub memo: String,
}

impl SendBosRequest {
    /// Slash-delimited `sender/receiver/amount/memo` form expected by the node.
    pub fn to_param_string(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.sender, self.receiver, self.amount, self.memo
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendBosBody {
    pub param: String,
}

/// Opaque receipt returned by the node after a send.
pub type SendBosReceipt = serde_json::Value;

/// Accepts a JSON string, number or bool and keeps its textual form.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!("expected scalar, got {other}"))),
    }
}

/// Freezing flag as sent by the node: bool, 0/1, or "true"/"false".
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        serde_json::Value::String(s) => {
            !matches!(s.trim().to_ascii_lowercase().as_str(), "" | "0" | "false" | "no")
        }
        serde_json::Value::Null => false,
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_words_keep_order() {
        let seed = SeedResponse {
            passphrase: "apple  banana cherry\n".to_owned(),
        };
        assert_eq!(seed.words(), vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn account_detail_accepts_numeric_balances_and_string_flag() {
        let raw = r#"{
            "accountAddress": "GABC",
            "accountBalance": 120,
            "availableBalance": "100",
            "pendingBalance": 20.5,
            "freezingStatus": "false"
        }"#;
        let detail: AccountDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.account_address, AccountAddress("GABC".to_owned()));
        assert_eq!(detail.account_balance, "120");
        assert_eq!(detail.pending_balance, "20.5");
        assert!(!detail.freezing_status);
    }

    #[test]
    fn account_detail_flag_defaults_to_false() {
        let detail: AccountDetail =
            serde_json::from_str(r#"{"accountAddress":"G1","accountBalance":"0"}"#).unwrap();
        assert!(!detail.freezing_status);
        assert_eq!(detail.available_balance, "");
    }

    #[test]
    fn send_request_param_string() {
        let req = SendBosRequest {
            sender: AccountAddress("GA".to_owned()),
            receiver: AccountAddress("GB".to_owned()),
            amount: "12".to_owned(),
            memo: "rent".to_owned(),
        };
        assert_eq!(req.to_param_string(), "GA/GB/12/rent");
    }
}
