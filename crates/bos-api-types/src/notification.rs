//! Inbound "receive BOS" push notifications.
//!
//! The node pushes a text blob shaped like `{key1:val1,key2:val2}`. Newer
//! nodes send proper JSON; older ones send the bare form with unquoted
//! tokens. Both are accepted here and turned into a typed notification.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AccountAddress;

const RECEIVER_KEY: &str = "receiverAccountAddress";
const AMOUNT_KEY: &str = "amount";

/// Raw event as delivered by the notification transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Whether the event came from the browser itself rather than script.
    pub trusted: bool,
    pub data: String,
}

impl InboundEvent {
    pub fn trusted(data: impl Into<String>) -> Self {
        Self {
            trusted: true,
            data: data.into(),
        }
    }
}

/// Decoded key/value pairs, in key order.
pub type NotificationPayload = BTreeMap<String, String>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("notification payload is empty")]
    Empty,
    #[error("entry `{0}` has no `:` separator")]
    MissingSeparator(String),
    #[error("entry `{0}` has an empty key")]
    EmptyKey(String),
    #[error("notification is missing `{0}`")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReceiveNotification {
    pub receiver: AccountAddress,
    pub amount: String,
    /// Every decoded pair, including the two typed fields above.
    pub fields: NotificationPayload,
}

impl ReceiveNotification {
    pub fn decode(data: &str) -> Result<Self, ParseError> {
        let fields = decode_payload(data)?;
        Self::from_payload(fields)
    }

    pub fn from_payload(fields: NotificationPayload) -> Result<Self, ParseError> {
        let receiver = fields
            .get(RECEIVER_KEY)
            .cloned()
            .ok_or(ParseError::MissingField(RECEIVER_KEY))?;
        let amount = fields
            .get(AMOUNT_KEY)
            .cloned()
            .ok_or(ParseError::MissingField(AMOUNT_KEY))?;
        Ok(Self {
            receiver: AccountAddress(receiver),
            amount,
            fields,
        })
    }
}

/// Decode a payload blob into key/value pairs.
///
/// JSON objects are tried first. Anything else goes through the legacy rule:
/// drop every `{`, `"` and `}`, split on `,`, then split each entry on its
/// first `:`.
pub fn decode_payload(data: &str) -> Result<NotificationPayload, ParseError> {
    let trimmed = data.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(trimmed)
    {
        let mut out = NotificationPayload::new();
        for (key, value) in map {
            let text = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            out.insert(key, text);
        }
        return Ok(out);
    }

    decode_legacy(trimmed)
}

fn decode_legacy(data: &str) -> Result<NotificationPayload, ParseError> {
    let stripped: String = data
        .chars()
        .filter(|c| !matches!(c, '{' | '"' | '}'))
        .collect();
    if stripped.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut out = NotificationPayload::new();
    for entry in stripped.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| ParseError::MissingSeparator(entry.to_owned()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::EmptyKey(entry.to_owned()));
        }
        out.insert(key.to_owned(), value.trim().to_owned());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_decodes() {
        let n = ReceiveNotification::decode(r#"{"receiverAccountAddress":"abc","amount":"5"}"#)
            .unwrap();
        assert_eq!(n.receiver.as_str(), "abc");
        assert_eq!(n.amount, "5");
        assert_eq!(n.fields.len(), 2);
    }

    #[test]
    fn json_numbers_are_stringified() {
        let fields = decode_payload(r#"{"amount":12.5,"confirmed":true}"#).unwrap();
        assert_eq!(fields["amount"], "12.5");
        assert_eq!(fields["confirmed"], "true");
    }

    #[test]
    fn legacy_bare_payload_decodes() {
        let fields =
            decode_payload("{receiverAccountAddress:GXYZ, amount:7, senderAccountAddress:GABC}")
                .unwrap();
        assert_eq!(fields["receiverAccountAddress"], "GXYZ");
        assert_eq!(fields["amount"], "7");
        assert_eq!(fields["senderAccountAddress"], "GABC");
    }

    #[test]
    fn legacy_value_keeps_text_after_first_colon() {
        let fields = decode_payload("{time:12:30:01,amount:1}").unwrap();
        assert_eq!(fields["time"], "12:30:01");
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        assert_eq!(decode_payload("   "), Err(ParseError::Empty));
        assert_eq!(decode_payload("{}"), Ok(NotificationPayload::new()));
        assert_eq!(decode_payload("{\"\"}"), Err(ParseError::Empty));
        assert_eq!(
            decode_payload("{amount}"),
            Err(ParseError::MissingSeparator("amount".to_owned()))
        );
        assert_eq!(
            decode_payload("{:5}"),
            Err(ParseError::EmptyKey(":5".to_owned()))
        );
    }

    #[test]
    fn missing_typed_fields_are_reported() {
        assert_eq!(
            ReceiveNotification::decode(r#"{"amount":"5"}"#),
            Err(ParseError::MissingField("receiverAccountAddress"))
        );
        assert_eq!(
            ReceiveNotification::decode("{receiverAccountAddress:abc}"),
            Err(ParseError::MissingField("amount"))
        );
    }
}
