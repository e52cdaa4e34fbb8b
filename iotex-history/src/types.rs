//! Raw action records as returned by the remote indexing sources.
//!
//! The pipeline reads only the fields it needs (the action hash, the action
//! type, and the nested transfer payload); everything else is carried
//! through untouched via flattened maps so downstream conversion sees the
//! source's exact shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum number of items either remote source returns per page.
pub const API_PAGE_LIMIT: usize = 100;

/// `act_type` value (compared case-insensitively) marking a deposit-stake
/// action on the secondary source.
pub const ACT_TYPE_DEPOSIT_STAKE: &str = "depositstake";

/// One on-chain action as returned by the primary source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    /// Hash identifying the action within the source's action space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_hash: Option<String>,

    /// The action body, nested the way the source nests it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionEnvelope>,

    /// All remaining fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope mirroring the source's `action.core.transfer` nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    /// The action core holding the typed payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core: Option<ActionCore>,

    /// All remaining fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The core of an action; presence of `transfer` marks a transfer action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCore {
    /// Transfer payload. Non-transfer actions (contract calls, etc.) leave
    /// this empty and are excluded from the history.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<Value>,

    /// All remaining fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawAction {
    /// Whether this action carries a transfer payload.
    #[must_use]
    pub fn is_transfer(&self) -> bool {
        self.action
            .as_ref()
            .and_then(|a| a.core.as_ref())
            .is_some_and(|c| c.transfer.is_some())
    }
}

/// One stake action as returned by the secondary source.
///
/// Both fields are optional because the source's records are only trusted
/// as far as the pipeline inspects them; a record missing either field is
/// surfaced as [`crate::HistoryError::MalformedRecord`] by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeAction {
    /// Hash identifying the action; shared with the primary source's
    /// action space, so full records can be resolved by hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_hash: Option<String>,

    /// Action type, e.g. `"depositstake"` (casing varies by source).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act_type: Option<String>,

    /// All remaining fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transfer_detection() {
        let transfer: RawAction = serde_json::from_value(json!({
            "action_hash": "0xabc",
            "action": { "core": { "transfer": { "amount": "100", "recipient": "io1xyz" } } }
        }))
        .unwrap();
        assert!(transfer.is_transfer(), "nested transfer payload present");

        let call: RawAction = serde_json::from_value(json!({
            "action_hash": "0xdef",
            "action": { "core": { "execution": { "contract": "io1contract" } } }
        }))
        .unwrap();
        assert!(!call.is_transfer(), "contract call has no transfer payload");

        let bare: RawAction = serde_json::from_value(json!({ "action_hash": "0x123" })).unwrap();
        assert!(!bare.is_transfer(), "missing envelope is not a transfer");
    }

    #[test]
    fn unknown_fields_pass_through() {
        let original = json!({
            "action_hash": "0xabc",
            "timestamp": "2021-06-01T00:00:00Z",
            "gas_price": "1000000000000",
            "action": {
                "sender_pub_key": "044e18306ae9",
                "core": {
                    "nonce": "7",
                    "transfer": { "amount": "42", "recipient": "io1xyz" }
                }
            }
        });

        let action: RawAction = serde_json::from_value(original.clone()).unwrap();
        let round_tripped = serde_json::to_value(&action).unwrap();
        assert_eq!(round_tripped, original, "opaque fields must survive intact");
    }

    #[test]
    fn stake_action_tolerates_missing_fields() {
        let record: StakeAction =
            serde_json::from_value(json!({ "amount": "1000" })).unwrap();
        assert!(record.action_hash.is_none(), "hash absent in source record");
        assert!(record.act_type.is_none(), "type absent in source record");
        assert_eq!(record.extra.get("amount"), Some(&json!("1000")), "extras kept");
    }
}
