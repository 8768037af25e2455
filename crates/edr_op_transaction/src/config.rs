use crate::transaction::OpTransactionType;

/// The transaction type assumed when a JSON object has no `type` field.
pub const DEFAULT_UNTYPED_TRANSACTION_TYPE: OpTransactionType = OpTransactionType::Legacy;

/// Whether the informational `hash` field of a JSON object is checked against
/// the hash computed from its fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HashCheck {
    /// The `hash` field is ignored.
    #[default]
    Ignore,
    /// A `hash` field that differs from the computed hash is rejected.
    Verify,
}

/// Configuration for decoding JSON transactions.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodecConfig {
    /// The transaction type used when the `type` field is absent or `null`.
    pub untyped_transaction_type: OpTransactionType,
    /// How to treat the informational `hash` field.
    pub hash_check: HashCheck,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            untyped_transaction_type: DEFAULT_UNTYPED_TRANSACTION_TYPE,
            hash_check: HashCheck::default(),
        }
    }
}
