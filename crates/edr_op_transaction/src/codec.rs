use crate::{
    config::CodecConfig,
    rpc::{ConversionError, RpcTransaction},
    transaction::{OpTransaction, TransactionData as _},
};

/// Error that occurs when decoding a JSON transaction.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not a JSON object of the expected shape, or a field has
    /// an invalid value.
    #[error(transparent)]
    Malformed(#[from] serde_json::Error),
    /// The object does not describe a valid transaction.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Decodes a transaction from a JSON object, using the default
/// [`CodecConfig`].
pub fn decode(json: &[u8]) -> Result<OpTransaction, DecodeError> {
    decode_with_config(json, &CodecConfig::default())
}

/// Decodes a transaction from a JSON object.
///
/// The variant is selected by the `type` field. Deposits with a non-null
/// `nonce` field decode to [`OpTransaction::DepositWithNonce`]. The hash is
/// computed from the decoded fields.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn decode_with_config(
    json: &[u8],
    config: &CodecConfig,
) -> Result<OpTransaction, DecodeError> {
    let rpc: RpcTransaction = serde_json::from_slice(json)?;
    let transaction = rpc.into_transaction(config)?;

    Ok(transaction)
}

/// Encodes a transaction as a JSON object.
///
/// Only the fields of the transaction's kind are written, plus `type` and the
/// computed `hash`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn encode(transaction: &OpTransaction) -> Result<Vec<u8>, serde_json::Error> {
    log::trace!(
        "Encoding {} transaction {}",
        transaction.transaction_type(),
        transaction.transaction_hash()
    );

    serde_json::to_vec(&RpcTransaction::from(transaction))
}

impl serde::Serialize for OpTransaction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RpcTransaction::from(self).serialize(serializer)
    }
}

impl<'deserializer> serde::Deserialize<'deserializer> for OpTransaction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'deserializer>,
    {
        use serde::de::Error as _;

        let rpc = RpcTransaction::deserialize(deserializer)?;
        OpTransaction::try_from(rpc).map_err(D::Error::custom)
    }
}
