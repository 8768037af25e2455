use alloy_primitives::{Address, Bytes, TxKind, B256, U128, U256, U64, U8};

use super::JsonField;
use crate::{
    config::{CodecConfig, HashCheck},
    eip2930::AccessListItem,
    signature::Signature,
    transaction::{
        signed::{
            Deposit, DepositArgs, DepositExecution, DepositWithNonce, Eip1559, Eip1559Args,
            Eip2930, Eip2930Args, Legacy, LegacyArgs,
        },
        OpTransaction, OpTransactionType, TransactionData as _,
    },
};

/// JSON-RPC representation of an OP transaction.
///
/// Contains the union of the fields of all transaction kinds. Every field is
/// a [`JsonField`], so a field that is absent can be told apart from one that
/// is `null`. Fields are serialized in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    /// integer of the transaction type, 0x0 for legacy transactions, 0x1 for
    /// access list types, 0x2 for dynamic fees, 0x7e for deposits
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "JsonField::is_absent"
    )]
    pub transaction_type: JsonField<U8>,
    /// chain ID
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub chain_id: JsonField<U64>,
    /// the number of transactions made by the sender prior to this one. For
    /// deposits, the nonce assigned during execution.
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub nonce: JsonField<U64>,
    /// address of the receiver. null when its a contract creation transaction.
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub to: JsonField<Address>,
    /// gas provided by the sender
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub gas: JsonField<U64>,
    /// gas price provided by the sender in Wei
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub gas_price: JsonField<U128>,
    /// max priority fee per gas
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub max_priority_fee_per_gas: JsonField<U128>,
    /// max fee per gas
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub max_fee_per_gas: JsonField<U128>,
    /// value transferred in Wei
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub value: JsonField<U256>,
    /// the data sent along with the transaction
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub input: JsonField<Bytes>,
    /// access list
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub access_list: JsonField<Vec<AccessListItem>>,
    /// ECDSA recovery id
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub v: JsonField<U64>,
    /// ECDSA signature r
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub r: JsonField<U256>,
    /// ECDSA signature s
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub s: JsonField<U256>,
    /// Y-parity for EIP-2930 and EIP-1559 transactions. Only informational;
    /// `v` is used when decoding.
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub y_parity: JsonField<U64>,
    /// Hash that uniquely identifies the origin of a deposit
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub source_hash: JsonField<B256>,
    /// address of the sender
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub from: JsonField<Address>,
    /// The ETH value to mint on L2
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub mint: JsonField<U256>,
    /// Field indicating if this transaction is exempt from the L2 gas limit
    #[serde(
        default,
        alias = "isSystemTx",
        skip_serializing_if = "JsonField::is_absent"
    )]
    pub is_system_transaction: JsonField<bool>,
    /// Deposit receipt version for deposit transactions (since Canyon)
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub deposit_receipt_version: JsonField<U64>,
    /// hash of the transaction. Informational; it is only compared against
    /// the computed hash when [`HashCheck::Verify`] is configured.
    #[serde(default, skip_serializing_if = "JsonField::is_absent")]
    pub hash: JsonField<B256>,
}

/// Error that occurs when trying to convert the JSON-RPC transaction type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The informational hash does not match the hash computed from the
    /// fields.
    #[error("transaction hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch {
        /// The hash provided in the JSON object
        expected: B256,
        /// The hash computed from the transaction's fields
        computed: B256,
    },
    /// A required field is absent or `null`.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    /// The transaction type is unknown.
    #[error("unsupported transaction type: {0:#04x}")]
    UnsupportedType(u8),
}

/// Trait for writing a transaction's own fields into an [`RpcTransaction`].
///
/// Fields that do not belong to the transaction kind are left absent.
pub trait CopyInto {
    /// Copies the transaction's fields into the provided JSON-RPC
    /// transaction.
    fn copy_into(&self, rpc: &mut RpcTransaction);
}

fn tx_kind(to: JsonField<Address>) -> TxKind {
    to.into_option().map_or(TxKind::Create, TxKind::Call)
}

fn to_field(kind: TxKind) -> JsonField<Address> {
    match kind {
        TxKind::Call(to) => JsonField::Present(to),
        TxKind::Create => JsonField::Null,
    }
}

/// Reads the signature fields in canonical order: `v`, `r`, `s`.
fn signature(
    v: JsonField<U64>,
    r: JsonField<U256>,
    s: JsonField<U256>,
) -> Result<Signature, ConversionError> {
    let v = v.required("v")?;
    let r = r.required("r")?;
    let s = s.required("s")?;

    Ok(Signature { r, s, v: v.to() })
}

fn copy_signature(signature: &Signature, rpc: &mut RpcTransaction) {
    rpc.v = JsonField::Present(U64::from(signature.v));
    rpc.r = JsonField::Present(signature.r);
    rpc.s = JsonField::Present(signature.s);
}

impl TryFrom<RpcTransaction> for Legacy {
    type Error = ConversionError;

    fn try_from(value: RpcTransaction) -> Result<Self, Self::Error> {
        let nonce = value.nonce.required("nonce")?;
        let gas_price = value.gas_price.required("gasPrice")?;
        let gas_limit = value.gas.required("gas")?;
        let transferred = value.value.required("value")?;
        let signature = signature(value.v, value.r, value.s)?;

        Ok(Legacy::new(LegacyArgs {
            nonce: nonce.to(),
            gas_price: gas_price.to(),
            gas_limit: gas_limit.to(),
            kind: tx_kind(value.to),
            value: transferred,
            input: value.input.into_option().unwrap_or_default(),
            signature,
        }))
    }
}

impl CopyInto for Legacy {
    fn copy_into(&self, rpc: &mut RpcTransaction) {
        rpc.chain_id =
            JsonField::from_option(self.signature.eip155_chain_id().map(U64::from));
        rpc.nonce = JsonField::Present(U64::from(self.nonce));
        rpc.to = to_field(self.kind);
        rpc.gas = JsonField::Present(U64::from(self.gas_limit));
        rpc.gas_price = JsonField::Present(U128::from(self.gas_price));
        rpc.value = JsonField::Present(self.value);
        rpc.input = JsonField::Present(self.input.clone());
        copy_signature(&self.signature, rpc);
    }
}

impl TryFrom<RpcTransaction> for Eip2930 {
    type Error = ConversionError;

    fn try_from(value: RpcTransaction) -> Result<Self, Self::Error> {
        let chain_id = value.chain_id.required("chainId")?;
        let nonce = value.nonce.required("nonce")?;
        let gas_price = value.gas_price.required("gasPrice")?;
        let gas_limit = value.gas.required("gas")?;
        let transferred = value.value.required("value")?;
        let signature = signature(value.v, value.r, value.s)?;

        Ok(Eip2930::new(Eip2930Args {
            chain_id: chain_id.to(),
            nonce: nonce.to(),
            gas_price: gas_price.to(),
            gas_limit: gas_limit.to(),
            kind: tx_kind(value.to),
            value: transferred,
            input: value.input.into_option().unwrap_or_default(),
            access_list: value.access_list.into_option().unwrap_or_default(),
            signature,
        }))
    }
}

impl CopyInto for Eip2930 {
    fn copy_into(&self, rpc: &mut RpcTransaction) {
        rpc.chain_id = JsonField::Present(U64::from(self.chain_id));
        rpc.nonce = JsonField::Present(U64::from(self.nonce));
        rpc.to = to_field(self.kind);
        rpc.gas = JsonField::Present(U64::from(self.gas_limit));
        rpc.gas_price = JsonField::Present(U128::from(self.gas_price));
        rpc.value = JsonField::Present(self.value);
        rpc.input = JsonField::Present(self.input.clone());
        rpc.access_list = JsonField::Present(self.access_list.clone());
        copy_signature(&self.signature, rpc);
        rpc.y_parity = JsonField::Present(U64::from(u64::from(self.signature.odd_y_parity())));
    }
}

impl TryFrom<RpcTransaction> for Eip1559 {
    type Error = ConversionError;

    fn try_from(value: RpcTransaction) -> Result<Self, Self::Error> {
        let chain_id = value.chain_id.required("chainId")?;
        let nonce = value.nonce.required("nonce")?;
        let max_priority_fee_per_gas = value
            .max_priority_fee_per_gas
            .required("maxPriorityFeePerGas")?;
        let max_fee_per_gas = value.max_fee_per_gas.required("maxFeePerGas")?;
        let gas_limit = value.gas.required("gas")?;
        let transferred = value.value.required("value")?;
        let signature = signature(value.v, value.r, value.s)?;

        Ok(Eip1559::new(Eip1559Args {
            chain_id: chain_id.to(),
            nonce: nonce.to(),
            max_priority_fee_per_gas: max_priority_fee_per_gas.to(),
            max_fee_per_gas: max_fee_per_gas.to(),
            gas_limit: gas_limit.to(),
            kind: tx_kind(value.to),
            value: transferred,
            input: value.input.into_option().unwrap_or_default(),
            access_list: value.access_list.into_option().unwrap_or_default(),
            signature,
        }))
    }
}

impl CopyInto for Eip1559 {
    fn copy_into(&self, rpc: &mut RpcTransaction) {
        rpc.chain_id = JsonField::Present(U64::from(self.chain_id));
        rpc.nonce = JsonField::Present(U64::from(self.nonce));
        rpc.to = to_field(self.kind);
        rpc.gas = JsonField::Present(U64::from(self.gas_limit));
        rpc.max_priority_fee_per_gas =
            JsonField::Present(U128::from(self.max_priority_fee_per_gas));
        rpc.max_fee_per_gas = JsonField::Present(U128::from(self.max_fee_per_gas));
        rpc.value = JsonField::Present(self.value);
        rpc.input = JsonField::Present(self.input.clone());
        rpc.access_list = JsonField::Present(self.access_list.clone());
        copy_signature(&self.signature, rpc);
        rpc.y_parity = JsonField::Present(U64::from(u64::from(self.signature.odd_y_parity())));
    }
}

impl TryFrom<RpcTransaction> for Deposit {
    type Error = ConversionError;

    fn try_from(value: RpcTransaction) -> Result<Self, Self::Error> {
        // The order of these checks determines which missing field is reported.
        let gas_limit = value.gas.required("gas")?;
        let transferred = value.value.required("value")?;
        let data = value.input.required("input")?;
        let from = value.from.required("from")?;
        let source_hash = value.source_hash.required("sourceHash")?;

        Ok(Deposit::new(DepositArgs {
            source_hash,
            from,
            to: tx_kind(value.to),
            mint: value.mint.into_option().unwrap_or_default(),
            value: transferred,
            gas_limit: gas_limit.to(),
            is_system_tx: value.is_system_transaction.into_option().unwrap_or(false),
            data,
        }))
    }
}

impl CopyInto for Deposit {
    fn copy_into(&self, rpc: &mut RpcTransaction) {
        rpc.to = to_field(self.to);
        rpc.gas = JsonField::Present(U64::from(self.gas_limit));
        rpc.value = JsonField::Present(self.value);
        rpc.input = JsonField::Present(self.data.clone());
        rpc.source_hash = JsonField::Present(self.source_hash);
        rpc.from = JsonField::Present(self.from);
        rpc.mint = JsonField::Present(self.mint);
        rpc.is_system_transaction = JsonField::Present(self.is_system_tx);
    }
}

impl TryFrom<RpcTransaction> for DepositWithNonce {
    type Error = ConversionError;

    fn try_from(mut value: RpcTransaction) -> Result<Self, Self::Error> {
        let nonce = std::mem::take(&mut value.nonce);
        let deposit_receipt_version = std::mem::take(&mut value.deposit_receipt_version);

        let deposit = Deposit::try_from(value)?;
        let nonce = nonce.required("nonce")?;

        Ok(DepositWithNonce::executed(
            deposit,
            DepositExecution {
                nonce: nonce.to(),
                deposit_receipt_version: deposit_receipt_version
                    .into_option()
                    .map(|version| version.to()),
            },
        ))
    }
}

impl CopyInto for DepositWithNonce {
    fn copy_into(&self, rpc: &mut RpcTransaction) {
        self.deposit().copy_into(rpc);

        // An unexecuted deposit is indistinguishable from a base deposit.
        if let Some(execution) = self.execution() {
            rpc.nonce = JsonField::Present(U64::from(execution.nonce));
            rpc.deposit_receipt_version =
                JsonField::from_option(execution.deposit_receipt_version.map(U64::from));
        }
    }
}

impl CopyInto for OpTransaction {
    fn copy_into(&self, rpc: &mut RpcTransaction) {
        match self {
            OpTransaction::Legacy(tx) => tx.copy_into(rpc),
            OpTransaction::Eip2930(tx) => tx.copy_into(rpc),
            OpTransaction::Eip1559(tx) => tx.copy_into(rpc),
            OpTransaction::Deposit(tx) => tx.copy_into(rpc),
            OpTransaction::DepositWithNonce(tx) => tx.copy_into(rpc),
        }
    }
}

impl RpcTransaction {
    /// Converts into an [`OpTransaction`], using the provided configuration.
    ///
    /// The transaction type selects the kind. Deposits with a non-null
    /// `nonce` field become [`DepositWithNonce`]; otherwise [`Deposit`].
    /// The first missing required field of the selected kind is reported
    /// unchanged.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn into_transaction(self, config: &CodecConfig) -> Result<OpTransaction, ConversionError> {
        let transaction_type = match self.transaction_type.as_option() {
            Some(r#type) => OpTransactionType::try_from(r#type.to::<u8>())
                .map_err(ConversionError::UnsupportedType)?,
            None => {
                log::debug!(
                    "Missing transaction type. Defaulting to {} transaction",
                    config.untyped_transaction_type
                );

                config.untyped_transaction_type
            }
        };

        let expected_hash = self.hash.as_option().copied();

        let transaction = match transaction_type {
            OpTransactionType::Legacy => OpTransaction::Legacy(self.try_into()?),
            OpTransactionType::Eip2930 => OpTransaction::Eip2930(self.try_into()?),
            OpTransactionType::Eip1559 => OpTransaction::Eip1559(self.try_into()?),
            OpTransactionType::Deposit => {
                if self.nonce.is_present() {
                    log::debug!("Resolved deposit transaction with nonce");

                    OpTransaction::DepositWithNonce(self.try_into()?)
                } else {
                    OpTransaction::Deposit(self.try_into()?)
                }
            }
        };

        // Memoizes the hash
        let computed = *transaction.transaction_hash();

        match (config.hash_check, expected_hash) {
            (HashCheck::Verify, Some(expected)) if expected != computed => {
                log::warn!("Transaction hash mismatch: expected {expected}, computed {computed}");

                Err(ConversionError::HashMismatch { expected, computed })
            }
            _ => Ok(transaction),
        }
    }
}

impl TryFrom<RpcTransaction> for OpTransaction {
    type Error = ConversionError;

    fn try_from(value: RpcTransaction) -> Result<Self, Self::Error> {
        value.into_transaction(&CodecConfig::default())
    }
}

impl From<&OpTransaction> for RpcTransaction {
    fn from(transaction: &OpTransaction) -> Self {
        let mut rpc = RpcTransaction {
            transaction_type: JsonField::Present(U8::from(u8::from(
                transaction.transaction_type(),
            ))),
            ..RpcTransaction::default()
        };

        transaction.copy_into(&mut rpc);
        rpc.hash = JsonField::Present(*transaction.transaction_hash());

        rpc
    }
}
