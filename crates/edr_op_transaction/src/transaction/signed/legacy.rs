use std::sync::OnceLock;

use alloy_primitives::{keccak256, Bytes, TxKind, B256, U256};
use alloy_rlp::RlpEncodable;

use crate::{
    signature::Signature,
    transaction::{AccessorError, OpTransactionType, TransactionData},
};

/// Arguments for constructing a [`Legacy`] transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyArgs {
    /// The number of transactions sent by the sender prior to this one
    pub nonce: u64,
    /// The gas price the sender is willing to pay
    pub gas_price: u128,
    /// The gas limit of the transaction
    pub gas_limit: u64,
    /// The receiver, or contract creation
    pub kind: TxKind,
    /// The value transferred to the receiver
    pub value: U256,
    /// The calldata
    pub input: Bytes,
    /// The signature of the transaction
    pub signature: Signature,
}

/// Legacy transaction, either pre- or post-EIP-155.
#[derive(Clone, Debug, Eq)]
pub struct Legacy {
    pub(crate) nonce: u64,
    pub(crate) gas_price: u128,
    pub(crate) gas_limit: u64,
    pub(crate) kind: TxKind,
    pub(crate) value: U256,
    pub(crate) input: Bytes,
    pub(crate) signature: Signature,
    /// Cached transaction hash
    hash: OnceLock<B256>,
}

#[derive(RlpEncodable)]
struct Encodable<'tx> {
    // The order of these fields determines encoding order.
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    kind: &'tx TxKind,
    value: &'tx U256,
    input: &'tx Bytes,
    v: u64,
    r: &'tx U256,
    s: &'tx U256,
}

impl<'tx> From<&'tx Legacy> for Encodable<'tx> {
    fn from(transaction: &'tx Legacy) -> Self {
        Self {
            nonce: transaction.nonce,
            gas_price: transaction.gas_price,
            gas_limit: transaction.gas_limit,
            kind: &transaction.kind,
            value: &transaction.value,
            input: &transaction.input,
            v: transaction.signature.v,
            r: &transaction.signature.r,
            s: &transaction.signature.s,
        }
    }
}

impl Legacy {
    /// The type identifier for a legacy transaction.
    pub const TYPE: u8 = 0x00;

    /// Constructs a new instance.
    pub fn new(args: LegacyArgs) -> Self {
        let LegacyArgs {
            nonce,
            gas_price,
            gas_limit,
            kind,
            value,
            input,
            signature,
        } = args;

        Self {
            nonce,
            gas_price,
            gas_limit,
            kind,
            value,
            input,
            signature,
            hash: OnceLock::new(),
        }
    }

    /// Returns the RLP-encoding of the transaction.
    pub fn rlp_encoding(&self) -> Bytes {
        alloy_rlp::encode(Encodable::from(self)).into()
    }
}

impl PartialEq for Legacy {
    fn eq(&self, other: &Self) -> bool {
        self.nonce == other.nonce
            && self.gas_price == other.gas_price
            && self.gas_limit == other.gas_limit
            && self.kind == other.kind
            && self.value == other.value
            && self.input == other.input
            && self.signature == other.signature
    }
}

impl TransactionData for Legacy {
    fn transaction_type(&self) -> OpTransactionType {
        OpTransactionType::Legacy
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn value(&self) -> &U256 {
        &self.value
    }

    fn data(&self) -> &Bytes {
        &self.input
    }

    fn kind(&self) -> TxKind {
        self.kind
    }

    fn transaction_hash(&self) -> &B256 {
        self.hash.get_or_init(|| keccak256(self.rlp_encoding()))
    }

    fn nonce(&self) -> Result<u64, AccessorError> {
        Ok(self.nonce)
    }

    fn gas_price(&self) -> Result<u128, AccessorError> {
        Ok(self.gas_price)
    }

    fn chain_id(&self) -> Result<u64, AccessorError> {
        // Pre-EIP-155 transactions are not bound to a chain.
        self.signature
            .eip155_chain_id()
            .ok_or(AccessorError::Unsupported {
                accessor: "chain_id",
                transaction_type: OpTransactionType::Legacy,
            })
    }

    fn signature(&self) -> Result<&Signature, AccessorError> {
        Ok(&self.signature)
    }
}
