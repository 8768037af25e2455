use std::sync::OnceLock;

use alloy_primitives::{keccak256, Bytes, TxKind, B256, U256};
use alloy_rlp::RlpEncodable;

use crate::{
    eip2930::AccessListItem,
    signature::Signature,
    transaction::{AccessorError, OpTransactionType, TransactionData},
    utils::enveloped,
};

/// Arguments for constructing an [`Eip2930`] transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Eip2930Args {
    /// The chain ID the transaction was signed for
    pub chain_id: u64,
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
    /// The addresses and storage keys the transaction plans to access
    pub access_list: Vec<AccessListItem>,
    /// The signature of the transaction
    pub signature: Signature,
}

/// EIP-2930 access list transaction.
#[derive(Clone, Debug, Eq)]
pub struct Eip2930 {
    pub(crate) chain_id: u64,
    pub(crate) nonce: u64,
    pub(crate) gas_price: u128,
    pub(crate) gas_limit: u64,
    pub(crate) kind: TxKind,
    pub(crate) value: U256,
    pub(crate) input: Bytes,
    pub(crate) access_list: Vec<AccessListItem>,
    pub(crate) signature: Signature,
    /// Cached transaction hash
    hash: OnceLock<B256>,
}

#[derive(RlpEncodable)]
struct Encodable<'tx> {
    // The order of these fields determines encoding order.
    chain_id: u64,
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    kind: &'tx TxKind,
    value: &'tx U256,
    input: &'tx Bytes,
    access_list: &'tx Vec<AccessListItem>,
    odd_y_parity: bool,
    r: &'tx U256,
    s: &'tx U256,
}

impl<'tx> From<&'tx Eip2930> for Encodable<'tx> {
    fn from(transaction: &'tx Eip2930) -> Self {
        Self {
            chain_id: transaction.chain_id,
            nonce: transaction.nonce,
            gas_price: transaction.gas_price,
            gas_limit: transaction.gas_limit,
            kind: &transaction.kind,
            value: &transaction.value,
            input: &transaction.input,
            access_list: &transaction.access_list,
            odd_y_parity: transaction.signature.odd_y_parity(),
            r: &transaction.signature.r,
            s: &transaction.signature.s,
        }
    }
}

impl Eip2930 {
    /// The type identifier for an EIP-2930 transaction.
    pub const TYPE: u8 = 0x01;

    /// Constructs a new instance.
    pub fn new(args: Eip2930Args) -> Self {
        let Eip2930Args {
            chain_id,
            nonce,
            gas_price,
            gas_limit,
            kind,
            value,
            input,
            access_list,
            signature,
        } = args;

        Self {
            chain_id,
            nonce,
            gas_price,
            gas_limit,
            kind,
            value,
            input,
            access_list,
            signature,
            hash: OnceLock::new(),
        }
    }

    /// Returns the type-prefixed RLP-encoding of the transaction.
    pub fn rlp_encoding(&self) -> Bytes {
        let mut encoded = Vec::new();
        enveloped(Self::TYPE, &Encodable::from(self), &mut encoded);
        encoded.into()
    }
}

impl PartialEq for Eip2930 {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id
            && self.nonce == other.nonce
            && self.gas_price == other.gas_price
            && self.gas_limit == other.gas_limit
            && self.kind == other.kind
            && self.value == other.value
            && self.input == other.input
            && self.access_list == other.access_list
            && self.signature == other.signature
    }
}

impl TransactionData for Eip2930 {
    fn transaction_type(&self) -> OpTransactionType {
        OpTransactionType::Eip2930
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
        Ok(self.chain_id)
    }

    fn access_list(&self) -> Result<&[AccessListItem], AccessorError> {
        Ok(&self.access_list)
    }

    fn signature(&self) -> Result<&Signature, AccessorError> {
        Ok(&self.signature)
    }
}
