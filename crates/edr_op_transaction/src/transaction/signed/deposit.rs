use std::sync::OnceLock;

use alloy_primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use alloy_rlp::RlpEncodable;

use crate::{
    transaction::{AccessorError, OpTransactionType, TransactionData},
    utils::enveloped,
};

/// Arguments for constructing a [`Deposit`] transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepositArgs {
    /// Hash that uniquely identifies the origin of the deposit.
    pub source_hash: B256,
    /// The address of the sender account.
    pub from: Address,
    /// The address of the recipient account, or contract creation.
    pub to: TxKind,
    /// The ETH value to mint on L2.
    pub mint: U256,
    /// The ETH value to send to the recipient account.
    pub value: U256,
    /// The gas limit for the L2 transaction.
    pub gas_limit: u64,
    /// Field indicating if this transaction is exempt from the L2 gas limit.
    pub is_system_tx: bool,
    /// The calldata
    pub data: Bytes,
}

/// Deposit transaction.
///
/// Deposits are derived from L1 bridge events. They are not signed; the
/// sender is attested by the bridge.
///
/// For details, see <https://specs.optimism.io/protocol/deposits.html#the-deposited-transaction-type>.
#[derive(Clone, Debug, Eq, RlpEncodable)]
pub struct Deposit {
    // The order of these fields determines encoding order.
    pub(crate) source_hash: B256,
    pub(crate) from: Address,
    pub(crate) to: TxKind,
    pub(crate) mint: U256,
    pub(crate) value: U256,
    pub(crate) gas_limit: u64,
    pub(crate) is_system_tx: bool,
    pub(crate) data: Bytes,
    /// Cached transaction hash
    #[rlp(skip)]
    hash: OnceLock<B256>,
}

impl Deposit {
    /// The type identifier for a deposit transaction.
    pub const TYPE: u8 = 0x7E;

    /// Constructs a new instance.
    pub fn new(args: DepositArgs) -> Self {
        let DepositArgs {
            source_hash,
            from,
            to,
            mint,
            value,
            gas_limit,
            is_system_tx,
            data,
        } = args;

        Self {
            source_hash,
            from,
            to,
            mint,
            value,
            gas_limit,
            is_system_tx,
            data,
            hash: OnceLock::new(),
        }
    }

    /// Returns the type-prefixed RLP-encoding of the transaction.
    pub fn rlp_encoding(&self) -> Bytes {
        let mut encoded = Vec::with_capacity(1 + alloy_rlp::Encodable::length(self));
        enveloped(Self::TYPE, self, &mut encoded);
        encoded.into()
    }
}

impl PartialEq for Deposit {
    fn eq(&self, other: &Self) -> bool {
        // Custom implementation of `PartialEq` to ignore the `hash` field.
        self.source_hash == other.source_hash
            && self.from == other.from
            && self.to == other.to
            && self.mint == other.mint
            && self.value == other.value
            && self.gas_limit == other.gas_limit
            && self.is_system_tx == other.is_system_tx
            && self.data == other.data
    }
}

impl TransactionData for Deposit {
    fn transaction_type(&self) -> OpTransactionType {
        OpTransactionType::Deposit
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn value(&self) -> &U256 {
        &self.value
    }

    fn data(&self) -> &Bytes {
        &self.data
    }

    fn kind(&self) -> TxKind {
        self.to
    }

    fn transaction_hash(&self) -> &B256 {
        self.hash.get_or_init(|| keccak256(self.rlp_encoding()))
    }

    fn source_hash(&self) -> Result<&B256, AccessorError> {
        Ok(&self.source_hash)
    }

    fn caller(&self) -> Result<&Address, AccessorError> {
        Ok(&self.from)
    }

    fn mint(&self) -> Result<&U256, AccessorError> {
        Ok(&self.mint)
    }

    fn is_system_transaction(&self) -> Result<bool, AccessorError> {
        Ok(self.is_system_tx)
    }
}
