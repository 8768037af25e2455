mod r#type;

/// Types for signed transactions.
pub mod signed;

use alloy_primitives::{Address, Bytes, TxKind, B256, U256};

use self::signed::{DepositExecution, ExecutionError};
use crate::{eip2930::AccessListItem, signature::Signature};

/// An OP transaction, as used in blocks, receipts and the transaction pool.
///
/// The envelope exclusively owns exactly one transaction payload. Deposits
/// have two representations that share the [`OpTransactionType::Deposit`]
/// type: the base [`signed::Deposit`] and [`signed::DepositWithNonce`], which
/// additionally carries the post-execution nonce and receipt version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpTransaction {
    /// Legacy transaction
    Legacy(signed::Legacy),
    /// EIP-2930 transaction
    Eip2930(signed::Eip2930),
    /// EIP-1559 transaction
    Eip1559(signed::Eip1559),
    /// OP deposit transaction
    Deposit(signed::Deposit),
    /// OP deposit transaction with post-execution nonce
    DepositWithNonce(signed::DepositWithNonce),
}

/// The type of OP transaction.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpTransactionType {
    /// OP legacy transaction
    Legacy = signed::Legacy::TYPE,
    /// OP EIP-2930 transaction
    Eip2930 = signed::Eip2930::TYPE,
    /// OP EIP-1559 transaction
    Eip1559 = signed::Eip1559::TYPE,
    /// OP deposit transaction
    Deposit = signed::Deposit::TYPE,
}

/// Error that occurs when reading a kind-specific field of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    /// The field does not exist for this kind of transaction.
    #[error("`{accessor}` is not supported for {transaction_type} transactions")]
    Unsupported {
        /// Name of the accessor
        accessor: &'static str,
        /// Type of the transaction the accessor was called on
        transaction_type: OpTransactionType,
    },
    /// The field is only populated after the deposit has been executed.
    #[error("`{accessor}` is not available before the deposit transaction has been executed")]
    NotExecuted {
        /// Name of the accessor
        accessor: &'static str,
    },
}

fn unsupported<T>(
    accessor: &'static str,
    transaction_type: OpTransactionType,
) -> Result<T, AccessorError> {
    Err(AccessorError::Unsupported {
        accessor,
        transaction_type,
    })
}

/// Trait for the data of a transaction, independent of its kind.
///
/// Accessors that are only meaningful for some kinds return
/// [`AccessorError::Unsupported`] by default, so callers never mistake a
/// missing field for a zero value.
pub trait TransactionData {
    /// Returns the type of the transaction.
    fn transaction_type(&self) -> OpTransactionType;

    /// The maximum amount of gas the transaction can use.
    fn gas_limit(&self) -> u64;

    /// The value sent to the receiver.
    fn value(&self) -> &U256;

    /// The input data of the transaction.
    fn data(&self) -> &Bytes;

    /// Returns whether the transaction is a call or a contract creation.
    fn kind(&self) -> TxKind;

    /// Returns the (memoized) hash of the transaction.
    fn transaction_hash(&self) -> &B256;

    /// The nonce of the transaction.
    fn nonce(&self) -> Result<u64, AccessorError> {
        unsupported("nonce", self.transaction_type())
    }

    /// The gas price the sender is willing to pay.
    fn gas_price(&self) -> Result<u128, AccessorError> {
        unsupported("gas_price", self.transaction_type())
    }

    /// The maximum fee per gas the sender is willing to pay.
    fn max_fee_per_gas(&self) -> Result<u128, AccessorError> {
        unsupported("max_fee_per_gas", self.transaction_type())
    }

    /// The maximum priority fee per gas the sender is willing to pay.
    fn max_priority_fee_per_gas(&self) -> Result<u128, AccessorError> {
        unsupported("max_priority_fee_per_gas", self.transaction_type())
    }

    /// The chain ID the transaction was signed for.
    fn chain_id(&self) -> Result<u64, AccessorError> {
        unsupported("chain_id", self.transaction_type())
    }

    /// The access list of the transaction.
    fn access_list(&self) -> Result<&[AccessListItem], AccessorError> {
        unsupported("access_list", self.transaction_type())
    }

    /// The signature of the transaction.
    fn signature(&self) -> Result<&Signature, AccessorError> {
        unsupported("signature", self.transaction_type())
    }

    /// Hash that uniquely identifies the origin of a deposit.
    fn source_hash(&self) -> Result<&B256, AccessorError> {
        unsupported("source_hash", self.transaction_type())
    }

    /// The sender of a deposit, as attested by the bridge.
    ///
    /// Signed transactions require sender recovery, which is not provided by
    /// this crate.
    fn caller(&self) -> Result<&Address, AccessorError> {
        unsupported("caller", self.transaction_type())
    }

    /// The ETH value minted on L2 by a deposit.
    fn mint(&self) -> Result<&U256, AccessorError> {
        unsupported("mint", self.transaction_type())
    }

    /// Whether a deposit is exempt from the L2 gas limit.
    fn is_system_transaction(&self) -> Result<bool, AccessorError> {
        unsupported("is_system_transaction", self.transaction_type())
    }

    /// The receipt version of an executed deposit.
    fn deposit_receipt_version(&self) -> Result<Option<u64>, AccessorError> {
        unsupported("deposit_receipt_version", self.transaction_type())
    }
}

impl OpTransaction {
    /// Returns whether the transaction is a deposit, in either representation.
    pub fn is_deposit(&self) -> bool {
        matches!(
            self,
            OpTransaction::Deposit(_) | OpTransaction::DepositWithNonce(_)
        )
    }

    /// The receiver of the transaction, or `None` for contract creation.
    pub fn to(&self) -> Option<Address> {
        self.kind().to().copied()
    }

    /// Converts a base deposit into its nonce-carrying representation, so its
    /// post-execution fields can be populated. Other transactions are returned
    /// unchanged.
    pub fn into_deposit_with_nonce(self) -> Self {
        match self {
            OpTransaction::Deposit(deposit) => OpTransaction::DepositWithNonce(deposit.into()),
            transaction => transaction,
        }
    }

    /// Populates the post-execution fields of a nonce-carrying deposit.
    ///
    /// The fields can only be set once; subsequent attempts fail with
    /// [`ExecutionError::AlreadyExecuted`].
    pub fn set_deposit_execution(&self, execution: DepositExecution) -> Result<(), ExecutionError> {
        match self {
            OpTransaction::DepositWithNonce(deposit) => deposit.set_execution(execution),
            transaction => Err(ExecutionError::Unsupported(transaction.transaction_type())),
        }
    }
}

macro_rules! delegate {
    ($self:ident, $method:ident) => {
        match $self {
            OpTransaction::Legacy(tx) => tx.$method(),
            OpTransaction::Eip2930(tx) => tx.$method(),
            OpTransaction::Eip1559(tx) => tx.$method(),
            OpTransaction::Deposit(tx) => tx.$method(),
            OpTransaction::DepositWithNonce(tx) => tx.$method(),
        }
    };
}

impl TransactionData for OpTransaction {
    fn transaction_type(&self) -> OpTransactionType {
        delegate!(self, transaction_type)
    }

    fn gas_limit(&self) -> u64 {
        delegate!(self, gas_limit)
    }

    fn value(&self) -> &U256 {
        delegate!(self, value)
    }

    fn data(&self) -> &Bytes {
        delegate!(self, data)
    }

    fn kind(&self) -> TxKind {
        delegate!(self, kind)
    }

    fn transaction_hash(&self) -> &B256 {
        delegate!(self, transaction_hash)
    }

    fn nonce(&self) -> Result<u64, AccessorError> {
        delegate!(self, nonce)
    }

    fn gas_price(&self) -> Result<u128, AccessorError> {
        delegate!(self, gas_price)
    }

    fn max_fee_per_gas(&self) -> Result<u128, AccessorError> {
        delegate!(self, max_fee_per_gas)
    }

    fn max_priority_fee_per_gas(&self) -> Result<u128, AccessorError> {
        delegate!(self, max_priority_fee_per_gas)
    }

    fn chain_id(&self) -> Result<u64, AccessorError> {
        delegate!(self, chain_id)
    }

    fn access_list(&self) -> Result<&[AccessListItem], AccessorError> {
        delegate!(self, access_list)
    }

    fn signature(&self) -> Result<&Signature, AccessorError> {
        delegate!(self, signature)
    }

    fn source_hash(&self) -> Result<&B256, AccessorError> {
        delegate!(self, source_hash)
    }

    fn caller(&self) -> Result<&Address, AccessorError> {
        delegate!(self, caller)
    }

    fn mint(&self) -> Result<&U256, AccessorError> {
        delegate!(self, mint)
    }

    fn is_system_transaction(&self) -> Result<bool, AccessorError> {
        delegate!(self, is_system_transaction)
    }

    fn deposit_receipt_version(&self) -> Result<Option<u64>, AccessorError> {
        delegate!(self, deposit_receipt_version)
    }
}

impl From<signed::Legacy> for OpTransaction {
    fn from(transaction: signed::Legacy) -> Self {
        Self::Legacy(transaction)
    }
}

impl From<signed::Eip2930> for OpTransaction {
    fn from(transaction: signed::Eip2930) -> Self {
        Self::Eip2930(transaction)
    }
}

impl From<signed::Eip1559> for OpTransaction {
    fn from(transaction: signed::Eip1559) -> Self {
        Self::Eip1559(transaction)
    }
}

impl From<signed::Deposit> for OpTransaction {
    fn from(transaction: signed::Deposit) -> Self {
        Self::Deposit(transaction)
    }
}

impl From<signed::DepositWithNonce> for OpTransaction {
    fn from(transaction: signed::DepositWithNonce) -> Self {
        Self::DepositWithNonce(transaction)
    }
}
