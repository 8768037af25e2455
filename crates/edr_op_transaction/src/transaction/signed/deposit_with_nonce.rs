use std::sync::OnceLock;

use alloy_primitives::{Address, Bytes, TxKind, B256, U256};

use super::Deposit;
use crate::transaction::{AccessorError, OpTransactionType, TransactionData};

/// The fields of a deposit that are only known after it has been executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositExecution {
    /// The nonce of the sender account at the time of inclusion.
    pub nonce: u64,
    /// The deposit receipt version.
    ///
    /// The deposit receipt version was introduced in Canyon to indicate an
    /// update to how receipt hashes should be computed when set.
    pub deposit_receipt_version: Option<u64>,
}

/// Error that occurs when populating the post-execution fields of a deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The post-execution fields have already been populated.
    #[error("deposit transaction has already been executed; rejected {rejected:?}")]
    AlreadyExecuted {
        /// The execution that was rejected.
        rejected: DepositExecution,
    },
    /// Only nonce-carrying deposits can be populated.
    #[error("{0} transactions do not have post-execution fields")]
    Unsupported(OpTransactionType),
}

/// Deposit transaction that carries the nonce and receipt version assigned
/// during execution.
///
/// The post-execution fields do not contribute to the transaction hash, so
/// the hash equals that of the wrapped [`Deposit`].
#[derive(Clone, Debug, Eq)]
pub struct DepositWithNonce {
    deposit: Deposit,
    execution: OnceLock<DepositExecution>,
}

impl DepositWithNonce {
    /// Constructs an instance with populated post-execution fields.
    pub fn executed(deposit: Deposit, execution: DepositExecution) -> Self {
        Self {
            deposit,
            execution: OnceLock::from(execution),
        }
    }

    /// Returns the wrapped deposit.
    pub fn deposit(&self) -> &Deposit {
        &self.deposit
    }

    /// Returns the post-execution fields, if they have been populated.
    pub fn execution(&self) -> Option<&DepositExecution> {
        self.execution.get()
    }

    /// Populates the post-execution fields.
    ///
    /// Only the first call succeeds; the fields are never overwritten.
    pub fn set_execution(&self, execution: DepositExecution) -> Result<(), ExecutionError> {
        self.execution.set(execution).map_err(|rejected| {
            log::warn!(
                "Rejected repeated execution of deposit {}",
                self.deposit.transaction_hash()
            );

            ExecutionError::AlreadyExecuted { rejected }
        })
    }
}

impl From<Deposit> for DepositWithNonce {
    fn from(deposit: Deposit) -> Self {
        Self {
            deposit,
            execution: OnceLock::new(),
        }
    }
}

impl PartialEq for DepositWithNonce {
    fn eq(&self, other: &Self) -> bool {
        self.deposit == other.deposit && self.execution.get() == other.execution.get()
    }
}

impl TransactionData for DepositWithNonce {
    fn transaction_type(&self) -> OpTransactionType {
        OpTransactionType::Deposit
    }

    fn gas_limit(&self) -> u64 {
        self.deposit.gas_limit()
    }

    fn value(&self) -> &U256 {
        self.deposit.value()
    }

    fn data(&self) -> &Bytes {
        self.deposit.data()
    }

    fn kind(&self) -> TxKind {
        self.deposit.kind()
    }

    fn transaction_hash(&self) -> &B256 {
        self.deposit.transaction_hash()
    }

    fn nonce(&self) -> Result<u64, AccessorError> {
        self.execution
            .get()
            .map(|execution| execution.nonce)
            .ok_or(AccessorError::NotExecuted { accessor: "nonce" })
    }

    fn source_hash(&self) -> Result<&B256, AccessorError> {
        self.deposit.source_hash()
    }

    fn caller(&self) -> Result<&Address, AccessorError> {
        self.deposit.caller()
    }

    fn mint(&self) -> Result<&U256, AccessorError> {
        self.deposit.mint()
    }

    fn is_system_transaction(&self) -> Result<bool, AccessorError> {
        self.deposit.is_system_transaction()
    }

    fn deposit_receipt_version(&self) -> Result<Option<u64>, AccessorError> {
        self.execution
            .get()
            .map(|execution| execution.deposit_receipt_version)
            .ok_or(AccessorError::NotExecuted {
                accessor: "deposit_receipt_version",
            })
    }
}
