#![warn(missing_docs)]

//! OP transaction types and their JSON codec
//!
//! Transactions of an OP Stack chain: the Ethereum legacy, EIP-2930 and
//! EIP-1559 kinds plus deposits derived from L1 bridge events. They are based
//! on the primitive types of `alloy-primitives`.

/// JSON encoding and decoding of transactions.
pub mod codec;
/// Configuration of the JSON codec.
pub mod config;
/// Types for EIP-2930 access lists.
pub mod eip2930;
/// JSON-RPC transaction types
pub mod rpc;
/// ECDSA signature of signed transactions.
pub mod signature;
/// OP transaction types
pub mod transaction;
/// Utilities for transaction encoding.
pub mod utils;

/// Fixtures for tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use alloy_primitives::{Address, Bytes, TxKind, B256, U256};

pub use self::{
    codec::{decode, decode_with_config, encode, DecodeError},
    config::{CodecConfig, HashCheck, DEFAULT_UNTYPED_TRANSACTION_TYPE},
    transaction::{AccessorError, OpTransaction, OpTransactionType, TransactionData},
};
