use alloy_primitives::{address, b256, bytes, Address, Bytes, TxKind, B256, U256};

use crate::{
    eip2930::AccessListItem,
    signature::Signature,
    transaction::{
        signed::{
            Deposit, DepositArgs, DepositExecution, DepositWithNonce, Eip1559, Eip1559Args,
            Eip2930, Eip2930Args, Legacy, LegacyArgs,
        },
        OpTransaction,
    },
};

/// Source hash shared by the deposit fixtures.
pub const DUMMY_SOURCE_HASH: B256 =
    b256!("0000000000000000000000000000000000000000000000000000000000001234");

/// Sender of the deposit fixtures.
pub const DUMMY_DEPOSITOR: Address = address!("deaddeaddeaddeaddeaddeaddeaddeaddead0001");

const RECEIVER: Address = address!("4200000000000000000000000000000000000015");

fn dummy_signature(v: u64) -> Signature {
    Signature {
        r: U256::from_be_bytes(
            b256!("28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276").0,
        ),
        s: U256::from_be_bytes(
            b256!("67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83").0,
        ),
        v,
    }
}

fn dummy_access_list() -> Vec<AccessListItem> {
    vec![AccessListItem {
        address: RECEIVER,
        storage_keys: vec![
            b256!("0000000000000000000000000000000000000000000000000000000000000003"),
            b256!("0000000000000000000000000000000000000000000000000000000000000007"),
        ],
    }]
}

/// A contract-creation deposit with source hash `0x..1234` and a mint of 34.
pub fn dummy_deposit() -> Deposit {
    Deposit::new(DepositArgs {
        source_hash: DUMMY_SOURCE_HASH,
        mint: U256::from(34),
        ..DepositArgs::default()
    })
}

/// An executed L1 attributes deposit.
pub fn dummy_deposit_with_nonce() -> DepositWithNonce {
    let deposit = Deposit::new(DepositArgs {
        source_hash: DUMMY_SOURCE_HASH,
        from: DUMMY_DEPOSITOR,
        to: TxKind::Call(RECEIVER),
        mint: U256::ZERO,
        value: U256::ZERO,
        gas_limit: 1_000_000,
        is_system_tx: true,
        data: bytes!("015d8eb9"),
    });

    DepositWithNonce::executed(
        deposit,
        DepositExecution {
            nonce: 3,
            deposit_receipt_version: Some(1),
        },
    )
}

/// An EIP-155 legacy transaction for chain ID 10.
pub fn dummy_legacy() -> Legacy {
    Legacy::new(LegacyArgs {
        nonce: 9,
        gas_price: 20_000_000_000,
        gas_limit: 21_000,
        kind: TxKind::Call(RECEIVER),
        value: U256::from(1_000_000_000_000_000_000u64),
        input: Bytes::new(),
        signature: dummy_signature(55),
    })
}

/// An EIP-2930 transaction with a single access list entry.
pub fn dummy_eip2930() -> Eip2930 {
    Eip2930::new(Eip2930Args {
        chain_id: 10,
        nonce: 1,
        gas_price: 1_000_000_000,
        gas_limit: 50_000,
        kind: TxKind::Call(RECEIVER),
        value: U256::from(7),
        input: bytes!("616263646566"),
        access_list: dummy_access_list(),
        signature: dummy_signature(1),
    })
}

/// An EIP-1559 contract-creation transaction.
pub fn dummy_eip1559() -> Eip1559 {
    Eip1559::new(Eip1559Args {
        chain_id: 10,
        nonce: 2,
        max_priority_fee_per_gas: 1_000,
        max_fee_per_gas: 2_000_000_000,
        gas_limit: 100_000,
        kind: TxKind::Create,
        value: U256::ZERO,
        input: bytes!("6080604052"),
        access_list: dummy_access_list(),
        signature: dummy_signature(0),
    })
}

/// One transaction of each kind, including both deposit representations.
pub fn all_transaction_kinds() -> Vec<OpTransaction> {
    vec![
        dummy_legacy().into(),
        dummy_eip2930().into(),
        dummy_eip1559().into(),
        dummy_deposit().into(),
        dummy_deposit_with_nonce().into(),
    ]
}
