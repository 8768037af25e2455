use std::str::FromStr as _;

use alloy_primitives::{address, b256};
use edr_op_transaction::{
    decode, encode,
    transaction::signed::{Deposit, DepositArgs},
    Bytes, DecodeError, OpTransaction, OpTransactionType, TransactionData as _, U256,
};

const L1_INFO_INPUT: &str = "0x015d8eb900000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000064460d46000000000000000000000000000000000000000000000000000000003b9aca00d184c96292c6a33c9314adc803dae69870ca9d7e410f82a969d4e7f3f6d1a5fd00000000000000000000000000000000000000000000000000000000000000020000000000000000000000009965507d1a55bcc2695c58ba16fb37d819b0a4dc000000000000000000000000000000000000000000000000000000000000083400000000000000000000000000000000000000000000000000000000000f4240";

#[test]
fn deposit_round_trip_preserves_hash() -> anyhow::Result<()> {
    let transaction = OpTransaction::from(Deposit::new(DepositArgs {
        source_hash: b256!("0000000000000000000000000000000000000000000000000000000000001234"),
        mint: U256::from(34),
        ..DepositArgs::default()
    }));

    let json = encode(&transaction)?;
    let decoded = decode(&json)?;

    assert_eq!(decoded.transaction_hash(), transaction.transaction_hash());
    assert_eq!(decoded, transaction);

    Ok(())
}

#[test]
fn deposit_with_nonce() -> anyhow::Result<()> {
    let json = format!(
        r#"{{
            "type": "0x7e",
            "from": "0xdeaddeaddeaddeaddeaddeaddeaddeaddead0001",
            "gas": "0xf4240",
            "value": "0x0",
            "nonce": "0x3",
            "mint": "0x0",
            "input": "{L1_INFO_INPUT}",
            "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000001234"
        }}"#
    );

    let transaction = decode(json.as_bytes())?;
    let OpTransaction::DepositWithNonce(deposit) = &transaction else {
        panic!("expected a deposit with nonce, got {transaction:?}");
    };
    assert_eq!(deposit.execution().map(|execution| execution.nonce), Some(3));
    assert_eq!(transaction.data(), &Bytes::from_str(L1_INFO_INPUT)?);

    let json = encode(&transaction)?;
    let transaction = decode(&json)?;

    assert_eq!(transaction.transaction_type(), OpTransactionType::Deposit);
    assert_eq!(u8::from(transaction.transaction_type()), 0x7e);
    assert_eq!(transaction.gas_limit(), 0xf4240);
    assert_eq!(
        transaction.source_hash(),
        Ok(&b256!(
            "0000000000000000000000000000000000000000000000000000000000001234"
        ))
    );
    assert_eq!(
        transaction.caller(),
        Ok(&address!("deaddeaddeaddeaddeaddeaddeaddeaddead0001"))
    );
    assert_eq!(transaction.nonce(), Ok(3));
    assert_eq!(transaction.deposit_receipt_version(), Ok(None));

    Ok(())
}

/// Deposit as returned by a node, with `null` for the fields of other kinds,
/// minus the named field.
fn deposit_json_without(field: &str) -> anyhow::Result<Vec<u8>> {
    let mut object = serde_json::json!({
        "type": "0x7e",
        "nonce": null,
        "gas": "0x1234",
        "gasPrice": null,
        "maxPriorityFeePerGas": null,
        "maxFeePerGas": null,
        "value": "0x1",
        "input": "0x616263646566",
        "v": null,
        "r": null,
        "s": null,
        "to": null,
        "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
        "from": "0x0000000000000000000000000000000000000001",
        "hash": "0xa4341f3db4363b7ca269a8538bd027b2f8784f84454ca917668642d5f6dffdf9",
    });

    if let Some(fields) = object.as_object_mut() {
        fields.remove(field);
    }

    Ok(serde_json::to_vec(&object)?)
}

macro_rules! impl_test_missing_deposit_field {
    ($($name:ident => $field:literal,)+) => {
        $(
            paste::item! {
                #[test]
                fn [<deposit_without_ $name>]() -> anyhow::Result<()> {
                    let json = deposit_json_without($field)?;

                    let error = decode(&json).expect_err("decoding must fail");
                    assert!(
                        error
                            .to_string()
                            .contains(concat!("missing required field '", $field, "'")),
                        "unexpected error: {error}"
                    );

                    Ok(())
                }
            }
        )+
    };
}

impl_test_missing_deposit_field! {
    gas => "gas",
    value => "value",
    input => "input",
    from => "from",
    source_hash => "sourceHash",
}

#[test]
fn deposit_without_mint() -> anyhow::Result<()> {
    let json = deposit_json_without("mint")?;

    let transaction = decode(&json)?;
    assert!(matches!(transaction, OpTransaction::Deposit(_)));
    assert_eq!(transaction.mint(), Ok(&U256::ZERO));
    assert_eq!(transaction.is_system_transaction(), Ok(false));
    assert_eq!(transaction.to(), None);
    assert_eq!(transaction.value(), &U256::from(1));

    Ok(())
}

#[test]
fn null_field_counts_as_missing() {
    let json = br#"{
        "type": "0x7e",
        "gas": null,
        "value": null,
        "input": "0x",
        "from": "0x0000000000000000000000000000000000000001",
        "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000000000"
    }"#;

    let error = decode(json).expect_err("decoding must fail");
    assert_eq!(error.to_string(), "missing required field 'gas'");
}

#[test]
fn nonce_selects_deposit_representation() -> anyhow::Result<()> {
    let deposit = |nonce: Option<serde_json::Value>| -> anyhow::Result<OpTransaction> {
        let mut object = serde_json::json!({
            "type": "0x7e",
            "gas": "0x5208",
            "value": "0x0",
            "input": "0x",
            "from": "0x0000000000000000000000000000000000000001",
            "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000000001",
        });
        if let (Some(nonce), Some(fields)) = (nonce, object.as_object_mut()) {
            fields.insert("nonce".to_owned(), nonce);
        }

        Ok(decode(&serde_json::to_vec(&object)?)?)
    };

    let absent = deposit(None)?;
    let null = deposit(Some(serde_json::Value::Null))?;
    let present = deposit(Some(serde_json::json!("0x0")))?;

    assert!(matches!(absent, OpTransaction::Deposit(_)));
    assert!(matches!(null, OpTransaction::Deposit(_)));
    assert!(matches!(present, OpTransaction::DepositWithNonce(_)));

    assert_eq!(absent, null);
    assert_eq!(absent.transaction_hash(), present.transaction_hash());
    assert!(absent.data().is_empty());

    Ok(())
}

#[test]
fn system_transaction_alias() -> anyhow::Result<()> {
    let json = br#"{
        "type": "0x7e",
        "gas": "0x5208",
        "value": "0x0",
        "input": "0x",
        "isSystemTx": true,
        "from": "0x0000000000000000000000000000000000000001",
        "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000000001"
    }"#;

    let transaction = decode(json)?;
    assert_eq!(transaction.is_system_transaction(), Ok(true));

    let encoded: serde_json::Value = serde_json::from_slice(&encode(&transaction)?)?;
    assert_eq!(encoded["isSystemTransaction"], serde_json::json!(true));

    Ok(())
}

#[test]
fn encoded_deposit_fields() -> anyhow::Result<()> {
    let transaction = OpTransaction::from(Deposit::new(DepositArgs {
        source_hash: b256!("0000000000000000000000000000000000000000000000000000000000001234"),
        mint: U256::from(34),
        gas_limit: 1_000_000,
        ..DepositArgs::default()
    }));

    let encoded: serde_json::Value = serde_json::from_slice(&encode(&transaction)?)?;
    assert_eq!(
        encoded,
        serde_json::json!({
            "type": "0x7e",
            "to": null,
            "gas": "0xf4240",
            "value": "0x0",
            "input": "0x",
            "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000001234",
            "from": "0x0000000000000000000000000000000000000000",
            "mint": "0x22",
            "isSystemTransaction": false,
            "hash": transaction.transaction_hash().to_string(),
        })
    );

    Ok(())
}

#[test]
fn unexecuted_deposit_with_nonce_encodes_as_base_deposit() -> anyhow::Result<()> {
    let base = OpTransaction::from(Deposit::new(DepositArgs {
        source_hash: b256!("0000000000000000000000000000000000000000000000000000000000001234"),
        from: address!("deaddeaddeaddeaddeaddeaddeaddeaddead0001"),
        mint: U256::from(34),
        gas_limit: 1_000_000,
        ..DepositArgs::default()
    }));
    let unexecuted = base.clone().into_deposit_with_nonce();
    assert!(matches!(unexecuted, OpTransaction::DepositWithNonce(_)));

    let json = encode(&unexecuted)?;
    assert_eq!(json, encode(&base)?);

    let decoded = decode(&json)?;
    assert!(matches!(decoded, OpTransaction::Deposit(_)));
    assert_eq!(decoded, base);
    assert_eq!(decoded.transaction_hash(), unexecuted.transaction_hash());

    Ok(())
}

#[test]
fn wide_deposit_receipt_version() -> anyhow::Result<()> {
    let json = br#"{
        "type": "0x7e",
        "gas": "0x5208",
        "value": "0x0",
        "input": "0x",
        "nonce": "0x1",
        "depositReceiptVersion": "0x100",
        "from": "0x0000000000000000000000000000000000000001",
        "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000000001"
    }"#;

    let transaction = decode(json)?;
    assert_eq!(transaction.deposit_receipt_version(), Ok(Some(0x100)));

    let encoded: serde_json::Value = serde_json::from_slice(&encode(&transaction)?)?;
    assert_eq!(encoded["depositReceiptVersion"], serde_json::json!("0x100"));

    Ok(())
}

#[test]
fn both_system_transaction_spellings_are_rejected() {
    let json = br#"{
        "type": "0x7e",
        "gas": "0x5208",
        "value": "0x0",
        "input": "0x",
        "isSystemTx": true,
        "isSystemTransaction": false,
        "from": "0x0000000000000000000000000000000000000001",
        "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000000001"
    }"#;

    let error = decode(json).expect_err("the same field occurs twice");
    assert!(matches!(error, DecodeError::Malformed(_)));
    assert!(
        error.to_string().contains("duplicate field"),
        "unexpected error: {error}"
    );
}
