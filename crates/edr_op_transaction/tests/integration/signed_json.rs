use alloy_primitives::{address, bytes, keccak256};
use edr_op_transaction::{
    decode, decode_with_config, encode,
    rpc::ConversionError,
    transaction::signed::{Eip1559, Eip1559Args},
    CodecConfig, DecodeError, HashCheck, OpTransaction, OpTransactionType, TransactionData as _,
    TxKind, B256, U256,
};

// Source: <https://eips.ethereum.org/EIPS/eip-155#example>
const EIP155_EXAMPLE: &[u8] = br#"{
    "nonce": "0x9",
    "gasPrice": "0x4a817c800",
    "gas": "0x5208",
    "to": "0x3535353535353535353535353535353535353535",
    "value": "0xde0b6b3a7640000",
    "input": "0x",
    "v": "0x25",
    "r": "0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276",
    "s": "0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
}"#;

#[test]
fn untyped_object_decodes_as_legacy() -> anyhow::Result<()> {
    let transaction = decode(EIP155_EXAMPLE)?;

    let OpTransaction::Legacy(legacy) = &transaction else {
        panic!("expected a legacy transaction, got {transaction:?}");
    };
    let expected = bytes!(
        "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83"
    );
    assert_eq!(legacy.rlp_encoding(), expected);
    assert_eq!(*transaction.transaction_hash(), keccak256(&expected));
    assert_eq!(transaction.chain_id(), Ok(1));
    assert_eq!(
        transaction.to(),
        Some(address!("3535353535353535353535353535353535353535"))
    );

    Ok(())
}

#[test]
fn legacy_encoding_includes_derived_chain_id() -> anyhow::Result<()> {
    let transaction = decode(EIP155_EXAMPLE)?;

    let encoded: serde_json::Value = serde_json::from_slice(&encode(&transaction)?)?;
    assert_eq!(encoded["type"], serde_json::json!("0x0"));
    assert_eq!(encoded["chainId"], serde_json::json!("0x1"));
    assert_eq!(encoded["v"], serde_json::json!("0x25"));
    assert_eq!(
        encoded["hash"],
        serde_json::json!(transaction.transaction_hash().to_string())
    );
    assert!(encoded.get("yParity").is_none());
    assert!(encoded.get("sourceHash").is_none());

    Ok(())
}

#[test]
fn unsupported_type() {
    let error = decode(br#"{"type":"0x3"}"#).expect_err("blob transactions are not supported");

    assert!(matches!(
        error,
        DecodeError::Conversion(ConversionError::UnsupportedType(0x03))
    ));
    assert_eq!(error.to_string(), "unsupported transaction type: 0x03");
}

#[test]
fn dynamic_fee_defaults() -> anyhow::Result<()> {
    let json = br#"{
        "type": "0x2",
        "chainId": "0xa",
        "nonce": "0x0",
        "maxPriorityFeePerGas": "0x3e8",
        "maxFeePerGas": "0x77359400",
        "gas": "0x186a0",
        "value": "0x0",
        "v": "0x1",
        "r": "0x1",
        "s": "0x2",
        "yParity": "0x0"
    }"#;

    let transaction = decode(json)?;
    let expected = OpTransaction::from(Eip1559::new(Eip1559Args {
        chain_id: 10,
        nonce: 0,
        max_priority_fee_per_gas: 1_000,
        max_fee_per_gas: 2_000_000_000,
        gas_limit: 100_000,
        kind: TxKind::Create,
        value: U256::ZERO,
        signature: edr_op_transaction::signature::Signature {
            r: U256::from(1),
            s: U256::from(2),
            v: 1,
        },
        ..Eip1559Args::default()
    }));

    assert_eq!(transaction, expected);
    assert_eq!(transaction.transaction_type(), OpTransactionType::Eip1559);
    assert_eq!(transaction.access_list(), Ok(&[][..]));

    // `v` is authoritative; `yParity` is rewritten from it.
    let encoded: serde_json::Value = serde_json::from_slice(&encode(&transaction)?)?;
    assert_eq!(encoded["yParity"], serde_json::json!("0x1"));
    assert_eq!(encoded["input"], serde_json::json!("0x"));
    assert_eq!(encoded["accessList"], serde_json::json!([]));

    Ok(())
}

#[test]
fn access_list_transaction_requires_chain_id() {
    let json = br#"{
        "type": "0x1",
        "nonce": "0x0",
        "gasPrice": "0x1",
        "gas": "0x5208",
        "value": "0x0",
        "v": "0x0",
        "r": "0x1",
        "s": "0x1"
    }"#;

    let error = decode(json).expect_err("chain ID is required");
    assert_eq!(error.to_string(), "missing required field 'chainId'");
}

#[test]
fn hash_verification() -> anyhow::Result<()> {
    let config = CodecConfig {
        hash_check: HashCheck::Verify,
        ..CodecConfig::default()
    };

    let transaction = decode(EIP155_EXAMPLE)?;
    let encoded = encode(&transaction)?;
    assert_eq!(decode_with_config(&encoded, &config)?, transaction);

    let mut tampered: serde_json::Value = serde_json::from_slice(&encoded)?;
    tampered["hash"] = serde_json::json!(B256::ZERO.to_string());
    let tampered = serde_json::to_vec(&tampered)?;

    // Lenient by default
    assert_eq!(decode(&tampered)?, transaction);

    let error = decode_with_config(&tampered, &config).expect_err("hash mismatch");
    assert!(matches!(
        error,
        DecodeError::Conversion(ConversionError::HashMismatch { .. })
    ));

    Ok(())
}

#[test]
fn configured_untyped_default() -> anyhow::Result<()> {
    let config: CodecConfig = serde_json::from_str(r#"{"untypedTransactionType":"0x7e"}"#)?;

    let json = br#"{
        "gas": "0x5208",
        "value": "0x0",
        "input": "0x",
        "from": "0x0000000000000000000000000000000000000001",
        "sourceHash": "0x0000000000000000000000000000000000000000000000000000000000000001"
    }"#;

    let transaction = decode_with_config(json, &config)?;
    assert!(transaction.is_deposit());

    let error = decode(json).expect_err("not a valid legacy transaction");
    assert_eq!(error.to_string(), "missing required field 'nonce'");

    Ok(())
}

#[test]
fn legacy_contract_creation_round_trip() -> anyhow::Result<()> {
    let json = br#"{
        "type": "0x0",
        "nonce": "0x1",
        "gasPrice": "0x1",
        "gas": "0x186a0",
        "to": null,
        "value": "0x0",
        "input": "0x6080604052",
        "v": "0x1b",
        "r": "0x1",
        "s": "0x1"
    }"#;

    let transaction = decode(json)?;
    assert_eq!(transaction.kind(), TxKind::Create);
    assert!(transaction.chain_id().is_err());
    assert!(matches!(transaction, OpTransaction::Legacy(_)));

    let encoded: serde_json::Value = serde_json::from_slice(&encode(&transaction)?)?;
    assert_eq!(encoded["to"], serde_json::Value::Null);
    assert!(encoded.get("chainId").is_none());

    assert_eq!(decode(&serde_json::to_vec(&encoded)?)?, transaction);

    Ok(())
}
