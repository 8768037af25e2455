use std::fmt;

use alloy_primitives::U8;

use super::{signed, OpTransactionType};

impl From<OpTransactionType> for u8 {
    fn from(t: OpTransactionType) -> u8 {
        t as u8
    }
}

impl fmt::Display for OpTransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpTransactionType::Legacy => "legacy",
            OpTransactionType::Eip2930 => "EIP-2930",
            OpTransactionType::Eip1559 => "EIP-1559",
            OpTransactionType::Deposit => "deposit",
        };

        f.write_str(name)
    }
}

impl TryFrom<u8> for OpTransactionType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            signed::Legacy::TYPE => Ok(Self::Legacy),
            signed::Eip2930::TYPE => Ok(Self::Eip2930),
            signed::Eip1559::TYPE => Ok(Self::Eip1559),
            signed::Deposit::TYPE => Ok(Self::Deposit),
            value => Err(value),
        }
    }
}

impl<'deserializer> serde::Deserialize<'deserializer> for OpTransactionType {
    fn deserialize<D>(deserializer: D) -> Result<OpTransactionType, D::Error>
    where
        D: serde::Deserializer<'deserializer>,
    {
        let value = U8::deserialize(deserializer)?;
        OpTransactionType::try_from(value.to::<u8>()).map_err(|r#type| {
            serde::de::Error::custom(format!("unsupported transaction type: {type:#04x}"))
        })
    }
}

impl serde::Serialize for OpTransactionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        U8::serialize(&U8::from(u8::from(*self)), serializer)
    }
}
