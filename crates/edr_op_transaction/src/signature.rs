use alloy_primitives::U256;

/// The ECDSA signature triple of a signed transaction, as it appears in JSON.
///
/// For legacy transactions `v` is the recovery id (27/28, or EIP-155
/// encoded). For typed transactions `v` holds the y-parity (0/1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    /// ECDSA signature r
    pub r: U256,
    /// ECDSA signature s
    pub s: U256,
    /// ECDSA recovery id or y-parity
    pub v: u64,
}

impl Signature {
    /// Returns whether the signature has odd Y parity.
    pub fn odd_y_parity(&self) -> bool {
        match self.v {
            1 | 28 => true,
            v if v >= 35 => (v - 35) % 2 == 1,
            _ => false,
        }
    }

    /// Returns the chain ID encoded in an EIP-155 `v` value, if any.
    pub fn eip155_chain_id(&self) -> Option<u64> {
        if self.v >= 35 {
            Some((self.v - 35) / 2)
        } else {
            None
        }
    }
}
