use std::fmt;

use alloy::primitives::{
    B256, U256,
    utils::{UnitsError, format_ether, parse_ether},
};

/// Amount of the auction currency, in wei.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(U256);

impl Price {
    pub const ZERO: Self = Self(U256::ZERO);

    pub fn new(value: U256) -> Self {
        Self(value)
    }

    /// Parses a decimal ether amount such as `"100"` or `"0.25"`.
    pub fn from_ether(value: &str) -> Result<Self, UnitsError> {
        parse_ether(value).map(Self)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", format_ether(self.0))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(U256);

impl TokenId {
    pub fn new(value: U256) -> Self {
        Self(value)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<u64> for TokenId {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProofHash(B256);

impl ProofHash {
    pub const ZERO: Self = Self(B256::ZERO);

    pub fn new(value: B256) -> Self {
        Self(value)
    }

    pub fn as_b256(&self) -> B256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == B256::ZERO
    }
}

impl fmt::Display for ProofHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_ether() {
        let hundred = Price::from_ether("100").expect("whole ether");
        assert_eq!(
            hundred.as_u256(),
            U256::from(100u64) * U256::from(1_000_000_000_000_000_000u64)
        );

        let quarter = Price::from_ether("0.25").expect("fractional ether");
        assert_eq!(quarter.as_u256(), U256::from(250_000_000_000_000_000u64));
    }

    #[test]
    fn rejects_garbage_prices() {
        assert!(Price::from_ether("ten").is_err());
    }

    #[test]
    fn zero_proof_is_zero() {
        assert!(ProofHash::ZERO.is_zero());
        assert!(!ProofHash::new(B256::repeat_byte(0x11)).is_zero());
    }
}
