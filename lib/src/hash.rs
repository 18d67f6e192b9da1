use hex::FromHex;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::{ParamsError, Result};
use crate::U256;

#[derive(
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub struct Hash(U256);

impl Hash {
    // parse a hash from its 64 character big-endian hex form,
    // the same form Display prints
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = <[u8; 32]>::from_hex(hex_str)
            .map_err(|_| ParamsError::InvalidHash)?;

        Ok(Hash(U256::from_big_endian(&bytes)))
    }

    // zero hash
    pub fn zero() -> Self {
        Hash(U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_little_endian(&mut bytes);
        bytes
    }
}

impl From<U256> for Hash {
    fn from(value: U256) -> Self {
        Hash(value)
    }
}

impl FromStr for Hash {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self> {
        Hash::from_hex(s)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        write!(f, "{}", hex::encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

    #[test]
    fn parses_and_displays_big_endian_hex() {
        let hash = Hash::from_hex(SAMPLE).unwrap();
        assert_eq!(hash.to_string(), SAMPLE);
        assert!(!hash.is_zero());
    }

    #[test]
    fn as_bytes_is_little_endian() {
        let hash = Hash::from_hex(SAMPLE).unwrap();
        let bytes = hash.as_bytes();
        assert_eq!(bytes[0], 0x3b);
        assert_eq!(bytes[31], 0x4a);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Hash::from_hex("abcd"), Err(ParamsError::InvalidHash));
        assert_eq!(
            Hash::from_hex(&"zz".repeat(32)),
            Err(ParamsError::InvalidHash)
        );
    }

    #[test]
    fn zero_hash_displays_padded() {
        assert_eq!(Hash::zero().to_string(), "0".repeat(64));
    }
}
