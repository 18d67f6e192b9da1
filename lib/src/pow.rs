use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::{ParamsError, Result};
use crate::U256;

// sign bit of the compact mantissa
const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// A proof of work target packed into 32 bits: the high byte is a
/// base-256 exponent, the low 23 bits the mantissa and bit 23 a sign.
#[derive(
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    Hash,
)]
pub struct CompactTarget(pub u32);

impl CompactTarget {
    /// Expand into the full 256-bit target. Returns `None` for
    /// negative encodings and for encodings that overflow 256 bits.
    pub fn to_target(self) -> Option<U256> {
        let exponent = self.0 >> 24;
        let mantissa = self.0 & MANTISSA_MASK;

        if mantissa != 0 && self.0 & SIGN_BIT != 0 {
            return None;
        }

        if mantissa != 0
            && (exponent > 34
                || (mantissa > 0xff && exponent > 33)
                || (mantissa > 0xffff && exponent > 32))
        {
            return None;
        }

        let target = if exponent <= 3 {
            U256::from(mantissa >> (8 * (3 - exponent)))
        } else {
            U256::from(mantissa) << (8 * (exponent - 3)) as usize
        };

        Some(target)
    }

    /// Pack a target, truncating it to the precision of the mantissa.
    pub fn from_target(target: U256) -> Self {
        if target.is_zero() {
            return CompactTarget(0);
        }

        let mut exponent = ((target.bits() + 7) / 8) as u32;
        let mut mantissa = if exponent <= 3 {
            target.low_u32() << (8 * (3 - exponent))
        } else {
            (target >> (8 * (exponent - 3)) as usize).low_u32()
        };

        // keep the sign bit clear
        if mantissa & SIGN_BIT != 0 {
            mantissa >>= 8;
            exponent += 1;
        }

        CompactTarget(exponent << 24 | mantissa)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

// parse a proof of work limit from its big-endian hex form
pub fn pow_limit_from_hex(hex_str: &str) -> Result<U256> {
    U256::from_str_radix(hex_str, 16)
        .map_err(|_| ParamsError::InvalidHex)
}
