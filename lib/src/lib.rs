use serde::{Deserialize, Serialize};
use uint::construct_uint;

construct_uint! {
   // Construct an unsigned 256-bit integer
   // consisting of 4 x 64-bit words
   #[derive(Serialize, Deserialize)]
   pub struct U256(4);
}

// width of an HD extended key magic in bytes
pub const HD_KEY_ID_LEN: usize = 4;

/// Magic bytes prefixing a serialized BIP32 extended key.
pub type HdKeyId = [u8; HD_KEY_ID_LEN];

pub mod catalog;
pub mod difficulty;
pub mod error;
pub mod genesis;
pub mod hash;
pub mod mining;
pub mod params;
pub mod pow;
pub mod registry;

pub use catalog::{Catalog, Network};
pub use difficulty::DampeningWindow;
pub use error::ParamsError;
pub use params::{Checkpoint, NetworkMagic, NetworkParameters};
pub use registry::ParamsRegistry;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u256_parses_decimal_and_radix_strings() {
        assert_eq!(U256::from_dec_str("4096"), Ok(U256::from(4096u32)));
        assert_eq!(U256::from_str_radix("1000", 16).unwrap(), U256::from(4096u32));
        assert!(U256::from_dec_str("-1").is_err());
    }
}
