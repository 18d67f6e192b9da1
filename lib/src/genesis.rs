use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::Hash;
use crate::pow::CompactTarget;

/// The first block of a chain. Precomputed and shipped as a constant;
/// its digest lives next to it in `NetworkParameters::genesis_hash`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GenesisBlock {
    pub version: i32,
    /// Always the zero hash
    pub prev_block_hash: Hash,
    /// Merkle root of the coinbase transaction
    pub merkle_root: Hash,
    pub timestamp: DateTime<Utc>,
    /// Target of the block in compact form
    pub bits: CompactTarget,
    pub nonce: u32,
}

impl GenesisBlock {
    pub fn new(
        version: i32,
        merkle_root: Hash,
        timestamp: DateTime<Utc>,
        bits: CompactTarget,
        nonce: u32,
    ) -> Self {
        GenesisBlock {
            version,
            prev_block_hash: Hash::zero(),
            merkle_root,
            timestamp,
            bits,
            nonce,
        }
    }
}
