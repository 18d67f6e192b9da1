use serde::{Deserialize, Serialize};

use std::fmt;
use std::time::Duration;

use crate::difficulty::DampeningWindow;
use crate::error::{ParamsError, Result};
use crate::genesis::GenesisBlock;
use crate::hash::Hash;
use crate::pow::CompactTarget;
use crate::{HdKeyId, U256};

/// Magic bytes identifying a network on the wire. Unique per registered
/// network.
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
#[serde(transparent)]
pub struct NetworkMagic(pub u32);

impl NetworkMagic {
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for NetworkMagic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// A known good block. Checkpoints are ordered from oldest to newest.
#[derive(
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
)]
pub struct Checkpoint {
    pub height: u32,
    pub hash: Hash,
}

/// Everything that tells one network apart from another: consensus
/// constants, address and key encoding magics and the difficulty
/// averaging configuration.
#[derive(Clone, Debug)]
pub struct NetworkParameters {
    /// Human-readable identifier for the network
    pub name: String,
    pub network_magic: NetworkMagic,
    /// Default peer-to-peer port
    pub default_port: u16,
    pub dns_seeds: Vec<String>,

    pub genesis_block: GenesisBlock,
    pub genesis_hash: Hash,
    /// Keys allowed to produce blocks before any validator has been
    /// provisioned on chain. Order is significant.
    pub initial_validator_keys: Vec<Vec<u8>>,

    /// Highest allowed proof of work value for a block
    pub pow_limit: U256,
    /// `pow_limit` in compact form
    pub pow_limit_compact: CompactTarget,
    /// Blocks before a coinbase output can be spent
    pub coinbase_maturity: u16,
    pub subsidy_reduction_interval: u32,
    pub target_timespan: Duration,
    pub target_block_time: Duration,
    /// Allow the minimum difficulty once `min_diff_reduction_time` has
    /// passed without a block. Test networks only.
    pub reduce_min_difficulty: bool,
    pub min_diff_reduction_time: Duration,
    /// Whether CPU mining is allowed
    pub generate_supported: bool,

    pub checkpoints: Vec<Checkpoint>,

    // BIP34 super-majority upgrade rule
    pub block_version_enforce_threshold: u64,
    pub block_version_reject_threshold: u64,
    pub block_version_sample_size: u64,

    pub relay_nonstandard_txs: bool,

    // address encoding magics
    pub pubkey_hash_prefix: u8,
    pub script_hash_prefix: u8,
    /// First byte of an Aztec address, zero when unused
    pub aztec_prefix: u8,
    pub private_key_prefix: u8,

    // BIP32 extended key magics
    pub hd_private_magic: HdKeyId,
    pub hd_public_magic: HdKeyId,
    /// BIP44 coin type
    pub hd_coin_type: u32,

    /// Blocks in the moving difficulty averaging window
    pub averaging_window: u32,
    pub max_adjust_down_pct: u32,
    pub max_adjust_up_pct: u32,

    /// Consecutive trailing blocks allowed from one signing key
    pub trailing_signer_limit: u32,
    /// Share of the window one signing key may produce, as a percentage
    pub window_share_limit_pct: u32,
}

impl NetworkParameters {
    pub fn dampening(&self) -> DampeningWindow {
        DampeningWindow {
            averaging_window: self.averaging_window,
            target_block_time: self.target_block_time,
            max_adjust_down_pct: self.max_adjust_down_pct,
            max_adjust_up_pct: self.max_adjust_up_pct,
        }
    }

    pub fn averaging_window_timespan(&self) -> Duration {
        self.dampening().averaging_window_timespan()
    }

    pub fn max_actual_timespan(&self) -> Duration {
        self.dampening().max_actual_timespan()
    }

    pub fn min_actual_timespan(&self) -> Duration {
        self.dampening().min_actual_timespan()
    }

    /// Check the invariants every usable parameter set must hold.
    ///
    /// Registration does not call this; the built-in catalog asserts it
    /// and callers registering their own networks should too.
    pub fn validate(&self) -> Result<()> {
        if self.initial_validator_keys.is_empty() {
            return invalid("no initial validator keys");
        }

        if self.initial_validator_keys.iter().any(Vec::is_empty) {
            return invalid("empty initial validator key");
        }

        if self.coinbase_maturity == 0 {
            return invalid("coinbase maturity must be positive");
        }

        if self.subsidy_reduction_interval == 0 {
            return invalid(
                "subsidy reduction interval must be positive",
            );
        }

        if self
            .checkpoints
            .windows(2)
            .any(|pair| pair[0].height >= pair[1].height)
        {
            return invalid("checkpoints must strictly increase in height");
        }

        if self.block_version_enforce_threshold
            > self.block_version_reject_threshold
            || self.block_version_reject_threshold
                > self.block_version_sample_size
        {
            return invalid(
                "block version thresholds must satisfy \
                enforce <= reject <= sample size",
            );
        }

        match self.pow_limit_compact.to_target() {
            Some(target) if target <= self.pow_limit => {}
            Some(_) => {
                return invalid("compact pow limit exceeds pow limit")
            }
            None => return invalid("malformed compact pow limit"),
        }

        if self.averaging_window == 0 {
            return invalid("averaging window must be positive");
        }

        if self.target_block_time.is_zero() {
            return invalid("target block time must be positive");
        }

        // dampening bounds are computed in whole seconds
        if self.target_block_time.subsec_nanos() != 0 {
            return invalid("target block time must be whole seconds");
        }

        if self.max_adjust_down_pct > 100 || self.max_adjust_up_pct > 100
        {
            return invalid("adjustment percentages must be within 0..=100");
        }

        Ok(())
    }
}

fn invalid(reason: &str) -> Result<()> {
    Err(ParamsError::InvalidParameters(reason.to_owned()))
}
