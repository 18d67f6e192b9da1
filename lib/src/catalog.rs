//! The built-in networks.
//!
//! Every constant here is shipped with the software, so a malformed hex
//! literal or an inconsistent record is a packaging bug. `Catalog::build`
//! panics on those instead of returning an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ParamsError;
use crate::genesis::GenesisBlock;
use crate::hash::Hash;
use crate::params::{NetworkMagic, NetworkParameters};
use crate::pow::{pow_limit_from_hex, CompactTarget};
use crate::U256;

// 14 days
const TARGET_TIMESPAN: Duration =
    Duration::from_secs(14 * 24 * 60 * 60);
const TARGET_BLOCK_TIME: Duration = Duration::from_secs(60);
const MIN_DIFF_REDUCTION_TIME: Duration = Duration::from_secs(20 * 60);

// merkle root of the coinbase shared by every genesis block
const GENESIS_MERKLE_ROOT: &str =
    "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
// 2017-01-01T00:00:00Z
const GENESIS_TIMESTAMP: i64 = 1_483_228_800;

// compressed secp256k1 keys, in rotation order
const INITIAL_VALIDATOR_KEYS: [&str; 4] = [
    "035f5103852bd7d9c9c28e44caf1f7188941e16295062ca4c89928a8ccff993cd3",
    "0265de49399e78020026219492e2a6e1a41e93591b87220ae8a2f3ebf3473dbeef",
    "039cb94c99c4700918250c40fa35b7fa0a75a967c9366aa19b8fc354373368beef",
    "031337ab09070254638075c7b59643dce2d60c5260bf5841d2f8cc6f75f6790d4e",
];

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
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Regtest,
    Testnet3,
    Simnet,
}

impl Network {
    /// All built-in networks, in registration order.
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet3,
        Network::Regtest,
        Network::Simnet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Regtest => "regtest",
            Network::Testnet3 => "testnet3",
            Network::Simnet => "simnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|network| network.name() == s)
            .ok_or_else(|| ParamsError::UnknownNetwork(s.to_owned()))
    }
}

/// The validated parameters of every built-in network.
#[derive(Clone, Debug)]
pub struct Catalog {
    mainnet: NetworkParameters,
    regtest: NetworkParameters,
    testnet3: NetworkParameters,
    simnet: NetworkParameters,
}

impl Catalog {
    /// Build and check the four built-in records.
    ///
    /// # Panics
    ///
    /// If a hard-coded constant fails to parse, a record breaks one of
    /// the `NetworkParameters::validate` invariants or two built-ins share
    /// a network magic.
    pub fn build() -> Self {
        let catalog = Catalog {
            mainnet: mainnet_params(),
            regtest: regtest_params(),
            testnet3: testnet3_params(),
            simnet: simnet_params(),
        };

        for params in catalog.iter() {
            if let Err(e) = params.validate() {
                panic!(
                    "BUG: built-in network {} is invalid: {}",
                    params.name, e
                );
            }
            trace!(
                network = %params.name,
                magic = %params.network_magic,
                "built-in network checked"
            );
        }

        let magics: HashSet<NetworkMagic> = catalog
            .iter()
            .map(|params| params.network_magic)
            .collect();
        assert_eq!(
            magics.len(),
            Network::ALL.len(),
            "BUG: built-in networks share a network magic"
        );

        catalog
    }

    pub fn get(&self, network: Network) -> &NetworkParameters {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Regtest => &self.regtest,
            Network::Testnet3 => &self.testnet3,
            Network::Simnet => &self.simnet,
        }
    }

    /// Iterate the built-ins in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkParameters> {
        Network::ALL.into_iter().map(move |network| self.get(network))
    }
}

// parse a hard-coded hash, panicking since only a packaging bug can
// make it fail
fn hash_from_str(hex_str: &str) -> Hash {
    Hash::from_hex(hex_str).unwrap_or_else(|e| {
        panic!("BUG: bad hard-coded hash {hex_str}: {e}")
    })
}

fn pow_limit_from_str(hex_str: &str) -> U256 {
    pow_limit_from_hex(hex_str).unwrap_or_else(|e| {
        panic!("BUG: bad hard-coded pow limit {hex_str}: {e}")
    })
}

fn initial_validator_keys() -> Vec<Vec<u8>> {
    INITIAL_VALIDATOR_KEYS
        .iter()
        .map(|key| {
            hex::decode(key).unwrap_or_else(|e| {
                panic!("BUG: bad hard-coded validator key {key}: {e}")
            })
        })
        .collect()
}

fn genesis_block(bits: CompactTarget, nonce: u32) -> GenesisBlock {
    let timestamp: DateTime<Utc> =
        DateTime::from_timestamp(GENESIS_TIMESTAMP, 0)
            .expect("BUG: impossible");

    GenesisBlock::new(
        1,
        hash_from_str(GENESIS_MERKLE_ROOT),
        timestamp,
        bits,
        nonce,
    )
}

/// The main network.
pub fn mainnet_params() -> NetworkParameters {
    // 2^243 - 1
    let pow_limit = (U256::one() << 243) - U256::one();
    let pow_limit_compact = CompactTarget(0x1f07ffff);

    NetworkParameters {
        name: Network::Mainnet.name().to_owned(),
        network_magic: NetworkMagic(0xd9b4bef9),
        default_port: 7979,
        dns_seeds: vec![],

        genesis_block: genesis_block(pow_limit_compact, 0x2f5a),
        genesis_hash: hash_from_str(
            "00003ebbd23b7cca0929441e6672e0c1023d9e30c96aae7cd458cec3508dbfb6",
        ),
        initial_validator_keys: initial_validator_keys(),

        pow_limit,
        pow_limit_compact,
        coinbase_maturity: 100,
        subsidy_reduction_interval: 210_000,
        target_timespan: TARGET_TIMESPAN,
        target_block_time: TARGET_BLOCK_TIME,
        reduce_min_difficulty: false,
        min_diff_reduction_time: Duration::ZERO,
        generate_supported: false,

        checkpoints: vec![],

        // enforce at 75%, reject at 95%
        block_version_enforce_threshold: 750,
        block_version_reject_threshold: 950,
        block_version_sample_size: 1000,

        relay_nonstandard_txs: false,

        pubkey_hash_prefix: 0x00, // starts with 1
        script_hash_prefix: 0x05, // starts with 3
        aztec_prefix: 0x33,       // starts with G
        private_key_prefix: 0x80, // starts with 5 or K

        hd_private_magic: [0x04, 0x88, 0xad, 0xe4], // xprv
        hd_public_magic: [0x04, 0x88, 0xb2, 0x1e],  // xpub
        hd_coin_type: 0,

        averaging_window: 17,
        max_adjust_down_pct: 32,
        max_adjust_up_pct: 16,

        trailing_signer_limit: 2,
        window_share_limit_pct: 25,
    }
}

/// The regression test network. Not to be confused with testnet3.
pub fn regtest_params() -> NetworkParameters {
    let pow_limit_compact = CompactTarget(0x200f0f0f);

    NetworkParameters {
        name: Network::Regtest.name().to_owned(),
        network_magic: NetworkMagic(0xdab5bffa),
        default_port: 18444,
        dns_seeds: vec![],

        genesis_block: genesis_block(pow_limit_compact, 2),
        genesis_hash: hash_from_str(
            "0000de6916636afed81f8cfc8e3485a7fe9a7137089980a638903bdf72825d66",
        ),
        initial_validator_keys: initial_validator_keys(),

        pow_limit: pow_limit_from_str(
            "0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f",
        ),
        pow_limit_compact,
        coinbase_maturity: 100,
        subsidy_reduction_interval: 150,
        target_timespan: TARGET_TIMESPAN,
        target_block_time: TARGET_BLOCK_TIME,
        reduce_min_difficulty: true,
        min_diff_reduction_time: MIN_DIFF_REDUCTION_TIME,
        generate_supported: true,

        checkpoints: vec![],

        // enforce at 75%, reject at 95%
        block_version_enforce_threshold: 750,
        block_version_reject_threshold: 950,
        block_version_sample_size: 1000,

        relay_nonstandard_txs: true,

        pubkey_hash_prefix: 0x6f, // starts with m or n
        script_hash_prefix: 0xc4, // starts with 2
        aztec_prefix: 0x58,       // starts with T
        private_key_prefix: 0xef, // starts with 9 or c

        hd_private_magic: [0x04, 0x35, 0x83, 0x94], // tprv
        hd_public_magic: [0x04, 0x35, 0x87, 0xcf],  // tpub
        hd_coin_type: 1,

        averaging_window: 17,
        max_adjust_down_pct: 32,
        max_adjust_up_pct: 16,

        // no signer limits on regtest
        trailing_signer_limit: 0,
        window_share_limit_pct: 0,
    }
}

/// The public test network, version 3.
pub fn testnet3_params() -> NetworkParameters {
    let pow_limit_compact = CompactTarget(0x2007ffff);

    NetworkParameters {
        name: Network::Testnet3.name().to_owned(),
        network_magic: NetworkMagic(0x0709110b),
        default_port: 17979,
        dns_seeds: vec![],

        genesis_block: genesis_block(pow_limit_compact, 0x18aea41a),
        genesis_hash: hash_from_str(
            "0000cfe4502338e8ebc2a343448c3578dd4a4658c449255c2dcd34920625fbea",
        ),
        initial_validator_keys: initial_validator_keys(),

        pow_limit: pow_limit_from_str(
            "07ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        ),
        pow_limit_compact,
        coinbase_maturity: 100,
        subsidy_reduction_interval: 210_000,
        target_timespan: TARGET_TIMESPAN,
        target_block_time: TARGET_BLOCK_TIME,
        reduce_min_difficulty: true,
        min_diff_reduction_time: MIN_DIFF_REDUCTION_TIME,
        generate_supported: false,

        checkpoints: vec![],

        // enforce at 51%, reject at 75%
        block_version_enforce_threshold: 51,
        block_version_reject_threshold: 75,
        block_version_sample_size: 100,

        relay_nonstandard_txs: true,

        pubkey_hash_prefix: 0x6f, // starts with m or n
        script_hash_prefix: 0xc4, // starts with 2
        aztec_prefix: 0x58,       // starts with T
        private_key_prefix: 0xef, // starts with 9 or c

        hd_private_magic: [0x04, 0x35, 0x83, 0x94], // tprv
        hd_public_magic: [0x04, 0x35, 0x87, 0xcf],  // tpub
        hd_coin_type: 1,

        averaging_window: 17,
        max_adjust_down_pct: 64,
        max_adjust_up_pct: 64,

        trailing_signer_limit: 45,
        window_share_limit_pct: 50,
    }
}

/// The simulation test network, for private groups of nodes. It must
/// never carry DNS seeds or it would turn into another public testnet.
pub fn simnet_params() -> NetworkParameters {
    // 2^255 - 1
    let pow_limit = (U256::one() << 255) - U256::one();
    let pow_limit_compact = CompactTarget(0x207fffff);

    NetworkParameters {
        name: Network::Simnet.name().to_owned(),
        network_magic: NetworkMagic(0x12141c16),
        default_port: 18555,
        dns_seeds: vec![],

        genesis_block: genesis_block(pow_limit_compact, 0),
        genesis_hash: hash_from_str(
            "00001d10c305f0fa2e556eb4d02f8c596c6f21aa588832e40f1d795323b336ab",
        ),
        initial_validator_keys: initial_validator_keys(),

        pow_limit,
        pow_limit_compact,
        coinbase_maturity: 100,
        subsidy_reduction_interval: 210_000,
        target_timespan: TARGET_TIMESPAN,
        target_block_time: TARGET_BLOCK_TIME,
        reduce_min_difficulty: true,
        min_diff_reduction_time: MIN_DIFF_REDUCTION_TIME,
        generate_supported: true,

        checkpoints: vec![],

        // enforce at 51%, reject at 75%
        block_version_enforce_threshold: 51,
        block_version_reject_threshold: 75,
        block_version_sample_size: 100,

        relay_nonstandard_txs: true,

        pubkey_hash_prefix: 0x3f, // starts with S
        script_hash_prefix: 0x7b, // starts with s
        aztec_prefix: 0x00,       // unused
        private_key_prefix: 0x64, // starts with 4 or F

        hd_private_magic: [0x04, 0x20, 0xb9, 0x00], // sprv
        hd_public_magic: [0x04, 0x20, 0xbd, 0x3a],  // spub
        hd_coin_type: 115, // ASCII for s

        averaging_window: 17,
        max_adjust_down_pct: 32,
        max_adjust_up_pct: 16,

        trailing_signer_limit: 2,
        window_share_limit_pct: 25,
    }
}
