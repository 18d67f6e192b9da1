use anyhow::{anyhow, Result};

use std::panic;
use std::path::Path;

use tracing::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chaincfg::{Network, NetworkMagic, NetworkParameters};

use crate::config::{Config, CustomNetwork};

/// Initialize tracing to log to stderr, at info unless RUST_LOG says
/// otherwise
pub fn setup_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    Ok(())
}

/// Make sure tracing is able to log panics, including catalog
/// construction faults
pub fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let backtrace =
            std::backtrace::Backtrace::force_capture();
        error!("Application panicked!");
        error!("Panic info: {:?}", panic_info);
        error!("Backtrace: {:?}", backtrace);
    }));
}

/// Generate a dummy config
pub fn generate_dummy_config(path: &Path) -> Result<()> {
    let dummy_config = Config {
        custom_networks: vec![CustomNetwork {
            name: "devnet".to_string(),
            base: Network::Regtest,
            magic: NetworkMagic(0xfeedbeef),
            pubkey_hash_prefix: 0x1e,
            script_hash_prefix: 0x16,
            aztec_prefix: 0,
            private_key_prefix: 0x9e,
            hd_private_magic: [0x02, 0xfa, 0xc3, 0x98],
            hd_public_magic: [0x02, 0xfa, 0xca, 0xfd],
            hd_coin_type: 3,
            default_port: Some(19444),
        }],
    };

    let config_str = toml::to_string_pretty(&dummy_config)?;
    std::fs::write(path, config_str)?;
    info!("Dummy config generated at: {}", path.display());
    Ok(())
}

/// Parse a byte given either as decimal or as 0x-prefixed hex
pub fn parse_byte(s: &str) -> Result<u8> {
    let parsed = match s.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| anyhow!("invalid byte {s:?}: {e}"))
}

/// Human readable summary of a parameter set
pub fn describe(params: &NetworkParameters) -> String {
    let dampening = params.dampening();

    let lines = [
        format!("name:                 {}", params.name),
        format!("magic:                {}", params.network_magic),
        format!("default port:         {}", params.default_port),
        format!("genesis hash:         {}", params.genesis_hash),
        format!(
            "genesis time:         {}",
            params.genesis_block.timestamp
        ),
        format!(
            "validator keys:       {}",
            params.initial_validator_keys.len()
        ),
        format!("pow limit:            {:#x}", params.pow_limit),
        format!("pow limit (compact):  {}", params.pow_limit_compact),
        format!("coinbase maturity:    {}", params.coinbase_maturity),
        format!(
            "target block time:    {}s",
            params.target_block_time.as_secs()
        ),
        format!(
            "reduce min diff:      {}",
            params.reduce_min_difficulty
        ),
        format!(
            "upgrade thresholds:   {}/{}/{}",
            params.block_version_enforce_threshold,
            params.block_version_reject_threshold,
            params.block_version_sample_size
        ),
        format!(
            "prefixes:             p2pkh={:#04x} p2sh={:#04x} \
            aztec={:#04x} wif={:#04x}",
            params.pubkey_hash_prefix,
            params.script_hash_prefix,
            params.aztec_prefix,
            params.private_key_prefix
        ),
        format!(
            "hd magics:            prv={} pub={} coin type={}",
            hex::encode(params.hd_private_magic),
            hex::encode(params.hd_public_magic),
            params.hd_coin_type
        ),
        format!(
            "averaging window:     {} blocks ({}s)",
            params.averaging_window,
            dampening.averaging_window_timespan().as_secs()
        ),
        format!(
            "actual timespan:      {}s..={}s (up {}%, down {}%)",
            dampening.min_actual_timespan().as_secs(),
            dampening.max_actual_timespan().as_secs(),
            params.max_adjust_up_pct,
            params.max_adjust_down_pct
        ),
        format!(
            "signer limits:        trailing={} window share={}%",
            params.trailing_signer_limit, params.window_share_limit_pct
        ),
    ];

    lines.join("\n")
}
