use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use std::path::PathBuf;

use chaincfg::{Catalog, Network, NetworkParameters, ParamsRegistry};

mod config;
mod util;

use config::Config;
use util::{
    describe, generate_dummy_config, parse_byte, setup_panic_hook,
    setup_tracing,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Custom networks to register after the built-ins
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parameters of a built-in or custom network
    Show {
        #[arg(short, long, default_value = "mainnet")]
        network: String,
    },
    /// Check which address kinds a prefix byte is registered for
    CheckPrefix {
        #[arg(value_parser = parse_byte)]
        byte: u8,
    },
    /// Map an HD private key magic to its public magic
    HdPublic {
        /// Hex encoded magic, e.g. 0488ade4
        magic: String,
    },
    GenerateConfig {
        #[arg(short, long, value_name = "FILE", default_value_os_t = PathBuf::from("netparams.toml"))]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    setup_tracing()?;
    setup_panic_hook();

    let cli = Cli::parse();

    if let Commands::GenerateConfig { output } = &cli.command {
        debug!("Generating dummy config at: {:?}", output);
        return generate_dummy_config(output);
    }

    let catalog = Catalog::build();
    let mut registry = ParamsRegistry::from_catalog(&catalog);
    info!("Registered {} built-in networks", registry.len());

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let custom_networks =
        config.register_into(&catalog, &mut registry)?;

    // read-only from here on
    let registry = registry;

    match cli.command {
        Commands::Show { network } => {
            let params =
                find_network(&catalog, &custom_networks, &network)?;
            println!("{}", describe(params));
        }
        Commands::CheckPrefix { byte } => {
            println!("prefix {:#04x}", byte);
            println!(
                "  pubkey hash: {}",
                registry.is_pubkey_hash_prefix(byte)
            );
            println!(
                "  script hash: {}",
                registry.is_script_hash_prefix(byte)
            );
            println!("  aztec:       {}", registry.is_aztec_prefix(byte));
        }
        Commands::HdPublic { magic } => {
            let private = hex::decode(&magic)
                .with_context(|| format!("invalid hex {magic:?}"))?;
            let public = registry.hd_private_to_public(&private)?;
            println!("{}", hex::encode(public));
        }
        // handled before any config is loaded
        Commands::GenerateConfig { .. } => {}
    }

    Ok(())
}

fn find_network<'a>(
    catalog: &'a Catalog,
    custom_networks: &'a [NetworkParameters],
    name: &str,
) -> Result<&'a NetworkParameters> {
    if let Ok(network) = name.parse::<Network>() {
        return Ok(catalog.get(network));
    }

    custom_networks
        .iter()
        .find(|params| params.name == name)
        .ok_or_else(|| anyhow!("unknown network {name:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "netparams",
            "show",
            "--config",
            "custom.toml",
            "--network",
            "devnet",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Commands::Show { network } if network == "devnet"
        ));
    }

    #[test]
    fn config_is_accepted_before_the_subcommand() {
        let cli =
            Cli::try_parse_from(["netparams", "-c", "custom.toml", "check-prefix", "0x6f"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::CheckPrefix { byte: 0x6f }));
    }
}
