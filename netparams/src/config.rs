use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use std::fs;
use std::path::Path;

use chaincfg::{
    Catalog, HdKeyId, Network, NetworkMagic, NetworkParameters,
    ParamsRegistry,
};

/// A network derived from one of the built-ins. Everything not listed
/// here is inherited from `base`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CustomNetwork {
    pub name: String,
    pub base: Network,
    pub magic: NetworkMagic,
    pub pubkey_hash_prefix: u8,
    pub script_hash_prefix: u8,
    /// Zero when the network has no Aztec addresses
    #[serde(default)]
    pub aztec_prefix: u8,
    pub private_key_prefix: u8,
    #[serde(with = "hex")]
    pub hd_private_magic: HdKeyId,
    #[serde(with = "hex")]
    pub hd_public_magic: HdKeyId,
    pub hd_coin_type: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_port: Option<u16>,
}

impl CustomNetwork {
    /// Build the full parameter set on top of the base network.
    pub fn to_params(&self, catalog: &Catalog) -> NetworkParameters {
        let mut params = catalog.get(self.base).clone();
        params.name = self.name.clone();
        params.network_magic = self.magic;
        params.pubkey_hash_prefix = self.pubkey_hash_prefix;
        params.script_hash_prefix = self.script_hash_prefix;
        params.aztec_prefix = self.aztec_prefix;
        params.private_key_prefix = self.private_key_prefix;
        params.hd_private_magic = self.hd_private_magic;
        params.hd_public_magic = self.hd_public_magic;
        params.hd_coin_type = self.hd_coin_type;
        if let Some(port) = self.default_port {
            params.default_port = port;
        }
        params
    }
}

/// Store the configuration of the tool.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub custom_networks: Vec<CustomNetwork>,
}

impl Config {
    /// Load the configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading config from: {:?}", path);
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read config {}", path.display())
        })?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| {
                format!("failed to parse config {}", path.display())
            })?;
        Ok(config)
    }

    /// Validate and register every custom network, in file order.
    /// Returns the registered parameter sets.
    pub fn register_into(
        &self,
        catalog: &Catalog,
        registry: &mut ParamsRegistry,
    ) -> Result<Vec<NetworkParameters>> {
        let mut registered = Vec::with_capacity(self.custom_networks.len());

        for custom in &self.custom_networks {
            debug!("Registering custom network: {}", custom.name);
            // built-in names always win the lookup by name
            if custom.name.parse::<Network>().is_ok() {
                bail!(
                    "custom network {} shadows a built-in network",
                    custom.name
                );
            }
            let params = custom.to_params(catalog);
            params.validate().with_context(|| {
                format!("custom network {} is invalid", custom.name)
            })?;
            registry.register(&params).with_context(|| {
                format!("cannot register custom network {}", custom.name)
            })?;
            registered.push(params);
        }

        info!("Registered {} custom network(s)", registered.len());
        Ok(registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[custom_networks]]
name = "devnet"
base = "regtest"
magic = 0xfeedbeef
pubkey_hash_prefix = 0x1e
script_hash_prefix = 0x16
private_key_prefix = 0x9e
hd_private_magic = "02fac398"
hd_public_magic = "02facafd"
hd_coin_type = 3
default_port = 19444
"#;

    #[test]
    fn parses_custom_networks() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.custom_networks.len(), 1);

        let custom = &config.custom_networks[0];
        assert_eq!(custom.base, Network::Regtest);
        assert_eq!(custom.magic, NetworkMagic(0xfeedbeef));
        assert_eq!(custom.aztec_prefix, 0);
        assert_eq!(custom.hd_private_magic, [0x02, 0xfa, 0xc3, 0x98]);
    }

    #[test]
    fn custom_network_inherits_from_base() {
        let catalog = Catalog::build();
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let params = config.custom_networks[0].to_params(&catalog);
        let base = catalog.get(Network::Regtest);

        assert_eq!(params.name, "devnet");
        assert_eq!(params.default_port, 19444);
        assert_eq!(params.pow_limit, base.pow_limit);
        assert_eq!(params.subsidy_reduction_interval, 150);
        assert_eq!(params.genesis_hash, base.genesis_hash);
    }

    #[test]
    fn registers_after_builtins() {
        let catalog = Catalog::build();
        let mut registry = ParamsRegistry::from_catalog(&catalog);
        let config: Config = toml::from_str(SAMPLE).unwrap();

        let registered =
            config.register_into(&catalog, &mut registry).unwrap();
        assert_eq!(registered.len(), 1);
        assert!(registry.is_pubkey_hash_prefix(0x1e));
        assert_eq!(
            registry.hd_private_to_public(&[0x02, 0xfa, 0xc3, 0x98]).unwrap(),
            [0x02, 0xfa, 0xca, 0xfd]
        );

        // a second pass collides with itself
        assert!(config.register_into(&catalog, &mut registry).is_err());
    }

    #[test]
    fn rejects_custom_network_with_builtin_magic() {
        let catalog = Catalog::build();
        let mut registry = ParamsRegistry::from_catalog(&catalog);
        let config: Config =
            toml::from_str(&SAMPLE.replace("0xfeedbeef", "0xd9b4bef9"))
                .unwrap();

        let err = config
            .register_into(&catalog, &mut registry)
            .unwrap_err();
        assert!(err.to_string().contains("devnet"));
        assert!(!registry.is_pubkey_hash_prefix(0x1e));
    }

    #[test]
    fn rejects_custom_network_named_after_builtin() {
        let catalog = Catalog::build();
        let mut registry = ParamsRegistry::from_catalog(&catalog);
        let config: Config = toml::from_str(
            &SAMPLE.replace("name = \"devnet\"", "name = \"testnet3\""),
        )
        .unwrap();

        let err = config
            .register_into(&catalog, &mut registry)
            .unwrap_err();
        assert!(err.to_string().contains("shadows a built-in"));
        assert!(!registry.is_registered(NetworkMagic(0xfeedbeef)));
    }

    #[test]
    fn empty_file_has_no_networks() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.custom_networks.is_empty());
    }
}
