//! Index of the byte identifiers claimed by registered networks.
//!
//! A registry is filled once at startup and read from then on. Register
//! the built-ins with [`ParamsRegistry::from_catalog`], register any custom
//! networks, and then share the registry immutably (by reference or in an
//! `Arc`). Registration takes `&mut self`, so no lookup can run while a
//! registration is in progress.

use tracing::{debug, warn};

use std::collections::{HashMap, HashSet};

use crate::catalog::Catalog;
use crate::error::{ParamsError, Result};
use crate::params::{NetworkMagic, NetworkParameters};
use crate::HdKeyId;

#[derive(Clone, Debug, Default)]
pub struct ParamsRegistry {
    networks: HashSet<NetworkMagic>,
    pubkey_hash_prefixes: HashSet<u8>,
    script_hash_prefixes: HashSet<u8>,
    aztec_prefixes: HashSet<u8>,
    hd_private_to_public: HashMap<HdKeyId, HdKeyId>,
}

impl ParamsRegistry {
    pub fn new() -> Self {
        ParamsRegistry::default()
    }

    /// A registry holding every built-in network.
    ///
    /// # Panics
    ///
    /// If two built-ins share a magic, which `Catalog::build` rules out.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut registry = ParamsRegistry::new();
        for params in catalog.iter() {
            if let Err(e) = registry.register(params) {
                panic!("BUG: failed to register network: {}", e);
            }
        }
        registry
    }

    /// Register the parameters of a network.
    ///
    /// Fails with [`ParamsError::DuplicateNetwork`] if its magic is
    /// already registered, whether by a built-in or an earlier call.
    /// Address prefixes may be shared between networks. An aztec prefix
    /// of zero means the network has none and is not indexed. If the HD
    /// private magic is already mapped, the last registration wins.
    ///
    /// The parameters are not validated here, see
    /// [`NetworkParameters::validate`].
    pub fn register(&mut self, params: &NetworkParameters) -> Result<()> {
        if !self.networks.insert(params.network_magic) {
            warn!(
                network = %params.name,
                magic = %params.network_magic,
                "network already registered"
            );
            return Err(ParamsError::DuplicateNetwork(params.network_magic));
        }

        self.pubkey_hash_prefixes.insert(params.pubkey_hash_prefix);
        self.script_hash_prefixes.insert(params.script_hash_prefix);
        if params.aztec_prefix != 0 {
            self.aztec_prefixes.insert(params.aztec_prefix);
        }

        let previous = self
            .hd_private_to_public
            .insert(params.hd_private_magic, params.hd_public_magic);
        if let Some(previous) = previous {
            if previous != params.hd_public_magic {
                warn!(
                    network = %params.name,
                    private = %hex::encode(params.hd_private_magic),
                    previous = %hex::encode(previous),
                    "hd private key magic remapped"
                );
            }
        }

        debug!(
            network = %params.name,
            magic = %params.network_magic,
            "registered network"
        );
        Ok(())
    }

    pub fn is_registered(&self, magic: NetworkMagic) -> bool {
        self.networks.contains(&magic)
    }

    /// Whether `id` prefixes a pay-to-pubkey-hash address on any
    /// registered network. A byte can also be a script hash prefix, and
    /// telling the two apart is up to the caller.
    pub fn is_pubkey_hash_prefix(&self, id: u8) -> bool {
        self.pubkey_hash_prefixes.contains(&id)
    }

    /// Whether `id` prefixes a pay-to-script-hash address on any
    /// registered network. See [`Self::is_pubkey_hash_prefix`].
    pub fn is_script_hash_prefix(&self, id: u8) -> bool {
        self.script_hash_prefixes.contains(&id)
    }

    pub fn is_aztec_prefix(&self, id: u8) -> bool {
        self.aztec_prefixes.contains(&id)
    }

    /// Map an HD private extended key magic to the public magic of the
    /// same network.
    pub fn hd_private_to_public(&self, id: &[u8]) -> Result<HdKeyId> {
        let key: HdKeyId = id
            .try_into()
            .map_err(|_| ParamsError::UnknownHdKeyId)?;

        self.hd_private_to_public
            .get(&key)
            .copied()
            .ok_or(ParamsError::UnknownHdKeyId)
    }

    /// Number of registered networks
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Network;

    #[test]
    fn empty_registry_knows_nothing() {
        let registry = ParamsRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.is_pubkey_hash_prefix(0x00));
        assert!(!registry.is_script_hash_prefix(0x05));
        assert!(!registry.is_aztec_prefix(0x33));
        assert_eq!(
            registry.hd_private_to_public(&[0x04, 0x88, 0xad, 0xe4]),
            Err(ParamsError::UnknownHdKeyId)
        );
    }

    #[test]
    fn from_catalog_registers_all_builtins() {
        let catalog = Catalog::build();
        let registry = ParamsRegistry::from_catalog(&catalog);
        assert_eq!(registry.len(), 4);
        for params in catalog.iter() {
            assert!(registry.is_registered(params.network_magic));
        }
    }

    #[test]
    fn zero_aztec_prefix_is_not_indexed() {
        let catalog = Catalog::build();
        let mut registry = ParamsRegistry::new();
        registry.register(catalog.get(Network::Simnet)).unwrap();
        assert!(!registry.is_aztec_prefix(0));

        let registry = ParamsRegistry::from_catalog(&catalog);
        assert!(!registry.is_aztec_prefix(0));
        assert!(registry.is_aztec_prefix(0x33));
        assert!(registry.is_aztec_prefix(0x58));
    }

    #[test]
    fn last_hd_mapping_wins() {
        let catalog = Catalog::build();
        let mut registry = ParamsRegistry::from_catalog(&catalog);

        let mut custom = catalog.get(Network::Regtest).clone();
        custom.name = "override".to_owned();
        custom.network_magic = NetworkMagic(0xfeedface);
        custom.hd_public_magic = [0x04, 0x35, 0x87, 0xd0];
        registry.register(&custom).unwrap();

        assert_eq!(
            registry.hd_private_to_public(&[0x04, 0x35, 0x83, 0x94]),
            Ok([0x04, 0x35, 0x87, 0xd0])
        );
    }

    #[test]
    fn duplicate_registration_leaves_indexes_untouched() {
        let catalog = Catalog::build();
        let mut registry = ParamsRegistry::from_catalog(&catalog);

        let mut clash = catalog.get(Network::Mainnet).clone();
        clash.pubkey_hash_prefix = 0x99;
        clash.hd_private_magic = [0xde, 0xad, 0xbe, 0xef];

        assert_eq!(
            registry.register(&clash),
            Err(ParamsError::DuplicateNetwork(NetworkMagic(0xd9b4bef9)))
        );
        assert!(!registry.is_pubkey_hash_prefix(0x99));
        assert_eq!(
            registry.hd_private_to_public(&[0xde, 0xad, 0xbe, 0xef]),
            Err(ParamsError::UnknownHdKeyId)
        );
        assert_eq!(registry.len(), 4);
    }
}
