use thiserror::Error;

use crate::params::NetworkMagic;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// The network magic is already claimed by a registered network
    #[error("duplicate network {0}")]
    DuplicateNetwork(NetworkMagic),
    /// The bytes are not a registered HD private extended key magic
    #[error("unknown hd private extended key bytes")]
    UnknownHdKeyId,
    #[error("Invalid hash")]
    InvalidHash,
    #[error("Invalid hex string")]
    InvalidHex,
    #[error("Invalid network parameters: {0}")]
    InvalidParameters(String),
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

pub type Result<T> = std::result::Result<T, ParamsError>;
