use chrono::{DateTime, Utc};

use std::sync::Arc;

use crate::hash::Hash;

// minimum priority for a transaction to be considered high priority
pub const MIN_HIGH_PRIORITY: f64 = 0.0;

/// A transaction in a transaction source, with the metadata block
/// template assembly needs.
#[derive(Debug)]
pub struct TxDesc<T> {
    pub tx: Arc<T>,
    /// When the entry was added to the source
    pub added: DateTime<Utc>,
    /// Block height when the entry was added to the source
    pub height: u32,
    /// Total fee paid by the transaction
    pub fee: i64,
}

impl<T> Clone for TxDesc<T> {
    fn clone(&self) -> Self {
        TxDesc {
            tx: Arc::clone(&self.tx),
            added: self.added,
            height: self.height,
            fee: self.fee,
        }
    }
}

/// A source of transactions to consider for inclusion in new blocks,
/// usually the mempool. Every method must be safe to call concurrently.
pub trait TxSource: Send + Sync {
    type Tx;

    /// Last time a transaction was added to or removed from the source
    fn last_updated(&self) -> DateTime<Utc>;

    /// Descriptors for every transaction in the source
    fn mining_descs(&self) -> Vec<TxDesc<Self::Tx>>;

    /// Whether a transaction with this hash is in the source
    fn have_transaction(&self, hash: &Hash) -> bool;
}
