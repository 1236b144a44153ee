//! The capability the executor needs from a graph database.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{MutationSummary, Query, Record};

/// Transactional access to a graph store scoped to one logical database.
///
/// Implementations must be safe to share across concurrent calls; each
/// method opens and closes its own transaction.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Run `query` in a transaction that is never committed and return every
    /// record, fully materialized.
    async fn execute_read(&self, query: &Query) -> Result<Vec<Record>>;

    /// Run `query` in a transaction, commit it, and return the counters.
    async fn execute_write(&self, query: &Query) -> Result<MutationSummary>;

    /// Trivial round trip used by the startup connectivity check.
    async fn ping(&self) -> Result<()> {
        self.execute_read(&Query::new("RETURN 1")).await.map(|_| ())
    }
}
