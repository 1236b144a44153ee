//! Write path: run a query in a committed transaction and report the
//! server's update counters.

use neo4rs::summary::Counters;

use cyphergate_core::{MutationSummary, Query};

use crate::client::{GraphClient, GraphError};
use crate::convert::to_neo4j_query;

impl GraphClient {
    /// Execute a write query and commit it.
    ///
    /// Nothing is committed unless the statement itself succeeds; a dropped
    /// future leaves the transaction uncommitted.
    pub async fn write_summary(&self, query: &Query) -> Result<MutationSummary, GraphError> {
        let mut txn = self.inner().start_txn().await?;
        let result = txn.run(to_neo4j_query(query)).await?;
        txn.commit().await?;

        let summary = counters_to_summary(result.stats());
        tracing::debug!(?summary, database = %self.database(), "Write transaction committed");
        Ok(summary)
    }
}

fn counters_to_summary(stats: &Counters) -> MutationSummary {
    MutationSummary {
        nodes_created: stats.nodes_created,
        nodes_deleted: stats.nodes_deleted,
        relationships_created: stats.relationships_created,
        relationships_deleted: stats.relationships_deleted,
        properties_set: stats.properties_set,
        labels_added: stats.labels_added,
        labels_removed: stats.labels_removed,
        indexes_added: stats.indexes_added,
        indexes_removed: stats.indexes_removed,
        constraints_added: stats.constraints_added,
        constraints_removed: stats.constraints_removed,
        system_updates: stats.system_updates,
        contains_updates: false,
    }
    .finalize()
}
