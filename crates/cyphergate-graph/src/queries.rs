//! Read path: run a query in a read-mode transaction that is rolled back
//! after every row has been pulled.

use neo4rs::Operation;

use cyphergate_core::{Query, Record};

use crate::client::{GraphClient, GraphError};
use crate::convert::{row_to_record, to_neo4j_query};

impl GraphClient {
    /// Execute a read query and materialize all records.
    ///
    /// The transaction is opened in READ access mode, so the server refuses
    /// any statement that tries to write, and it is never committed. If the
    /// future is dropped mid-stream the transaction is abandoned uncommitted.
    pub async fn read_records(&self, query: &Query) -> Result<Vec<Record>, GraphError> {
        let mut txn = self.inner().start_txn_as(Operation::Read, None).await?;
        let mut stream = txn.execute(to_neo4j_query(query)).await?;

        let mut records = Vec::new();
        while let Some(row) = stream.next(txn.handle()).await? {
            records.push(row_to_record(&row)?);
        }

        txn.rollback().await?;
        tracing::debug!(rows = records.len(), database = %self.database(), "Read transaction closed");
        Ok(records)
    }
}
