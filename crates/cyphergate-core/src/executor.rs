//! Intent-checked execution of a single query.

use std::sync::Arc;

use crate::classify::classify;
use crate::error::{GatewayError, Result};
use crate::store::GraphStore;
use crate::types::{ExecutionResult, MutationSummary, Query, QueryIntent, Record};

/// Runs queries against the store after checking the declared intent.
///
/// Clone is cheap (inner Arc). Nothing is retried: a failure from the store
/// is returned as-is to the caller.
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn GraphStore>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Execute `query` under `intent`.
    ///
    /// The query text is classified first; a mismatch fails with
    /// [`GatewayError::Classification`] before the store is contacted.
    pub async fn execute(&self, query: &Query, intent: QueryIntent) -> Result<ExecutionResult> {
        let actual = classify(query.text());
        if actual != intent {
            tracing::warn!(expected = %intent, %actual, "Query intent mismatch");
            return Err(GatewayError::Classification {
                expected: intent,
                actual,
            });
        }

        match intent {
            QueryIntent::Read => {
                let records = self.store.execute_read(query).await.inspect_err(|e| {
                    tracing::warn!(error = %e, "Read query failed");
                })?;
                tracing::debug!(rows = records.len(), "Read query completed");
                Ok(ExecutionResult::Records(records))
            }
            QueryIntent::Write => {
                let summary = self.store.execute_write(query).await.inspect_err(|e| {
                    tracing::warn!(error = %e, "Write query failed");
                })?;
                tracing::debug!(?summary, "Write query committed");
                Ok(ExecutionResult::Summary(summary))
            }
        }
    }

    /// Execute a read and return its records.
    pub async fn read(&self, query: &Query) -> Result<Vec<Record>> {
        match self.execute(query, QueryIntent::Read).await? {
            ExecutionResult::Records(records) => Ok(records),
            ExecutionResult::Summary(_) => Err(GatewayError::Store(
                "store returned counters for a read query".to_string(),
            )),
        }
    }

    /// Execute a write and return its counters.
    pub async fn write(&self, query: &Query) -> Result<MutationSummary> {
        match self.execute(query, QueryIntent::Write).await? {
            ExecutionResult::Summary(summary) => Ok(summary),
            ExecutionResult::Records(_) => Err(GatewayError::Store(
                "store returned rows for a write query".to_string(),
            )),
        }
    }
}
