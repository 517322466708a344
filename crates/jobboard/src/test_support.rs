//! In-process `GenericClient` that records statements instead of running them.

use crate::client::GenericClient;
use crate::error::StoreResult;
use std::sync::Mutex;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub sql: String,
    pub param_count: usize,
    pub tag: Option<String>,
}

/// Returns zero rows for every query and a fixed count for every `execute`.
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<RecordedCall>>,
    affected: u64,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::with_affected(0)
    }

    pub fn with_affected(affected: u64) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            affected,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, tag: Option<&str>, sql: &str, params: &[&(dyn ToSql + Sync)]) {
        self.calls.lock().unwrap().push(RecordedCall {
            sql: sql.to_string(),
            param_count: params.len(),
            tag: tag.map(str::to_string),
        });
    }
}

impl GenericClient for RecordingClient {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        self.record(None, sql, params);
        Ok(Vec::new())
    }

    async fn query_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Vec<Row>> {
        self.record(Some(tag), sql, params);
        Ok(Vec::new())
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<u64> {
        self.record(None, sql, params);
        Ok(self.affected)
    }

    async fn execute_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<u64> {
        self.record(Some(tag), sql, params);
        Ok(self.affected)
    }
}
