use super::truncate_sql_bytes;
use super::types::{HookAction, QueryContext, QueryHook, QueryResult, QueryType};
use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A `GenericClient` wrapper that runs a hook around every statement and
/// warns on slow ones.
pub struct InstrumentedClient<C> {
    client: C,
    hook: Option<Arc<dyn QueryHook>>,
    slow_query_threshold: Option<Duration>,
}

impl<C: GenericClient> InstrumentedClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            hook: None,
            slow_query_threshold: None,
        }
    }

    pub fn with_hook<H: QueryHook + 'static>(mut self, hook: H) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn with_hook_arc(mut self, hook: Arc<dyn QueryHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Statements taking longer than `threshold` are logged at `WARN`.
    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    pub fn slow_query_threshold(&self) -> Option<Duration> {
        self.slow_query_threshold
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    fn prepare(
        &self,
        sql: &str,
        param_count: usize,
        tag: Option<&str>,
    ) -> StoreResult<QueryContext> {
        let mut ctx = QueryContext::new(sql, param_count);
        ctx.tag = tag.map(str::to_string);

        let Some(hook) = &self.hook else {
            return Ok(ctx);
        };
        match hook.before_query(&ctx) {
            HookAction::Continue => {}
            HookAction::ModifySql(sql) => {
                ctx.query_type = QueryType::from_sql(&sql);
                ctx.sql = sql;
            }
            HookAction::Abort(reason) => {
                return Err(StoreError::bad_request(format!(
                    "Query aborted by hook: {reason}"
                )));
            }
        }
        Ok(ctx)
    }

    fn finish(&self, ctx: &QueryContext, duration: Duration, result: &QueryResult) {
        if let Some(hook) = &self.hook {
            hook.after_query(ctx, duration, result);
        }

        if let Some(threshold) = self.slow_query_threshold {
            if duration > threshold {
                tracing::warn!(
                    target: "jobboard.sql",
                    tag = ctx.tag.as_deref().unwrap_or("-"),
                    query_type = ?ctx.query_type,
                    elapsed_ms = duration.as_millis() as u64,
                    threshold_ms = threshold.as_millis() as u64,
                    sql = %truncate_sql_bytes(&ctx.sql, 200),
                    "slow query"
                );
            }
        }
    }

    async fn query_inner(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
        tag: Option<&str>,
    ) -> StoreResult<Vec<Row>> {
        let ctx = self.prepare(sql, params.len(), tag)?;

        let start = Instant::now();
        let result = self.client.query(&ctx.sql, params).await;
        let outcome = match &result {
            Ok(rows) => QueryResult::Rows(rows.len()),
            Err(e) => QueryResult::error(e.to_string()),
        };

        self.finish(&ctx, start.elapsed(), &outcome);
        result
    }

    async fn execute_inner(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
        tag: Option<&str>,
    ) -> StoreResult<u64> {
        let ctx = self.prepare(sql, params.len(), tag)?;

        let start = Instant::now();
        let result = self.client.execute(&ctx.sql, params).await;
        let outcome = match &result {
            Ok(n) => QueryResult::Affected(*n),
            Err(e) => QueryResult::error(e.to_string()),
        };

        self.finish(&ctx, start.elapsed(), &outcome);
        result
    }
}

// `query_one`/`query_opt` keep their defaults, which route through `query*`.
impl<C: GenericClient> GenericClient for InstrumentedClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<Vec<Row>> {
        self.query_inner(sql, params, None).await
    }

    async fn query_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<Vec<Row>> {
        self.query_inner(sql, params, Some(tag)).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StoreResult<u64> {
        self.execute_inner(sql, params, None).await
    }

    async fn execute_tagged(
        &self,
        tag: &str,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StoreResult<u64> {
        self.execute_inner(sql, params, Some(tag)).await
    }
}
