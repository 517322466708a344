//! Statement hooks and timing for SQL execution.
//!
//! [`InstrumentedClient`] wraps any [`GenericClient`](crate::GenericClient), hands each
//! statement to an optional [`QueryHook`] before it runs, and warns about statements
//! slower than a configured threshold.
//!
//! ```rust,ignore
//! use jobboard::monitor::{InstrumentedClient, TracingSqlHook};
//! use std::time::Duration;
//!
//! let client = InstrumentedClient::new(pool.get().await?)
//!     .with_hook(TracingSqlHook::new())
//!     .with_slow_query_threshold(Duration::from_millis(250));
//!
//! let jobs = JobRepository::find_all(&client, None).await?;
//! ```

mod instrumented;
mod tracing_hook;
mod types;

#[cfg(test)]
mod tests;

pub use instrumented::InstrumentedClient;
pub use tracing_hook::TracingSqlHook;
pub use types::{HookAction, QueryContext, QueryHook, QueryResult, QueryType};

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
