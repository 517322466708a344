//! # jobboard
//!
//! Data-access core for a job postings board on PostgreSQL.
//!
//! - **Partial updates**: [`sql_for_partial_update`] turns a sparse set of client
//!   fields into a parameterized `SET` clause plus its ordered values.
//! - **Filtered listings**: [`JobFilters`] compiles recognized filters into a
//!   parameterized `WHERE` clause, always ordered by title.
//! - **Repository**: [`JobRepository`] runs create / list / get / update / remove
//!   against anything implementing [`GenericClient`], transactions included.
//! - **Instrumentation**: [`InstrumentedClient`] with [`TracingSqlHook`] logs every
//!   statement and warns about slow ones.
//!
//! ```ignore
//! use jobboard::{DbConfig, FieldSet, JobRepository, create_pool};
//!
//! let pool = create_pool(&DbConfig::from_env()?)?;
//! let client = pool.get().await?;
//!
//! let fields = FieldSet::new().set("title", "Staff Engineer").set("salary", 180_000);
//! let job = JobRepository::update(&client, 42, &fields).await?;
//! ```
//!
//! Values are always bound as parameters. Identifiers that reach SQL text are
//! double-quoted.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod ident;
pub mod job;
pub mod monitor;
pub mod pool;
pub mod row;
pub mod sql;
pub mod update;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::GenericClient;
pub use config::DbConfig;
pub use error::{ErrorKind, StoreError, StoreResult};
pub use filter::{JobFilter, JobFilters};
pub use ident::Ident;
pub use job::{Job, JobRepository, NewJob};
pub use monitor::{
    HookAction, InstrumentedClient, QueryContext, QueryHook, QueryResult, QueryType,
    TracingSqlHook,
};
pub use pool::create_pool;
pub use row::{FromRow, RowExt};
pub use sql::{Query, Sql, query, sql};
pub use update::{ColumnRenames, FieldSet, FieldValue, PartialUpdate, sql_for_partial_update};
