use super::model::{Job, NewJob};
use crate::client::GenericClient;
use crate::error::{StoreError, StoreResult};
use crate::filter::JobFilters;
use crate::sql::{query, sql};
use crate::update::{ColumnRenames, FieldSet, sql_for_partial_update};
use tracing::debug;

/// Columns returned by every statement that yields a [`Job`].
pub const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Fields a partial update may not touch, under either spelling.
const FROZEN_FIELDS: [&str; 3] = ["id", "companyHandle", "company_handle"];

/// Client field name → `jobs` column, for names that differ.
///
/// [`JobRepository::update`] refuses `companyHandle` before compiling, so this
/// entry serves callers that compile their own statements over `jobs`.
pub fn job_renames() -> ColumnRenames {
    ColumnRenames::new().rename("companyHandle", "company_handle")
}

fn no_such_job(id: i32) -> StoreError {
    StoreError::not_found(format!("No job with id: {id}"))
}

/// Stateless CRUD over the `jobs` table.
///
/// Every method issues exactly one statement on `conn`; pass a transaction to
/// group several calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobRepository;

impl JobRepository {
    /// Insert a job and return the stored row.
    ///
    /// An unknown `company_handle` surfaces as [`StoreError::ForeignKeyViolation`].
    pub async fn create(conn: &impl GenericClient, new_job: &NewJob) -> StoreResult<Job> {
        let job: Job = query(format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        ))
        .tag("jobs.create")
        .bind(new_job.title.clone())
        .bind(new_job.salary)
        .bind(new_job.equity)
        .bind(new_job.company_handle.clone())
        .fetch_one_as(conn)
        .await?;

        debug!(target: "jobboard.job", job_id = job.id, company = %job.company_handle, "job created");
        Ok(job)
    }

    /// All jobs matching `filters`, ordered by title.
    pub async fn find_all(
        conn: &impl GenericClient,
        filters: Option<&JobFilters>,
    ) -> StoreResult<Vec<Job>> {
        let mut q = sql(format!("SELECT {JOB_COLUMNS} FROM jobs")).tagged("jobs.find_all");
        match filters {
            Some(filters) => q.push_sql(filters.compile()),
            None => q.push_sql(JobFilters::new().compile()),
        };

        let jobs: Vec<Job> = q.fetch_all_as(conn).await?;
        debug!(target: "jobboard.job", rows = jobs.len(), "jobs listed");
        Ok(jobs)
    }

    pub async fn get(conn: &impl GenericClient, id: i32) -> StoreResult<Job> {
        query(format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .tag("jobs.get")
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| no_such_job(id))
    }

    /// Apply a partial update and return the updated row.
    ///
    /// `fields` uses client names (`companyHandle`, not `company_handle`). The
    /// identity and owning company cannot be changed; asking to is a
    /// [`StoreError::BadRequest`], as is an empty `fields`. Neither issues SQL.
    pub async fn update(conn: &impl GenericClient, id: i32, fields: &FieldSet) -> StoreResult<Job> {
        if let Some(frozen) = FROZEN_FIELDS.iter().find(|name| fields.contains(name)) {
            return Err(StoreError::bad_request(format!(
                "field '{frozen}' cannot be updated"
            )));
        }

        let update = sql_for_partial_update(fields, &job_renames())?;
        let statement = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            update.set_clause,
            update.next_placeholder()
        );

        let job: Job = query(statement)
            .tag("jobs.update")
            .bind_all(update.values)
            .bind(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| no_such_job(id))?;

        debug!(target: "jobboard.job", job_id = id, fields = fields.len(), "job updated");
        Ok(job)
    }

    pub async fn remove(conn: &impl GenericClient, id: i32) -> StoreResult<()> {
        query("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .tag("jobs.remove")
            .bind(id)
            .fetch_opt(conn)
            .await?
            .ok_or_else(|| no_such_job(id))?;

        debug!(target: "jobboard.job", job_id = id, "job removed");
        Ok(())
    }
}
