//! Job postings: the row model and its repository.
//!
//! ```ignore
//! use jobboard::job::{JobRepository, NewJob};
//! use jobboard::filter::{JobFilter, JobFilters};
//!
//! let job = JobRepository::create(&client, &NewJob::new("Engineer", "c1").with_salary(100_000)).await?;
//!
//! let filters = JobFilters::new().with(JobFilter::HasEquity(true));
//! let with_equity = JobRepository::find_all(&client, Some(&filters)).await?;
//!
//! JobRepository::remove(&client, job.id).await?;
//! ```

mod model;
mod repo;

#[cfg(test)]
mod tests;

pub use model::{Job, NewJob};
pub use repo::{JOB_COLUMNS, JobRepository, job_renames};
