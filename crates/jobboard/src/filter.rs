//! Filter clause compiler for job listings.
//!
//! Recognized filters are a closed set ([`JobFilter`]); each one maps to a fixed
//! predicate template. Values are always bound as parameters, never spliced into
//! SQL text.
//!
//! ```ignore
//! use jobboard::filter::{JobFilter, JobFilters};
//!
//! let filters = JobFilters::new()
//!     .with(JobFilter::Title("dev".into()))
//!     .with(JobFilter::MinSalary(100_000));
//!
//! let fragment = filters.compile();
//! assert_eq!(
//!     fragment.to_sql(),
//!     " WHERE LOWER(title) LIKE $1 AND salary >= $2 ORDER BY title"
//! );
//! ```

use crate::error::{StoreError, StoreResult};
use crate::sql::Sql;
use rust_decimal::Decimal;

/// A single recognized filter on the `jobs` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFilter {
    /// Case-insensitive substring match on `title`.
    Title(String),
    /// `salary >= value`.
    MinSalary(i32),
    /// `true` keeps only rows with `equity > 0`; `false` does not filter.
    HasEquity(bool),
}

impl JobFilter {
    /// The client-facing filter name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::MinSalary(_) => "minSalary",
            Self::HasEquity(_) => "hasEquity",
        }
    }

    /// Parse a `(name, value)` pair as delivered in a query string.
    pub fn parse(name: &str, value: &str) -> StoreResult<Self> {
        match name {
            "title" => Ok(Self::Title(value.to_string())),
            "minSalary" => value.trim().parse().map(Self::MinSalary).map_err(|_| {
                StoreError::bad_request(format!("minSalary must be an integer, got '{value}'"))
            }),
            "hasEquity" => match value.trim() {
                "true" => Ok(Self::HasEquity(true)),
                "false" => Ok(Self::HasEquity(false)),
                other => Err(StoreError::bad_request(format!(
                    "hasEquity must be true or false, got '{other}'"
                ))),
            },
            other => Err(StoreError::bad_request(format!("unknown filter '{other}'"))),
        }
    }

    fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Append `<keyword><predicate>` to `sql`. Returns `false` if this filter
    /// contributes no predicate.
    fn push_predicate(&self, keyword: &str, sql: &mut Sql) -> bool {
        match self {
            Self::Title(title) => {
                sql.push(keyword)
                    .push("LOWER(title) LIKE ")
                    .push_bind(format!("%{}%", title.to_lowercase()));
            }
            Self::MinSalary(min) => {
                sql.push(keyword).push("salary >= ").push_bind(*min);
            }
            Self::HasEquity(true) => {
                sql.push(keyword).push("equity > ").push_bind(Decimal::ZERO);
            }
            Self::HasEquity(false) => return false,
        }
        true
    }
}

/// An ordered set of [`JobFilter`]s, combined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    filters: Vec<JobFilter>,
}

impl JobFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`JobFilters::push`].
    #[must_use]
    pub fn with(mut self, filter: JobFilter) -> Self {
        self.push(filter);
        self
    }

    /// Add a filter. A filter of the same kind already present is replaced in place.
    pub fn push(&mut self, filter: JobFilter) {
        match self.filters.iter_mut().find(|f| f.same_kind(&filter)) {
            Some(slot) => *slot = filter,
            None => self.filters.push(filter),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JobFilter> {
        self.filters.iter()
    }

    /// Parse query-string pairs. Unknown names and bad values are rejected.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::new();
        for (name, value) in pairs {
            filters.push(JobFilter::parse(name.as_ref(), value.as_ref())?);
        }
        Ok(filters)
    }

    /// Compile into the fragment that follows the base `SELECT ... FROM jobs`:
    /// an optional `WHERE` clause followed by `ORDER BY title`.
    pub fn compile(&self) -> Sql {
        let mut sql = Sql::empty();
        let mut keyword = " WHERE ";
        for filter in &self.filters {
            if filter.push_predicate(keyword, &mut sql) {
                keyword = " AND ";
            }
        }
        sql.push(" ORDER BY title");
        sql
    }
}

impl FromIterator<JobFilter> for JobFilters {
    fn from_iter<I: IntoIterator<Item = JobFilter>>(iter: I) -> Self {
        let mut filters = Self::new();
        for f in iter {
            filters.push(f);
        }
        filters
    }
}
