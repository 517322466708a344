//! Safe SQL identifier handling.
//!
//! Storage column names end up in SQL text (Postgres cannot bind identifiers),
//! so they go through [`Ident`] first. Names are always rendered double-quoted:
//! any character except NUL is allowed and `"` is escaped as `""`.
//!
//! # Example
//! ```ignore
//! use jobboard::Ident;
//!
//! let col = Ident::quoted("company_handle")?;
//! assert_eq!(col.to_sql(), r#""company_handle""#);
//! # Ok::<(), jobboard::StoreError>(())
//! ```

use crate::error::{StoreError, StoreResult};

/// A quoted SQL column identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    name: String,
}

impl Ident {
    /// Create a quoted identifier.
    ///
    /// Quoting keeps reserved words and mixed-case names intact.
    pub fn quoted(name: &str) -> StoreResult<Self> {
        if name.is_empty() {
            return Err(StoreError::bad_request("Empty column name"));
        }
        if name.contains('\0') {
            return Err(StoreError::bad_request(
                "Column name cannot contain NUL character",
            ));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    /// The unquoted name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 2);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('"');
        for ch in self.name.chars() {
            if ch == '"' {
                out.push_str("\"\"");
            } else {
                out.push(ch);
            }
        }
        out.push('"');
    }
}
