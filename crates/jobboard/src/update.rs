//! Partial-update compiler.
//!
//! Turns a sparse set of client fields into the `SET` clause of a single-row
//! `UPDATE` plus the positionally ordered values to bind:
//!
//! ```ignore
//! use jobboard::update::{ColumnRenames, FieldSet, sql_for_partial_update};
//!
//! let fields = FieldSet::new().set("firstName", "Aliya").set("age", 32);
//! let renames = ColumnRenames::new().rename("firstName", "first_name");
//!
//! let update = sql_for_partial_update(&fields, &renames)?;
//! assert_eq!(update.set_clause, r#""first_name"=$1, "age"=$2"#);
//! ```
//!
//! The compiler does not validate values or consult the schema. Callers decide
//! which fields are allowed before calling it.

use crate::error::{StoreError, StoreResult};
use crate::ident::Ident;
use bytes::BytesMut;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt::Write;
use std::str::FromStr;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A scalar value assigned by a partial update.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// SQL `NULL`.
    Null,
    Bool(bool),
    /// Narrowed to the target column's integer width at bind time.
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl ToSql for FieldValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(b) => b.to_sql_checked(ty, out),
            Self::Int(n) => match *ty {
                Type::INT2 => i16::try_from(*n)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*n)?.to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*n).to_sql(ty, out),
                _ => n.to_sql_checked(ty, out),
            },
            Self::Decimal(d) => d.to_sql_checked(ty, out),
            // Decimal strings, as `Job` serializes `equity`.
            Self::Text(s) if *ty == Type::NUMERIC => Decimal::from_str(s)?.to_sql(ty, out),
            Self::Text(s) => s.to_sql_checked(ty, out),
        }
    }

    // Per-variant checks happen in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl TryFrom<serde_json::Value> for FieldValue {
    type Error = StoreError;

    fn try_from(value: serde_json::Value) -> StoreResult<Self> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::String(s) => Ok(Self::Text(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Self::Int(i));
                }
                let s = n.to_string();
                Decimal::from_str(&s)
                    .or_else(|_| Decimal::from_scientific(&s))
                    .map(Self::Decimal)
                    .map_err(|e| StoreError::bad_request(format!("invalid number {s}: {e}")))
            }
            Value::Array(_) | Value::Object(_) => Err(StoreError::bad_request(
                "field values must be scalars",
            )),
        }
    }
}

/// Ordered, sparse mapping of client field name to new value.
///
/// Insertion order is the canonical order of the compiled clause. Setting a
/// name that is already present replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<(String, FieldValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FieldSet::insert`].
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Build from a JSON object, keeping the object's key order.
    pub fn from_json(value: serde_json::Value) -> StoreResult<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(StoreError::bad_request("update body must be a JSON object"));
        };
        let mut fields = Self::new();
        for (name, value) in map {
            fields.insert(name, FieldValue::try_from(value)?);
        }
        Ok(fields)
    }
}

impl<K, V> FromIterator<(K, V)> for FieldSet
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// Client field name to storage column name mapping.
///
/// Names without an entry are used as the column name unchanged.
#[derive(Debug, Clone, Default)]
pub struct ColumnRenames {
    columns: HashMap<String, String>,
}

impl ColumnRenames {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rename(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.columns.insert(field.into(), column.into());
        self
    }

    /// Storage column for a client field.
    pub fn column_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.columns.get(field).map_or(field, String::as_str)
    }
}

/// Output of [`sql_for_partial_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"col"=$1, "other"=$2, ...`
    pub set_clause: String,
    /// Values in placeholder order.
    pub values: Vec<FieldValue>,
}

impl PartialUpdate {
    /// Index of the first placeholder after the `SET` values.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Compile `fields` into a parameterized `SET` clause.
///
/// Fails with [`StoreError::BadRequest`] when `fields` is empty.
pub fn sql_for_partial_update(
    fields: &FieldSet,
    renames: &ColumnRenames,
) -> StoreResult<PartialUpdate> {
    if fields.is_empty() {
        return Err(StoreError::bad_request("No data"));
    }

    let mut set_clause = String::new();
    let mut values = Vec::with_capacity(fields.len());
    for (idx, (field, value)) in fields.iter().enumerate() {
        if idx > 0 {
            set_clause.push_str(", ");
        }
        Ident::quoted(renames.column_for(field))?.write_sql(&mut set_clause);
        let _ = write!(set_clause, "=${}", idx + 1);
        values.push(value.clone());
    }

    Ok(PartialUpdate { set_clause, values })
}
