//! Column mapping shared by the per-entity SQL records.
//!
//! Timestamps are stored as integer microseconds since the Unix epoch and
//! string lists as JSON arrays. API field names are camelCase; columns are
//! their snake_case form.

use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Row};

use super::records::SqlRecord;

/// Conversion of a field value into an SQLite value.
pub trait IntoSqlValue {
    fn into_sql_value(self) -> Value;
}

impl IntoSqlValue for String {
    fn into_sql_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoSqlValue for i64 {
    fn into_sql_value(self) -> Value {
        Value::Integer(self)
    }
}

impl IntoSqlValue for f64 {
    fn into_sql_value(self) -> Value {
        Value::Real(self)
    }
}

impl IntoSqlValue for DateTime<Utc> {
    fn into_sql_value(self) -> Value {
        Value::Integer(self.timestamp_micros())
    }
}

impl IntoSqlValue for Vec<String> {
    fn into_sql_value(self) -> Value {
        Value::Text(serde_json::to_string(&self).unwrap_or_else(|_| "[]".to_string()))
    }
}

impl<T: IntoSqlValue> IntoSqlValue for Option<T> {
    fn into_sql_value(self) -> Value {
        self.map_or(Value::Null, IntoSqlValue::into_sql_value)
    }
}

/// Ordered `(column, value)` pairs for an INSERT or UPDATE.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Columns(Vec<(&'static str, Value)>);

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always write `column`.
    #[must_use]
    pub fn set(mut self, column: &'static str, value: impl IntoSqlValue) -> Self {
        self.0.push((column, value.into_sql_value()));
        self
    }

    /// Write `column` only when the patch carries it; `Some(None)` writes NULL.
    #[must_use]
    pub fn patch<T: IntoSqlValue>(self, column: &'static str, value: Option<Option<T>>) -> Self {
        match value {
            Some(inner) => self.set(column, inner),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0.into_iter().map(|(_, value)| value).collect()
    }
}

/// Quote an identifier; `from` and `to` are keywords.
pub fn quote(column: &str) -> String {
    format!("\"{column}\"")
}

/// Map an API field name to its column: `assignedTo` → `assigned_to`.
pub fn column_for(field: &str) -> String {
    let mut column = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            column.push('_');
            column.push(ch.to_ascii_lowercase());
        } else {
            column.push(ch);
        }
    }
    column
}

fn conversion_error(
    row: &Row<'_>,
    column: &str,
    ty: Type,
    cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    let idx = row.as_ref().column_index(column).unwrap_or_default();
    rusqlite::Error::FromSqlConversionFailure(idx, ty, cause.into())
}

/// Read a non-null microsecond timestamp.
pub fn timestamp(row: &Row<'_>, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let micros: i64 = row.get(column)?;
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| conversion_error(row, column, Type::Integer, "timestamp out of range"))
}

/// Read a nullable microsecond timestamp.
pub fn opt_timestamp(row: &Row<'_>, column: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let micros: Option<i64> = row.get(column)?;
    micros
        .map(|m| {
            DateTime::from_timestamp_micros(m).ok_or_else(|| {
                conversion_error(row, column, Type::Integer, "timestamp out of range")
            })
        })
        .transpose()
}

/// Read a JSON string list.
pub fn string_list(row: &Row<'_>, column: &str) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(column)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(row, column, Type::Text, e))
}

/// Load one record by id.
pub fn fetch_one<R: SqlRecord>(conn: &Connection, id: &str) -> rusqlite::Result<Option<R>> {
    let sql = format!("SELECT * FROM {} WHERE id = ?1", R::TABLE);
    conn.query_row(&sql, [id], R::from_row).optional()
}

/// Load the record a nullable foreign key points at.
pub fn fetch_related<R: SqlRecord>(
    conn: &Connection,
    id: Option<&str>,
) -> rusqlite::Result<Option<R>> {
    match id {
        Some(id) => fetch_one(conn, id),
        None => Ok(None),
    }
}

/// Load every record whose `fk_column` references `parent_id`, newest first.
pub fn fetch_children<R: SqlRecord>(
    conn: &Connection,
    fk_column: &str,
    parent_id: &str,
) -> rusqlite::Result<Vec<R>> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ?1 ORDER BY created_at DESC, rowid DESC",
        R::TABLE,
        quote(fk_column)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([parent_id], R::from_row)?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_for_converts_camel_case() {
        assert_eq!(column_for("assignedTo"), "assigned_to");
        assert_eq!(column_for("zipCode"), "zip_code");
        assert_eq!(column_for("from"), "from");
        assert_eq!(column_for("projectId"), "project_id");
    }

    #[test]
    fn patch_skips_absent_fields_and_nulls_cleared_ones() {
        let columns = Columns::new()
            .patch::<String>("phone", None)
            .patch::<String>("notes", Some(None))
            .patch("status", Some(Some("Won".to_string())));

        assert_eq!(columns.names().collect::<Vec<_>>(), vec!["notes", "status"]);
        assert_eq!(
            columns.into_values(),
            vec![Value::Null, Value::Text("Won".to_string())]
        );
    }

    #[test]
    fn lists_are_stored_as_json() {
        let value = vec!["vip".to_string(), "q3".to_string()].into_sql_value();
        assert_eq!(value, Value::Text(r#"["vip","q3"]"#.to_string()));
        assert_eq!(Vec::<String>::new().into_sql_value(), Value::Text("[]".to_string()));
    }

    #[test]
    fn timestamps_round_trip_through_micros() {
        let conn = Connection::open_in_memory().unwrap();
        let now = DateTime::from_timestamp_micros(1_700_000_000_123_456).unwrap();
        let read = conn
            .query_row("SELECT ?1 AS at, NULL AS gone", [now.into_sql_value()], |row| {
                Ok((timestamp(row, "at")?, opt_timestamp(row, "gone")?))
            })
            .unwrap();
        assert_eq!(read, (now, None));
    }
}
