use rusqlite::params;
use rusqlite::types::ValueRef;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::{Result, SqliteStore, SqliteStoreError};

/// One column as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Column position.
    pub cid: i64,
    /// Column name.
    pub name: String,
    /// Declared type, empty when none was declared.
    pub data_type: String,
    /// Whether the column is `NOT NULL`.
    pub not_null: bool,
    /// Default expression as written in the schema.
    pub default_value: Option<String>,
    /// Position within the primary key, `0` when not part of it.
    pub primary_key: i64,
}

impl SqliteStore {
    /// Run an arbitrary `SELECT` on a read-only connection and return each row
    /// as a JSON object keyed by column name.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::NotSelect`] for anything but a single
    /// read-only `SELECT`, or the SQLite error when the statement fails.
    pub fn query_readonly(&self, sql: &str) -> Result<Vec<Map<String, Value>>> {
        if !starts_with_select(sql) {
            return Err(SqliteStoreError::NotSelect);
        }
        let conn = self.connect_read_only()?;
        let mut stmt = conn.prepare(sql)?;
        if !stmt.readonly() {
            return Err(SqliteStoreError::NotSelect);
        }
        let names: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();

        let mut out = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut object = Map::with_capacity(names.len());
            for (idx, name) in names.iter().enumerate() {
                object.insert(name.clone(), json_value(row.get_ref(idx)?));
            }
            out.push(object);
        }
        debug!(rows = out.len(), "Read-only query");
        Ok(out)
    }

    /// Names of the user tables, sorted.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let conn = self.connect_read_only()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Column layout of `table`.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::InvalidIdentifier`] when `table` is not a
    /// plain identifier or names no existing table.
    pub fn describe_table(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        if !is_identifier(table) {
            return Err(SqliteStoreError::InvalidIdentifier(table.to_owned()));
        }
        let conn = self.connect_read_only()?;
        let mut stmt = conn.prepare(
            "SELECT cid, name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
        )?;
        let columns = stmt
            .query_map(params![table], |row| {
                Ok(ColumnInfo {
                    cid: row.get(0)?,
                    name: row.get(1)?,
                    data_type: row.get(2)?,
                    not_null: row.get(3)?,
                    default_value: row.get(4)?,
                    primary_key: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if columns.is_empty() {
            return Err(SqliteStoreError::InvalidIdentifier(table.to_owned()));
        }
        Ok(columns)
    }
}

fn starts_with_select(sql: &str) -> bool {
    let Some((head, rest)) = sql.trim_start().split_at_checked(6) else {
        return false;
    };
    head.eq_ignore_ascii_case("select")
        && rest
            .chars()
            .next()
            .is_none_or(|next| !(next.is_ascii_alphanumeric() || next == '_'))
}

/// `^[A-Za-z_][A-Za-z0-9_]*$`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(int) => Value::from(int),
        ValueRef::Real(real) => Number::from_f64(real).map_or(Value::Null, Value::Number),
        ValueRef::Text(text) => Value::String(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(blob) => Value::String(format!("<blob {} bytes>", blob.len())),
    }
}
