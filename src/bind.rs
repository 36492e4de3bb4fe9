//! Binding rendered parameters to sqlx queries.
//!
//! Available with the `sqlx` feature. Render with the `sqlite3` dialect so
//! the placeholders match what SQLite expects.

use serde_json::Value as JsonValue;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

/// Prepare `sql` and bind `params` in order.
pub fn bind_query<'a>(
   sql: &'a str,
   params: Vec<JsonValue>,
) -> Query<'a, Sqlite, SqliteArguments<'a>> {
   params.into_iter().fold(sqlx::query(sql), bind_value)
}

/// Bind one JSON value, mapping it onto the closest SQLite storage class.
pub fn bind_value<'a>(
   query: Query<'a, Sqlite, SqliteArguments<'a>>,
   value: JsonValue,
) -> Query<'a, Sqlite, SqliteArguments<'a>> {
   match value {
      JsonValue::Null => query.bind(None::<JsonValue>),
      JsonValue::Bool(b) => query.bind(b),
      JsonValue::String(s) => query.bind(s),
      JsonValue::Number(number) => {
         // Keep integer precision where SQLite's INTEGER can hold it
         if let Some(int_val) = number.as_i64() {
            query.bind(int_val)
         } else if let Some(uint_val) = number.as_u64() {
            match i64::try_from(uint_val) {
               Ok(int_val) => query.bind(int_val),
               Err(_) => query.bind(uint_val as f64),
            }
         } else {
            query.bind(number.as_f64().unwrap_or_default())
         }
      }
      other => query.bind(other),
   }
}
