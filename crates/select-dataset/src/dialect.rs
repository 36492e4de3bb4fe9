//! SQL dialects and their rendering rules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// SQL dialect used when rendering a dataset.
///
/// Dialects differ in identifier quoting, placeholder style, boolean
/// literals and LIMIT/OFFSET syntax:
///
/// | Dialect     | Quoting   | Placeholder | Paging                      |
/// |-------------|-----------|-------------|-----------------------------|
/// | `default`   | `"id"`    | `?`         | `LIMIT n OFFSET m`          |
/// | `postgres`  | `"id"`    | `$1`        | `LIMIT n OFFSET m`          |
/// | `mysql`     | `` `id` ``| `?`         | `LIMIT n OFFSET m`          |
/// | `sqlite3`   | `` `id` ``| `?`         | `LIMIT n OFFSET m`          |
/// | `sqlserver` | `[id]`    | `@p1`       | `OFFSET m ROWS FETCH NEXT n`|
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
   #[default]
   Default,
   Postgres,
   Mysql,
   Sqlite3,
   Sqlserver,
}

impl Dialect {
   /// The canonical name of this dialect, as accepted by [`Dialect::from_str`].
   pub fn name(self) -> &'static str {
      match self {
         Dialect::Default => "default",
         Dialect::Postgres => "postgres",
         Dialect::Mysql => "mysql",
         Dialect::Sqlite3 => "sqlite3",
         Dialect::Sqlserver => "sqlserver",
      }
   }

   /// Quote an identifier, escaping embedded quote characters by doubling them.
   pub fn quote_identifier(self, name: &str) -> String {
      match self {
         Dialect::Default | Dialect::Postgres => format!("\"{}\"", name.replace('"', "\"\"")),
         Dialect::Mysql | Dialect::Sqlite3 => format!("`{}`", name.replace('`', "``")),
         Dialect::Sqlserver => format!("[{}]", name.replace(']', "]]")),
      }
   }

   /// Placeholder for the `position`-th (1-based) bound parameter.
   pub fn placeholder(self, position: usize) -> String {
      match self {
         Dialect::Postgres => format!("${}", position),
         Dialect::Sqlserver => format!("@p{}", position),
         Dialect::Default | Dialect::Mysql | Dialect::Sqlite3 => "?".to_string(),
      }
   }

   /// Inline a boolean literal.
   pub(crate) fn bool_literal(self, value: bool) -> &'static str {
      match (self, value) {
         (Dialect::Sqlite3 | Dialect::Sqlserver, true) => "1",
         (Dialect::Sqlite3 | Dialect::Sqlserver, false) => "0",
         (_, true) => "TRUE",
         (_, false) => "FALSE",
      }
   }

   /// Inline a string literal.
   ///
   /// Single quotes are doubled; MySQL additionally treats backslash as an
   /// escape character, so backslashes are doubled there too.
   pub(crate) fn string_literal(self, value: &str) -> String {
      let escaped = match self {
         Dialect::Mysql => value.replace('\\', "\\\\").replace('\'', "''"),
         _ => value.replace('\'', "''"),
      };
      format!("'{}'", escaped)
   }

   /// Whether paging uses `OFFSET … ROWS FETCH NEXT … ROWS ONLY`.
   pub(crate) fn uses_fetch_paging(self) -> bool {
      matches!(self, Dialect::Sqlserver)
   }
}

impl fmt::Display for Dialect {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.name())
   }
}

impl FromStr for Dialect {
   type Err = Error;

   /// Parse a dialect name (case-insensitive). `""` selects the default dialect.
   fn from_str(s: &str) -> Result<Self, Self::Err> {
      match s.trim().to_ascii_lowercase().as_str() {
         "" | "default" => Ok(Dialect::Default),
         "postgres" | "postgresql" => Ok(Dialect::Postgres),
         "mysql" => Ok(Dialect::Mysql),
         "sqlite" | "sqlite3" => Ok(Dialect::Sqlite3),
         "sqlserver" | "mssql" => Ok(Dialect::Sqlserver),
         _ => Err(Error::UnknownDialect(s.to_string())),
      }
   }
}
