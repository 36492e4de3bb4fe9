//! Descriptor-driven column resolution.
//!
//! A destination type declares which of its fields map to which columns by
//! implementing [`Selectable`] (one table) or [`JoinSelectable`] (several
//! tables). The bindings are `const` data, so they are checked at compile
//! time and never re-derived per call.
//!
//! # Example
//!
//! ```
//! use keyset_select::columns::{FieldColumn, Selectable, resolve_columns};
//! use keyset_select::table;
//!
//! struct User {
//!    id: i64,
//!    name: String,
//!    password_hash: String,
//! }
//!
//! impl Selectable for User {
//!    const FIELDS: &'static [FieldColumn] = &[
//!       FieldColumn::new("id", "id"),
//!       FieldColumn::new("name", "display_name"),
//!       FieldColumn::new("password_hash", "password_hash").skip_select(),
//!    ];
//! }
//!
//! let users = table("users");
//! let columns = resolve_columns::<User>(&users).unwrap();
//! assert_eq!(columns, vec![users.col("id"), users.col("display_name")]);
//! ```

use select_dataset::{ColumnRef, TableIdentifier};

use crate::{Error, Result};

/// Binding of one destination field to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldColumn {
   /// Field name on the destination type
   pub field: &'static str,
   /// Column name in the table
   pub column: &'static str,
   /// Excluded from generated select lists
   pub skip_select: bool,
}

impl FieldColumn {
   pub const fn new(field: &'static str, column: &'static str) -> Self {
      Self {
         field,
         column,
         skip_select: false,
      }
   }

   /// Mark this field as excluded from select lists.
   pub const fn skip_select(self) -> Self {
      Self {
         skip_select: true,
         ..self
      }
   }
}

/// A destination type whose fields are columns of a single table.
pub trait Selectable {
   /// Field bindings in select-list order.
   const FIELDS: &'static [FieldColumn];
}

/// One table of a multi-table projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTable {
   /// Table (or alias) the fields belong to
   pub table: &'static str,
   pub fields: &'static [FieldColumn],
}

impl SelectionTable {
   pub const fn new(table: &'static str, fields: &'static [FieldColumn]) -> Self {
      Self { table, fields }
   }
}

/// A two-level destination type: each top-level entry is a table and each of
/// its fields a column on that table.
pub trait JoinSelectable {
   /// Tables in select-list order.
   const TABLES: &'static [SelectionTable];
}

/// Resolve the select list of `T` against `table`, skipping `skip_select`
/// fields and keeping declaration order.
pub fn resolve_columns<T: Selectable>(table: &TableIdentifier) -> Result<Vec<ColumnRef>> {
   let columns = selectable_columns(table.name(), T::FIELDS)?;
   if columns.is_empty() {
      return Err(Error::NoSelectableColumns {
         descriptor: std::any::type_name::<T>().to_string(),
      });
   }
   Ok(columns)
}

/// Flatten the tables of `T` into one select list, in declaration order.
pub fn resolve_selection<T: JoinSelectable>() -> Result<Vec<ColumnRef>> {
   resolve_selection_tables(T::TABLES, std::any::type_name::<T>())
}

pub(crate) fn resolve_selection_tables(
   tables: &[SelectionTable],
   descriptor: &str,
) -> Result<Vec<ColumnRef>> {
   let mut columns = Vec::new();
   for selection in tables {
      columns.extend(selectable_columns(selection.table, selection.fields)?);
   }
   if columns.is_empty() {
      return Err(Error::NoSelectableColumns {
         descriptor: descriptor.to_string(),
      });
   }
   Ok(columns)
}

fn selectable_columns(table: &str, fields: &[FieldColumn]) -> Result<Vec<ColumnRef>> {
   validate_table_name(table)?;
   fields
      .iter()
      .filter(|f| !f.skip_select)
      .map(|f| {
         if !is_quotable(f.column) {
            return Err(Error::InvalidColumnName {
               name: f.column.to_string(),
            });
         }
         Ok(ColumnRef::new(table, f.column))
      })
      .collect()
}

/// Resolve a column name against `table`.
///
/// Plain names are qualified by `table`; a qualified name (`orders.total`)
/// keeps its own table so keysets can order by joined columns.
pub(crate) fn resolve_column(table: &TableIdentifier, name: &str) -> Result<ColumnRef> {
   validate_column_name(name)?;
   Ok(match name.rsplit_once('.') {
      Some((qualifier, column)) => ColumnRef::new(qualifier, column),
      None => table.col(name),
   })
}

/// Whether `name` is a single identifier: `[a-zA-Z_][a-zA-Z0-9_]*`.
fn is_identifier(name: &str) -> bool {
   let mut chars = name.chars();
   match chars.next() {
      Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
      _ => return false,
   }
   chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Whether `name` can be emitted as one quoted identifier: non-empty and
/// free of NUL characters. Quoting escapes everything else.
fn is_quotable(name: &str) -> bool {
   !name.is_empty() && !name.contains('\0')
}

/// Validate a table name.
///
/// Table names are always quoted as a single identifier, so `user-events` or
/// `café` are accepted as written and `main.users` names a table whose name
/// contains a dot rather than a schema-qualified table.
pub(crate) fn validate_table_name(name: &str) -> Result<()> {
   if !is_quotable(name) {
      return Err(Error::InvalidTableName {
         name: name.to_string(),
      });
   }
   Ok(())
}

/// Validate a keyset column name.
///
/// Keyset names often arrive with a serialized cursor, so they are held to
/// plain identifiers: a bare name or `table.column`, every dot-separated
/// segment matching `[a-zA-Z_][a-zA-Z0-9_]*`.
pub(crate) fn validate_column_name(name: &str) -> Result<()> {
   let segments: Vec<&str> = name.split('.').collect();
   if segments.len() > 2 || !segments.iter().all(|s| is_identifier(s)) {
      return Err(Error::InvalidColumnName {
         name: name.to_string(),
      });
   }
   Ok(())
}
