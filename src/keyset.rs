//! Keyset pagination types and predicate generation.
//!
//! Keyset (seek) pagination avoids the performance degradation of
//! OFFSET-based pagination on large tables. Instead of skipping rows, the
//! statement seeks directly past the last row of the previous page using the
//! values of its ordering columns.
//!
//! # How It Works
//!
//! For keyset columns `(c1, c2, …, cN)` and a boundary tuple
//! `(v1, v2, …, vN)`, the generated predicate is the expanded form of the
//! row-value comparison `(c1, …, cN) > (v1, …, vN)`:
//!
//! ```text
//! (c1 > v1) OR (c1 = v1 AND c2 > v2) OR … OR (c1 = v1 AND … AND cN > vN)
//! ```
//!
//! A descending column uses `<` in its own position. The expanded form works
//! on dialects without row-value comparisons and still lets the planner use
//! a composite index over the same column order.
//!
//! # Example
//!
//! ```
//! use keyset_select::keyset::{KeysetColumn, KeysetSpec};
//! use serde_json::json;
//!
//! let first_page = KeysetSpec::new(vec![
//!    KeysetColumn::asc("category"),
//!    KeysetColumn::desc("score"),
//!    KeysetColumn::asc("id"),
//! ]);
//! let next_page = first_page.clone().after(vec![json!("tech"), json!(90), json!(3)]);
//! assert!(next_page.validate().is_ok());
//! ```

use indexmap::IndexMap;
use select_dataset::{
   ColumnRef, Expression, OrderedExpression, SelectDataset, SortDirection, TableIdentifier, and,
   or,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::columns::resolve_column;
use crate::{Error, Result};

/// A column in the keyset used for cursor-based pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysetColumn {
   /// Column name, plain (`id`) or qualified (`orders.total`)
   pub name: String,
   /// Sort direction for this column
   pub direction: SortDirection,
}

impl KeysetColumn {
   /// Create a keyset column with ascending sort direction.
   pub fn asc(name: impl Into<String>) -> Self {
      Self {
         name: name.into(),
         direction: SortDirection::Asc,
      }
   }

   /// Create a keyset column with descending sort direction.
   pub fn desc(name: impl Into<String>) -> Self {
      Self {
         name: name.into(),
         direction: SortDirection::Desc,
      }
   }
}

/// Ordered keyset columns plus the boundary tuple of the last row seen.
///
/// `boundary` is `None` for the first page. When present, position *i* of
/// `boundary` is the value of column *i*.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysetSpec {
   pub columns: Vec<KeysetColumn>,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub boundary: Option<Vec<JsonValue>>,
}

impl KeysetSpec {
   /// First-page keyset over `columns`.
   pub fn new(columns: Vec<KeysetColumn>) -> Self {
      Self {
         columns,
         boundary: None,
      }
   }

   /// Keyset where every column sorts the same way.
   pub fn uniform<I, S>(columns: I, boundary: Option<Vec<JsonValue>>, descending: bool) -> Self
   where
      I: IntoIterator<Item = S>,
      S: Into<String>,
   {
      let direction = if descending {
         SortDirection::Desc
      } else {
         SortDirection::Asc
      };
      Self {
         columns: columns
            .into_iter()
            .map(|name| KeysetColumn {
               name: name.into(),
               direction,
            })
            .collect(),
         boundary,
      }
   }

   /// Seek past `boundary`, the keyset values of the last row already seen.
   pub fn after(mut self, boundary: Vec<JsonValue>) -> Self {
      self.boundary = Some(boundary);
      self
   }

   /// Check the shape of the keyset before any predicate is built.
   pub fn validate(&self) -> Result<()> {
      if self.columns.is_empty() {
         return Err(Error::EmptyKeysetColumns);
      }
      if let Some(boundary) = &self.boundary
         && boundary.len() != self.columns.len()
      {
         return Err(Error::CursorLengthMismatch {
            cursor_len: boundary.len(),
            keyset_len: self.columns.len(),
         });
      }
      Ok(())
   }
}

/// Build the cursor condition for seeking past `boundary`.
///
/// Produces one conjunction per column: equalities on every earlier column
/// and a strict inequality on the column itself, all joined with OR.
///
/// Fails when `columns` is empty or `boundary` has a different length.
pub fn build_cursor_condition(
   columns: &[(ColumnRef, SortDirection)],
   boundary: &[JsonValue],
) -> Result<Expression> {
   if columns.is_empty() {
      return Err(Error::EmptyKeysetColumns);
   }
   if boundary.len() != columns.len() {
      return Err(Error::CursorLengthMismatch {
         cursor_len: boundary.len(),
         keyset_len: columns.len(),
      });
   }

   let clauses = columns
      .iter()
      .zip(boundary)
      .enumerate()
      .map(|(level, ((column, direction), value))| {
         let mut parts: Vec<Expression> = columns[..level]
            .iter()
            .zip(boundary)
            .map(|((earlier, _), prior)| earlier.eq(prior.clone()))
            .collect();

         parts.push(match direction {
            SortDirection::Asc => column.gt(value.clone()),
            SortDirection::Desc => column.lt(value.clone()),
         });

         and(parts)
      });

   Ok(or(clauses))
}

/// Build the ORDER BY terms for a resolved keyset.
pub fn build_order_by(columns: &[(ColumnRef, SortDirection)]) -> Vec<OrderedExpression> {
   columns
      .iter()
      .map(|(column, direction)| column.ordered(*direction))
      .collect()
}

/// Apply a keyset to `dataset`.
///
/// The ORDER BY is replaced by the keyset order, the cursor condition (if a
/// boundary is present) is ANDed with existing filters, and OFFSET is
/// cleared: keyset and offset paging never coexist in one statement.
pub(crate) fn apply_keyset(
   table: &TableIdentifier,
   spec: &KeysetSpec,
   dataset: SelectDataset,
) -> Result<SelectDataset> {
   spec.validate()?;

   let columns = spec
      .columns
      .iter()
      .map(|k| Ok((resolve_column(table, &k.name)?, k.direction)))
      .collect::<Result<Vec<_>>>()?;
   let order = build_order_by(&columns);

   let dataset = match &spec.boundary {
      None => {
         trace!(table = %table, columns = columns.len(), "Applying first-page keyset");
         dataset.order(order)
      }
      Some(boundary) => {
         trace!(table = %table, columns = columns.len(), "Applying keyset with boundary");
         dataset
            .filter([build_cursor_condition(&columns, boundary)?])
            .order(order)
      }
   };

   Ok(dataset.clear_offset())
}

/// Extract the boundary tuple for the next page from the last row of the
/// current one.
///
/// A qualified keyset name (`orders.total`) is looked up as written first.
/// If the row has no such key it falls back to the bare column name, which
/// is how most drivers label result columns, but only when no other keyset
/// column shares that bare name. The row itself cannot tell which table a
/// bare key came from, so select joined keyset columns under distinct names
/// when the base table has a column with the same name.
pub fn next_cursor(
   row: &IndexMap<String, JsonValue>,
   columns: &[KeysetColumn],
) -> Result<Vec<JsonValue>> {
   columns
      .iter()
      .map(|col| {
         let value = row.get(&col.name).or_else(|| {
            let bare = bare_name(&col.name);
            let shared = columns
               .iter()
               .filter(|other| bare_name(&other.name) == bare)
               .count();
            if bare != col.name && shared == 1 {
               row.get(bare)
            } else {
               None
            }
         });

         value.cloned().ok_or_else(|| Error::CursorColumnNotFound {
            column: col.name.clone(),
         })
      })
      .collect()
}

fn bare_name(name: &str) -> &str {
   name.rsplit_once('.').map_or(name, |(_, column)| column)
}
