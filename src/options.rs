//! Composable statement options.
//!
//! A [`SelectOption`] is one deferred transform of a [`SelectDataset`]. The
//! assembler applies options in the order given, each one seeing the table
//! identifier and the statement produced by the previous option, so a later
//! option overrides an earlier one wherever they touch the same clause.
//!
//! Projection options ([`with_select_star`], [`with_inner_join_selection`],
//! [`with_left_join_selection`]) replace the select list; combining several
//! of them in one build is last-writer-wins and left to the caller.

use select_dataset::{Expression, JoinKind, OrderedExpression, SelectDataset, TableIdentifier};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::Result;
use crate::columns::JoinSelectable;
use crate::join::{JoinOp, JoinSelection};
use crate::keyset::{KeysetSpec, apply_keyset};

/// A single statement transform.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOption {
   /// Add WHERE conjuncts
   Filters(Vec<Expression>),
   /// Set the dialect by name
   Dialect(String),
   /// Toggle placeholder rendering
   Prepared(bool),
   Limit(u64),
   Offset(u64),
   /// Replace the ORDER BY clause
   Order(Vec<OrderedExpression>),
   /// Append to the ORDER BY clause
   OrderAppend(Vec<OrderedExpression>),
   /// Replace the select list with `*`
   Star,
   /// Keyset pagination
   Keyset(KeysetSpec),
   /// Joins plus a multi-table projection
   JoinSelection(JoinSelection),
}

impl SelectOption {
   /// Short name used in logs.
   pub fn name(&self) -> &'static str {
      match self {
         SelectOption::Filters(_) => "filters",
         SelectOption::Dialect(_) => "dialect",
         SelectOption::Prepared(_) => "prepared",
         SelectOption::Limit(_) => "limit",
         SelectOption::Offset(_) => "offset",
         SelectOption::Order(_) => "order",
         SelectOption::OrderAppend(_) => "order_append",
         SelectOption::Star => "star",
         SelectOption::Keyset(_) => "keyset",
         SelectOption::JoinSelection(_) => "join_selection",
      }
   }

   /// Apply this option, returning the transformed statement.
   pub fn apply(&self, table: &TableIdentifier, dataset: SelectDataset) -> Result<SelectDataset> {
      trace!(option = self.name(), table = %table, "Applying select option");

      Ok(match self {
         SelectOption::Filters(exprs) => dataset.filter(exprs.iter().cloned()),
         SelectOption::Dialect(name) => dataset.with_dialect(name.as_str()),
         SelectOption::Prepared(prepared) => dataset.prepared(*prepared),
         SelectOption::Limit(limit) => dataset.limit(*limit),
         SelectOption::Offset(offset) => dataset.offset(*offset),
         SelectOption::Order(terms) => dataset.order(terms.iter().cloned()),
         SelectOption::OrderAppend(terms) => dataset.order_append(terms.iter().cloned()),
         SelectOption::Star => dataset.select_star(),
         SelectOption::Keyset(spec) => apply_keyset(table, spec, dataset)?,
         SelectOption::JoinSelection(selection) => selection.apply(dataset)?,
      })
   }
}

/// Add WHERE conjuncts, ANDed with any existing filters.
pub fn with_select_filters(filters: impl IntoIterator<Item = Expression>) -> SelectOption {
   SelectOption::Filters(filters.into_iter().collect())
}

/// Render in the named dialect (`default`, `postgres`, `mysql`, `sqlite3`, `sqlserver`).
pub fn with_select_dialect(dialect: impl Into<String>) -> SelectOption {
   SelectOption::Dialect(dialect.into())
}

/// Render with placeholders (`true`) or inlined literals (`false`).
pub fn with_select_prepared(prepared: bool) -> SelectOption {
   SelectOption::Prepared(prepared)
}

/// Set LIMIT; `0` removes it.
pub fn with_select_limit(limit: u64) -> SelectOption {
   SelectOption::Limit(limit)
}

/// Set OFFSET; `0` removes it.
pub fn with_select_offset(offset: u64) -> SelectOption {
   SelectOption::Offset(offset)
}

/// Replace ORDER BY with `order`.
pub fn with_select_order(order: impl IntoIterator<Item = OrderedExpression>) -> SelectOption {
   SelectOption::Order(order.into_iter().collect())
}

/// Append `order` to ORDER BY.
pub fn with_select_order_append(
   order: impl IntoIterator<Item = OrderedExpression>,
) -> SelectOption {
   SelectOption::OrderAppend(order.into_iter().collect())
}

/// Select `*` instead of the descriptor columns.
pub fn with_select_star() -> SelectOption {
   SelectOption::Star
}

/// Keyset pagination over `columns`, all sorted the same way.
///
/// `values` is `None` for the first page, otherwise the keyset values of the
/// last row already returned, in column order.
pub fn with_key_set<I, S>(columns: I, values: Option<Vec<JsonValue>>, descending: bool) -> SelectOption
where
   I: IntoIterator<Item = S>,
   S: Into<String>,
{
   SelectOption::Keyset(KeysetSpec::uniform(columns, values, descending))
}

/// Keyset pagination with per-column sort directions.
pub fn with_keyset(spec: KeysetSpec) -> SelectOption {
   SelectOption::Keyset(spec)
}

/// Inner join each of `joins`, then select the columns described by `T`.
///
/// Each top-level entry of `T` is treated as a table and each of its fields
/// as a column on that table.
pub fn with_inner_join_selection<T: JoinSelectable>(joins: Vec<JoinOp>) -> SelectOption {
   SelectOption::JoinSelection(JoinSelection::new::<T>(JoinKind::Inner, joins))
}

/// Left join each of `joins`, then select the columns described by `T`.
///
/// Each top-level entry of `T` is treated as a table and each of its fields
/// as a column on that table.
pub fn with_left_join_selection<T: JoinSelectable>(joins: Vec<JoinOp>) -> SelectOption {
   SelectOption::JoinSelection(JoinSelection::new::<T>(JoinKind::Left, joins))
}
