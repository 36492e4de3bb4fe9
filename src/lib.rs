//! # keyset-select
//!
//! Composable SELECT construction with keyset pagination and multi-table
//! join selection.
//!
//! ## Core Types
//!
//! - **[`SelectOption`]**: one deferred statement transform; options apply left to right
//! - **[`KeysetSpec`]** / **[`KeysetColumn`]**: keyset columns, directions and boundary tuple
//! - **[`JoinOp`]**: one join folded in by a join-selection option
//! - **[`SelectConfig`]**: dialect and prepared mode for the initial statement
//! - **[`Error`]**: error type for statement assembly
//!
//! ## Entry Points
//!
//! - [`build_select`] renders SQL text plus ordered parameters
//! - [`build_select_dataset`] returns the live [`SelectDataset`] for further composition
//!
//! The select list comes from a [`columns::Selectable`] descriptor on the
//! destination type; see [`columns`].
//!
//! ## Features
//!
//! - `sqlx`: `bind::bind_query` binds rendered parameters to a SQLite query

#[cfg(feature = "sqlx")]
pub mod bind;
pub mod columns;
mod config;
mod error;
mod join;
pub mod keyset;
mod options;
mod select;

pub use config::SelectConfig;
pub use error::{Error, Result};
pub use join::{JoinOp, JoinSelection};
pub use keyset::{KeysetColumn, KeysetSpec, next_cursor};
pub use options::{
   SelectOption, with_inner_join_selection, with_key_set, with_keyset, with_left_join_selection,
   with_select_dialect, with_select_filters, with_select_limit, with_select_offset,
   with_select_order, with_select_order_append, with_select_prepared, with_select_star,
};
pub use select::{
   build_select, build_select_dataset, build_select_dataset_with_config, build_select_with_config,
};

pub use select_dataset::{
   ColumnRef, Dialect, Expression, JoinCondition, JoinKind, OrderedExpression, SelectDataset,
   SelectItem, SortDirection, TableIdentifier, and, not, or, table,
};
