//! # select-dataset
//!
//! Immutable SELECT statement values with dialect-aware SQL rendering.
//!
//! ## Core Types
//!
//! - **[`SelectDataset`]**: SELECT statement value; each builder method returns a new value
//! - **[`TableIdentifier`]** / **[`ColumnRef`]**: table handles and table-qualified columns
//! - **[`Expression`]** / **[`OrderedExpression`]**: predicates and ordering terms
//! - **[`Dialect`]**: identifier quoting, placeholder and paging rules
//! - **[`Error`]**: rendering errors
//!
//! ## Rendering
//!
//! [`SelectDataset::to_sql`] returns the SQL text and the ordered parameter
//! list. Prepared mode (the default) emits placeholders; interpolated mode
//! inlines escaped literals and returns no parameters.

mod dataset;
mod dialect;
mod error;
mod expr;
mod render;

pub use dataset::SelectDataset;
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use expr::{
   ColumnRef, CompareOp, Expression, JoinClause, JoinCondition, JoinKind, Operand,
   OrderedExpression, SelectItem, SortDirection, TableIdentifier, and, not, or, table,
};
