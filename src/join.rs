//! Join selection: fold joins into a statement and project columns from
//! several tables at once.

use select_dataset::{Expression, JoinCondition, JoinKind, SelectDataset, TableIdentifier};
use tracing::trace;

use crate::Result;
use crate::columns::{JoinSelectable, SelectionTable, resolve_selection_tables, validate_table_name};

/// One join to fold into the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOp {
   /// Table to join
   pub table: String,
   /// How rows of `table` match the rows already in the statement
   pub on: JoinCondition,
}

impl JoinOp {
   pub fn new(table: impl Into<String>, on: JoinCondition) -> Self {
      Self {
         table: table.into(),
         on,
      }
   }

   /// Join `table` on the conjunction of `exprs`.
   pub fn on(table: impl Into<String>, exprs: impl IntoIterator<Item = Expression>) -> Self {
      Self::new(table, JoinCondition::on(exprs))
   }

   /// Join `table` on identically named columns.
   pub fn using<I, S>(table: impl Into<String>, columns: I) -> Self
   where
      I: IntoIterator<Item = S>,
      S: Into<String>,
   {
      Self::new(table, JoinCondition::using(columns))
   }
}

/// Joins plus the two-level descriptor whose columns replace the select list.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinSelection {
   kind: JoinKind,
   joins: Vec<JoinOp>,
   tables: &'static [SelectionTable],
   descriptor: &'static str,
}

impl JoinSelection {
   pub fn new<T: JoinSelectable>(kind: JoinKind, joins: Vec<JoinOp>) -> Self {
      Self {
         kind,
         joins,
         tables: T::TABLES,
         descriptor: std::any::type_name::<T>(),
      }
   }

   pub fn kind(&self) -> JoinKind {
      self.kind
   }

   pub fn joins(&self) -> &[JoinOp] {
      &self.joins
   }

   /// Fold every join, then replace the select list.
   pub(crate) fn apply(&self, dataset: SelectDataset) -> Result<SelectDataset> {
      let columns = resolve_selection_tables(self.tables, self.descriptor)?;

      let mut dataset = dataset;
      for join in &self.joins {
         validate_table_name(&join.table)?;
         dataset = dataset.join(self.kind, TableIdentifier::new(&join.table), join.on.clone());
      }

      trace!(
         joins = self.joins.len(),
         columns = columns.len(),
         descriptor = self.descriptor,
         "Applied join selection"
      );

      Ok(dataset.select(columns))
   }
}
