//! SQL text generation for [`SelectDataset`]

use serde_json::Value as JsonValue;
use tracing::trace;

use crate::dataset::SelectDataset;
use crate::dialect::Dialect;
use crate::expr::{
   ColumnRef, CompareOp, Expression, JoinClause, JoinCondition, Operand, OrderedExpression,
   SelectItem,
};
use crate::{Error, Result};

/// Accumulates SQL text and bound parameters for one statement.
struct SqlWriter {
   dialect: Dialect,
   prepared: bool,
   sql: String,
   params: Vec<JsonValue>,
}

impl SqlWriter {
   fn new(dialect: Dialect, prepared: bool) -> Self {
      Self {
         dialect,
         prepared,
         sql: String::new(),
         params: Vec::new(),
      }
   }

   fn push(&mut self, s: &str) {
      self.sql.push_str(s);
   }

   fn identifier(&mut self, name: &str) -> Result<()> {
      if name.is_empty() {
         return Err(Error::InvalidIdentifier {
            name: name.to_string(),
         });
      }
      let quoted = self.dialect.quote_identifier(name);
      self.push(&quoted);
      Ok(())
   }

   fn column(&mut self, column: &ColumnRef) -> Result<()> {
      if let Some(table) = column.table() {
         self.identifier(table)?;
         self.push(".");
      }
      self.identifier(column.column())
   }

   /// Emit a placeholder (prepared mode) or an inlined literal.
   fn value(&mut self, value: &JsonValue) {
      if self.prepared {
         self.params.push(value.clone());
         let placeholder = self.dialect.placeholder(self.params.len());
         self.push(&placeholder);
      } else {
         let literal = self.literal(value);
         self.push(&literal);
      }
   }

   fn literal(&self, value: &JsonValue) -> String {
      match value {
         JsonValue::Null => "NULL".to_string(),
         JsonValue::Bool(b) => self.dialect.bool_literal(*b).to_string(),
         JsonValue::Number(n) => n.to_string(),
         JsonValue::String(s) => self.dialect.string_literal(s),
         // Arrays and objects are stored as JSON text
         other => self.dialect.string_literal(&other.to_string()),
      }
   }

   fn select_list(&mut self, items: &[SelectItem]) -> Result<()> {
      if items.is_empty() {
         self.push("*");
         return Ok(());
      }
      for (i, item) in items.iter().enumerate() {
         if i > 0 {
            self.push(", ");
         }
         match item {
            SelectItem::Star => self.push("*"),
            SelectItem::Column(column) => self.column(column)?,
         }
      }
      Ok(())
   }

   /// Render non-empty `exprs` joined by `separator`, parenthesized when
   /// there is more than one.
   fn expression_list(&mut self, exprs: &[Expression], separator: &str) -> Result<()> {
      let exprs: Vec<&Expression> = exprs.iter().filter(|e| !e.is_empty()).collect();
      if let [single] = exprs.as_slice() {
         return self.expression(single);
      }
      self.push("(");
      for (i, expr) in exprs.iter().enumerate() {
         if i > 0 {
            self.push(separator);
         }
         self.expression(expr)?;
      }
      self.push(")");
      Ok(())
   }

   fn expression(&mut self, expr: &Expression) -> Result<()> {
      match expr {
         Expression::Compare { left, op, right } => {
            self.push("(");
            self.column(left)?;
            match (op, right) {
               (CompareOp::Eq, Operand::Value(JsonValue::Null)) => self.push(" IS NULL"),
               (CompareOp::Neq, Operand::Value(JsonValue::Null)) => self.push(" IS NOT NULL"),
               (op, Operand::Value(value)) => {
                  self.push(" ");
                  self.push(op.as_sql());
                  self.push(" ");
                  self.value(value);
               }
               (op, Operand::Column(other)) => {
                  self.push(" ");
                  self.push(op.as_sql());
                  self.push(" ");
                  self.column(other)?;
               }
            }
            self.push(")");
         }
         Expression::IsNull { column, negated } => {
            self.push("(");
            self.column(column)?;
            self.push(if *negated { " IS NOT NULL)" } else { " IS NULL)" });
         }
         Expression::In { column, values } => {
            if values.is_empty() {
               return Err(Error::EmptyInList {
                  column: column.to_string(),
               });
            }
            self.push("(");
            self.column(column)?;
            self.push(" IN (");
            for (i, value) in values.iter().enumerate() {
               if i > 0 {
                  self.push(", ");
               }
               self.value(value);
            }
            self.push("))");
         }
         Expression::And(exprs) => self.expression_list(exprs, " AND ")?,
         Expression::Or(exprs) => self.expression_list(exprs, " OR ")?,
         Expression::Not(inner) => {
            self.push("NOT ");
            self.expression(inner)?;
         }
      }
      Ok(())
   }

   fn join(&mut self, join: &JoinClause) -> Result<()> {
      self.push(" ");
      self.push(join.kind().as_sql());
      self.push(" ");
      self.identifier(join.table().name())?;

      let empty = match join.condition() {
         JoinCondition::On(exprs) => exprs.iter().all(Expression::is_empty),
         JoinCondition::Using(columns) => columns.is_empty(),
      };
      if empty {
         return Err(Error::EmptyJoinCondition {
            table: join.table().name().to_string(),
         });
      }

      match join.condition() {
         JoinCondition::On(exprs) => {
            self.push(" ON ");
            self.expression_list(exprs, " AND ")?;
         }
         JoinCondition::Using(columns) => {
            self.push(" USING (");
            for (i, column) in columns.iter().enumerate() {
               if i > 0 {
                  self.push(", ");
               }
               self.identifier(column)?;
            }
            self.push(")");
         }
      }
      Ok(())
   }

   fn order_by(&mut self, terms: &[OrderedExpression]) -> Result<()> {
      self.push(" ORDER BY ");
      for (i, term) in terms.iter().enumerate() {
         if i > 0 {
            self.push(", ");
         }
         self.column(term.column())?;
         self.push(" ");
         self.push(term.direction().as_sql());
      }
      Ok(())
   }

   fn paging(&mut self, has_order: bool, limit: Option<u64>, offset: Option<u64>) {
      if self.dialect.uses_fetch_paging() {
         if limit.is_none() && offset.is_none() {
            return;
         }
         // OFFSET/FETCH is only valid after an ORDER BY
         if !has_order {
            self.push(" ORDER BY (SELECT NULL)");
         }
         self.push(&format!(" OFFSET {} ROWS", offset.unwrap_or(0)));
         if let Some(limit) = limit {
            self.push(&format!(" FETCH NEXT {} ROWS ONLY", limit));
         }
         return;
      }

      if let Some(limit) = limit {
         self.push(&format!(" LIMIT {}", limit));
      }
      if let Some(offset) = offset {
         self.push(&format!(" OFFSET {}", offset));
      }
   }

   fn finish(self) -> (String, Vec<JsonValue>) {
      (self.sql, self.params)
   }
}

/// Render a dataset into SQL text and its bound parameters.
pub(crate) fn render_select(dataset: &SelectDataset) -> Result<(String, Vec<JsonValue>)> {
   let dialect: Dialect = dataset.dialect_name().parse()?;
   let mut writer = SqlWriter::new(dialect, dataset.is_prepared());

   writer.push("SELECT ");
   writer.select_list(dataset.selects())?;
   writer.push(" FROM ");
   writer.identifier(dataset.table().name())?;

   for join in dataset.joins() {
      writer.join(join)?;
   }

   if dataset.filters().iter().any(|e| !e.is_empty()) {
      writer.push(" WHERE ");
      writer.expression_list(dataset.filters(), " AND ")?;
   }

   let has_order = !dataset.orders().is_empty();
   if has_order {
      writer.order_by(dataset.orders())?;
   }

   writer.paging(has_order, dataset.limit_value(), dataset.offset_value());

   let (sql, params) = writer.finish();
   trace!(
      dialect = %dialect,
      prepared = dataset.is_prepared(),
      sql_len = sql.len(),
      params = params.len(),
      "Rendered select statement"
   );

   Ok((sql, params))
}
