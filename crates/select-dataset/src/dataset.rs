//! The immutable SELECT statement value

use serde_json::Value as JsonValue;

use crate::Result;
use crate::dialect::Dialect;
use crate::expr::{
   Expression, JoinClause, JoinCondition, JoinKind, OrderedExpression, SelectItem, TableIdentifier,
};
use crate::render;

/// A SELECT statement under construction.
///
/// Every builder method consumes the dataset and returns the transformed
/// value; nothing is shared between two datasets, so a clone of a base
/// statement can seed any number of independent chains.
///
/// # Example
///
/// ```
/// use select_dataset::{SelectDataset, table};
///
/// let users = table("users");
/// let (sql, params) = SelectDataset::new(users.clone())
///    .select([users.col("id"), users.col("name")])
///    .filter([users.col("active").eq(true)])
///    .order([users.col("id").asc()])
///    .limit(10)
///    .to_sql()
///    .unwrap();
///
/// assert_eq!(
///    sql,
///    r#"SELECT "users"."id", "users"."name" FROM "users" WHERE ("users"."active" = ?) ORDER BY "users"."id" ASC LIMIT 10"#
/// );
/// assert_eq!(params, vec![serde_json::json!(true)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectDataset {
   dialect: String,
   prepared: bool,
   from: TableIdentifier,
   selects: Vec<SelectItem>,
   joins: Vec<JoinClause>,
   filters: Vec<Expression>,
   orders: Vec<OrderedExpression>,
   limit: Option<u64>,
   offset: Option<u64>,
}

impl SelectDataset {
   /// Start a `SELECT * FROM table` in the default dialect, prepared mode.
   pub fn new(from: TableIdentifier) -> Self {
      Self {
         dialect: Dialect::Default.name().to_string(),
         prepared: true,
         from,
         selects: Vec::new(),
         joins: Vec::new(),
         filters: Vec::new(),
         orders: Vec::new(),
         limit: None,
         offset: None,
      }
   }

   /// Set the dialect by name. Unknown names are reported by [`to_sql`](Self::to_sql).
   pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
      self.dialect = dialect.into();
      self
   }

   /// Render with placeholders (`true`) or inlined literals (`false`).
   pub fn prepared(mut self, prepared: bool) -> Self {
      self.prepared = prepared;
      self
   }

   /// Replace the select list.
   pub fn select<I, S>(mut self, items: I) -> Self
   where
      I: IntoIterator<Item = S>,
      S: Into<SelectItem>,
   {
      self.selects = items.into_iter().map(Into::into).collect();
      self
   }

   /// Replace the select list with `*`.
   pub fn select_star(mut self) -> Self {
      self.selects = vec![SelectItem::Star];
      self
   }

   /// Add WHERE conjuncts; they are ANDed with any existing ones.
   pub fn filter(mut self, exprs: impl IntoIterator<Item = Expression>) -> Self {
      self.filters.extend(exprs);
      self
   }

   pub fn clear_filter(mut self) -> Self {
      self.filters.clear();
      self
   }

   /// Replace the ORDER BY clause.
   pub fn order(mut self, terms: impl IntoIterator<Item = OrderedExpression>) -> Self {
      self.orders = terms.into_iter().collect();
      self
   }

   /// Append to the ORDER BY clause.
   pub fn order_append(mut self, terms: impl IntoIterator<Item = OrderedExpression>) -> Self {
      self.orders.extend(terms);
      self
   }

   pub fn clear_order(mut self) -> Self {
      self.orders.clear();
      self
   }

   /// Set LIMIT. A limit of `0` removes the clause.
   pub fn limit(mut self, limit: u64) -> Self {
      self.limit = (limit > 0).then_some(limit);
      self
   }

   pub fn clear_limit(mut self) -> Self {
      self.limit = None;
      self
   }

   /// Set OFFSET. An offset of `0` removes the clause.
   pub fn offset(mut self, offset: u64) -> Self {
      self.offset = (offset > 0).then_some(offset);
      self
   }

   pub fn clear_offset(mut self) -> Self {
      self.offset = None;
      self
   }

   /// Append a join.
   pub fn join(mut self, kind: JoinKind, table: TableIdentifier, condition: JoinCondition) -> Self {
      self.joins.push(JoinClause::new(kind, table, condition));
      self
   }

   pub fn inner_join(self, table: TableIdentifier, condition: JoinCondition) -> Self {
      self.join(JoinKind::Inner, table, condition)
   }

   pub fn left_join(self, table: TableIdentifier, condition: JoinCondition) -> Self {
      self.join(JoinKind::Left, table, condition)
   }

   pub fn dialect_name(&self) -> &str {
      &self.dialect
   }

   pub fn is_prepared(&self) -> bool {
      self.prepared
   }

   pub fn table(&self) -> &TableIdentifier {
      &self.from
   }

   pub fn selects(&self) -> &[SelectItem] {
      &self.selects
   }

   pub fn joins(&self) -> &[JoinClause] {
      &self.joins
   }

   pub fn filters(&self) -> &[Expression] {
      &self.filters
   }

   pub fn orders(&self) -> &[OrderedExpression] {
      &self.orders
   }

   pub fn limit_value(&self) -> Option<u64> {
      self.limit
   }

   pub fn offset_value(&self) -> Option<u64> {
      self.offset
   }

   /// Render to SQL text and the ordered parameter list.
   ///
   /// In interpolated mode the parameter list is always empty.
   pub fn to_sql(&self) -> Result<(String, Vec<JsonValue>)> {
      render::render_select(self)
   }
}
