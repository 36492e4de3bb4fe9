//! Identifiers, predicates and ordering terms consumed by [`SelectDataset`](crate::SelectDataset)

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Handle to a table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableIdentifier {
   name: String,
}

impl TableIdentifier {
   pub fn new(name: impl Into<String>) -> Self {
      Self { name: name.into() }
   }

   pub fn name(&self) -> &str {
      &self.name
   }

   /// Resolve `column` into a reference qualified by this table.
   pub fn col(&self, column: impl Into<String>) -> ColumnRef {
      ColumnRef::new(self.name.clone(), column)
   }
}

impl fmt::Display for TableIdentifier {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(&self.name)
   }
}

/// Shorthand for [`TableIdentifier::new`].
pub fn table(name: impl Into<String>) -> TableIdentifier {
   TableIdentifier::new(name)
}

/// A column, optionally qualified by its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
   table: Option<String>,
   column: String,
}

impl ColumnRef {
   /// Create a table-qualified column reference.
   pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
      Self {
         table: Some(table.into()),
         column: column.into(),
      }
   }

   /// Create an unqualified column reference (renders without a table prefix).
   pub fn bare(column: impl Into<String>) -> Self {
      Self {
         table: None,
         column: column.into(),
      }
   }

   pub fn table(&self) -> Option<&str> {
      self.table.as_deref()
   }

   pub fn column(&self) -> &str {
      &self.column
   }

   fn compare(&self, op: CompareOp, right: Operand) -> Expression {
      Expression::Compare {
         left: self.clone(),
         op,
         right,
      }
   }

   /// `column = value`. Comparing against JSON `null` renders `IS NULL`.
   pub fn eq(&self, value: impl Into<JsonValue>) -> Expression {
      self.compare(CompareOp::Eq, Operand::Value(value.into()))
   }

   /// `column <> value`. Comparing against JSON `null` renders `IS NOT NULL`.
   pub fn neq(&self, value: impl Into<JsonValue>) -> Expression {
      self.compare(CompareOp::Neq, Operand::Value(value.into()))
   }

   pub fn lt(&self, value: impl Into<JsonValue>) -> Expression {
      self.compare(CompareOp::Lt, Operand::Value(value.into()))
   }

   pub fn lte(&self, value: impl Into<JsonValue>) -> Expression {
      self.compare(CompareOp::Lte, Operand::Value(value.into()))
   }

   pub fn gt(&self, value: impl Into<JsonValue>) -> Expression {
      self.compare(CompareOp::Gt, Operand::Value(value.into()))
   }

   pub fn gte(&self, value: impl Into<JsonValue>) -> Expression {
      self.compare(CompareOp::Gte, Operand::Value(value.into()))
   }

   /// `column = other`, typically used in join conditions.
   pub fn eq_col(&self, other: &ColumnRef) -> Expression {
      self.compare(CompareOp::Eq, Operand::Column(other.clone()))
   }

   pub fn is_null(&self) -> Expression {
      Expression::IsNull {
         column: self.clone(),
         negated: false,
      }
   }

   pub fn is_not_null(&self) -> Expression {
      Expression::IsNull {
         column: self.clone(),
         negated: true,
      }
   }

   /// `column IN (values…)`. Rendering fails if `values` is empty.
   pub fn in_list<I, V>(&self, values: I) -> Expression
   where
      I: IntoIterator<Item = V>,
      V: Into<JsonValue>,
   {
      Expression::In {
         column: self.clone(),
         values: values.into_iter().map(Into::into).collect(),
      }
   }

   pub fn asc(&self) -> OrderedExpression {
      OrderedExpression::new(self.clone(), SortDirection::Asc)
   }

   pub fn desc(&self) -> OrderedExpression {
      OrderedExpression::new(self.clone(), SortDirection::Desc)
   }

   /// Ordering term in the given direction.
   pub fn ordered(&self, direction: SortDirection) -> OrderedExpression {
      OrderedExpression::new(self.clone(), direction)
   }
}

impl fmt::Display for ColumnRef {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      match &self.table {
         Some(table) => write!(f, "{}.{}", table, self.column),
         None => f.write_str(&self.column),
      }
   }
}

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
   Eq,
   Neq,
   Lt,
   Lte,
   Gt,
   Gte,
}

impl CompareOp {
   pub fn as_sql(self) -> &'static str {
      match self {
         CompareOp::Eq => "=",
         CompareOp::Neq => "<>",
         CompareOp::Lt => "<",
         CompareOp::Lte => "<=",
         CompareOp::Gt => ">",
         CompareOp::Gte => ">=",
      }
   }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
   /// A literal, bound as a parameter in prepared mode
   Value(JsonValue),
   /// Another column
   Column(ColumnRef),
}

/// A boolean SQL expression.
///
/// Compound variants with no children are "empty" and render nothing, so an
/// empty `Or` added to a WHERE clause is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
   Compare {
      left: ColumnRef,
      op: CompareOp,
      right: Operand,
   },
   IsNull {
      column: ColumnRef,
      negated: bool,
   },
   In {
      column: ColumnRef,
      values: Vec<JsonValue>,
   },
   And(Vec<Expression>),
   Or(Vec<Expression>),
   Not(Box<Expression>),
}

impl Expression {
   /// Whether this expression renders to nothing.
   pub fn is_empty(&self) -> bool {
      match self {
         Expression::And(exprs) | Expression::Or(exprs) => exprs.iter().all(Expression::is_empty),
         Expression::Not(inner) => inner.is_empty(),
         _ => false,
      }
   }
}

/// Conjunction of `exprs`.
pub fn and(exprs: impl IntoIterator<Item = Expression>) -> Expression {
   Expression::And(exprs.into_iter().collect())
}

/// Disjunction of `exprs`.
pub fn or(exprs: impl IntoIterator<Item = Expression>) -> Expression {
   Expression::Or(exprs.into_iter().collect())
}

/// Negation of `expr`.
pub fn not(expr: Expression) -> Expression {
   Expression::Not(Box::new(expr))
}

/// Sort direction for an ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
   /// Ascending order (smallest first)
   Asc,
   /// Descending order (largest first)
   Desc,
}

impl SortDirection {
   /// Return the opposite sort direction.
   pub fn reversed(self) -> Self {
      match self {
         SortDirection::Asc => SortDirection::Desc,
         SortDirection::Desc => SortDirection::Asc,
      }
   }

   pub fn as_sql(self) -> &'static str {
      match self {
         SortDirection::Asc => "ASC",
         SortDirection::Desc => "DESC",
      }
   }
}

/// A column paired with a sort direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderedExpression {
   column: ColumnRef,
   direction: SortDirection,
}

impl OrderedExpression {
   pub fn new(column: ColumnRef, direction: SortDirection) -> Self {
      Self { column, direction }
   }

   pub fn column(&self) -> &ColumnRef {
      &self.column
   }

   pub fn direction(&self) -> SortDirection {
      self.direction
   }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectItem {
   /// `*`
   Star,
   Column(ColumnRef),
}

impl From<ColumnRef> for SelectItem {
   fn from(column: ColumnRef) -> Self {
      SelectItem::Column(column)
   }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JoinKind {
   Inner,
   Left,
}

impl JoinKind {
   pub fn as_sql(self) -> &'static str {
      match self {
         JoinKind::Inner => "INNER JOIN",
         JoinKind::Left => "LEFT JOIN",
      }
   }
}

/// How a joined table is matched against the rows already in the statement.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
   /// `ON <expr> AND <expr> …`
   On(Vec<Expression>),
   /// `USING (<col>, …)`
   Using(Vec<String>),
}

impl JoinCondition {
   pub fn on(exprs: impl IntoIterator<Item = Expression>) -> Self {
      JoinCondition::On(exprs.into_iter().collect())
   }

   pub fn using<I, S>(columns: I) -> Self
   where
      I: IntoIterator<Item = S>,
      S: Into<String>,
   {
      JoinCondition::Using(columns.into_iter().map(Into::into).collect())
   }
}

/// A join folded into a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
   kind: JoinKind,
   table: TableIdentifier,
   condition: JoinCondition,
}

impl JoinClause {
   pub fn new(kind: JoinKind, table: TableIdentifier, condition: JoinCondition) -> Self {
      Self {
         kind,
         table,
         condition,
      }
   }

   pub fn kind(&self) -> JoinKind {
      self.kind
   }

   pub fn table(&self) -> &TableIdentifier {
      &self.table
   }

   pub fn condition(&self) -> &JoinCondition {
      &self.condition
   }
}
