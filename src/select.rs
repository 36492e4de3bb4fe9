//! SELECT statement assembly: resolve the base projection, build the initial
//! statement, and fold the options over it.

use select_dataset::{SelectDataset, TableIdentifier};
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use crate::Result;
use crate::columns::{Selectable, resolve_columns, validate_table_name};
use crate::config::SelectConfig;
use crate::options::SelectOption;

/// Build and render a SELECT over `table_name` with the default configuration.
///
/// The select list is the non-skipped columns of `T`; `options` are then
/// applied left to right.
///
/// `table_name` is quoted as one identifier, so any non-empty name without a
/// NUL character is accepted; `main.users` is not split into a schema and a
/// table.
///
/// # Example
///
/// ```
/// use keyset_select::columns::{FieldColumn, Selectable};
/// use keyset_select::{build_select, with_key_set, with_select_limit};
/// use serde_json::json;
///
/// struct Post;
///
/// impl Selectable for Post {
///    const FIELDS: &'static [FieldColumn] = &[
///       FieldColumn::new("id", "id"),
///       FieldColumn::new("title", "title"),
///    ];
/// }
///
/// let (sql, params) = build_select::<Post>(
///    "posts",
///    &[
///       with_select_limit(20),
///       with_key_set(["id"], Some(vec![json!(40)]), false),
///    ],
/// )
/// .unwrap();
///
/// assert_eq!(
///    sql,
///    r#"SELECT "posts"."id", "posts"."title" FROM "posts" WHERE ("posts"."id" > ?) ORDER BY "posts"."id" ASC LIMIT 20"#
/// );
/// assert_eq!(params, vec![json!(40)]);
/// ```
pub fn build_select<T: Selectable>(
   table_name: &str,
   options: &[SelectOption],
) -> Result<(String, Vec<JsonValue>)> {
   build_select_with_config::<T>(table_name, &SelectConfig::default(), options)
}

/// Like [`build_select`], starting from `config`.
pub fn build_select_with_config<T: Selectable>(
   table_name: &str,
   config: &SelectConfig,
   options: &[SelectOption],
) -> Result<(String, Vec<JsonValue>)> {
   let dataset = build_select_dataset_with_config::<T>(table_name, config, options)?;
   let (sql, params) = dataset.to_sql()?;

   trace!(table = table_name, sql = %sql, params = params.len(), "Built select");

   Ok((sql, params))
}

/// Build a SELECT over `table_name` and return the live statement for
/// further composition, without rendering it.
pub fn build_select_dataset<T: Selectable>(
   table_name: &str,
   options: &[SelectOption],
) -> Result<SelectDataset> {
   build_select_dataset_with_config::<T>(table_name, &SelectConfig::default(), options)
}

/// Like [`build_select_dataset`], starting from `config`.
pub fn build_select_dataset_with_config<T: Selectable>(
   table_name: &str,
   config: &SelectConfig,
   options: &[SelectOption],
) -> Result<SelectDataset> {
   validate_table_name(table_name)?;
   let table = TableIdentifier::new(table_name);
   let columns = resolve_columns::<T>(&table)?;

   debug!(
      table = %table,
      columns = columns.len(),
      options = options.len(),
      dialect = %config.dialect,
      "Building select"
   );

   let initial = SelectDataset::new(table.clone())
      .with_dialect(config.dialect.name())
      .prepared(config.prepared)
      .select(columns);

   options
      .iter()
      .try_fold(initial, |dataset, option| option.apply(&table, dataset))
}
