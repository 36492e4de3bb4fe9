use keyset_select::columns::{FieldColumn, JoinSelectable, Selectable, SelectionTable};
use keyset_select::{
   ColumnRef, Dialect, Error, Expression, JoinKind, JoinOp, KeysetColumn, KeysetSpec,
   SelectConfig, SelectDataset, SelectItem, and, build_select, build_select_dataset,
   build_select_with_config, next_cursor, or, table, with_inner_join_selection, with_key_set,
   with_keyset, with_left_join_selection, with_select_dialect, with_select_filters,
   with_select_limit, with_select_offset, with_select_order, with_select_prepared,
   with_select_star,
};
use serde_json::json;

struct Item;

impl Selectable for Item {
   const FIELDS: &'static [FieldColumn] = &[
      FieldColumn::new("a", "a"),
      FieldColumn::new("b", "b"),
      FieldColumn::new("payload", "payload").skip_select(),
   ];
}

struct UserOrder;

const USERS: &[FieldColumn] = &[FieldColumn::new("ID", "id"), FieldColumn::new("Name", "name")];
const ORDERS: &[FieldColumn] = &[FieldColumn::new("Total", "total")];

impl JoinSelectable for UserOrder {
   const TABLES: &'static [SelectionTable] = &[
      SelectionTable::new("users", USERS),
      SelectionTable::new("orders", ORDERS),
   ];
}

// ─── Keyset ───

#[test]
fn first_page_orders_without_where() {
   let (sql, params) = build_select::<Item>("t", &[with_key_set(["a", "b"], None, false)]).unwrap();

   assert_eq!(
      sql,
      r#"SELECT "t"."a", "t"."b" FROM "t" ORDER BY "t"."a" ASC, "t"."b" ASC"#
   );
   assert!(params.is_empty());
}

#[test]
fn ascending_boundary_predicate() {
   let (sql, params) = build_select::<Item>(
      "t",
      &[with_key_set(["a", "b"], Some(vec![json!(1), json!(2)]), false)],
   )
   .unwrap();

   assert_eq!(
      sql,
      r#"SELECT "t"."a", "t"."b" FROM "t" WHERE (("t"."a" > ?) OR (("t"."a" = ?) AND ("t"."b" > ?))) ORDER BY "t"."a" ASC, "t"."b" ASC"#
   );
   assert_eq!(params, vec![json!(1), json!(1), json!(2)]);
}

#[test]
fn descending_boundary_predicate() {
   let (sql, params) = build_select::<Item>(
      "t",
      &[with_key_set(["a", "b"], Some(vec![json!(1), json!(2)]), true)],
   )
   .unwrap();

   assert_eq!(
      sql,
      r#"SELECT "t"."a", "t"."b" FROM "t" WHERE (("t"."a" < ?) OR (("t"."a" = ?) AND ("t"."b" < ?))) ORDER BY "t"."a" DESC, "t"."b" DESC"#
   );
   assert_eq!(params, vec![json!(1), json!(1), json!(2)]);
}

#[test]
fn keyset_after_offset_always_clears_it() {
   for offset in [1u64, 2, 17, 500, u32::MAX as u64] {
      for boundary in [None, Some(vec![json!(9)])] {
         let ds = build_select_dataset::<Item>(
            "t",
            &[with_select_offset(offset), with_key_set(["a"], boundary, false)],
         )
         .unwrap();
         assert_eq!(ds.offset_value(), None, "offset {} was kept", offset);
      }
   }
}

#[test]
fn limit_offset_keyset_composition() {
   let t = table("t");
   let ds = build_select_dataset::<Item>(
      "t",
      &[
         with_select_limit(10),
         with_select_offset(5),
         with_key_set(["a", "b"], Some(vec![json!(1), json!(2)]), false),
      ],
   )
   .unwrap();

   assert_eq!(ds.limit_value(), Some(10));
   assert_eq!(ds.offset_value(), None);
   assert_eq!(ds.orders(), &[t.col("a").asc(), t.col("b").asc()]);
   assert_eq!(
      ds.filters(),
      &[or([
         and([t.col("a").gt(1)]),
         and([t.col("a").eq(1), t.col("b").gt(2)]),
      ])]
   );

   let (sql, _) = ds.to_sql().unwrap();
   assert!(sql.ends_with("LIMIT 10"));
}

#[test]
fn later_limit_overrides_earlier_one() {
   let ds =
      build_select_dataset::<Item>("t", &[with_select_limit(10), with_select_limit(3)]).unwrap();
   assert_eq!(ds.limit_value(), Some(3));
}

#[test]
fn per_column_directions() {
   let spec = KeysetSpec::new(vec![
      KeysetColumn::asc("a"),
      KeysetColumn::desc("b"),
   ])
   .after(vec![json!("x"), json!(7)]);

   let (sql, params) = build_select::<Item>("t", &[with_keyset(spec)]).unwrap();

   assert_eq!(
      sql,
      r#"SELECT "t"."a", "t"."b" FROM "t" WHERE (("t"."a" > ?) OR (("t"."a" = ?) AND ("t"."b" < ?))) ORDER BY "t"."a" ASC, "t"."b" DESC"#
   );
   assert_eq!(params, vec![json!("x"), json!("x"), json!(7)]);
}

#[test]
fn keyset_shape_for_n_columns() {
   for n in 1..=6usize {
      let names: Vec<String> = (0..n).map(|i| format!("c{}", i)).collect();
      let boundary: Vec<_> = (0..n).map(|i| json!(i)).collect();

      let ds = build_select_dataset::<Item>("t", &[with_key_set(names, Some(boundary), false)])
         .unwrap();

      let [Expression::Or(clauses)] = ds.filters() else {
         panic!("expected a single disjunction");
      };
      assert_eq!(clauses.len(), n);
      for (i, clause) in clauses.iter().enumerate() {
         let Expression::And(parts) = clause else {
            panic!("expected a conjunction");
         };
         assert_eq!(parts.len(), i + 1);
      }
   }
}

#[test]
fn keyset_filters_are_anded_with_caller_filters() {
   let t = table("t");
   let (sql, params) = build_select::<Item>(
      "t",
      &[
         with_select_filters([t.col("b").neq(json!(null))]),
         with_key_set(["a"], Some(vec![json!(4)]), true),
      ],
   )
   .unwrap();

   assert_eq!(
      sql,
      r#"SELECT "t"."a", "t"."b" FROM "t" WHERE (("t"."b" IS NOT NULL) AND ("t"."a" < ?)) ORDER BY "t"."a" DESC"#
   );
   assert_eq!(params, vec![json!(4)]);
}

#[test]
fn keyset_guards() {
   let err = build_select::<Item>("t", &[with_key_set(Vec::<String>::new(), None, false)])
      .unwrap_err();
   assert!(matches!(err, Error::EmptyKeysetColumns));

   let err = build_select::<Item>("t", &[with_key_set(["a", "b"], Some(vec![json!(1)]), false)])
      .unwrap_err();
   assert_eq!(err.error_code(), "CURSOR_LENGTH_MISMATCH");

   let err = build_select::<Item>("t", &[with_key_set(["a OR 1=1"], None, false)]).unwrap_err();
   assert!(matches!(err, Error::InvalidColumnName { .. }));
}

#[test]
fn next_cursor_feeds_the_next_page() {
   let keyset = vec![KeysetColumn::asc("a"), KeysetColumn::asc("b")];
   let last_row = indexmap::IndexMap::from([
      ("a".to_string(), json!(3)),
      ("b".to_string(), json!("z")),
      ("payload".to_string(), json!({"k": 1})),
   ]);

   let cursor = next_cursor(&last_row, &keyset).unwrap();
   let spec = KeysetSpec::new(keyset).after(cursor);
   let (_, params) = build_select::<Item>("t", &[with_keyset(spec)]).unwrap();

   assert_eq!(params, vec![json!(3), json!(3), json!("z")]);
}

// ─── Join selection ───

#[test]
fn join_selection_projection_and_joins() {
   let users = table("users");
   let orders = table("orders");
   let teams = table("teams");

   let joins = vec![
      JoinOp::on("orders", [orders.col("user_id").eq_col(&users.col("id"))]),
      JoinOp::on("teams", [teams.col("id").eq_col(&users.col("team_id"))]),
   ];

   // Projection is the same whichever side of the other options it lands on
   let orderings = [
      vec![
         with_select_limit(5),
         with_inner_join_selection::<UserOrder>(joins.clone()),
         with_select_order([users.col("id").asc()]),
      ],
      vec![
         with_inner_join_selection::<UserOrder>(joins.clone()),
         with_select_order([users.col("id").asc()]),
         with_select_limit(5),
      ],
      vec![
         with_select_order([users.col("id").asc()]),
         with_select_limit(5),
         with_inner_join_selection::<UserOrder>(joins.clone()),
      ],
   ];

   for options in orderings {
      let ds = build_select_dataset::<Item>("users", &options).unwrap();

      assert_eq!(
         ds.selects(),
         &[
            SelectItem::Column(ColumnRef::new("users", "id")),
            SelectItem::Column(ColumnRef::new("users", "name")),
            SelectItem::Column(ColumnRef::new("orders", "total")),
         ]
      );
      assert_eq!(ds.joins().len(), 2);
      assert_eq!(ds.joins()[0].table().name(), "orders");
      assert_eq!(ds.joins()[1].table().name(), "teams");
      assert_eq!(ds.limit_value(), Some(5));
   }
}

#[test]
fn left_join_selection_renders() {
   let users = table("users");
   let orders = table("orders");

   let (sql, params) = build_select::<Item>(
      "users",
      &[
         with_left_join_selection::<UserOrder>(vec![JoinOp::on(
            "orders",
            [orders.col("user_id").eq_col(&users.col("id"))],
         )]),
         with_select_filters([orders.col("total").gte(100)]),
      ],
   )
   .unwrap();

   assert_eq!(
      sql,
      r#"SELECT "users"."id", "users"."name", "orders"."total" FROM "users" LEFT JOIN "orders" ON ("orders"."user_id" = "users"."id") WHERE ("orders"."total" >= ?)"#
   );
   assert_eq!(params, vec![json!(100)]);
}

#[test]
fn join_selection_with_keyset_on_joined_column() {
   let users = table("users");
   let orders = table("orders");

   let spec = KeysetSpec::new(vec![
      KeysetColumn::desc("orders.total"),
      KeysetColumn::asc("id"),
   ])
   .after(vec![json!(50), json!(8)]);

   let (sql, _) = build_select::<Item>(
      "users",
      &[
         with_inner_join_selection::<UserOrder>(vec![JoinOp::on(
            "orders",
            [orders.col("user_id").eq_col(&users.col("id"))],
         )]),
         with_keyset(spec),
      ],
   )
   .unwrap();

   assert!(sql.contains(r#"INNER JOIN "orders""#));
   assert!(sql.ends_with(r#"ORDER BY "orders"."total" DESC, "users"."id" ASC"#));
}

#[test]
fn last_projection_wins() {
   let joins = vec![JoinOp::using("orders", ["user_id"])];

   let ds = build_select_dataset::<Item>(
      "users",
      &[
         with_inner_join_selection::<UserOrder>(joins.clone()),
         with_select_star(),
      ],
   )
   .unwrap();
   assert_eq!(ds.selects(), &[SelectItem::Star]);
   // Joins stay even when the projection is replaced
   assert_eq!(ds.joins()[0].kind(), JoinKind::Inner);

   let ds = build_select_dataset::<Item>(
      "users",
      &[with_select_star(), with_inner_join_selection::<UserOrder>(joins)],
   )
   .unwrap();
   assert_eq!(ds.selects().len(), 3);
}

// ─── Entry points, config and dialects ───

#[test]
fn live_statement_composes_further() {
   let t = table("t");
   let ds = build_select_dataset::<Item>("t", &[with_key_set(["a"], None, false)]).unwrap();

   let branched: SelectDataset = ds.clone().filter([t.col("b").eq("x")]).limit(2);

   assert!(ds.filters().is_empty());
   let (sql, _) = branched.to_sql().unwrap();
   assert_eq!(
      sql,
      r#"SELECT "t"."a", "t"."b" FROM "t" WHERE ("t"."b" = ?) ORDER BY "t"."a" ASC LIMIT 2"#
   );
}

#[test]
fn postgres_placeholders_are_numbered() {
   let (sql, _) = build_select::<Item>(
      "t",
      &[
         with_select_dialect("postgres"),
         with_key_set(["a", "b"], Some(vec![json!(1), json!(2)]), false),
      ],
   )
   .unwrap();

   assert_eq!(
      sql,
      r#"SELECT "t"."a", "t"."b" FROM "t" WHERE (("t"."a" > $1) OR (("t"."a" = $2) AND ("t"."b" > $3))) ORDER BY "t"."a" ASC, "t"."b" ASC"#
   );
}

#[test]
fn sqlserver_keyset_page() {
   let config = SelectConfig {
      dialect: Dialect::Sqlserver,
      ..Default::default()
   };
   let (sql, params) = build_select_with_config::<Item>(
      "t",
      &config,
      &[
         with_select_limit(20),
         with_key_set(["a"], Some(vec![json!(10)]), false),
      ],
   )
   .unwrap();

   assert_eq!(
      sql,
      "SELECT [t].[a], [t].[b] FROM [t] WHERE ([t].[a] > @p1) ORDER BY [t].[a] ASC OFFSET 0 ROWS FETCH NEXT 20 ROWS ONLY"
   );
   assert_eq!(params, vec![json!(10)]);
}

#[test]
fn interpolated_keyset_inlines_boundary() {
   let (sql, params) = build_select::<Item>(
      "t",
      &[
         with_select_dialect("mysql"),
         with_select_prepared(false),
         with_key_set(["a"], Some(vec![json!("o'brien")]), false),
      ],
   )
   .unwrap();

   assert_eq!(
      sql,
      "SELECT `t`.`a`, `t`.`b` FROM `t` WHERE (`t`.`a` > 'o''brien') ORDER BY `t`.`a` ASC"
   );
   assert!(params.is_empty());
}

#[test]
fn config_loads_from_json() {
   let config: SelectConfig = serde_json::from_str(r#"{"dialect":"sqlite3"}"#).unwrap();
   assert_eq!(config.dialect, Dialect::Sqlite3);
   assert!(config.prepared);

   let (sql, _) = build_select_with_config::<Item>("t", &config, &[]).unwrap();
   assert_eq!(sql, "SELECT `t`.`a`, `t`.`b` FROM `t`");
}
