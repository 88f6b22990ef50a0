use serde_json::Value;
use sqlx::{self, postgres::PgArguments};

use crate::resources::ResourceSpec;

/// A parameterized statement ready to hand to the gateway
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub query: String,
    pub params: Vec<Value>,
}

impl SqlStatement {
    fn new(query: String, params: Vec<Value>) -> Self {
        Self { query, params }
    }
}

/// SELECT base shared by list, show and list-by-plan:
/// the entity's own columns plus display columns from its joined parents.
fn select_base(spec: &ResourceSpec) -> String {
    let mut sql = format!("SELECT {}.*", spec.alias);
    if !spec.display_columns.is_empty() {
        sql.push_str(", ");
        sql.push_str(spec.display_columns);
    }
    sql.push_str(&format!(" FROM {} {}", spec.table, spec.alias));
    if !spec.joins.is_empty() {
        sql.push(' ');
        sql.push_str(spec.joins);
    }
    sql
}

fn with_order(mut sql: String, spec: &ResourceSpec) -> String {
    if let Some(order) = spec.order_by {
        sql.push_str(&format!(" ORDER BY {}", order));
    }
    sql
}

pub fn select_all(spec: &ResourceSpec) -> SqlStatement {
    SqlStatement::new(with_order(select_base(spec), spec), vec![])
}

pub fn select_by_id(spec: &ResourceSpec, id: i64) -> SqlStatement {
    let sql = format!("{} WHERE {}.id = $1", select_base(spec), spec.alias);
    SqlStatement::new(sql, vec![Value::from(id)])
}

pub fn select_by_plan(spec: &ResourceSpec, plan_id: i64) -> SqlStatement {
    let sql = format!("{} WHERE {}.plan_id = $1", select_base(spec), spec.alias);
    SqlStatement::new(with_order(sql, spec), vec![Value::from(plan_id)])
}

/// INSERT every writable column. `values` must line up with `spec.columns`.
pub fn insert(spec: &ResourceSpec, values: Vec<Value>) -> SqlStatement {
    let names: Vec<&str> = spec.columns.iter().map(|c| c.name).collect();
    let placeholders: Vec<String> = spec
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("${}::{}", i + 1, c.sql_type.cast()))
        .collect();

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
        spec.table,
        names.join(", "),
        placeholders.join(", ")
    );
    SqlStatement::new(sql, values)
}

/// Full-row UPDATE: every writable column is overwritten.
pub fn update(spec: &ResourceSpec, id: i64, mut values: Vec<Value>) -> SqlStatement {
    let mut assignments: Vec<String> = spec
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}::{}", c.name, i + 1, c.sql_type.cast()))
        .collect();
    if spec.tracks_updated_at {
        assignments.push("updated_at = CURRENT_TIMESTAMP".to_string());
    }

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ${}",
        spec.table,
        assignments.join(", "),
        spec.columns.len() + 1
    );
    values.push(Value::from(id));
    SqlStatement::new(sql, values)
}

pub fn delete(spec: &ResourceSpec, id: i64) -> SqlStatement {
    let sql = format!("DELETE FROM {} WHERE id = $1", spec.table);
    SqlStatement::new(sql, vec![Value::from(id)])
}

/// Bind a JSON value positionally. Placeholders carry explicit casts, so the bound
/// type only has to be convertible to the column type.
pub fn bind_param<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => match number_param(n) {
            NumberParam::Int(i) => q.bind(i),
            NumberParam::Float(f) => q.bind(f),
            NumberParam::Text(t) => q.bind(t),
        },
        Value::String(s) => q.bind(s.clone()),
        Value::Array(_) | Value::Object(_) => q.bind(v.clone()), // JSONB
    }
}

#[derive(Debug, PartialEq)]
enum NumberParam {
    Int(i64),
    Float(f64),
    Text(String),
}

fn number_param(n: &serde_json::Number) -> NumberParam {
    if let Some(i) = n.as_i64() {
        NumberParam::Int(i)
    } else if n.is_u64() {
        // Beyond i64::MAX: as text, the bigint cast reports it out of range
        NumberParam::Text(n.to_string())
    } else {
        NumberParam::Float(n.as_f64().unwrap_or_default())
    }
}
