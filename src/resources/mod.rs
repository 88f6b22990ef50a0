//! Per-entity configuration for the generic CRUD engine.
//!
//! Every resource is one table hanging off a research plan or a user. A
//! [`ResourceSpec`] says which columns are writable and how they are typed,
//! which ones a request must carry, what goes in when an optional field is
//! left out, and which parent columns the read queries join in for display.

mod catalog;
mod password;

pub use catalog::*;

use serde_json::{Map, Value};

/// Column type as far as placeholder casts are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    BigInt,
    Text,
    Numeric,
    Date,
}

impl SqlType {
    pub fn cast(&self) -> &'static str {
        match self {
            SqlType::BigInt => "bigint",
            SqlType::Text => "text",
            SqlType::Numeric => "numeric",
            SqlType::Date => "date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Text(&'static str),
    Number(f64),
}

impl DefaultValue {
    pub fn to_value(&self) -> Value {
        match self {
            DefaultValue::Text(s) => Value::String((*s).to_string()),
            DefaultValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

/// When an optional column falls back to its default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultWhen {
    /// Field absent or null
    Missing,
    /// Any value that fails the presence check: null, false, 0 or ""
    Falsy,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub default_when: DefaultWhen,
}

impl Column {
    pub const fn required(name: &'static str, sql_type: SqlType) -> Self {
        Self { name, sql_type, required: true, default: None, default_when: DefaultWhen::Missing }
    }

    pub const fn optional(name: &'static str, sql_type: SqlType) -> Self {
        Self { name, sql_type, required: false, default: None, default_when: DefaultWhen::Missing }
    }

    pub const fn defaulted(name: &'static str, sql_type: SqlType, default: DefaultValue) -> Self {
        Self { name, sql_type, required: false, default: Some(default), default_when: DefaultWhen::Missing }
    }

    /// Like `defaulted`, but an empty string, zero or false also takes the default
    pub const fn defaulted_falsy(name: &'static str, sql_type: SqlType, default: DefaultValue) -> Self {
        Self { name, sql_type, required: false, default: Some(default), default_when: DefaultWhen::Falsy }
    }

    /// The payload value to store as-is, or None when the default applies
    fn supplied<'a>(&self, payload: &'a Map<String, Value>) -> Option<&'a Value> {
        let value = payload.get(self.name)?;
        let keep = match self.default_when {
            DefaultWhen::Missing => !value.is_null(),
            DefaultWhen::Falsy => is_present(value),
        };
        keep.then_some(value)
    }
}

/// User-facing messages, one set per entity
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub not_found: &'static str,
    pub required: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub conflict: &'static str,
    pub missing_reference: &'static str,
}

#[derive(Debug)]
pub struct ResourceSpec {
    /// Path segment under /api
    pub path: &'static str,
    pub table: &'static str,
    pub alias: &'static str,
    /// Extra SELECT expressions taken from joined parents, e.g. `rp.title AS plan_title`
    pub display_columns: &'static str,
    pub joins: &'static str,
    /// Writable columns in statement order
    pub columns: &'static [Column],
    pub order_by: Option<&'static str>,
    /// Offers GET /plan/:planId
    pub plan_scoped: bool,
    pub tracks_updated_at: bool,
    /// Rewrites the payload before validation
    pub prepare: Option<fn(&mut Map<String, Value>)>,
    pub messages: Messages,
}

impl ResourceSpec {
    /// Required columns the payload does not carry a usable value for
    pub fn missing_required(&self, payload: &Map<String, Value>) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.required)
            .filter(|c| !payload.get(c.name).map(is_present).unwrap_or(false))
            .map(|c| c.name)
            .collect()
    }

    /// One value per writable column, in column order. Absent or null optional
    /// fields take the column default, or NULL when there is none; `Falsy`
    /// columns also replace "", 0 and false.
    pub fn column_values(&self, payload: &Map<String, Value>) -> Vec<Value> {
        self.columns
            .iter()
            .map(|c| match c.supplied(payload) {
                Some(v) => v.clone(),
                None => c.default.map(|d| d.to_value()).unwrap_or(Value::Null),
            })
            .collect()
    }
}

/// Presence check with the usual truthiness rules: null, false, 0 and "" count as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look a resource up by its path segment
pub fn find(path: &str) -> Option<&'static ResourceSpec> {
    ALL.iter().copied().find(|spec| spec.path == path)
}
