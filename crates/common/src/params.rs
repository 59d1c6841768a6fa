//! Typed parameter values and the per-invocation parameter context

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// The value kinds a parameter can declare.
///
/// The kind drives both input coercion (the CLI parses raw text against
/// it) and the JSON shape the value takes on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    String,
    Boolean,
    Integer,
    StringList,
    /// An ordered list of key/value pairs, serialized as
    /// `[{"Key": ..., "Value": ...}]`.
    KeyValueList,
}

/// A supplied parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    StrList(Vec<String>),
    KeyValues(Vec<(String, String)>),
}

impl ParamValue {
    /// The kind this value satisfies.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Str(_) => ParamKind::String,
            ParamValue::Bool(_) => ParamKind::Boolean,
            ParamValue::Int(_) => ParamKind::Integer,
            ParamValue::StrList(_) => ParamKind::StringList,
            ParamValue::KeyValues(_) => ParamKind::KeyValueList,
        }
    }

    /// Whether the value is empty in the "supplied but blank" sense.
    ///
    /// `false` and `0` are not empty; an empty string or empty list is.
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.is_empty(),
            ParamValue::Bool(_) | ParamValue::Int(_) => false,
            ParamValue::StrList(items) => items.is_empty(),
            ParamValue::KeyValues(pairs) => pairs.is_empty(),
        }
    }

    /// Canonical JSON projection of this value.
    ///
    /// Key/value pairs take the `[{"Key": ..., "Value": ...}]` shape the
    /// service expects for tag and provisioning-parameter lists.
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Int(i) => json!(i),
            ParamValue::StrList(items) => json!(items),
            ParamValue::KeyValues(pairs) => Value::Array(
                pairs
                    .iter()
                    .map(|(k, v)| json!({ "Key": k, "Value": v }))
                    .collect(),
            ),
        }
    }
}

/// The parameter bag for one invocation.
///
/// Built once from caller input, owned by a single invocation, and
/// discarded when the invocation completes. Iteration order is stable
/// (sorted by name) so diagnostics are deterministic.
#[derive(Debug, Clone, Default)]
pub struct ParameterContext {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a supplied parameter, replacing any earlier value.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over supplied parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_values_serialize_as_key_value_objects() {
        let value = ParamValue::KeyValues(vec![
            ("Env".to_string(), "prod".to_string()),
            ("Team".to_string(), "platform".to_string()),
        ]);

        let json = value.to_json();
        assert_eq!(json[0], json!({"Key": "Env", "Value": "prod"}));
        assert_eq!(json[1], json!({"Key": "Team", "Value": "platform"}));
    }

    #[test]
    fn test_false_and_zero_are_not_empty() {
        assert!(!ParamValue::Bool(false).is_empty());
        assert!(!ParamValue::Int(0).is_empty());
        assert!(ParamValue::Str(String::new()).is_empty());
        assert!(ParamValue::StrList(vec![]).is_empty());
    }

    #[test]
    fn test_context_replaces_on_duplicate_insert() {
        let mut ctx = ParameterContext::new();
        ctx.insert("Id", ParamValue::Str("first".to_string()));
        ctx.insert("Id", ParamValue::Str("second".to_string()));

        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("Id"), Some(&ParamValue::Str("second".to_string())));
    }

    #[test]
    fn test_context_iterates_in_name_order() {
        let mut ctx = ParameterContext::new();
        ctx.insert("Zeta", ParamValue::Bool(true));
        ctx.insert("Alpha", ParamValue::Bool(true));

        let names: Vec<&str> = ctx.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }
}
