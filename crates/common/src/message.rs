//! Request and response documents
//!
//! Both sides of a remote call are JSON object documents. [`Request`]
//! supports insertion by dotted path so that flat parameters can be
//! grouped into nested sub-objects; a sub-object is created on first
//! insertion only, so untouched composites never appear on the wire.

use serde_json::{Map, Value};

/// The request document for one remote call.
///
/// Fields exist only for parameters that were actually supplied;
/// "absent" is distinct from "empty" or "default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    body: Map<String, Value>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field by dotted path, e.g. `"ProvisioningPreferences.StackSetRegions"`.
    ///
    /// Intermediate objects are created as needed. Setting a path below
    /// a non-object value replaces that value with an object.
    pub fn set(&mut self, path: &str, value: Value) {
        let mut segments = path.split('.').peekable();
        let mut current = &mut self.body;

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current.insert(segment.to_string(), value);
                return;
            }
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry.as_object_mut().expect("entry coerced to object");
        }
    }

    /// Read a top-level field, if set.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.body.contains_key(name)
    }

    /// Number of top-level fields set.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The wire form of this request.
    pub fn to_value(&self) -> Value {
        Value::Object(self.body.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }
}

/// The response document from one remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    body: Value,
}

impl Response {
    /// Wrap a decoded response body.
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// An empty response, as returned by operations with no output.
    pub fn empty() -> Self {
        Self {
            body: Value::Object(Map::new()),
        }
    }

    /// Read a top-level field, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// The whole response body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}
