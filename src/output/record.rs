//! One logical result item: an ordered field → value mapping.

use crate::error::TypedError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputRecord(Map<String, Value>);

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Field order is the order of first insertion.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a record from any serializable struct. The value must serialize to an object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, TypedError> {
        match serde_json::to_value(value).map_err(TypedError::unexpected)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TypedError::internal(format!(
                "Output record must be an object, got {}",
                kind_of(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for OutputRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
