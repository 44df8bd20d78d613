//! serde-backed renderers
//!
//! JSON works for anything serializable (token lists and trees alike); YAML is only
//! registered for trees.

use super::registry::{FormatError, Formatter};
use serde::Serialize;

pub struct JsonFormatter;

impl<T: Serialize + ?Sized> Formatter<T> for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, value: &T) -> Result<String, FormatError> {
        serde_json::to_string_pretty(value)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl<T: Serialize + ?Sized> Formatter<T> for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, value: &T) -> Result<String, FormatError> {
        serde_yaml::to_string(value).map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "YAML document"
    }
}
