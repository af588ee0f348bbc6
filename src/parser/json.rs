//! Version listing API (JSON) parser

use serde_json::Value;
use tracing::warn;

use crate::parser::traits::{ParseError, VersionParser};
use crate::parser::types::{SourceFormat, VersionList};

/// Key holding the version array in the response object
const VERSIONS_KEY: &str = "versions";

/// Parser for `{"versions": ["1.0", ...]}` bodies
pub struct JsonVersionParser;

impl JsonVersionParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonVersionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionParser for JsonVersionParser {
    fn format(&self) -> SourceFormat {
        SourceFormat::Json
    }

    fn parse(&self, body: &[u8]) -> Result<VersionList, ParseError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            warn!("Failed to parse JSON response: {}", e);
            ParseError::InvalidJson(e)
        })?;

        let object = value.as_object().ok_or_else(|| {
            ParseError::InvalidShape(format!("expected a JSON object, got {}", kind_of(&value)))
        })?;

        // A missing key means "no versions", not a malformed response
        let Some(versions) = object.get(VERSIONS_KEY) else {
            return Ok(VersionList::default());
        };

        let items = versions.as_array().ok_or_else(|| {
            ParseError::InvalidShape(format!(
                "\"{}\" must be an array, got {}",
                VERSIONS_KEY,
                kind_of(versions)
            ))
        })?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ParseError::InvalidShape(format!(
                        "\"{}\"[{}] must be a string, got {}",
                        VERSIONS_KEY,
                        index,
                        kind_of(item)
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(VersionList::new)
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
