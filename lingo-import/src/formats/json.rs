//! JSON catalogues (`.json`)

use super::{LoadedMessage, ParseError, TranslationLoader};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl TranslationLoader for JsonLoader {
    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn load(&self, content: &str) -> Result<Vec<LoadedMessage>, ParseError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value =
            serde_json::from_str(content).map_err(|e| ParseError::Syntax(e.to_string()))?;

        if !value.is_object() {
            return Err(ParseError::Structure(
                "top-level JSON value must be an object".to_string(),
            ));
        }

        let mut messages = Vec::new();
        flatten(&value, None, &mut messages);
        Ok(messages)
    }
}

fn flatten(value: &Value, prefix: Option<&str>, out: &mut Vec<LoadedMessage>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = join(prefix, k);
                flatten(v, Some(&key), out);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let key = join(prefix, &index.to_string());
                flatten(item, Some(&key), out);
            }
        }
        scalar => {
            if let Some(key) = prefix {
                let text = match scalar {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                out.push(LoadedMessage::new(key, text));
            }
        }
    }
}

fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(p) => format!("{}.{}", p, segment),
        None => segment.to_string(),
    }
}
