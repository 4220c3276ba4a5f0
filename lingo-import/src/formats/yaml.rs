//! YAML catalogues (`.yml`, `.yaml`)
//!
//! Nested mappings are flattened into dotted keys:
//! `{form: {submit: Send}}` becomes `form.submit = Send`.

use super::{LoadedMessage, ParseError, TranslationLoader};
use serde_yaml::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl TranslationLoader for YamlLoader {
    fn extensions(&self) -> &'static [&'static str] {
        &["yml", "yaml"]
    }

    fn load(&self, content: &str) -> Result<Vec<LoadedMessage>, ParseError> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| ParseError::Syntax(e.to_string()))?;

        let mut messages = Vec::new();
        match value {
            // Empty document
            Value::Null => {}
            Value::Mapping(_) => flatten(&value, None, &mut messages)?,
            other => {
                return Err(ParseError::Structure(format!(
                    "top-level YAML value must be a mapping, found {}",
                    kind(&other)
                )))
            }
        }
        Ok(messages)
    }
}

fn flatten(value: &Value, prefix: Option<&str>, out: &mut Vec<LoadedMessage>) -> Result<(), ParseError> {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let segment = scalar_to_string(k).ok_or_else(|| {
                    ParseError::Structure(format!("unsupported mapping key of type {}", kind(k)))
                })?;
                let key = join(prefix, &segment);
                flatten(v, Some(&key), out)?;
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                let key = join(prefix, &index.to_string());
                flatten(item, Some(&key), out)?;
            }
        }
        Value::Tagged(tagged) => flatten(&tagged.value, prefix, out)?,
        scalar => {
            let key = prefix
                .ok_or_else(|| ParseError::Structure("scalar without a key".to_string()))?;
            let text = scalar_to_string(scalar).unwrap_or_default();
            out.push(LoadedMessage::new(key, text));
        }
    }
    Ok(())
}

fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(p) => format!("{}.{}", p, segment),
        None => segment.to_string(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
