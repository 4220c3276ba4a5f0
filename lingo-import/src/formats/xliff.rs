//! XLIFF catalogues (`.xlf`, `.xliff`)
//!
//! Handles XLIFF 1.2 (`<trans-unit>`) and 2.0 (`<unit><segment>`). The
//! message key is `resname` (1.2) or `name` (2.0), falling back to the
//! source text; the value is the target, falling back to the source.
//! A 1.2 `<file date="...">` attribute becomes the entries' timestamp.

use super::{LoadedMessage, ParseError, TranslationLoader};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, Copy, Default)]
pub struct XliffLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Source,
    Target,
}

/// Unit being assembled
#[derive(Debug, Default)]
struct PendingUnit {
    name: Option<String>,
    id: Option<String>,
    source: Option<String>,
    target: Option<String>,
}

impl TranslationLoader for XliffLoader {
    fn extensions(&self) -> &'static [&'static str] {
        &["xlf", "xliff"]
    }

    fn load(&self, content: &str) -> Result<Vec<LoadedMessage>, ParseError> {
        let mut reader = Reader::from_str(content);

        let mut messages = Vec::new();
        let mut file_date: Option<DateTime<Utc>> = None;
        let mut unit: Option<PendingUnit> = None;
        let mut capture: Option<Field> = None;
        let mut text = String::new();
        let mut saw_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"xliff" => saw_root = true,
                        b"file" => file_date = parse_file_date(e)?,
                        b"trans-unit" => unit = Some(start_unit(e, b"resname")?),
                        b"unit" => unit = Some(start_unit(e, b"name")?),
                        b"source" if unit.is_some() && capture.is_none() => {
                            capture = Some(Field::Source);
                            text.clear();
                        }
                        b"target" if unit.is_some() && capture.is_none() => {
                            capture = Some(Field::Target);
                            text.clear();
                        }
                        // Inline markup inside source/target contributes only its text
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"file" => file_date = parse_file_date(e)?,
                        b"target" => {
                            if let Some(pending) = unit.as_mut() {
                                pending.target = Some(String::new());
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(t)) => {
                    if capture.is_some() {
                        let decoded = t
                            .unescape()
                            .map_err(|e| ParseError::Syntax(format!("invalid text: {}", e)))?;
                        text.push_str(&decoded);
                    }
                }
                Ok(Event::CData(c)) => {
                    if capture.is_some() {
                        text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"source" if capture == Some(Field::Source) => {
                            if let Some(pending) = unit.as_mut() {
                                pending.source = Some(std::mem::take(&mut text));
                            }
                            capture = None;
                        }
                        b"target" if capture == Some(Field::Target) => {
                            if let Some(pending) = unit.as_mut() {
                                pending.target = Some(std::mem::take(&mut text));
                            }
                            capture = None;
                        }
                        b"trans-unit" | b"unit" => {
                            if let Some(pending) = unit.take() {
                                messages.push(finish_unit(pending, file_date)?);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ParseError::Syntax(format!(
                        "XML parse error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        if !saw_root {
            return Err(ParseError::Structure("missing <xliff> root element".to_string()));
        }

        Ok(messages)
    }
}

fn attribute(e: &BytesStart<'_>, wanted: &[u8]) -> Result<Option<String>, ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Syntax(format!("invalid attribute: {}", err)))?;
        if attr.key.local_name().as_ref() == wanted {
            let value = attr
                .unescape_value()
                .map_err(|err| ParseError::Syntax(format!("invalid attribute value: {}", err)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// `<file date>` as RFC 3339, or a bare `xs:dateTime` read as UTC
fn parse_file_date(e: &BytesStart<'_>) -> Result<Option<DateTime<Utc>>, ParseError> {
    let Some(raw) = attribute(e, b"date")? else {
        return Ok(None);
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(date.with_timezone(&Utc)));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .map_err(|err| ParseError::Structure(format!("invalid file date {:?}: {}", raw, err)))
}

fn start_unit(e: &BytesStart<'_>, name_attribute: &[u8]) -> Result<PendingUnit, ParseError> {
    Ok(PendingUnit {
        name: attribute(e, name_attribute)?.filter(|n| !n.is_empty()),
        id: attribute(e, b"id")?,
        ..Default::default()
    })
}

fn finish_unit(unit: PendingUnit, file_date: Option<DateTime<Utc>>) -> Result<LoadedMessage, ParseError> {
    let source = unit.source.unwrap_or_default();
    let key = unit.name.unwrap_or_else(|| source.clone());
    if key.is_empty() {
        return Err(ParseError::Structure(format!(
            "unit {} has neither a name nor a source",
            unit.id.as_deref().unwrap_or("<no id>")
        )));
    }

    Ok(LoadedMessage {
        key,
        value: unit.target.unwrap_or(source),
        updated_at: file_date,
    })
}
