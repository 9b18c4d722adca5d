use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{NotePair, NotesDocument};

/// Persisted JSON shape. Field order here is the order written to disk.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDocument<'a> {
    pub topic: &'a str,
    pub summary: &'a str,
    pub pairs: &'a [NotePair],
    pub last_modified: String,
}

impl<'a> JsonDocument<'a> {
    pub fn new(doc: &'a NotesDocument, last_modified: DateTime<Utc>) -> Self {
        Self {
            topic: &doc.topic,
            summary: &doc.summary,
            pairs: &doc.pairs,
            last_modified: last_modified.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Serialize a document, stamping `lastModified` with the current time
pub fn to_json(doc: &NotesDocument) -> Result<String> {
    to_json_at(doc, Utc::now())
}

/// Serialize a document with an explicit `lastModified` stamp
pub fn to_json_at(doc: &NotesDocument, last_modified: DateTime<Utc>) -> Result<String> {
    let json = serde_json::to_string_pretty(&JsonDocument::new(doc, last_modified))?;
    Ok(json)
}

/// Parse a document, tolerating missing or mistyped fields.
///
/// Only syntactically invalid JSON, or JSON whose top level is not an
/// object, is rejected. The returned document holds exactly the pairs that
/// were present, possibly none.
pub fn from_json(text: &str) -> Result<NotesDocument> {
    let value: Value = serde_json::from_str(text)?;
    let object = match value {
        Value::Object(object) => object,
        other => return Err(Error::NotADocument(kind_of(&other))),
    };

    let pairs: Vec<NotePair> = match object.get("pairs") {
        Some(Value::Array(items)) => items.iter().map(pair_from_value).collect(),
        _ => Vec::new(),
    };

    debug!("event=json_import module=format pairs={}", pairs.len());

    Ok(NotesDocument {
        topic: string_field(&object, "topic"),
        summary: string_field(&object, "summary"),
        pairs,
    })
}

fn pair_from_value(value: &Value) -> NotePair {
    let Some(object) = value.as_object() else {
        return NotePair::default();
    };

    NotePair::new(
        string_field(object, "cue"),
        string_field(object, "notes"),
        object
            .get("isImportant")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    )
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NotesDocument {
        NotesDocument {
            topic: "Photosynthesis".to_string(),
            summary: "Light in,\nsugar out.".to_string(),
            pairs: vec![
                NotePair::new("What is it?", "Conversion of light\ninto chemical energy", true),
                NotePair::new("", "", false),
            ],
        }
    }

    #[test]
    fn test_export_format() {
        let stamp = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        let json = to_json_at(&sample(), stamp).unwrap();

        assert!(json.starts_with("{\n  \"topic\": \"Photosynthesis\",\n  \"summary\""));
        assert!(json.contains("\"isImportant\": true"));
        assert!(json.contains("\"lastModified\": \"2024-03-05T14:07:09.000Z\""));

        let value: Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert!(keys.contains(&"pairs"));
        assert_eq!(value["pairs"][1]["cue"], "");
    }

    #[test]
    fn test_round_trip_keeps_void_pairs() {
        let doc = sample();
        let back = from_json(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_tolerant_defaults() {
        let doc = from_json(r#"{"pairs":[{"cue":"X"}]}"#).unwrap();
        assert_eq!(doc.topic, "");
        assert_eq!(doc.summary, "");
        assert_eq!(doc.pairs, vec![NotePair::new("X", "", false)]);
    }

    #[test]
    fn test_pairs_not_an_array() {
        let doc = from_json(r#"{"topic":"T","pairs":{"cue":"X"}}"#).unwrap();
        assert_eq!(doc.topic, "T");
        assert!(doc.pairs.is_empty());
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let doc = from_json(r#"{"topic":42,"pairs":[null,{"cue":1,"notes":"n","isImportant":"yes"}]}"#)
            .unwrap();
        assert_eq!(doc.topic, "");
        assert_eq!(doc.pairs, vec![NotePair::default(), NotePair::new("", "n", false)]);
    }

    #[test]
    fn test_malformed_json() {
        let err = from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::NotADocument("an array")));
    }
}
