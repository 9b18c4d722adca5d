pub mod json;
pub mod markdown;

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::NotesDocument;

pub use json::{from_json, to_json, to_json_at, JsonDocument};
pub use markdown::{from_markdown, to_markdown};

/// Persistence formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Markdown,
}

impl Format {
    pub fn all() -> &'static [Format] {
        &[Format::Json, Format::Markdown]
    }

    /// Detect the format from a file name. Fails before any parsing is
    /// attempted when the extension is not `.json` or `.md`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Format> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Format::all()
            .iter()
            .copied()
            .find(|f| ext.eq_ignore_ascii_case(f.extension()))
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Markdown => "md",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Markdown => "Markdown",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a new document from file contents
pub fn import(text: &str, format: Format) -> Result<NotesDocument> {
    match format {
        Format::Json => from_json(text),
        Format::Markdown => Ok(from_markdown(text)),
    }
}

pub fn export(doc: &NotesDocument, format: Format) -> Result<String> {
    match format {
        Format::Json => to_json(doc),
        Format::Markdown => Ok(to_markdown(doc)),
    }
}

/// Suggested file name for an export, e.g. `cell-biology.md`
pub fn export_file_name(doc: &NotesDocument, format: Format) -> String {
    format!("{}.{}", doc.file_stem(), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path("notes.json").unwrap(), Format::Json);
        assert_eq!(Format::from_path("dir/notes.MD").unwrap(), Format::Markdown);

        let err = Format::from_path("notes.txt").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref name) if name == "notes.txt"));
        assert!(Format::from_path("notes").is_err());
        assert!(Format::from_path("json").is_err());
    }

    #[test]
    fn test_export_file_name() {
        let mut doc = NotesDocument::empty();
        assert_eq!(export_file_name(&doc, Format::Json), "untitled-notes.json");

        doc.topic = "Cell Biology".to_string();
        assert_eq!(export_file_name(&doc, Format::Markdown), "cell-biology.md");
    }

    #[test]
    fn test_import_dispatch() {
        let doc = import("# Hello\n", Format::Markdown).unwrap();
        assert_eq!(doc.topic, "Hello");

        let err = import("# Hello\n", Format::Json).unwrap_err();
        assert!(err.is_parse_error());
    }
}
