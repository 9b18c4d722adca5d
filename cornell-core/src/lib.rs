//! Cornell Core - Platform-agnostic Cornell notes library
//!
//! This crate provides the note model (topic, ordered cue/notes pairs and a
//! summary), its JSON and Markdown formats, and the bulk text parser. Every
//! operation is a pure function over explicit values; front ends own the
//! live document.

pub mod app;
pub mod bulk;
pub mod error;
pub mod format;
pub mod model;

pub use app::{App, InputTarget, Mode, Notice};
pub use bulk::{parse_bulk_text, BulkMode};
pub use error::{Error, Result};
pub use format::{
    export, export_file_name, from_json, from_markdown, import, to_json, to_json_at, to_markdown,
    Format,
};
pub use model::{NotePair, NotesDocument};
