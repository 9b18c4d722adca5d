pub mod document;
pub mod pair;

pub use document::{NotesDocument, DEFAULT_FILE_STEM, DEFAULT_TOPIC};
pub use pair::NotePair;
