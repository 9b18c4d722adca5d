use std::sync::LazyLock;

use regex::Regex;

use super::NotePair;

/// Title shown when the topic is empty
pub const DEFAULT_TOPIC: &str = "My Notes";
/// File name stem used when exporting a document without a topic
pub const DEFAULT_FILE_STEM: &str = "untitled-notes";

static FILE_STEM_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// A Cornell notes page: topic, ordered cue/notes pairs and a summary.
///
/// Pair order is insertion order and is preserved by every format. The JSON
/// form lives in `format::json`, which adds `lastModified` on export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesDocument {
    pub topic: String,
    pub summary: String,
    pub pairs: Vec<NotePair>,
}

impl NotesDocument {
    /// A blank page with a single empty pair ready for editing
    pub fn empty() -> Self {
        Self {
            topic: String::new(),
            summary: String::new(),
            pairs: vec![NotePair::default()],
        }
    }

    pub fn add_pair(&mut self, pair: NotePair) {
        self.pairs.push(pair);
    }

    /// Append pairs in order, returning how many were added
    pub fn extend_pairs(&mut self, pairs: impl IntoIterator<Item = NotePair>) -> usize {
        let before = self.pairs.len();
        self.pairs.extend(pairs);
        self.pairs.len() - before
    }

    pub fn remove_pair(&mut self, index: usize) -> Option<NotePair> {
        if index < self.pairs.len() {
            Some(self.pairs.remove(index))
        } else {
            None
        }
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.pairs.len() {
            return false;
        }
        self.pairs.swap(index - 1, index);
        true
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.pairs.len() {
            return false;
        }
        self.pairs.swap(index, index + 1);
        true
    }

    pub fn toggle_important(&mut self, index: usize) -> bool {
        match self.pairs.get_mut(index) {
            Some(pair) => {
                pair.toggle_important();
                true
            }
            None => false,
        }
    }

    /// Guarantee at least one editable pair. Importers return exactly what
    /// they found, so front ends call this after replacing the document.
    pub fn ensure_pair(&mut self) {
        if self.pairs.is_empty() {
            self.pairs.push(NotePair::default());
        }
    }

    /// Topic for display, falling back to "My Notes"
    pub fn display_topic(&self) -> &str {
        if self.topic.is_empty() {
            DEFAULT_TOPIC
        } else {
            &self.topic
        }
    }

    /// File name stem derived from the topic, e.g. "Rust Basics!" -> "rust-basics-"
    pub fn file_stem(&self) -> String {
        let topic = self.topic.trim();
        let topic = if topic.is_empty() { DEFAULT_FILE_STEM } else { topic };
        FILE_STEM_SEPARATORS
            .replace_all(&topic.to_lowercase(), "-")
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_pairs() -> NotesDocument {
        NotesDocument {
            topic: "Biology".to_string(),
            summary: String::new(),
            pairs: vec![
                NotePair::new("a", "1", false),
                NotePair::new("b", "2", false),
                NotePair::new("c", "3", false),
            ],
        }
    }

    fn cues(doc: &NotesDocument) -> Vec<&str> {
        doc.pairs.iter().map(|p| p.cue.as_str()).collect()
    }

    #[test]
    fn test_empty_document_has_one_blank_pair() {
        let doc = NotesDocument::empty();
        assert!(doc.topic.is_empty());
        assert!(doc.summary.is_empty());
        assert_eq!(doc.pairs, vec![NotePair::default()]);
    }

    #[test]
    fn test_move_up_and_down() {
        let mut doc = three_pairs();

        assert!(doc.move_up(2));
        assert_eq!(cues(&doc), ["a", "c", "b"]);

        assert!(doc.move_down(0));
        assert_eq!(cues(&doc), ["c", "a", "b"]);

        assert!(!doc.move_up(0));
        assert!(!doc.move_down(2));
        assert!(!doc.move_up(7));
        assert_eq!(cues(&doc), ["c", "a", "b"]);
    }

    #[test]
    fn test_remove_and_toggle() {
        let mut doc = three_pairs();

        let removed = doc.remove_pair(1).unwrap();
        assert_eq!(removed.cue, "b");
        assert!(doc.remove_pair(5).is_none());

        assert!(doc.toggle_important(1));
        assert!(doc.pairs[1].is_important);
        assert!(doc.toggle_important(1));
        assert!(!doc.pairs[1].is_important);
        assert!(!doc.toggle_important(9));
    }

    #[test]
    fn test_removing_every_pair_is_allowed() {
        let mut doc = NotesDocument::empty();
        doc.remove_pair(0);
        assert!(doc.pairs.is_empty());

        doc.ensure_pair();
        assert_eq!(doc.pairs.len(), 1);
        doc.ensure_pair();
        assert_eq!(doc.pairs.len(), 1);
    }

    #[test]
    fn test_extend_pairs_appends_after_existing() {
        let mut doc = NotesDocument::empty();
        let added = doc.extend_pairs(vec![NotePair::new("x", "", false), NotePair::new("y", "", false)]);
        assert_eq!(added, 2);
        assert_eq!(cues(&doc), ["", "x", "y"]);
    }

    #[test]
    fn test_display_topic_never_mutates() {
        let doc = NotesDocument::default();
        assert_eq!(doc.display_topic(), "My Notes");
        assert!(doc.topic.is_empty());
    }

    #[test]
    fn test_file_stem() {
        let mut doc = NotesDocument::default();
        assert_eq!(doc.file_stem(), "untitled-notes");

        doc.topic = "  Rust Basics: Ownership & Borrowing  ".to_string();
        assert_eq!(doc.file_stem(), "rust-basics-ownership-borrowing");

        doc.topic = "Chapter_2 -- Cells!".to_string();
        assert_eq!(doc.file_stem(), "chapter_2-cells-");
    }
}
