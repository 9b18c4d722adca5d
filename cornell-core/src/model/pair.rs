use serde::{Deserialize, Serialize};

/// One cue/notes unit of a Cornell page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePair {
    /// Question or prompt shown in the left column
    pub cue: String,
    /// Body text; may span several lines
    pub notes: String,
    #[serde(default)]
    pub is_important: bool,
}

impl NotePair {
    pub fn new(cue: impl Into<String>, notes: impl Into<String>, is_important: bool) -> Self {
        Self {
            cue: cue.into(),
            notes: notes.into(),
            is_important,
        }
    }

    /// Both fields are exactly empty.
    pub fn is_void(&self) -> bool {
        self.cue.is_empty() && self.notes.is_empty()
    }

    /// Both fields are empty once surrounding whitespace is ignored.
    /// Such pairs have no Markdown representation.
    pub fn is_blank(&self) -> bool {
        self.cue.trim().is_empty() && self.notes.trim().is_empty()
    }

    pub fn toggle_important(&mut self) {
        self.is_important = !self.is_important;
    }
}
