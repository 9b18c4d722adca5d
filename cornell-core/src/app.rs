use log::{debug, warn};

use crate::bulk::{parse_bulk_text, BulkMode};
use crate::format::{self, Format};
use crate::model::{NotePair, NotesDocument};

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input,
    ConfirmClear,
    Help,
}

/// What the input buffer is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Topic,
    Summary,
    Cue,
    Notes,
    FilePath,
    BulkText,
}

impl InputTarget {
    /// Enter inserts a newline instead of committing
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            InputTarget::Summary | InputTarget::Cue | InputTarget::Notes | InputTarget::BulkText
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputTarget::Topic => "Topic",
            InputTarget::Summary => "Summary",
            InputTarget::Cue => "Cue / Question",
            InputTarget::Notes => "Notes",
            InputTarget::FilePath => "Open file (.json or .md)",
            InputTarget::BulkText => "Bulk add (cue, ---, notes; blank line between pairs)",
        }
    }
}

/// A user-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// Platform-agnostic editor state. The document is owned here and replaced
/// wholesale on import or clear.
pub struct App {
    pub document: NotesDocument,
    pub mode: Mode,
    pub running: bool,

    // Index into document.pairs; meaningless while pairs is empty
    pub selected: usize,

    // Input state
    pub input_buffer: String,
    pub input_target: InputTarget,

    pub bulk_mode: BulkMode,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(bulk_mode: BulkMode) -> Self {
        Self {
            document: NotesDocument::empty(),
            mode: Mode::Normal,
            running: true,

            selected: 0,

            input_buffer: String::new(),
            input_target: InputTarget::Topic,

            bulk_mode,
            notice: None,
        }
    }

    /// Replace the current document, keeping at least one editable pair
    pub fn load_document(&mut self, mut doc: NotesDocument) {
        doc.ensure_pair();
        self.document = doc;
        self.selected = 0;
    }

    /// Parse file contents into a new document and swap it in. On failure
    /// the current document is left untouched.
    pub fn import_text(&mut self, text: &str, format: Format) -> crate::Result<()> {
        match format::import(text, format) {
            Ok(doc) => {
                debug!(
                    "event=import module=app status=ok format={} pairs={}",
                    format.extension(),
                    doc.pairs.len()
                );
                self.load_document(doc);
                self.set_status(&format!("Notes imported from {}", format));
                Ok(())
            }
            Err(e) => {
                warn!("event=import module=app status=error format={} error={}", format.extension(), e);
                self.set_error("Error parsing file.");
                Err(e)
            }
        }
    }

    pub fn selected_pair(&self) -> Option<&NotePair> {
        self.document.pairs.get(self.selected)
    }

    pub fn next_pair(&mut self) {
        let count = self.document.pairs.len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn prev_pair(&mut self) {
        let count = self.document.pairs.len();
        if count > 0 {
            self.selected = if self.selected == 0 {
                count - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Append an empty pair and select it
    pub fn add_pair(&mut self) {
        self.document.add_pair(NotePair::default());
        self.selected = self.document.pairs.len() - 1;
    }

    pub fn remove_selected(&mut self) -> bool {
        if self.document.remove_pair(self.selected).is_none() {
            return false;
        }
        let count = self.document.pairs.len();
        if self.selected >= count && count > 0 {
            self.selected = count - 1;
        }
        self.set_status("Pair removed");
        true
    }

    pub fn move_selected_up(&mut self) -> bool {
        if self.document.move_up(self.selected) {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    pub fn move_selected_down(&mut self) -> bool {
        if self.document.move_down(self.selected) {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    pub fn toggle_selected_important(&mut self) -> bool {
        self.document.toggle_important(self.selected)
    }

    /// Ask for confirmation before clearing everything
    pub fn request_clear(&mut self) {
        self.mode = Mode::ConfirmClear;
    }

    pub fn confirm_clear(&mut self) {
        self.document = NotesDocument::empty();
        self.selected = 0;
        self.mode = Mode::Normal;
        self.set_status("Notes have been cleared.");
    }

    pub fn cancel_clear(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Open the input buffer, pre-filled with the field's current value
    pub fn begin_input(&mut self, target: InputTarget) {
        let current = match target {
            InputTarget::Topic => Some(self.document.topic.clone()),
            InputTarget::Summary => Some(self.document.summary.clone()),
            InputTarget::Cue => self.selected_pair().map(|p| p.cue.clone()),
            InputTarget::Notes => self.selected_pair().map(|p| p.notes.clone()),
            InputTarget::FilePath | InputTarget::BulkText => Some(String::new()),
        };

        // Cue/notes editing needs a pair to edit
        let Some(current) = current else {
            return;
        };

        self.input_buffer = current;
        self.input_target = target;
        self.mode = Mode::Input;
    }

    /// Apply the input buffer to its target and return to normal mode.
    ///
    /// For `FilePath` nothing is applied; the entered path is returned so
    /// the front end can read the file and call [`App::import_text`].
    pub fn commit_input(&mut self) -> Option<String> {
        let text = std::mem::take(&mut self.input_buffer);
        self.mode = Mode::Normal;

        match self.input_target {
            InputTarget::Topic => self.document.topic = text,
            InputTarget::Summary => self.document.summary = text,
            InputTarget::Cue => {
                if let Some(pair) = self.document.pairs.get_mut(self.selected) {
                    pair.cue = text;
                }
            }
            InputTarget::Notes => {
                if let Some(pair) = self.document.pairs.get_mut(self.selected) {
                    pair.notes = text;
                }
            }
            InputTarget::FilePath => {
                let path = text.trim().to_string();
                return (!path.is_empty()).then_some(path);
            }
            InputTarget::BulkText => {
                self.bulk_import(&text);
            }
        }
        None
    }

    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.mode = Mode::Normal;
    }

    /// Parse pasted text and append the recovered pairs. Returns the count.
    pub fn bulk_import(&mut self, raw: &str) -> usize {
        if raw.trim().is_empty() {
            return 0;
        }

        let pairs = parse_bulk_text(raw, self.bulk_mode);
        let count = self.document.extend_pairs(pairs);
        if count > 0 {
            self.set_status(&format!("Imported {} note pairs!", count));
        } else {
            self.set_error("Could not find valid notes. Check format.");
        }
        count
    }

    /// Set status message
    pub fn set_status(&mut self, msg: &str) {
        self.notice = Some(Notice {
            message: msg.to_string(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, msg: &str) {
        self.notice = Some(Notice {
            message: msg.to_string(),
            is_error: true,
        });
    }

    /// Clear status message
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Get title for display
    pub fn title(&self) -> &str {
        self.document.display_topic()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(BulkMode::default())
    }
}
