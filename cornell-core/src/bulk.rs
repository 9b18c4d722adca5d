//! Bulk import of pasted text.
//!
//! Input is a series of blocks separated by blank lines. Each block is a cue,
//! a separator line of dashes, and the notes:
//!
//! ```text
//! What is osmosis?
//! ---
//! Diffusion of water across a membrane
//!
//! Define turgor
//! ----
//! Pressure of cell contents against the wall
//! ```
//!
//! Blocks without a recognizable separator are skipped.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::NotePair;

static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static LENIENT_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[^\S\n]*-{3,}[^\S\n]*\n").unwrap());

const STRICT_SEPARATOR: &str = "\n---\n";
const FALLBACK_SEPARATOR: &str = "---";

/// How tolerant the separator match is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkMode {
    /// Separator lines of three or more dashes with optional surrounding
    /// spaces. Blocks with a stray `---` elsewhere are split at it.
    #[default]
    Lenient,
    /// Only an exact `---` line separates cue from notes.
    Strict,
}

impl BulkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkMode::Lenient => "lenient",
            BulkMode::Strict => "strict",
        }
    }
}

impl fmt::Display for BulkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(BulkMode::Lenient),
            "strict" => Ok(BulkMode::Strict),
            other => Err(format!("unknown bulk mode `{other}`; expected lenient|strict")),
        }
    }
}

/// Parse pasted text into pairs, in block order. Never fails; unparseable
/// input simply yields no pairs.
pub fn parse_bulk_text(raw: &str, mode: BulkMode) -> Vec<NotePair> {
    let text = raw.replace("\r\n", "\n");
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut pairs = Vec::new();
    let mut skipped = 0;
    for block in BLANK_LINES_RE.split(text) {
        match parse_block(block, mode) {
            Some(pair) => pairs.push(pair),
            None => skipped += 1,
        }
    }

    debug!(
        "event=bulk_parse module=bulk mode={} pairs={} skipped={}",
        mode,
        pairs.len(),
        skipped
    );
    pairs
}

fn parse_block(block: &str, mode: BulkMode) -> Option<NotePair> {
    let segments: Vec<&str> = match mode {
        BulkMode::Lenient => LENIENT_SEPARATOR_RE.split(block).collect(),
        BulkMode::Strict => block.split(STRICT_SEPARATOR).collect(),
    };

    match segments.as_slice() {
        [cue, notes] => {
            let pair = NotePair::new(cue.trim(), notes.trim(), false);
            (!pair.is_void()).then_some(pair)
        }
        [_] if mode == BulkMode::Lenient => {
            // Dashes that are not on a line of their own, e.g. "Q --- A"
            let (cue, notes) = block.split_once(FALLBACK_SEPARATOR)?;
            Some(NotePair::new(cue.trim(), notes.trim(), false))
        }
        _ => None,
    }
}
