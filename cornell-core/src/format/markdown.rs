//! Markdown dialect built on callout blocks.
//!
//! ```text
//! # Topic
//!
//! > [!QUESTION]- ⭐ Cue
//! > notes line
//!
//! > [!SUMMARY] Summary
//! > summary line
//! ```
//!
//! Import is structural pattern matching over these markers, not a general
//! Markdown parser. Pairs whose cue and notes are both blank have no
//! representation and are dropped on export.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::model::{NotePair, NotesDocument};

pub const QUESTION_MARKER: &str = "> [!QUESTION]- ";
pub const SUMMARY_HEADER: &str = "> [!SUMMARY] Summary";
pub const IMPORTANT_MARKER: char = '⭐';

static TOPIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A# (.*)").unwrap());
static SUMMARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"> \[!SUMMARY\] Summary\n((?:> .*\n?)*)").unwrap());
static PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"> \[!QUESTION\]- (.*)\n((?:> .*\n?)*)").unwrap());

pub fn to_markdown(doc: &NotesDocument) -> String {
    let mut pairs_section = String::new();
    for pair in doc.pairs.iter().filter(|p| !p.is_blank()) {
        let cue = pair.cue.trim();
        if pair.is_important {
            pairs_section.push_str(&format!("{QUESTION_MARKER}{IMPORTANT_MARKER} {cue}\n"));
        } else {
            pairs_section.push_str(&format!("{QUESTION_MARKER}{cue}\n"));
        }
        for line in pair.notes.trim().split('\n') {
            pairs_section.push_str(&format!("> {line}\n"));
        }
        pairs_section.push('\n');
    }

    let mut summary_section = String::new();
    if !doc.summary.is_empty() {
        summary_section.push_str(SUMMARY_HEADER);
        summary_section.push('\n');
        for line in doc.summary.split('\n') {
            summary_section.push_str(&format!("> {}\n", line.trim()));
        }
    }

    format!(
        "# {}\n\n{}\n\n{}",
        doc.display_topic(),
        pairs_section.trim(),
        summary_section.trim()
    )
    .trim()
    .to_string()
}

/// Recover a document from Markdown. Never fails; unrecognized content is
/// ignored and a document without question blocks has no pairs.
pub fn from_markdown(text: &str) -> NotesDocument {
    let text = text.replace("\r\n", "\n");

    let topic = TOPIC_RE
        .captures(&text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    let summary = SUMMARY_RE
        .captures(&text)
        .map(|caps| unquote(&caps[1]))
        .unwrap_or_default();

    let pairs: Vec<NotePair> = PAIR_RE
        .captures_iter(&text)
        .map(|caps| {
            let (cue, is_important) = split_marker(caps[1].trim());
            NotePair::new(cue, unquote(&caps[2]), is_important)
        })
        .collect();

    debug!(
        "event=markdown_import module=format pairs={} has_topic={} has_summary={}",
        pairs.len(),
        !topic.is_empty(),
        !summary.is_empty()
    );

    NotesDocument {
        topic,
        summary,
        pairs,
    }
}

fn split_marker(cue: &str) -> (String, bool) {
    match cue.strip_prefix(IMPORTANT_MARKER) {
        Some(rest) => (rest.trim().to_string(), true),
        None => (cue.to_string(), false),
    }
}

/// Strip one leading "> " from every line and trim the block
fn unquote(block: &str) -> String {
    block
        .split('\n')
        .map(|line| line.strip_prefix("> ").unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NotesDocument {
        NotesDocument {
            topic: "Cell Biology".to_string(),
            summary: "Cells are the unit of life.\nEverything else builds on them.".to_string(),
            pairs: vec![
                NotePair::new("What is a cell?", "Smallest unit of life", false),
                NotePair::new("Topic A", "First line\n\nThird line", true),
            ],
        }
    }

    #[test]
    fn test_export_layout() {
        let md = to_markdown(&sample());
        let expected = "# Cell Biology\n\
            \n\
            > [!QUESTION]- What is a cell?\n\
            > Smallest unit of life\n\
            \n\
            > [!QUESTION]- ⭐ Topic A\n\
            > First line\n\
            > \n\
            > Third line\n\
            \n\
            > [!SUMMARY] Summary\n\
            > Cells are the unit of life.\n\
            > Everything else builds on them.";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_default_topic_and_no_summary() {
        let doc = NotesDocument {
            pairs: vec![NotePair::new("Q", "A", false)],
            ..Default::default()
        };
        assert_eq!(to_markdown(&doc), "# My Notes\n\n> [!QUESTION]- Q\n> A");
    }

    #[test]
    fn test_blank_pairs_are_dropped() {
        let doc = NotesDocument {
            topic: "T".to_string(),
            summary: String::new(),
            pairs: vec![
                NotePair::new("", "", false),
                NotePair::new("  ", "\n ", true),
                NotePair::new("kept", "", false),
            ],
        };
        let md = to_markdown(&doc);
        assert_eq!(md.matches("[!QUESTION]").count(), 1);

        let back = from_markdown(&md);
        assert_eq!(back.pairs, vec![NotePair::new("kept", "", false)]);
    }

    #[test]
    fn test_summary_lines_are_trimmed() {
        let doc = NotesDocument {
            topic: "T".to_string(),
            summary: "  first  \n\tsecond".to_string(),
            pairs: Vec::new(),
        };
        let md = to_markdown(&doc);
        assert!(md.ends_with("> [!SUMMARY] Summary\n> first\n> second"));
    }

    #[test]
    fn test_round_trip() {
        let doc = sample();
        assert_eq!(from_markdown(&to_markdown(&doc)), doc);
    }

    #[test]
    fn test_important_marker_is_stripped() {
        let doc = from_markdown("# T\n\n> [!QUESTION]- ⭐ Topic A\n> body\n");
        assert_eq!(doc.pairs, vec![NotePair::new("Topic A", "body", true)]);
    }

    #[test]
    fn test_topic_must_open_the_document() {
        let doc = from_markdown("intro\n# Not the topic\n");
        assert_eq!(doc.topic, "");
    }

    #[test]
    fn test_crlf_input() {
        let doc = from_markdown("# T\r\n\r\n> [!QUESTION]- Q\r\n> A\r\n> B\r\n");
        assert_eq!(doc.topic, "T");
        assert_eq!(doc.pairs, vec![NotePair::new("Q", "A\nB", false)]);
    }

    #[test]
    fn test_no_blocks_yields_no_pairs() {
        let doc = from_markdown("# Only a title\n\nSome prose.");
        assert_eq!(doc.topic, "Only a title");
        assert!(doc.summary.is_empty());
        assert!(doc.pairs.is_empty());
    }

    #[test]
    fn test_question_without_notes() {
        let doc = from_markdown("> [!QUESTION]- Lonely cue\n\n> [!QUESTION]- Second\n> n\n");
        assert_eq!(
            doc.pairs,
            vec![NotePair::new("Lonely cue", "", false), NotePair::new("Second", "n", false)]
        );
    }
}
