//! Non-interactive subcommands

use anyhow::{bail, Context, Result};
use log::info;
use std::path::Path;

use cornell_core::{parse_bulk_text, BulkMode, NotesDocument};

use crate::io;

/// Convert between formats, picked from each file's extension
pub fn convert(input: &Path, output: &Path) -> Result<()> {
    let doc = io::load_file(input)?;
    io::save_file(&doc, output)?;
    info!(
        "event=convert module=cli status=ok input={} output={} pairs={}",
        input.display(),
        output.display(),
        doc.pairs.len()
    );
    Ok(())
}

/// Append pairs parsed from a plain-text file to the document at `into`,
/// creating it when missing. Nothing is written when no pairs are found.
pub fn bulk(input: &Path, into: &Path, mode: BulkMode) -> Result<usize> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read file: {}", input.display()))?;

    let mut doc = if into.exists() {
        io::load_file(into)?
    } else {
        NotesDocument::default()
    };

    let count = doc.extend_pairs(parse_bulk_text(&raw, mode));
    if count == 0 {
        bail!(
            "Could not find valid notes in {}. Check format.",
            input.display()
        );
    }

    io::save_file(&doc, into)?;
    info!(
        "event=bulk module=cli status=ok mode={} added={} into={}",
        mode,
        count,
        into.display()
    );
    Ok(count)
}
