//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use cornell_core::{Format, NotesDocument};

/// Read a notes file whole, detecting its format from the extension.
/// Unsupported extensions fail before the file is read.
pub fn read_source(path: &Path) -> Result<(String, Format)> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok((content, format))
}

/// Load a `.json` or `.md` file into a new document
pub fn load_file(path: &Path) -> Result<NotesDocument> {
    let (content, format) = read_source(path)?;
    let doc = cornell_core::import(&content, format)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(doc)
}

/// Write a document in the format implied by `path`
pub fn save_file(doc: &NotesDocument, path: &Path) -> Result<()> {
    let format = Format::from_path(path)?;
    let content = cornell_core::export(doc, format).context("Failed to serialize document")?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Get the ~/.cornell directory path, creating it if needed
pub fn cornell_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let cornell_dir = home.join(".cornell");

    if !cornell_dir.exists() {
        fs::create_dir_all(&cornell_dir)
            .with_context(|| format!("Failed to create {}", cornell_dir.display()))?;
    }

    Ok(cornell_dir)
}

/// Export document to `<dir>/<topic-slug>.<ext>`
pub fn export_document(doc: &NotesDocument, format: Format, dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let export_path = dir.join(cornell_core::export_file_name(doc, format));
    save_file(doc, &export_path)?;
    Ok(export_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornell_core::NotePair;

    fn sample() -> NotesDocument {
        NotesDocument {
            topic: "Cell Biology".to_string(),
            summary: "Cells all the way down".to_string(),
            pairs: vec![NotePair::new("What is a cell?", "Smallest unit of life", true)],
        }
    }

    #[test]
    fn test_export_and_reload_both_formats() {
        let dir = tempfile::tempdir().unwrap();

        for format in Format::all() {
            let path = export_document(&sample(), *format, dir.path()).unwrap();
            assert_eq!(
                path.file_name().unwrap().to_string_lossy(),
                format!("cell-biology.{}", format.extension())
            );
            assert_eq!(load_file(&path).unwrap(), sample());
        }
    }

    #[test]
    fn test_export_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = export_document(&NotesDocument::empty(), Format::Json, &nested).unwrap();
        assert!(path.ends_with("untitled-notes.json"));
        assert!(path.exists());
    }

    #[test]
    fn test_unsupported_extension_is_rejected_before_reading() {
        // the file does not exist; the extension check must fail first
        let err = read_source(Path::new("/definitely/missing/notes.txt")).unwrap_err();
        let core_err = err.downcast_ref::<cornell_core::Error>().unwrap();
        assert!(matches!(core_err, cornell_core::Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_parse_failure_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
        assert!(err
            .downcast_ref::<cornell_core::Error>()
            .is_some_and(|e| e.is_parse_error()));
    }
}
