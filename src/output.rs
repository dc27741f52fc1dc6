//! Writing rendered documents to disk.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::Builder;
use crate::error::Result;
use crate::validate::validate;

/// Write `content` verbatim to `path`, creating parent directories.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, content)?;

    info!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Validate and write markdown text to `path`, creating parent directories.
/// Nothing is written if validation fails.
pub fn write_markdown(path: &Path, markdown: &str) -> Result<()> {
    validate(markdown)?;
    write_text(path, markdown)
}

/// Render `builder` and write the result to `path`.
pub fn write_document(path: &Path, builder: &Builder) -> Result<()> {
    write_markdown(path, &builder.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::validate::ValidationError;

    #[test]
    fn writes_into_new_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/doc.md");

        let mut b = Builder::new();
        b.add_header(1, "Test Document").add_paragraph("This is a test document.");
        write_document(&path, &b).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Test Document\n\nThis is a test document.\n\n"
        );
    }

    #[test]
    fn plain_text_writes_into_new_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/dir/CHANGELOG.json");

        write_text(&path, "{\"changelog\": []}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"changelog\": []}");
    }

    #[test]
    fn invalid_markdown_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.md");

        let mut b = Builder::new();
        b.add_code_block("md", "```\nnested fence");
        let err = write_document(&path, &b).unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnterminatedFence { .. })
        ));
        assert!(!path.exists());
    }
}
