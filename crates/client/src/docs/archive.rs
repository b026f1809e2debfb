//! In-memory ZIP extraction of markdown documents.

use std::io::{Cursor, Read};

use sourcetap_core::Error;

/// A markdown document collected from an archive.
///
/// `filename` is the archive-relative path with the auto-generated top-level
/// folder (e.g. `reponame-branch/`) already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub filename: String,
    pub content: String,
}

/// Extract markdown documents from ZIP archive bytes.
///
/// Keeps entries ending in `.md` or `.mdx`, skips directories and files at
/// the archive root (no path separator), strips the first path segment from
/// each name, and decodes contents as UTF-8 with lossy replacement.
pub fn extract_markdown_docs(bytes: &[u8]) -> Result<Vec<DocEntry>, Error> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| Error::InvalidArchive(e.to_string()))?;

    let mut docs = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| Error::InvalidArchive(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if !(name.ends_with(".md") || name.ends_with(".mdx")) {
            continue;
        }

        // The first segment is the archive's top-level folder; entries
        // without a separator sit at the archive root and are skipped.
        let Some((_, filename)) = name.split_once('/') else {
            continue;
        };

        let mut buf = Vec::new();
        entry
            .read_to_end(&mut buf)
            .map_err(|e| Error::InvalidArchive(e.to_string()))?;
        let content = String::from_utf8_lossy(&buf).into_owned();

        docs.push(DocEntry { filename: filename.to_string(), content });
    }

    tracing::debug!("extracted {} markdown docs from archive", docs.len());
    Ok(docs)
}
