//! Download artifacts for generated components
//!
//! A single file downloads as its raw text. Several files download either as
//! a ZIP archive or, as a plain-text fallback, concatenated with `// File:`
//! header comments so they can be split again.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportError;
use crate::files::{SourceFile, FILE_MARKER};
use crate::patterns::patterns;
use crate::types::DEFAULT_COMPONENT_NAME;

/// File name of the concatenated multi-file download
pub const CONCATENATED_FILENAME: &str = "component-files.txt";

/// File name of the multi-file archive
pub const ARCHIVE_FILENAME: &str = "component-files.zip";

const TEXT_MIME: &str = "text/plain";
const ZIP_MIME: &str = "application/zip";

/// Deflate level used for archives
const ZIP_COMPRESSION_LEVEL: i64 = 6;

/// A ready-to-send download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content: Vec<u8>,
    pub mime_type: &'static str,
}

impl Download {
    fn text(filename: impl Into<String>, content: String) -> Self {
        Self {
            filename: filename.into(),
            content: content.into_bytes(),
            mime_type: TEXT_MIME,
        }
    }
}

/// Suggest a download name for a component.
///
/// Uses the first `function`/`class` component name in the code, then up to
/// two keywords (longer than three characters) from the description, then
/// `GeneratedComponent.tsx`.
pub fn suggested_filename(description: &str, code: &str) -> String {
    if let Some(caps) = patterns()
        .ok()
        .and_then(|p| p.declaration_name.captures(code))
    {
        return format!("{}.tsx", &caps[1]);
    }

    let cleaned: String = description
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    let keywords: String = cleaned
        .split(' ')
        .filter(|word| word.chars().count() > 3)
        .take(2)
        .map(capitalize)
        .collect();

    if keywords.is_empty() {
        format!("{}.tsx", DEFAULT_COMPONENT_NAME)
    } else {
        format!("{}Component.tsx", keywords)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Join files into one text, each preceded by its `// File:` header
pub fn concatenate_files(files: &[SourceFile]) -> String {
    files
        .iter()
        .map(|file| format!("{} {}\n\n{}", FILE_MARKER, file.name, file.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Plain-text download of the active content.
///
/// One file downloads as its raw text under a suggested name; several files
/// are concatenated into `component-files.txt`.
pub fn single_file_download(
    files: &[SourceFile],
    description: &str,
    code: &str,
) -> Result<Download, ExportError> {
    match files {
        [] => Err(ExportError::Empty),
        [file] => Ok(Download::text(
            suggested_filename(description, code),
            file.content.clone(),
        )),
        _ => Ok(Download::text(CONCATENATED_FILENAME, concatenate_files(files))),
    }
}

/// Build a deflate-compressed ZIP archive holding every file under its name
pub fn zip_archive(files: &[SourceFile]) -> Result<Download, ExportError> {
    if files.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(ZIP_COMPRESSION_LEVEL));

    for file in files {
        writer.start_file(file.name.as_str(), options)?;
        writer.write_all(file.content.as_bytes())?;
    }
    let content = writer.finish()?.into_inner();

    log::debug!(
        "Built archive with {} file(s), {}",
        files.len(),
        format_file_size(content.len() as u64)
    );

    Ok(Download {
        filename: ARCHIVE_FILENAME.to_string(),
        content,
        mime_type: ZIP_MIME,
    })
}

/// ZIP archive, or the concatenated text when the archive cannot be built
pub fn archive_or_concatenate(files: &[SourceFile]) -> Result<Download, ExportError> {
    match zip_archive(files) {
        Ok(download) => Ok(download),
        Err(ExportError::Empty) => Err(ExportError::Empty),
        Err(e) => {
            log::warn!("Failed to build archive, falling back to concatenated text: {}", e);
            Ok(Download::text(CONCATENATED_FILENAME, concatenate_files(files)))
        }
    }
}

/// Human-readable size: bytes, then KB and MB with one decimal
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
