//! Converts uploaded assignment documents into plain text.
//!
//! Supported formats are PDF, DOCX and plain text. The declared extension decides
//! the converter; callers reject anything else before reaching this module
//! (see [`DocumentKind::from_file_name`]).

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;

/// Errors raised while turning document bytes into text.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),
    #[error("failed to extract text from PDF: {0}")]
    Pdf(String),
    #[error("failed to read DOCX package: {0}")]
    Docx(String),
}

/// The document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub const ALLOWED_EXTENSIONS: [&'static str; 3] = [".pdf", ".docx", ".txt"];

    /// Maps an extension (with or without the leading dot, any case) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Extracts the text of a document. The result is trimmed; an empty string means
/// the document had no usable content, which is for the caller to reject.
pub fn extract_text(bytes: &[u8], extension: &str) -> Result<String, DocumentError> {
    let kind = DocumentKind::from_extension(extension)
        .ok_or_else(|| DocumentError::UnsupportedExtension(extension.to_string()))?;

    let text = match kind {
        DocumentKind::Text => decode_plain_text(bytes),
        DocumentKind::Pdf => extract_pdf_text(bytes)?,
        DocumentKind::Docx => extract_docx_text(bytes)?,
    };

    Ok(text.trim().to_string())
}

/// Decodes UTF-8, dropping invalid byte sequences instead of failing.
fn decode_plain_text(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// `pdf-extract` panics on some malformed inputs; those become ordinary errors.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(DocumentError::Pdf(e.to_string())),
        Err(_) => Err(DocumentError::Pdf("PDF parser aborted".into())),
    }
}

// Runs of text, tabs, breaks and paragraph ends inside `word/document.xml`.
// An opening `<w:t ...>` never ends in `/`; self-closing runs take the second branch.
static DOCX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*[^/>])?>(.*?)</w:t>|<w:t(?:\s[^>]*)?/>|<w:tab/>|<w:(?:br|cr)(?:\s[^>]*)?/>|</w:p>|<w:p(?:\s[^>]*)?/>")
        .expect("static DOCX token regex")
});

static XML_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(amp|lt|gt|quot|apos|#[0-9]+|#x[0-9A-Fa-f]+);").expect("static entity regex")
});

fn extract_docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Docx(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(e.to_string()))?;

    Ok(docx_xml_to_text(&xml))
}

/// Flattens WordprocessingML into text, one line per paragraph.
fn docx_xml_to_text(xml: &str) -> String {
    let mut out = String::new();

    for caps in DOCX_TOKEN.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            out.push_str(&unescape_xml(run.as_str()));
            continue;
        }

        let token = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        if token == "<w:tab/>" {
            out.push('\t');
        } else if token.starts_with("<w:t") {
            // empty run
        } else {
            out.push('\n');
        }
    }

    out
}

fn unescape_xml(raw: &str) -> String {
    XML_ENTITY
        .replace_all(raw, |caps: &regex::Captures| {
            let entity = &caps[1];
            match entity {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                _ => {
                    let code = if let Some(hex) = entity.strip_prefix("#x") {
                        u32::from_str_radix(hex, 16).ok()
                    } else {
                        entity[1..].parse::<u32>().ok()
                    };
                    code.and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        })
        .into_owned()
}
