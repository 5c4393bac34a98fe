//! File extraction — uploaded bytes plus a declared extension become plain text.
//!
//! Supported: `.pdf` (via `pdf-extract`), `.docx` (zip container, text runs
//! from `word/document.xml`), `.txt`/`.md` (UTF-8 decode). Anything else is
//! rejected before any decoding is attempted.

use std::io::{Cursor, Read};

use thiserror::Error;

pub mod handlers;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: .{0}")]
    Unsupported(String),

    #[error("uploaded file has no extension")]
    MissingExtension,

    #[error("could not read {kind} file: {detail}")]
    Unreadable { kind: &'static str, detail: String },
}

/// Decodes uploaded file bytes into raw text based on the declared extension.
pub fn extract_text(bytes: &[u8], file_name: &str) -> Result<String, ExtractError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or(ExtractError::MissingExtension)?;

    match extension.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Unreadable {
            kind: "PDF",
            detail: e.to_string(),
        }),
        "docx" => extract_docx_text(bytes),
        "txt" | "md" => {
            String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Unreadable {
                kind: "text",
                detail: e.to_string(),
            })
        }
        other => Err(ExtractError::Unsupported(other.to_string())),
    }
}

/// Pulls the text runs out of a DOCX file.
///
/// A DOCX is a zip archive whose body lives in `word/document.xml`. Only
/// `<w:t>` runs carry text; paragraph ends, tabs, and explicit breaks map to
/// '\n' / '\t'. Everything else (styles, tables markup, revision data) is
/// skipped.
fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let unreadable = |detail: String| ExtractError::Unreadable {
        kind: "DOCX",
        detail,
    };

    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| unreadable(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| unreadable(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| unreadable(e.to_string()))?;

    Ok(document_xml_to_text(&xml))
}

/// Linear scan over the document XML, collecting `<w:t>` bodies.
fn document_xml_to_text(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;

    while let Some(lt) = rest.find('<') {
        rest = &rest[lt..];

        if rest.starts_with("</w:p>") {
            out.push('\n');
        } else if rest.starts_with("<w:tab") {
            out.push('\t');
        } else if rest.starts_with("<w:br") {
            out.push('\n');
        } else if is_text_run_open(rest) {
            if let Some(gt) = rest.find('>') {
                if !rest[..=gt].ends_with("/>") {
                    let body = &rest[gt + 1..];
                    if let Some(close) = body.find("</w:t>") {
                        out.push_str(&unescape_xml(&body[..close]));
                        rest = &body[close + "</w:t>".len()..];
                        continue;
                    }
                }
            }
        }

        match rest.find('>') {
            Some(gt) => rest = &rest[gt + 1..],
            None => break,
        }
    }

    out.trim_end().to_string()
}

/// True if `rest` starts an opening `<w:t>` tag (and not `<w:tab>`, `<w:tc>`, ...).
fn is_text_run_open(rest: &str) -> bool {
    rest.strip_prefix("<w:t")
        .and_then(|after| after.chars().next())
        .map(|c| c == '>' || c == ' ')
        .unwrap_or(false)
}

/// Resolves the five predefined XML entities. `&amp;` is handled last so a
/// double-escaped sequence stays literal.
fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
