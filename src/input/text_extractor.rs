//! Text extraction from PDF and DOCX documents

use crate::error::{Result, RankerError};
use crate::input::file_detector::FileType;
use log::{debug, info};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

/// Bytes of an uploaded file plus the format it was declared as
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub format: FileType,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>, format_tag: &str) -> Self {
        Self {
            bytes,
            format: FileType::from_extension(format_tag),
        }
    }
}

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Dispatch on the declared format tag only; the bytes are never sniffed.
pub fn extract_text(document: &RawDocument) -> Result<String> {
    match &document.format {
        FileType::Pdf => {
            info!("Extracting text from PDF ({} bytes)", document.bytes.len());
            PdfExtractor.extract(&document.bytes)
        }
        FileType::Docx => {
            info!("Extracting text from DOCX ({} bytes)", document.bytes.len());
            DocxExtractor.extract(&document.bytes)
        }
        FileType::Unknown(ext) => Err(RankerError::UnsupportedFormat(format!(
            "Unsupported file format: .{}",
            ext
        ))),
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|e| RankerError::PdfExtraction(format!("Failed to parse PDF: {}", e)))?;

        let pages: Vec<String> = document
            .get_pages()
            .keys()
            .map(|&page_number| match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    debug!("PDF page {} yielded no text: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        if !pages.is_empty() && pages.iter().all(|page| page.trim().is_empty()) {
            // Per-page decoding misses fonts with custom encodings
            match pdf_extract::extract_text_from_mem(bytes) {
                Ok(text) if !text.trim().is_empty() => return Ok(text),
                Ok(_) => {}
                Err(e) => debug!("Layout-aware PDF extraction failed: {}", e),
            }
        }

        Ok(pages.join("\n"))
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| RankerError::DocxExtraction(format!("word/document.xml: {}", e)))?
            .read_to_string(&mut xml)?;

        let paragraphs = Self::paragraphs(&xml)?;
        Ok(paragraphs.join("\n"))
    }
}

impl DocxExtractor {
    /// Paragraphs in the order they open; text-box paragraphs nested inside
    /// another paragraph get their own entry after their parent
    fn paragraphs(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs: Vec<String> = Vec::new();
        // Slot index in `paragraphs` plus the text collected so far
        let mut open: Vec<(usize, String)> = Vec::new();
        let mut in_text = false;
        let mut fallback_depth = 0usize;

        loop {
            let event = reader.read_event()?;

            // mc:Fallback repeats the mc:Choice content for older readers
            match &event {
                Event::Start(e) if e.name().as_ref() == b"mc:Fallback" => {
                    fallback_depth += 1;
                    continue;
                }
                Event::End(e) if e.name().as_ref() == b"mc:Fallback" => {
                    fallback_depth = fallback_depth.saturating_sub(1);
                    continue;
                }
                Event::Eof => break,
                _ if fallback_depth > 0 => continue,
                _ => {}
            }

            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:p" => {
                        paragraphs.push(String::new());
                        open.push((paragraphs.len() - 1, String::new()));
                    }
                    b"w:t" => in_text = true,
                    _ => {}
                },
                Event::Empty(e) => match (e.name().as_ref(), open.last_mut()) {
                    (b"w:p", _) => paragraphs.push(String::new()),
                    (b"w:tab", Some((_, current))) => current.push('\t'),
                    (b"w:br" | b"w:cr", Some((_, current))) => current.push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text => {
                    if let Some((_, current)) = open.last_mut() {
                        current.push_str(&t.unescape()?);
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        if let Some((slot, text)) = open.pop() {
                            paragraphs[slot] = text;
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}
