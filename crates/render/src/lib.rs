//! Text converter document rendering
//!
//! Turns assembled (markdown-flavoured) text into the requested output format

mod blocks;
mod docx;
mod html;
mod pdf;

use textconvert_common::{OutputFormat, Result};
use tracing::debug;

pub use docx::to_docx;
pub use html::{is_html_document, to_html};
pub use pdf::to_pdf;

/// Rendered bytes plus the metadata needed to serve them
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: &'static str,
}

impl RenderedDocument {
    fn new(bytes: Vec<u8>, content_type: &'static str, filename: &'static str) -> Self {
        Self {
            bytes,
            content_type,
            filename,
        }
    }
}

/// Converts assembled text into document bytes
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, text: &str, format: OutputFormat) -> Result<RenderedDocument>;
}

/// Built-in renderer for every output format
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl DocumentRenderer for Renderer {
    fn render(&self, text: &str, format: OutputFormat) -> Result<RenderedDocument> {
        debug!("Rendering {} chars as {}", text.len(), format);

        let document = match format {
            OutputFormat::Markdown => RenderedDocument::new(
                text.as_bytes().to_vec(),
                "text/markdown; charset=utf-8",
                "converted.md",
            ),
            OutputFormat::StructuredText => RenderedDocument::new(
                text.as_bytes().to_vec(),
                "text/plain; charset=utf-8",
                "converted.txt",
            ),
            OutputFormat::Html => RenderedDocument::new(
                to_html(text).into_bytes(),
                "text/html; charset=utf-8",
                "converted.html",
            ),
            OutputFormat::Docx => RenderedDocument::new(
                to_docx(text)?,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                "converted.docx",
            ),
            OutputFormat::Pdf => {
                RenderedDocument::new(to_pdf(text)?, "application/pdf", "converted.pdf")
            }
        };

        Ok(document)
    }
}
