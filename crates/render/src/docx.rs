use docx_rs::{Docx, Paragraph, Run, RunFonts, Style, StyleType};
use std::io::Cursor;
use textconvert_common::{ConverterError, Result};

use crate::blocks::{lines, Line};

/// Body text size in half-points (11pt)
const BODY_SIZE: usize = 22;

/// Heading sizes in half-points, indexed by level - 1
const HEADING_SIZES: [usize; 3] = [32, 26, 24];

fn heading_style(level: u8) -> Style {
    let idx = usize::from(level - 1);
    Style::new(format!("Heading{}", level), StyleType::Paragraph)
        .name(format!("Heading {}", level))
        .size(HEADING_SIZES[idx])
        .bold()
}

/// Word document with Arial 11pt body and three heading levels
pub fn to_docx(text: &str) -> Result<Vec<u8>> {
    let mut docx = Docx::new()
        .default_fonts(RunFonts::new().ascii("Arial").hi_ansi("Arial").cs("Arial"))
        .default_size(BODY_SIZE);
    for level in 1..=3 {
        docx = docx.add_style(heading_style(level));
    }

    for line in lines(text) {
        docx = match line {
            Line::Heading(level, title) => docx.add_paragraph(
                Paragraph::new()
                    .style(&format!("Heading{}", level))
                    .add_run(Run::new().add_text(title)),
            ),
            Line::Body(body) => docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(body))),
            Line::Blank => docx,
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ConverterError::render(format!("DOCX generation failed: {}", e)))?;

    Ok(buffer.into_inner())
}
