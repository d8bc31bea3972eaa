//! Paginated PDF output using the standard Helvetica fonts

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use textconvert_common::{ConverterError, Result};

use crate::blocks::{lines, Line};

// US Letter, in points
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 54.0;
const LINE_HEIGHT: f32 = 14.0;

const BODY_SIZE: f32 = 11.0;
const HEADING_SIZES: [f32; 3] = [14.0, 12.0, 12.0];

// Average glyph advance as a fraction of the font size; no metrics table is embedded
const REGULAR_GLYPH_WIDTH: f32 = 0.55;
const BOLD_GLYPH_WIDTH: f32 = 0.6;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

#[derive(Clone, Copy)]
struct Font {
    name: &'static str,
    size: f32,
    glyph_width: f32,
}

impl Font {
    fn body() -> Self {
        Self {
            name: REGULAR_FONT,
            size: BODY_SIZE,
            glyph_width: REGULAR_GLYPH_WIDTH,
        }
    }

    fn heading(level: u8) -> Self {
        Self {
            name: BOLD_FONT,
            size: HEADING_SIZES[usize::from(level - 1)],
            glyph_width: BOLD_GLYPH_WIDTH,
        }
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * self.glyph_width
    }
}

/// Cursor over a growing list of page content streams
struct Layout {
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page_if_full(&mut self) {
        if self.y < MARGIN {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn draw(&mut self, font: Font, text: &str) {
        let Some(ops) = self.pages.last_mut() else {
            return;
        };
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.name.as_bytes().to_vec()), points(font.size)],
        ));
        ops.push(Operation::new(
            "Td",
            vec![points(MARGIN), points(self.y)],
        ));
        ops.push(Operation::new("Tj", vec![Object::string_literal(encode_latin1(text))]));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Word-wrap one logical line and advance the cursor
    fn write_wrapped(&mut self, font: Font, text: &str, trailing_gap: f32) {
        let max_width = PAGE_WIDTH - 2.0 * MARGIN;
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if font.text_width(&candidate) <= max_width || current.is_empty() {
                current = candidate;
                continue;
            }

            self.draw(font, &current);
            self.y -= LINE_HEIGHT;
            self.break_page_if_full();
            current = word.to_string();
        }

        if !current.is_empty() {
            self.draw(font, &current);
            self.y -= LINE_HEIGHT + trailing_gap;
        }
    }
}

/// Layout works on whole points
fn points(value: f32) -> Object {
    Object::Integer(value.round() as i64)
}

/// Standard Type1 fonts only cover Latin-1; everything else becomes '?'
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn font_object(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Letter-sized PDF with bold headings and wrapped body text
pub fn to_pdf(text: &str) -> Result<Vec<u8>> {
    let mut layout = Layout::new();

    for line in lines(text) {
        layout.break_page_if_full();
        match line {
            Line::Blank => layout.y -= LINE_HEIGHT,
            Line::Heading(level, title) => layout.write_wrapped(Font::heading(level), title, 6.0),
            Line::Body(body) => layout.write_wrapped(Font::body(), body, 3.0),
        }
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = font_object(&mut doc, "Helvetica");
    let bold = font_object(&mut doc, "Helvetica-Bold");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular,
            BOLD_FONT => bold,
        },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());
    for operations in layout.pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| ConverterError::render(format!("PDF generation failed: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                points(PAGE_WIDTH),
                points(PAGE_HEIGHT),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ConverterError::render(format!("PDF generation failed: {}", e)))?;

    Ok(bytes)
}
