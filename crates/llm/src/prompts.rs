//! Prompt templates for format-aware text enhancement

use textconvert_common::OutputFormat;

use crate::types::GenerateOptions;

/// Sampling temperature; low to keep formatting deterministic
pub const TEMPERATURE: f32 = 0.3;

/// Cap on generated tokens per call
pub const MAX_GENERATED_TOKENS: i32 = 4000;

const DOCX_INSTRUCTION: &str = "Format this text for a professional Word document with appropriate headings and structure. Use markdown syntax for headings (# for h1, ## for h2, etc.).";
const PDF_INSTRUCTION: &str = "Format this text for a clean, readable PDF with proper paragraphs and sections. Use markdown syntax for structure.";
const HTML_INSTRUCTION: &str = "Convert this text to semantic HTML structure. Use markdown syntax that can be converted to HTML.";
const MARKDOWN_INSTRUCTION: &str = "Convert this text to well-formatted Markdown with proper headings, lists, and emphasis.";
const STRUCTURED_TEXT_INSTRUCTION: &str = "Organize this text with clear structure, headings, and logical sections using markdown format.";

/// Canned instruction for a format
pub fn instruction_for(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Docx => DOCX_INSTRUCTION,
        OutputFormat::Pdf => PDF_INSTRUCTION,
        OutputFormat::Html => HTML_INSTRUCTION,
        OutputFormat::Markdown => MARKDOWN_INSTRUCTION,
        OutputFormat::StructuredText => STRUCTURED_TEXT_INSTRUCTION,
    }
}

/// Canned instruction for a raw format name; unknown names get the structured_text one
pub fn instruction_for_name(name: &str) -> &'static str {
    name.parse::<OutputFormat>()
        .map(instruction_for)
        .unwrap_or(STRUCTURED_TEXT_INSTRUCTION)
}

/// "This is part i of n." for chunked requests
pub fn position_note(ordinal: usize, total: usize) -> String {
    format!("This is part {} of {}.", ordinal, total)
}

/// Full prompt: instruction, optional guidance, optional position note, then the text
pub fn build_prompt(
    format: OutputFormat,
    guidance: &str,
    position: Option<(usize, usize)>,
    text: &str,
) -> String {
    let mut header = vec![instruction_for(format).to_string()];

    let guidance = guidance.trim();
    if !guidance.is_empty() {
        header.push(guidance.to_string());
    }

    if let Some((ordinal, total)) = position {
        header.push(position_note(ordinal, total));
    }

    format!("{}\n\nText to process:\n\n{}", header.join("\n\n"), text)
}

/// Sampling options shared by every enhancement call
pub fn generate_options() -> GenerateOptions {
    GenerateOptions {
        temperature: Some(TEMPERATURE),
        top_p: None,
        num_predict: Some(MAX_GENERATED_TOKENS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_falls_back_to_structured_text() {
        assert_eq!(instruction_for_name("rtf"), STRUCTURED_TEXT_INSTRUCTION);
        assert_eq!(instruction_for_name("pdf"), PDF_INSTRUCTION);
    }

    #[test]
    fn test_prompt_with_guidance_and_position() {
        let prompt = build_prompt(OutputFormat::Markdown, "Keep it short.", Some((2, 5)), "body");
        assert_eq!(
            prompt,
            format!(
                "{}\n\nKeep it short.\n\nThis is part 2 of 5.\n\nText to process:\n\nbody",
                MARKDOWN_INSTRUCTION
            )
        );
    }

    #[test]
    fn test_prompt_without_guidance_or_position() {
        let prompt = build_prompt(OutputFormat::Docx, "  ", None, "body");
        assert_eq!(prompt, format!("{}\n\nText to process:\n\nbody", DOCX_INSTRUCTION));
    }

    #[test]
    fn test_generate_options() {
        let options = generate_options();
        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.num_predict, Some(4000));
    }
}
