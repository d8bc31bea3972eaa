//! Multipart upload form shared by the conversion endpoints

use actix_multipart::{Field, Multipart};
use futures::StreamExt;
use textconvert_common::{parse_bool, ConverterError, OutputFormat};

use crate::error::ApiError;

/// Default number of characters processed by /preview
pub const DEFAULT_PREVIEW_LENGTH: usize = 1000;

/// Longest accepted value for a plain text field
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Raw upload form, as sent by the client
#[derive(Debug)]
pub struct ConversionForm {
    pub file: Option<Vec<u8>>,
    pub filename: Option<String>,
    pub output_format: Option<String>,
    pub use_ai: bool,
    pub prompt_context: String,
    pub max_preview_length: usize,
}

impl Default for ConversionForm {
    fn default() -> Self {
        Self {
            file: None,
            filename: None,
            output_format: None,
            use_ai: true,
            prompt_context: String::new(),
            max_preview_length: DEFAULT_PREVIEW_LENGTH,
        }
    }
}

/// Validated conversion input
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub format: OutputFormat,
    pub use_ai: bool,
    pub guidance: String,
}

impl ConversionForm {
    /// Read every field, refusing file bodies larger than `max_file_size`
    pub async fn read(mut payload: Multipart, max_file_size: usize) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = payload.next().await {
            let mut field = field?;
            let name = field.content_disposition().get_name().unwrap_or("").to_string();

            match name.as_str() {
                "file" => {
                    form.filename = field
                        .content_disposition()
                        .get_filename()
                        .map(|f| f.to_string());
                    form.file = Some(read_field(&mut field, max_file_size, true).await?);
                }
                "output_format" => {
                    form.output_format = Some(read_text(&mut field, &name).await?);
                }
                "use_ai" => {
                    let value = read_text(&mut field, &name).await?;
                    form.use_ai = parse_bool(&value).ok_or_else(|| {
                        ConverterError::invalid_input(format!("use_ai must be a boolean, got '{}'", value))
                    })?;
                }
                "prompt_context" => {
                    form.prompt_context = read_text(&mut field, &name).await?;
                }
                "max_preview_length" => {
                    let value = read_text(&mut field, &name).await?;
                    form.max_preview_length = value.trim().parse().map_err(|_| {
                        ConverterError::invalid_input(format!(
                            "max_preview_length must be a non-negative integer, got '{}'",
                            value
                        ))
                    })?;
                }
                _ => {
                    // Unknown fields are drained and ignored
                    while let Some(chunk) = field.next().await {
                        chunk?;
                    }
                }
            }
        }

        Ok(form)
    }

    /// Validate in order: file present, UTF-8 text, uploadable format
    ///
    /// The size limit is already enforced while reading.
    pub fn into_document(self) -> Result<Document, ApiError> {
        let bytes = self
            .file
            .ok_or_else(|| ConverterError::invalid_input("Missing file upload"))?;
        let text = String::from_utf8(bytes).map_err(|_| ConverterError::InvalidEncoding)?;

        let format_name = self
            .output_format
            .ok_or_else(|| ConverterError::invalid_input("Missing output_format"))?;
        let format = OutputFormat::parse_uploadable(&format_name)?;

        Ok(Document {
            text,
            format,
            use_ai: self.use_ai,
            guidance: self.prompt_context,
        })
    }
}

async fn read_field(field: &mut Field, limit: usize, is_file: bool) -> Result<Vec<u8>, ApiError> {
    let mut data = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        if data.len() + chunk.len() > limit {
            let err = if is_file {
                ConverterError::file_too_large(data.len() + chunk.len(), limit)
            } else {
                ConverterError::invalid_input("Form field too large")
            };
            return Err(err.into());
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, ApiError> {
    let bytes = read_field(field, MAX_TEXT_FIELD_BYTES, false).await?;
    String::from_utf8(bytes)
        .map_err(|_| ConverterError::invalid_input(format!("{} must be UTF-8 text", name)).into())
}
