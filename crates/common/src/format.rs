//! Output document formats

use crate::error::ConverterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target format of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Docx,
    Pdf,
    Html,
    Markdown,
    StructuredText,
}

impl OutputFormat {
    /// Formats accepted by the upload endpoints
    pub const UPLOADABLE: [OutputFormat; 4] = [
        OutputFormat::Docx,
        OutputFormat::Pdf,
        OutputFormat::Html,
        OutputFormat::Markdown,
    ];

    /// Wire name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::StructuredText => "structured_text",
        }
    }

    /// Whether clients may request this format over HTTP
    pub fn is_uploadable(&self) -> bool {
        Self::UPLOADABLE.contains(self)
    }

    /// Parse a format name accepted by the upload endpoints
    pub fn parse_uploadable(name: &str) -> Result<Self, ConverterError> {
        let format: Self = name.parse()?;
        if format.is_uploadable() {
            Ok(format)
        } else {
            Err(ConverterError::unsupported_format(name))
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConverterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "structured_text" => Ok(Self::StructuredText),
            _ => Err(ConverterError::unsupported_format(s)),
        }
    }
}
