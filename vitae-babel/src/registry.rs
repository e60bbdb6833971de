//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available export
//! formats. Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::{ExportOptions, Format, SerializedDocument};
use crate::ir::Block;
use std::collections::HashMap;

/// Registry of export formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let pdf = registry.serialize(&blocks, "pdf", &ExportOptions::default())?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// The extension is compared case-insensitively.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    /// Serialize blocks using the named format
    pub fn serialize(
        &self,
        blocks: &[Block],
        format: &str,
        options: &ExportOptions,
    ) -> Result<SerializedDocument, FormatError> {
        self.get(format)?.serialize(blocks, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::pdf::PdfFormat::default());
        registry.register(crate::formats::docx::DocxFormat::default());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
