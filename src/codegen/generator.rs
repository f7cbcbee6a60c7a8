//! Core code generation traits and types

use std::path::PathBuf;

use crate::error::Result;
use crate::model::VocabularyModel;
use crate::vocabulary::RenderedEnumeration;

/// A generated file with its path and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Where the file is written
    pub path: PathBuf,
    /// The generated content of the file
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: PathBuf, content: String) -> Self {
        Self { path, content }
    }
}

/// Turns rendered vocabulary declarations into target-language source text.
pub trait CodeGenerator {
    /// Get the name of this generator
    fn name(&self) -> &str;

    /// Produce the body of the file for `rendered`.
    fn generate(&self, model: &VocabularyModel, rendered: &RenderedEnumeration) -> Result<String>;
}
