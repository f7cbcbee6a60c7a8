//! Target-language source generation for rendered vocabularies.

pub mod documentation;
pub mod generator;
pub mod java;
pub mod template;

pub use documentation::DocumentationRenderer;
pub use generator::{CodeGenerator, GeneratedFile};
pub use java::JavaVocabularyGenerator;
pub use template::{BuiltinTemplates, TemplateEngine};
