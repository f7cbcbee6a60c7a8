//! # OctoFHIR VocabGen
//!
//! Vocabulary code generation for HL7 v3 models: decides which value sets,
//! concept domains and code systems become source files, under which names,
//! and renders their literals as typed constants.
//!
//! ## Features
//!
//! - **Binding resolution**: concept domains collapse to one value set, with
//!   union value sets synthesized for multi-bound domains
//! - **Naming**: builtin overrides, size and partial gates, sticky renames and
//!   cross-kind collision handling
//! - **Literal rendering**: depth-first walk with identifier deduplication
//! - **Emission guards**: unused and realm-precedence protection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use octofhir_vocabgen::*;
//! use std::path::Path;
//!
//! # fn example() -> Result<()> {
//! let LoadedModel { mut model, referenced } = VocabularyModel::load(Path::new("model.json"))?;
//! let generator = VocabularyGenerator::new(VocabGenConfig::default())?;
//! let report = generator.run(&mut model, &referenced, Path::new("generated"))?;
//! for (identity, reason) in report.rejected() {
//!     println!("{identity}: {reason}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod codegen;
pub mod core;
pub mod error;
pub mod model;
pub mod vocabulary;

pub use crate::core::{
    BuiltinTable, BuiltinVocabulary, EntityOutcome, EntityReport, GenerationReport,
    OutputConfig, VocabGenConfig, VocabularyGenerator,
};
pub use codegen::{CodeGenerator, JavaVocabularyGenerator, TemplateEngine};
pub use error::Result; // Our Result type takes precedence
pub use error::{RejectReason, VocabGenError};
pub use model::{
    Annotation, Documentation, EnumId, EnumIdentity, Enumeration, EnumerationKind,
    EnumerationValue, LoadedModel, ModelDocument, VocabularyModel,
};
pub use vocabulary::{
    BindingResolver, Declaration, FileEmitter, LiteralRenderer, NameResolver,
    RenderedEnumeration, UsageTracker,
};
