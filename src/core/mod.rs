pub mod builtin;
pub mod config;
pub mod manager;
pub mod types;

pub use builtin::{BuiltinTable, BuiltinVocabulary};
pub use config::{OutputConfig, VocabGenConfig};
pub use manager::VocabularyGenerator;
pub use types::*;
