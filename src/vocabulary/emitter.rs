//! Destination and overwrite guards for generated vocabulary files.

use std::fs;
use std::path::{Path, PathBuf};

use super::naming::make_friendly;
use super::usage::UsageTracker;
use crate::codegen::GeneratedFile;
use crate::core::{BuiltinVocabulary, VocabGenConfig};
use crate::error::{RejectReason, Result, VocabGenError};
use crate::model::{EnumId, VocabularyModel};

/// Directory under the output root that receives vocabulary files.
pub const VOCABULARY_DIR: &str = "vocabulary";

pub struct FileEmitter<'a> {
    config: &'a VocabGenConfig,
    builtins: &'a dyn BuiltinVocabulary,
}

impl<'a> FileEmitter<'a> {
    pub fn new(config: &'a VocabGenConfig, builtins: &'a dyn BuiltinVocabulary) -> Self {
        Self { config, builtins }
    }

    /// Compute where `id` is written, enforcing the emission guards.
    ///
    /// Builtin vocabularies are never generated, unused ones are rejected, and
    /// an existing file is only overwritten by an enumeration owned by the
    /// preferred realm.
    pub fn destination(
        &self,
        model: &VocabularyModel,
        usage: &UsageTracker,
        id: EnumId,
        output_root: &Path,
    ) -> Result<PathBuf> {
        let entity = model.get(id);
        if self.builtins.is_builtin(&entity.name) {
            return Err(RejectReason::BuiltinExcluded.into());
        }

        let target = if entity.is_concept_domain() {
            match entity.bindings() {
                [single] => *single,
                _ => return Err(RejectReason::Unbound.into()),
            }
        } else {
            id
        };
        let enu = model.get(target);

        if !usage.is_used(&enu.identity()) {
            let count = enu.literal_count();
            let reason = if count > self.config.max_literals {
                RejectReason::TooLarge {
                    count,
                    max: self.config.max_literals,
                }
            } else {
                RejectReason::Unused
            };
            return Err(reason.into());
        }

        let render_name = model.render_name(target);
        let file_name = make_friendly(render_name).ok_or_else(|| {
            VocabGenError::invalid_input(format!(
                "'{render_name}' cannot be turned into a file name"
            ))
        })?;

        let path = output_root
            .join(VOCABULARY_DIR)
            .join(file_name)
            .with_extension(&self.config.output.extension);

        if path.exists() && !enu.owner_realm.ends_with(&self.config.preferred_realm) {
            return Err(RejectReason::DuplicateRealm { path }.into());
        }

        Ok(path)
    }

    /// Write a file whose path came from [`FileEmitter::destination`].
    pub fn write(&self, file: &GeneratedFile) -> Result<()> {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file.path, &file.content)?;
        tracing::info!("Wrote {}", file.path.display());
        Ok(())
    }
}
