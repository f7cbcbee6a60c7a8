use std::path::Path;
use std::time::Instant;

use crate::codegen::{CodeGenerator, GeneratedFile, JavaVocabularyGenerator};
use crate::core::{BuiltinTable, EntityOutcome, GenerationReport, VocabGenConfig};
use crate::core::builtin::BuiltinVocabulary;
use crate::error::{RejectReason, Result, VocabGenError};
use crate::model::{EnumId, EnumIdentity, VocabularyModel};
use crate::vocabulary::{FileEmitter, LiteralRenderer, NameResolver, UsageTracker};

/// Drives a complete vocabulary generation run over a model.
pub struct VocabularyGenerator {
    config: VocabGenConfig,
    builtins: BuiltinTable,
    code_generator: Box<dyn CodeGenerator>,
}

impl VocabularyGenerator {
    pub fn new(config: VocabGenConfig) -> Result<Self> {
        config.validate()?;
        let code_generator = Box::new(JavaVocabularyGenerator::from_config(&config.output)?);
        let builtins = BuiltinTable::from(config.builtin_vocabulary.clone());

        Ok(Self {
            config,
            builtins,
            code_generator,
        })
    }

    pub fn with_code_generator(mut self, code_generator: Box<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    pub fn config(&self) -> &VocabGenConfig {
        &self.config
    }

    /// Generate every eligible, used enumeration of `model` under
    /// `output_root`.
    ///
    /// Each call is one run with its own usage tracker. Expected rejections
    /// are recorded in the report; caller errors, I/O failures and invariant
    /// violations abort the run.
    pub fn run(
        &self,
        model: &mut VocabularyModel,
        referenced: &[EnumId],
        output_root: &Path,
    ) -> Result<GenerationReport> {
        let started = Instant::now();
        tracing::info!(
            "Generating vocabulary with the {} generator into {}",
            self.code_generator.name(),
            output_root.display()
        );
        let names = NameResolver::new(&self.config, &self.builtins);
        let emitter = FileEmitter::new(&self.config, &self.builtins);
        let renderer = LiteralRenderer::new();
        let usage = self.mark_referenced(model, referenced, &names);

        let mut report = GenerationReport::default();
        report.metadata.marked_used = usage.len();

        // Union value sets constructed along the way are appended to the
        // model and picked up by this loop.
        let mut index = 0;
        while let Some(id) = model.id_at(index) {
            index += 1;

            let identity = model.get(id).identity();
            let realm = model.get(id).owner_realm.clone();

            if self.builtins.is_builtin(&identity.name) {
                let reason = RejectReason::BuiltinExcluded;
                tracing::debug!("Skipping {}: {}", identity, reason);
                report.record(identity, realm, EntityOutcome::Rejected { reason });
                continue;
            }

            let name = match names.resolve(model, &usage, id) {
                Ok(name) => name,
                Err(reason) => {
                    tracing::warn!("Skipping {}: {}", identity, reason);
                    report.record(identity, realm, EntityOutcome::Rejected { reason });
                    continue;
                }
            };

            if model.get(id).is_concept_domain() {
                let outcome = match model.get(id).bindings() {
                    [target] => {
                        let target = model.get(*target).identity();
                        tracing::debug!("{} renders through {}", identity, target);
                        EntityOutcome::Redirected { target }
                    }
                    _ => EntityOutcome::Rejected {
                        reason: RejectReason::Unbound,
                    },
                };
                report.record(identity, realm, outcome);
                continue;
            }

            let path = match emitter.destination(model, &usage, id, output_root) {
                Ok(path) => path,
                Err(VocabGenError::Rejected(reason)) => {
                    tracing::warn!("Not emitting {}: {}", identity, reason);
                    report.record(identity, realm, EntityOutcome::Rejected { reason });
                    continue;
                }
                Err(err) => return Err(err),
            };

            let rendered = renderer.render(model, id, &name)?;
            let body = self.code_generator.generate(model, &rendered)?;
            emitter.write(&GeneratedFile::new(path.clone(), body))?;

            report.metadata.literals_rendered += rendered.declarations.len();
            report.record(
                identity,
                realm,
                EntityOutcome::Written {
                    path,
                    render_name: name,
                },
            );
        }

        report.metadata.duration_ms = Some(started.elapsed().as_millis() as u64);
        tracing::info!(
            "Vocabulary generation finished: {} written, {} rejected in {}ms",
            report.written().count(),
            report.rejected().count(),
            report.metadata.duration_ms.unwrap_or_default()
        );

        Ok(report)
    }

    /// Resolve every enumeration without writing anything.
    pub fn inspect(
        &self,
        model: &mut VocabularyModel,
        referenced: &[EnumId],
    ) -> Vec<(EnumIdentity, std::result::Result<String, RejectReason>)> {
        let names = NameResolver::new(&self.config, &self.builtins);
        let usage = self.mark_referenced(model, referenced, &names);

        let mut outcomes = Vec::with_capacity(model.len());
        let mut index = 0;
        while let Some(id) = model.id_at(index) {
            index += 1;
            let identity = model.get(id).identity();
            let outcome = names.resolve(model, &usage, id);
            outcomes.push((identity, outcome));
        }
        outcomes
    }

    fn mark_referenced(
        &self,
        model: &mut VocabularyModel,
        referenced: &[EnumId],
        names: &NameResolver<'_>,
    ) -> UsageTracker {
        let mut usage = UsageTracker::new();
        for &id in referenced {
            if let Err(reason) = usage.mark_used(model, id, names) {
                tracing::warn!(
                    "Referenced {} cannot be marked as used: {}",
                    model.get(id).identity(),
                    reason
                );
            }
        }
        usage
    }
}
