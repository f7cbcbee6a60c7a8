//! Java code generation for vocabulary classes

use serde_json::{Value, json};

use super::documentation::DocumentationRenderer;
use super::generator::CodeGenerator;
use super::template::{BuiltinTemplates, TemplateEngine};
use crate::core::OutputConfig;
use crate::error::{Result, VocabGenError};
use crate::model::VocabularyModel;
use crate::vocabulary::{RenderedEnumeration, make_friendly};

const API_IMPORTS: &[&str] = &["annotations.*", "datatypes.*", "datatypes.generic.*"];
const JAVA_IMPORTS: &[&str] = &["java.lang.*", "java.util.*"];

/// Java generator
pub struct JavaVocabularyGenerator {
    package: String,
    api_namespace: String,
    engine: TemplateEngine,
}

impl JavaVocabularyGenerator {
    /// Create a generator for classes in `<package>.vocabulary` implementing
    /// the runtime API under `api_namespace`.
    pub fn new(package: impl Into<String>, api_namespace: impl Into<String>) -> Result<Self> {
        let package = package.into();
        let api_namespace = api_namespace.into();

        if package.trim().is_empty() {
            return Err(VocabGenError::invalid_input("owner package must not be empty"));
        }
        if api_namespace.trim().is_empty() {
            return Err(VocabGenError::invalid_input("API namespace must not be empty"));
        }

        Ok(Self {
            package,
            api_namespace,
            engine: TemplateEngine::with_builtins()?,
        })
    }

    pub fn from_config(output: &OutputConfig) -> Result<Self> {
        Self::new(output.package.clone(), output.api_namespace.clone())
    }

    fn template_data(&self, model: &VocabularyModel, rendered: &RenderedEnumeration) -> Result<Value> {
        let enu = model.get(rendered.source);
        let class_name = make_friendly(&rendered.class_name).ok_or_else(|| {
            VocabGenError::invalid_input(format!(
                "'{}' is not usable as a class name",
                rendered.class_name
            ))
        })?;

        let documentation = match DocumentationRenderer::render(&enu.documentation, 0) {
            doc if doc.is_empty() => "/** No Summary Documentation Found */\n".to_string(),
            doc => doc,
        };

        let declarations: Vec<Value> = rendered
            .declarations
            .iter()
            .map(|declaration| {
                let documentation = declaration
                    .documentation
                    .as_ref()
                    .map(|doc| DocumentationRenderer::render(doc, 1))
                    .unwrap_or_else(|| DocumentationRenderer::render_label(&declaration.label, 1));
                json!({
                    "identifier": declaration.identifier,
                    "code": declaration.code,
                    "code_system": declaration.code_system.clone().unwrap_or_default(),
                    "documentation": documentation,
                })
            })
            .collect();

        Ok(json!({
            "package": self.package,
            "api_namespace": self.api_namespace,
            "api_imports": API_IMPORTS,
            "java_imports": JAVA_IMPORTS,
            "documentation": documentation,
            "name": enu.name,
            "content_oid": enu.content_oid.clone().unwrap_or_default(),
            "structure_type": enu.kind.structure_type(),
            "class_name": class_name,
            "declarations": declarations,
        }))
    }
}

impl CodeGenerator for JavaVocabularyGenerator {
    fn name(&self) -> &str {
        "java"
    }

    fn generate(&self, model: &VocabularyModel, rendered: &RenderedEnumeration) -> Result<String> {
        let data = self.template_data(model, rendered)?;
        self.engine.render(BuiltinTemplates::JAVA_VOCABULARY, &data)
    }
}
