use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, VocabGenError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VocabGenConfig {
    /// Enumerations with more literals than this are never rendered.
    pub max_literals: usize,
    pub render_partials: bool,
    /// Render every enumerated type, not only value sets.
    pub generate_all_vocab: bool,
    /// Realm suffix whose enumerations may overwrite an existing file.
    pub preferred_realm: String,
    pub output: OutputConfig,
    /// Vocabulary names supplied natively by the target runtime, mapped to the
    /// runtime type that replaces them.
    pub builtin_vocabulary: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    pub extension: String,
    /// Package the generated vocabulary classes live under.
    pub package: String,
    /// Namespace of the runtime API the generated classes implement.
    pub api_namespace: String,
}

impl Default for VocabGenConfig {
    fn default() -> Self {
        Self {
            max_literals: 100,
            render_partials: false,
            generate_all_vocab: false,
            preferred_realm: "UV".to_string(),
            output: OutputConfig::default(),
            builtin_vocabulary: HashMap::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: "java".to_string(),
            package: "org.example.hl7".to_string(),
            api_namespace: "ca.marc.everest".to_string(),
        }
    }
}

impl VocabGenConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VocabGenError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.extension.trim().is_empty() {
            return Err(VocabGenError::config("output extension must not be empty"));
        }
        if self.output.extension.starts_with('.') {
            return Err(VocabGenError::config(
                "output extension must be given without a leading dot",
            ));
        }
        Ok(())
    }

    pub fn with_max_literals(mut self, max: usize) -> Self {
        self.max_literals = max;
        self
    }

    pub fn with_render_partials(mut self, render: bool) -> Self {
        self.render_partials = render;
        self
    }

    pub fn with_generate_all_vocab(mut self, generate: bool) -> Self {
        self.generate_all_vocab = generate;
        self
    }

    pub fn with_preferred_realm(mut self, realm: impl Into<String>) -> Self {
        self.preferred_realm = realm.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.output.extension = extension.into();
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.output.package = package.into();
        self
    }

    pub fn with_builtin(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.builtin_vocabulary.insert(name.into(), target.into());
        self
    }
}
