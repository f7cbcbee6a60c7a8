//! JSON interchange format for vocabulary models.
//!
//! The generator proper works on an already-loaded [`VocabularyModel`]; this
//! format lets the CLI and tests feed one in. Cross references (memberships and
//! context bindings) are written by name and resolved after every enumeration
//! has been read.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    Annotation, Documentation, EnumId, EnumIdentity, Enumeration, EnumerationKind,
    EnumerationValue, VocabularyModel,
};
use crate::error::{Result, VocabGenError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDocument {
    #[serde(default)]
    pub enumerations: Vec<EnumerationDocument>,

    /// Identities referenced by structural fields of the wider model.
    #[serde(default)]
    pub referenced: Vec<EnumIdentity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationDocument {
    pub name: String,
    pub kind: EnumerationKind,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub owner_realm: String,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub member_of: Vec<EnumIdentity>,
    #[serde(default)]
    pub literals: Vec<EnumerationValue>,
    #[serde(default)]
    pub content_oid: Option<String>,
    #[serde(default)]
    pub documentation: Documentation,
    /// Names of the bound value sets.
    #[serde(default)]
    pub context_binding: Option<Vec<String>>,
}

/// A model together with the entities the wider model references.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub model: VocabularyModel,
    pub referenced: Vec<EnumId>,
}

impl ModelDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_model(self) -> Result<LoadedModel> {
        let mut model = VocabularyModel::new();
        let mut pending = Vec::with_capacity(self.enumerations.len());

        for doc in self.enumerations {
            let mut enumeration = Enumeration::new(doc.name, doc.kind);
            enumeration.business_name = doc.business_name;
            enumeration.id = doc.id;
            enumeration.owner_realm = doc.owner_realm;
            enumeration.is_partial = doc.is_partial;
            enumeration.annotations = doc.annotations;
            enumeration.literals = doc.literals;
            enumeration.content_oid = doc.content_oid;
            enumeration.documentation = doc.documentation;

            let id = model.insert(enumeration);
            pending.push((id, doc.member_of, doc.context_binding));
        }

        for (id, member_of, binding) in pending {
            let mut containers = Vec::with_capacity(member_of.len());
            for identity in &member_of {
                let container = model.find(identity).ok_or_else(|| {
                    VocabGenError::load(format!(
                        "'{}' is a member of unknown enumeration {}",
                        model.get(id).name,
                        identity
                    ))
                })?;
                containers.push(container);
            }
            model.get_mut(id).member_of = containers;

            if let Some(names) = binding {
                if model.get(id).kind != EnumerationKind::ConceptDomain {
                    return Err(VocabGenError::load(format!(
                        "'{}' declares a context binding but is not a concept domain",
                        model.get(id).name
                    )));
                }
                let mut bound = Vec::with_capacity(names.len());
                for name in &names {
                    let value_set = model
                        .find_by_name(name, EnumerationKind::ValueSet)
                        .ok_or_else(|| {
                            VocabGenError::load(format!(
                                "concept domain '{}' is bound to unknown value set '{}'",
                                model.get(id).name,
                                name
                            ))
                        })?;
                    bound.push(value_set);
                }
                model.get_mut(id).context_binding = Some(bound);
            }
        }

        let referenced = self
            .referenced
            .iter()
            .map(|identity| {
                model.find(identity).ok_or_else(|| {
                    VocabGenError::load(format!("referenced enumeration {identity} does not exist"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Loaded vocabulary model with {} enumerations, {} referenced",
            model.len(),
            referenced.len()
        );

        Ok(LoadedModel { model, referenced })
    }
}

impl VocabularyModel {
    pub fn from_json_str(json: &str) -> Result<LoadedModel> {
        ModelDocument::from_json_str(json)?.into_model()
    }

    pub fn load(path: &Path) -> Result<LoadedModel> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VocabGenError::load(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }
}
