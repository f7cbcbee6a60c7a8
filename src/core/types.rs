use serde::Serialize;
use std::path::PathBuf;

use crate::error::RejectReason;
use crate::model::EnumIdentity;

/// What happened to one enumeration during a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum EntityOutcome {
    Written { path: PathBuf, render_name: String },
    /// A bound concept domain; its value set is generated in its own right.
    Redirected { target: EnumIdentity },
    Rejected { reason: RejectReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityReport {
    pub identity: EnumIdentity,
    pub owner_realm: String,
    #[serde(flatten)]
    pub outcome: EntityOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub entities: Vec<EntityReport>,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    pub duration_ms: Option<u64>,
    pub marked_used: usize,
    pub literals_rendered: usize,
}

impl GenerationReport {
    pub fn record(
        &mut self,
        identity: EnumIdentity,
        owner_realm: impl Into<String>,
        outcome: EntityOutcome,
    ) {
        self.entities.push(EntityReport {
            identity,
            owner_realm: owner_realm.into(),
            outcome,
        });
    }

    pub fn written(&self) -> impl Iterator<Item = &EntityReport> {
        self.entities
            .iter()
            .filter(|e| matches!(e.outcome, EntityOutcome::Written { .. }))
    }

    pub fn rejected(&self) -> impl Iterator<Item = (&EnumIdentity, &RejectReason)> {
        self.entities.iter().filter_map(|e| match &e.outcome {
            EntityOutcome::Rejected { reason } => Some((&e.identity, reason)),
            _ => None,
        })
    }

    pub fn written_paths(&self) -> Vec<&PathBuf> {
        self.entities
            .iter()
            .filter_map(|e| match &e.outcome {
                EntityOutcome::Written { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    /// The first outcome recorded for `identity`.
    pub fn outcome_of(&self, identity: &EnumIdentity) -> Option<&EntityOutcome> {
        self.entities
            .iter()
            .find(|e| &e.identity == identity)
            .map(|e| &e.outcome)
    }
}
