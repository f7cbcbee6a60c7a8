use indexmap::IndexSet;

use super::naming::NameResolver;
use crate::error::RejectReason;
use crate::model::{EnumId, EnumIdentity, EnumerationKind, VocabularyModel};

/// Identities the orchestrator has declared as referenced during one run.
///
/// Only renderable identities are ever recorded: marking a concept domain
/// records the value set it is bound to. Create a fresh tracker (or call
/// [`UsageTracker::clear`]) at the start of every run.
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    used: IndexSet<EnumIdentity>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as used and return the identity actually recorded.
    ///
    /// Concept domains are resolved to their bound value set first, which may
    /// synthesize a union value set for multi-bound domains.
    pub fn mark_used(
        &mut self,
        model: &mut VocabularyModel,
        id: EnumId,
        names: &NameResolver<'_>,
    ) -> Result<EnumIdentity, RejectReason> {
        let target = if model.get(id).is_concept_domain() {
            names.bindings().resolve(model, self, id)?
        } else {
            id
        };

        let identity = model.get(target).identity();
        if self.used.insert(identity.clone()) {
            tracing::debug!("Marked {} as used", identity);
        }
        Ok(identity)
    }

    pub fn is_used(&self, identity: &EnumIdentity) -> bool {
        self.used.contains(identity)
    }

    /// Whether something named `name` but of another kind is already used.
    pub fn used_with_other_kind(&self, name: &str, kind: EnumerationKind) -> bool {
        self.used.iter().any(|u| u.name == name && u.kind != kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnumIdentity> {
        self.used.iter()
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuiltinTable, VocabGenConfig};
    use crate::model::{Enumeration, EnumerationKind};

    #[test]
    fn test_marking_domain_records_bound_value_set() {
        let config = VocabGenConfig::default();
        let builtins = BuiltinTable::new();
        let names = NameResolver::new(&config, &builtins);

        let mut model = VocabularyModel::new();
        let vs = model.insert(Enumeration::value_set("GenderValues").with_literals(["M", "F"]));
        let cd = model.insert(Enumeration::concept_domain("Gender").with_binding(vs));

        let mut usage = UsageTracker::new();
        let recorded = usage.mark_used(&mut model, cd, &names).unwrap();

        assert_eq!(recorded, EnumIdentity::new("GenderValues", EnumerationKind::ValueSet));
        assert!(!usage.is_used(&EnumIdentity::new("Gender", EnumerationKind::ConceptDomain)));
        assert_eq!(usage.len(), 1);
    }

    #[test]
    fn test_marking_is_idempotent() {
        let config = VocabGenConfig::default();
        let builtins = BuiltinTable::new();
        let names = NameResolver::new(&config, &builtins);

        let mut model = VocabularyModel::new();
        let vs = model.insert(Enumeration::value_set("Gender"));

        let mut usage = UsageTracker::new();
        usage.mark_used(&mut model, vs, &names).unwrap();
        usage.mark_used(&mut model, vs, &names).unwrap();
        assert_eq!(usage.len(), 1);

        usage.clear();
        assert!(usage.is_empty());
    }

    #[test]
    fn test_unbound_domain_is_never_recorded() {
        let config = VocabGenConfig::default();
        let builtins = BuiltinTable::new();
        let names = NameResolver::new(&config, &builtins);

        let mut model = VocabularyModel::new();
        let cd = model.insert(Enumeration::concept_domain("Orphan"));

        let mut usage = UsageTracker::new();
        assert_eq!(
            usage.mark_used(&mut model, cd, &names),
            Err(RejectReason::Unbound)
        );
        assert!(usage.is_empty());
    }

    #[test]
    fn test_other_kind_lookup() {
        let mut usage = UsageTracker::new();
        usage
            .used
            .insert(EnumIdentity::new("Gender", EnumerationKind::ValueSet));

        assert!(usage.used_with_other_kind("Gender", EnumerationKind::CodeSystem));
        assert!(!usage.used_with_other_kind("Gender", EnumerationKind::ValueSet));
        assert!(!usage.used_with_other_kind("Other", EnumerationKind::CodeSystem));
    }
}
