//! Concept domain binding resolution.

use super::usage::UsageTracker;
use crate::error::RejectReason;
use crate::model::{Documentation, EnumId, Enumeration, EnumerationValue, VocabularyModel};

/// Decides whether an enumeration would be rendered, and under which name.
///
/// Binding resolution asks this for every source of a multi-bound concept
/// domain before it builds a union of them.
pub trait EligibilityCheck {
    fn check(
        &self,
        model: &mut VocabularyModel,
        usage: &UsageTracker,
        id: EnumId,
    ) -> Result<String, RejectReason>;
}

/// Reduces a concept domain to the single value set it renders as.
pub struct BindingResolver<'c> {
    eligibility: &'c dyn EligibilityCheck,
}

impl<'c> BindingResolver<'c> {
    pub fn new(eligibility: &'c dyn EligibilityCheck) -> Self {
        Self { eligibility }
    }

    /// Resolve `id` to a renderable enumeration.
    ///
    /// Anything that is not a concept domain resolves to itself. A domain with
    /// one binding resolves to that value set. A domain with several bindings
    /// is rewritten in place to point at a synthesized union value set, which
    /// is returned; this rewrite holds for the rest of the run.
    pub fn resolve(
        &self,
        model: &mut VocabularyModel,
        usage: &UsageTracker,
        id: EnumId,
    ) -> Result<EnumId, RejectReason> {
        let domain = model.get(id);
        if !domain.is_concept_domain() {
            return Ok(id);
        }

        let bindings = domain.bindings().to_vec();
        match bindings.as_slice() {
            [] => {
                tracing::debug!("Concept domain '{}' has no context binding", domain.name);
                Err(RejectReason::Unbound)
            }
            [single] => Ok(*single),
            _ => self.synthesize_union(model, usage, id, &bindings),
        }
    }

    /// Build `<Name>AutoGen` from the literal trees of `sources`, in binding
    /// order. Unlike a plain concatenation, every copied literal without a
    /// code system of its own is stamped with its source set's `content_oid`,
    /// since the union carries no `content_oid` that rendered declarations
    /// could fall back to.
    fn synthesize_union(
        &self,
        model: &mut VocabularyModel,
        usage: &UsageTracker,
        domain_id: EnumId,
        sources: &[EnumId],
    ) -> Result<EnumId, RejectReason> {
        // Either every source renders or none of them does.
        for &source in sources {
            if let Err(reason) = self.eligibility.check(model, usage, source) {
                tracing::debug!(
                    "Concept domain '{}' bound to ineligible {}: {}",
                    model.get(domain_id).name,
                    model.get(source).identity(),
                    reason
                );
                return Err(RejectReason::NotEligible);
            }
        }

        let domain = model.get(domain_id);
        let mut union = Enumeration::value_set(format!("{}AutoGen", domain.name));
        union.business_name = domain.business_name.clone();
        union.id = domain.id.clone();
        union.owner_realm = domain.owner_realm.clone();
        union.member_of = domain.member_of.clone();
        union.documentation = Documentation {
            description: vec![format!(
                "Value set has automatically been generated to allow binding to ConceptDomain '{}'",
                domain.name
            )],
            rationale: vec![format!(
                "Context bindings can normally only be redirected from a concept domain with one binding, \
                 however this concept domain has '{}' present. This value set is a union of content from:",
                sources.len()
            )],
        };

        for &source in sources {
            let source = model.get(source);
            union
                .documentation
                .rationale
                .push(format!("<p>- {} ({})</p>", source.name, source.kind));
            union.literals.extend(
                source
                    .literals
                    .iter()
                    .map(|literal| with_code_system(literal, source.content_oid.as_deref())),
            );
        }

        tracing::info!(
            "Synthesized '{}' from {} bindings of concept domain '{}'",
            union.name,
            sources.len(),
            domain.name
        );

        let union_id = model.construct(union);
        model.replace_binding(domain_id, union_id);
        Ok(union_id)
    }
}

/// Copy a literal tree, filling in the code system of its source set where a
/// literal does not name one.
fn with_code_system(literal: &EnumerationValue, fallback: Option<&str>) -> EnumerationValue {
    EnumerationValue {
        code_system: literal
            .code_system
            .clone()
            .or_else(|| fallback.map(str::to_string)),
        related_codes: literal
            .related_codes
            .iter()
            .map(|related| with_code_system(related, fallback))
            .collect(),
        ..literal.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnumerationKind;

    struct AcceptAll;

    impl EligibilityCheck for AcceptAll {
        fn check(
            &self,
            model: &mut VocabularyModel,
            _usage: &UsageTracker,
            id: EnumId,
        ) -> Result<String, RejectReason> {
            Ok(model.get(id).name.clone())
        }
    }

    struct RejectNamed(&'static str);

    impl EligibilityCheck for RejectNamed {
        fn check(
            &self,
            model: &mut VocabularyModel,
            _usage: &UsageTracker,
            id: EnumId,
        ) -> Result<String, RejectReason> {
            if model.get(id).name == self.0 {
                Err(RejectReason::Partial)
            } else {
                Ok(model.get(id).name.clone())
            }
        }
    }

    fn blood_type_model() -> (VocabularyModel, EnumId, EnumId, EnumId) {
        let mut model = VocabularyModel::new();
        let abo = model.insert(
            Enumeration::value_set("ABO")
                .with_content_oid("2.16.1")
                .with_literals(["A+", "B+"]),
        );
        let o = model.insert(
            Enumeration::value_set("O")
                .with_content_oid("2.16.2")
                .with_literals(["O+"]),
        );
        let cd = model.insert(
            Enumeration::concept_domain("BloodType")
                .with_realm("UV")
                .with_binding(abo)
                .with_binding(o),
        );
        (model, cd, abo, o)
    }

    #[test]
    fn test_non_domain_resolves_to_itself() {
        let (mut model, _, abo, _) = blood_type_model();
        let resolver = BindingResolver::new(&AcceptAll);
        assert_eq!(resolver.resolve(&mut model, &UsageTracker::new(), abo), Ok(abo));
    }

    #[test]
    fn test_single_binding_substitutes_same_entity() {
        let mut model = VocabularyModel::new();
        let vs = model.insert(Enumeration::value_set("Gender"));
        let cd = model.insert(Enumeration::concept_domain("AdministrativeGender").with_binding(vs));

        let resolver = BindingResolver::new(&AcceptAll);
        assert_eq!(resolver.resolve(&mut model, &UsageTracker::new(), cd), Ok(vs));
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_empty_binding_is_unbound() {
        let mut model = VocabularyModel::new();
        let absent = model.insert(Enumeration::concept_domain("Absent"));
        let mut empty = Enumeration::concept_domain("Empty");
        empty.context_binding = Some(Vec::new());
        let empty = model.insert(empty);

        let resolver = BindingResolver::new(&AcceptAll);
        let usage = UsageTracker::new();
        assert_eq!(resolver.resolve(&mut model, &usage, absent), Err(RejectReason::Unbound));
        assert_eq!(resolver.resolve(&mut model, &usage, empty), Err(RejectReason::Unbound));
    }

    #[test]
    fn test_multiple_bindings_synthesize_union() {
        let (mut model, cd, _, _) = blood_type_model();
        let resolver = BindingResolver::new(&AcceptAll);

        let union = resolver.resolve(&mut model, &UsageTracker::new(), cd).unwrap();
        let synthesized = model.get(union);

        assert_eq!(synthesized.name, "BloodTypeAutoGen");
        assert_eq!(synthesized.kind, EnumerationKind::ValueSet);
        assert_eq!(synthesized.owner_realm, "UV");
        assert_eq!(synthesized.literal_count(), 3);
        assert_eq!(synthesized.documentation.rationale.len(), 3);
        assert!(synthesized.documentation.rationale[1].contains("ABO (ValueSet)"));
        assert_eq!(synthesized.literals[0].code_system.as_deref(), Some("2.16.1"));
        assert_eq!(synthesized.literals[2].code_system.as_deref(), Some("2.16.2"));
        assert_eq!(model.get(cd).bindings(), &[union]);
        assert_eq!(
            model.find_by_name("BloodTypeAutoGen", EnumerationKind::ValueSet),
            Some(union)
        );
    }

    #[test]
    fn test_second_resolution_reuses_union() {
        let (mut model, cd, _, _) = blood_type_model();
        let resolver = BindingResolver::new(&AcceptAll);
        let usage = UsageTracker::new();

        let first = resolver.resolve(&mut model, &usage, cd).unwrap();
        let second = resolver.resolve(&mut model, &usage, cd).unwrap();
        assert_eq!(first, second);
        assert_eq!(model.len(), 4);
    }

    #[test]
    fn test_ineligible_source_rejects_whole_domain() {
        let (mut model, cd, abo, o) = blood_type_model();
        let resolver = BindingResolver::new(&RejectNamed("O"));

        assert_eq!(
            resolver.resolve(&mut model, &UsageTracker::new(), cd),
            Err(RejectReason::NotEligible)
        );
        assert_eq!(model.get(cd).bindings(), &[abo, o]);
        assert_eq!(model.len(), 3);
    }
}
