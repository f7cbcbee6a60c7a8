//! Literal tree rendering.

use serde::Serialize;
use std::collections::HashSet;

use super::naming::{make_friendly, pascal_case};
use crate::error::{Result, VocabGenError};
use crate::model::{Documentation, EnumId, Enumeration, EnumerationValue, VocabularyModel};

/// Identifier used when neither label nor code yields one.
pub const UNKNOWN_IDENTIFIER: &str = "__Unknown";

/// One constant of a rendered vocabulary class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub identifier: String,
    pub code: String,
    pub code_system: Option<String>,
    /// Label shown when the literal carries no documentation.
    pub label: String,
    pub documentation: Option<Documentation>,
}

/// The declarations of one enumeration, ready for a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEnumeration {
    /// The enumeration the literals were taken from.
    pub source: EnumId,
    /// Name of the class whose constructor the declarations call.
    pub class_name: String,
    pub declarations: Vec<Declaration>,
}

/// Dedup state of one enumeration's walk.
#[derive(Debug, Default)]
struct Walk {
    identifiers: HashSet<String>,
    codes: HashSet<String>,
    declarations: Vec<Declaration>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralRenderer;

impl LiteralRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the literal tree of `id` as uniquely named declarations.
    ///
    /// A concept domain renders through its first bound value set; an unbound
    /// one is an invariant violation since eligibility rejects it upstream.
    pub fn render(
        &self,
        model: &VocabularyModel,
        id: EnumId,
        class_name: &str,
    ) -> Result<RenderedEnumeration> {
        let source = match model.get(id) {
            enu if enu.is_concept_domain() => *enu.bindings().first().ok_or_else(|| {
                VocabGenError::invariant(format!(
                    "won't render unbound concept domain '{}'",
                    enu.name
                ))
            })?,
            _ => id,
        };

        let owner = model.get(source);
        let walk = self.walk(owner, &owner.literals, Walk::default());

        Ok(RenderedEnumeration {
            source,
            class_name: class_name.to_string(),
            declarations: walk.declarations,
        })
    }

    fn walk(&self, owner: &Enumeration, literals: &[EnumerationValue], walk: Walk) -> Walk {
        literals
            .iter()
            .fold(walk, |walk, literal| self.visit(owner, literal, walk))
    }

    fn visit(&self, owner: &Enumeration, literal: &EnumerationValue, mut walk: Walk) -> Walk {
        let candidate = candidate_identifier(literal);
        let label = literal.business_name.as_deref().unwrap_or(&literal.name);

        if walk.codes.contains(&literal.name) {
            tracing::warn!(
                "Enumeration value '{}' of '{}' already rendered, skipping",
                label,
                owner.name
            );
            return walk;
        }

        if literal.is_suppressed() {
            tracing::warn!(
                "Enumeration literal '{}' of '{}' won't be rendered as it has SuppressBrowse enabled",
                literal.name,
                owner.name
            );
            return walk;
        }

        let identifier = if walk.identifiers.contains(&candidate) {
            // Same label, different code: keep both by suffixing the code.
            let disambiguated = make_friendly(&format!("{candidate}_{}", literal.name))
                .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_string());
            let unique = unique_identifier(&walk.identifiers, disambiguated);
            tracing::debug!(
                "Enumeration value '{}' of '{}' rendered as '{}'",
                label,
                owner.name,
                unique
            );
            unique
        } else {
            candidate
        };

        walk.identifiers.insert(identifier.clone());
        walk.codes.insert(literal.name.clone());
        walk.declarations.push(Declaration {
            identifier,
            code: literal.name.clone(),
            code_system: literal
                .code_system
                .clone()
                .or_else(|| owner.content_oid.clone()),
            label: label.to_string(),
            documentation: literal.documentation.clone().filter(|d| !d.is_empty()),
        });

        self.walk(owner, &literal.related_codes, walk)
    }
}

/// `base`, or `base_N` for the smallest N >= 2 that is still free.
fn unique_identifier(taken: &HashSet<String>, base: String) -> String {
    if !taken.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn candidate_identifier(literal: &EnumerationValue) -> String {
    literal
        .business_name
        .as_deref()
        .and_then(pascal_case)
        .or_else(|| pascal_case(&literal.name))
        .and_then(|name| make_friendly(&name))
        .unwrap_or_else(|| UNKNOWN_IDENTIFIER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(enu: Enumeration) -> Vec<Declaration> {
        let mut model = VocabularyModel::new();
        let id = model.insert(enu);
        LiteralRenderer::new()
            .render(&model, id, "Test")
            .unwrap()
            .declarations
    }

    fn identifiers(declarations: &[Declaration]) -> Vec<&str> {
        declarations.iter().map(|d| d.identifier.as_str()).collect()
    }

    #[test]
    fn test_renders_labels_in_document_order() {
        let declarations = render(
            Enumeration::value_set("Gender")
                .with_content_oid("2.16.840.1.113883.5.1")
                .with_literal(EnumerationValue::new("M").with_label("Male"))
                .with_literal(EnumerationValue::new("F").with_label("Female"))
                .with_literal(EnumerationValue::new("UN").with_label("undifferentiated")),
        );

        assert_eq!(identifiers(&declarations), vec!["Male", "Female", "Undifferentiated"]);
        assert_eq!(declarations[0].code, "M");
        assert_eq!(
            declarations[0].code_system.as_deref(),
            Some("2.16.840.1.113883.5.1")
        );
    }

    #[test]
    fn test_falls_back_to_code_then_placeholder() {
        let declarations = render(
            Enumeration::value_set("Codes")
                .with_literal(EnumerationValue::new("active"))
                .with_literal(EnumerationValue::new("+")),
        );
        assert_eq!(identifiers(&declarations), vec!["Active", UNKNOWN_IDENTIFIER]);
    }

    #[test]
    fn test_literal_code_system_overrides_owner() {
        let declarations = render(
            Enumeration::value_set("Mixed")
                .with_content_oid("1.1")
                .with_literal(EnumerationValue::new("A").with_code_system("2.2")),
        );
        assert_eq!(declarations[0].code_system.as_deref(), Some("2.2"));
    }

    #[test]
    fn test_duplicate_code_is_skipped() {
        let declarations = render(
            Enumeration::value_set("Dup")
                .with_literal(EnumerationValue::new("A").with_label("First"))
                .with_literal(EnumerationValue::new("A").with_label("Second")),
        );
        assert_eq!(identifiers(&declarations), vec!["First"]);
    }

    #[test]
    fn test_same_label_different_code_is_disambiguated() {
        let declarations = render(
            Enumeration::value_set("Labels")
                .with_literal(EnumerationValue::new("A").with_label("Other"))
                .with_literal(EnumerationValue::new("B").with_label("Other")),
        );
        assert_eq!(identifiers(&declarations), vec!["Other", "Other_B"]);
        assert_eq!(declarations[1].code, "B");
    }

    #[test]
    fn test_codes_differing_in_punctuation_all_surface() {
        let declarations = render(
            Enumeration::value_set("Labels")
                .with_literal(EnumerationValue::new("A+").with_label("Other"))
                .with_literal(EnumerationValue::new("A-").with_label("Other"))
                .with_literal(EnumerationValue::new("A*").with_label("Other")),
        );
        assert_eq!(identifiers(&declarations), vec!["Other", "Other_A", "Other_A_2"]);
        let codes: Vec<_> = declarations.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["A+", "A-", "A*"]);
    }

    #[test]
    fn test_suppressed_literal_and_its_children_are_skipped() {
        let declarations = render(
            Enumeration::value_set("Hidden")
                .with_literal(
                    EnumerationValue::new("X")
                        .suppressed()
                        .with_related(EnumerationValue::new("X1")),
                )
                .with_literal(EnumerationValue::new("Y")),
        );
        assert_eq!(identifiers(&declarations), vec!["Y"]);
    }

    #[test]
    fn test_dedup_spans_the_whole_tree() {
        let declarations = render(
            Enumeration::value_set("Tree")
                .with_literal(
                    EnumerationValue::new("A")
                        .with_related(EnumerationValue::new("B"))
                        .with_related(EnumerationValue::new("A")),
                )
                .with_literal(EnumerationValue::new("B"))
                .with_literal(EnumerationValue::new("C")),
        );
        assert_eq!(identifiers(&declarations), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_empty_documentation_is_dropped() {
        let declarations = render(
            Enumeration::value_set("Docs")
                .with_literal(EnumerationValue::new("A").with_documentation(Documentation::default()))
                .with_literal(EnumerationValue::new("B").with_documentation(Documentation {
                    description: vec!["Bee".to_string()],
                    rationale: Vec::new(),
                })),
        );
        assert!(declarations[0].documentation.is_none());
        assert!(declarations[1].documentation.is_some());
    }

    #[test]
    fn test_domain_renders_through_binding() {
        let mut model = VocabularyModel::new();
        let vs = model.insert(Enumeration::value_set("V").with_literals(["a"]));
        let cd = model.insert(Enumeration::concept_domain("D").with_binding(vs));

        let rendered = LiteralRenderer::new().render(&model, cd, "V").unwrap();
        assert_eq!(rendered.source, vs);
        assert_eq!(rendered.declarations.len(), 1);
    }

    #[test]
    fn test_unbound_domain_is_an_invariant_violation() {
        let mut model = VocabularyModel::new();
        let cd = model.insert(Enumeration::concept_domain("D"));

        let err = LiteralRenderer::new().render(&model, cd, "D").unwrap_err();
        assert!(matches!(err, VocabGenError::InvariantViolation { .. }));
    }

    fn literal_strategy() -> impl Strategy<Value = EnumerationValue> {
        let leaf = ("[a-c]{1,2}", proptest::option::of("[a-c ]{0,3}"))
            .prop_map(|(code, label)| EnumerationValue {
                business_name: label,
                ..EnumerationValue::new(code)
            });
        leaf.prop_recursive(3, 24, 4, |inner| {
            (
                "[a-c]{1,2}",
                proptest::option::of("[a-c ]{0,3}"),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(code, label, related)| EnumerationValue {
                    business_name: label,
                    related_codes: related,
                    ..EnumerationValue::new(code)
                })
        })
    }

    proptest! {
        #[test]
        fn test_identifiers_and_codes_are_unique(literals in prop::collection::vec(literal_strategy(), 0..8)) {
            let mut enu = Enumeration::value_set("Generated");
            enu.literals = literals;
            let declarations = render(enu);

            let mut seen_identifiers = HashSet::new();
            let mut seen_codes = HashSet::new();
            for declaration in &declarations {
                prop_assert!(seen_identifiers.insert(declaration.identifier.clone()));
                prop_assert!(seen_codes.insert(declaration.code.clone()));
            }
        }
    }
}
