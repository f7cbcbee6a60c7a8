use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of coded-value entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnumerationKind {
    ValueSet,
    ConceptDomain,
    CodeSystem,
}

impl EnumerationKind {
    /// Upper-case form used by the `StructureType` annotation.
    pub fn structure_type(&self) -> &'static str {
        match self {
            EnumerationKind::ValueSet => "VALUESET",
            EnumerationKind::ConceptDomain => "CONCEPTDOMAIN",
            EnumerationKind::CodeSystem => "CODESYSTEM",
        }
    }
}

impl fmt::Display for EnumerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumerationKind::ValueSet => write!(f, "ValueSet"),
            EnumerationKind::ConceptDomain => write!(f, "ConceptDomain"),
            EnumerationKind::CodeSystem => write!(f, "CodeSystem"),
        }
    }
}

/// Identity of an enumeration for usage tracking and collision checks.
///
/// Two entities of different kinds may share a name without being the same
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumIdentity {
    pub name: String,
    pub kind: EnumerationKind,
}

impl EnumIdentity {
    pub fn new(name: impl Into<String>, kind: EnumerationKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for EnumIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Handle of an enumeration inside a [`VocabularyModel`](super::VocabularyModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnumId(pub(crate) usize);

impl EnumId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Annotation {
    /// Sticky rename: once attached, this is the name the entity renders as.
    RenderAs {
        #[serde(rename = "renderName")]
        render_name: String,
    },
    /// Hide the annotated literal from generated output.
    SuppressBrowse,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub rationale: Vec<String>,
}

impl Documentation {
    pub fn is_empty(&self) -> bool {
        self.description.iter().all(|l| l.trim().is_empty())
            && self.rationale.iter().all(|l| l.trim().is_empty())
    }
}

/// One coded value, possibly carrying nested related codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationValue {
    /// The code.
    pub name: String,
    /// Display label.
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub code_system: Option<String>,
    #[serde(default)]
    pub documentation: Option<Documentation>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub related_codes: Vec<EnumerationValue>,
}

impl EnumerationValue {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            name: code.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.business_name = Some(label.into());
        self
    }

    pub fn with_code_system(mut self, oid: impl Into<String>) -> Self {
        self.code_system = Some(oid.into());
        self
    }

    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn with_related(mut self, related: EnumerationValue) -> Self {
        self.related_codes.push(related);
        self
    }

    pub fn suppressed(mut self) -> Self {
        self.annotations.push(Annotation::SuppressBrowse);
        self
    }

    pub fn is_suppressed(&self) -> bool {
        self.annotations
            .iter()
            .any(|a| matches!(a, Annotation::SuppressBrowse))
    }

    /// Number of literals in this subtree, this one included.
    pub fn tree_size(&self) -> usize {
        1 + self
            .related_codes
            .iter()
            .map(EnumerationValue::tree_size)
            .sum::<usize>()
    }
}

/// A value set, concept domain or code system.
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    pub name: String,
    pub business_name: Option<String>,
    pub id: Option<String>,
    pub owner_realm: String,
    pub is_partial: bool,
    pub kind: EnumerationKind,
    pub annotations: Vec<Annotation>,
    /// Containers this enumeration is a member of.
    pub member_of: Vec<EnumId>,
    pub literals: Vec<EnumerationValue>,
    pub content_oid: Option<String>,
    pub documentation: Documentation,
    /// Bound value sets; only meaningful for concept domains.
    pub context_binding: Option<Vec<EnumId>>,
}

impl Enumeration {
    pub fn new(name: impl Into<String>, kind: EnumerationKind) -> Self {
        Self {
            name: name.into(),
            business_name: None,
            id: None,
            owner_realm: String::new(),
            is_partial: false,
            kind,
            annotations: Vec::new(),
            member_of: Vec::new(),
            literals: Vec::new(),
            content_oid: None,
            documentation: Documentation::default(),
            context_binding: None,
        }
    }

    pub fn value_set(name: impl Into<String>) -> Self {
        Self::new(name, EnumerationKind::ValueSet)
    }

    pub fn concept_domain(name: impl Into<String>) -> Self {
        Self::new(name, EnumerationKind::ConceptDomain)
    }

    pub fn code_system(name: impl Into<String>) -> Self {
        Self::new(name, EnumerationKind::CodeSystem)
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.owner_realm = realm.into();
        self
    }

    pub fn with_content_oid(mut self, oid: impl Into<String>) -> Self {
        self.content_oid = Some(oid.into());
        self
    }

    pub fn with_literal(mut self, literal: EnumerationValue) -> Self {
        self.literals.push(literal);
        self
    }

    pub fn with_literals<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.literals
            .extend(codes.into_iter().map(EnumerationValue::new));
        self
    }

    pub fn with_member_of(mut self, container: EnumId) -> Self {
        self.member_of.push(container);
        self
    }

    pub fn with_binding(mut self, value_set: EnumId) -> Self {
        self.context_binding
            .get_or_insert_with(Vec::new)
            .push(value_set);
        self
    }

    pub fn partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    pub fn identity(&self) -> EnumIdentity {
        EnumIdentity::new(self.name.clone(), self.kind)
    }

    pub fn is_concept_domain(&self) -> bool {
        self.kind == EnumerationKind::ConceptDomain
    }

    /// The sticky render name, if one has been attached.
    pub fn render_as(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::RenderAs { render_name } => Some(render_name.as_str()),
            _ => None,
        })
    }

    /// Literal count across the whole tree, related codes included.
    pub fn literal_count(&self) -> usize {
        self.literals.iter().map(EnumerationValue::tree_size).sum()
    }

    /// All literals of the tree in pre-order.
    pub fn enumerated_literals(&self) -> Vec<&EnumerationValue> {
        fn collect<'a>(values: &'a [EnumerationValue], out: &mut Vec<&'a EnumerationValue>) {
            for value in values {
                out.push(value);
                collect(&value.related_codes, out);
            }
        }

        let mut out = Vec::with_capacity(self.literals.len());
        collect(&self.literals, &mut out);
        out
    }

    pub fn bindings(&self) -> &[EnumId] {
        self.context_binding.as_deref().unwrap_or(&[])
    }
}
