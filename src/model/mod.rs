//! In-memory vocabulary model.
//!
//! Enumerations live in an arena and refer to each other (memberships and
//! context bindings) through [`EnumId`] handles. The model is treated as
//! authoritative input; the vocabulary core only ever writes two things back
//! into it: a concept domain's collapsed binding list and sticky `RenderAs`
//! annotations.

pub mod document;
pub mod enumeration;

pub use document::{EnumerationDocument, LoadedModel, ModelDocument};
pub use enumeration::{
    Annotation, Documentation, EnumId, EnumIdentity, Enumeration, EnumerationKind,
    EnumerationValue,
};

use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct VocabularyModel {
    entries: Vec<Enumeration>,
    index: IndexMap<EnumIdentity, EnumId>,
}

impl VocabularyModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enumeration and return its handle.
    ///
    /// Entities sharing an identity (the same vocabulary published by several
    /// realms) are all kept; lookups by identity return the first one.
    pub fn insert(&mut self, enumeration: Enumeration) -> EnumId {
        let id = EnumId(self.entries.len());
        self.index.entry(enumeration.identity()).or_insert(id);
        self.entries.push(enumeration);
        id
    }

    /// Insert an enumeration created during generation and fire its
    /// post-construction hook.
    pub fn construct(&mut self, enumeration: Enumeration) -> EnumId {
        let id = self.insert(enumeration);
        let constructed = &self.entries[id.0];
        tracing::debug!(
            "Constructed {} with {} literals",
            constructed.identity(),
            constructed.literal_count()
        );
        id
    }

    pub fn get(&self, id: EnumId) -> &Enumeration {
        &self.entries[id.0]
    }

    pub fn get_mut(&mut self, id: EnumId) -> &mut Enumeration {
        &mut self.entries[id.0]
    }

    pub fn find(&self, identity: &EnumIdentity) -> Option<EnumId> {
        self.index.get(identity).copied()
    }

    pub fn find_by_name(&self, name: &str, kind: EnumerationKind) -> Option<EnumId> {
        self.find(&EnumIdentity::new(name, kind))
    }

    /// Handle of the entry at `index` in insertion order.
    pub fn id_at(&self, index: usize) -> Option<EnumId> {
        (index < self.entries.len()).then_some(EnumId(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EnumId, &Enumeration)> {
        self.entries.iter().enumerate().map(|(i, e)| (EnumId(i), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn literal_count(&self, id: EnumId) -> usize {
        self.get(id).literal_count()
    }

    pub fn enumerated_literals(&self, id: EnumId) -> Vec<&EnumerationValue> {
        self.get(id).enumerated_literals()
    }

    pub fn render_as(&self, id: EnumId) -> Option<&str> {
        self.get(id).render_as()
    }

    /// Attach a sticky rename. This is the one sanctioned write path for
    /// render names; an existing rename is never replaced.
    pub fn attach_render_as(&mut self, id: EnumId, render_name: impl Into<String>) -> &str {
        let entry = &mut self.entries[id.0];
        if entry.render_as().is_none() {
            entry.annotations.push(Annotation::RenderAs {
                render_name: render_name.into(),
            });
        }
        entry.render_as().unwrap_or(entry.name.as_str())
    }

    /// Collapse a concept domain's bindings to a single value set.
    pub fn replace_binding(&mut self, domain: EnumId, value_set: EnumId) {
        self.entries[domain.0].context_binding = Some(vec![value_set]);
    }

    /// The name an entity renders as: its sticky rename or its plain name.
    pub fn render_name(&self, id: EnumId) -> &str {
        let entry = self.get(id);
        entry.render_as().unwrap_or(entry.name.as_str())
    }
}
