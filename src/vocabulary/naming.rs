//! Eligibility and render-name resolution.

use regex::Regex;
use std::sync::LazyLock;

use super::binding::{BindingResolver, EligibilityCheck};
use super::usage::UsageTracker;
use crate::core::{BuiltinVocabulary, VocabGenConfig};
use crate::error::RejectReason;
use crate::model::{EnumId, EnumerationKind, VocabularyModel};

static NON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("identifier pattern is valid"));

static WORD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator pattern is valid"));

const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Join the alphanumeric words of `input`, upper-casing the first letter of
/// each. Returns `None` when nothing identifier-like is left.
pub fn pascal_case(input: &str) -> Option<String> {
    let result: String = WORD_SEPARATOR
        .split(input)
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect();

    (!result.is_empty()).then_some(result)
}

/// Make `input` usable as a target-language identifier.
pub fn make_friendly(input: &str) -> Option<String> {
    let cleaned = NON_IDENTIFIER.replace_all(input, "");
    if cleaned.is_empty() {
        return None;
    }

    let starts_with_digit = cleaned.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || RESERVED_WORDS.contains(&cleaned.as_ref()) {
        Some(format!("_{cleaned}"))
    } else {
        Some(cleaned.into_owned())
    }
}

/// Runs the eligibility decision sequence for an enumeration.
///
/// The first matching rule wins:
/// builtin override, binding resolution, partial suppression, size gate,
/// sticky rename, already used, content gate, container name collision.
pub struct NameResolver<'a> {
    config: &'a VocabGenConfig,
    builtins: &'a dyn BuiltinVocabulary,
}

impl<'a> NameResolver<'a> {
    pub fn new(config: &'a VocabGenConfig, builtins: &'a dyn BuiltinVocabulary) -> Self {
        Self { config, builtins }
    }

    pub fn config(&self) -> &VocabGenConfig {
        self.config
    }

    pub fn builtins(&self) -> &dyn BuiltinVocabulary {
        self.builtins
    }

    /// Binding resolver whose source eligibility checks go through `self`.
    pub fn bindings(&self) -> BindingResolver<'_> {
        BindingResolver::new(self)
    }

    /// Resolve the name `id` renders as, or the reason it is not rendered.
    ///
    /// May collapse a concept domain's bindings and may attach a sticky
    /// `RenderAs` annotation; both writes are idempotent, so repeated calls on
    /// the same entity give the same answer.
    pub fn resolve(
        &self,
        model: &mut VocabularyModel,
        usage: &UsageTracker,
        id: EnumId,
    ) -> Result<String, RejectReason> {
        if let Some(builtin) = self.builtins.lookup(&model.get(id).name) {
            return Ok(builtin.to_string());
        }

        let id = self.bindings().resolve(model, usage, id)?;
        let enu = model.get(id);

        if enu.is_partial && !self.config.render_partials {
            return Err(RejectReason::Partial);
        }

        let count = enu.literal_count();
        if count > self.config.max_literals {
            return Err(RejectReason::TooLarge {
                count,
                max: self.config.max_literals,
            });
        }

        if let Some(render_name) = enu.render_as() {
            return Ok(render_name.to_string());
        }

        if usage.is_used(&enu.identity()) {
            return Ok(enu.name.clone());
        }

        let has_visible_literal = enu
            .enumerated_literals()
            .iter()
            .any(|literal| !literal.is_suppressed());
        let kind_allowed =
            self.config.generate_all_vocab || enu.kind == EnumerationKind::ValueSet;
        if count == 0 || !has_visible_literal || !kind_allowed {
            return Err(RejectReason::NotEligible);
        }

        let collides = enu.member_of.iter().any(|&container| {
            let other = model.get(container);
            other.name == enu.name
                && other.kind != enu.kind
                && other.kind != EnumerationKind::ConceptDomain
        });

        if collides && usage.used_with_other_kind(&enu.name, enu.kind) {
            let renamed = format!("{}1", enu.name);
            tracing::debug!(
                "{} collides with a used enumeration of the same name, rendering as '{}'",
                enu.identity(),
                renamed
            );
            return Ok(model.attach_render_as(id, renamed).to_string());
        }

        Ok(enu.name.clone())
    }
}

impl EligibilityCheck for NameResolver<'_> {
    fn check(
        &self,
        model: &mut VocabularyModel,
        usage: &UsageTracker,
        id: EnumId,
    ) -> Result<String, RejectReason> {
        self.resolve(model, usage, id)
    }
}
