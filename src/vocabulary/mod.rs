//! Vocabulary core: binding resolution, usage tracking, naming, literal
//! rendering and emission guards.
//!
//! A generation run drives these in order: mark every referenced entity with
//! [`UsageTracker::mark_used`], ask [`NameResolver::resolve`] for a render
//! name, render the literals with [`LiteralRenderer`], then obtain the
//! destination from [`FileEmitter::destination`].

pub mod binding;
pub mod emitter;
pub mod literals;
pub mod naming;
pub mod usage;

pub use binding::{BindingResolver, EligibilityCheck};
pub use emitter::{FileEmitter, VOCABULARY_DIR};
pub use literals::{Declaration, LiteralRenderer, RenderedEnumeration, UNKNOWN_IDENTIFIER};
pub use naming::{NameResolver, make_friendly, pascal_case};
pub use usage::UsageTracker;
