use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Why an enumeration is not turned into a source file.
///
/// These are expected outcomes of a generation run. The orchestrator skips the
/// entity and carries on; none of them aborts the run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum RejectReason {
    #[error("enumeration is builtin to the core library, will not render")]
    BuiltinExcluded,

    #[error("enumeration too large, it has {count} literals, maximum allowed is {max}")]
    TooLarge { count: usize, max: usize },

    #[error("concept domain is not bound to a value set")]
    Unbound,

    #[error("enumeration is not used by any rendered structure")]
    Unused,

    #[error("enumeration has already been rendered from the preferred realm at {}", path.display())]
    DuplicateRealm { path: PathBuf },

    #[error("enumeration has no renderable content")]
    NotEligible,

    #[error("partial enumerations are not rendered")]
    Partial,
}

#[derive(Error, Debug)]
pub enum VocabGenError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// An orchestration bug upstream, for example rendering a concept domain
    /// that eligibility should already have excluded.
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("Load error: {message}")]
    Load { message: String },

    #[error("Rejected: {0}")]
    Rejected(#[from] RejectReason),

    #[error("Template rendering error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Template compilation error: {0}")]
    TemplateCompile(#[from] Box<handlebars::TemplateError>),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VocabGenError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// The rejection carried by this error, if it is an expected rejection.
    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<handlebars::TemplateError> for VocabGenError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::TemplateCompile(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, VocabGenError>;
