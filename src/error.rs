//! Error type for the fallible navigation operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
    /// A navigation link points at an id that is not on the page.
    #[error("no element with id `{id}` for link `{href}`")]
    MissingTarget { href: String, id: String },

    /// A navigation link whose href is not an in-page fragment.
    #[error("link `{0}` is not an in-page fragment")]
    NotAFragment(String),

    /// No navigation entry at the given index.
    #[error("no navigation entry at index {0}")]
    NoSuchEntry(usize),

    /// Invalid or unparsable configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A DOM call failed or a required node was missing.
    #[error("dom: {0}")]
    Dom(String),
}

impl From<serde_json::Error> for NavError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl NavError {
    /// Stable machine-readable code, exposed to JavaScript as `error.code`.
    pub fn code(&self) -> &'static str {
        match self {
            NavError::MissingTarget { .. } => "MISSING_TARGET",
            NavError::NotAFragment(_) => "NOT_A_FRAGMENT",
            NavError::NoSuchEntry(_) => "NO_SUCH_ENTRY",
            NavError::Config(_) => "CONFIG_ERROR",
            NavError::Dom(_) => "DOM_ERROR",
        }
    }
}
