use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported Swagger version: {0}")]
    UnsupportedVersion(String),
}

/// What went wrong while translating Swagger documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationErrorKind {
    /// A document could not be located, or the listing and the declarations disagree.
    File,
    /// The documents do not have the expected shape.
    Compliance,
}

impl TranslationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationErrorKind::File => "file",
            TranslationErrorKind::Compliance => "compliance",
        }
    }
}

impl fmt::Display for TranslationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single failure surfaced by the import side of the translator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TranslationError {
    pub kind: TranslationErrorKind,
    pub message: String,
}

impl TranslationError {
    pub const COMPLIANCE_MESSAGE: &'static str =
        "Impossible to read your API definition, check your Swagger specs compliance";

    pub fn file(message: impl Into<String>) -> Self {
        Self {
            kind: TranslationErrorKind::File,
            message: message.into(),
        }
    }

    pub fn compliance() -> Self {
        Self {
            kind: TranslationErrorKind::Compliance,
            message: Self::COMPLIANCE_MESSAGE.to_string(),
        }
    }
}

/// Failures raised while building a definition from Swagger documents.
///
/// These never cross the crate boundary: the importer logs them and reports
/// [`TranslationError::compliance`] instead.
#[derive(Debug, Error)]
pub(crate) enum BuildError {
    #[error("resource listing has no entry for section path {0}")]
    MissingListingEntry(String),

    #[error("{0} is declared as an array but has no items")]
    MissingItems(String),

    #[error("{0} declares neither a type nor a reference")]
    MissingType(String),

    #[error("model {parent} lists unknown subtype {child}")]
    UnknownSubtype { parent: String, child: String },

    #[error("API declaration for section {0} has no base path")]
    MissingBasePath(String),
}
