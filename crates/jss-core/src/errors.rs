//! Structured error types shared across the harness crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`JssError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (labels, parameter values, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the harness.
///
/// The first three families form the trial failure taxonomy: anything a
/// model builder or sampler backend can raise is mapped onto one of them so
/// that abandoned trials stay classifiable in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail", rename_all = "kebab-case")]
pub enum JssError {
    /// The sampler backend could not be reached or is not configured.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(ErrorInfo),
    /// The backend failed to map the model onto its hardware graph.
    #[error("embedding error: {0}")]
    Embedding(ErrorInfo),
    /// The model could not be built or was rejected by the backend.
    #[error("malformed model: {0}")]
    MalformedModel(ErrorInfo),
    /// A sample did not match the job definitions it was decoded against.
    #[error("decode error: {0}")]
    Decode(ErrorInfo),
    /// Invalid instance or plan configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " {{{key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str("}")?;
        }
        match &self.hint {
            Some(hint) => write!(f, " (hint: {hint})"),
            None => Ok(()),
        }
    }
}

impl JssError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            JssError::BackendUnavailable(info)
            | JssError::Embedding(info)
            | JssError::MalformedModel(info)
            | JssError::Decode(info)
            | JssError::Config(info)
            | JssError::Serde(info) => info,
        }
    }

    /// Adds a context entry whatever the family.
    pub fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let attach = |info: ErrorInfo| info.with_context(key, value);
        match self {
            JssError::BackendUnavailable(info) => JssError::BackendUnavailable(attach(info)),
            JssError::Embedding(info) => JssError::Embedding(attach(info)),
            JssError::MalformedModel(info) => JssError::MalformedModel(attach(info)),
            JssError::Decode(info) => JssError::Decode(attach(info)),
            JssError::Config(info) => JssError::Config(attach(info)),
            JssError::Serde(info) => JssError::Serde(attach(info)),
        }
    }

    /// Stable kebab-case name of the error family, matching the serialized tag.
    pub fn family(&self) -> &'static str {
        match self {
            JssError::BackendUnavailable(_) => "backend-unavailable",
            JssError::Embedding(_) => "embedding",
            JssError::MalformedModel(_) => "malformed-model",
            JssError::Decode(_) => "decode",
            JssError::Config(_) => "config",
            JssError::Serde(_) => "serde",
        }
    }
}
