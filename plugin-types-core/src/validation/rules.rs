//! Declarative rule definitions and the violation records they produce.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// URL-shape expression used by [`Check::Url`].
pub const URL_PATTERN: &str = r"^https?://";

/// Predicate signature for [`Check::Custom`]: `(candidate, field_value) -> passed`.
pub type CustomPredicate = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// A pure predicate with the message reported when it fails.
#[derive(Clone)]
pub struct CustomCheck {
    pub message: String,
    predicate: CustomPredicate,
}

impl CustomCheck {
    pub fn new<F>(message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn passes(&self, candidate: &Value, value: &Value) -> bool {
        (self.predicate)(candidate, value)
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCheck")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// One constraint applied to a present field.
#[derive(Debug, Clone)]
pub enum Check {
    /// Coerced value must match the regular expression.
    Pattern {
        pattern: String,
        /// Human hint appended to the mismatch message, e.g. "must be semantic version".
        hint: Option<String>,
    },
    /// Coerced value must equal one of the literals.
    OneOf(Vec<String>),
    /// Coerced value must look like an http(s) URL.
    Url,
    /// Value must be an array whose elements each pass the nested check.
    /// `None` is rejected by [`RuleSet::compile`](super::RuleSet::compile).
    ArrayOf(Option<Box<Check>>),
    Custom(CustomCheck),
}

impl Check {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Check::Pattern {
            pattern: pattern.into(),
            hint: None,
        }
    }

    pub fn pattern_with_hint(pattern: impl Into<String>, hint: impl Into<String>) -> Self {
        Check::Pattern {
            pattern: pattern.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Check::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn array_of(nested: Check) -> Self {
        Check::ArrayOf(Some(Box::new(nested)))
    }

    pub fn custom<F>(message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        Check::Custom(CustomCheck::new(message, predicate))
    }
}

/// Constraints attached to one dot-separated field path.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub path: String,
    pub required: bool,
    pub checks: Vec<Check>,
}

impl FieldRule {
    pub fn required(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required: true,
            checks: Vec::new(),
        }
    }

    pub fn optional(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required: false,
            checks: Vec::new(),
        }
    }

    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        self.with_check(Check::pattern(pattern))
    }

    pub fn pattern_with_hint(self, pattern: impl Into<String>, hint: impl Into<String>) -> Self {
        self.with_check(Check::pattern_with_hint(pattern, hint))
    }

    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_check(Check::one_of(values))
    }

    pub fn url(self) -> Self {
        self.with_check(Check::Url)
    }

    pub fn array_of(self, nested: Check) -> Self {
        self.with_check(Check::array_of(nested))
    }

    pub fn custom<F>(self, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.with_check(Check::custom(message, predicate))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    MissingRequired,
    PatternMismatch,
    NotInEnum,
    #[serde(rename = "invalid_url")]
    InvalidUrl,
    NestedFailure,
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationCode::MissingRequired => write!(f, "missing_required"),
            ViolationCode::PatternMismatch => write!(f, "pattern_mismatch"),
            ViolationCode::NotInEnum => write!(f, "not_in_enum"),
            ViolationCode::InvalidUrl => write!(f, "invalid_url"),
            ViolationCode::NestedFailure => write!(f, "nested_failure"),
        }
    }
}

/// One constraint failure at a specific field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field_path: String,
    pub code: ViolationCode,
    pub message: String,
}

impl Violation {
    pub fn new(
        field_path: impl Into<String>,
        code: ViolationCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_path: field_path.into(),
            code,
            message: message.into(),
        }
    }

    /// Re-roots the violation under `prefix`, e.g. `id` becomes `plugins[2].id`.
    pub fn nested_under(mut self, prefix: &str) -> Self {
        self.field_path = format!("{}.{}", prefix, self.field_path);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field_path, self.code, self.message)
    }
}

/// A rule set that cannot be evaluated. Always a programming error, never a data error.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("rule #{index} has an empty field path")]
    EmptyFieldPath { index: usize },

    #[error("field path '{path}' contains an empty segment")]
    EmptyPathSegment { path: String },

    #[error("arrayOf check on '{path}' has no nested check")]
    MissingNestedCheck { path: String },

    #[error("oneOf check on '{path}' has no allowed values")]
    EmptyAllowedSet { path: String },

    #[error("pattern '{pattern}' on '{path}' does not compile: {source}")]
    InvalidPattern {
        path: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
