//! Rule-based validation of untyped JSON documents.
//!
//! A [`RuleSet`] is compiled once from declarative [`FieldRule`]s and then checks any
//! number of candidates. Compilation is where broken rules surface ([`RuleSetError`]);
//! evaluation never fails and always reports the complete list of [`Violation`]s.
//!
//! Non-string scalars are coerced before `pattern`, `url` and `oneOf` checks: numbers
//! use their JSON text and booleans become `"true"`/`"false"`. See
//! [`coerce_to_string`].

mod evaluator;
mod rules;

use serde::{Deserialize, Serialize};

pub use evaluator::{coerce_to_string, resolve_path, validate, RuleSet};
pub use rules::{
    Check, CustomCheck, CustomPredicate, FieldRule, RuleSetError, Violation, ViolationCode,
    URL_PATTERN,
};

/// Violations found for one named document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub subject: String,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(subject: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            subject: subject.into(),
            violations,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count(&self, code: ViolationCode) -> usize {
        self.violations.iter().filter(|v| v.code == code).count()
    }
}
