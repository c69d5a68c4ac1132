//! Rule compilation and evaluation. Pure, no I/O.

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use super::rules::{
    Check, CustomCheck, FieldRule, RuleSetError, Violation, ViolationCode, URL_PATTERN,
};

/// Resolves a dot-separated path against nested JSON objects.
///
/// A missing key, a non-object intermediate or a `null` leaf all count as absent.
pub fn resolve_path<'a>(candidate: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = candidate;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Scalar-to-text coercion shared by pattern, url and oneOf checks.
///
/// Strings pass through, numbers use their JSON text and booleans become
/// `"true"`/`"false"`. Arrays, objects and null have no textual form.
pub fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Clone)]
enum CompiledCheck {
    Pattern {
        regex: Regex,
        hint: Option<String>,
        code: ViolationCode,
    },
    OneOf(Vec<String>),
    ArrayOf(Box<CompiledCheck>),
    Custom(CustomCheck),
}

#[derive(Debug, Clone)]
struct CompiledRule {
    path: String,
    required: bool,
    checks: Vec<CompiledCheck>,
}

/// An immutable, structurally verified rule set with its patterns compiled.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Verifies the rule structure and compiles every pattern.
    ///
    /// Nothing is evaluated against data here; a malformed rule set fails before any
    /// candidate is looked at.
    pub fn compile(rules: Vec<FieldRule>) -> Result<Self, RuleSetError> {
        let compiled = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| compile_rule(index, rule))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules: compiled })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Field paths in rule order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.path.as_str())
    }

    /// Field paths of the rules marked required.
    pub fn required_paths(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|r| r.required)
            .map(|r| r.path.as_str())
    }

    /// Evaluates every rule and returns every violation, in rule order, then check
    /// order, then array index order.
    pub fn validate(&self, candidate: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();

        for rule in &self.rules {
            match resolve_path(candidate, &rule.path) {
                None if rule.required => violations.push(Violation::new(
                    &rule.path,
                    ViolationCode::MissingRequired,
                    format!("Missing required field: {}", rule.path),
                )),
                None => {}
                Some(value) => {
                    for check in &rule.checks {
                        evaluate_check(check, &rule.path, candidate, value, &mut violations);
                    }
                }
            }
        }

        debug!(
            rules = self.rules.len(),
            violations = violations.len(),
            "Evaluated rule set"
        );
        violations
    }

    pub fn is_valid(&self, candidate: &Value) -> bool {
        self.validate(candidate).is_empty()
    }
}

/// Compiles `rules` and validates `candidate` against them in one call.
///
/// `Err` means the rules are broken; `Ok(vec![])` means the data is valid.
pub fn validate(rules: Vec<FieldRule>, candidate: &Value) -> Result<Vec<Violation>, RuleSetError> {
    Ok(RuleSet::compile(rules)?.validate(candidate))
}

fn compile_rule(index: usize, rule: FieldRule) -> Result<CompiledRule, RuleSetError> {
    if rule.path.is_empty() {
        return Err(RuleSetError::EmptyFieldPath { index });
    }
    if rule.path.split('.').any(str::is_empty) {
        return Err(RuleSetError::EmptyPathSegment { path: rule.path });
    }

    let checks = rule
        .checks
        .into_iter()
        .map(|check| compile_check(&rule.path, check))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledRule {
        path: rule.path,
        required: rule.required,
        checks,
    })
}

fn compile_check(path: &str, check: Check) -> Result<CompiledCheck, RuleSetError> {
    match check {
        Check::Pattern { pattern, hint } => Ok(CompiledCheck::Pattern {
            regex: compile_regex(path, &pattern)?,
            hint,
            code: ViolationCode::PatternMismatch,
        }),
        Check::Url => Ok(CompiledCheck::Pattern {
            regex: compile_regex(path, URL_PATTERN)?,
            hint: None,
            code: ViolationCode::InvalidUrl,
        }),
        Check::OneOf(values) if values.is_empty() => Err(RuleSetError::EmptyAllowedSet {
            path: path.to_string(),
        }),
        Check::OneOf(values) => Ok(CompiledCheck::OneOf(values)),
        Check::ArrayOf(None) => Err(RuleSetError::MissingNestedCheck {
            path: path.to_string(),
        }),
        Check::ArrayOf(Some(nested)) => Ok(CompiledCheck::ArrayOf(Box::new(compile_check(
            path, *nested,
        )?))),
        Check::Custom(custom) => Ok(CompiledCheck::Custom(custom)),
    }
}

fn compile_regex(path: &str, pattern: &str) -> Result<Regex, RuleSetError> {
    Regex::new(pattern).map_err(|source| RuleSetError::InvalidPattern {
        path: path.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

fn evaluate_check(
    check: &CompiledCheck,
    path: &str,
    candidate: &Value,
    value: &Value,
    out: &mut Vec<Violation>,
) {
    match check {
        CompiledCheck::ArrayOf(nested) => {
            let Some(items) = value.as_array() else {
                out.push(Violation::new(
                    path,
                    ViolationCode::NestedFailure,
                    format!("Expected an array for {}, got {}", path, type_name(value)),
                ));
                return;
            };

            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, index);
                let mut inner = Vec::new();
                evaluate_check(nested, &item_path, candidate, item, &mut inner);
                if !inner.is_empty() {
                    let message = inner
                        .iter()
                        .map(|v| v.message.as_str())
                        .collect::<Vec<_>>()
                        .join("; ");
                    out.push(Violation::new(item_path, ViolationCode::NestedFailure, message));
                }
            }
        }
        _ => {
            if let Some(violation) = evaluate_scalar_check(check, path, candidate, value) {
                out.push(violation);
            }
        }
    }
}

fn evaluate_scalar_check(
    check: &CompiledCheck,
    path: &str,
    candidate: &Value,
    value: &Value,
) -> Option<Violation> {
    match check {
        CompiledCheck::Pattern { regex, hint, code } => {
            let Some(text) = coerce_to_string(value) else {
                return Some(Violation::new(
                    path,
                    *code,
                    format!("Expected a scalar for {}, got {}", path, type_name(value)),
                ));
            };
            if regex.is_match(&text) {
                return None;
            }
            let message = match (code, hint) {
                (ViolationCode::InvalidUrl, _) => format!("Invalid URL for {}: {}", path, text),
                (_, Some(hint)) => format!("Invalid {} format: {} ({})", path, text, hint),
                (_, None) => format!(
                    "Invalid {} format: {} (must match {})",
                    path,
                    text,
                    regex.as_str()
                ),
            };
            Some(Violation::new(path, *code, message))
        }
        CompiledCheck::OneOf(allowed) => {
            let text = coerce_to_string(value);
            if text.as_deref().is_some_and(|t| allowed.iter().any(|a| a == t)) {
                return None;
            }
            let shown = text.unwrap_or_else(|| type_name(value).to_string());
            Some(Violation::new(
                path,
                ViolationCode::NotInEnum,
                format!(
                    "Invalid {}: {} (expected one of: {})",
                    path,
                    shown,
                    allowed.join(", ")
                ),
            ))
        }
        CompiledCheck::Custom(custom) => {
            if custom.passes(candidate, value) {
                None
            } else {
                Some(Violation::new(
                    path,
                    ViolationCode::NestedFailure,
                    custom.message.clone(),
                ))
            }
        }
        CompiledCheck::ArrayOf(_) => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
