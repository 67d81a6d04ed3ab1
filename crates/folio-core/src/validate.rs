//! Contact-form validation.
//!
//! Untrusted request bodies arrive as arbitrary JSON. [`validate`] runs a fixed
//! rule table over them and either produces a [`NewContactMessage`] or the
//! full list of field [`Violation`]s. Every field is checked independently;
//! nothing short-circuits on the first failure.

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::message::NewContactMessage;

// ─── Violations ──────────────────────────────────────────────────────────────

/// Machine-readable category of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
  /// The field is absent or `null`.
  Required,
  /// The field is present but not a string.
  InvalidType,
  /// The string is shorter than the field minimum.
  TooSmall,
  /// The string is not an address of the form `local@host.tld`.
  InvalidEmail,
}

/// A single field-level failure, serialised into the `details` array of a 400
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
  pub field:   String,
  pub code:    ViolationCode,
  /// Human-readable reason, suitable for showing next to the form field.
  pub message: String,
}

impl Violation {
  fn new(field: &str, code: ViolationCode, message: impl Into<String>) -> Self {
    Self { field: field.to_owned(), code, message: message.into() }
  }
}

/// One or more violations, in rule-table order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field violation(s)", .violations.len())]
pub struct ValidationError {
  pub violations: Vec<Violation>,
}

impl ValidationError {
  /// The field names that failed, in order.
  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.violations.iter().map(|v| v.field.as_str())
  }
}

// ─── Rule table ──────────────────────────────────────────────────────────────

/// A predicate over a string field value.
#[derive(Debug, Clone, Copy)]
enum Check {
  MinChars(usize),
  Email,
}

impl Check {
  fn passes(self, value: &str) -> bool {
    match self {
      Check::MinChars(min) => value.chars().count() >= min,
      Check::Email => is_email(value),
    }
  }

  fn code(self) -> ViolationCode {
    match self {
      Check::MinChars(_) => ViolationCode::TooSmall,
      Check::Email => ViolationCode::InvalidEmail,
    }
  }
}

/// `field → [(check, reason)]`. A string value must pass every check.
struct FieldRule {
  field:  &'static str,
  checks: &'static [(Check, &'static str)],
}

const CONTACT_RULES: [FieldRule; 3] = [
  FieldRule {
    field:  "name",
    checks: &[(Check::MinChars(2), "Name must be at least 2 characters")],
  },
  FieldRule {
    field:  "email",
    checks: &[(Check::Email, "Please enter a valid email")],
  },
  FieldRule {
    field:  "message",
    checks: &[(Check::MinChars(10), "Message must be at least 10 characters")],
  },
];

impl FieldRule {
  /// Apply this rule to the field's raw value, appending any violations.
  /// Returns the accepted string when there were none.
  fn apply(&self, raw: Option<&Value>, out: &mut Vec<Violation>) -> Option<String> {
    let value = match raw {
      None | Some(Value::Null) => {
        out.push(Violation::new(self.field, ViolationCode::Required, "Required"));
        return None;
      }
      Some(Value::String(s)) => s,
      Some(other) => {
        out.push(Violation::new(
          self.field,
          ViolationCode::InvalidType,
          format!("Expected string, received {}", json_type_name(other)),
        ));
        return None;
      }
    };

    let before = out.len();
    for (check, reason) in self.checks {
      if !check.passes(value) {
        out.push(Violation::new(self.field, check.code(), *reason));
      }
    }
    (out.len() == before).then(|| value.clone())
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Validate an untyped contact-form payload.
///
/// Anything other than a JSON object is treated as an empty object, so each
/// field reports `required`. Unknown keys are ignored and do not survive into
/// the returned record.
pub fn validate(input: &Value) -> Result<NewContactMessage, ValidationError> {
  let object = input.as_object();
  let mut violations = Vec::new();

  let [name, email, message] = CONTACT_RULES
    .each_ref()
    .map(|rule| rule.apply(object.and_then(|o| o.get(rule.field)), &mut violations));

  match (name, email, message) {
    (Some(name), Some(email), Some(message)) if violations.is_empty() => {
      Ok(NewContactMessage { name, email, message })
    }
    _ => Err(ValidationError { violations }),
  }
}

/// `local@domain` with no whitespace anywhere.
///
/// On top of `email_address` syntax: no quoted local part, no IP-literal
/// domain, and a dotted host name ending in an alphabetic label of at least
/// two letters.
fn is_email(value: &str) -> bool {
  if value.chars().any(char::is_whitespace) || !EmailAddress::is_valid(value) {
    return false;
  }
  let Some((local, domain)) = value.rsplit_once('@') else {
    return false;
  };
  if local.is_empty() || local.contains('"') || domain.starts_with('[') {
    return false;
  }
  let labels: Vec<&str> = domain.split('.').collect();
  let tld = labels.last().copied().unwrap_or_default();
  labels.len() >= 2
    && labels.iter().all(|label| !label.is_empty())
    && tld.len() >= 2
    && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
