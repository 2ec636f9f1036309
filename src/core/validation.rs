//! Table-driven input validation.
//!
//! Each calculator declares a [`Schema`]: a static list of [`FieldSpec`]s
//! plus optional cross-field rules. [`validate`] coerces raw JSON values,
//! checks every field, and only then evaluates cross-field rules.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub type RawInput = Map<String, Value>;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    fn admits(self, value: f64) -> bool {
        match self {
            Bound::Inclusive(min) => value >= min,
            Bound::Exclusive(min) => value > min,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldKind {
    Number { min: Bound, max: Option<f64> },
    Integer { min: u32, max: u32 },
    OneOf(&'static [u32]),
    Choice(&'static [&'static str]),
}

impl FieldKind {
    pub const fn positive() -> Self {
        FieldKind::Number {
            min: Bound::Exclusive(0.0),
            max: None,
        }
    }

    pub const fn non_negative() -> Self {
        FieldKind::Number {
            min: Bound::Inclusive(0.0),
            max: None,
        }
    }

    pub const fn at_least(min: f64) -> Self {
        FieldKind::Number {
            min: Bound::Inclusive(min),
            max: None,
        }
    }

    pub const fn percent_up_to(max: f64) -> Self {
        FieldKind::Number {
            min: Bound::Inclusive(0.0),
            max: Some(max),
        }
    }

    /// Human-readable constraint, phrased to follow the field name.
    pub fn constraint(&self) -> String {
        match *self {
            FieldKind::Number { min, max: Some(max) } => match min {
                Bound::Inclusive(min) => format!("must be between {min} and {max}"),
                Bound::Exclusive(min) => format!("must be greater than {min} and at most {max}"),
            },
            FieldKind::Number { min, max: None } => match min {
                Bound::Inclusive(min) => format!("must be at least {min}"),
                Bound::Exclusive(min) => format!("must be greater than {min}"),
            },
            FieldKind::Integer { min, max } => {
                format!("must be a whole number between {min} and {max}")
            }
            FieldKind::OneOf(options) => {
                let listed: Vec<String> = options.iter().map(u32::to_string).collect();
                format!("must be one of {}", listed.join(", "))
            }
            FieldKind::Choice(options) => format!("must be one of {}", options.join(", ")),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Choice used when the field is missing or empty.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            kind,
            default: None,
        }
    }

    /// An optional choice field falling back to `default`.
    pub const fn optional(
        name: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        FieldSpec {
            name,
            kind: FieldKind::Choice(options),
            default: Some(default),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CrossFieldRule {
    /// `field` must be strictly greater than `other`; reported on `field`.
    GreaterThan {
        field: &'static str,
        other: &'static str,
    },
}

#[derive(Copy, Clone, Debug)]
pub struct Schema {
    pub fields: &'static [FieldSpec],
    pub cross_field: &'static [CrossFieldRule],
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Integer(u32),
    Choice(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", summary(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn summary(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors(vec![error])
    }
}

/// Field values that passed every rule of a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedInput {
    values: BTreeMap<&'static str, FieldValue>,
}

impl ValidatedInput {
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).copied()
    }

    pub fn number(&self, name: &str) -> Result<f64, ValidationError> {
        match self.get(name) {
            Some(FieldValue::Number(v)) => Ok(v),
            Some(FieldValue::Integer(v)) => Ok(v as f64),
            _ => Err(ValidationError::new(name, "is required")),
        }
    }

    pub fn integer(&self, name: &str) -> Result<u32, ValidationError> {
        match self.get(name) {
            Some(FieldValue::Integer(v)) => Ok(v),
            _ => Err(ValidationError::new(name, "is required")),
        }
    }

    pub fn choice(&self, name: &str) -> Result<&'static str, ValidationError> {
        match self.get(name) {
            Some(FieldValue::Choice(v)) => Ok(v),
            _ => Err(ValidationError::new(name, "is required")),
        }
    }
}

pub fn validate(raw: &RawInput, schema: &Schema) -> Result<ValidatedInput, ValidationErrors> {
    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for spec in schema.fields {
        match check_field(spec, raw.get(spec.name)) {
            Ok(value) => {
                values.insert(spec.name, value);
            }
            Err(message) => errors.push(ValidationError::new(spec.name, message)),
        }
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    for rule in schema.cross_field {
        if let Err(error) = check_cross_field(rule, &values) {
            errors.push(error);
        }
    }

    if errors.is_empty() {
        Ok(ValidatedInput { values })
    } else {
        Err(ValidationErrors(errors))
    }
}

fn check_field(spec: &FieldSpec, raw: Option<&Value>) -> Result<FieldValue, String> {
    let raw = match raw {
        None | Some(Value::Null) => return default_for(spec),
        Some(Value::String(s)) if s.trim().is_empty() => return default_for(spec),
        Some(value) => value,
    };

    match spec.kind {
        FieldKind::Number { min, max } => {
            let value = coerce_number(raw)?;
            let in_range = min.admits(value) && max.is_none_or(|max| value <= max);
            if in_range {
                Ok(FieldValue::Number(value))
            } else {
                Err(spec.kind.constraint())
            }
        }
        FieldKind::Integer { min, max } => {
            let value = coerce_number(raw)?;
            if value.fract() != 0.0 || value < min as f64 || value > max as f64 {
                return Err(spec.kind.constraint());
            }
            Ok(FieldValue::Integer(value as u32))
        }
        FieldKind::OneOf(options) => {
            let value = coerce_number(raw)?;
            options
                .iter()
                .find(|&&option| option as f64 == value)
                .map(|&option| FieldValue::Integer(option))
                .ok_or_else(|| spec.kind.constraint())
        }
        FieldKind::Choice(options) => {
            let Value::String(text) = raw else {
                return Err(spec.kind.constraint());
            };
            let text = text.trim();
            options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(text))
                .map(|&option| FieldValue::Choice(option))
                .ok_or_else(|| spec.kind.constraint())
        }
    }
}

fn default_for(spec: &FieldSpec) -> Result<FieldValue, String> {
    spec.default
        .map(FieldValue::Choice)
        .ok_or_else(|| "is required".to_string())
}

fn coerce_number(raw: &Value) -> Result<f64, String> {
    let value = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err("must be a number".to_string()),
    }
}

fn check_cross_field(
    rule: &CrossFieldRule,
    values: &BTreeMap<&'static str, FieldValue>,
) -> Result<(), ValidationError> {
    match *rule {
        CrossFieldRule::GreaterThan { field, other } => {
            let lhs = values.get(field).copied().and_then(as_f64);
            let rhs = values.get(other).copied().and_then(as_f64);
            match (lhs, rhs) {
                (Some(lhs), Some(rhs)) if lhs > rhs => Ok(()),
                _ => Err(ValidationError::new(
                    field,
                    format!("must be greater than {other}"),
                )),
            }
        }
    }
}

fn as_f64(value: FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(v) => Some(v),
        FieldValue::Integer(v) => Some(v as f64),
        FieldValue::Choice(_) => None,
    }
}
