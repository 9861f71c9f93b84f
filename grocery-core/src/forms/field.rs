//! Leaf form fields and their validators.

use thiserror::Error;

/// Why a field value was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("is required")]
    Required,

    #[error("'{0}' is not a whole number")]
    NotAnInteger(String),

    #[error("must be at least {min} (got {actual})")]
    BelowMinimum { min: i64, actual: i64 },
}

/// A constraint on a field's raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validator {
    /// Value must not be blank
    Required,
    /// Value must parse as an integer
    Integer,
    /// Value must parse as an integer no smaller than the bound
    Min(i64),
}

impl Validator {
    /// Checks a raw value. Blank values only fail `Required`.
    pub fn check(&self, raw: &str) -> Result<(), ValidationError> {
        let raw = raw.trim();
        match self {
            Validator::Required if raw.is_empty() => Err(ValidationError::Required),
            Validator::Required => Ok(()),
            _ if raw.is_empty() => Ok(()),
            Validator::Integer => parse_int(raw).map(|_| ()),
            Validator::Min(min) => {
                let actual = parse_int(raw)?;
                if actual < *min {
                    Err(ValidationError::BelowMinimum { min: *min, actual })
                } else {
                    Ok(())
                }
            }
        }
    }
}

fn parse_int(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::NotAnInteger(raw.trim().to_string()))
}

/// A single input holding the raw text the user entered.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    value: String,
    default: String,
    validators: Vec<Validator>,
    touched: bool,
    dirty: bool,
}

impl FormField {
    pub fn new(default: impl Into<String>, validators: Vec<Validator>) -> Self {
        let default = default.into();
        Self {
            value: default.clone(),
            default,
            validators,
            touched: false,
            dirty: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets the value as a user edit, marking the field dirty.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    /// Restores the default value and clears touched/dirty.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
        self.mark_pristine();
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.validators
            .iter()
            .filter_map(|v| v.check(&self.value).err())
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validators.iter().all(|v| v.check(&self.value).is_ok())
    }

    /// Whether an inline error should be shown: invalid and touched or edited.
    pub fn shows_error(&self) -> bool {
        !self.is_valid() && (self.touched || self.dirty)
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_pristine(&mut self) {
        self.touched = false;
        self.dirty = false;
    }

    /// Value as an integer, if it parses.
    pub fn as_int(&self) -> Result<i64, ValidationError> {
        parse_int(&self.value)
    }

    /// Value as a boolean. Anything but a recognised "true" spelling is false.
    pub fn as_bool(&self) -> bool {
        matches!(
            self.value.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "on"
        )
    }
}
