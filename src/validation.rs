use std::fmt;

use thiserror::Error;

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 63;
pub const SUBJECT_MAX_LEN: usize = 255;
pub const TEXT_MIN_LEN: usize = 1;
pub const TEXT_MAX_LEN: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Subject,
    Text,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Subject => "subject",
            Field::Text => "text",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    IncorrectFormat,
    CannotBeEmpty,
    TooShort,
    TooLong,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reason::IncorrectFormat => "incorrect format",
            Reason::CannotBeEmpty => "cannot be empty",
            Reason::TooShort => "too short",
            Reason::TooLong => "too long",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

impl ValidationError {
    pub const fn new(field: Field, reason: Reason) -> Self {
        Self { field, reason }
    }
}

fn length(value: &str) -> usize {
    value.chars().count()
}

/// A missing or empty name is `incorrect format`, not `too short`.
pub fn validate_name(name: Option<&str>) -> Result<&str, ValidationError> {
    let name = name
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::new(Field::Name, Reason::IncorrectFormat))?;

    match length(name) {
        len if len < NAME_MIN_LEN => Err(ValidationError::new(Field::Name, Reason::TooShort)),
        len if len > NAME_MAX_LEN => Err(ValidationError::new(Field::Name, Reason::TooLong)),
        _ => Ok(name),
    }
}

/// Empty subjects collapse to `None`.
pub fn validate_subject(subject: Option<String>) -> Result<Option<String>, ValidationError> {
    match subject.filter(|subject| !subject.is_empty()) {
        Some(subject) if length(&subject) > SUBJECT_MAX_LEN => {
            Err(ValidationError::new(Field::Subject, Reason::TooLong))
        }
        subject => Ok(subject),
    }
}

pub fn validate_text(text: Option<String>) -> Result<String, ValidationError> {
    let text = text
        .filter(|text| !text.is_empty())
        .ok_or(ValidationError::new(Field::Text, Reason::CannotBeEmpty))?;

    match length(&text) {
        len if len < TEXT_MIN_LEN => Err(ValidationError::new(Field::Text, Reason::TooShort)),
        len if len > TEXT_MAX_LEN => Err(ValidationError::new(Field::Text, Reason::TooLong)),
        _ => Ok(text),
    }
}
