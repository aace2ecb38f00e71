use std::str::FromStr;

use fieldkit_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Canonical identifiers for the supported input controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Email address input.
    Email,
    /// Numeric input.
    Number,
    /// Multi-line text input.
    Textarea,
    /// Single-choice dropdown.
    Select,
    /// Single-choice radio group.
    Radio,
    /// Single boolean checkbox.
    Checkbox,
}

impl FieldKind {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }

    /// Returns whether fields of this kind carry admin-defined choices.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

impl FromStr for FieldKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "email" => Ok(Self::Email),
            "number" => Ok(Self::Number),
            "textarea" => Ok(Self::Textarea),
            "select" => Ok(Self::Select),
            "radio" => Ok(Self::Radio),
            "checkbox" => Ok(Self::Checkbox),
            other => Err(AppError::Validation(format!(
                "unsupported input type '{other}'"
            ))),
        }
    }
}

/// Control-specific behavior settings for one field.
///
/// The variant fixes the field kind, so a definition can never pair (say)
/// textarea rows with a checkbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldControl {
    /// Single-line text input.
    Text {
        /// Maximum accepted character count.
        max_length: Option<u32>,
    },
    /// Email address input.
    Email {
        /// Autocomplete token handed to the browser (e.g. `email`).
        autocomplete: Option<String>,
    },
    /// Numeric input.
    Number {
        /// Smallest accepted value.
        min: Option<f64>,
        /// Largest accepted value.
        max: Option<f64>,
        /// Distance between adjacent accepted values.
        step: Option<f64>,
    },
    /// Multi-line text input.
    Textarea {
        /// Visible row count.
        rows: Option<u32>,
        /// Maximum accepted character count.
        max_length: Option<u32>,
    },
    /// Single-choice dropdown.
    Select {
        /// Whether the dropdown offers type-ahead search.
        #[serde(default)]
        searchable: bool,
    },
    /// Single-choice radio group.
    Radio {
        /// Whether choices render in one row.
        #[serde(default)]
        inline: bool,
        /// Whether per-choice descriptions render under each label.
        #[serde(default)]
        show_descriptions: bool,
    },
    /// Single boolean checkbox.
    Checkbox {
        /// Whether the checkbox renders inline with its label.
        #[serde(default)]
        inline: bool,
    },
}

impl FieldControl {
    /// Returns the kind discriminant for this control.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text { .. } => FieldKind::Text,
            Self::Email { .. } => FieldKind::Email,
            Self::Number { .. } => FieldKind::Number,
            Self::Textarea { .. } => FieldKind::Textarea,
            Self::Select { .. } => FieldKind::Select,
            Self::Radio { .. } => FieldKind::Radio,
            Self::Checkbox { .. } => FieldKind::Checkbox,
        }
    }

    pub(crate) fn validate(&self) -> AppResult<()> {
        match self {
            Self::Text { max_length } => validate_max_length(*max_length),
            Self::Email { .. }
            | Self::Select { .. }
            | Self::Radio { .. }
            | Self::Checkbox { .. } => Ok(()),
            Self::Number { min, max, step } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(AppError::Validation(format!(
                            "number range is inverted ({min} > {max})"
                        )));
                    }
                }
                if step.is_some_and(|step| step <= 0.0) {
                    return Err(AppError::Validation(
                        "number step must be positive".to_owned(),
                    ));
                }
                Ok(())
            }
            Self::Textarea { rows, max_length } => {
                if *rows == Some(0) {
                    return Err(AppError::Validation(
                        "textarea rows must be at least 1".to_owned(),
                    ));
                }
                validate_max_length(*max_length)
            }
        }
    }
}

fn validate_max_length(max_length: Option<u32>) -> AppResult<()> {
    if max_length == Some(0) {
        return Err(AppError::Validation(
            "max length must be at least 1".to_owned(),
        ));
    }
    Ok(())
}
