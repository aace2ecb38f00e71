use fieldkit_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Default selection priority assigned to new forms.
pub const DEFAULT_FORM_PRIORITY: u8 = 10;

/// One named form bound to a purpose token.
///
/// The purpose token is the stable identity host applications look a form
/// up by (`customer_registration`, `vendor_onboarding`); display name and
/// description exist for admins only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    purpose_token: NonEmptyString,
    name: NonEmptyString,
    description: Option<String>,
    is_active: bool,
    priority: u8,
}

impl FormDefinition {
    /// Creates a validated form definition.
    ///
    /// Purpose tokens use the slug alphabet (`a-z`, `0-9`, `_`) so they can
    /// travel in URL paths. Priority ranks forms sharing a purpose, lowest
    /// first, and must be at least 1.
    pub fn new(
        purpose_token: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        is_active: bool,
        priority: u8,
    ) -> AppResult<Self> {
        let purpose_token = purpose_token.into();
        if !is_purpose_token(&purpose_token) {
            return Err(AppError::Validation(format!(
                "purpose token '{purpose_token}' must contain only lowercase letters, digits, and underscores"
            )));
        }
        if priority == 0 {
            return Err(AppError::Validation(
                "form priority must be between 1 and 255".to_owned(),
            ));
        }

        Ok(Self {
            purpose_token: NonEmptyString::new(purpose_token)?,
            name: NonEmptyString::new(name)?,
            description: description
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            is_active,
            priority,
        })
    }

    /// Returns the stable purpose token.
    #[must_use]
    pub fn purpose_token(&self) -> &NonEmptyString {
        &self.purpose_token
    }

    /// Returns the admin-facing display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the optional admin-facing description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the form may render.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the selection priority, lowest first.
    #[must_use]
    pub fn priority(&self) -> u8 {
        self.priority
    }
}

/// Derives a purpose token from a display name.
///
/// Alphanumeric runs are lowercased; every other run collapses to a single
/// underscore (`"VIP Intake!"` becomes `"vip_intake"`). The result can be
/// empty when the name carries no alphanumeric characters at all.
#[must_use]
pub fn purpose_token_from_name(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    let mut pending_separator = false;
    for character in name.chars() {
        if character.is_ascii_alphanumeric() {
            if pending_separator && !token.is_empty() {
                token.push('_');
            }
            pending_separator = false;
            token.push(character.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    token
}

fn is_purpose_token(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
        })
}
