use std::str::FromStr;

use fieldkit_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Supported operators for visibility conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Value matches any expected value.
    In,
    /// Value matches no expected value.
    NotIn,
    /// Value equals the first expected value.
    Equals,
    /// Value differs from the first expected value.
    NotEquals,
}

impl ConditionOperator {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
        }
    }
}

impl FromStr for ConditionOperator {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in" => Ok(Self::In),
            "not_in" => Ok(Self::NotIn),
            "equals" => Ok(Self::Equals),
            "not_equals" => Ok(Self::NotEquals),
            other => Err(AppError::Validation(format!(
                "unknown condition operator '{other}'"
            ))),
        }
    }
}

/// Expected comparison values of one visibility condition.
///
/// Admin tooling stores these either as one comma-separated string or as a
/// list of strings; both wire encodings normalize to the same trimmed list.
/// Blank segments survive the comma split, so `""` holds one blank element
/// rather than none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpectedValues(Vec<String>);

impl ExpectedValues {
    /// Parses the comma-separated encoding, trimming each segment.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(|segment| segment.trim().to_owned())
                .collect(),
        )
    }

    /// Builds from an already-split list, trimming each element.
    #[must_use]
    pub fn from_list(values: Vec<String>) -> Self {
        Self(
            values
                .into_iter()
                .map(|value| value.trim().to_owned())
                .collect(),
        )
    }

    /// Returns the values in admin-entered order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Returns the first value, which the equality operators compare against.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns whether the candidate matches any value.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        self.0.iter().any(|value| value == candidate)
    }

    /// Returns whether no values are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpectedValuesEncoding {
    List(Vec<String>),
    Raw(String),
}

impl<'de> Deserialize<'de> for ExpectedValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match ExpectedValuesEncoding::deserialize(deserializer)? {
            ExpectedValuesEncoding::List(values) => Self::from_list(values),
            ExpectedValuesEncoding::Raw(raw) => Self::parse(&raw),
        })
    }
}

/// One condition gating the visibility of a dependent field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityCondition {
    field_key: NonEmptyString,
    operator: ConditionOperator,
    #[serde(rename = "expected_values")]
    expected: ExpectedValues,
}

impl VisibilityCondition {
    /// Creates a validated visibility condition.
    pub fn new(
        field_key: impl Into<String>,
        operator: ConditionOperator,
        expected: ExpectedValues,
    ) -> AppResult<Self> {
        Ok(Self {
            field_key: NonEmptyString::new(field_key)?,
            operator,
            expected,
        })
    }

    /// Returns the key of the field this condition watches.
    #[must_use]
    pub fn field_key(&self) -> &NonEmptyString {
        &self.field_key
    }

    /// Returns the condition operator.
    #[must_use]
    pub fn operator(&self) -> ConditionOperator {
        self.operator
    }

    /// Returns the expected comparison values.
    #[must_use]
    pub fn expected(&self) -> &ExpectedValues {
        &self.expected
    }
}
