use std::collections::{BTreeMap, HashSet};

use fieldkit_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::condition::VisibilityCondition;
use crate::field::{FieldControl, FieldKind};

/// Declarative validation rule list (`required|email|max:120`).
///
/// Both the pipe-separated string and the list wire encoding normalize to a
/// trimmed, de-duplicated list in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationRules(Vec<String>);

impl ValidationRules {
    /// Parses the pipe-separated encoding.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::from_list(raw.split('|').map(str::to_owned).collect())
    }

    /// Builds from an already-split rule list.
    ///
    /// Rules are trimmed, blanks dropped, and the first occurrence wins when
    /// a rule repeats.
    #[must_use]
    pub fn from_list(rules: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();
        for rule in rules {
            let rule = rule.trim();
            if rule.is_empty() || !seen.insert(rule.to_owned()) {
                continue;
            }
            normalized.push(rule.to_owned());
        }
        Self(normalized)
    }

    /// Returns rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[String] {
        &self.0
    }

    /// Returns whether no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValidationRulesEncoding {
    List(Vec<String>),
    Raw(String),
}

impl<'de> Deserialize<'de> for ValidationRules {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match ValidationRulesEncoding::deserialize(deserializer)? {
            ValidationRulesEncoding::List(rules) => Self::from_list(rules),
            ValidationRulesEncoding::Raw(raw) => Self::parse(&raw),
        })
    }
}

/// One selectable choice of a select or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    value: NonEmptyString,
    label: NonEmptyString,
    description: Option<String>,
    icon: Option<String>,
    external_identifier: Option<String>,
    sort_order: i32,
}

impl FieldOption {
    /// Creates a validated choice.
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        description: Option<String>,
        icon: Option<String>,
        external_identifier: Option<String>,
        sort_order: i32,
    ) -> AppResult<Self> {
        Ok(Self {
            value: NonEmptyString::new(value)?,
            label: NonEmptyString::new(label)?,
            description: normalize_optional(description),
            icon: normalize_optional(icon),
            external_identifier: normalize_optional(external_identifier),
            sort_order,
        })
    }

    /// Returns the stored choice value.
    #[must_use]
    pub fn value(&self) -> &NonEmptyString {
        &self.value
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &NonEmptyString {
        &self.label
    }

    /// Returns the optional per-choice description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the optional icon identifier.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the identifier of this choice in an external system.
    #[must_use]
    pub fn external_identifier(&self) -> Option<&str> {
        self.external_identifier.as_deref()
    }

    /// Returns the position among sibling choices.
    #[must_use]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

/// Mapping of one field onto an external system.
///
/// FieldKit stores mappings verbatim and never interprets them; adapters in
/// host applications read them when moving submitted values around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMapping {
    adapter: NonEmptyString,
    target: NonEmptyString,
    config: BTreeMap<String, String>,
}

impl ExternalMapping {
    /// Creates a validated mapping entry.
    pub fn new(
        adapter: impl Into<String>,
        target: impl Into<String>,
        config: BTreeMap<String, String>,
    ) -> AppResult<Self> {
        Ok(Self {
            adapter: NonEmptyString::new(adapter)?,
            target: NonEmptyString::new(target)?,
            config,
        })
    }

    /// Returns the adapter identifier (e.g. `crm`, `webhook`).
    #[must_use]
    pub fn adapter(&self) -> &NonEmptyString {
        &self.adapter
    }

    /// Returns the attribute targeted in the external system.
    #[must_use]
    pub fn target(&self) -> &NonEmptyString {
        &self.target
    }

    /// Returns adapter-specific settings.
    #[must_use]
    pub fn config(&self) -> &BTreeMap<String, String> {
        &self.config
    }
}

/// Everything about one field except its identity, label, and control.
#[derive(Debug, Clone)]
pub struct FieldDefinitionInput {
    /// Helper text shown under the input.
    pub description: Option<String>,
    /// Placeholder shown inside the empty input.
    pub placeholder: Option<String>,
    /// Whether submissions must provide a value.
    pub is_required: bool,
    /// Whether the field participates in rendering.
    pub is_active: bool,
    /// Position among sibling fields.
    pub sort_order: i32,
    /// Declarative validation rules.
    pub validation_rules: ValidationRules,
    /// Admin-defined choices, legal on choice controls only.
    pub options: Vec<FieldOption>,
    /// External-system mappings.
    pub external_mappings: Vec<ExternalMapping>,
    /// Conditions gating the field's visibility.
    pub conditions: Vec<VisibilityCondition>,
}

/// One stored field definition within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    field_key: NonEmptyString,
    control: FieldControl,
    label: NonEmptyString,
    description: Option<String>,
    placeholder: Option<String>,
    is_required: bool,
    is_active: bool,
    sort_order: i32,
    validation_rules: ValidationRules,
    options: Vec<FieldOption>,
    external_mappings: Vec<ExternalMapping>,
    conditions: Vec<VisibilityCondition>,
}

impl FieldDefinition {
    /// Creates a validated field definition.
    ///
    /// Options are legal on choice controls only, must not repeat values,
    /// and are reordered ascending by sort order with ties broken on value.
    pub fn new(
        field_key: impl Into<String>,
        label: impl Into<String>,
        control: FieldControl,
        input: FieldDefinitionInput,
    ) -> AppResult<Self> {
        control.validate()?;

        if !control.kind().is_choice() && !input.options.is_empty() {
            return Err(AppError::Validation(format!(
                "options are not supported on '{}' fields",
                control.kind().as_str()
            )));
        }

        let mut seen = HashSet::new();
        for option in &input.options {
            if !seen.insert(option.value().as_str().to_owned()) {
                return Err(AppError::Validation(format!(
                    "duplicate option value '{}'",
                    option.value()
                )));
            }
        }

        let mut options = input.options;
        options.sort_by(|left, right| {
            left.sort_order()
                .cmp(&right.sort_order())
                .then_with(|| left.value().as_str().cmp(right.value().as_str()))
        });

        Ok(Self {
            field_key: NonEmptyString::new(field_key)?,
            control,
            label: NonEmptyString::new(label)?,
            description: normalize_optional(input.description),
            placeholder: normalize_optional(input.placeholder),
            is_required: input.is_required,
            is_active: input.is_active,
            sort_order: input.sort_order,
            validation_rules: input.validation_rules,
            options,
            external_mappings: input.external_mappings,
            conditions: input.conditions,
        })
    }

    /// Returns the key submissions address this field by.
    #[must_use]
    pub fn field_key(&self) -> &NonEmptyString {
        &self.field_key
    }

    /// Returns the control settings.
    #[must_use]
    pub fn control(&self) -> &FieldControl {
        &self.control
    }

    /// Returns the kind discriminant of the control.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.control.kind()
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &NonEmptyString {
        &self.label
    }

    /// Returns the helper text shown under the input.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the placeholder shown inside the empty input.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns whether submissions must provide a value.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Returns whether the field participates in rendering.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the position among sibling fields.
    #[must_use]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    /// Returns the declarative validation rules.
    #[must_use]
    pub fn validation_rules(&self) -> &ValidationRules {
        &self.validation_rules
    }

    /// Returns choices ascending by sort order.
    #[must_use]
    pub fn options(&self) -> &[FieldOption] {
        &self.options
    }

    /// Returns the external-system mappings.
    #[must_use]
    pub fn external_mappings(&self) -> &[ExternalMapping] {
        &self.external_mappings
    }

    /// Returns the conditions gating this field's visibility.
    #[must_use]
    pub fn conditions(&self) -> &[VisibilityCondition] {
        &self.conditions
    }

    /// Returns whether any visibility condition watches the given field.
    #[must_use]
    pub fn references(&self, field_key: &str) -> bool {
        self.conditions
            .iter()
            .any(|condition| condition.field_key().as_str() == field_key)
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
