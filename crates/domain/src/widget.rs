use serde::{Deserialize, Serialize};

use crate::condition::VisibilityCondition;
use crate::definition::FieldDefinition;
use crate::field::{FieldControl, FieldKind};

/// One renderable choice, shaped for UI consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    value: String,
    label: String,
    description: Option<String>,
    icon: Option<String>,
}

impl ChoiceOption {
    /// Creates a choice entry.
    #[must_use]
    pub fn new(
        value: impl Into<String>,
        label: impl Into<String>,
        description: Option<String>,
        icon: Option<String>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description,
            icon,
        }
    }

    /// Returns the stored choice value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
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
}

/// Control payload of one rendered widget.
///
/// Mirrors [`FieldControl`] with admin-defined choices resolved inline, so
/// consumers never join back to the stored definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetControl {
    /// Single-line text input.
    Text {
        /// Maximum accepted character count.
        max_length: Option<u32>,
    },
    /// Email address input.
    Email {
        /// Autocomplete token handed to the browser.
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
        searchable: bool,
        /// Choices ascending by sort order.
        options: Vec<ChoiceOption>,
    },
    /// Single-choice radio group.
    Radio {
        /// Whether choices render in one row.
        inline: bool,
        /// Whether per-choice descriptions render under each label.
        show_descriptions: bool,
        /// Choices ascending by sort order.
        options: Vec<ChoiceOption>,
    },
    /// Single boolean checkbox.
    Checkbox {
        /// Whether the checkbox renders inline with its label.
        inline: bool,
    },
}

impl WidgetControl {
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
}

/// Fully resolved widget for one form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescription {
    field_key: String,
    control: WidgetControl,
    label: String,
    required: bool,
    placeholder: Option<String>,
    helper_text: Option<String>,
    reactive: bool,
    validation_rules: Vec<String>,
    conditions: Vec<VisibilityCondition>,
}

impl WidgetDescription {
    /// Describes the given definition as a renderable widget.
    ///
    /// `reactive` marks fields other fields' conditions watch; UIs re-render
    /// dependents when a reactive field changes.
    #[must_use]
    pub fn describe(definition: &FieldDefinition, reactive: bool) -> Self {
        Self {
            field_key: definition.field_key().as_str().to_owned(),
            control: widget_control_for(definition),
            label: definition.label().as_str().to_owned(),
            required: definition.is_required(),
            placeholder: definition.placeholder().map(ToOwned::to_owned),
            helper_text: definition.description().map(ToOwned::to_owned),
            reactive,
            validation_rules: definition.validation_rules().rules().to_vec(),
            conditions: definition.conditions().to_vec(),
        }
    }

    /// Returns the key submissions address this widget by.
    #[must_use]
    pub fn field_key(&self) -> &str {
        &self.field_key
    }

    /// Returns the resolved control payload.
    #[must_use]
    pub fn control(&self) -> &WidgetControl {
        &self.control
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns whether submissions must provide a value.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the placeholder shown inside the empty input.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns the helper text shown under the input.
    #[must_use]
    pub fn helper_text(&self) -> Option<&str> {
        self.helper_text.as_deref()
    }

    /// Returns whether other fields' conditions watch this widget.
    #[must_use]
    pub fn reactive(&self) -> bool {
        self.reactive
    }

    /// Returns the declarative validation rules.
    #[must_use]
    pub fn validation_rules(&self) -> &[String] {
        &self.validation_rules
    }

    /// Returns the conditions clients re-evaluate as values change.
    #[must_use]
    pub fn conditions(&self) -> &[VisibilityCondition] {
        &self.conditions
    }
}

/// One widget paired with its evaluated visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedWidget {
    widget: WidgetDescription,
    visible: bool,
}

impl RenderedWidget {
    /// Pairs a widget with its evaluated visibility.
    #[must_use]
    pub fn new(widget: WidgetDescription, visible: bool) -> Self {
        Self { widget, visible }
    }

    /// Returns the widget description.
    #[must_use]
    pub fn widget(&self) -> &WidgetDescription {
        &self.widget
    }

    /// Returns whether the widget is currently visible.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }
}

fn widget_control_for(definition: &FieldDefinition) -> WidgetControl {
    match definition.control() {
        FieldControl::Text { max_length } => WidgetControl::Text {
            max_length: *max_length,
        },
        FieldControl::Email { autocomplete } => WidgetControl::Email {
            autocomplete: autocomplete.clone(),
        },
        FieldControl::Number { min, max, step } => WidgetControl::Number {
            min: *min,
            max: *max,
            step: *step,
        },
        FieldControl::Textarea { rows, max_length } => WidgetControl::Textarea {
            rows: *rows,
            max_length: *max_length,
        },
        FieldControl::Select { searchable } => WidgetControl::Select {
            searchable: *searchable,
            options: choice_options(definition),
        },
        FieldControl::Radio {
            inline,
            show_descriptions,
        } => WidgetControl::Radio {
            inline: *inline,
            show_descriptions: *show_descriptions,
            options: choice_options(definition),
        },
        FieldControl::Checkbox { inline } => WidgetControl::Checkbox { inline: *inline },
    }
}

fn choice_options(definition: &FieldDefinition) -> Vec<ChoiceOption> {
    definition
        .options()
        .iter()
        .map(|option| {
            ChoiceOption::new(
                option.value().as_str(),
                option.label().as_str(),
                option.description().map(ToOwned::to_owned),
                option.icon().map(ToOwned::to_owned),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{WidgetControl, WidgetDescription};
    use crate::definition::{FieldDefinition, FieldDefinitionInput, FieldOption, ValidationRules};
    use crate::field::{FieldControl, FieldKind};

    fn select_definition() -> FieldDefinition {
        let options = vec![
            FieldOption::new("business", "Business", Some("Companies".to_owned()), None, None, 1)
                .unwrap_or_else(|_| unreachable!()),
            FieldOption::new("individual", "Individual", None, None, None, 2)
                .unwrap_or_else(|_| unreachable!()),
        ];
        FieldDefinition::new(
            "customer_type",
            "Customer Type",
            FieldControl::Select { searchable: true },
            FieldDefinitionInput {
                description: Some("Pick the closest match".to_owned()),
                placeholder: None,
                is_required: true,
                is_active: true,
                sort_order: 1,
                validation_rules: ValidationRules::parse("required"),
                options,
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn describe_resolves_choices_into_the_control() {
        let widget = WidgetDescription::describe(&select_definition(), true);

        assert_eq!(widget.field_key(), "customer_type");
        assert!(widget.reactive());
        assert!(widget.required());
        assert_eq!(widget.helper_text(), Some("Pick the closest match"));
        assert_eq!(widget.validation_rules(), ["required"]);
        match widget.control() {
            WidgetControl::Select { searchable, options } => {
                assert!(*searchable);
                let values: Vec<&str> = options.iter().map(|option| option.value()).collect();
                assert_eq!(values, ["business", "individual"]);
                assert_eq!(options[0].description(), Some("Companies"));
            }
            other => unreachable!("unexpected control {other:?}"),
        }
        assert_eq!(widget.control().kind(), FieldKind::Select);
    }

    #[test]
    fn describe_keeps_checkbox_inline_flag() {
        let definition = FieldDefinition::new(
            "subscribe",
            "Subscribe to updates",
            FieldControl::Checkbox { inline: true },
            FieldDefinitionInput {
                description: None,
                placeholder: None,
                is_required: false,
                is_active: true,
                sort_order: 2,
                validation_rules: ValidationRules::default(),
                options: Vec::new(),
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .unwrap_or_else(|_| unreachable!());

        let widget = WidgetDescription::describe(&definition, false);
        assert_eq!(widget.control(), &WidgetControl::Checkbox { inline: true });
        assert!(!widget.reactive());
    }
}
