use std::collections::BTreeMap;
use std::str::FromStr;

use fieldkit_application::{SaveFieldInput, UpdateFieldInput};
use fieldkit_core::{AppError, AppResult};
use fieldkit_domain::{
    ConditionOperator, ExpectedValues, ExternalMapping, FieldControl, FieldDefinition, FieldKind,
    FieldOption, ValidationRules, VisibilityCondition,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for field create operations.
///
/// Control settings arrive flattened next to `field_type`; knobs that do not
/// apply to the named type are ignored.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/save-field-request.ts"
)]
pub struct SaveFieldRequest {
    pub field_key: String,
    pub label: String,
    pub field_type: String,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub max_length: Option<u32>,
    pub autocomplete: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub rows: Option<u32>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub inline: bool,
    #[serde(default)]
    pub show_descriptions: bool,
    #[serde(default)]
    #[ts(type = "string | Array<string>")]
    pub validation_rules: ValidationRules,
    #[serde(default)]
    pub options: Vec<FieldOptionDto>,
    pub quick_options: Option<String>,
    #[serde(default)]
    pub external_mappings: Vec<ExternalMappingDto>,
    #[serde(default)]
    pub conditions: Vec<ConditionDto>,
}

/// Incoming payload for field update operations.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-field-request.ts"
)]
pub struct UpdateFieldRequest {
    pub label: String,
    pub field_type: String,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
    pub max_length: Option<u32>,
    pub autocomplete: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub rows: Option<u32>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub inline: bool,
    #[serde(default)]
    pub show_descriptions: bool,
    #[serde(default)]
    #[ts(type = "string | Array<string>")]
    pub validation_rules: ValidationRules,
    #[serde(default)]
    pub options: Vec<FieldOptionDto>,
    #[serde(default)]
    pub external_mappings: Vec<ExternalMappingDto>,
    #[serde(default)]
    pub conditions: Vec<ConditionDto>,
}

/// API transport representation of one admin-defined choice.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/field-option-dto.ts"
)]
pub struct FieldOptionDto {
    pub value: String,
    pub label: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub external_identifier: Option<String>,
    pub sort_order: i32,
}

impl FieldOptionDto {
    fn into_domain(self) -> AppResult<FieldOption> {
        FieldOption::new(
            self.value,
            self.label,
            self.description,
            self.icon,
            self.external_identifier,
            self.sort_order,
        )
    }

    fn from_domain(option: &FieldOption) -> Self {
        Self {
            value: option.value().as_str().to_owned(),
            label: option.label().as_str().to_owned(),
            description: option.description().map(ToOwned::to_owned),
            icon: option.icon().map(ToOwned::to_owned),
            external_identifier: option.external_identifier().map(ToOwned::to_owned),
            sort_order: option.sort_order(),
        }
    }
}

/// API transport representation of one external-system mapping.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/external-mapping-dto.ts"
)]
pub struct ExternalMappingDto {
    pub adapter: String,
    pub target: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

impl ExternalMappingDto {
    fn into_domain(self) -> AppResult<ExternalMapping> {
        ExternalMapping::new(self.adapter, self.target, self.config)
    }

    fn from_domain(mapping: &ExternalMapping) -> Self {
        Self {
            adapter: mapping.adapter().as_str().to_owned(),
            target: mapping.target().as_str().to_owned(),
            config: mapping.config().clone(),
        }
    }
}

/// API transport representation of one visibility condition.
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/condition-dto.ts"
)]
pub struct ConditionDto {
    pub field_key: String,
    pub operator: String,
    #[ts(type = "string | Array<string>")]
    pub expected_values: ExpectedValues,
}

impl ConditionDto {
    fn into_domain(self) -> AppResult<VisibilityCondition> {
        let operator = ConditionOperator::from_str(self.operator.as_str())?;
        VisibilityCondition::new(self.field_key, operator, self.expected_values)
    }

    pub(crate) fn from_domain(condition: &VisibilityCondition) -> Self {
        Self {
            field_key: condition.field_key().as_str().to_owned(),
            operator: condition.operator().as_str().to_owned(),
            expected_values: condition.expected().clone(),
        }
    }
}

/// API representation of a stored field definition.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/field-response.ts"
)]
pub struct FieldResponse {
    pub field_key: String,
    pub field_type: String,
    pub label: String,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub is_required: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub max_length: Option<u32>,
    pub autocomplete: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub rows: Option<u32>,
    pub searchable: bool,
    pub inline: bool,
    pub show_descriptions: bool,
    pub validation_rules: Vec<String>,
    pub options: Vec<FieldOptionDto>,
    pub external_mappings: Vec<ExternalMappingDto>,
    pub conditions: Vec<ConditionDto>,
}

impl From<FieldDefinition> for FieldResponse {
    fn from(field: FieldDefinition) -> Self {
        let knobs = ControlKnobs::from_control(field.control());

        Self {
            field_key: field.field_key().as_str().to_owned(),
            field_type: field.kind().as_str().to_owned(),
            label: field.label().as_str().to_owned(),
            description: field.description().map(ToOwned::to_owned),
            placeholder: field.placeholder().map(ToOwned::to_owned),
            is_required: field.is_required(),
            is_active: field.is_active(),
            sort_order: field.sort_order(),
            max_length: knobs.max_length,
            autocomplete: knobs.autocomplete,
            min: knobs.min,
            max: knobs.max,
            step: knobs.step,
            rows: knobs.rows,
            searchable: knobs.searchable,
            inline: knobs.inline,
            show_descriptions: knobs.show_descriptions,
            validation_rules: field.validation_rules().rules().to_vec(),
            options: field
                .options()
                .iter()
                .map(FieldOptionDto::from_domain)
                .collect(),
            external_mappings: field
                .external_mappings()
                .iter()
                .map(ExternalMappingDto::from_domain)
                .collect(),
            conditions: field
                .conditions()
                .iter()
                .map(ConditionDto::from_domain)
                .collect(),
        }
    }
}

/// One admin-selectable input type.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/field-type-option-response.ts"
)]
pub struct FieldTypeOptionResponse {
    pub value: String,
    pub label: String,
}

impl From<(FieldKind, String)> for FieldTypeOptionResponse {
    fn from((kind, label): (FieldKind, String)) -> Self {
        Self {
            value: kind.as_str().to_owned(),
            label,
        }
    }
}

impl TryFrom<SaveFieldRequest> for SaveFieldInput {
    type Error = AppError;

    fn try_from(request: SaveFieldRequest) -> Result<Self, Self::Error> {
        let control = control_from(
            request.field_type.as_str(),
            ControlKnobs {
                max_length: request.max_length,
                autocomplete: request.autocomplete,
                min: request.min,
                max: request.max,
                step: request.step,
                rows: request.rows,
                searchable: request.searchable,
                inline: request.inline,
                show_descriptions: request.show_descriptions,
            },
        )?;

        Ok(Self {
            field_key: request.field_key,
            control,
            label: request.label,
            description: request.description,
            placeholder: request.placeholder,
            is_required: request.is_required,
            is_active: request.is_active.unwrap_or(true),
            sort_order: request.sort_order,
            validation_rules: request.validation_rules,
            options: convert_options(request.options)?,
            quick_options: request.quick_options,
            external_mappings: convert_mappings(request.external_mappings)?,
            conditions: convert_conditions(request.conditions)?,
        })
    }
}

impl TryFrom<UpdateFieldRequest> for UpdateFieldInput {
    type Error = AppError;

    fn try_from(request: UpdateFieldRequest) -> Result<Self, Self::Error> {
        let control = control_from(
            request.field_type.as_str(),
            ControlKnobs {
                max_length: request.max_length,
                autocomplete: request.autocomplete,
                min: request.min,
                max: request.max,
                step: request.step,
                rows: request.rows,
                searchable: request.searchable,
                inline: request.inline,
                show_descriptions: request.show_descriptions,
            },
        )?;

        Ok(Self {
            control,
            label: request.label,
            description: request.description,
            placeholder: request.placeholder,
            is_required: request.is_required,
            is_active: request.is_active.unwrap_or(true),
            sort_order: request.sort_order,
            validation_rules: request.validation_rules,
            options: convert_options(request.options)?,
            external_mappings: convert_mappings(request.external_mappings)?,
            conditions: convert_conditions(request.conditions)?,
        })
    }
}

/// Flattened control settings shared by the field transport types.
#[derive(Debug, Default)]
struct ControlKnobs {
    max_length: Option<u32>,
    autocomplete: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    rows: Option<u32>,
    searchable: bool,
    inline: bool,
    show_descriptions: bool,
}

impl ControlKnobs {
    fn from_control(control: &FieldControl) -> Self {
        let mut knobs = Self::default();
        match control {
            FieldControl::Text { max_length } => knobs.max_length = *max_length,
            FieldControl::Email { autocomplete } => knobs.autocomplete = autocomplete.clone(),
            FieldControl::Number { min, max, step } => {
                knobs.min = *min;
                knobs.max = *max;
                knobs.step = *step;
            }
            FieldControl::Textarea { rows, max_length } => {
                knobs.rows = *rows;
                knobs.max_length = *max_length;
            }
            FieldControl::Select { searchable } => knobs.searchable = *searchable,
            FieldControl::Radio {
                inline,
                show_descriptions,
            } => {
                knobs.inline = *inline;
                knobs.show_descriptions = *show_descriptions;
            }
            FieldControl::Checkbox { inline } => knobs.inline = *inline,
        }
        knobs
    }
}

fn control_from(field_type: &str, knobs: ControlKnobs) -> AppResult<FieldControl> {
    let kind = FieldKind::from_str(field_type)?;
    Ok(match kind {
        FieldKind::Text => FieldControl::Text {
            max_length: knobs.max_length,
        },
        FieldKind::Email => FieldControl::Email {
            autocomplete: knobs.autocomplete,
        },
        FieldKind::Number => FieldControl::Number {
            min: knobs.min,
            max: knobs.max,
            step: knobs.step,
        },
        FieldKind::Textarea => FieldControl::Textarea {
            rows: knobs.rows,
            max_length: knobs.max_length,
        },
        FieldKind::Select => FieldControl::Select {
            searchable: knobs.searchable,
        },
        FieldKind::Radio => FieldControl::Radio {
            inline: knobs.inline,
            show_descriptions: knobs.show_descriptions,
        },
        FieldKind::Checkbox => FieldControl::Checkbox {
            inline: knobs.inline,
        },
    })
}

fn convert_options(options: Vec<FieldOptionDto>) -> AppResult<Vec<FieldOption>> {
    options
        .into_iter()
        .map(FieldOptionDto::into_domain)
        .collect()
}

fn convert_mappings(mappings: Vec<ExternalMappingDto>) -> AppResult<Vec<ExternalMapping>> {
    mappings
        .into_iter()
        .map(ExternalMappingDto::into_domain)
        .collect()
}

fn convert_conditions(conditions: Vec<ConditionDto>) -> AppResult<Vec<VisibilityCondition>> {
    conditions
        .into_iter()
        .map(ConditionDto::into_domain)
        .collect()
}

#[cfg(test)]
mod tests {
    use fieldkit_application::SaveFieldInput;
    use fieldkit_domain::{
        FieldControl, FieldDefinition, FieldDefinitionInput, FieldOption, ValidationRules,
    };
    use serde_json::json;

    use super::{FieldResponse, SaveFieldRequest};

    fn request_from(value: serde_json::Value) -> SaveFieldRequest {
        serde_json::from_value(value).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn save_request_builds_the_typed_control() {
        let request = request_from(json!({
            "field_key": "employee_count",
            "label": "Employee Count",
            "field_type": "number",
            "min": 1.0,
            "max": 10_000.0,
            "rows": 4,
            "searchable": true
        }));

        let input = SaveFieldInput::try_from(request).unwrap_or_else(|_| unreachable!());
        assert_eq!(
            input.control,
            FieldControl::Number {
                min: Some(1.0),
                max: Some(10_000.0),
                step: None
            }
        );
        assert!(input.is_active);
    }

    #[test]
    fn save_request_rejects_unknown_field_types() {
        let request = request_from(json!({
            "field_key": "note",
            "label": "Note",
            "field_type": "richtext"
        }));

        assert!(SaveFieldInput::try_from(request).is_err());
    }

    #[test]
    fn save_request_rejects_unknown_operators() {
        let request = request_from(json!({
            "field_key": "vat_number",
            "label": "VAT Number",
            "field_type": "text",
            "conditions": [
                {"field_key": "customer_type", "operator": "matches", "expected_values": "business"}
            ]
        }));

        assert!(SaveFieldInput::try_from(request).is_err());
    }

    #[test]
    fn save_request_accepts_both_rule_encodings() {
        let request = request_from(json!({
            "field_key": "email",
            "label": "Email",
            "field_type": "email",
            "validation_rules": "required|email"
        }));

        let input = SaveFieldInput::try_from(request).unwrap_or_else(|_| unreachable!());
        assert_eq!(input.validation_rules.rules(), ["required", "email"]);
    }

    #[test]
    fn response_flattens_the_control() {
        let definition = FieldDefinition::new(
            "customer_type",
            "Customer Type",
            FieldControl::Select { searchable: true },
            FieldDefinitionInput {
                description: None,
                placeholder: None,
                is_required: true,
                is_active: true,
                sort_order: 3,
                validation_rules: ValidationRules::parse("required"),
                options: vec![
                    FieldOption::new("business", "Business", None, None, None, 1)
                        .unwrap_or_else(|_| unreachable!()),
                ],
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .unwrap_or_else(|_| unreachable!());

        let response = FieldResponse::from(definition);
        assert_eq!(response.field_type, "select");
        assert!(response.searchable);
        assert_eq!(response.sort_order, 3);
        assert_eq!(response.validation_rules, ["required"]);
        assert_eq!(response.options.len(), 1);
        assert_eq!(response.options[0].value, "business");
    }
}
