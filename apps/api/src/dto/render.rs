use fieldkit_domain::{ChoiceOption, RenderedWidget, WidgetControl, WidgetDescription};
use serde::Serialize;
use ts_rs::TS;

use super::fields::ConditionDto;

/// API representation of one rendered widget with evaluated visibility.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/rendered-widget-response.ts"
)]
pub struct RenderedWidgetResponse {
    pub widget: WidgetResponse,
    pub visible: bool,
}

impl From<RenderedWidget> for RenderedWidgetResponse {
    fn from(rendered: RenderedWidget) -> Self {
        Self {
            widget: WidgetResponse::from(rendered.widget()),
            visible: rendered.visible(),
        }
    }
}

/// API representation of one renderable widget.
///
/// Control settings are flattened next to `field_type`, mirroring the field
/// transport shape, with resolved choices in `options`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/widget-response.ts"
)]
pub struct WidgetResponse {
    pub field_key: String,
    pub field_type: String,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub reactive: bool,
    pub max_length: Option<u32>,
    pub autocomplete: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub rows: Option<u32>,
    pub searchable: bool,
    pub inline: bool,
    pub show_descriptions: bool,
    pub options: Vec<ChoiceOptionDto>,
    pub validation_rules: Vec<String>,
    pub conditions: Vec<ConditionDto>,
}

impl From<&WidgetDescription> for WidgetResponse {
    fn from(widget: &WidgetDescription) -> Self {
        let mut response = Self {
            field_key: widget.field_key().to_owned(),
            field_type: widget.control().kind().as_str().to_owned(),
            label: widget.label().to_owned(),
            required: widget.required(),
            placeholder: widget.placeholder().map(ToOwned::to_owned),
            helper_text: widget.helper_text().map(ToOwned::to_owned),
            reactive: widget.reactive(),
            max_length: None,
            autocomplete: None,
            min: None,
            max: None,
            step: None,
            rows: None,
            searchable: false,
            inline: false,
            show_descriptions: false,
            options: Vec::new(),
            validation_rules: widget.validation_rules().to_vec(),
            conditions: widget
                .conditions()
                .iter()
                .map(ConditionDto::from_domain)
                .collect(),
        };

        match widget.control() {
            WidgetControl::Text { max_length } => response.max_length = *max_length,
            WidgetControl::Email { autocomplete } => {
                response.autocomplete = autocomplete.clone();
            }
            WidgetControl::Number { min, max, step } => {
                response.min = *min;
                response.max = *max;
                response.step = *step;
            }
            WidgetControl::Textarea { rows, max_length } => {
                response.rows = *rows;
                response.max_length = *max_length;
            }
            WidgetControl::Select {
                searchable,
                options,
            } => {
                response.searchable = *searchable;
                response.options = options.iter().map(ChoiceOptionDto::from_domain).collect();
            }
            WidgetControl::Radio {
                inline,
                show_descriptions,
                options,
            } => {
                response.inline = *inline;
                response.show_descriptions = *show_descriptions;
                response.options = options.iter().map(ChoiceOptionDto::from_domain).collect();
            }
            WidgetControl::Checkbox { inline } => response.inline = *inline,
        }

        response
    }
}

/// API representation of one selectable choice.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/choice-option-dto.ts"
)]
pub struct ChoiceOptionDto {
    pub value: String,
    pub label: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl ChoiceOptionDto {
    fn from_domain(option: &ChoiceOption) -> Self {
        Self {
            value: option.value().to_owned(),
            label: option.label().to_owned(),
            description: option.description().map(ToOwned::to_owned),
            icon: option.icon().map(ToOwned::to_owned),
        }
    }
}
