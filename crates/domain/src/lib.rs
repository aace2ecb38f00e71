//! Domain model for dynamic form and field definitions.

#![forbid(unsafe_code)]

mod condition;
mod definition;
mod field;
mod form;
mod widget;

pub use condition::{ConditionOperator, ExpectedValues, VisibilityCondition};
pub use definition::{
    ExternalMapping, FieldDefinition, FieldDefinitionInput, FieldOption, ValidationRules,
};
pub use field::{FieldControl, FieldKind};
pub use form::{DEFAULT_FORM_PRIORITY, FormDefinition, purpose_token_from_name};
pub use widget::{ChoiceOption, RenderedWidget, WidgetControl, WidgetDescription};
