mod common;
mod fields;
mod forms;
mod render;

pub use common::HealthResponse;
pub use fields::{
    ConditionDto, ExternalMappingDto, FieldOptionDto, FieldResponse, FieldTypeOptionResponse,
    SaveFieldRequest, UpdateFieldRequest,
};
pub use forms::{CreateFormRequest, FormResponse, UpdateFormRequest};
pub use render::{ChoiceOptionDto, RenderedWidgetResponse, WidgetResponse};
