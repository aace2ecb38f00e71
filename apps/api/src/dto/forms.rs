use fieldkit_domain::FormDefinition;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for form creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-form-request.ts"
)]
pub struct CreateFormRequest {
    pub purpose_token: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub priority: Option<u8>,
}

/// Incoming payload for form updates.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-form-request.ts"
)]
pub struct UpdateFormRequest {
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub priority: Option<u8>,
}

/// API representation of a form definition.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/form-response.ts"
)]
pub struct FormResponse {
    pub purpose_token: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub priority: u8,
}

impl From<FormDefinition> for FormResponse {
    fn from(form: FormDefinition) -> Self {
        Self {
            purpose_token: form.purpose_token().as_str().to_owned(),
            name: form.name().as_str().to_owned(),
            description: form.description().map(ToOwned::to_owned),
            is_active: form.is_active(),
            priority: form.priority(),
        }
    }
}
