use axum::Json;
use axum::extract::State;

use crate::dto::FieldTypeOptionResponse;
use crate::state::AppState;

pub async fn field_type_options_handler(
    State(state): State<AppState>,
) -> Json<Vec<FieldTypeOptionResponse>> {
    let options = state
        .fieldkit_service
        .field_type_options()
        .into_iter()
        .map(FieldTypeOptionResponse::from)
        .collect();

    Json(options)
}
