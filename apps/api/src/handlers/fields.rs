use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use fieldkit_application::{SaveFieldInput, UpdateFieldInput};
use fieldkit_core::TenantId;

use crate::dto::{FieldResponse, SaveFieldRequest, UpdateFieldRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_fields_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path(purpose_token): Path<String>,
) -> ApiResult<Json<Vec<FieldResponse>>> {
    let fields = state
        .fieldkit_service
        .list_fields(tenant_id, purpose_token.as_str())
        .await?
        .into_iter()
        .map(FieldResponse::from)
        .collect();

    Ok(Json(fields))
}

pub async fn save_field_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path(purpose_token): Path<String>,
    Json(payload): Json<SaveFieldRequest>,
) -> ApiResult<(StatusCode, Json<FieldResponse>)> {
    let input = SaveFieldInput::try_from(payload)?;
    let field = state
        .fieldkit_service
        .save_field(tenant_id, purpose_token.as_str(), input)
        .await?;

    Ok((StatusCode::CREATED, Json(FieldResponse::from(field))))
}

pub async fn get_field_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path((purpose_token, field_key)): Path<(String, String)>,
) -> ApiResult<Json<FieldResponse>> {
    let field = state
        .fieldkit_service
        .find_field(tenant_id, purpose_token.as_str(), field_key.as_str())
        .await?;

    Ok(Json(FieldResponse::from(field)))
}

pub async fn update_field_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path((purpose_token, field_key)): Path<(String, String)>,
    Json(payload): Json<UpdateFieldRequest>,
) -> ApiResult<Json<FieldResponse>> {
    let input = UpdateFieldInput::try_from(payload)?;
    let field = state
        .fieldkit_service
        .update_field(tenant_id, purpose_token.as_str(), field_key.as_str(), input)
        .await?;

    Ok(Json(FieldResponse::from(field)))
}

pub async fn delete_field_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path((purpose_token, field_key)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    state
        .fieldkit_service
        .delete_field(tenant_id, purpose_token.as_str(), field_key.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
