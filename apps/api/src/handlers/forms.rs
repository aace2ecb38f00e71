use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use fieldkit_application::{SaveFormInput, UpdateFormInput};
use fieldkit_core::TenantId;
use fieldkit_domain::DEFAULT_FORM_PRIORITY;

use crate::dto::{CreateFormRequest, FormResponse, UpdateFormRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_forms_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
) -> ApiResult<Json<Vec<FormResponse>>> {
    let forms = state
        .fieldkit_service
        .list_forms(tenant_id)
        .await?
        .into_iter()
        .map(FormResponse::from)
        .collect();

    Ok(Json(forms))
}

pub async fn create_form_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Json(payload): Json<CreateFormRequest>,
) -> ApiResult<(StatusCode, Json<FormResponse>)> {
    let form = state
        .fieldkit_service
        .create_form(
            tenant_id,
            SaveFormInput {
                purpose_token: payload.purpose_token,
                name: payload.name,
                description: payload.description,
                is_active: payload.is_active.unwrap_or(true),
                priority: payload.priority.unwrap_or(DEFAULT_FORM_PRIORITY),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(FormResponse::from(form))))
}

pub async fn get_form_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path(purpose_token): Path<String>,
) -> ApiResult<Json<FormResponse>> {
    let form = state
        .fieldkit_service
        .find_form(tenant_id, purpose_token.as_str())
        .await?;

    Ok(Json(FormResponse::from(form)))
}

pub async fn update_form_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path(purpose_token): Path<String>,
    Json(payload): Json<UpdateFormRequest>,
) -> ApiResult<Json<FormResponse>> {
    let form = state
        .fieldkit_service
        .update_form(
            tenant_id,
            purpose_token.as_str(),
            UpdateFormInput {
                name: payload.name,
                description: payload.description,
                is_active: payload.is_active.unwrap_or(true),
                priority: payload.priority.unwrap_or(DEFAULT_FORM_PRIORITY),
            },
        )
        .await?;

    Ok(Json(FormResponse::from(form)))
}

pub async fn delete_form_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path(purpose_token): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .fieldkit_service
        .delete_form(tenant_id, purpose_token.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
