use axum::Json;
use axum::extract::{Extension, Path, State};
use fieldkit_core::TenantId;
use serde_json::{Map, Value};

use crate::dto::RenderedWidgetResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn render_form_handler(
    State(state): State<AppState>,
    Extension(tenant_id): Extension<TenantId>,
    Path(purpose_token): Path<String>,
    Json(values): Json<Map<String, Value>>,
) -> ApiResult<Json<Vec<RenderedWidgetResponse>>> {
    let widgets = state
        .fieldkit_service
        .render_form(tenant_id, purpose_token.as_str(), &values)
        .await?
        .into_iter()
        .map(RenderedWidgetResponse::from)
        .collect();

    Ok(Json(widgets))
}
