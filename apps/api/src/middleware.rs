use std::str::FromStr;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use fieldkit_core::TenantId;

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the tenant a request operates on.
pub const TENANT_HEADER: &str = "x-fieldkit-tenant";

/// Resolves the tenant for the request and stores it as an extension.
///
/// Requests may pin a tenant via the `x-fieldkit-tenant` header; everything
/// else runs against the tenant the server was started with.
pub async fn resolve_tenant(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let header_value = request
        .headers()
        .get(TENANT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    let tenant_id = match header_value {
        Some(value) => TenantId::from_str(value.as_str())?,
        None => state.default_tenant_id,
    };

    request.extensions_mut().insert(tenant_id);
    Ok(next.run(request).await)
}
