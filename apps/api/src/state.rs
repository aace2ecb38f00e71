use fieldkit_application::FieldKitService;
use fieldkit_core::TenantId;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub fieldkit_service: FieldKitService,
    pub default_tenant_id: TenantId,
}
