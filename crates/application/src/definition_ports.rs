use async_trait::async_trait;
use fieldkit_core::{AppResult, TenantId};
use fieldkit_domain::{
    ExternalMapping, FieldControl, FieldDefinition, FieldOption, FormDefinition, ValidationRules,
    VisibilityCondition,
};

/// Input payload for form create operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFormInput {
    /// Stable purpose token; derived from the name when omitted or blank.
    pub purpose_token: Option<String>,
    /// Admin-facing display name.
    pub name: String,
    /// Optional admin-facing description.
    pub description: Option<String>,
    /// Whether the form may render.
    pub is_active: bool,
    /// Selection priority, lowest first.
    pub priority: u8,
}

/// Input payload for form update operations.
///
/// The purpose token is fixed at creation; updates touch display and
/// selection attributes only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFormInput {
    /// Admin-facing display name.
    pub name: String,
    /// Optional admin-facing description.
    pub description: Option<String>,
    /// Whether the form may render.
    pub is_active: bool,
    /// Selection priority, lowest first.
    pub priority: u8,
}

/// Input payload for field create operations.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFieldInput {
    /// Key submissions address the field by.
    pub field_key: String,
    /// Control settings; the variant fixes the input type.
    pub control: FieldControl,
    /// Display label.
    pub label: String,
    /// Optional helper text shown under the input.
    pub description: Option<String>,
    /// Optional placeholder shown inside the empty input.
    pub placeholder: Option<String>,
    /// Whether submissions must provide a value.
    pub is_required: bool,
    /// Whether the field participates in rendering.
    pub is_active: bool,
    /// Explicit position; appended after the last sibling when omitted.
    pub sort_order: Option<i32>,
    /// Declarative validation rules.
    pub validation_rules: ValidationRules,
    /// Admin-defined choices.
    pub options: Vec<FieldOption>,
    /// One label per line, expanded into choices when `options` is empty.
    pub quick_options: Option<String>,
    /// External-system mappings.
    pub external_mappings: Vec<ExternalMapping>,
    /// Conditions gating the field's visibility.
    pub conditions: Vec<VisibilityCondition>,
}

/// Input payload for field update operations.
///
/// The field key is fixed at creation, and quick options only apply when a
/// field is first created.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFieldInput {
    /// Control settings; the variant fixes the input type.
    pub control: FieldControl,
    /// Display label.
    pub label: String,
    /// Optional helper text shown under the input.
    pub description: Option<String>,
    /// Optional placeholder shown inside the empty input.
    pub placeholder: Option<String>,
    /// Whether submissions must provide a value.
    pub is_required: bool,
    /// Whether the field participates in rendering.
    pub is_active: bool,
    /// Explicit position; keeps the current position when omitted.
    pub sort_order: Option<i32>,
    /// Declarative validation rules.
    pub validation_rules: ValidationRules,
    /// Admin-defined choices.
    pub options: Vec<FieldOption>,
    /// External-system mappings.
    pub external_mappings: Vec<ExternalMapping>,
    /// Conditions gating the field's visibility.
    pub conditions: Vec<VisibilityCondition>,
}

/// Repository port for form and field definition storage.
#[async_trait]
pub trait DefinitionRepository: Send + Sync {
    /// Saves a new form definition, rejecting duplicate purpose tokens.
    async fn save_form(&self, tenant_id: TenantId, form: FormDefinition) -> AppResult<()>;

    /// Lists all form definitions ascending by priority, then purpose token.
    async fn list_forms(&self, tenant_id: TenantId) -> AppResult<Vec<FormDefinition>>;

    /// Looks up a single form definition by purpose token.
    async fn find_form(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
    ) -> AppResult<Option<FormDefinition>>;

    /// Replaces an existing form definition.
    async fn update_form(&self, tenant_id: TenantId, form: FormDefinition) -> AppResult<()>;

    /// Deletes a form definition together with its fields.
    async fn delete_form(&self, tenant_id: TenantId, purpose_token: &str) -> AppResult<()>;

    /// Saves a new field definition under a form, rejecting duplicate keys.
    async fn save_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field: FieldDefinition,
    ) -> AppResult<()>;

    /// Lists a form's field definitions ascending by sort order, then key.
    async fn list_fields(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
    ) -> AppResult<Vec<FieldDefinition>>;

    /// Looks up a single field definition by key.
    async fn find_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
    ) -> AppResult<Option<FieldDefinition>>;

    /// Replaces an existing field definition.
    async fn update_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field: FieldDefinition,
    ) -> AppResult<()>;

    /// Deletes a field definition.
    async fn delete_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
    ) -> AppResult<()>;
}
