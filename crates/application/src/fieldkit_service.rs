use std::sync::Arc;

use fieldkit_core::{AppError, AppResult, TenantId};
use fieldkit_domain::{
    FieldDefinition, FieldDefinitionInput, FieldKind, FieldOption, FormDefinition, RenderedWidget,
    purpose_token_from_name,
};
use serde_json::{Map, Value};

use crate::definition_ports::{
    DefinitionRepository, SaveFieldInput, SaveFormInput, UpdateFieldInput, UpdateFormInput,
};
use crate::registry::InputTypeRegistry;
use crate::render;

/// Application service for managing and rendering form definitions.
#[derive(Clone)]
pub struct FieldKitService {
    repository: Arc<dyn DefinitionRepository>,
    registry: Arc<InputTypeRegistry>,
    allowed_purpose_tokens: Arc<[String]>,
}

impl FieldKitService {
    /// Creates a new service from a repository implementation.
    ///
    /// An empty `allowed_purpose_tokens` list leaves purpose tokens
    /// unrestricted; otherwise forms only save under listed tokens.
    #[must_use]
    pub fn new(
        repository: Arc<dyn DefinitionRepository>,
        registry: InputTypeRegistry,
        allowed_purpose_tokens: Vec<String>,
    ) -> Self {
        Self {
            repository,
            registry: Arc::new(registry),
            allowed_purpose_tokens: allowed_purpose_tokens.into(),
        }
    }

    /// Creates a new form bound to a purpose token.
    ///
    /// A blank or omitted token derives from the display name.
    pub async fn create_form(
        &self,
        tenant_id: TenantId,
        input: SaveFormInput,
    ) -> AppResult<FormDefinition> {
        let purpose_token = match input
            .purpose_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            Some(token) => token.to_owned(),
            None => {
                let derived = purpose_token_from_name(&input.name);
                if derived.is_empty() {
                    return Err(AppError::Validation(format!(
                        "cannot derive a purpose token from name '{}'",
                        input.name
                    )));
                }
                derived
            }
        };

        self.require_purpose_allowed(&purpose_token)?;

        let form = FormDefinition::new(
            purpose_token,
            input.name,
            input.description,
            input.is_active,
            input.priority,
        )?;
        self.repository.save_form(tenant_id, form.clone()).await?;

        Ok(form)
    }

    /// Returns every known form definition.
    pub async fn list_forms(&self, tenant_id: TenantId) -> AppResult<Vec<FormDefinition>> {
        self.repository.list_forms(tenant_id).await
    }

    /// Looks up a form definition by purpose token.
    pub async fn find_form(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
    ) -> AppResult<FormDefinition> {
        self.repository
            .find_form(tenant_id, purpose_token)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("form '{purpose_token}' was not found")))
    }

    /// Updates a form's display and selection attributes.
    pub async fn update_form(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        input: UpdateFormInput,
    ) -> AppResult<FormDefinition> {
        let existing = self.find_form(tenant_id, purpose_token).await?;

        let form = FormDefinition::new(
            existing.purpose_token().as_str(),
            input.name,
            input.description,
            input.is_active,
            input.priority,
        )?;
        self.repository.update_form(tenant_id, form.clone()).await?;

        Ok(form)
    }

    /// Deletes a form definition together with its fields.
    pub async fn delete_form(&self, tenant_id: TenantId, purpose_token: &str) -> AppResult<()> {
        self.repository.delete_form(tenant_id, purpose_token).await
    }

    /// Adds a field definition to an existing form.
    ///
    /// The control's kind must be registered. An omitted sort order appends
    /// the field after the current last sibling, and quick options expand
    /// into choices when no explicit options arrive.
    pub async fn save_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        input: SaveFieldInput,
    ) -> AppResult<FieldDefinition> {
        self.find_form(tenant_id, purpose_token).await?;

        let kind = input.control.kind();
        let Some(entry) = self.registry.entry(kind) else {
            return Err(AppError::Validation(format!(
                "unsupported input type '{}'",
                kind.as_str()
            )));
        };

        let options = if input.options.is_empty() && entry.supports_options() {
            expand_quick_options(input.quick_options.as_deref())?
        } else {
            input.options
        };

        let sort_order = match input.sort_order {
            Some(sort_order) => sort_order,
            None => self.next_sort_order(tenant_id, purpose_token).await?,
        };

        let field = FieldDefinition::new(
            input.field_key.trim(),
            input.label,
            input.control,
            FieldDefinitionInput {
                description: input.description,
                placeholder: input.placeholder,
                is_required: input.is_required,
                is_active: input.is_active,
                sort_order,
                validation_rules: input.validation_rules,
                options,
                external_mappings: input.external_mappings,
                conditions: input.conditions,
            },
        )?;

        self.repository
            .save_field(tenant_id, purpose_token, field.clone())
            .await?;

        Ok(field)
    }

    /// Lists a form's field definitions ascending by sort order.
    pub async fn list_fields(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
    ) -> AppResult<Vec<FieldDefinition>> {
        self.find_form(tenant_id, purpose_token).await?;
        self.repository.list_fields(tenant_id, purpose_token).await
    }

    /// Looks up a field definition by key.
    pub async fn find_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
    ) -> AppResult<FieldDefinition> {
        self.find_form(tenant_id, purpose_token).await?;
        self.repository
            .find_field(tenant_id, purpose_token, field_key)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "field '{field_key}' was not found on form '{purpose_token}'"
                ))
            })
    }

    /// Replaces a field definition, keeping its key.
    pub async fn update_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
        input: UpdateFieldInput,
    ) -> AppResult<FieldDefinition> {
        let existing = self.find_field(tenant_id, purpose_token, field_key).await?;

        let kind = input.control.kind();
        if !self.registry.supports(kind) {
            return Err(AppError::Validation(format!(
                "unsupported input type '{}'",
                kind.as_str()
            )));
        }

        let field = FieldDefinition::new(
            existing.field_key().as_str(),
            input.label,
            input.control,
            FieldDefinitionInput {
                description: input.description,
                placeholder: input.placeholder,
                is_required: input.is_required,
                is_active: input.is_active,
                sort_order: input.sort_order.unwrap_or(existing.sort_order()),
                validation_rules: input.validation_rules,
                options: input.options,
                external_mappings: input.external_mappings,
                conditions: input.conditions,
            },
        )?;

        self.repository
            .update_field(tenant_id, purpose_token, field.clone())
            .await?;

        Ok(field)
    }

    /// Deletes a field definition.
    pub async fn delete_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
    ) -> AppResult<()> {
        self.find_form(tenant_id, purpose_token).await?;
        self.repository
            .delete_field(tenant_id, purpose_token, field_key)
            .await
    }

    /// Renders a form's active fields against live values.
    ///
    /// The form must exist and be active; inactive forms never render.
    pub async fn render_form(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        values: &Map<String, Value>,
    ) -> AppResult<Vec<RenderedWidget>> {
        let form = self.find_form(tenant_id, purpose_token).await?;
        if !form.is_active() {
            return Err(AppError::Validation(format!(
                "form '{purpose_token}' is not active"
            )));
        }

        let fields = self.repository.list_fields(tenant_id, purpose_token).await?;
        Ok(render::render_form(&fields, values))
    }

    /// Returns `(kind, label)` choices for admin field-type dropdowns.
    #[must_use]
    pub fn field_type_options(&self) -> Vec<(FieldKind, String)> {
        self.registry.admin_options()
    }

    fn require_purpose_allowed(&self, purpose_token: &str) -> AppResult<()> {
        if self.allowed_purpose_tokens.is_empty()
            || self
                .allowed_purpose_tokens
                .iter()
                .any(|allowed| allowed == purpose_token)
        {
            return Ok(());
        }

        Err(AppError::Validation(format!(
            "purpose token '{purpose_token}' is not on the configured allow-list"
        )))
    }

    async fn next_sort_order(&self, tenant_id: TenantId, purpose_token: &str) -> AppResult<i32> {
        let fields = self.repository.list_fields(tenant_id, purpose_token).await?;
        Ok(fields
            .iter()
            .map(FieldDefinition::sort_order)
            .max()
            .unwrap_or(0)
            + 1)
    }
}

fn expand_quick_options(quick_options: Option<&str>) -> AppResult<Vec<FieldOption>> {
    let Some(text) = quick_options else {
        return Ok(Vec::new());
    };

    let mut options = Vec::new();
    let mut sort_order = 0_i32;
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let value = purpose_token_from_name(line);
        if value.is_empty() {
            return Err(AppError::Validation(format!(
                "cannot derive an option value from line '{line}'"
            )));
        }
        sort_order += 1;
        options.push(FieldOption::new(value, line, None, None, None, sort_order)?);
    }

    Ok(options)
}

#[cfg(test)]
mod tests;
