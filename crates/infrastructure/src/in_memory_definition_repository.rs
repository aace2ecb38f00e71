use std::collections::HashMap;

use async_trait::async_trait;
use fieldkit_application::DefinitionRepository;
use fieldkit_core::{AppError, AppResult, TenantId};
use fieldkit_domain::{FieldDefinition, FormDefinition};
use tokio::sync::RwLock;

/// In-memory definition repository implementation.
///
/// Definitions live for the lifetime of the process; hosts that need
/// durable storage bring their own [`DefinitionRepository`].
#[derive(Debug, Default)]
pub struct InMemoryDefinitionRepository {
    forms: RwLock<HashMap<(TenantId, String), FormDefinition>>,
    fields: RwLock<HashMap<(TenantId, String, String), FieldDefinition>>,
}

impl InMemoryDefinitionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            forms: RwLock::new(HashMap::new()),
            fields: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DefinitionRepository for InMemoryDefinitionRepository {
    async fn save_form(&self, tenant_id: TenantId, form: FormDefinition) -> AppResult<()> {
        let key = (tenant_id, form.purpose_token().as_str().to_owned());
        let mut forms = self.forms.write().await;

        if forms.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "form '{}' already exists for tenant '{}'",
                key.1, key.0
            )));
        }

        forms.insert(key, form);
        Ok(())
    }

    async fn list_forms(&self, tenant_id: TenantId) -> AppResult<Vec<FormDefinition>> {
        let forms = self.forms.read().await;

        let mut values: Vec<FormDefinition> = forms
            .iter()
            .filter_map(|((stored_tenant_id, _), form)| {
                (stored_tenant_id == &tenant_id).then_some(form.clone())
            })
            .collect();
        values.sort_by(|left, right| {
            left.priority().cmp(&right.priority()).then_with(|| {
                left.purpose_token()
                    .as_str()
                    .cmp(right.purpose_token().as_str())
            })
        });

        Ok(values)
    }

    async fn find_form(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
    ) -> AppResult<Option<FormDefinition>> {
        let forms = self.forms.read().await;
        Ok(forms.get(&(tenant_id, purpose_token.to_owned())).cloned())
    }

    async fn update_form(&self, tenant_id: TenantId, form: FormDefinition) -> AppResult<()> {
        let key = (tenant_id, form.purpose_token().as_str().to_owned());
        let mut forms = self.forms.write().await;

        if !forms.contains_key(&key) {
            return Err(AppError::NotFound(format!("form '{}' was not found", key.1)));
        }

        forms.insert(key, form);
        Ok(())
    }

    async fn delete_form(&self, tenant_id: TenantId, purpose_token: &str) -> AppResult<()> {
        let mut forms = self.forms.write().await;

        if forms.remove(&(tenant_id, purpose_token.to_owned())).is_none() {
            return Err(AppError::NotFound(format!("form '{purpose_token}' was not found")));
        }

        let mut fields = self.fields.write().await;
        fields.retain(|(stored_tenant_id, stored_token, _), _| {
            !(stored_tenant_id == &tenant_id && stored_token == purpose_token)
        });

        Ok(())
    }

    async fn save_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field: FieldDefinition,
    ) -> AppResult<()> {
        let key = (
            tenant_id,
            purpose_token.to_owned(),
            field.field_key().as_str().to_owned(),
        );
        let mut fields = self.fields.write().await;

        if fields.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "field '{}' already exists on form '{purpose_token}'",
                key.2
            )));
        }

        fields.insert(key, field);
        Ok(())
    }

    async fn list_fields(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
    ) -> AppResult<Vec<FieldDefinition>> {
        let fields = self.fields.read().await;

        let mut values: Vec<FieldDefinition> = fields
            .iter()
            .filter_map(|((stored_tenant_id, stored_token, _), field)| {
                (stored_tenant_id == &tenant_id && stored_token == purpose_token)
                    .then_some(field.clone())
            })
            .collect();
        values.sort_by(|left, right| {
            left.sort_order()
                .cmp(&right.sort_order())
                .then_with(|| left.field_key().as_str().cmp(right.field_key().as_str()))
        });

        Ok(values)
    }

    async fn find_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
    ) -> AppResult<Option<FieldDefinition>> {
        let fields = self.fields.read().await;
        Ok(fields
            .get(&(tenant_id, purpose_token.to_owned(), field_key.to_owned()))
            .cloned())
    }

    async fn update_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field: FieldDefinition,
    ) -> AppResult<()> {
        let key = (
            tenant_id,
            purpose_token.to_owned(),
            field.field_key().as_str().to_owned(),
        );
        let mut fields = self.fields.write().await;

        if !fields.contains_key(&key) {
            return Err(AppError::NotFound(format!(
                "field '{}' was not found on form '{purpose_token}'",
                key.2
            )));
        }

        fields.insert(key, field);
        Ok(())
    }

    async fn delete_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
    ) -> AppResult<()> {
        let mut fields = self.fields.write().await;

        if fields
            .remove(&(tenant_id, purpose_token.to_owned(), field_key.to_owned()))
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "field '{field_key}' was not found on form '{purpose_token}'"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fieldkit_application::DefinitionRepository;
    use fieldkit_core::TenantId;
    use fieldkit_domain::{
        FieldControl, FieldDefinition, FieldDefinitionInput, FormDefinition, ValidationRules,
    };

    use super::InMemoryDefinitionRepository;

    fn form(purpose_token: &str, priority: u8) -> FormDefinition {
        FormDefinition::new(
            purpose_token,
            purpose_token.to_uppercase(),
            None,
            true,
            priority,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    fn field(field_key: &str, sort_order: i32) -> FieldDefinition {
        FieldDefinition::new(
            field_key,
            field_key.to_uppercase(),
            FieldControl::Text { max_length: None },
            FieldDefinitionInput {
                description: None,
                placeholder: None,
                is_required: false,
                is_active: true,
                sort_order,
                validation_rules: ValidationRules::default(),
                options: Vec::new(),
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn lists_forms_by_priority_then_token() {
        let repository = InMemoryDefinitionRepository::new();
        let tenant_id = TenantId::new();

        for (token, priority) in [("zulu", 1), ("alpha", 5), ("bravo", 1)] {
            let saved = repository.save_form(tenant_id, form(token, priority)).await;
            assert!(saved.is_ok());
        }

        let listed = repository.list_forms(tenant_id).await.unwrap_or_default();
        let tokens: Vec<&str> = listed
            .iter()
            .map(|form| form.purpose_token().as_str())
            .collect();
        assert_eq!(tokens, ["bravo", "zulu", "alpha"]);
    }

    #[tokio::test]
    async fn forms_do_not_leak_across_tenants() {
        let repository = InMemoryDefinitionRepository::new();
        let left_tenant = TenantId::new();
        let right_tenant = TenantId::new();

        let left_saved = repository
            .save_form(left_tenant, form("customer_registration", 10))
            .await;
        assert!(left_saved.is_ok());

        let right_listed = repository.list_forms(right_tenant).await.unwrap_or_default();
        assert!(right_listed.is_empty());

        let right_found = repository
            .find_form(right_tenant, "customer_registration")
            .await;
        assert!(matches!(right_found, Ok(None)));
    }

    #[tokio::test]
    async fn duplicate_form_save_conflicts() {
        let repository = InMemoryDefinitionRepository::new();
        let tenant_id = TenantId::new();

        let first = repository
            .save_form(tenant_id, form("customer_registration", 10))
            .await;
        assert!(first.is_ok());

        let second = repository
            .save_form(tenant_id, form("customer_registration", 2))
            .await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn updating_a_missing_form_reports_not_found() {
        let repository = InMemoryDefinitionRepository::new();

        let result = repository
            .update_form(TenantId::new(), form("missing", 10))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn deleting_a_form_removes_its_fields() {
        let repository = InMemoryDefinitionRepository::new();
        let tenant_id = TenantId::new();

        let saved_form = repository
            .save_form(tenant_id, form("customer_registration", 10))
            .await;
        assert!(saved_form.is_ok());
        let saved_field = repository
            .save_field(tenant_id, "customer_registration", field("company", 1))
            .await;
        assert!(saved_field.is_ok());

        let deleted = repository
            .delete_form(tenant_id, "customer_registration")
            .await;
        assert!(deleted.is_ok());

        let remaining = repository
            .list_fields(tenant_id, "customer_registration")
            .await
            .unwrap_or_default();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn lists_fields_by_sort_order_then_key() {
        let repository = InMemoryDefinitionRepository::new();
        let tenant_id = TenantId::new();

        let saved_form = repository
            .save_form(tenant_id, form("customer_registration", 10))
            .await;
        assert!(saved_form.is_ok());

        for (key, sort_order) in [("delta", 2), ("alpha", 2), ("omega", 1)] {
            let saved = repository
                .save_field(tenant_id, "customer_registration", field(key, sort_order))
                .await;
            assert!(saved.is_ok());
        }

        let listed = repository
            .list_fields(tenant_id, "customer_registration")
            .await
            .unwrap_or_default();
        let keys: Vec<&str> = listed
            .iter()
            .map(|field| field.field_key().as_str())
            .collect();
        assert_eq!(keys, ["omega", "alpha", "delta"]);
    }

    #[tokio::test]
    async fn duplicate_field_save_conflicts() {
        let repository = InMemoryDefinitionRepository::new();
        let tenant_id = TenantId::new();

        let first = repository
            .save_field(tenant_id, "customer_registration", field("company", 1))
            .await;
        assert!(first.is_ok());

        let second = repository
            .save_field(tenant_id, "customer_registration", field("company", 2))
            .await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn deleting_a_missing_field_reports_not_found() {
        let repository = InMemoryDefinitionRepository::new();

        let result = repository
            .delete_field(TenantId::new(), "customer_registration", "missing")
            .await;
        assert!(result.is_err());
    }
}
