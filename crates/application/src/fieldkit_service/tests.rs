use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use fieldkit_core::{AppError, AppResult, TenantId};
use fieldkit_domain::{
    ConditionOperator, ExpectedValues, FieldControl, FieldDefinition, FieldKind, FieldOption,
    FormDefinition, ValidationRules, VisibilityCondition,
};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::{
    DefinitionRepository, InputTypeRegistry, SaveFieldInput, SaveFormInput, UpdateFieldInput,
    UpdateFormInput,
};

use super::FieldKitService;

struct FakeRepository {
    forms: Mutex<HashMap<(TenantId, String), FormDefinition>>,
    fields: Mutex<HashMap<(TenantId, String, String), FieldDefinition>>,
}

impl FakeRepository {
    fn new() -> Self {
        Self {
            forms: Mutex::new(HashMap::new()),
            fields: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DefinitionRepository for FakeRepository {
    async fn save_form(&self, tenant_id: TenantId, form: FormDefinition) -> AppResult<()> {
        let key = (tenant_id, form.purpose_token().as_str().to_owned());
        let mut forms = self.forms.lock().await;

        if forms.contains_key(&key) {
            return Err(AppError::Conflict(format!("form '{}' already exists", key.1)));
        }

        forms.insert(key, form);
        Ok(())
    }

    async fn list_forms(&self, tenant_id: TenantId) -> AppResult<Vec<FormDefinition>> {
        let forms = self.forms.lock().await;
        let mut listed: Vec<FormDefinition> = forms
            .iter()
            .filter_map(|((stored_tenant_id, _), form)| {
                (stored_tenant_id == &tenant_id).then_some(form.clone())
            })
            .collect();
        listed.sort_by(|left, right| {
            left.priority().cmp(&right.priority()).then_with(|| {
                left.purpose_token()
                    .as_str()
                    .cmp(right.purpose_token().as_str())
            })
        });
        Ok(listed)
    }

    async fn find_form(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
    ) -> AppResult<Option<FormDefinition>> {
        Ok(self
            .forms
            .lock()
            .await
            .get(&(tenant_id, purpose_token.to_owned()))
            .cloned())
    }

    async fn update_form(&self, tenant_id: TenantId, form: FormDefinition) -> AppResult<()> {
        let key = (tenant_id, form.purpose_token().as_str().to_owned());
        let mut forms = self.forms.lock().await;

        if !forms.contains_key(&key) {
            return Err(AppError::NotFound(format!("form '{}' was not found", key.1)));
        }

        forms.insert(key, form);
        Ok(())
    }

    async fn delete_form(&self, tenant_id: TenantId, purpose_token: &str) -> AppResult<()> {
        let removed = self
            .forms
            .lock()
            .await
            .remove(&(tenant_id, purpose_token.to_owned()));
        if removed.is_none() {
            return Err(AppError::NotFound(format!("form '{purpose_token}' was not found")));
        }

        self.fields.lock().await.retain(|(stored_tenant_id, stored_token, _), _| {
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
        let mut fields = self.fields.lock().await;

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
        let fields = self.fields.lock().await;
        let mut listed: Vec<FieldDefinition> = fields
            .iter()
            .filter_map(|((stored_tenant_id, stored_token, _), field)| {
                (stored_tenant_id == &tenant_id && stored_token == purpose_token)
                    .then_some(field.clone())
            })
            .collect();
        listed.sort_by(|left, right| {
            left.sort_order()
                .cmp(&right.sort_order())
                .then_with(|| left.field_key().as_str().cmp(right.field_key().as_str()))
        });
        Ok(listed)
    }

    async fn find_field(
        &self,
        tenant_id: TenantId,
        purpose_token: &str,
        field_key: &str,
    ) -> AppResult<Option<FieldDefinition>> {
        Ok(self
            .fields
            .lock()
            .await
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
        let mut fields = self.fields.lock().await;

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
        let removed = self.fields.lock().await.remove(&(
            tenant_id,
            purpose_token.to_owned(),
            field_key.to_owned(),
        ));
        if removed.is_none() {
            return Err(AppError::NotFound(format!(
                "field '{field_key}' was not found on form '{purpose_token}'"
            )));
        }
        Ok(())
    }
}

fn service() -> FieldKitService {
    FieldKitService::new(
        Arc::new(FakeRepository::new()),
        InputTypeRegistry::standard(),
        Vec::new(),
    )
}

fn form_input(name: &str) -> SaveFormInput {
    SaveFormInput {
        purpose_token: None,
        name: name.to_owned(),
        description: None,
        is_active: true,
        priority: 10,
    }
}

fn text_field_input(field_key: &str) -> SaveFieldInput {
    SaveFieldInput {
        field_key: field_key.to_owned(),
        control: FieldControl::Text { max_length: None },
        label: field_key.to_uppercase(),
        description: None,
        placeholder: None,
        is_required: false,
        is_active: true,
        sort_order: None,
        validation_rules: ValidationRules::default(),
        options: Vec::new(),
        quick_options: None,
        external_mappings: Vec::new(),
        conditions: Vec::new(),
    }
}

#[tokio::test]
async fn create_form_derives_token_from_name() {
    let service = service();
    let tenant_id = TenantId::new();

    let form = service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(form.purpose_token().as_str(), "customer_registration");
}

#[tokio::test]
async fn create_form_prefers_the_explicit_token() {
    let service = service();
    let tenant_id = TenantId::new();

    let mut input = form_input("Customer Registration");
    input.purpose_token = Some("  vip_intake  ".to_owned());
    let form = service
        .create_form(tenant_id, input)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(form.purpose_token().as_str(), "vip_intake");
}

#[tokio::test]
async fn create_form_conflicts_on_duplicate_token() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let duplicate = service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await;

    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn create_form_enforces_the_allow_list() {
    let service = FieldKitService::new(
        Arc::new(FakeRepository::new()),
        InputTypeRegistry::standard(),
        vec!["customer_registration".to_owned()],
    );
    let tenant_id = TenantId::new();

    let rejected = service.create_form(tenant_id, form_input("Vendor Intake")).await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));

    let allowed = service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await;
    assert!(allowed.is_ok());
}

#[tokio::test]
async fn update_form_keeps_the_purpose_token() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let updated = service
        .update_form(
            tenant_id,
            "customer_registration",
            UpdateFormInput {
                name: "Customer Intake".to_owned(),
                description: Some("Renamed".to_owned()),
                is_active: false,
                priority: 5,
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(updated.purpose_token().as_str(), "customer_registration");
    assert_eq!(updated.name().as_str(), "Customer Intake");
    assert!(!updated.is_active());
    assert_eq!(updated.priority(), 5);
}

#[tokio::test]
async fn update_form_requires_an_existing_form() {
    let service = service();

    let result = service
        .update_form(
            TenantId::new(),
            "missing",
            UpdateFormInput {
                name: "Missing".to_owned(),
                description: None,
                is_active: true,
                priority: 10,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn save_field_requires_an_existing_form() {
    let service = service();

    let result = service
        .save_field(TenantId::new(), "missing", text_field_input("company"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn save_field_rejects_unregistered_kinds() {
    let service = FieldKitService::new(
        Arc::new(FakeRepository::new()),
        InputTypeRegistry::empty(),
        Vec::new(),
    );
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let result = service
        .save_field(tenant_id, "customer_registration", text_field_input("company"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn save_field_appends_after_the_last_sibling() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let first = service
        .save_field(tenant_id, "customer_registration", text_field_input("company"))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(first.sort_order(), 1);

    let mut pinned = text_field_input("country");
    pinned.sort_order = Some(7);
    service
        .save_field(tenant_id, "customer_registration", pinned)
        .await
        .unwrap_or_else(|_| unreachable!());

    let appended = service
        .save_field(tenant_id, "customer_registration", text_field_input("note"))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(appended.sort_order(), 8);
}

#[tokio::test]
async fn save_field_conflicts_on_duplicate_key() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());
    service
        .save_field(tenant_id, "customer_registration", text_field_input("company"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let duplicate = service
        .save_field(tenant_id, "customer_registration", text_field_input("company"))
        .await;

    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn quick_options_expand_into_choices() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let mut input = text_field_input("customer_type");
    input.control = FieldControl::Select { searchable: false };
    input.quick_options = Some("VIP Tier\n\n  Standard  \nTrial Account".to_owned());
    let field = service
        .save_field(tenant_id, "customer_registration", input)
        .await
        .unwrap_or_else(|_| unreachable!());

    let values: Vec<&str> = field
        .options()
        .iter()
        .map(|option| option.value().as_str())
        .collect();
    assert_eq!(values, ["vip_tier", "standard", "trial_account"]);
    assert_eq!(field.options()[0].label().as_str(), "VIP Tier");
    assert_eq!(field.options()[2].sort_order(), 3);
}

#[tokio::test]
async fn explicit_options_win_over_quick_options() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let mut input = text_field_input("customer_type");
    input.control = FieldControl::Select { searchable: false };
    input.options = vec![
        FieldOption::new("business", "Business", None, None, None, 1)
            .unwrap_or_else(|_| unreachable!()),
    ];
    input.quick_options = Some("Ignored".to_owned());
    let field = service
        .save_field(tenant_id, "customer_registration", input)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(field.options().len(), 1);
    assert_eq!(field.options()[0].value().as_str(), "business");
}

#[tokio::test]
async fn update_field_keeps_position_when_sort_order_is_omitted() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let mut input = text_field_input("company");
    input.sort_order = Some(4);
    service
        .save_field(tenant_id, "customer_registration", input)
        .await
        .unwrap_or_else(|_| unreachable!());

    let updated = service
        .update_field(
            tenant_id,
            "customer_registration",
            "company",
            UpdateFieldInput {
                control: FieldControl::Text {
                    max_length: Some(120),
                },
                label: "Company Name".to_owned(),
                description: None,
                placeholder: None,
                is_required: true,
                is_active: true,
                sort_order: None,
                validation_rules: ValidationRules::parse("required|max:120"),
                options: Vec::new(),
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(updated.sort_order(), 4);
    assert!(updated.is_required());
    assert_eq!(updated.validation_rules().rules(), ["required", "max:120"]);
}

#[tokio::test]
async fn delete_field_reports_missing_fields() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let result = service
        .delete_field(tenant_id, "customer_registration", "missing")
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn tenants_do_not_see_each_other() {
    let service = service();
    let first_tenant = TenantId::new();
    let second_tenant = TenantId::new();

    service
        .create_form(first_tenant, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let listed = service
        .list_forms(second_tenant)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(listed.is_empty());

    let lookup = service.find_form(second_tenant, "customer_registration").await;
    assert!(matches!(lookup, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn render_form_evaluates_visibility_against_values() {
    let service = service();
    let tenant_id = TenantId::new();

    service
        .create_form(tenant_id, form_input("Customer Registration"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let mut controller = text_field_input("customer_type");
    controller.control = FieldControl::Select { searchable: false };
    controller.quick_options = Some("Business\nIndividual".to_owned());
    service
        .save_field(tenant_id, "customer_registration", controller)
        .await
        .unwrap_or_else(|_| unreachable!());

    let mut dependent = text_field_input("vat_number");
    dependent.conditions = vec![
        VisibilityCondition::new(
            "customer_type",
            ConditionOperator::Equals,
            ExpectedValues::parse("business"),
        )
        .unwrap_or_else(|_| unreachable!()),
    ];
    service
        .save_field(tenant_id, "customer_registration", dependent)
        .await
        .unwrap_or_else(|_| unreachable!());

    let untouched = service
        .render_form(tenant_id, "customer_registration", &Map::new())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(untouched.len(), 2);
    assert!(untouched[0].widget().reactive());
    assert!(untouched[0].visible());
    assert!(!untouched[1].visible());

    let mut values = Map::new();
    values.insert("customer_type".to_owned(), Value::from("business"));
    let chosen = service
        .render_form(tenant_id, "customer_registration", &values)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(chosen[1].visible());
}

#[tokio::test]
async fn render_form_rejects_inactive_forms() {
    let service = service();
    let tenant_id = TenantId::new();

    let mut input = form_input("Customer Registration");
    input.is_active = false;
    service
        .create_form(tenant_id, input)
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = service
        .render_form(tenant_id, "customer_registration", &Map::new())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn field_type_options_list_registered_kinds_in_order() {
    let service = service();

    let options = service.field_type_options();
    assert_eq!(options.len(), 7);
    assert_eq!(options[0], (FieldKind::Text, "Text Input".to_owned()));
    assert_eq!(options[4], (FieldKind::Select, "Select Dropdown".to_owned()));
}
