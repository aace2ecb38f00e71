use fieldkit_application::{FieldKitService, SaveFieldInput, SaveFormInput};
use fieldkit_core::{AppResult, TenantId};
use fieldkit_domain::{
    ConditionOperator, ExpectedValues, FieldControl, ValidationRules, VisibilityCondition,
};
use tracing::info;

const DEV_SEED_PURPOSE_TOKEN: &str = "customer_registration";
const DEV_SEED_FORM_NAME: &str = "Customer Registration";

/// Seeds a demo registration form so a fresh dev server has something to
/// render.
pub async fn run(service: &FieldKitService, tenant_id: TenantId) -> AppResult<()> {
    let form = service
        .create_form(
            tenant_id,
            SaveFormInput {
                purpose_token: Some(DEV_SEED_PURPOSE_TOKEN.to_owned()),
                name: DEV_SEED_FORM_NAME.to_owned(),
                description: Some(
                    "Collects company details during customer sign-up.".to_owned(),
                ),
                is_active: true,
                priority: 10,
            },
        )
        .await?;

    let purpose_token = form.purpose_token().as_str();

    service
        .save_field(
            tenant_id,
            purpose_token,
            SaveFieldInput {
                field_key: "customer_type".to_owned(),
                control: FieldControl::Select { searchable: false },
                label: "Customer Type".to_owned(),
                description: Some("Drives which detail fields appear below.".to_owned()),
                placeholder: None,
                is_required: true,
                is_active: true,
                sort_order: None,
                validation_rules: ValidationRules::parse("required"),
                options: Vec::new(),
                quick_options: Some("Business\nIndividual\nNon Profit".to_owned()),
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .await?;

    service
        .save_field(
            tenant_id,
            purpose_token,
            SaveFieldInput {
                field_key: "company_name".to_owned(),
                control: FieldControl::Text {
                    max_length: Some(120),
                },
                label: "Company Name".to_owned(),
                description: None,
                placeholder: Some("ACME Ltd".to_owned()),
                is_required: true,
                is_active: true,
                sort_order: None,
                validation_rules: ValidationRules::parse("required|max:120"),
                options: Vec::new(),
                quick_options: None,
                external_mappings: Vec::new(),
                conditions: vec![VisibilityCondition::new(
                    "customer_type",
                    ConditionOperator::In,
                    ExpectedValues::parse("business,non_profit"),
                )?],
            },
        )
        .await?;

    service
        .save_field(
            tenant_id,
            purpose_token,
            SaveFieldInput {
                field_key: "vat_number".to_owned(),
                control: FieldControl::Text {
                    max_length: Some(32),
                },
                label: "VAT Number".to_owned(),
                description: Some("Required for business customers only.".to_owned()),
                placeholder: None,
                is_required: false,
                is_active: true,
                sort_order: None,
                validation_rules: ValidationRules::default(),
                options: Vec::new(),
                quick_options: None,
                external_mappings: Vec::new(),
                conditions: vec![VisibilityCondition::new(
                    "customer_type",
                    ConditionOperator::Equals,
                    ExpectedValues::parse("business"),
                )?],
            },
        )
        .await?;

    service
        .save_field(
            tenant_id,
            purpose_token,
            SaveFieldInput {
                field_key: "employee_count".to_owned(),
                control: FieldControl::Number {
                    min: Some(1.0),
                    max: None,
                    step: Some(1.0),
                },
                label: "Employee Count".to_owned(),
                description: None,
                placeholder: None,
                is_required: false,
                is_active: true,
                sort_order: None,
                validation_rules: ValidationRules::default(),
                options: Vec::new(),
                quick_options: None,
                external_mappings: Vec::new(),
                conditions: vec![VisibilityCondition::new(
                    "customer_type",
                    ConditionOperator::NotEquals,
                    ExpectedValues::parse("individual"),
                )?],
            },
        )
        .await?;

    service
        .save_field(
            tenant_id,
            purpose_token,
            SaveFieldInput {
                field_key: "contact_email".to_owned(),
                control: FieldControl::Email {
                    autocomplete: Some("email".to_owned()),
                },
                label: "Contact Email".to_owned(),
                description: None,
                placeholder: Some("you@example.com".to_owned()),
                is_required: true,
                is_active: true,
                sort_order: None,
                validation_rules: ValidationRules::parse("required|email"),
                options: Vec::new(),
                quick_options: None,
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .await?;

    service
        .save_field(
            tenant_id,
            purpose_token,
            SaveFieldInput {
                field_key: "notes".to_owned(),
                control: FieldControl::Textarea {
                    rows: Some(4),
                    max_length: Some(2000),
                },
                label: "Notes".to_owned(),
                description: Some("Anything else we should know.".to_owned()),
                placeholder: None,
                is_required: false,
                is_active: true,
                sort_order: None,
                validation_rules: ValidationRules::default(),
                options: Vec::new(),
                quick_options: None,
                external_mappings: Vec::new(),
                conditions: Vec::new(),
            },
        )
        .await?;

    service
        .save_field(
            tenant_id,
            purpose_token,
            SaveFieldInput {
                field_key: "subscribe".to_owned(),
                control: FieldControl::Checkbox { inline: true },
                label: "Subscribe to product updates".to_owned(),
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
            },
        )
        .await?;

    info!(
        %tenant_id,
        purpose_token = DEV_SEED_PURPOSE_TOKEN,
        "development form seed completed"
    );

    Ok(())
}
