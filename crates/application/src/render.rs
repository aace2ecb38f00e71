//! Form rendering over stored field definitions.

use fieldkit_domain::{FieldDefinition, RenderedWidget, WidgetDescription};
use serde_json::{Map, Value};

use crate::visibility;

/// Renders active definitions into widgets with evaluated visibility.
///
/// Output is ordered ascending by sort order with ties broken on field
/// key. Inactive definitions never render, and their conditions play no
/// part in reactivity either.
#[must_use]
pub fn render_form(
    definitions: &[FieldDefinition],
    values: &Map<String, Value>,
) -> Vec<RenderedWidget> {
    let mut active: Vec<&FieldDefinition> = definitions
        .iter()
        .filter(|definition| definition.is_active())
        .collect();
    active.sort_by(|left, right| {
        left.sort_order()
            .cmp(&right.sort_order())
            .then_with(|| left.field_key().as_str().cmp(right.field_key().as_str()))
    });

    active
        .iter()
        .map(|definition| {
            let reactive = active
                .iter()
                .any(|other| other.references(definition.field_key().as_str()));
            let visible = visibility::should_display_in(definition.conditions(), values);
            RenderedWidget::new(WidgetDescription::describe(definition, reactive), visible)
        })
        .collect()
}

/// Returns whether any definition's conditions watch the given field.
///
/// UIs mark such fields reactive so dependents re-render when they change.
#[must_use]
pub fn is_dependency(field_key: &str, definitions: &[FieldDefinition]) -> bool {
    definitions
        .iter()
        .any(|definition| definition.references(field_key))
}
