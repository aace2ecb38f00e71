//! Conditional-visibility evaluation for dependent fields.
//!
//! A field's conditions watch other fields' live values. The same rules run
//! server-side here and client-side in admin previews, so the normalization
//! story is deliberately small: everything compares as text.

use fieldkit_domain::{ConditionOperator, VisibilityCondition};
use serde_json::{Map, Value};

/// Decides whether a field with the given conditions should display.
///
/// Conditions combine with logical AND and short-circuit on the first
/// failure; a field with no conditions always displays. `lookup` resolves
/// the current value of a watched field and returns `None` when the field
/// has no entry at all.
pub fn should_display<'a, F>(conditions: &[VisibilityCondition], lookup: F) -> bool
where
    F: Fn(&str) -> Option<&'a Value>,
{
    conditions
        .iter()
        .all(|condition| condition_met(condition, lookup(condition.field_key().as_str())))
}

/// Evaluates conditions against a JSON object of live values.
#[must_use]
pub fn should_display_in(conditions: &[VisibilityCondition], values: &Map<String, Value>) -> bool {
    should_display(conditions, |field_key| values.get(field_key))
}

/// Evaluates one condition against the looked-up value.
///
/// Scalars normalize to comparison text first: booleans become `"true"` or
/// `"false"`, numbers their canonical rendering, strings are trimmed.
/// Absent, null, array, and object values have no comparison text; they
/// fail `in` and `equals` and satisfy `not_in` and `not_equals`, so a field
/// watching an untouched input stays hidden until the expected value
/// actually appears.
#[must_use]
pub fn condition_met(condition: &VisibilityCondition, value: Option<&Value>) -> bool {
    let expected = condition.expected();
    match comparison_text(value) {
        None => matches!(
            condition.operator(),
            ConditionOperator::NotIn | ConditionOperator::NotEquals
        ),
        Some(actual) => match condition.operator() {
            ConditionOperator::In => expected.contains(&actual),
            ConditionOperator::NotIn => !expected.contains(&actual),
            ConditionOperator::Equals => expected.first() == Some(actual.as_str()),
            ConditionOperator::NotEquals => expected.first() != Some(actual.as_str()),
        },
    }
}

fn comparison_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Bool(true) => Some("true".to_owned()),
        Value::Bool(false) => Some("false".to_owned()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.trim().to_owned()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
