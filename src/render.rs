//! Filtered text rendering of a BFHL response.

use serde_json::Value;

use crate::api::protocol::BfhlResponse;
use crate::form::field::{Field, FilterSelection};

/// Placeholder for missing or empty values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render the selected fields of `response` as one line each.
///
/// Lines come out in fixed field order no matter the order of `filters`.
/// An absent response renders as the empty string.
pub fn render(response: Option<&BfhlResponse>, filters: &FilterSelection) -> String {
    let Some(response) = response else {
        return String::new();
    };

    let mut out = String::new();
    for field in Field::ALL {
        if filters.contains(field) {
            out.push_str(field.label());
            out.push_str(": ");
            out.push_str(&field_value(response, field));
            out.push('\n');
        }
    }
    out
}

/// Format a single field's value.
pub fn field_value(response: &BfhlResponse, field: Field) -> String {
    match field {
        Field::IsSuccess => display(&response.is_success),
        Field::UserId => scalar(response.user_id.as_ref()),
        Field::Email => scalar(response.email.as_ref()),
        Field::RollNumber => scalar(response.roll_number.as_ref()),
        Field::Numbers => list(response.numbers.as_deref()),
        Field::Alphabets => list(response.alphabets.as_deref()),
        Field::HighestAlphabet => list(response.highest_alphabet.as_deref()),
    }
}

/// Strings print bare, everything else as compact JSON.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Null, `false`, `0` and `""` count as missing.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn scalar(value: Option<&Value>) -> String {
    match value {
        Some(v) if !is_blank(v) => display(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

// Absent and empty arrays both print the placeholder.
fn list(values: Option<&[Value]>) -> String {
    match values {
        Some(items) if !items.is_empty() => {
            items.iter().map(display).collect::<Vec<_>>().join(", ")
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> BfhlResponse {
        BfhlResponse {
            is_success: json!(true),
            user_id: Some(json!("john_doe_17091999")),
            email: Some(json!("john@xyz.com")),
            roll_number: Some(json!("ABCD123")),
            numbers: Some(vec![json!("1"), json!("334"), json!("4")]),
            alphabets: Some(vec![json!("M"), json!("B")]),
            highest_alphabet: Some(vec![json!("M")]),
        }
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let response = BfhlResponse {
            is_success: json!(true),
            numbers: Some(vec![]),
            alphabets: Some(vec![json!("A"), json!("B")]),
            ..Default::default()
        };
        let filters = FilterSelection::parse(["numbers", "alphabets"]).unwrap();
        assert_eq!(
            render(Some(&response), &filters),
            "Numbers: N/A\nAlphabets: A, B\n"
        );
    }

    #[test]
    fn empty_filters_render_nothing() {
        assert_eq!(render(Some(&sample()), &FilterSelection::new()), "");
    }

    #[test]
    fn absent_response_renders_nothing() {
        assert_eq!(render(None, &FilterSelection::all()), "");
    }

    #[test]
    fn all_fields_render_in_fixed_order() {
        let filters =
            FilterSelection::parse(["highest_alphabet", "is_success", "email"]).unwrap();
        assert_eq!(
            render(Some(&sample()), &filters),
            "Is Success: true\nEmail: john@xyz.com\nHighest Alphabet: M\n"
        );

        let full = render(Some(&sample()), &FilterSelection::all());
        assert_eq!(
            full,
            "Is Success: true\n\
             User ID: john_doe_17091999\n\
             Email: john@xyz.com\n\
             Roll Number: ABCD123\n\
             Numbers: 1, 334, 4\n\
             Alphabets: M, B\n\
             Highest Alphabet: M\n"
        );
    }

    #[test]
    fn missing_fields_render_placeholder() {
        let response = BfhlResponse::default();
        let out = render(Some(&response), &FilterSelection::all());
        assert_eq!(
            out,
            "Is Success: null\n\
             User ID: N/A\n\
             Email: N/A\n\
             Roll Number: N/A\n\
             Numbers: N/A\n\
             Alphabets: N/A\n\
             Highest Alphabet: N/A\n"
        );
    }

    #[test]
    fn empty_string_scalar_renders_placeholder() {
        let response = BfhlResponse {
            email: Some(json!("")),
            ..Default::default()
        };
        assert_eq!(field_value(&response, Field::Email), NOT_AVAILABLE);
    }

    #[test]
    fn non_string_values_render_as_json() {
        let response = BfhlResponse {
            is_success: Value::Null,
            user_id: Some(Value::Null),
            email: Some(json!(false)),
            roll_number: Some(json!(12345)),
            numbers: Some(vec![json!(1), json!(334)]),
            alphabets: Some(vec![json!("A"), json!(null)]),
            ..Default::default()
        };
        let filters = FilterSelection::parse([
            "is_success",
            "user_id",
            "email",
            "roll_number",
            "numbers",
            "alphabets",
        ])
        .unwrap();
        assert_eq!(
            render(Some(&response), &filters),
            "Is Success: null\n\
             User ID: N/A\n\
             Email: N/A\n\
             Roll Number: 12345\n\
             Numbers: 1, 334\n\
             Alphabets: A, null\n"
        );
    }

    #[test]
    fn zero_scalar_renders_placeholder() {
        let response = BfhlResponse {
            roll_number: Some(json!(0)),
            ..Default::default()
        };
        assert_eq!(field_value(&response, Field::RollNumber), NOT_AVAILABLE);
    }
}
