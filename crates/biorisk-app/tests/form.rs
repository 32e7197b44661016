use std::collections::BTreeMap;

use biorisk_app::form::{FieldError, parse_fields, parse_number};
use biorisk_core::models::field::FieldSpec;

fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn comma_decimal_separator_is_accepted() {
    assert_eq!(parse_number("12,5"), Ok(12.5));
    assert_eq!(parse_number("  36.8 "), Ok(36.8));
    assert_eq!(parse_number("1"), Ok(1.0));
}

#[test]
fn blank_and_garbage_are_rejected() {
    assert_eq!(parse_number(""), Err(FieldError::Empty));
    assert_eq!(parse_number("   "), Err(FieldError::Empty));
    assert_eq!(parse_number("abc"), Err(FieldError::NotANumber));
    assert_eq!(parse_number("1,2,3"), Err(FieldError::NotANumber));
    assert_eq!(parse_number("inf"), Err(FieldError::NotANumber));
    assert_eq!(parse_number("NaN"), Err(FieldError::NotANumber));
}

#[test]
fn all_field_errors_are_collected_in_field_order() {
    let fields = vec![
        FieldSpec::new("Age", "age"),
        FieldSpec::new("Tyrosine", "tyrosine"),
        FieldSpec::new("NO", "no_level"),
    ];
    let err = parse_fields(&fields, &raw(&[("tyrosine", "x"), ("no_level", "40")])).unwrap_err();

    assert_eq!(
        err.errors,
        vec![
            ("age".to_string(), FieldError::Empty),
            ("tyrosine".to_string(), FieldError::NotANumber),
        ]
    );
    assert_eq!(err.first_key(), Some("age"));
}

#[test]
fn parsed_inputs_only_contain_declared_fields() {
    let fields = vec![FieldSpec::new("Age", "age")];
    let inputs = parse_fields(&fields, &raw(&[("age", "30"), ("other", "1")])).unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs.get("age"), Some(30.0));
}
