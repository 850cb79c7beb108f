//! Tests for the project form validators
use wm_client::validation::{
    validate_coordinate, validate_date, validate_date_with, validate_latitude, validate_text,
};
use wm_client::{FieldId, ProjectForm, ValidationPolicy};

#[test]
fn test_text_validation() {
    assert!(!validate_text(Some("  ")));
    assert!(validate_text(Some("Lake Project")));
    assert!(!validate_text(None));
}

#[test]
fn test_coordinate_validation() {
    assert!(validate_coordinate("45.5"));
    assert!(!validate_coordinate("abc"));
    assert!(validate_coordinate("-122.4194"));
    assert!(validate_coordinate("0"));
    assert!(!validate_coordinate("01"));
    assert!(!validate_coordinate("-"));
}

#[test]
fn test_coordinate_range_is_not_checked_by_default() {
    // Known limitation: 200 is not a latitude, yet it passes
    assert!(validate_coordinate("200"));
    assert!(validate_latitude("200", &ValidationPolicy::default()));
}

#[test]
fn test_date_validation_is_syntactic() {
    assert!(validate_date("2023-01-01"));
    assert!(validate_date("2023-12-31"));
    // Known limitation: no calendar check, so Feb 29 of a common year passes
    assert!(validate_date("2023-02-29"));
    assert!(validate_date("2023-02-31"));
    assert!(!validate_date("2023-2-28"));
    assert!(!validate_date("1850-01-01"));
}

#[test]
fn test_non_ascii_digits_are_rejected() {
    // Arabic-Indic and Devanagari digits are decimal digits to Unicode, not to the server
    assert!(!validate_coordinate("45.\u{0665}"));
    assert!(!validate_coordinate("-\u{0967}22.5"));
    assert!(!validate_date("19\u{0669}\u{0669}-01-01"));
    assert!(!validate_date("2023-12-3\u{0661}"));

    let form = ProjectForm {
        name: "Test".into(),
        lat: "4\u{0665}".into(),
        long: "0".into(),
        start_date: "20\u{0662}3-01-01".into(),
        end_date: "2023-12-31".into(),
    };
    let report = form.validate(&ValidationPolicy::default());
    assert_eq!(report.invalid_fields(), vec![FieldId::Lat, FieldId::StartDate]);
}

#[test]
fn test_calendar_check_is_opt_in() {
    let policy = ValidationPolicy {
        check_calendar_dates: true,
        ..ValidationPolicy::default()
    };
    assert!(!validate_date_with("2023-02-29", &policy));
    assert!(validate_date_with("2024-02-29", &policy));
    assert!(!validate_date_with("2023-04-31", &policy));
}

#[test]
fn test_form_validation_with_strict_policy() {
    let form = ProjectForm {
        name: "Test".into(),
        lat: "200".into(),
        long: "0".into(),
        start_date: "2023-01-01".into(),
        end_date: "2023-02-30".into(),
    };

    assert!(form.validate(&ValidationPolicy::default()).is_valid());

    let report = form.validate(&ValidationPolicy::strict());
    assert_eq!(report.invalid_fields(), vec![FieldId::Lat, FieldId::EndDate]);
}
