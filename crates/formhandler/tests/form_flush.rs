//! The flush lifecycle with several fields.

mod common;
use common::*;

use formhandler::fields::{
    checkbox_field, date_field, email_field, multiple_select_field, radio_field, select_field,
    switch_field,
};
use formhandler::widgets::CHECKED_VALUE;
use formhandler::{Field, FieldValue, Form, FormConfig, Submission};

fn status_list() -> Vec<(&'static str, &'static str)> {
    vec![
        ("to_be_processed", "To be processed"),
        ("in_process", "In process"),
        ("0", "Finished"),
    ]
}

#[test]
fn select_defaults_are_rendered_selected() {
    let mut form = Form::new("status");
    for (key, label) in status_list() {
        form.add_field(
            Field::select(format!("status_{key}"), label)
                .default_value(key)
                .options(status_list()),
        )
        .unwrap();
    }

    let html = form.flush(&Submission::new()).unwrap();
    assert!(!form.is_submitted());
    assert_eq!(html.matches(" selected").count(), 3);
    assert!(html.contains(r#"<option value="0" selected>Finished</option>"#));
    assert_eq!(
        form.value("status_in_process"),
        Some(&FieldValue::from("in_process"))
    );
}

#[test]
fn submitted_values_replace_defaults() {
    let mut form = Form::new(FORM);
    form.add_field(select_field("status", "Status", status_list(), true).default_value("0"))
        .unwrap();

    let html = form
        .flush(&submitted().with("status", "in_process"))
        .unwrap();
    assert!(form.is_processed());
    assert!(html.contains(r#"value="in_process" selected"#));
    assert!(!html.contains(r#"value="0" selected"#));
}

#[test]
fn missing_required_select_is_reported() {
    let mut form = Form::new(FORM);
    form.add_field(select_field("status", "Status", status_list(), true).default_value("0"))
        .unwrap();

    form.flush(&submitted()).unwrap();
    assert!(!form.is_processed());
    assert_eq!(form.value("status"), Some(&FieldValue::Null));
    assert_eq!(
        form.errors().get("status"),
        Some(&vec!["This field is required.".to_string()])
    );
}

#[test]
fn multiple_select_from_urlencoded_body() {
    let mut form = Form::new(FORM);
    form.add_field(multiple_select_field("tags", "Tags", status_list(), true))
        .unwrap();

    let body = format!("{FORM}_submit=1&tags%5B%5D=0&tags%5B%5D=in_process");
    let html = form
        .flush(&Submission::from_urlencoded(&body).unwrap())
        .unwrap();
    assert!(form.is_processed());
    assert_eq!(form.value("tags"), Some(&list(&["0", "in_process"])));
    assert!(html.contains(r#"name="tags[]""#));
    assert_eq!(html.matches(" selected").count(), 2);
}

#[test]
fn other_forms_submissions_are_ignored() {
    let mut form = Form::new("contact");
    form.add_field(email_field("email", "Email", true)).unwrap();

    form.flush(&Submission::new().with("newsletter_submit", "1").with("email", "x"))
        .unwrap();
    assert!(!form.is_submitted());
    assert!(form.errors().is_empty());
    assert_eq!(form.value("email"), Some(&FieldValue::Null));
}

#[test]
fn config_changes_marker_and_labels() {
    let config = FormConfig::from_json(
        r#"{
            "submit_suffix": "__sent",
            "submit_label": "Send",
            "required_marker": " (required)"
        }"#,
    )
    .unwrap();
    let mut form = Form::with_config("contact", config);
    form.add_field(date_field("day", "Day", true)).unwrap();

    let html = form
        .flush(&Submission::new().with("contact__sent", "1").with("day", "1 June 2024"))
        .unwrap();
    assert!(form.is_processed());
    assert!(html.contains("Day (required)"));
    assert!(html.contains("Send"));
    assert!(html.contains(r#"name="contact__sent""#));
}

#[test]
fn rendered_values_are_escaped() {
    let mut form = Form::new(FORM);
    form.add_field(email_field("email", "Email", true)).unwrap();

    let html = form
        .flush(&submitted().with("email", "\"><script>alert(1)</script>"))
        .unwrap();
    assert!(!form.is_processed());
    assert!(!html.contains("<script>"));
}

fn preferences_form() -> Form {
    let mut form = Form::new(FORM);
    form.add_field(checkbox_field("terms", "I accept the terms", true))
        .unwrap();
    form.add_field(switch_field("newsletter", "Newsletter", false).default_value(CHECKED_VALUE))
        .unwrap();
    form.add_field(radio_field("size", "Size", vec![("s", "Small"), ("l", "Large")], true))
        .unwrap();
    form
}

#[test]
fn unticked_boxes_bind_null() {
    let mut form = preferences_form();
    let html = form
        .flush(&submitted().with("terms", CHECKED_VALUE).with("size", "l"))
        .unwrap();

    assert!(form.is_processed());
    assert_eq!(form.value("terms"), Some(&FieldValue::from("on")));
    assert_eq!(form.value("newsletter"), Some(&FieldValue::Null));
    assert!(html.contains(r#"name="terms" value="on" checked"#));
    assert!(!html.contains(r#"name="newsletter" value="on" checked"#));
    assert!(html.contains(r#"value="l" checked"#));
    assert_eq!(html.matches("I accept the terms").count(), 1);
}

#[test]
fn required_box_left_unticked_is_reported() {
    let mut form = preferences_form();
    form.flush(&submitted().with("size", "s")).unwrap();

    assert!(!form.is_processed());
    assert_eq!(
        form.errors().get("terms"),
        Some(&vec!["This box must be ticked.".to_string()])
    );
}

#[test]
fn checkbox_defaults_render_ticked() {
    let mut form = preferences_form();
    let html = form.flush(&Submission::new()).unwrap();
    assert!(html.contains(r#"name="newsletter" value="on" checked"#));
    assert!(!html.contains(r#"name="terms" value="on" checked"#));
}
