/// End-to-end form behavior: controller + real HTTP client + mock endpoint.
///
/// Covers the submit lifecycle (one request per submit, nothing sent for bad
/// input, response cleared on failure) and what the rendering shows after
/// each step.
mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use bfhl::api::BfhlClient;
use bfhl::config::{self, BfhlConfig};
use bfhl::error::ErrorKind;
use bfhl::form::FormController;
use bfhl::form::field::FilterSelection;
use common::MockEndpoint;
use serde_json::json;

const SPLIT_BODY: &str = r#"{"is_success": true, "numbers": [], "alphabets": ["A", "B"]}"#;

fn client(endpoint: &MockEndpoint) -> BfhlClient {
    BfhlClient::new(endpoint.url.clone(), Duration::from_secs(5))
}

#[test]
fn submit_sends_exactly_the_input_data() {
    let endpoint = MockEndpoint::start(200, SPLIT_BODY);
    let mut form = FormController::new();
    form.set_input(r#"{"data": ["M", "1", "334", "4", "B"], "note": "ignored"}"#);

    form.submit(&client(&endpoint)).unwrap();

    let seen = endpoint.requests();
    assert_eq!(seen.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, json!({"data": ["M", "1", "334", "4", "B"]}));
    assert_eq!(form.last_item_count(), Some(5));
}

#[test]
fn invalid_json_never_reaches_the_network() {
    let endpoint = MockEndpoint::start(200, SPLIT_BODY);
    let mut form = FormController::new();
    form.set_input("{not json");

    let err = form.submit(&client(&endpoint)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(endpoint.requests().is_empty());
    let banner = form.error().unwrap();
    assert!(!banner.message().is_empty());
    assert_eq!(banner.kind(), ErrorKind::InvalidInput);
    assert!(!form.is_loading());
}

#[test]
fn renders_selected_fields_of_response() {
    let endpoint = MockEndpoint::start(200, SPLIT_BODY);
    let mut form = FormController::new();
    form.set_input(r#"{"data": ["A", "B"]}"#);
    form.submit(&client(&endpoint)).unwrap();

    form.set_filters(FilterSelection::parse(["numbers", "alphabets"]).unwrap());
    assert_eq!(form.rendered(), "Numbers: N/A\nAlphabets: A, B\n");

    form.set_filters(FilterSelection::new());
    assert_eq!(form.rendered(), "");
}

#[test]
fn failing_submit_clears_stale_rendering() {
    let good = MockEndpoint::start(200, SPLIT_BODY);
    let bad = MockEndpoint::start(500, r#"{"message": "boom"}"#);
    let mut form = FormController::new().with_filters(FilterSelection::all());
    form.set_input(r#"{"data": ["A"]}"#);

    form.submit(&client(&good)).unwrap();
    assert!(!form.rendered().is_empty());

    let err = form.submit(&client(&bad)).unwrap_err();
    assert_eq!(err.to_string(), "API error");
    assert!(form.response().is_none());
    assert_eq!(form.rendered(), "");
    assert_eq!(form.error().map(|b| b.message()), Some("API error"));
    assert_eq!(bad.requests().len(), 1);
}

#[test]
fn loading_is_only_true_during_submit() {
    let endpoint = MockEndpoint::start(200, SPLIT_BODY);
    let mut form = FormController::new();
    form.set_input(r#"{"data": []}"#);
    assert!(!form.is_loading());

    let states = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&states);
    form.subscribe(move |view| log.borrow_mut().push(view.loading));

    form.submit(&client(&endpoint)).unwrap();
    assert!(!form.is_loading());
    assert_eq!(*states.borrow(), vec![true, false]);
}

#[test]
fn remove_filter_edits_tags() {
    let mut form =
        FormController::new().with_filters(FilterSelection::parse(["numbers", "email"]).unwrap());

    form.remove_filter("numbers");
    assert_eq!(form.filters().names(), vec!["email"]);

    form.remove_filter("x");
    assert_eq!(form.filters().names(), vec!["email"]);
}

#[test]
fn configured_form_uses_banner_timeout_and_default_filters() {
    let mut cfg = BfhlConfig::default();
    cfg.form.error_timeout_ms = 50;
    cfg.form.default_filters = vec!["alphabets".to_string()];

    let endpoint = MockEndpoint::start(200, SPLIT_BODY);
    let mut form = config::build_form(&cfg);
    form.set_input(r#"{"data": ["A", "B"]}"#);
    form.submit(&client(&endpoint)).unwrap();
    assert_eq!(form.rendered(), "Alphabets: A, B\n");

    form.set_input("oops");
    let _ = form.submit(&client(&endpoint));
    let raised = std::time::Instant::now();
    assert!(form.expire_error(raised + Duration::from_millis(100)));
    assert!(form.error().is_none());
}
