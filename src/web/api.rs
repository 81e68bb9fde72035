//! JSON API handlers for the browser form.
//!
//! Every state-changing handler answers with the recomputed
//! [`FormView`](crate::form::FormView) so the page can redraw from a single
//! source of truth.

use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analytics::logger::{self, Surface};
use crate::api::Transport;
use crate::form::FormController;
use crate::form::field::FilterSelection;

use super::Reply;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct InputRequest {
    input: String,
}

#[derive(Deserialize)]
struct FiltersRequest {
    filters: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON response with the given status.
fn json_response<T: Serialize>(data: &T, status: u16) -> Result<Reply> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Reply::json(status, body))
}

fn view_response(form: &FormController) -> Result<Reply> {
    json_response(&form.view(), 200)
}

/// `400` with an `{"error": ...}` body.
fn bad_request(message: &str) -> Result<Reply> {
    json_response(&serde_json::json!({ "error": message }), 400)
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/state`: current form view. A banner past its lifetime is
/// dismissed first.
pub fn get_state(form: &mut FormController) -> Result<Reply> {
    form.expire_error(Instant::now());
    view_response(form)
}

/// `PUT /api/input`: replace the raw input text.
///
/// Expects JSON body: `{ "input": "{\"data\": [\"A\"]}" }`
pub fn put_input(form: &mut FormController, body: &str) -> Result<Reply> {
    let Ok(req) = serde_json::from_str::<InputRequest>(body) else {
        return bad_request("expected {\"input\": string}");
    };
    form.set_input(req.input);
    view_response(form)
}

/// `POST /api/submit`: submit the current input to the endpoint.
///
/// Submit failures are part of the form state (the error banner), so this
/// answers `200` either way.
pub fn post_submit<T: Transport + ?Sized>(
    form: &mut FormController,
    transport: &T,
    log_enabled: bool,
) -> Result<Reply> {
    let start = Instant::now();
    let result = form.submit(transport);
    if log_enabled {
        logger::log_submission(
            Surface::Web,
            result.as_ref().map(|_| ()),
            form.last_item_count(),
            start.elapsed(),
        );
    }
    view_response(form)
}

/// `PUT /api/filters`: replace the filter selection.
///
/// Expects JSON body: `{ "filters": ["numbers", "alphabets"] }`
pub fn put_filters(form: &mut FormController, body: &str) -> Result<Reply> {
    let Ok(req) = serde_json::from_str::<FiltersRequest>(body) else {
        return bad_request("expected {\"filters\": [string]}");
    };
    match FilterSelection::parse(&req.filters) {
        Ok(filters) => {
            form.set_filters(filters);
            view_response(form)
        }
        Err(e) => bad_request(&e.to_string()),
    }
}

/// `DELETE /api/filters/{name}`: remove one selected filter.
pub fn delete_filter(form: &mut FormController, name: &str) -> Result<Reply> {
    form.remove_filter(name);
    view_response(form)
}

/// `POST /api/error/dismiss`: close the error banner.
pub fn post_dismiss_error(form: &mut FormController) -> Result<Reply> {
    form.dismiss_error();
    view_response(form)
}

/// `GET /api/fields`: the selectable fields.
pub fn get_fields(form: &FormController) -> Result<Reply> {
    json_response(&form.view().fields, 200)
}
