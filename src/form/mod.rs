//! Form controller: the single state container behind every surface.
//!
//! Owns the raw input text, the last successful response, the selected
//! display filters, the current error banner and the in-flight flag. All
//! changes go through explicit methods; after each one the controller
//! recomputes a [`FormView`] and hands it to every registered observer.
//!
//! `submit` borrows the controller mutably for the whole request, so two
//! submits on one controller can never overlap.

pub mod banner;
pub mod field;

use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;

use crate::api::Transport;
use crate::api::protocol::{BfhlRequest, BfhlResponse};
use crate::error::{ErrorKind, SubmitError};
use crate::render::render;
use banner::{DEFAULT_BANNER_TTL, ErrorBanner};
use field::{Field, FilterSelection};

/// Callback invoked with a fresh view after every state change.
pub type Observer = Box<dyn FnMut(&FormView)>;

pub struct FormController {
    raw_input: String,
    response: Option<BfhlResponse>,
    filters: FilterSelection,
    error: Option<ErrorBanner>,
    loading: bool,
    banner_ttl: Duration,
    last_item_count: Option<usize>,
    observers: Vec<Observer>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            raw_input: String::new(),
            response: None,
            filters: FilterSelection::new(),
            error: None,
            loading: false,
            banner_ttl: DEFAULT_BANNER_TTL,
            last_item_count: None,
            observers: Vec::new(),
        }
    }

    /// Override how long an error banner stays up.
    pub fn with_banner_ttl(mut self, ttl: Duration) -> Self {
        self.banner_ttl = ttl;
        self
    }

    /// Start with a pre-selected set of filters.
    pub fn with_filters(mut self, filters: FilterSelection) -> Self {
        self.filters = filters;
        self
    }

    /// Register an observer. It is not called for the current state, only
    /// for changes made after registration.
    pub fn subscribe(&mut self, observer: impl FnMut(&FormView) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn input(&self) -> &str {
        &self.raw_input
    }

    pub fn response(&self) -> Option<&BfhlResponse> {
        self.response.as_ref()
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Size of the `data` array sent by the most recent submit, if it got
    /// far enough to build a request and `data` was an array.
    pub fn last_item_count(&self) -> Option<usize> {
        self.last_item_count
    }

    /// Filtered text rendering of the current response.
    pub fn rendered(&self) -> String {
        render(self.response.as_ref(), &self.filters)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Replace the raw input text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.raw_input = text.into();
        self.notify();
    }

    /// Parse the raw input, send its `data` member to the endpoint and store
    /// the answer.
    ///
    /// On failure the response is cleared and an error banner is raised; the
    /// error is also returned so callers can report or log it. The loading
    /// flag is set for the duration of the call and cleared on every exit.
    pub fn submit<T: Transport + ?Sized>(&mut self, transport: &T) -> Result<(), SubmitError> {
        let ttl = self.banner_ttl;
        let mut form = LoadingGuard::acquire(self);

        match form.exchange(transport) {
            Ok(response) => {
                form.response = Some(response);
                form.error = None;
                Ok(())
            }
            Err(err) => {
                form.response = None;
                form.error = Some(ErrorBanner::new(err.to_string(), err.kind(), ttl));
                Err(err)
            }
        }
    }

    /// Replace the filter selection wholesale.
    pub fn set_filters(&mut self, filters: FilterSelection) {
        self.filters = filters;
        self.notify();
    }

    /// Remove one filter by wire name. Unknown or unselected names are
    /// ignored.
    pub fn remove_filter(&mut self, name: &str) {
        if self.filters.remove(name) {
            self.notify();
        }
    }

    /// Close the error banner.
    pub fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            self.notify();
        }
    }

    /// Close the error banner if it has outlived its TTL at `now`.
    /// Returns whether a banner was dismissed.
    pub fn expire_error(&mut self, now: Instant) -> bool {
        let expired = self.error.as_ref().is_some_and(|b| b.is_expired(now));
        if expired {
            self.error = None;
            self.notify();
        }
        expired
    }

    /// Snapshot of everything a view needs to draw the form.
    pub fn view(&self) -> FormView {
        self.view_at(Instant::now())
    }

    pub fn view_at(&self, now: Instant) -> FormView {
        FormView {
            input: self.raw_input.clone(),
            loading: self.loading,
            submit_label: if self.loading { "Submitting..." } else { "Submit" },
            show_filters: self.response.is_some(),
            filters: self.filters.names(),
            rendered: self.rendered(),
            has_response: self.response.is_some(),
            error: self.error.as_ref().map(|b| BannerView {
                message: b.message().to_string(),
                kind: b.kind(),
                remaining_ms: b.remaining(now).as_millis() as u64,
            }),
            fields: Field::ALL
                .into_iter()
                .map(|f| FieldOption {
                    name: f.name(),
                    label: f.label(),
                })
                .collect(),
        }
    }

    fn exchange<T: Transport + ?Sized>(&mut self, transport: &T) -> Result<BfhlResponse, SubmitError> {
        self.last_item_count = None;
        let parsed: Value = serde_json::from_str(&self.raw_input)?;
        let request = BfhlRequest::from_input(&parsed);
        self.last_item_count = request.item_count();
        transport.send(&request)
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in &mut self.observers {
            observer(&view);
        }
    }
}

/// Holds the loading flag up for as long as it lives.
struct LoadingGuard<'a> {
    form: &'a mut FormController,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(form: &'a mut FormController) -> Self {
        form.loading = true;
        form.error = None;
        form.notify();
        Self { form }
    }
}

impl Deref for LoadingGuard<'_> {
    type Target = FormController;

    fn deref(&self) -> &FormController {
        self.form
    }
}

impl DerefMut for LoadingGuard<'_> {
    fn deref_mut(&mut self) -> &mut FormController {
        self.form
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.form.loading = false;
        self.form.notify();
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Derived, serializable picture of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub input: String,
    pub loading: bool,
    pub submit_label: &'static str,
    /// The filter picker only appears once there is a response to filter.
    pub show_filters: bool,
    pub filters: Vec<&'static str>,
    pub rendered: String,
    pub has_response: bool,
    pub error: Option<BannerView>,
    pub fields: Vec<FieldOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerView {
    pub message: String,
    pub kind: ErrorKind,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub name: &'static str,
    pub label: &'static str,
}
