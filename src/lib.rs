//! Form client for the BFHL classification endpoint.
//!
//! The [`form::FormController`] owns the raw input, the last response, the
//! selected display filters and the error banner. [`render::render`] turns a
//! response plus a filter selection into text. The CLI and the embedded
//! browser form in [`web`] are both thin drivers of the same controller.

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod render;
pub mod web;
