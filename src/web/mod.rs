//! Embedded browser form for bfhl.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The single-page form (JSON input, submit, filter picker, output)
//! - JSON API endpoints that drive one shared [`FormController`]
//!
//! Launched via `bfhl web` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::Transport;
use crate::form::FormController;

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// A handler's answer before it is turned into a `tiny_http` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    html: bool,
}

impl Reply {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            html: false,
        }
    }

    fn html(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            html: true,
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let content_type = if self.html {
            content_type_html()
        } else {
            content_type_json()
        };
        Response::from_data(self.body.into_bytes())
            .with_header(content_type)
            .with_status_code(StatusCode(self.status))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Form state plus the transport it submits through.
///
/// Requests are handled one at a time on the server thread, so the
/// controller needs no locking.
pub struct WebApp<T: Transport> {
    form: FormController,
    transport: T,
    log_enabled: bool,
}

impl<T: Transport> WebApp<T> {
    pub fn new(form: FormController, transport: T, log_enabled: bool) -> Self {
        Self {
            form,
            transport,
            log_enabled,
        }
    }

    /// Dispatch an incoming request to the appropriate handler.
    pub fn dispatch(
        &mut self,
        method: &Method,
        url: &str,
        body: Option<&str>,
    ) -> Result<Reply> {
        // Strip query string for path matching
        let path = url.split('?').next().unwrap_or(url);
        let form = &mut self.form;

        match (method, path) {
            // Frontend
            (&Method::Get, "/") | (&Method::Get, "/index.html") => {
                Ok(Reply::html(frontend::INDEX_HTML))
            }

            // API: form state
            (&Method::Get, "/api/state") => api::get_state(form),
            (&Method::Get, "/api/fields") => api::get_fields(form),
            (&Method::Put, "/api/input") => api::put_input(form, body.unwrap_or("")),
            (&Method::Post, "/api/submit") => {
                api::post_submit(form, &self.transport, self.log_enabled)
            }
            (&Method::Put, "/api/filters") => api::put_filters(form, body.unwrap_or("")),
            (&Method::Delete, p) if p.starts_with("/api/filters/") => {
                let name = &p["/api/filters/".len()..];
                api::delete_filter(form, name)
            }
            (&Method::Post, "/api/error/dismiss") => api::post_dismiss_error(form),

            // 404
            _ => Ok(not_found()),
        }
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the form server on the given address.
///
/// Blocks the current thread. Handles requests sequentially and reports
/// per-request errors as JSON without stopping the server.
pub fn serve<T: Transport>(app: &mut WebApp<T>, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("bfhl form running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let result = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            match read_body(request.as_reader()) {
                Ok(body) => app.dispatch(&method, &url, Some(&body)),
                Err(reply) => Ok(reply),
            }
        } else {
            app.dispatch(&method, &url, None)
        };

        let reply = result.unwrap_or_else(|e| {
            Reply::json(500, serde_json::json!({ "error": e.to_string() }).to_string())
        });
        let status = reply.status;
        let _ = request.respond(reply.into_response());

        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Read a request body as UTF-8 text, or the `400` to answer instead.
fn read_body(reader: &mut dyn Read) -> Result<String, Reply> {
    let mut buf = String::new();
    match reader.read_to_string(&mut buf) {
        Ok(_) => Ok(buf),
        Err(e) => {
            let message = format!("could not read request body as UTF-8 text: {e}");
            Err(Reply::json(400, serde_json::json!({ "error": message }).to_string()))
        }
    }
}

/// 404 response.
fn not_found() -> Reply {
    Reply::json(404, r#"{"error": "not found"}"#)
}

/// JSON content type header.
fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8").unwrap()
}

/// HTML content type header.
fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap()
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
