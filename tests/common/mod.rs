//! Local stand-in for the BFHL endpoint.
//!
//! Binds `tiny_http` to an ephemeral port on a background thread, answers
//! every request with a canned status and body, and records what it saw.

use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Header, Response, Server, StatusCode};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct MockEndpoint {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockEndpoint {
    pub fn start(status: u16, body: &'static str) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut text = String::new();
                let _ = request.as_reader().read_to_string(&mut text);
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string());

                seen.lock().unwrap().push(Recorded {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    content_type,
                    body: text,
                });

                let header =
                    Header::from_bytes("Content-Type", "application/json").unwrap();
                let response = Response::from_string(body)
                    .with_header(header)
                    .with_status_code(StatusCode(status));
                let _ = request.respond(response);
            }
        });

        Self {
            url: format!("http://{addr}/bfhl"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}
