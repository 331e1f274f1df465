//! In-process stand-in for the records service
//!
//! Serves the four endpoints the smoke test uses on an ephemeral port and
//! records what it was sent, so tests can assert on both sides.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use record_smoke::Config;

const SESSION_COOKIE: &str = "session-token=stub";

/// How the stub answers
#[derive(Debug, Clone)]
pub struct Behavior {
    pub initial_year: Option<i64>,
    pub login_status: u16,
    /// Status of the first record GET
    pub fetch_status: u16,
    pub patch_status: u16,
    /// Status of every record GET after the first
    pub verify_status: u16,
    /// Whether an accepted PATCH changes the stored year
    pub persist: bool,
    /// Answer record GETs with 401 unless the session cookie is sent
    pub require_cookie: bool,
    /// Replace the record body verbatim
    pub record_body: Option<String>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            initial_year: Some(1520),
            login_status: 200,
            fetch_status: 200,
            patch_status: 200,
            verify_status: 200,
            persist: true,
            require_cookie: false,
            record_body: None,
        }
    }
}

/// What the stub has seen and stores
#[derive(Debug, Default)]
pub struct Seen {
    pub year: Option<i64>,
    pub requests: Vec<String>,
    pub record_gets: usize,
    pub login_bodies: Vec<Value>,
    pub patch_bodies: Vec<Value>,
}

pub struct StubServer {
    pub base_url: String,
    seen: Arc<Mutex<Seen>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Stub has no local address");

        let seen = Arc::new(Mutex::new(Seen {
            year: behavior.initial_year,
            ..Default::default()
        }));
        let behavior = Arc::new(behavior);

        let server_seen = Arc::clone(&seen);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let seen = Arc::clone(&server_seen);
                let behavior = Arc::clone(&behavior);

                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        handle_request(req, Arc::clone(&seen), Arc::clone(&behavior))
                    });
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            seen,
            handle,
        }
    }

    pub fn seen(&self) -> std::sync::MutexGuard<'_, Seen> {
        self.seen.lock().expect("Stub state poisoned")
    }

    /// Configuration pointing the runner at this stub
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.target.base_url = self.base_url.clone();
        config
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe has no local address");
    drop(listener);
    format!("http://{}", addr)
}

async fn handle_request(
    req: Request<Incoming>,
    seen: Arc<Mutex<Seen>>,
    behavior: Arc<Behavior>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = body
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .unwrap_or_default();
    let has_session = parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains(SESSION_COOKIE));

    let path = parts.uri.path().to_string();
    let mut seen = seen.lock().expect("Stub state poisoned");
    seen.requests.push(format!("{} {}", parts.method, path));

    let response = match (&parts.method, path.as_str()) {
        (&Method::GET, "/login") => Response::builder()
            .status(StatusCode::OK)
            .header(SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION_COOKIE))
            .header(CONTENT_TYPE, "text/html")
            .body(Full::new(Bytes::from_static(b"<html>login</html>"))),

        (&Method::POST, "/api/auth/callback/credentials") => {
            seen.login_bodies
                .push(serde_json::from_slice(&body).unwrap_or(Value::Null));
            json_response(behavior.login_status, json!({"url": "/"}))
        }

        (&Method::GET, p) if p.starts_with("/api/records/") => {
            seen.record_gets += 1;
            let status = if seen.record_gets == 1 {
                behavior.fetch_status
            } else {
                behavior.verify_status
            };

            if behavior.require_cookie && !has_session {
                json_response(401, json!({"error": "Unauthorized"}))
            } else if status != 200 {
                json_response(status, json!({"error": "Event not found"}))
            } else if let Some(raw) = &behavior.record_body {
                Response::builder()
                    .status(StatusCode::OK)
                    .body(Full::new(Bytes::from(raw.clone())))
            } else {
                let id: i64 = p.trim_start_matches("/api/records/").parse().unwrap_or(0);
                json_response(
                    200,
                    json!({
                        "id": id,
                        "type": "BAPTISM",
                        "year": seen.year,
                        "month": 2,
                        "day": 3,
                        "parish": {"id": 1, "name": "Sé"},
                        "participations": []
                    }),
                )
            }
        }

        (&Method::PATCH, p) if p.starts_with("/api/records/") => {
            let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            if behavior.patch_status == 200 && behavior.persist {
                seen.year = payload["event"]["year"]
                    .as_str()
                    .and_then(|year| year.parse().ok());
            }
            seen.patch_bodies.push(payload);

            if behavior.patch_status == 200 {
                json_response(200, json!({"success": true}))
            } else {
                json_response(behavior.patch_status, json!({"error": "Error updating event"}))
            }
        }

        _ => json_response(404, json!({"error": "Not found"})),
    };

    Ok(response.expect("Stub response is well formed"))
}

fn json_response(
    status: u16,
    body: Value,
) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
}
