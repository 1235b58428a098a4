#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use opsgrid::api::client::{Backend, UpdateRequest};
use opsgrid::api::error::RemoteError;
use opsgrid::core::session::GridSession;
use opsgrid::models::resource::Resource;
use opsgrid::utils::formatting::Formatter;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::env;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

pub fn opsgrid() -> Command {
    cargo_bin_cmd!("opsgrid")
}

/// A fresh, empty directory inside the system temp dir, used as $HOME.
pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("opsgrid_test_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path
}

/// Audit DB path inside `home`.
pub fn db_in(home: &PathBuf) -> String {
    home.join("audit.sqlite").to_string_lossy().to_string()
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Scripted backend: list bodies per resource, one queued reply per update.
#[derive(Default)]
pub struct MockBackend {
    pub lists: RefCell<HashMap<&'static str, Value>>,
    pub replies: RefCell<VecDeque<Result<Value, RemoteError>>>,
    pub requests: RefCell<Vec<UpdateRequest>>,
    pub fetches: RefCell<Vec<Resource>>,
}

impl MockBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.set_list(Resource::Categories, categories_body());
        backend.set_list(Resource::Projects, projects_body());
        backend.set_list(Resource::Quotations, quotations_body());
        backend
    }

    pub fn set_list(&self, resource: Resource, body: Value) {
        self.lists.borrow_mut().insert(resource.name(), body);
    }

    pub fn reply(&self, reply: Result<Value, RemoteError>) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Backend for MockBackend {
    fn fetch_all(&self, resource: Resource) -> Result<Value, RemoteError> {
        self.fetches.borrow_mut().push(resource);
        self.lists
            .borrow()
            .get(resource.name())
            .cloned()
            .ok_or(RemoteError::Server {
                status: 404,
                message: Some("not found".into()),
            })
    }

    fn update(&self, request: &UpdateRequest) -> Result<Value, RemoteError> {
        self.requests.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Network("no scripted reply".into())))
    }
}

pub fn categories_body() -> Value {
    json!({
        "data": [
            { "id": 7, "name": "Electrical", "description": "Wiring and panels", "created_at": "2024-01-05T09:30:00Z" },
            { "id": 8, "name": "Plumbing", "description": null, "created_at": "2024-02-11" },
            { "id": 9, "name": "Civil", "description": "Foundations", "created_at": "2024-03-20" }
        ]
    })
}

pub fn projects_body() -> Value {
    json!({
        "data": [
            {
                "id": 101,
                "project_code": "PRJ-0101",
                "name": "Warehouse retrofit",
                "client": { "id": 3, "name": "Acme Logistics" },
                "category_name": "Electrical",
                "category_id": 7,
                "start_date": "2024-01-05",
                "budget": 1500,
                "status": "in_progress"
            },
            {
                "id": 102,
                "project_code": "PRJ-0102",
                "name": "Office fit-out",
                "client": { "id": 4, "name": "Northwind" },
                "category_name": "Civil",
                "category_id": 9,
                "start_date": null,
                "budget": "250000.5",
                "status": "draft"
            }
        ]
    })
}

pub fn quotations_body() -> Value {
    json!({
        "data": [
            {
                "id": "Q-17",
                "quotation_no": "QT/2024/017",
                "project": { "id": 101, "name": "Warehouse retrofit" },
                "amount": 98000,
                "valid_until": "2024-06-30",
                "status": "pending_approval"
            }
        ]
    })
}

pub fn open(resource: Resource, backend: &MockBackend) -> GridSession {
    GridSession::load(resource, Formatter::default(), backend).expect("load session")
}

// ---------------------------------------------------------------------------
// Loopback HTTP responder for CLI tests
// ---------------------------------------------------------------------------

pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

pub fn route(method: &'static str, path: &'static str, status: u16, body: Value) -> Route {
    Route {
        method,
        path,
        status,
        body: body.to_string(),
    }
}

/// Requests seen by the responder: "METHOD /path body".
pub type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `routes` on 127.0.0.1 until the test process exits.
/// Returns the API base url (`http://127.0.0.1:PORT/api`) and the request log.
pub fn spawn_backend(routes: Vec<Route>) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }

            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).is_err() || line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':')
                    && name.trim().eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).ok();

            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or("").to_string();
            let path = parts
                .next()
                .unwrap_or("")
                .split('?')
                .next()
                .unwrap_or("")
                .to_string();

            log.lock().expect("seen lock").push(format!(
                "{method} {path} {}",
                String::from_utf8_lossy(&body)
            ));

            let (status, reply) = routes
                .iter()
                .find(|r| r.method == method && format!("/api/{}", r.path) == path)
                .map(|r| (r.status, r.body.clone()))
                .unwrap_or((404, r#"{"message":"no route"}"#.to_string()));

            let response = format!(
                "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
                reply.len()
            );
            stream.write_all(response.as_bytes()).ok();
            stream.flush().ok();
        }
    });

    (format!("http://{addr}/api"), seen)
}
