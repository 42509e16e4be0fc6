//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each request target (path + query) has a script of `(status, body)`
//! responses played in order; the last entry repeats. Unknown targets get 404.
//! The server counts requests per target and the peak number handled at once.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct State {
    scripts: Mutex<HashMap<String, Vec<(u16, String)>>>,
    hits: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct CsvServer {
    base: String,
    state: Arc<State>,
}

impl CsvServer {
    /// Starts a server in a background thread; every response is delayed by `delay`.
    pub fn start(delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(State::default());
        let st = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let st = Arc::clone(&st);
                thread::spawn(move || handle(stream, &st, delay));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// Input URL for a page under `dir`; its print view is `/<dir>/show_print_version.csv?locale=en`.
    pub fn page_url(&self, dir: &str) -> String {
        format!("{}/{}/page", self.base, dir)
    }

    /// Scripts the responses for the print view of `dir`.
    pub fn script(&self, dir: &str, responses: &[(u16, &str)]) {
        let target = print_target(dir);
        let list = responses.iter().map(|(s, b)| (*s, b.to_string())).collect();
        self.state.scripts.lock().unwrap().insert(target, list);
    }

    /// Requests received for the print view of `dir`.
    pub fn hits(&self, dir: &str) -> usize {
        let target = print_target(dir);
        self.state.hits.lock().unwrap().get(&target).copied().unwrap_or(0)
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

fn print_target(dir: &str) -> String {
    format!("/{}/show_print_version.csv?locale=en", dir)
}

fn handle(mut stream: std::net::TcpStream, state: &State, delay: Duration) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let target = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();

    let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(now, Ordering::SeqCst);
    *state.hits.lock().unwrap().entry(target.clone()).or_default() += 1;

    let (status, body) = {
        let mut scripts = state.scripts.lock().unwrap();
        match scripts.get_mut(&target) {
            Some(list) if list.len() > 1 => list.remove(0),
            Some(list) if !list.is_empty() => list[0].clone(),
            _ => (404, String::new()),
        }
    };
    thread::sleep(delay);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
    let _ = stream.flush();
    state.in_flight.fetch_sub(1, Ordering::SeqCst);
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Status",
    }
}
