//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body. HEAD responses carry the freshness headers
//! (Content-Length, Last-Modified, ETag); GET responses additionally carry
//! an optional Content-Disposition. Request counts are recorded so tests
//! can assert that a fresh run issues no GET.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Default)]
pub struct DatasetServerOptions {
    /// Status returned for every request; 0 means 200.
    pub status: u32,
    /// `Last-Modified` value, if served.
    pub last_modified: Option<String>,
    /// `ETag` value, if served.
    pub etag: Option<String>,
    /// `Content-Disposition` value served on GET, if any.
    pub content_disposition: Option<String>,
}

pub struct DatasetServer {
    pub url: String,
    head_count: Arc<AtomicUsize>,
    get_count: Arc<AtomicUsize>,
}

impl DatasetServer {
    pub fn heads(&self) -> usize {
        self.head_count.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.get_count.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `body`. The server runs
/// until the process exits.
pub fn start(body: Vec<u8>, opts: DatasetServerOptions) -> DatasetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let head_count = Arc::new(AtomicUsize::new(0));
    let get_count = Arc::new(AtomicUsize::new(0));
    let server = DatasetServer {
        url: format!("http://127.0.0.1:{}/", port),
        head_count: Arc::clone(&head_count),
        get_count: Arc::clone(&get_count),
    };
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let opts = opts.clone();
            let head_count = Arc::clone(&head_count);
            let get_count = Arc::clone(&get_count);
            thread::spawn(move || handle(stream, &body, &opts, &head_count, &get_count));
        }
    });
    server
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    opts: &DatasetServerOptions,
    head_count: &AtomicUsize,
    get_count: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let method = request.split_whitespace().next().unwrap_or("");
    let status = if opts.status == 0 { 200 } else { opts.status };
    let reason = if status == 200 { "OK" } else { "Error" };

    let mut headers = String::new();
    if let Some(lm) = &opts.last_modified {
        headers.push_str(&format!("Last-Modified: {}\r\n", lm));
    }
    if let Some(etag) = &opts.etag {
        headers.push_str(&format!("ETag: {}\r\n", etag));
    }

    if method.eq_ignore_ascii_case("HEAD") {
        head_count.fetch_add(1, Ordering::SeqCst);
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}\r\n",
            status,
            reason,
            body.len(),
            headers
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        get_count.fetch_add(1, Ordering::SeqCst);
        if let Some(cd) = &opts.content_disposition {
            headers.push_str(&format!("Content-Disposition: {}\r\n", cd));
        }
        let payload: &[u8] = if status == 200 { body } else { b"error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}\r\n",
            status,
            reason,
            payload.len(),
            headers
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(payload);
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
}
