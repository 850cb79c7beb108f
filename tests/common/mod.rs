//! Shared test helpers: a scripted transport and a one-shot HTTP stub server
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use wm_client::{ClientConfig, ClientError, ClientResult, HttpReply, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub content_type: String,
    pub body: String,
}

/// Answers each POST with the next scripted reply
pub struct FakeTransport {
    replies: Mutex<VecDeque<ClientResult<HttpReply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Duration,
}

impl FakeTransport {
    pub fn new(replies: Vec<ClientResult<HttpReply>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self::new(vec![Ok(HttpReply::new(status, body))]))
    }

    pub fn failing(error: ClientError) -> Arc<Self> {
        Arc::new(Self::new(vec![Err(error)]))
    }

    /// Every call blocks this long before answering
    pub fn slow(status: u16, body: &str, delay: Duration) -> Arc<Self> {
        let mut transport = Self::new(vec![Ok(HttpReply::new(status, body))]);
        transport.delay = delay;
        Arc::new(transport)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    fn post(&self, path: &str, content_type: &str, body: &str) -> ClientResult<HttpReply> {
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            content_type: content_type.to_string(),
            body: body.to_string(),
        });
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpReply::new(500, r#"{"error": "no scripted reply"}"#)))
    }
}

/// Config with no navigation pause and a short timeout
pub fn test_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    config.navigation.delay_ms = 0;
    config.request.timeout_ms = 2_000;
    config
}

/// Local HTTP server answering `count` requests with a fixed response
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubServer {
    pub fn spawn(status_line: &str, body: &str, count: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        let handle = thread::spawn(move || {
            for _ in 0..count {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                if let Ok(request) = read_request(&mut stream) {
                    seen.lock().unwrap().push(request);
                }
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url,
            requests,
            handle: Some(handle),
        }
    }

    /// Accepts connections for `hold` and reads each request, but never answers
    pub fn silent(hold: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        let handle = thread::spawn(move || {
            let deadline = std::time::Instant::now() + hold;
            let mut open = Vec::new();
            while std::time::Instant::now() < deadline {
                match listener.accept() {
                    Ok((mut stream, _)) => {
                        let _ = stream.set_nonblocking(false);
                        if let Ok(request) = read_request(&mut stream) {
                            seen.lock().unwrap().push(request);
                        }
                        open.push(stream);
                    }
                    Err(_) => thread::sleep(Duration::from_millis(10)),
                }
            }
        });

        Self {
            base_url,
            requests,
            handle: Some(handle),
        }
    }

    /// Raw requests received so far, waiting for the server thread to finish
    pub fn finish(mut self) -> Vec<String> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);

        if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= end + 4 + content_length {
                break;
            }
        }
    }

    Ok(String::from_utf8_lossy(&data).into_owned())
}
