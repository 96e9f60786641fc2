//! Placement HTTP service.
//!
//! Serves `POST /placement/compute` and `GET /health` on a single accept
//! thread, one request per connection. Requests and responses are JSON.

use crate::config::ServiceConfig;
use crate::placement::{PlacementEngine, PlacementRequest};
use anyhow::{anyhow, Result};
use serde_json::json;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

const MAX_HEAD_BYTES: usize = 8192;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub addr: String,
    pub max_body_bytes: usize,
    pub read_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from(&ServiceConfig::default())
    }
}

impl From<&ServiceConfig> for ApiConfig {
    fn from(cfg: &ServiceConfig) -> Self {
        Self {
            addr: cfg.api_addr.clone(),
            max_body_bytes: cfg.max_body_bytes,
            read_timeout: cfg.read_timeout,
        }
    }
}

#[derive(Debug)]
pub struct ApiHandle {
    pub addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl ApiHandle {
    pub fn stop(mut self) -> Result<()> {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(join) = self.join.take() {
            join.join()
                .map_err(|_| anyhow!("api server thread panicked"))?;
        }
        Ok(())
    }
}

pub struct ApiServer {
    cfg: ApiConfig,
    engine: PlacementEngine,
}

impl ApiServer {
    pub fn new(cfg: ApiConfig, engine: PlacementEngine) -> Self {
        Self { cfg, engine }
    }

    pub fn spawn(self) -> Result<ApiHandle> {
        let configured_addr: SocketAddr = self.cfg.addr.parse()?;
        let listener = TcpListener::bind(configured_addr)?;
        let addr = listener.local_addr()?;
        if configured_addr.ip().is_loopback() && !addr.ip().is_loopback() {
            return Err(anyhow!(
                "api configured for loopback address '{}', but bound to non-loopback address '{}'",
                configured_addr,
                addr
            ));
        }
        listener.set_nonblocking(true)?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_thread = shutdown.clone();
        let cfg = self.cfg;
        let engine = self.engine;
        let join = std::thread::spawn(move || {
            if let Err(err) = run_api(listener, &cfg, &engine, shutdown_thread) {
                log::error!("placement api stopped: {}", err);
            }
        });

        Ok(ApiHandle {
            addr,
            shutdown,
            join: Some(join),
        })
    }
}

fn run_api(
    listener: TcpListener,
    cfg: &ApiConfig,
    engine: &PlacementEngine,
    shutdown: Arc<AtomicBool>,
) -> Result<()> {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        match listener.accept() {
            Ok((stream, _)) => {
                if let Err(err) = handle_connection(stream, cfg, engine) {
                    log::warn!("placement api request rejected: {}", err);
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(50));
                continue;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn handle_connection(
    mut stream: TcpStream,
    cfg: &ApiConfig,
    engine: &PlacementEngine,
) -> Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(cfg.read_timeout))?;

    let (mut request, leftover) = read_head(&mut stream)?;
    log::debug!("{} {}", request.method, request.path);

    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/health") => {
            write_json_response(&mut stream, 200, &json!({ "status": "ok" }))?;
            return Ok(());
        }
        ("POST", "/placement/compute") => {}
        (_, "/health") | (_, "/placement/compute") => {
            write_error(&mut stream, 405, "method_not_allowed", None)?;
            return Ok(());
        }
        _ => {
            write_error(&mut stream, 404, "not_found", None)?;
            return Ok(());
        }
    }

    let length = match request.content_length() {
        Ok(Some(length)) => length,
        Ok(None) => {
            write_error(&mut stream, 411, "length_required", None)?;
            return Ok(());
        }
        Err(err) => {
            write_error(&mut stream, 400, "bad_request", Some(&err.to_string()))?;
            return Err(err);
        }
    };
    if length > cfg.max_body_bytes {
        write_error(&mut stream, 413, "payload_too_large", None)?;
        return Err(anyhow!(
            "body of {} bytes exceeds limit of {}",
            length,
            cfg.max_body_bytes
        ));
    }
    request.body = read_body(&mut stream, leftover, length)?;

    let placement: PlacementRequest = match serde_json::from_slice(&request.body) {
        Ok(placement) => placement,
        Err(err) => {
            write_error(&mut stream, 400, "invalid_json", Some(&err.to_string()))?;
            return Err(err.into());
        }
    };

    match engine.compute(&placement) {
        Ok(result) => {
            let payload = serde_json::to_vec(&result)?;
            write_response(&mut stream, 200, "application/json", &payload)?;
        }
        Err(err) => {
            write_error(&mut stream, 422, err.code(), Some(&err.to_string()))?;
            return Err(err.into());
        }
    }
    Ok(())
}

/// Read the request line and headers. Returns any body bytes that arrived
/// with the head.
fn read_head(stream: &mut TcpStream) -> Result<(HttpRequest, Vec<u8>)> {
    let mut buf = [0u8; 1024];
    let mut data = Vec::new();
    let head_end = loop {
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        if data.len() > MAX_HEAD_BYTES {
            return Err(anyhow!("request head too large"));
        }
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Err(anyhow!("connection closed before request head"));
        }
        data.extend_from_slice(&buf[..n]);
    };
    let leftover = data.split_off(head_end + 4);

    let text = String::from_utf8_lossy(&data[..head_end]);
    let mut lines = text.split("\r\n");
    let request_line = lines.next().ok_or_else(|| anyhow!("empty request"))?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().ok_or_else(|| anyhow!("missing method"))?;
    let raw_path = parts.next().ok_or_else(|| anyhow!("missing path"))?;
    let mut headers = HashMap::new();
    for line in lines {
        if let Some((k, v)) = line.split_once(':') {
            headers.insert(k.trim().to_lowercase(), v.trim().to_string());
        }
    }
    let path = raw_path.split('?').next().unwrap_or(raw_path).to_string();
    Ok((
        HttpRequest {
            method: method.to_string(),
            path,
            headers,
            body: Vec::new(),
        },
        leftover,
    ))
}

fn read_body(stream: &mut TcpStream, mut body: Vec<u8>, length: usize) -> Result<Vec<u8>> {
    let mut buf = [0u8; 4096];
    while body.len() < length {
        let n = stream.read(&mut buf)?;
        if n == 0 {
            return Err(anyhow!(
                "connection closed after {} of {} body bytes",
                body.len(),
                length
            ));
        }
        body.extend_from_slice(&buf[..n]);
    }
    body.truncate(length);
    Ok(body)
}

fn write_error(
    stream: &mut TcpStream,
    status: u16,
    code: &str,
    message: Option<&str>,
) -> Result<()> {
    let body = match message {
        Some(message) => json!({ "error": code, "message": message }),
        None => json!({ "error": code }),
    };
    write_json_response(stream, status, &body)
}

fn write_json_response(
    stream: &mut TcpStream,
    status: u16,
    body: &serde_json::Value,
) -> Result<()> {
    let payload = serde_json::to_vec(body)?;
    write_response(stream, status, "application/json", &payload)
}

fn write_response(
    stream: &mut TcpStream,
    status: u16,
    content_type: &str,
    body: &[u8],
) -> Result<()> {
    let status_line = match status {
        200 => "HTTP/1.1 200 OK",
        400 => "HTTP/1.1 400 Bad Request",
        404 => "HTTP/1.1 404 Not Found",
        405 => "HTTP/1.1 405 Method Not Allowed",
        411 => "HTTP/1.1 411 Length Required",
        413 => "HTTP/1.1 413 Payload Too Large",
        422 => "HTTP/1.1 422 Unprocessable Entity",
        _ => "HTTP/1.1 500 Internal Server Error",
    };
    let header = format!(
        "{status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {len}\r\nCache-Control: no-store\r\nConnection: close\r\n\r\n",
        status_line = status_line,
        content_type = content_type,
        len = body.len()
    );
    stream.write_all(header.as_bytes())?;
    stream.write_all(body)?;
    Ok(())
}

#[derive(Debug)]
struct HttpRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl HttpRequest {
    fn content_length(&self) -> Result<Option<usize>> {
        match self.headers.get("content-length") {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| anyhow!("invalid content-length '{}'", value)),
            None => Ok(None),
        }
    }
}
