//! HTTP surface for adding entries and fetching the rendered diagram.
//!
//! Routing is plain data in and out so it can be driven without a socket;
//! the `tiny_http` loop behind the `serve` feature only moves bytes.

use serde_json::{Value, json};
use tm_core::{NoGrouping, ThoughtmapError};
use tracing::{error, info};

use crate::config::Settings;
use crate::pipeline::{append_entry, current_timestamp, generate, read_log};

pub const ADD_PATH: &str = "/api/thoughtmap/add";
pub const GENERATE_PATH: &str = "/api/thoughtmap/generate";
pub const MINDMAP_PATH: &str = "/api/thoughtmap/mindmap.md";

const JSON_CONTENT_TYPE: &str = "application/json";
const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";
const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub cache_control: Option<&'static str>,
    pub body: String,
}

impl ApiResponse {
    fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: JSON_CONTENT_TYPE,
            cache_control: None,
            body: body.to_string(),
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            cache_control: None,
            body: body.to_string(),
        }
    }
}

/// Dispatch one request. The query string, if any, is ignored.
#[must_use]
pub fn route(settings: &Settings, method: Method, url: &str, body: &str) -> ApiResponse {
    let path = url.split_once('?').map_or(url, |(path, _)| path);
    match (method, path) {
        (Method::Post, ADD_PATH) => handle_add(settings, body),
        (Method::Post, GENERATE_PATH) => handle_generate(settings),
        (Method::Get, MINDMAP_PATH) => handle_mindmap(settings),
        (_, ADD_PATH | GENERATE_PATH | MINDMAP_PATH) => {
            ApiResponse::text(405, "Method Not Allowed")
        }
        _ => ApiResponse::text(404, "Not Found"),
    }
}

fn handle_add(settings: &Settings, body: &str) -> ApiResponse {
    let request: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            return ApiResponse::json(500, &json!({"success": false, "error": err.to_string()}));
        }
    };
    let text = request
        .get("text")
        .and_then(Value::as_str)
        .map_or("", str::trim);
    if text.is_empty() {
        return text_required();
    }

    let timestamp = match current_timestamp() {
        Ok(timestamp) => timestamp,
        Err(err) => {
            return ApiResponse::json(500, &json!({"success": false, "error": err.to_string()}));
        }
    };
    match append_entry(&settings.log, text, &timestamp) {
        Ok(line) => {
            info!("Added entry via HTTP: {line}");
            ApiResponse::json(200, &json!({"success": true}))
        }
        Err(ThoughtmapError::EmptyEntry) => text_required(),
        Err(err) => {
            error!("Append failed: {err}");
            ApiResponse::json(500, &json!({"success": false, "error": err.to_string()}))
        }
    }
}

fn text_required() -> ApiResponse {
    ApiResponse::json(400, &json!({"success": false, "error": "Text is required"}))
}

fn handle_generate(settings: &Settings) -> ApiResponse {
    let generated = generate(&settings.log, &settings.out, &settings.render, &NoGrouping)
        .and_then(|report| read_log(&report.diagram_path));
    match generated {
        Ok(mindmap) => ApiResponse::json(200, &json!({"status": "success", "mindmap": mindmap})),
        Err(err) => {
            error!("Generation failed: {err}");
            ApiResponse::json(500, &json!({"status": "error", "message": err.to_string()}))
        }
    }
}

fn handle_mindmap(settings: &Settings) -> ApiResponse {
    match read_log(&settings.out) {
        Ok(content) => ApiResponse {
            status: 200,
            content_type: MARKDOWN_CONTENT_TYPE,
            cache_control: Some(NO_CACHE),
            body: content,
        },
        Err(err) => {
            error!("Error reading mindmap: {err}");
            ApiResponse::json(500, &json!({"error": "Failed to read mindmap"}))
        }
    }
}

#[cfg(feature = "serve")]
pub use http_loop::serve;

#[cfg(feature = "serve")]
mod http_loop {
    use std::io::Read;

    use anyhow::Result;
    use tiny_http::{Header, Response, Server};
    use tracing::{debug, warn};

    use super::{ApiResponse, Method, route};
    use crate::config::Settings;

    /// Serve requests until the process is stopped.
    pub fn serve(settings: &Settings, host: &str, port: u16) -> Result<()> {
        let addr = format!("{host}:{port}");
        let server =
            Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;

        println!("Thoughtmap API running at: http://{addr}");
        println!("Press Ctrl+C to stop");

        for mut request in server.incoming_requests() {
            let method = match request.method() {
                tiny_http::Method::Get => Method::Get,
                tiny_http::Method::Post => Method::Post,
                _ => Method::Other,
            };
            let url = request.url().to_string();
            debug!("{} {url}", request.method());

            let mut body = String::new();
            let response = match request.as_reader().read_to_string(&mut body) {
                Ok(_) => route(settings, method, &url, &body),
                Err(e) => ApiResponse::text(400, &format!("Failed to read body: {e}")),
            };

            if let Err(err) = request.respond(into_response(response)) {
                warn!("Failed to send response for {url}: {err}");
            }
        }

        Ok(())
    }

    fn into_response(api: ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
        let mut response =
            Response::from_data(api.body.into_bytes()).with_status_code(api.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], api.content_type.as_bytes()) {
            response = response.with_header(header);
        }
        let cache_control = api
            .cache_control
            .and_then(|value| Header::from_bytes(&b"Cache-Control"[..], value.as_bytes()).ok());
        if let Some(header) = cache_control {
            response = response.with_header(header);
        }
        response
    }
}
