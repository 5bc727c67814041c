//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, body limits,
//! route matching and access logging.

use crate::config::AppState;
use crate::handler::{analyze, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Request context encapsulating information needed for asset responses
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let access_log = state.config.logging.access_log;
    let mut entry = access_log.then(|| {
        AccessLogEntry::start(peer, req.method(), req.uri(), req.version(), req.headers())
    });

    let mut response = route_request(req, &state).await;
    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if let Some(entry) = entry.as_mut() {
        let bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.finish(response.status().as_u16(), bytes);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let enable_cors = state.config.http.enable_cors;
    let method = req.method().clone();

    match method {
        Method::OPTIONS => http::build_options_response(enable_cors),
        Method::POST if req.uri().path() == analyze::ANALYZE_PATH => {
            let max_body_size = state.config.http.max_body_size;
            if let Some(resp) = check_body_size(&req, max_body_size) {
                return resp;
            }
            match read_body(req.into_body(), max_body_size).await {
                Ok(body) => analyze::handle_analyze(&body, &state.analysis, enable_cors).await,
                Err(resp) => resp,
            }
        }
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: req.uri().path(),
                is_head: method == Method::HEAD,
                if_none_match: req
                    .headers()
                    .get("if-none-match")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
            };
            if ctx.path == "/" {
                static_files::serve_index(&ctx, &state.config.assets).await
            } else {
                static_files::serve_asset(&ctx, &state.config.assets).await
            }
        }
        _ => {
            logger::log_warning(&format!(
                "Method not allowed: {method} {}",
                req.uri().path()
            ));
            http::build_405_response()
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', enforcing limit while reading"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Collect the request body, stopping at `max_body_size` bytes
///
/// Chunked bodies carry no Content-Length, so the limit is also applied here.
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => {
            logger::log_error(&format!(
                "Request body exceeded {max_body_size} bytes while reading"
            ));
            Err(http::build_413_response())
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(http::build_text_response(
                hyper::StatusCode::BAD_REQUEST,
                "400 Bad Request",
            ))
        }
    }
}
