//! Single-file handler
//!
//! Serves one file from disk under a fixed route, the way a video or poster
//! endpoint does: explicit content type, validators, conditional GET and
//! single byte ranges for seeking.

use super::range::{
    check_if_modified_since, check_if_none_match, content_range, content_range_unsatisfiable,
    format_http_date, generate_etag, parse_range, Range,
};
use crate::handler::{Handler, HandlerFuture};
use crate::{Method, Request, Response, ResponseBuilder, StatusCode};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// File handler configuration
#[derive(Clone, Debug)]
pub struct ServeFileConfig {
    /// File to serve
    pub path: PathBuf,
    /// Content type, detected from the extension when unset
    pub content_type: Option<String>,
    /// Enable ETag
    pub etag: bool,
    /// Enable Last-Modified
    pub last_modified: bool,
    /// Honor Range headers
    pub ranges: bool,
}

impl ServeFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content_type: None,
            etag: true,
            last_modified: true,
            ranges: true,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn etag(mut self, enabled: bool) -> Self {
        self.etag = enabled;
        self
    }

    pub fn last_modified(mut self, enabled: bool) -> Self {
        self.last_modified = enabled;
        self
    }

    pub fn ranges(mut self, enabled: bool) -> Self {
        self.ranges = enabled;
        self
    }
}

/// Serves a single file
///
/// Any failure to open or stat the file yields a bodyless 500. The served
/// range is read into memory before the response is sent, so a full GET of
/// a large file costs its whole size per in-flight request; players that
/// seek with `Range` keep that bounded.
pub struct ServeFile {
    config: Arc<ServeFileConfig>,
}

impl ServeFile {
    pub fn new(config: ServeFileConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Serve `path` with the given content type
    pub fn with_type(path: impl Into<PathBuf>, content_type: &str) -> Self {
        Self::new(ServeFileConfig::new(path).content_type(content_type))
    }
}

impl Handler for ServeFile {
    fn call(&self, req: Request) -> HandlerFuture {
        let config = Arc::clone(&self.config);
        Box::pin(async move { serve(&config, &req).await })
    }
}

struct Validators {
    etag: Option<String>,
    last_modified: Option<String>,
}

impl Validators {
    fn apply(&self, mut builder: ResponseBuilder) -> ResponseBuilder {
        if let Some(etag) = &self.etag {
            builder = builder.header("etag", etag.clone());
        }
        if let Some(last_modified) = &self.last_modified {
            builder = builder.header("last-modified", last_modified.clone());
        }
        builder
    }
}

async fn serve(config: &ServeFileConfig, req: &Request) -> Response {
    let mut file = match File::open(&config.path).await {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!(path = %config.path.display(), error = %err, "failed to open file");
            return Response::internal_error();
        }
    };

    let meta = match file.metadata().await {
        Ok(meta) if meta.is_file() => meta,
        Ok(_) => {
            tracing::warn!(path = %config.path.display(), "not a regular file");
            return Response::internal_error();
        }
        Err(err) => {
            tracing::warn!(path = %config.path.display(), error = %err, "failed to stat file");
            return Response::internal_error();
        }
    };

    let size = meta.len();
    let modified = meta.modified().ok();
    let validators = Validators {
        etag: config.etag.then(|| generate_etag(mtime_secs(modified), size)),
        last_modified: if config.last_modified {
            modified.map(format_http_date)
        } else {
            None
        },
    };

    if is_not_modified(req, &validators, modified) {
        return validators
            .apply(ResponseBuilder::new(StatusCode::NOT_MODIFIED))
            .build();
    }

    let content_type = config
        .content_type
        .clone()
        .unwrap_or_else(|| mime_type(&config.path).to_string());

    let mut range = None;
    if config.ranges {
        if let Some(header) = req.header("range") {
            match parse_range(header, size) {
                Some(ranges) if ranges.len() == 1 => range = Some(ranges[0]),
                // Multiple ranges are answered with the whole file
                Some(_) => {}
                None => {
                    return ResponseBuilder::new(StatusCode::RANGE_NOT_SATISFIABLE)
                        .header("content-range", content_range_unsatisfiable(size))
                        .header("content-type", "text/plain; charset=utf-8")
                        .body("invalid range")
                        .build();
                }
            }
        }
    }

    let (status, served) = match range {
        Some(range) => (StatusCode::PARTIAL_CONTENT, range),
        None if size == 0 => (StatusCode::OK, Range::new(0, 0)),
        None => (StatusCode::OK, Range::new(0, size - 1)),
    };
    let length = if size == 0 { 0 } else { served.content_length() };

    let mut builder = validators
        .apply(ResponseBuilder::new(status))
        .header("content-type", content_type)
        .header("content-length", length.to_string());
    if config.ranges {
        builder = builder.header("accept-ranges", "bytes");
    }
    if range.is_some() {
        builder = builder.header("content-range", content_range(served, size));
    }

    if req.method == Method::Head || length == 0 {
        return builder.build();
    }

    match read_range(&mut file, served).await {
        Ok(body) => builder.body(body).build(),
        Err(err) => {
            tracing::warn!(path = %config.path.display(), error = %err, "failed to read file");
            Response::internal_error()
        }
    }
}

fn is_not_modified(req: &Request, validators: &Validators, modified: Option<SystemTime>) -> bool {
    if req.method != Method::Get && req.method != Method::Head {
        return false;
    }

    // If-None-Match takes precedence over If-Modified-Since
    if let Some(if_none_match) = req.header("if-none-match") {
        return validators
            .etag
            .as_deref()
            .is_some_and(|etag| check_if_none_match(if_none_match, etag));
    }

    match (req.header("if-modified-since"), modified) {
        (Some(since), Some(modified)) if validators.last_modified.is_some() => {
            check_if_modified_since(since, modified)
        }
        _ => false,
    }
}

async fn read_range(file: &mut File, range: Range) -> std::io::Result<Vec<u8>> {
    let length = range.content_length();
    let mut body = Vec::with_capacity(length as usize);

    file.seek(SeekFrom::Start(range.start)).await?;
    file.take(length).read_to_end(&mut body).await?;
    Ok(body)
}

fn mtime_secs(modified: Option<SystemTime>) -> u64 {
    modified
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext.to_lowercase().as_str() {
        // Text
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",

        // Audio/Video
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",

        // Default
        _ => "application/octet-stream",
    }
}
