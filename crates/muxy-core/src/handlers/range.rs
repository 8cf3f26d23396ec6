//! Range and conditional request helpers
//!
//! Byte ranges (RFC 7233) for video/audio seeking and resumable downloads,
//! plus the validators used for conditional GETs.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// A single byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Start byte (inclusive)
    pub start: u64,
    /// End byte (inclusive)
    pub end: u64,
}

impl Range {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Get content length for this range
    pub fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parse a Range header against a resource of `file_size` bytes
///
/// Format: bytes=0-499, 500-999, -500 (last 500), 500- (from 500 to end).
/// Returns `None` when the header is malformed or no range overlaps the
/// resource; callers answer that with 416.
pub fn parse_range(header: &str, file_size: u64) -> Option<Vec<Range>> {
    let (unit, spec) = header.split_once('=')?;
    if unit.trim() != "bytes" || file_size == 0 {
        return None;
    }

    let mut ranges = Vec::new();

    for part in spec.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (start_str, end_str) = trimmed.split_once('-')?;
        let (start_str, end_str) = (start_str.trim(), end_str.trim());

        let (start, end) = if start_str.is_empty() {
            // Suffix range: -500 means last 500 bytes
            let suffix: u64 = end_str.parse().ok()?;
            if suffix == 0 {
                continue;
            }
            (file_size.saturating_sub(suffix), file_size - 1)
        } else if end_str.is_empty() {
            (start_str.parse().ok()?, file_size - 1)
        } else {
            let start: u64 = start_str.parse().ok()?;
            let end: u64 = end_str.parse().ok()?;
            if start > end {
                return None;
            }
            (start, end)
        };

        if start >= file_size {
            continue;
        }

        ranges.push(Range::new(start, end.min(file_size - 1)));
    }

    if ranges.is_empty() {
        None
    } else {
        Some(ranges)
    }
}

/// Create Content-Range header value
pub fn content_range(range: Range, total: u64) -> String {
    format!("bytes {}-{}/{}", range.start, range.end, total)
}

/// Create Content-Range header for unsatisfiable range
pub fn content_range_unsatisfiable(total: u64) -> String {
    format!("bytes */{}", total)
}

/// Generate an ETag from file metadata
pub fn generate_etag(mtime_secs: u64, size: u64) -> String {
    format!("\"{:x}-{:x}\"", mtime_secs, size)
}

/// Check an If-None-Match header against the current ETag
pub fn check_if_none_match(if_none_match: &str, etag: &str) -> bool {
    if_none_match.trim() == "*"
        || if_none_match
            .split(',')
            .any(|candidate| candidate.trim().trim_start_matches("W/") == etag)
}

/// Check If-Modified-Since, true when the resource is unchanged
pub fn check_if_modified_since(if_modified_since: &str, modified: SystemTime) -> bool {
    match parse_http_date(if_modified_since) {
        Some(since) => DateTime::<Utc>::from(modified).timestamp() <= since.timestamp(),
        None => false,
    }
}

/// Format a timestamp as an HTTP date (`Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

/// Parse an HTTP date in its preferred IMF-fixdate form
pub fn parse_http_date(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(date.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
