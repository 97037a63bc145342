//! Path-style addressing: `/{bucket}/{object}`

use percent_encoding::percent_decode_str;

/// Bucket and object segments of a request path.
///
/// Built by percent-decoding the path, trimming every leading and trailing
/// `/`, then splitting once on the first remaining `/`. Separators inside the
/// object name are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPath {
    pub bucket: String,
    pub object: String,
}

impl ParsedPath {
    /// Parse a raw (possibly percent-encoded) request path
    pub fn parse(raw: &str) -> Self {
        let decoded = percent_decode_str(raw).decode_utf8_lossy();
        let trimmed = decoded.trim_matches('/');

        match trimmed.split_once('/') {
            Some((bucket, object)) => Self {
                bucket: bucket.to_string(),
                object: object.to_string(),
            },
            None => Self {
                bucket: trimmed.to_string(),
                object: String::new(),
            },
        }
    }

    pub fn has_bucket(&self) -> bool {
        !self.bucket.is_empty()
    }

    pub fn has_object(&self) -> bool {
        !self.object.is_empty()
    }
}
