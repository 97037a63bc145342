//! Query-string markers
//!
//! Only three parameters steer routing: `uploadId`, `uploads` and `delete`.
//! Everything else is carried through untouched for the operation handlers.

use super::operation::UploadId;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

pub const UPLOAD_ID: &str = "uploadId";
pub const UPLOADS: &str = "uploads";
pub const DELETE: &str = "delete";

/// Multi-valued query parameter mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMarkers {
    params: HashMap<String, Vec<String>>,
}

impl QueryMarkers {
    /// Parse a raw query string (without the leading `?`)
    ///
    /// Pairs are `&`-separated; `+` decodes to a space and `%XX` escapes are
    /// decoded in both names and values. A pair without `=` has an empty value.
    /// A pair whose name or value holds a malformed escape is dropped.
    pub fn parse(query: &str) -> Self {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(name), Some(value)) = (decode_component(name), decode_component(value))
            else {
                continue;
            };
            params.entry(name).or_default().push(value);
        }

        Self { params }
    }

    /// Parse an optional query string, as returned by `Uri::query`
    pub fn from_query(query: Option<&str>) -> Self {
        query.map(Self::parse).unwrap_or_default()
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `name`, in request order
    pub fn get_all(&self, name: &str) -> &[String] {
        self.params.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Presence check, regardless of value
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Upload session named by the first `uploadId` value; empty when absent
    pub fn upload_id(&self) -> UploadId {
        UploadId::new(self.get(UPLOAD_ID).unwrap_or_default())
    }

    pub fn has_uploads(&self) -> bool {
        self.contains(UPLOADS)
    }

    pub fn has_delete(&self) -> bool {
        self.contains(DELETE)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn decode_component(s: &str) -> Option<String> {
    if !has_valid_escapes(s) {
        return None;
    }
    let spaced = s.replace('+', " ");
    Some(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}

/// Every `%` must start a two-digit hex escape
fn has_valid_escapes(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3) {
            Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
            _ => return false,
        }
    }
    true
}
