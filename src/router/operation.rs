//! Route decisions
//!
//! Every operation the router can select, each carrying only the addressing
//! parameters its handler needs.

use serde::Serialize;
use std::fmt;

/// Opaque multipart upload session token
///
/// The router never validates it; an empty token means "no upload".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UploadId(String);

impl UploadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UploadId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// S3 operation types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation")]
pub enum S3Operation {
    /// GET /
    ListBuckets,
    /// GET /{bucket}
    GetBucket { bucket: String },
    /// PUT /{bucket}
    CreateBucket { bucket: String },
    /// DELETE /{bucket}
    DeleteBucket { bucket: String },
    /// HEAD /{bucket}
    HeadBucket { bucket: String },
    /// POST /{bucket}?delete
    DeleteObjects { bucket: String },
    /// POST /{bucket} (HTML form upload)
    PostObject { bucket: String },
    /// GET /{bucket}/{object}
    GetObject { bucket: String, object: String },
    /// PUT /{bucket}/{object}
    PutObject { bucket: String, object: String },
    /// DELETE /{bucket}/{object}
    DeleteObject { bucket: String, object: String },
    /// HEAD /{bucket}/{object}
    HeadObject { bucket: String, object: String },
    /// GET /{bucket}?uploads
    ListMultipartUploads { bucket: String },
    /// POST /{bucket}/{object}?uploads
    CreateMultipartUpload { bucket: String, object: String },
    /// GET /{bucket}/{object}?uploadId=X
    ListParts {
        bucket: String,
        object: String,
        upload_id: UploadId,
    },
    /// PUT /{bucket}/{object}?uploadId=X
    UploadPart {
        bucket: String,
        object: String,
        upload_id: UploadId,
    },
    /// DELETE /{bucket}/{object}?uploadId=X
    AbortMultipartUpload {
        bucket: String,
        object: String,
        upload_id: UploadId,
    },
    /// POST /{bucket}/{object}?uploadId=X
    CompleteMultipartUpload {
        bucket: String,
        object: String,
        upload_id: UploadId,
    },
}

impl S3Operation {
    /// S3 API name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListBuckets => "ListBuckets",
            Self::GetBucket { .. } => "ListObjects",
            Self::CreateBucket { .. } => "CreateBucket",
            Self::DeleteBucket { .. } => "DeleteBucket",
            Self::HeadBucket { .. } => "HeadBucket",
            Self::DeleteObjects { .. } => "DeleteObjects",
            Self::PostObject { .. } => "PostObject",
            Self::GetObject { .. } => "GetObject",
            Self::PutObject { .. } => "PutObject",
            Self::DeleteObject { .. } => "DeleteObject",
            Self::HeadObject { .. } => "HeadObject",
            Self::ListMultipartUploads { .. } => "ListMultipartUploads",
            Self::CreateMultipartUpload { .. } => "CreateMultipartUpload",
            Self::ListParts { .. } => "ListParts",
            Self::UploadPart { .. } => "UploadPart",
            Self::AbortMultipartUpload { .. } => "AbortMultipartUpload",
            Self::CompleteMultipartUpload { .. } => "CompleteMultipartUpload",
        }
    }

    /// Bucket the operation addresses, if any
    pub fn bucket(&self) -> Option<&str> {
        match self {
            Self::ListBuckets => None,
            Self::GetBucket { bucket }
            | Self::CreateBucket { bucket }
            | Self::DeleteBucket { bucket }
            | Self::HeadBucket { bucket }
            | Self::DeleteObjects { bucket }
            | Self::PostObject { bucket }
            | Self::ListMultipartUploads { bucket } => Some(bucket),
            Self::GetObject { bucket, .. }
            | Self::PutObject { bucket, .. }
            | Self::DeleteObject { bucket, .. }
            | Self::HeadObject { bucket, .. }
            | Self::CreateMultipartUpload { bucket, .. }
            | Self::ListParts { bucket, .. }
            | Self::UploadPart { bucket, .. }
            | Self::AbortMultipartUpload { bucket, .. }
            | Self::CompleteMultipartUpload { bucket, .. } => Some(bucket),
        }
    }

    /// Object key the operation addresses, if any
    pub fn object(&self) -> Option<&str> {
        match self {
            Self::GetObject { object, .. }
            | Self::PutObject { object, .. }
            | Self::DeleteObject { object, .. }
            | Self::HeadObject { object, .. }
            | Self::CreateMultipartUpload { object, .. }
            | Self::ListParts { object, .. }
            | Self::UploadPart { object, .. }
            | Self::AbortMultipartUpload { object, .. }
            | Self::CompleteMultipartUpload { object, .. } => Some(object),
            _ => None,
        }
    }

    /// Upload session the operation addresses, if any
    pub fn upload_id(&self) -> Option<&UploadId> {
        match self {
            Self::ListParts { upload_id, .. }
            | Self::UploadPart { upload_id, .. }
            | Self::AbortMultipartUpload { upload_id, .. }
            | Self::CompleteMultipartUpload { upload_id, .. } => Some(upload_id),
            _ => None,
        }
    }

    /// Resource string used in error documents, e.g. `/bucket/key`
    pub fn resource(&self) -> String {
        match (self.bucket(), self.object()) {
            (Some(bucket), Some(object)) => format!("/{}/{}", bucket, object),
            (Some(bucket), None) => format!("/{}", bucket),
            _ => "/".to_string(),
        }
    }
}

impl fmt::Display for S3Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
