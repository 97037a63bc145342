//! Probe handler
//!
//! Answers every operation with a JSON description of the route decision
//! instead of touching storage. Pointing an S3 client at a probe server shows
//! exactly which operation each of its requests was routed to.

use super::{HandlerRequest, HandlerResult, S3Handler, S3Response};
use crate::router::{S3Operation, UploadId};
use crate::s3::S3Error;
use async_trait::async_trait;
use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::debug;

/// Header naming the routed operation on every probe response
pub const PROBE_OPERATION_HEADER: &str = "x-probe-operation";

/// Handler that reports route decisions
#[derive(Debug, Default, Clone)]
pub struct ProbeHandler;

impl ProbeHandler {
    pub fn new() -> Self {
        Self
    }

    fn describe(&self, operation: S3Operation, with_body: bool) -> HandlerResult {
        debug!(operation = operation.name(), "Probe answering");

        let mut response = S3Response::ok().with_header(
            HeaderName::from_static(PROBE_OPERATION_HEADER),
            HeaderValue::from_static(operation.name()),
        );

        if with_body {
            let body = serde_json::to_vec(&operation).map_err(|e| S3Error::InternalError {
                message: e.to_string(),
            })?;
            response = response
                .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .with_body(body);
        }

        Ok(response)
    }
}

#[async_trait]
impl S3Handler for ProbeHandler {
    async fn list_buckets(&self, _req: &HandlerRequest) -> HandlerResult {
        self.describe(S3Operation::ListBuckets, true)
    }

    async fn get_bucket(&self, bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::GetBucket {
                bucket: bucket.into(),
            },
            true,
        )
    }

    async fn create_bucket(&self, bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::CreateBucket {
                bucket: bucket.into(),
            },
            true,
        )
    }

    async fn delete_bucket(&self, bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::DeleteBucket {
                bucket: bucket.into(),
            },
            true,
        )
    }

    async fn head_bucket(&self, bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::HeadBucket {
                bucket: bucket.into(),
            },
            false,
        )
    }

    async fn delete_objects(&self, bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::DeleteObjects {
                bucket: bucket.into(),
            },
            true,
        )
    }

    async fn post_object(&self, bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::PostObject {
                bucket: bucket.into(),
            },
            true,
        )
    }

    async fn get_object(&self, bucket: &str, object: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::GetObject {
                bucket: bucket.into(),
                object: object.into(),
            },
            true,
        )
    }

    async fn put_object(&self, bucket: &str, object: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::PutObject {
                bucket: bucket.into(),
                object: object.into(),
            },
            true,
        )
    }

    async fn delete_object(
        &self,
        bucket: &str,
        object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        self.describe(
            S3Operation::DeleteObject {
                bucket: bucket.into(),
                object: object.into(),
            },
            true,
        )
    }

    async fn head_object(
        &self,
        bucket: &str,
        object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        self.describe(
            S3Operation::HeadObject {
                bucket: bucket.into(),
                object: object.into(),
            },
            false,
        )
    }

    async fn list_multipart_uploads(&self, bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        self.describe(
            S3Operation::ListMultipartUploads {
                bucket: bucket.into(),
            },
            true,
        )
    }

    async fn create_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        self.describe(
            S3Operation::CreateMultipartUpload {
                bucket: bucket.into(),
                object: object.into(),
            },
            true,
        )
    }

    async fn list_parts(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        self.describe(
            S3Operation::ListParts {
                bucket: bucket.into(),
                object: object.into(),
                upload_id: upload_id.clone(),
            },
            true,
        )
    }

    async fn upload_part(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        self.describe(
            S3Operation::UploadPart {
                bucket: bucket.into(),
                object: object.into(),
                upload_id: upload_id.clone(),
            },
            true,
        )
    }

    async fn abort_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        self.describe(
            S3Operation::AbortMultipartUpload {
                bucket: bucket.into(),
                object: object.into(),
                upload_id: upload_id.clone(),
            },
            true,
        )
    }

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        self.describe(
            S3Operation::CompleteMultipartUpload {
                bucket: bucket.into(),
                object: object.into(),
                upload_id: upload_id.clone(),
            },
            true,
        )
    }
}
