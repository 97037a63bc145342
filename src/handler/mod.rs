//! Operation handlers
//!
//! The storage side of the emulator implements [`S3Handler`]. The router only
//! produces an [`S3Operation`]; [`invoke`] pattern-matches it onto exactly one
//! handler method and hands back whatever that method returns.

use crate::router::{QueryMarkers, S3Operation, UploadId};
use crate::s3::{S3Error, REQUEST_ID_HEADER};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};

pub mod probe;

pub use probe::ProbeHandler;

/// Handler result
pub type HandlerResult = Result<S3Response, S3Error>;

/// Request context passed to every handler method
#[derive(Debug, Clone, Default)]
pub struct HandlerRequest {
    pub headers: HeaderMap,
    pub query: QueryMarkers,
    pub body: Bytes,
}

/// Response produced by a handler
#[derive(Debug, Clone)]
pub struct S3Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl S3Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Convert into a hyper response, stamping the request id
    pub fn into_http(self, request_id: &str) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        if let Ok(value) = HeaderValue::from_str(request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

/// Storage-side entry points, one per routed operation
///
/// Every method defaults to [`S3Error::NotImplemented`], so a backend only
/// overrides what it supports.
#[async_trait]
pub trait S3Handler: Send + Sync {
    async fn list_buckets(&self, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("ListBuckets"))
    }

    async fn get_bucket(&self, _bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("ListObjects"))
    }

    async fn create_bucket(&self, _bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("CreateBucket"))
    }

    async fn delete_bucket(&self, _bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("DeleteBucket"))
    }

    async fn head_bucket(&self, _bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("HeadBucket"))
    }

    /// Multi-object delete (`POST /{bucket}?delete`)
    async fn delete_objects(&self, _bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("DeleteObjects"))
    }

    /// Browser form upload (`POST /{bucket}`)
    async fn post_object(&self, _bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("PostObject"))
    }

    async fn get_object(
        &self,
        _bucket: &str,
        _object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("GetObject"))
    }

    async fn put_object(
        &self,
        _bucket: &str,
        _object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("PutObject"))
    }

    async fn delete_object(
        &self,
        _bucket: &str,
        _object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("DeleteObject"))
    }

    async fn head_object(
        &self,
        _bucket: &str,
        _object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("HeadObject"))
    }

    /// Bucket and object may be empty here; validating them is up to the
    /// implementation.
    async fn list_multipart_uploads(&self, _bucket: &str, _req: &HandlerRequest) -> HandlerResult {
        Err(S3Error::not_implemented("ListMultipartUploads"))
    }

    async fn create_multipart_upload(
        &self,
        _bucket: &str,
        _object: &str,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("CreateMultipartUpload"))
    }

    async fn list_parts(
        &self,
        _bucket: &str,
        _object: &str,
        _upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("ListParts"))
    }

    async fn upload_part(
        &self,
        _bucket: &str,
        _object: &str,
        _upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("UploadPart"))
    }

    async fn abort_multipart_upload(
        &self,
        _bucket: &str,
        _object: &str,
        _upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("AbortMultipartUpload"))
    }

    async fn complete_multipart_upload(
        &self,
        _bucket: &str,
        _object: &str,
        _upload_id: &UploadId,
        _req: &HandlerRequest,
    ) -> HandlerResult {
        Err(S3Error::not_implemented("CompleteMultipartUpload"))
    }
}

/// Call the handler method matching `operation`
pub async fn invoke(
    handler: &dyn S3Handler,
    operation: &S3Operation,
    req: &HandlerRequest,
) -> HandlerResult {
    use S3Operation::*;

    match operation {
        ListBuckets => handler.list_buckets(req).await,
        GetBucket { bucket } => handler.get_bucket(bucket, req).await,
        CreateBucket { bucket } => handler.create_bucket(bucket, req).await,
        DeleteBucket { bucket } => handler.delete_bucket(bucket, req).await,
        HeadBucket { bucket } => handler.head_bucket(bucket, req).await,
        DeleteObjects { bucket } => handler.delete_objects(bucket, req).await,
        PostObject { bucket } => handler.post_object(bucket, req).await,
        GetObject { bucket, object } => handler.get_object(bucket, object, req).await,
        PutObject { bucket, object } => handler.put_object(bucket, object, req).await,
        DeleteObject { bucket, object } => handler.delete_object(bucket, object, req).await,
        HeadObject { bucket, object } => handler.head_object(bucket, object, req).await,
        ListMultipartUploads { bucket } => handler.list_multipart_uploads(bucket, req).await,
        CreateMultipartUpload { bucket, object } => {
            handler.create_multipart_upload(bucket, object, req).await
        }
        ListParts {
            bucket,
            object,
            upload_id,
        } => handler.list_parts(bucket, object, upload_id, req).await,
        UploadPart {
            bucket,
            object,
            upload_id,
        } => handler.upload_part(bucket, object, upload_id, req).await,
        AbortMultipartUpload {
            bucket,
            object,
            upload_id,
        } => {
            handler
                .abort_multipart_upload(bucket, object, upload_id, req)
                .await
        }
        CompleteMultipartUpload {
            bucket,
            object,
            upload_id,
        } => {
            handler
                .complete_multipart_upload(bucket, object, upload_id, req)
                .await
        }
    }
}
