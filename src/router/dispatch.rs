//! Per-shape verb dispatchers
//!
//! Each function assumes the top-level table already matched its shape and
//! only maps the HTTP method. An unsupported verb is reported as
//! [`RouterError::MethodNotAllowed`].

use super::{RouteRequest, RouteStage, RouterError, S3Operation, UploadId};
use hyper::Method;

/// Non-empty bucket and object
pub(super) fn object(req: &RouteRequest) -> Result<S3Operation, RouterError> {
    let bucket = req.path.bucket.clone();
    let object = req.path.object.clone();

    match req.method {
        Method::GET => Ok(S3Operation::GetObject { bucket, object }),
        Method::PUT => Ok(S3Operation::PutObject { bucket, object }),
        Method::DELETE => Ok(S3Operation::DeleteObject { bucket, object }),
        Method::HEAD => Ok(S3Operation::HeadObject { bucket, object }),
        _ => Err(not_allowed(req, RouteStage::Object)),
    }
}

/// Non-empty bucket, empty object
pub(super) fn bucket(req: &RouteRequest) -> Result<S3Operation, RouterError> {
    let bucket = req.path.bucket.clone();

    match req.method {
        Method::GET => Ok(S3Operation::GetBucket { bucket }),
        Method::PUT => Ok(S3Operation::CreateBucket { bucket }),
        Method::DELETE => Ok(S3Operation::DeleteBucket { bucket }),
        Method::HEAD => Ok(S3Operation::HeadBucket { bucket }),
        Method::POST if req.query.has_delete() => Ok(S3Operation::DeleteObjects { bucket }),
        Method::POST => Ok(S3Operation::PostObject { bucket }),
        _ => Err(not_allowed(req, RouteStage::Bucket)),
    }
}

/// `?uploads` present; bucket and object may be empty
pub(super) fn multipart_base(req: &RouteRequest) -> Result<S3Operation, RouterError> {
    let bucket = req.path.bucket.clone();

    match req.method {
        Method::GET => Ok(S3Operation::ListMultipartUploads { bucket }),
        Method::POST => Ok(S3Operation::CreateMultipartUpload {
            bucket,
            object: req.path.object.clone(),
        }),
        _ => Err(not_allowed(req, RouteStage::MultipartBase)),
    }
}

/// Non-empty `?uploadId=X`
pub(super) fn multipart_part(
    req: &RouteRequest,
    upload_id: UploadId,
) -> Result<S3Operation, RouterError> {
    let bucket = req.path.bucket.clone();
    let object = req.path.object.clone();

    match req.method {
        Method::GET => Ok(S3Operation::ListParts {
            bucket,
            object,
            upload_id,
        }),
        Method::PUT => Ok(S3Operation::UploadPart {
            bucket,
            object,
            upload_id,
        }),
        Method::DELETE => Ok(S3Operation::AbortMultipartUpload {
            bucket,
            object,
            upload_id,
        }),
        Method::POST => Ok(S3Operation::CompleteMultipartUpload {
            bucket,
            object,
            upload_id,
        }),
        _ => Err(not_allowed(req, RouteStage::MultipartPart)),
    }
}

fn not_allowed(req: &RouteRequest, stage: RouteStage) -> RouterError {
    RouterError::MethodNotAllowed {
        method: req.method.clone(),
        stage,
    }
}
