//! S3 error translation
//!
//! Turns router and handler failures into S3 `<Error>` responses. The
//! not-found terminal never passes through here.

pub mod xml;

use crate::router::RouterError;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use thiserror::Error;
use tracing::error;

/// Header carrying the per-request identifier
pub const REQUEST_ID_HEADER: &str = "x-amz-request-id";

/// Generate a request identifier
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string().to_uppercase()
}

/// S3 errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum S3Error {
    #[error("The specified method is not allowed against this resource.")]
    MethodNotAllowed { method: String, stage: String },

    #[error("The specified bucket does not exist")]
    NoSuchBucket { bucket: String },

    #[error("The specified key does not exist.")]
    NoSuchKey { key: String },

    #[error("The specified upload does not exist. The upload ID may be invalid, or the upload may have been aborted or completed.")]
    NoSuchUpload { upload_id: String },

    #[error("{message}")]
    InvalidArgument { message: String },

    #[error("{operation} is not implemented")]
    NotImplemented { operation: String },

    #[error("We encountered an internal error. Please try again.")]
    InternalError { message: String },
}

impl S3Error {
    pub fn not_implemented(operation: &str) -> Self {
        Self::NotImplemented {
            operation: operation.to_string(),
        }
    }

    /// S3 error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed { .. } => "MethodNotAllowed",
            Self::NoSuchBucket { .. } => "NoSuchBucket",
            Self::NoSuchKey { .. } => "NoSuchKey",
            Self::NoSuchUpload { .. } => "NoSuchUpload",
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::NotImplemented { .. } => "NotImplemented",
            Self::InternalError { .. } => "InternalError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NoSuchBucket { .. } | Self::NoSuchKey { .. } | Self::NoSuchUpload { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            Self::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
            Self::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Encode as an HTTP response
    ///
    /// `with_body` is false for HEAD requests, which only get the status and
    /// headers.
    pub fn to_response(
        &self,
        resource: &str,
        request_id: &str,
        with_body: bool,
    ) -> Response<Full<Bytes>> {
        let body = if with_body {
            match xml::render_error(self.code(), &self.to_string(), resource, request_id) {
                Ok(doc) => Bytes::from(doc),
                Err(e) => {
                    error!(
                        error = %e,
                        code = self.code(),
                        "Failed to render error document"
                    );
                    Bytes::new()
                }
            }
        } else {
            Bytes::new()
        };

        let mut response = Response::new(Full::new(body));
        *response.status_mut() = self.status();
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        if let Ok(value) = HeaderValue::from_str(request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

impl From<RouterError> for S3Error {
    fn from(err: RouterError) -> Self {
        match err {
            RouterError::MethodNotAllowed { method, stage } => Self::MethodNotAllowed {
                method: method.to_string(),
                stage: stage.to_string(),
            },
        }
    }
}
