//! S3 API Router
//!
//! Maps `(method, path, query)` onto exactly one S3 operation.
//!
//! S3 overloads the `/{bucket}/{object}` shape with query markers, so the
//! top-level decision is an ordered table of guards. The first matching row
//! wins:
//!
//! | # | Guard                         | Stage                         |
//! |---|-------------------------------|-------------------------------|
//! | 1 | non-empty `uploadId`          | [`RouteStage::MultipartPart`] |
//! | 2 | `uploads` present             | [`RouteStage::MultipartBase`] |
//! | 3 | bucket and object non-empty   | [`RouteStage::Object`]        |
//! | 4 | bucket non-empty              | [`RouteStage::Bucket`]        |
//! | 5 | `GET`                         | [`RouteStage::ListBuckets`]   |
//! | 6 | anything else                 | [`RouteStage::NotFound`]      |
//!
//! Stages 1-4 then map the HTTP verb, failing with
//! [`RouterError::MethodNotAllowed`] when the shape has no such operation.
//! Stage 6 yields [`Route::NotFound`], which is not an error.

mod dispatch;
pub mod operation;
pub mod path;
pub mod query;

pub use operation::{S3Operation, UploadId};
pub use path::ParsedPath;
pub use query::QueryMarkers;

use hyper::Method;
use std::fmt;
use thiserror::Error;

/// Router errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("Method not allowed: {method} is not supported for {stage} requests")]
    MethodNotAllowed { method: Method, stage: RouteStage },
}

/// Top-level branch selected for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteStage {
    MultipartPart,
    MultipartBase,
    Object,
    Bucket,
    ListBuckets,
    NotFound,
}

impl RouteStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipartPart => "multipart_part",
            Self::MultipartBase => "multipart_base",
            Self::Object => "object",
            Self::Bucket => "bucket",
            Self::ListBuckets => "list_buckets",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for RouteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful routing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Operation(S3Operation),
    /// No route shape matched; reported directly, never translated
    NotFound,
}

/// Routing input: method, parsed path and query markers
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub method: Method,
    pub path: ParsedPath,
    pub query: QueryMarkers,
}

impl RouteRequest {
    /// Build from a raw path and optional raw query string
    pub fn new(method: Method, path: &str, query: Option<&str>) -> Self {
        Self {
            method,
            path: ParsedPath::parse(path),
            query: QueryMarkers::from_query(query),
        }
    }

    /// Build from the parts of an incoming request
    pub fn from_http<B>(req: &hyper::Request<B>) -> Self {
        Self::new(req.method().clone(), req.uri().path(), req.uri().query())
    }
}

type Guard = fn(&RouteRequest) -> bool;
type Dispatch = fn(&RouteRequest) -> Result<Route, RouterError>;

struct RouteRule {
    stage: RouteStage,
    guard: Guard,
    dispatch: Dispatch,
}

/// Evaluated top to bottom; the last row always matches.
static ROUTE_TABLE: [RouteRule; 6] = [
    RouteRule {
        stage: RouteStage::MultipartPart,
        guard: |req| !req.query.upload_id().is_empty(),
        dispatch: |req| {
            dispatch::multipart_part(req, req.query.upload_id()).map(Route::Operation)
        },
    },
    RouteRule {
        stage: RouteStage::MultipartBase,
        guard: |req| req.query.has_uploads(),
        dispatch: |req| dispatch::multipart_base(req).map(Route::Operation),
    },
    RouteRule {
        stage: RouteStage::Object,
        guard: |req| req.path.has_bucket() && req.path.has_object(),
        dispatch: |req| dispatch::object(req).map(Route::Operation),
    },
    RouteRule {
        stage: RouteStage::Bucket,
        guard: |req| req.path.has_bucket(),
        dispatch: |req| dispatch::bucket(req).map(Route::Operation),
    },
    RouteRule {
        stage: RouteStage::ListBuckets,
        guard: |req| req.method == Method::GET,
        dispatch: |_| Ok(Route::Operation(S3Operation::ListBuckets)),
    },
    RouteRule {
        stage: RouteStage::NotFound,
        guard: |_| true,
        dispatch: |_| Ok(Route::NotFound),
    },
];

/// Stateless S3 request router
pub struct S3Router;

impl S3Router {
    /// Route a request to its operation
    pub fn route(req: &RouteRequest) -> Result<Route, RouterError> {
        Self::route_with_stage(req).1
    }

    /// Route a request, also reporting the stage that decided it
    pub fn route_with_stage(req: &RouteRequest) -> (RouteStage, Result<Route, RouterError>) {
        let rule = Self::select(req);
        (rule.stage, (rule.dispatch)(req))
    }

    /// Stage the top-level table selects, without dispatching on the verb
    pub fn stage(req: &RouteRequest) -> RouteStage {
        Self::select(req).stage
    }

    /// Convenience wrapper over [`RouteRequest::new`] and [`S3Router::route`]
    pub fn parse(method: Method, path: &str, query: Option<&str>) -> Result<Route, RouterError> {
        Self::route(&RouteRequest::new(method, path, query))
    }

    fn select(req: &RouteRequest) -> &'static RouteRule {
        ROUTE_TABLE
            .iter()
            .find(|rule| (rule.guard)(req))
            .unwrap_or(&ROUTE_TABLE[ROUTE_TABLE.len() - 1])
    }
}
