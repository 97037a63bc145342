//! Per-request handling
//!
//! route -> (not found | method not allowed | handler) -> response

use crate::handler::{self, HandlerRequest, S3Handler};
use crate::metrics;
use crate::router::{Route, RouteRequest, RouterError, S3Router};
use crate::s3::{generate_request_id, S3Error};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn, Instrument};

pub(super) async fn handle_request(
    req: Request<Incoming>,
    handler: Arc<dyn S3Handler>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let request_id = generate_request_id();
    let span = tracing::info_span!(
        "http.request",
        http.method = %req.method(),
        http.target = %req.uri().path(),
        request_id = %request_id,
    );

    Ok(respond(req, handler, request_id).instrument(span).await)
}

async fn respond(
    req: Request<Incoming>,
    handler: Arc<dyn S3Handler>,
    request_id: String,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let (label, response) = dispatch(req, handler, &request_id).await;
    metrics::record_request_duration(label, started.elapsed().as_secs_f64());
    response
}

/// Route and answer one request; returns the duration label with the response
async fn dispatch(
    req: Request<Incoming>,
    handler: Arc<dyn S3Handler>,
    request_id: &str,
) -> (&'static str, Response<Full<Bytes>>) {
    let route_req = RouteRequest::from_http(&req);
    let resource = req.uri().path().to_string();
    let with_body = route_req.method != Method::HEAD;

    let (stage, decision) = S3Router::route_with_stage(&route_req);
    let operation = match decision {
        Ok(Route::Operation(op)) => op,
        Ok(Route::NotFound) => {
            info!(stage = %stage, "No route matched");
            metrics::record_not_found();
            return (metrics::NOT_FOUND, not_found());
        }
        Err(err @ RouterError::MethodNotAllowed { .. }) => {
            info!(error = %err, "Rejected request");
            metrics::record_method_not_allowed();
            let err = S3Error::from(err);
            metrics::record_error(err.code());
            let response = err.to_response(&resource, request_id, with_body);
            return (metrics::METHOD_NOT_ALLOWED, response);
        }
    };

    debug!(stage = %stage, operation = operation.name(), "Routed request");
    metrics::record_route(stage.as_str(), operation.name());

    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "Failed to read request body");
            let err = S3Error::InvalidArgument {
                message: format!("Failed to read body: {}", e),
            };
            metrics::record_error(err.code());
            let response = err.to_response(&resource, request_id, with_body);
            return (operation.name(), response);
        }
    };

    let handler_req = HandlerRequest {
        headers: parts.headers,
        query: route_req.query,
        body,
    };

    let response = match handler::invoke(handler.as_ref(), &operation, &handler_req).await {
        Ok(response) => response.into_http(request_id),
        Err(err) => {
            if err.status().is_server_error() {
                error!(
                    operation = operation.name(),
                    code = err.code(),
                    error = %err,
                    "Handler failed"
                );
            } else {
                warn!(
                    operation = operation.name(),
                    code = err.code(),
                    "Handler returned error"
                );
            }
            metrics::record_error(err.code());
            err.to_response(&resource, request_id, with_body)
        }
    };

    (operation.name(), response)
}

fn not_found() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(b"Not Found")));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}
