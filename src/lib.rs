//! s3emu-router
//!
//! Request routing layer for an S3-compatible object storage emulator.
//!
//! # Features
//!
//! - **Path-style addressing**: `/{bucket}/{object}` with query-marker overloads
//! - **Multipart aware**: `?uploads` and `?uploadId=` select the multipart sub-protocol
//! - **Typed decisions**: every route is an [`router::S3Operation`] value
//! - **Pluggable storage**: implement [`handler::S3Handler`] for the operations you support
//!
//! # Example
//!
//! ```
//! use hyper::Method;
//! use s3emu_router::router::{Route, S3Operation, S3Router};
//!
//! let route = S3Router::parse(Method::GET, "/my-bucket", Some("uploads")).unwrap();
//! assert_eq!(
//!     route,
//!     Route::Operation(S3Operation::ListMultipartUploads {
//!         bucket: "my-bucket".into()
//!     })
//! );
//! ```

pub mod config;
pub mod handler;
pub mod logging;
pub mod metrics;
pub mod router;
pub mod s3;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use router::{Route, S3Operation, S3Router};
pub use server::Server;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
