//! Router Integration Tests
//!
//! Decision table coverage, marker precedence and the routing properties that
//! must hold for arbitrary bucket and object names.

use hyper::Method;
use rand::distr::Alphanumeric;
use rand::Rng;
use s3emu_router::router::{
    Route, RouteRequest, RouteStage, RouterError, S3Operation, S3Router, UploadId,
};

fn route(method: Method, path: &str, query: Option<&str>) -> Result<Route, RouterError> {
    S3Router::parse(method, path, query)
}

fn op(method: Method, path: &str, query: Option<&str>) -> S3Operation {
    match route(method.clone(), path, query) {
        Ok(Route::Operation(op)) => op,
        other => panic!(
            "{} {} {:?}: expected operation, got {:?}",
            method, path, query, other
        ),
    }
}

fn random_name(rng: &mut impl Rng) -> String {
    let len = rng.random_range(1..24);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

const ALL_METHODS: [&str; 9] = [
    "GET", "PUT", "DELETE", "HEAD", "POST", "PATCH", "OPTIONS", "TRACE", "PROPFIND",
];

fn methods() -> Vec<Method> {
    ALL_METHODS
        .iter()
        .map(|m| Method::from_bytes(m.as_bytes()).unwrap())
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

/// Test: PUT /my-bucket/key.txt creates the object
#[test]
fn test_put_object_scenario() {
    assert_eq!(
        op(Method::PUT, "/my-bucket/key.txt", None),
        S3Operation::PutObject {
            bucket: "my-bucket".into(),
            object: "key.txt".into()
        }
    );
}

/// Test: GET /my-bucket?uploads lists multipart uploads
#[test]
fn test_list_multipart_uploads_scenario() {
    assert_eq!(
        op(Method::GET, "/my-bucket", Some("uploads")),
        S3Operation::ListMultipartUploads {
            bucket: "my-bucket".into()
        }
    );
}

/// Test: POST /my-bucket/key.txt?uploadId=abc123 completes the upload
#[test]
fn test_complete_upload_scenario() {
    assert_eq!(
        op(Method::POST, "/my-bucket/key.txt", Some("uploadId=abc123")),
        S3Operation::CompleteMultipartUpload {
            bucket: "my-bucket".into(),
            object: "key.txt".into(),
            upload_id: UploadId::new("abc123"),
        }
    );
}

/// Test: POST /my-bucket?delete is a multi-object delete
#[test]
fn test_bulk_delete_scenario() {
    assert_eq!(
        op(Method::POST, "/my-bucket", Some("delete")),
        S3Operation::DeleteObjects {
            bucket: "my-bucket".into()
        }
    );
}

/// Test: POST on the empty path matches no route
#[test]
fn test_root_post_not_found_scenario() {
    assert_eq!(route(Method::POST, "", None), Ok(Route::NotFound));
    assert_eq!(route(Method::POST, "/", None), Ok(Route::NotFound));
}

/// Test: PATCH on an object is method-not-allowed
#[test]
fn test_patch_object_scenario() {
    assert_eq!(
        route(Method::PATCH, "/my-bucket/key.txt", None),
        Err(RouterError::MethodNotAllowed {
            method: Method::PATCH,
            stage: RouteStage::Object,
        })
    );
}

// ============================================================================
// Decision table
// ============================================================================

#[test]
fn test_bucket_operations() {
    let bucket = || "photos".to_string();
    assert_eq!(
        op(Method::GET, "/photos", None),
        S3Operation::GetBucket { bucket: bucket() }
    );
    assert_eq!(
        op(Method::PUT, "/photos/", None),
        S3Operation::CreateBucket { bucket: bucket() }
    );
    assert_eq!(
        op(Method::DELETE, "/photos", None),
        S3Operation::DeleteBucket { bucket: bucket() }
    );
    assert_eq!(
        op(Method::HEAD, "/photos", None),
        S3Operation::HeadBucket { bucket: bucket() }
    );
    assert_eq!(
        op(Method::POST, "/photos", None),
        S3Operation::PostObject { bucket: bucket() }
    );
    assert!(matches!(
        route(Method::OPTIONS, "/photos", None),
        Err(RouterError::MethodNotAllowed {
            stage: RouteStage::Bucket,
            ..
        })
    ));
}

#[test]
fn test_object_operations() {
    let expect = |method: Method| op(method, "/photos/2024/cat.jpg", None);
    let (bucket, object) = ("photos".to_string(), "2024/cat.jpg".to_string());

    assert_eq!(
        expect(Method::GET),
        S3Operation::GetObject {
            bucket: bucket.clone(),
            object: object.clone()
        }
    );
    assert_eq!(
        expect(Method::DELETE),
        S3Operation::DeleteObject {
            bucket: bucket.clone(),
            object: object.clone()
        }
    );
    assert_eq!(expect(Method::HEAD), S3Operation::HeadObject { bucket, object });
}

#[test]
fn test_multipart_part_operations() {
    let upload_id = UploadId::new("u-1");
    let cases = [
        (Method::GET, "ListParts"),
        (Method::PUT, "UploadPart"),
        (Method::DELETE, "AbortMultipartUpload"),
        (Method::POST, "CompleteMultipartUpload"),
    ];

    for (method, name) in cases {
        let decided = op(method, "/b/k", Some("uploadId=u-1&partNumber=3"));
        assert_eq!(decided.name(), name);
        assert_eq!(decided.upload_id(), Some(&upload_id));
    }

    assert!(matches!(
        route(Method::HEAD, "/b/k", Some("uploadId=u-1")),
        Err(RouterError::MethodNotAllowed {
            stage: RouteStage::MultipartPart,
            ..
        })
    ));
}

#[test]
fn test_multipart_base_ignores_path_shape() {
    // bucket and object validity is the storage side's problem
    assert_eq!(
        op(Method::GET, "/", Some("uploads")),
        S3Operation::ListMultipartUploads {
            bucket: String::new()
        }
    );
    assert_eq!(
        op(Method::POST, "/b", Some("uploads=ignored")),
        S3Operation::CreateMultipartUpload {
            bucket: "b".into(),
            object: String::new()
        }
    );
    assert_eq!(
        op(Method::GET, "/b/k", Some("uploads")),
        S3Operation::ListMultipartUploads { bucket: "b".into() }
    );
    assert!(matches!(
        route(Method::DELETE, "/b/k", Some("uploads")),
        Err(RouterError::MethodNotAllowed {
            stage: RouteStage::MultipartBase,
            ..
        })
    ));
}

#[test]
fn test_delete_marker_only_matters_for_bucket_post() {
    assert_eq!(
        op(Method::GET, "/b", Some("delete")),
        S3Operation::GetBucket { bucket: "b".into() }
    );
    assert_eq!(
        op(Method::POST, "/b/k", Some("uploads&delete")),
        S3Operation::CreateMultipartUpload {
            bucket: "b".into(),
            object: "k".into()
        }
    );
    assert!(route(Method::POST, "/b/k", Some("delete")).is_err());
}

// ============================================================================
// Empty uploadId
// ============================================================================

/// An empty uploadId is treated as absent and falls through
#[test]
fn test_empty_upload_id_falls_through_to_object() {
    assert_eq!(
        op(Method::PUT, "/b/k", Some("uploadId=")),
        S3Operation::PutObject {
            bucket: "b".into(),
            object: "k".into()
        }
    );
    assert!(matches!(
        route(Method::POST, "/b/k", Some("uploadId=")),
        Err(RouterError::MethodNotAllowed {
            stage: RouteStage::Object,
            ..
        })
    ));
}

#[test]
fn test_empty_upload_id_falls_through_to_uploads() {
    assert_eq!(
        op(Method::POST, "/b/k", Some("uploadId=&uploads")),
        S3Operation::CreateMultipartUpload {
            bucket: "b".into(),
            object: "k".into()
        }
    );
}

#[test]
fn test_empty_first_upload_id_wins_over_later_values() {
    assert_eq!(
        op(Method::GET, "/b/k", Some("uploadId=&uploadId=abc")),
        S3Operation::GetObject {
            bucket: "b".into(),
            object: "k".into()
        }
    );
}

// ============================================================================
// Malformed escapes
// ============================================================================

/// A marker whose value cannot be unescaped is not a marker at all
#[test]
fn test_malformed_upload_id_falls_through_to_object() {
    assert_eq!(
        op(Method::PUT, "/b/k", Some("uploadId=%zz")),
        S3Operation::PutObject {
            bucket: "b".into(),
            object: "k".into()
        }
    );
}

#[test]
fn test_malformed_uploads_marker_is_ignored() {
    let req = RouteRequest::new(Method::GET, "/b", Some("uploads=%g1"));
    assert_ne!(S3Router::stage(&req), RouteStage::MultipartBase);
    assert_eq!(
        op(Method::GET, "/b", Some("uploads=%g1")),
        S3Operation::GetBucket { bucket: "b".into() }
    );
}

// ============================================================================
// Properties
// ============================================================================

/// Zero segments + GET is always list-buckets, whatever other markers say
#[test]
fn test_root_get_is_list_buckets() {
    let queries = [
        None,
        Some(""),
        Some("delete"),
        Some("prefix=a&max-keys=2"),
        Some("uploadId="),
    ];
    for query in queries {
        for path in ["", "/", "//"] {
            assert_eq!(op(Method::GET, path, query), S3Operation::ListBuckets);
        }
    }
}

/// Root with any other method and no multipart markers is not found
#[test]
fn test_root_non_get_is_not_found() {
    for method in methods().into_iter().filter(|m| *m != Method::GET) {
        assert_eq!(route(method, "/", Some("delete")), Ok(Route::NotFound));
    }
}

/// Object shape decisions depend only on the method, and never yield not-found
#[test]
fn test_object_shape_never_not_found() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let bucket = random_name(&mut rng);
        let object = format!("{}/{}", random_name(&mut rng), random_name(&mut rng));
        let path = format!("/{}/{}", bucket, object);

        for method in methods() {
            let result = route(method.clone(), &path, Some("versionId=3"));
            match method.as_str() {
                "GET" | "PUT" | "DELETE" | "HEAD" => {
                    let decided = match result {
                        Ok(Route::Operation(op)) => op,
                        other => panic!("unexpected {:?}", other),
                    };
                    assert_eq!(decided.bucket(), Some(bucket.as_str()));
                    assert_eq!(decided.object(), Some(object.as_str()));
                }
                _ => assert!(matches!(
                    result,
                    Err(RouterError::MethodNotAllowed {
                        stage: RouteStage::Object,
                        ..
                    })
                )),
            }
        }
    }
}

/// uploadId beats uploads beats plain shape, for every method and path
#[test]
fn test_marker_precedence() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let both_markers = format!("uploads&uploadId={}", random_name(&mut rng));
        let paths = [
            String::from("/"),
            format!("/{}", random_name(&mut rng)),
            format!("/{}/{}", random_name(&mut rng), random_name(&mut rng)),
        ];

        for path in &paths {
            for method in methods() {
                let both = RouteRequest::new(method.clone(), path, Some(both_markers.as_str()));
                assert_eq!(S3Router::stage(&both), RouteStage::MultipartPart);

                let uploads = RouteRequest::new(method.clone(), path, Some("uploads"));
                assert_eq!(S3Router::stage(&uploads), RouteStage::MultipartBase);
            }
        }
    }
}

/// Exactly one stage per request, and the stage agrees with the outcome
#[test]
fn test_stage_agrees_with_outcome() {
    let queries = [
        None,
        Some("uploads"),
        Some("uploadId=x"),
        Some("delete"),
        Some("uploadId="),
    ];
    let paths = ["", "/b", "/b/", "/b/k", "/b/k/"];

    for method in methods() {
        for path in paths {
            for query in queries {
                let req = RouteRequest::new(method.clone(), path, query);
                let stage = S3Router::stage(&req);
                match S3Router::route(&req) {
                    Ok(Route::NotFound) => assert_eq!(stage, RouteStage::NotFound),
                    Ok(Route::Operation(S3Operation::ListBuckets)) => {
                        assert_eq!(stage, RouteStage::ListBuckets)
                    }
                    Ok(Route::Operation(_)) => assert!(!matches!(
                        stage,
                        RouteStage::NotFound | RouteStage::ListBuckets
                    )),
                    Err(RouterError::MethodNotAllowed { stage: failed, .. }) => {
                        assert_eq!(failed, stage)
                    }
                }
            }
        }
    }
}

/// Identical input, identical decision
#[test]
fn test_routing_is_idempotent() {
    let mut rng = rand::rng();
    for _ in 0..100 {
        let path = format!("/{}/{}", random_name(&mut rng), random_name(&mut rng));
        let query = format!("uploadId={}", random_name(&mut rng));
        for method in methods() {
            let first = route(method.clone(), &path, Some(query.as_str()));
            let second = route(method.clone(), &path, Some(query.as_str()));
            assert_eq!(first, second);
        }
    }
}
