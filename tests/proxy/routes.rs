use axum::http::{HeaderMap, Method, StatusCode};
use nms_apicontroller::handlers::audit_network_call;
use nms_apicontroller::middleware::CallerContext;
use nms_apicontroller::util::{unsafe_path_segment, upstream_path};

use crate::common::*;

#[tokio::test]
async fn test_health_needs_no_token() {
    let host = spawn_controller(StatusCode::OK, "[]").await;
    let app = test_app(&host, true, &[]);

    let (status, body) = send(app, "GET", "/health", None, "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "ok");
}

#[tokio::test]
async fn test_unknown_paths_are_not_found() {
    let host = spawn_controller(StatusCode::OK, "[]").await;
    let app = test_app(&host, true, &[]);

    for uri in [
        "/nms/apicontroller/magma/v1/tenants",
        "/nms/apicontroller/nothing",
        "/elsewhere",
    ] {
        let (status, body) = send(app.clone(), "GET", uri, Some(SUPER_KEY), "").await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(&body[..], b"Not Found");
    }
}

#[tokio::test]
async fn test_channels_are_get_only() {
    let host = spawn_controller(StatusCode::OK, "[]").await;
    let app = test_app(&host, true, &[]);

    let (status, body) = send(
        app.clone(),
        "GET",
        "/nms/apicontroller/magma/channels/stable",
        Some(USER_KEY),
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["path"], "/magma/channels/stable");

    let (status, _) = send(
        app,
        "POST",
        "/nms/apicontroller/magma/channels/stable",
        Some(SUPER_KEY),
        "{}",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_network_list_is_get_only() {
    let host = spawn_controller(StatusCode::OK, "[]").await;
    let app = test_app(&host, true, &[]);

    let (status, _) = send(
        app,
        "POST",
        "/nms/apicontroller/magma/networks",
        Some(SUPER_KEY),
        "{}",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unreachable_controller_is_bad_gateway() {
    // Nothing listens on the discard port
    let app = test_app("http://127.0.0.1:9", true, &[]);

    let (status, _) = send(
        app,
        "GET",
        "/nms/apicontroller/magma/networks/net1",
        Some(SUPER_KEY),
        "",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[test]
fn test_missing_api_host_is_config_error() {
    let config = test_config("", true, &[]);
    assert!(AppState::from_config(&config, test_directory()).is_err());
}

#[test]
fn test_upstream_path_strips_mount_prefix() {
    assert_eq!(upstream_path("/nms/apicontroller/magma/networks", PREFIX), "/magma/networks");
    assert_eq!(
        upstream_path("/nms/apicontroller/magma/v1/lte/n1?view=full", "/nms/apicontroller/"),
        "/magma/v1/lte/n1?view=full"
    );
    assert_eq!(upstream_path("/nms/apicontroller", PREFIX), "/");
    assert_eq!(upstream_path("/nms/apicontrollerx/magma", PREFIX), "/nms/apicontrollerx/magma");
    assert_eq!(upstream_path("/magma/networks", ""), "/magma/networks");
}

#[test]
fn test_audit_covers_successful_mutations_only() {
    let caller = CallerContext {
        principal: Principal::new("ops@acme.test", false, &["net1"]),
        organization: Some(Organization::new("acme", &["net1"])),
    };
    let headers = HeaderMap::new();
    let path = "/magma/v1/networks/net1";

    assert!(audit_network_call(&caller, "net1", &Method::PUT, path, StatusCode::OK, &headers));
    assert!(audit_network_call(&caller, "net1", &Method::DELETE, path, StatusCode::NO_CONTENT, &headers));
    assert!(!audit_network_call(&caller, "net1", &Method::GET, path, StatusCode::OK, &headers));
    assert!(!audit_network_call(&caller, "net1", &Method::POST, path, StatusCode::BAD_REQUEST, &headers));
}

#[test]
fn test_unsafe_path_segments() {
    assert_eq!(unsafe_path_segment("/magma/v1/networks/net1/../net9"), Some(".."));
    assert_eq!(unsafe_path_segment("/magma/v1/networks/net1/%2e%2E"), Some("%2e%2E"));
    assert_eq!(unsafe_path_segment("/magma/./networks"), Some("."));
    assert_eq!(unsafe_path_segment("/magma/networks/net1%2Fnet9"), Some("net1%2Fnet9"));
    assert_eq!(unsafe_path_segment("/magma/networks/net1%5Cnet9"), Some("net1%5Cnet9"));
    assert_eq!(unsafe_path_segment("/magma/networks/%FF"), Some("%FF"));

    assert_eq!(unsafe_path_segment("/magma/v1/networks/net1/gateways/gw..1"), None);
    assert_eq!(unsafe_path_segment("/magma/v1/networks/net1/"), None);
    assert_eq!(unsafe_path_segment("/magma/v1/networks/my%20net"), None);
}

#[tokio::test]
async fn test_channel_with_dot_segment_is_rejected() {
    let host = spawn_controller(StatusCode::OK, "[]").await;
    let app = test_app(&host, true, &[]);

    let (status, body) = send(
        app,
        "GET",
        "/nms/apicontroller/magma/channels/%2e%2e",
        Some(USER_KEY),
        "",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json_body(&body).get("method").is_none());
}
