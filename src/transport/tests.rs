use httpmock::{Method::POST, MockServer};
use std::io::Read;
use std::time::Duration;

use crate::transport::reqwest::{ReqwestTransport, TransportConfig};
use crate::transport::Transport;
use crate::{Body, Context};

#[test]
fn execute() {
    let body = "{\"result\": \"content\"}";

    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/defaults")
            .body(body)
            .header("x-custom-header", "test_validate_verify")
            .header("content-type", "application/json");
        then.status(201)
            .header("x-echo", "yes")
            .body("created");
    });

    let request = http::Request::builder()
        .method(http::Method::POST)
        .uri(server.url("/defaults"))
        .header("Content-Type", "application/json")
        .header("X-Custom-Header", "test_validate_verify")
        .body(Body::from(body))
        .unwrap();
    let transport = ReqwestTransport::default();
    let res = transport.send(&Context::background(), request).unwrap();

    mock.assert();
    assert_eq!(res.status().as_u16(), 201);
    assert_eq!(res.headers().get("x-echo").unwrap(), "yes");

    let mut received = String::new();
    res.into_body().read_to_string(&mut received).unwrap();
    assert_eq!(received, "created");
}

#[test]
fn cancelled_context_is_not_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.path("/never");
        then.status(200);
    });

    let ctx = Context::background();
    ctx.cancel();

    let request = http::Request::builder()
        .uri(server.url("/never"))
        .body(Body::empty())
        .unwrap();
    let err = ReqwestTransport::default().send(&ctx, request).unwrap_err();

    assert_eq!(err.to_string(), "context cancelled");
    assert_eq!(mock.hits(), 0);
}

#[test]
fn proxy_can_be_set_and_removed() {
    let mut transport = ReqwestTransport::create(
        TransportConfig::new()
            .timeout(Duration::from_secs(5))
            .user_agent("snorlax-test"),
    )
    .unwrap();

    let proxy = url::Url::parse("http://localhost:3128").unwrap();
    let config = transport.proxy_config().unwrap();
    config.set_proxy(Some(proxy.clone())).unwrap();
    assert_eq!(config.proxy(), Some(&proxy));

    config.set_proxy(None).unwrap();
    assert_eq!(config.proxy(), None);
    assert_eq!(transport.config().timeout, Some(Duration::from_secs(5)));
}

#[test]
fn closures_are_transports_without_proxy_support() {
    let mut transport = |_: &Context, request: crate::Request| -> Result<crate::RawResponse, crate::BoxError> {
        Ok(http::Response::new(request.into_body()))
    };

    assert!(transport.proxy_config().is_none());

    let request = http::Request::builder()
        .uri("http://localhost/echo")
        .body(Body::from("ping"))
        .unwrap();
    let res = transport.send(&Context::background(), request).unwrap();
    assert_eq!(res.body().as_bytes(), Some(&b"ping"[..]));
}
