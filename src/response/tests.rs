use crate::{Body, Error, Response};
use serde::Deserialize;
use std::io::{self, Read};

#[derive(Deserialize, Debug, PartialEq)]
struct Pokemon {
    name: String,
    number: u32,
}

fn response(status: u16, body: impl Into<Body>) -> Response {
    http::Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
        .into()
}

#[test]
fn test_is_success() {
    for (status, expected) in [
        (100, false),
        (199, false),
        (200, true),
        (204, true),
        (299, true),
        (300, false),
        (404, false),
        (500, false),
    ] {
        let res = response(status, "");
        assert_eq!(res.is_success(), expected, "status {}", status);
        assert_eq!(res.is_success(), expected, "status {} checked twice", status);
    }
}

#[test]
fn test_json() {
    let mut res = response(200, r#"{"name":"snorlax","number":143}"#);

    let pokemon: Pokemon = res.json().unwrap();

    assert_eq!(
        pokemon,
        Pokemon {
            name: "snorlax".to_string(),
            number: 143
        }
    );
    assert!(res.is_consumed());
    assert!(matches!(res.json::<Pokemon>(), Err(Error::BodyConsumed)));
    assert!(matches!(res.raw_body(), Err(Error::BodyConsumed)));
}

#[test]
fn test_json_decode_error() {
    let mut res = response(200, "snorlax is sleeping");

    assert!(matches!(res.json::<Pokemon>(), Err(Error::Decode(_))));
    assert!(matches!(res.raw_body(), Err(Error::BodyConsumed)));
}

#[test]
fn test_raw_body() {
    let body = r#"{"name": "snorlax", "number": 143}"#;
    let mut res = response(200, body);

    let raw = res.raw_body().unwrap();

    assert_eq!(raw, body.as_bytes());
    assert!(matches!(res.raw_body(), Err(Error::BodyConsumed)));
    assert_eq!(res.header("content-type"), Some("application/json"));
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer"))
    }
}

#[test]
fn test_read_error() {
    let mut res = response(200, Body::from_reader(Broken));

    assert!(matches!(res.raw_body(), Err(Error::Read(_))));
    assert!(res.is_consumed());
}
