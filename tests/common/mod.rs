use httpmock::{Method, Mock, MockServer};
use snorlax::{Client, ClientConfig};

/// A client whose base url points at `server`.
pub fn client_for(server: &MockServer) -> Client {
    let mut config = ClientConfig::default();
    config.set_base_url(server.base_url()).unwrap();
    Client::new(config)
}

/// Makes `server` answer `method path` with the given body, which stands in
/// for an echo of the request.
pub fn echo<'a>(server: &'a MockServer, method: Method, path: &str, body: &str) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(method).path(path).body(body);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}
