#![allow(dead_code)]

use std::sync::Arc;

use refundline_domain::Credential;
use refundline_infra::{ApiClient, ApiClientConfig, Session};
use wiremock::{MockServer, Request, ResponseTemplate};

/// Client against `server`, sharing the returned session.
pub fn client_for(server: &MockServer, credential: Option<&str>) -> (Arc<ApiClient>, Arc<Session>) {
    let session = Arc::new(match credential {
        Some(token) => Session::with_credential(Credential::new(token)),
        None => Session::new(),
    });

    let config = ApiClientConfig { base_url: server.uri(), ..Default::default() };
    let client = ApiClient::new(config, Arc::clone(&session)).expect("client should build");

    (Arc::new(client), session)
}

/// Success body of the login and refresh endpoints.
pub fn token_response(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "accessToken": token }))
}

/// Requests the server saw for `path`, in arrival order.
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording should be enabled")
        .into_iter()
        .filter(|request| request.url.path() == path)
        .collect()
}

pub fn header_value(request: &Request, name: &str) -> Option<String> {
    request.headers.get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
}

/// Address nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
