//! Mock ticketing API server for testing
//!
//! Wraps a wiremock server mounted under `/api`. Unmatched requests fall
//! through to wiremock's default 404, which is also what the real server
//! answers for unsupported request variants.

use serde_json::Value;
use wiremock::{
    matchers::{body_partial_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub struct ApiMockServer {
    pub server: MockServer,
    pub base_url: String,
}

impl ApiMockServer {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = format!("{}/api", server.uri());
        Self { server, base_url }
    }

    fn api_path(resource: &str) -> String {
        format!("/api/{}", resource)
    }

    /// Respond to `verb resource` with `status` and a JSON body
    pub async fn mock_json(&self, verb: &str, resource: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(Self::api_path(resource)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Like [`mock_json`](Self::mock_json) but answers only `times` requests,
    /// after which later mounts for the same route take over
    pub async fn mock_json_times(&self, verb: &str, resource: &str, status: u16, body: Value, times: u64) {
        Mock::given(method(verb))
            .and(path(Self::api_path(resource)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status(&self, verb: &str, resource: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(Self::api_path(resource)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Expect exactly `calls` requests to `verb resource`, verified on drop
    pub async fn expect_status(&self, verb: &str, resource: &str, status: u16, calls: u64) {
        Mock::given(method(verb))
            .and(path(Self::api_path(resource)))
            .respond_with(ResponseTemplate::new(status))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Expect one request whose JSON body contains `partial`
    pub async fn expect_json_body(&self, verb: &str, resource: &str, partial: Value, response: Value) {
        Mock::given(method(verb))
            .and(path(Self::api_path(resource)))
            .and(body_partial_json(partial))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub async fn expect_query(&self, verb: &str, resource: &str, key: &str, value: &str, status: u16, calls: u64) {
        Mock::given(method(verb))
            .and(path(Self::api_path(resource)))
            .and(query_param(key, value))
            .respond_with(ResponseTemplate::new(status))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Accept any credentials and hand out `token`
    pub async fn mock_login(&self, token: &str) {
        self.mock_json("POST", "Auth/login", 200, serde_json::json!({ "token": token })).await;
    }

    /// Number of requests received so far for `verb resource`
    pub async fn received(&self, verb: &str, resource: &str) -> usize {
        let wanted = Self::api_path(resource);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == wanted)
            .count()
    }

    /// Raw bodies of the requests received so far for `verb resource`
    pub async fn bodies(&self, verb: &str, resource: &str) -> Vec<String> {
        let wanted = Self::api_path(resource);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == wanted)
            .map(|r| String::from_utf8_lossy(&r.body).into_owned())
            .collect()
    }

    pub async fn reset(&self) {
        self.server.reset().await;
    }
}

/// Value of a text part in a `multipart/form-data` body
pub fn multipart_field(body: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{}\"\r\n\r\n", name);
    let start = body.find(&marker)? + marker.len();
    let rest = &body[start..];
    Some(rest[..rest.find("\r\n")?].to_string())
}
