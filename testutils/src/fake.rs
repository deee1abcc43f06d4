use httpmock::prelude::*;
use httpmock::{
    Mock,
    Then,
    When,
};
use serde_json::json;

// A builder around an httpmock server that stands in for the Kubernetes API server; register
// handlers, call build(), then hand the paired kube::Client to the code under test
pub struct MockServerBuilder {
    server: MockServer,
    handlers: Vec<Box<dyn Fn(When, Then)>>,
    mock_ids: Vec<usize>,
}

fn log_req(req: &HttpMockRequest) -> bool {
    println!("    apiserver got: {} {}", req.method(), req.uri().path());
    true
}

impl MockServerBuilder {
    pub fn new() -> MockServerBuilder {
        MockServerBuilder { server: MockServer::start(), handlers: vec![], mock_ids: vec![] }
    }

    // Every registered handler must have been hit at least once
    pub fn assert(&self) {
        for id in &self.mock_ids {
            let calls = Mock::new(*id, &self.server).calls();
            assert!(calls >= 1, "apiserver handler {id} was never called");
        }
    }

    pub fn handle<F: Fn(When, Then) + 'static>(&mut self, f: F) -> &mut Self {
        self.handlers.push(Box::new(move |w, t| f(w.matches(log_req), t)));
        self
    }

    pub fn handle_get(&mut self, path: String, body: serde_json::Value) -> &mut Self {
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.json_body(body.clone());
        })
    }

    pub fn handle_not_found(&mut self, path: String) -> &mut Self {
        self.handle(move |when, then| {
            when.method(GET).path(&path);
            then.status(404).json_body(status_not_found());
        })
    }

    pub fn build(&mut self) {
        for f in self.handlers.iter() {
            self.mock_ids.push(self.server.mock(f).id);
        }

        // Catch-all so unexpected requests show up in the test output; it has to be registered
        // last so the real handlers match first
        self.server.mock(|when, then| {
            when.matches(log_req);
            then.status(404).json_body(status_not_found());
        });
    }

    pub fn url(&self) -> http::Uri {
        http::Uri::try_from(self.server.url("/")).unwrap()
    }
}

impl Default for MockServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn make_fake_apiserver() -> (MockServerBuilder, kube::Client) {
    let builder = MockServerBuilder::new();
    let config = kube::Config::new(builder.url());
    let client = kube::Client::try_from(config).unwrap();
    (builder, client)
}

pub fn status_ok() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Success",
      "code": 200
    })
}

pub fn status_not_found() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "reason": "NotFound",
      "code": 404
    })
}

pub fn status_already_exists() -> serde_json::Value {
    json!({
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "reason": "AlreadyExists",
      "code": 409
    })
}

pub fn list_of(items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "kind": "List",
        "apiVersion": "v1",
        "metadata": {},
        "items": items,
    })
}
