use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use http::{Method, StatusCode};
use serde_json::Value;
use teacher_review::api::{ApiRequest, ApiResponse, Transport};
use teacher_review::error::ApiError;

type Reply = Result<ApiResponse, ApiError>;

#[derive(Default)]
struct Script {
    replies: RefCell<HashMap<(Method, String), VecDeque<Reply>>>,
    sent: RefCell<Vec<ApiRequest>>,
}

/// Transport that answers from a per-route queue of canned replies and
/// records every request it sees. Unscripted routes answer 404.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<Script>,
}

impl ScriptedTransport {
    pub fn reply(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.script
            .replies
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn json(&self, method: Method, path: &str, status: StatusCode, body: Value) -> &Self {
        self.reply(method, path, Ok(ApiResponse::new(status, body.to_string())))
    }

    pub fn ok(&self, method: Method, path: &str, body: Value) -> &Self {
        self.json(method, path, StatusCode::OK, body)
    }

    pub fn no_content(&self, method: Method, path: &str) -> &Self {
        self.reply(method, path, Ok(ApiResponse::new(StatusCode::NO_CONTENT, "")))
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.script.sent.borrow().clone()
    }

    /// `METHOD path` of every request, in order.
    pub fn calls(&self) -> Vec<String> {
        self.script
            .sent
            .borrow()
            .iter()
            .map(|request| format!("{} {}", request.method, request.path))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = (request.method.clone(), request.path.clone());
        self.script.sent.borrow_mut().push(request);
        let reply = self
            .script
            .replies
            .borrow_mut()
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        reply.unwrap_or_else(|| Ok(ApiResponse::new(StatusCode::NOT_FOUND, r#"{"detail":"Not found."}"#)))
    }
}

/// A paginated list body.
pub fn page(results: Vec<Value>) -> Value {
    serde_json::json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
}
