//! Test doubles shared by the module tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::env::VarError;
use std::io::Write;

use crate::client::{ApiRequest, ApiResponse, Transport};
use crate::error::WorkflowError;

/// Records every request and answers with a canned response.
pub struct RecordingTransport {
    reply: Option<ApiResponse>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            reply: Some(ApiResponse {
                status,
                body: body.to_string(),
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Fails every request as if the connection were refused.
    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn single_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: ApiRequest) -> Result<ApiResponse, WorkflowError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        self.reply.clone().ok_or_else(|| WorkflowError::Network {
            method,
            url,
            source: Box::new(std::io::Error::from(std::io::ErrorKind::ConnectionRefused)),
        })
    }
}

pub fn payload_file(contents: impl AsRef<[u8]>) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_ref()).unwrap();
    file
}

/// Environment lookup backed by a fixed set of variables.
pub fn fake_env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> + use<> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned().ok_or(VarError::NotPresent)
}
