use crate::error::{EnhancerError, Result};
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as a JSON object.
    pub fn json_object(&self) -> Result<Map<String, Value>> {
        let value: Value = serde_json::from_slice(&self.body)
            .map_err(|e| EnhancerError::InvalidResponse(format!("body is not valid JSON: {}", e)))?;
        match value {
            Value::Object(map) => Ok(map),
            other => Err(EnhancerError::InvalidResponse(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A single-attempt request channel to the enhancement service.
///
/// `target` is either an API path such as `/api/enhance`, resolved against
/// the service base URL, or an absolute `http(s)://` URL.
pub trait Transport {
    fn send(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<RawResponse> {
        (**self).send(method, target, body, timeout)
    }
}

/// Blocking HTTP transport holding one pooled `reqwest` client for the
/// lifetime of the SDK instance.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| EnhancerError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn resolve(&self, target: &str) -> String {
        if is_absolute_url(target) {
            target.to_string()
        } else if target.starts_with("//") {
            // Protocol-relative URLs inherit the scheme of the service.
            let scheme = self.base_url.split_once("://").map_or("http", |(s, _)| s);
            format!("{}:{}", scheme, target)
        } else if target.starts_with('/') {
            format!("{}{}", self.base_url, target)
        } else {
            format!("{}/{}", self.base_url, target)
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        method: Method,
        target: &str,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<RawResponse> {
        let url = self.resolve(target);
        crate::verbose!("{} {} (timeout {}s)", method, url, timeout.as_secs());

        let mut request = self.client.request(method.into(), url.as_str()).timeout(timeout);
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().map_err(|e| map_reqwest_error(e, timeout))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().map_err(|e| map_reqwest_error(e, timeout))?;

        crate::verbose!("{} {} -> {} ({} bytes)", method, url, status, bytes.len());
        Ok(RawResponse::new(status, bytes.to_vec()))
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> EnhancerError {
    if err.is_timeout() {
        EnhancerError::Timeout(timeout)
    } else {
        EnhancerError::Transport(err.to_string())
    }
}

pub fn is_absolute_url(target: &str) -> bool {
    has_prefix_ignore_case(target, "http://") || has_prefix_ignore_case(target, "https://")
}

fn has_prefix_ignore_case(target: &str, prefix: &str) -> bool {
    target
        .get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub method: Method,
        pub target: String,
        pub body: Option<Value>,
        pub timeout: Duration,
    }

    /// Replays queued outcomes in order and records every call it receives.
    #[derive(Default)]
    pub struct ScriptedTransport {
        outcomes: RefCell<VecDeque<Result<RawResponse>>>,
        calls: RefCell<Vec<RecordedCall>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, status: u16, body: &str) -> Self {
            self.outcomes
                .borrow_mut()
                .push_back(Ok(RawResponse::new(status, body.as_bytes().to_vec())));
            self
        }

        pub fn respond_bytes(self, status: u16, body: &[u8]) -> Self {
            self.outcomes
                .borrow_mut()
                .push_back(Ok(RawResponse::new(status, body.to_vec())));
            self
        }

        pub fn fail(self, err: EnhancerError) -> Self {
            self.outcomes.borrow_mut().push_back(Err(err));
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn send(
            &self,
            method: Method,
            target: &str,
            body: Option<&Value>,
            timeout: Duration,
        ) -> Result<RawResponse> {
            self.calls.borrow_mut().push(RecordedCall {
                method,
                target: target.to_string(),
                body: body.cloned(),
                timeout,
            });
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(EnhancerError::Transport("no scripted response".into())))
        }
    }
}
