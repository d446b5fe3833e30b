use crate::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Seam between the client and the wire so screens can be exercised against a
/// scripted transport. The production implementation drives a blocking `ureq`
/// agent from a worker thread.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = AppResult<HttpResponse>> + Send;
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = AppResult<HttpResponse>> + Send {
        let agent = self.agent.clone();
        async move {
            tokio::task::spawn_blocking(move || execute(&agent, request))
                .await
                .map_err(|err| AppError::Internal(err.to_string()))?
        }
    }
}

fn execute(agent: &ureq::Agent, request: HttpRequest) -> AppResult<HttpResponse> {
    let mut call = agent.request(request.method.as_str(), &request.url);
    for (name, value) in &request.headers {
        call = call.set(name, value);
    }

    let outcome = match request.body {
        Some(body) => call.send_string(&body),
        None => call.call(),
    };

    // Non-2xx still carries a body the caller wants (e.g. a `detail` message),
    // so only transport-level failures become errors here.
    let response = match outcome {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(AppError::Network(err.to_string())),
    };

    let status = response.status();
    let body = response
        .into_string()
        .map_err(|err| AppError::Network(err.to_string()))?;
    Ok(HttpResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::{HttpResponse, Method};

    #[test]
    fn only_get_is_non_mutating() {
        assert!(!Method::Get.is_mutating());
        assert!(Method::Post.is_mutating());
        assert!(Method::Put.is_mutating());
        assert!(Method::Delete.is_mutating());
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse { status: 200, body: String::new() }.is_success());
        assert!(HttpResponse { status: 204, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 404, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 500, body: String::new() }.is_success());
    }
}
