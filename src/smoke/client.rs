use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::SmokeConfig;
use crate::error::SmokeError;

/// A completed HTTP exchange, whatever its status code.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn json(&self) -> Result<JsonValue, SmokeError> {
        serde_json::from_str(&self.body).map_err(|e| SmokeError::InvalidJson(e.to_string()))
    }
}

/// Blocking client bound to one service root.
///
/// Non-2xx answers come back as a [`Reply`] with that status; only failures
/// to talk to the service at all are errors.
pub struct ServiceClient {
    base_url: String,
    api_url: String,
    agent: ureq::Agent,
}

impl ServiceClient {
    pub fn new(config: &SmokeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .build();
        Self {
            base_url: config.base_url.clone(),
            api_url: config.api_url(),
            agent,
        }
    }

    /// GET `{base}{path}`.
    pub fn get_page(&self, path: &str) -> Result<Reply, SmokeError> {
        let url = format!("{}{}", self.base_url, path);
        finish(self.agent.get(&url).call())
    }

    /// GET `{base}/api{path}`.
    pub fn get_api(&self, path: &str) -> Result<Reply, SmokeError> {
        let url = format!("{}{}", self.api_url, path);
        finish(self.agent.get(&url).call())
    }

    /// POST `{base}/api{path}` with a JSON body.
    pub fn post_api_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Reply, SmokeError> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("POST {url}");
        finish(
            self.agent
                .post(&url)
                .set("Accept", "application/json")
                .send_json(body),
        )
    }

    /// POST `{base}/api{path}` without a body.
    pub fn post_api_empty(&self, path: &str) -> Result<Reply, SmokeError> {
        let url = format!("{}{}", self.api_url, path);
        log::debug!("POST {url}");
        finish(
            self.agent
                .post(&url)
                .set("Accept", "application/json")
                .send_bytes(&[]),
        )
    }
}

fn finish(result: Result<ureq::Response, ureq::Error>) -> Result<Reply, SmokeError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => return Err(SmokeError::Transport(err.to_string())),
    };
    let status = response.status();
    let body = response.into_string()?;
    log::debug!("{} -> {status}", response_label(status));
    Ok(Reply { status, body })
}

fn response_label(status: u16) -> &'static str {
    match status {
        200..=299 => "success",
        400..=499 => "client error",
        500..=599 => "server error",
        _ => "response",
    }
}
