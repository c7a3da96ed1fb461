use reqwest::Client as HttpClient;
use serenity::prelude::Context;
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;

/// Failure to reach the echo endpoint or read its body.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct IpLookupError(#[from] reqwest::Error);

/// Client for a public IP-echo endpoint that returns the caller's apparent
/// address as plain text.
#[derive(Clone)]
pub struct IpEchoClient {
    http: HttpClient,
    endpoint: String,
}

impl IpEchoClient {
    const DEFAULT_ENDPOINT: &'static str = "http://ifconfig.me/ip";

    pub fn new() -> Self {
        Self {
            http: HttpClient::new(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Create a client against a custom echo endpoint (for testing).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Single GET against the echo endpoint; the body is returned verbatim.
    /// No retries, no caching, default client timeouts.
    pub async fn lookup(&self) -> Result<String, IpLookupError> {
        debug!("Looking up public IP via {}", self.endpoint);
        let body = self.http.get(&self.endpoint).send().await?.text().await?;
        Ok(body)
    }
}

impl Default for IpEchoClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the public IP and render the reply line. Lookup failures degrade
/// into the error template rather than propagating.
pub async fn ip_response(ctx: &Context) -> String {
    let echo = {
        let data = ctx.data.read().await;
        data.get::<crate::IpEcho>().cloned().unwrap_or_default()
    };
    format_ip_response(echo.lookup().await)
}

pub fn format_ip_response<E: Display>(lookup: Result<String, E>) -> String {
    match lookup {
        Ok(ip) => format!("My IP is `{}`", ip),
        Err(e) => format!("Cannot determine server IP:\n```\n{}\n```", e),
    }
}
