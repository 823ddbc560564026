use anyhow::{Context, Result, anyhow};
use std::env;
use std::fmt;
use url::Url;

pub const ENDPOINT_VAR: &str = "OPENSEARCH_DOMAIN_ENDPOINT";
pub const REGION_VAR: &str = "AWS_REGION";
pub const SERVICE_VAR: &str = "SERVICE";

pub const DEFAULT_SERVICE: &str = "es";
pub const DEFAULT_PORT: u16 = 443;

/// Connection settings for a single probe, read once at the start of an invocation.
///
/// Missing values are carried as `None` rather than rejected; they only fail once the
/// client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub service: String,
}

impl Config {
    pub fn new(endpoint: Option<String>, region: Option<String>, service: Option<String>) -> Self {
        Self {
            endpoint,
            region,
            service: service.unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::new(lookup(ENDPOINT_VAR), lookup(REGION_VAR), lookup(SERVICE_VAR))
    }

    pub fn endpoint(&self) -> Result<Endpoint> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| anyhow!("{ENDPOINT_VAR} is not set"))?;

        Endpoint::parse(endpoint)
    }

    pub fn region(&self) -> Result<&str> {
        self.region
            .as_deref()
            .filter(|region| !region.is_empty())
            .ok_or_else(|| anyhow!("{REGION_VAR} is not set"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Parses `host`, `host:port`, `[ipv6]` or `[ipv6]:port`, defaulting to the HTTPS port.
    /// A leading `https://` and a trailing `/` are tolerated; any other path is rejected.
    pub fn parse(endpoint: &str) -> Result<Self> {
        let trimmed = endpoint.trim();
        let trimmed = trimmed.strip_prefix("https://").unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        if trimmed.is_empty() {
            return Err(anyhow!("Domain endpoint is empty"));
        }
        if trimmed.contains('/') {
            return Err(anyhow!("Domain endpoint must not contain a path: {endpoint}"));
        }

        let (host, port) = if trimmed.starts_with('[') {
            let close = trimmed
                .find(']')
                .ok_or_else(|| anyhow!("Unterminated IPv6 literal in domain endpoint: {endpoint}"))?;
            let (host, rest) = trimmed.split_at(close + 1);
            match rest.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None if rest.is_empty() => (host, None),
                None => return Err(anyhow!("Invalid domain endpoint: {endpoint}")),
            }
        } else {
            match trimmed.split_once(':') {
                Some((_, port)) if port.contains(':') => {
                    return Err(anyhow!(
                        "IPv6 domain endpoints must be bracketed: {endpoint}"
                    ));
                }
                Some((host, port)) => (host, Some(port)),
                None => (trimmed, None),
            }
        };

        if host.is_empty() || host == "[]" {
            return Err(anyhow!("Domain endpoint has no host: {endpoint}"));
        }

        let port = match port {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("Invalid port in domain endpoint: {endpoint}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    pub fn url(&self) -> Result<Url> {
        Url::parse(&format!("https://{}:{}/", self.host, self.port))
            .with_context(|| format!("Invalid domain endpoint: {self}"))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
