use crate::client::{build_client, resolve_credentials};
use crate::config::Config;
use anyhow::{Context, Result};
use aws_credential_types::provider::SharedCredentialsProvider;
use log::{debug, info, warn};
use opensearch::OpenSearch;
use opensearch::indices::IndicesGetIndexTemplateParts;
use serde::Serialize;
use serde_json::Value;

pub const TEMPLATE_PATTERN: &str = "cicd*";
pub const FALLBACK_RESPONSE: &str = "No index patterns created by Terraform or Evolution";

/// Either the domain's own index-template listing or the fixed fallback string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProbeResponse {
    Templates(Value),
    Fallback(String),
}

impl ProbeResponse {
    pub fn fallback() -> Self {
        Self::Fallback(FALLBACK_RESPONSE.to_string())
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

pub async fn get_index_templates(client: &OpenSearch, pattern: &str) -> Result<Value> {
    debug!("Getting index templates matching {pattern}");

    let response = client
        .indices()
        .get_index_template(IndicesGetIndexTemplateParts::Name(&[pattern]))
        .send()
        .await
        .with_context(|| format!("Failed to get index templates matching {pattern}"))?
        .error_for_status_code()
        .with_context(|| format!("No index templates returned for {pattern}"))?;

    response
        .json::<Value>()
        .await
        .context("Failed to parse index template listing")
}

/// Loads configuration from the environment, resolves ambient credentials, and probes.
pub async fn probe_index_templates_from_env() -> ProbeResponse {
    probe_index_templates_with_config(&Config::from_env()).await
}

pub async fn probe_index_templates_with_config(config: &Config) -> ProbeResponse {
    probe_with_credentials(config, resolve_credentials(config.region.clone())).await
}

async fn probe_with_credentials(
    config: &Config,
    credentials: impl Future<Output = Result<SharedCredentialsProvider>>,
) -> ProbeResponse {
    match credentials.await {
        Ok(credentials) => probe_index_templates(config, credentials).await,
        Err(e) => {
            warn!("Failed to resolve AWS credentials: {e:#}");
            ProbeResponse::fallback()
        }
    }
}

/// Every failure, from a missing endpoint through to an undecodable body, yields
/// [`ProbeResponse::fallback`].
pub async fn probe_index_templates(
    config: &Config,
    credentials: SharedCredentialsProvider,
) -> ProbeResponse {
    match connect(config, credentials) {
        Ok(client) => probe_index_templates_with_client(&client).await,
        Err(e) => {
            warn!("Failed to set up OpenSearch client: {e:#}");
            ProbeResponse::fallback()
        }
    }
}

pub async fn probe_index_templates_with_client(client: &OpenSearch) -> ProbeResponse {
    match get_index_templates(client, TEMPLATE_PATTERN).await {
        Ok(templates) => {
            info!("Found index templates matching {TEMPLATE_PATTERN}");
            ProbeResponse::Templates(templates)
        }
        Err(e) => {
            warn!("Index template lookup failed: {e:#}");
            ProbeResponse::fallback()
        }
    }
}

fn connect(config: &Config, credentials: SharedCredentialsProvider) -> Result<OpenSearch> {
    let endpoint = config.endpoint()?;
    let region = config.region()?;

    build_client(&endpoint, region, &config.service, credentials)
}
