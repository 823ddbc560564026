use crate::config::Endpoint;
use anyhow::{Context, Result, anyhow};
use aws_config::{ConfigLoader, Region};
use aws_credential_types::provider::SharedCredentialsProvider;
use log::debug;
use opensearch::OpenSearch;
use opensearch::auth::Credentials;
use opensearch::cert::CertificateValidation;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use std::time::Duration;
use url::Url;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolves the ambient AWS credential chain (environment, profile, container or instance
/// role) for `region`.
pub async fn resolve_credentials(region: Option<String>) -> Result<SharedCredentialsProvider> {
    let mut aws_config = ConfigLoader::default();
    if let Some(region) = region {
        aws_config = aws_config.region(Region::new(region));
    }

    aws_config
        .load()
        .await
        .credentials_provider()
        .ok_or_else(|| anyhow!("No AWS credentials provider available"))
}

pub fn build_client(
    endpoint: &Endpoint,
    region: &str,
    service: &str,
    credentials: SharedCredentialsProvider,
) -> Result<OpenSearch> {
    build_client_for_url(endpoint.url()?, region, service, credentials)
}

pub fn build_client_for_url(
    url: Url,
    region: &str,
    service: &str,
    credentials: SharedCredentialsProvider,
) -> Result<OpenSearch> {
    debug!("Building OpenSearch client for {url} (region={region}, service={service})");

    let conn_pool = SingleNodeConnectionPool::new(url);
    let transport = TransportBuilder::new(conn_pool)
        .auth(Credentials::AwsSigV4(
            credentials,
            Region::new(region.to_string()),
        ))
        .service_name(service)
        .cert_validation(CertificateValidation::Default)
        .timeout(REQUEST_TIMEOUT)
        .disable_proxy()
        .build()
        .context("Failed to build OpenSearch transport")?;

    Ok(OpenSearch::new(transport))
}
