//! App Platform REST client
//!
//! Thin typed wrapper over the vendor's `/v2/apps` endpoints. Every call
//! races the caller's cancellation token and gives up with
//! [`AppsError::Cancelled`] as soon as it fires.

use crate::error::{AppsError, Result};
use crate::paging::ListOptions;
use crate::wire::{App, AppRequest, AppRoot, AppSpec, Deployment, DeploymentRoot, DeploymentsRoot, Links};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.digitalocean.com";

/// Vendor operations the controller and reconciler depend on
#[async_trait]
pub trait AppsApi: Send + Sync {
    async fn create_app(&self, spec: &AppSpec, cancel: &CancellationToken) -> Result<App>;

    async fn get_app(&self, app_id: &str, cancel: &CancellationToken) -> Result<App>;

    async fn update_app(
        &self,
        app_id: &str,
        spec: &AppSpec,
        cancel: &CancellationToken,
    ) -> Result<App>;

    async fn delete_app(&self, app_id: &str, cancel: &CancellationToken) -> Result<()>;

    /// One page of deployments, most recent first
    async fn list_deployments(
        &self,
        app_id: &str,
        opts: &ListOptions,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Deployment>, Links)>;

    async fn get_deployment(
        &self,
        app_id: &str,
        deployment_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Deployment>;
}

/// reqwest-backed [`AppsApi`]
pub struct AppsClient {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl AppsClient {
    /// Create a client against the public API endpoint
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_endpoint(token, DEFAULT_API_ENDPOINT)
    }

    pub fn with_endpoint(token: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.endpoint, path);
        tracing::debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
    }

    async fn send(&self, request: RequestBuilder, cancel: &CancellationToken) -> Result<String> {
        cancellable(cancel, async {
            let response = request.send().await?;
            read_body(response).await
        })
        .await?
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let body = self.send(request, cancel).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AppsApi for AppsClient {
    async fn create_app(&self, spec: &AppSpec, cancel: &CancellationToken) -> Result<App> {
        let request = self
            .request(Method::POST, "/v2/apps")
            .json(&AppRequest { spec });
        let root: AppRoot = self.send_json(request, cancel).await?;
        Ok(root.app)
    }

    async fn get_app(&self, app_id: &str, cancel: &CancellationToken) -> Result<App> {
        let request = self.request(Method::GET, &format!("/v2/apps/{}", app_id));
        let root: AppRoot = self.send_json(request, cancel).await?;
        Ok(root.app)
    }

    async fn update_app(
        &self,
        app_id: &str,
        spec: &AppSpec,
        cancel: &CancellationToken,
    ) -> Result<App> {
        let request = self
            .request(Method::PUT, &format!("/v2/apps/{}", app_id))
            .json(&AppRequest { spec });
        let root: AppRoot = self.send_json(request, cancel).await?;
        Ok(root.app)
    }

    async fn delete_app(&self, app_id: &str, cancel: &CancellationToken) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/v2/apps/{}", app_id));
        self.send(request, cancel).await?;
        Ok(())
    }

    async fn list_deployments(
        &self,
        app_id: &str,
        opts: &ListOptions,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Deployment>, Links)> {
        let path = format!(
            "/v2/apps/{}/deployments?page={}&per_page={}",
            app_id, opts.page, opts.per_page
        );
        let root: DeploymentsRoot = self
            .send_json(self.request(Method::GET, &path), cancel)
            .await?;
        Ok((root.deployments, root.links))
    }

    async fn get_deployment(
        &self,
        app_id: &str,
        deployment_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Deployment> {
        let path = format!("/v2/apps/{}/deployments/{}", app_id, deployment_id);
        let root: DeploymentRoot = self
            .send_json(self.request(Method::GET, &path), cancel)
            .await?;
        Ok(root.deployment)
    }
}

// ============ Helpers ============

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Body of a 2xx response, or the vendor's error message
async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                body
            }
        });

    Err(AppsError::Api { status, message })
}

/// Run `fut` unless `cancel` fires first
pub(crate) async fn cancellable<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppsError::Cancelled),
        output = fut => Ok(output),
    }
}
