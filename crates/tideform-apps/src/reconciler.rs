//! Deployment reconciler
//!
//! Waits for the most recent deployment of an app to finish after a create
//! or update. Polls on a fixed interval until the deployment reports every
//! step successful, reports an errored step, the deadline passes, or the
//! caller cancels.

use crate::client::AppsApi;
use crate::error::{AppsError, Result};
use crate::paging::{DEFAULT_PER_PAGE, list_all_deployments};
use crate::wire::Deployment;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Reconciler {
    poll_interval: Duration,
    per_page: u32,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Block until the app's latest deployment succeeds
    ///
    /// The deployment is picked as the first entry of the app's deployment
    /// list once one shows up, and inspected in the same tick. Nothing ties
    /// it to the create or update that triggered it, so a deployment started
    /// concurrently by someone else can be picked instead. The app's
    /// `in_progress_deployment` is not consulted: the vendor does not fill it
    /// reliably right after a create or update, and a config-only update can
    /// finish before the first poll.
    pub async fn wait_for_deployment<A>(
        &self,
        api: &A,
        app_id: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Deployment>
    where
        A: AppsApi + ?Sized,
    {
        let start = Instant::now();
        let mut deployment_id: Option<String> = None;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(AppsError::Cancelled),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }

            if start.elapsed() > timeout {
                return Err(AppsError::DeploymentTimeout {
                    app_id: app_id.to_string(),
                });
            }

            let id = match &deployment_id {
                Some(id) => id.clone(),
                None => {
                    let deployments =
                        list_all_deployments(api, app_id, self.per_page, cancel).await?;
                    let Some(latest) = deployments.into_iter().next() else {
                        tracing::debug!("No deployment for app {} yet", app_id);
                        continue;
                    };
                    tracing::debug!("Tracking deployment {} of app {}", latest.id, app_id);
                    deployment_id = Some(latest.id.clone());
                    latest.id
                }
            };

            let deployment = api.get_deployment(app_id, &id, cancel).await?;
            let Some(progress) = deployment.progress.clone() else {
                tracing::debug!(
                    "App {} deployment {} is {} with no progress yet",
                    app_id,
                    deployment.id,
                    deployment.phase
                );
                continue;
            };

            if progress.is_complete() {
                tracing::info!("App {} deployment {} is live", app_id, deployment.id);
                return Ok(deployment);
            }

            if progress.has_errors() {
                return Err(AppsError::DeploymentFailed {
                    app_id: app_id.to_string(),
                    deployment_id: deployment.id,
                    progress: progress.to_string(),
                });
            }

            tracing::debug!(
                "App {} deployment {} is {} ({}/{})",
                app_id,
                deployment.id,
                deployment.phase,
                progress.success_steps,
                progress.total_steps
            );
        }
    }
}
