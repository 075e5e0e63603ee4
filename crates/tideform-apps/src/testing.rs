//! In-memory [`AppsApi`] for unit tests

use crate::client::AppsApi;
use crate::error::{AppsError, Result};
use crate::paging::ListOptions;
use crate::wire::{App, AppSpec, Deployment, DeploymentProgress, Links, Pages};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct State {
    apps: HashMap<String, App>,
    /// Deployment pages, most recent first
    pages: Vec<Vec<Deployment>>,
    /// Successive progress reports; the last one repeats
    progress: VecDeque<Option<DeploymentProgress>>,
    list_requests: Vec<(u32, u32)>,
    calls: Vec<String>,
    next_app: u32,
    next_deployment: u32,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<State>,
}

pub(crate) fn progress(success: u32, total: u32, errors: u32) -> DeploymentProgress {
    DeploymentProgress {
        success_steps: success,
        total_steps: total,
        error_steps: errors,
        pending_steps: total.saturating_sub(success + errors),
        ..Default::default()
    }
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn paged_deployments(&self, pages: Vec<Vec<&str>>) {
        self.state.lock().unwrap().pages = pages
            .into_iter()
            .map(|page| {
                page.into_iter()
                    .map(|id| Deployment {
                        id: id.to_string(),
                        ..Default::default()
                    })
                    .collect()
            })
            .collect();
    }

    pub(crate) fn script_progress(&self, reports: Vec<DeploymentProgress>) {
        self.script_reports(reports.into_iter().map(Some).collect());
    }

    /// Like [`Self::script_progress`]; `None` is a deployment without a progress object
    pub(crate) fn script_reports(&self, reports: Vec<Option<DeploymentProgress>>) {
        self.state.lock().unwrap().progress = reports.into();
    }

    pub(crate) fn insert_app(&self, app: App) {
        self.state.lock().unwrap().apps.insert(app.id.clone(), app);
    }

    pub(crate) fn app(&self, id: &str) -> Option<App> {
        self.state.lock().unwrap().apps.get(id).cloned()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn list_requests(&self) -> Vec<(u32, u32)> {
        self.state.lock().unwrap().list_requests.clone()
    }
}

impl State {
    fn record(&mut self, call: &str) {
        self.calls.push(call.to_string());
    }

    fn new_deployment(&mut self) -> Deployment {
        self.next_deployment += 1;
        let deployment = Deployment {
            id: format!("dep-{}", self.next_deployment),
            phase: "PENDING_BUILD".to_string(),
            ..Default::default()
        };
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        self.pages[0].insert(0, deployment.clone());
        deployment
    }
}

fn not_found() -> AppsError {
    AppsError::Api {
        status: StatusCode::NOT_FOUND,
        message: "The resource you were accessing could not be found.".to_string(),
    }
}

#[async_trait]
impl AppsApi for FakeApi {
    async fn create_app(&self, spec: &AppSpec, _cancel: &CancellationToken) -> Result<App> {
        let mut state = self.state.lock().unwrap();
        state.record("create_app");
        state.next_app += 1;
        let id = format!("app-{}", state.next_app);
        let deployment = state.new_deployment();
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let ingress = format!("https://{}-abc.ondigitalocean.app", spec.name);
        let app = App {
            id: id.clone(),
            spec: spec.clone(),
            default_ingress: ingress.clone(),
            live_url: ingress,
            created_at: Some(created),
            updated_at: Some(created),
            active_deployment: Some(deployment),
        };
        state.apps.insert(id, app.clone());
        Ok(app)
    }

    async fn get_app(&self, app_id: &str, _cancel: &CancellationToken) -> Result<App> {
        let mut state = self.state.lock().unwrap();
        state.record("get_app");
        state.apps.get(app_id).cloned().ok_or_else(not_found)
    }

    async fn update_app(
        &self,
        app_id: &str,
        spec: &AppSpec,
        _cancel: &CancellationToken,
    ) -> Result<App> {
        let mut state = self.state.lock().unwrap();
        state.record("update_app");
        if !state.apps.contains_key(app_id) {
            return Err(not_found());
        }
        let deployment = state.new_deployment();
        let app = state.apps.get_mut(app_id).unwrap();
        app.spec = spec.clone();
        app.updated_at = Some(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap());
        app.active_deployment = Some(deployment);
        Ok(app.clone())
    }

    async fn delete_app(&self, app_id: &str, _cancel: &CancellationToken) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_app");
        state.apps.remove(app_id).map(|_| ()).ok_or_else(not_found)
    }

    async fn list_deployments(
        &self,
        app_id: &str,
        opts: &ListOptions,
        _cancel: &CancellationToken,
    ) -> Result<(Vec<Deployment>, Links)> {
        let mut state = self.state.lock().unwrap();
        state.record("list_deployments");
        state.list_requests.push((opts.page, opts.per_page));

        let index = opts.page.saturating_sub(1) as usize;
        let deployments = state.pages.get(index).cloned().unwrap_or_default();
        let link = |page: u32| {
            format!(
                "https://api.example/v2/apps/{}/deployments?page={}&per_page={}",
                app_id, page, opts.per_page
            )
        };
        let pages = Pages {
            prev: (opts.page > 1).then(|| link(opts.page - 1)),
            next: (index + 1 < state.pages.len()).then(|| link(opts.page + 1)),
            ..Default::default()
        };
        Ok((deployments, Links { pages: Some(pages) }))
    }

    async fn get_deployment(
        &self,
        _app_id: &str,
        deployment_id: &str,
        _cancel: &CancellationToken,
    ) -> Result<Deployment> {
        let mut state = self.state.lock().unwrap();
        state.record("get_deployment");
        let report = if state.progress.len() > 1 {
            state.progress.pop_front().unwrap()
        } else {
            state
                .progress
                .front()
                .cloned()
                .unwrap_or_else(|| Some(progress(1, 1, 0)))
        };
        let phase = match &report {
            None => "PENDING_BUILD",
            Some(r) if r.is_complete() => "ACTIVE",
            Some(r) if r.has_errors() => "ERROR",
            Some(_) => "DEPLOYING",
        };
        Ok(Deployment {
            id: deployment_id.to_string(),
            phase: phase.to_string(),
            progress: report,
            ..Default::default()
        })
    }
}
