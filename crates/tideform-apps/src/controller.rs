//! App resource controller and data source
//!
//! Maps the host's create/read/update/delete onto vendor calls, waiting for
//! deployments through the [`Reconciler`] and decoding vendor state back
//! into the host's attributes.

use crate::client::AppsApi;
use crate::codec::{self, FlattenHints, value};
use crate::error::{AppsError, Result};
use crate::reconciler::Reconciler;
use crate::wire::App;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tideform_provider::{DataSource, OperationContext, ProviderError, Resource, ResourceData};

pub const RESOURCE_TYPE: &str = "tideform_app";
pub const DATA_SOURCE_TYPE: &str = "tideform_app";

/// Managed App Platform application
pub struct AppResource<A> {
    api: A,
    reconciler: Reconciler,
}

impl<A: AppsApi> AppResource<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            reconciler: Reconciler::new(),
        }
    }

    pub fn with_reconciler(mut self, reconciler: Reconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: AppsApi> Resource for AppResource<A> {
    type Error = AppsError;

    fn type_name(&self) -> &str {
        RESOURCE_TYPE
    }

    async fn create(&self, ctx: &OperationContext, data: &mut ResourceData) -> Result<()> {
        let spec = codec::to_wire(data.get("spec").unwrap_or(&Value::Null));
        tracing::info!("Creating app {}", spec.name);

        let app = self.api.create_app(&spec, ctx.cancellation()).await?;
        // keep the id even if the deployment below fails
        data.set_id(&app.id);
        tracing::info!("Created app {} ({}), waiting for deployment", spec.name, app.id);

        self.reconciler
            .wait_for_deployment(&self.api, &app.id, ctx.timeouts().create, ctx.cancellation())
            .await?;

        self.read(ctx, data).await
    }

    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Result<()> {
        let id = data.require_id()?.to_string();

        let app = match self.api.get_app(&id, ctx.cancellation()).await {
            Ok(app) => app,
            Err(e) if e.is_not_found() => {
                tracing::warn!("App {} not found, removing from state", id);
                data.clear_id();
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let hints = FlattenHints {
            structured_domains: uses_structured_domains(data),
        };
        set_app_attributes(data, &app, hints)
    }

    async fn update(&self, ctx: &OperationContext, data: &mut ResourceData) -> Result<()> {
        let id = data.require_id()?.to_string();

        if data.has_change_by("spec", codec::canonical_spec) {
            let spec = codec::to_wire(data.get("spec").unwrap_or(&Value::Null));
            tracing::info!("Updating app {} ({})", spec.name, id);

            self.api.update_app(&id, &spec, ctx.cancellation()).await?;
            self.reconciler
                .wait_for_deployment(&self.api, &id, ctx.timeouts().update, ctx.cancellation())
                .await?;
        } else {
            tracing::debug!("App {} spec unchanged, skipping update", id);
        }

        self.read(ctx, data).await
    }

    async fn delete(&self, ctx: &OperationContext, data: &mut ResourceData) -> Result<()> {
        let id = data.require_id()?.to_string();
        tracing::info!("Deleting app {}", id);

        match self.api.delete_app(&id, ctx.cancellation()).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::warn!("App {} already deleted", id);
            }
            Err(e) => return Err(e),
        }

        data.clear_id();
        Ok(())
    }
}

/// Read-only lookup of an existing app by `app_id`
pub struct AppDataSource<A> {
    api: A,
}

impl<A: AppsApi> AppDataSource<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<A: AppsApi> DataSource for AppDataSource<A> {
    type Error = AppsError;

    fn type_name(&self) -> &str {
        DATA_SOURCE_TYPE
    }

    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData) -> Result<()> {
        let app_id = data
            .get_str("app_id")
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::MissingAttribute("app_id".to_string()))?
            .to_string();

        let app = self.api.get_app(&app_id, ctx.cancellation()).await?;
        data.set_id(&app.id);
        set_app_attributes(data, &app, FlattenHints::structured())
    }
}

// ============ State mapping ============

fn set_app_attributes(data: &mut ResourceData, app: &App, hints: FlattenHints) -> Result<()> {
    data.set("default_ingress", app.default_ingress.as_str());
    data.set("live_url", app.live_url.as_str());
    data.set("created_at", timestamp(app.created_at));
    data.set("updated_at", timestamp(app.updated_at));
    data.set("urn", format!("do:app:{}", app.id));
    data.set("spec", codec::from_wire(&app.spec, hints));

    let Some(active) = &app.active_deployment else {
        return Err(AppsError::MissingActiveDeployment {
            name: app.spec.name.clone(),
            id: app.id.clone(),
        });
    };
    data.set("active_deployment_id", active.id.as_str());
    Ok(())
}

fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Whether the host configured or recorded the structured `domain` list
fn uses_structured_domains(data: &ResourceData) -> bool {
    let configured = |spec: Option<&Value>| {
        spec.and_then(codec::root)
            .is_some_and(|root| value::blocks(root, "domain").next().is_some())
    };
    configured(data.prior().and_then(|prior| prior.get("spec"))) || configured(data.get("spec"))
}
