//! create / read / update / delete against a state file

use super::Provider;
use crate::files;
use anyhow::Context;
use std::path::Path;
use tideform_apps::{AppResource, AppsClient};
use tideform_provider::{OperationContext, Resource, ResourceData};

fn resource(provider: Provider) -> (AppResource<AppsClient>, OperationContext) {
    let resource = AppResource::new(provider.client).with_reconciler(provider.reconciler);
    (resource, provider.ctx)
}

pub async fn create(config: &Path, state: &Path) -> anyhow::Result<()> {
    let mut data = files::load_valid_config(config)?;
    if let Some(existing) = files::load_state(state)? {
        if let Some(id) = existing.id() {
            anyhow::bail!(
                "{} already tracks app {}; use `tideform update`",
                state.display(),
                id
            );
        }
    }

    let (resource, ctx) = resource(Provider::load()?);
    let result = resource.create(&ctx, &mut data).await;

    // an app that was created but failed to deploy is still tracked
    if data.id().is_some() {
        files::save_state(state, &data)?;
    }
    result.context("create failed")?;

    println!("{}", files::render(&data)?);
    Ok(())
}

pub async fn read(state: &Path) -> anyhow::Result<()> {
    let mut data = files::require_state(state)?;
    let (resource, ctx) = resource(Provider::load()?);

    resource.read(&ctx, &mut data).await.context("read failed")?;
    persist(state, &data)
}

pub async fn update(config: &Path, state: &Path) -> anyhow::Result<()> {
    let prior = files::require_state(state)?;
    let id = prior
        .id()
        .with_context(|| format!("{} has no app id; run `tideform create`", state.display()))?;
    let mut data = files::load_valid_config(config)?
        .with_id(id)
        .with_prior(prior.attributes().clone());

    let (resource, ctx) = resource(Provider::load()?);
    resource.update(&ctx, &mut data).await.context("update failed")?;
    persist(state, &data)
}

pub async fn delete(state: &Path) -> anyhow::Result<()> {
    let mut data = files::require_state(state)?;
    let (resource, ctx) = resource(Provider::load()?);

    resource.delete(&ctx, &mut data).await.context("delete failed")?;
    remove_state(state)?;
    tracing::info!("Deleted app, removed {}", state.display());
    Ok(())
}

/// Save refreshed state, or drop it when the app is gone
fn persist(state: &Path, data: &ResourceData) -> anyhow::Result<()> {
    if data.id().is_none() {
        tracing::warn!("App no longer exists, removing {}", state.display());
        return remove_state(state);
    }
    files::save_state(state, data)?;
    println!("{}", files::render(data)?);
    Ok(())
}

fn remove_state(state: &Path) -> anyhow::Result<()> {
    std::fs::remove_file(state).with_context(|| format!("failed to remove {}", state.display()))
}
