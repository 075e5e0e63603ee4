//! App Platform resource for Tideform
//!
//! Manages a DigitalOcean App Platform application as a declarative
//! resource: the host's `spec` attribute is encoded into the vendor app
//! spec, pushed through the `/v2/apps` API, and the resource waits for the
//! resulting deployment before reading the app back.
//!
//! # Modules
//!
//! - [`wire`]: vendor JSON types
//! - [`codec`]: host `spec` <-> vendor spec
//! - [`schema`]: host-side defaults and validation
//! - [`client`]: the [`AppsApi`] seam and its reqwest implementation
//! - [`reconciler`]: deployment polling
//! - [`controller`]: the `tideform_app` resource and data source
//!
//! # Example
//!
//! ```ignore
//! use tideform_apps::{AppResource, AppsClient};
//! use tideform_provider::{OperationContext, Resource, ResourceData};
//!
//! let resource = AppResource::new(AppsClient::new(token));
//! let mut data = ResourceData::from_config(config)?;
//! resource.create(&OperationContext::new(), &mut data).await?;
//! println!("created {}", data.id().unwrap_or_default());
//! ```

pub mod client;
pub mod codec;
pub mod controller;
pub mod error;
pub mod paging;
pub mod reconciler;
pub mod schema;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{AppsApi, AppsClient, DEFAULT_API_ENDPOINT};
pub use codec::{FlattenHints, SENSITIVE_FIELDS, canonical_spec, from_wire, to_wire};
pub use controller::{AppDataSource, AppResource, DATA_SOURCE_TYPE, RESOURCE_TYPE};
pub use error::{AppsError, Result};
pub use paging::{DEFAULT_PER_PAGE, ListOptions, list_all_deployments};
pub use reconciler::{DEFAULT_POLL_INTERVAL, Reconciler};
pub use schema::{apply_defaults, validate};
pub use wire::{App, AppSpec, Deployment, DeploymentProgress};
