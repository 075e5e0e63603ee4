//! Resource and data source traits

use crate::data::ResourceData;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Lifecycle entry points the host invokes for a managed resource
///
/// Every call runs on a single logical task. Implementations must not keep
/// state between calls; the vendor is the source of truth and `data` is the
/// only thing handed back to the host.
#[async_trait]
pub trait Resource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resource type name as registered with the host (e.g. "tideform_app")
    fn type_name(&self) -> &str;

    /// Create the resource from the planned attributes and set its id
    async fn create(&self, ctx: &OperationContext, data: &mut ResourceData)
    -> Result<(), Self::Error>;

    /// Refresh attributes from the vendor; clears the id when the resource is gone
    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData)
    -> Result<(), Self::Error>;

    /// Apply changed attributes to an existing resource
    async fn update(&self, ctx: &OperationContext, data: &mut ResourceData)
    -> Result<(), Self::Error>;

    /// Destroy the resource and clear its id
    async fn delete(&self, ctx: &OperationContext, data: &mut ResourceData)
    -> Result<(), Self::Error>;
}

/// Read-only lookup of an existing vendor object
#[async_trait]
pub trait DataSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn type_name(&self) -> &str;

    async fn read(&self, ctx: &OperationContext, data: &mut ResourceData)
    -> Result<(), Self::Error>;
}

/// Per-operation timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            create: DEFAULT_OPERATION_TIMEOUT,
            update: DEFAULT_OPERATION_TIMEOUT,
            delete: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

/// Context the host passes with every operation
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    cancel: CancellationToken,
    timeouts: Timeouts,
}

impl OperationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }
}
