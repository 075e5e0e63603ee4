pub mod data_source;
pub mod lifecycle;
pub mod plan;
pub mod validate;

use tideform_apps::{AppsClient, Reconciler};
use tideform_config::ProviderConfig;
use tideform_provider::{OperationContext, Timeouts};
use tokio_util::sync::CancellationToken;

/// Vendor client, reconciler settings and operation context from the provider config
pub(crate) struct Provider {
    pub client: AppsClient,
    pub reconciler: Reconciler,
    pub ctx: OperationContext,
}

impl Provider {
    pub(crate) fn load() -> anyhow::Result<Self> {
        let config = ProviderConfig::load()?;
        let token = config.require_token()?;
        let client = match &config.api_endpoint {
            Some(endpoint) => AppsClient::with_endpoint(token, endpoint),
            None => AppsClient::new(token),
        };
        tracing::debug!("Using API endpoint {}", client.endpoint());

        let reconciler = Reconciler::new()
            .with_poll_interval(config.poll_interval())
            .with_per_page(config.per_page);
        let ctx = OperationContext::new()
            .with_timeouts(Timeouts {
                create: config.timeouts.create(),
                update: config.timeouts.update(),
                delete: config.timeouts.delete(),
            })
            .with_cancellation(cancel_on_ctrl_c());

        Ok(Self {
            client,
            reconciler,
            ctx,
        })
    }
}

/// Token cancelled when the user hits Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            trigger.cancel();
        }
    });
    token
}
