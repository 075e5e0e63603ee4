use super::Provider;
use crate::files;
use serde_json::json;
use tideform_apps::AppDataSource;
use tideform_provider::{DataSource, ResourceData};

pub async fn handle(app_id: &str) -> anyhow::Result<()> {
    let provider = Provider::load()?;
    let source = AppDataSource::new(provider.client);

    let mut data = ResourceData::from_config(json!({ "app_id": app_id }))?;
    source.read(&provider.ctx, &mut data).await?;

    println!("{}", files::render(&data)?);
    Ok(())
}
