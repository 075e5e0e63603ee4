use crate::files;
use colored::Colorize;
use std::path::Path;
use tideform_apps::{RESOURCE_TYPE, canonical_spec};
use tideform_provider::{ActionType, Plan};

pub fn handle(config: &Path, state: Option<&Path>, destroy: bool, json: bool) -> anyhow::Result<()> {
    let mut data = files::load_valid_config(config)?;

    if let Some(prior) = state.map(files::load_state).transpose()?.flatten() {
        if let Some(id) = prior.id() {
            data = data.with_id(id);
        }
        data = data.with_prior(prior.attributes().clone());
    }

    let plan = Plan::for_resource(&data, !destroy, &["spec"], canonical_spec);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let action = plan.to_string();
    let action = match plan.action {
        ActionType::Create => action.green(),
        ActionType::Update => action.yellow(),
        ActionType::Delete => action.red(),
        ActionType::NoOp => action.normal(),
    };
    let target = data.id().unwrap_or("(new)");
    println!("{} {}: {}", RESOURCE_TYPE, target.cyan(), action);
    Ok(())
}
