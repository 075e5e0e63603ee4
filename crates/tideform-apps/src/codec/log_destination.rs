//! Log forwarding destinations
//!
//! Exactly one sink is expected per destination; whichever sub-record is
//! populated is carried across, absent ones stay `None`.

use super::value::{self, Block, block_list};
use crate::wire::{DatadogSink, LogDestination, LogtailSink, PapertrailSink};
use serde_json::{Value, json};

pub(crate) fn expand<'a>(items: impl Iterator<Item = &'a Block>) -> Vec<LogDestination> {
    items
        .map(|dest| LogDestination {
            name: value::string(dest, "name"),
            papertrail: value::single(dest, "papertrail").map(|p| PapertrailSink {
                endpoint: value::string(p, "endpoint"),
            }),
            datadog: value::single(dest, "datadog").map(|d| DatadogSink {
                endpoint: value::string(d, "endpoint"),
                api_key: value::string(d, "api_key"),
            }),
            logtail: value::single(dest, "logtail").map(|l| LogtailSink {
                token: value::string(l, "token"),
            }),
        })
        .collect()
}

pub(crate) fn flatten(destinations: &[LogDestination]) -> Value {
    Value::Array(
        destinations
            .iter()
            .map(|dest| {
                json!({
                    "name": dest.name,
                    "papertrail": block_list(dest.papertrail.as_ref().map(|p| json!({"endpoint": p.endpoint}))),
                    "datadog": block_list(dest.datadog.as_ref().map(|d| json!({"endpoint": d.endpoint, "api_key": d.api_key}))),
                    "logtail": block_list(dest.logtail.as_ref().map(|l| json!({"token": l.token}))),
                })
            })
            .collect(),
    )
}
