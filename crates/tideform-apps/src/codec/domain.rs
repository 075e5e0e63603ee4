//! Domains
//!
//! Two host representations coexist: the structured `domain` list and the
//! legacy flat `domains` set. A non-empty `domain` wins; otherwise each
//! legacy name becomes a domain with no type, no wildcard and no zone.

use super::value::{self, Block};
use crate::wire::{DomainSpec, DomainType};
use serde_json::{Value, json};

pub(crate) fn expand(root: &Block) -> Vec<DomainSpec> {
    let structured: Vec<DomainSpec> = value::blocks(root, "domain")
        .map(|domain| DomainSpec {
            name: value::string(domain, "name"),
            domain_type: DomainType::lenient(&value::string(domain, "type")),
            wildcard: value::boolean(domain, "wildcard"),
            zone: value::string(domain, "zone"),
        })
        .collect();
    if !structured.is_empty() {
        return structured;
    }

    value::strings(root, "domains")
        .into_iter()
        .map(|name| DomainSpec {
            name,
            ..Default::default()
        })
        .collect()
}

/// Legacy flat set of domain names; always emitted
pub(crate) fn flatten_names(domains: &[DomainSpec]) -> Value {
    Value::Array(domains.iter().map(|d| Value::from(d.name.as_str())).collect())
}

/// Structured list; emitted only when the host uses `domain`
pub(crate) fn flatten_structured(domains: &[DomainSpec]) -> Value {
    Value::Array(
        domains
            .iter()
            .map(|d| {
                json!({
                    "name": d.name,
                    "type": d.domain_type.as_ref().map(|t| t.as_str()).unwrap_or_default(),
                    "wildcard": d.wildcard,
                    "zone": d.zone,
                })
            })
            .collect(),
    )
}
