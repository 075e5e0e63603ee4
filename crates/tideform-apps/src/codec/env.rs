//! Environment variables
//!
//! `env` is a set in the host. An element's identity is
//! `(key, scope, canonical type, value)`, where an empty type and `GENERAL`
//! are the same thing.

use super::value::{self, Block};
use crate::wire::{EnvVar, EnvVarScope, EnvVarType};
use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};

pub(crate) fn expand<'a>(items: impl Iterator<Item = &'a Block>) -> Vec<EnvVar> {
    items
        .map(|env| EnvVar {
            key: value::string(env, "key"),
            value: value::string(env, "value"),
            scope: EnvVarScope::lenient(&value::string(env, "scope")),
            env_type: EnvVarType::lenient(&value::string(env, "type")),
        })
        .collect()
}

pub(crate) fn flatten(envs: &[EnvVar]) -> Value {
    Value::Array(
        envs.iter()
            .map(|env| {
                json!({
                    "key": env.key,
                    "value": env.value,
                    "scope": env.scope.as_ref().map(|s| s.as_str()).unwrap_or_default(),
                    "type": env.env_type.as_ref().map(|t| t.as_str()).unwrap_or_default(),
                })
            })
            .collect(),
    )
}

/// Canonical form of an env `type`: `GENERAL` and unset are both `""`
pub fn canonical_env_type(env_type: &str) -> &str {
    match env_type {
        "GENERAL" => "",
        other => other,
    }
}

/// Stable identity of one host env record
///
/// Equal for records that differ only in `type` being unset vs `GENERAL`, and
/// stable across processes so re-reads keep the same set identities.
pub fn env_hash(env: &Map<String, Value>) -> u64 {
    let env_type = value::string(env, "type");
    let mut hasher = Sha256::new();
    for part in [
        value::string(env, "key"),
        value::string(env, "scope"),
        canonical_env_type(&env_type).to_string(),
        value::string(env, "value"),
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Rewrite an env set into its canonical, order-independent form
pub(crate) fn canonicalize(items: &[Value]) -> Value {
    let mut envs: Vec<(u64, Value)> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|env| {
            let mut env = env.clone();
            let env_type = value::string(&env, "type");
            env.insert(
                "type".to_string(),
                Value::from(canonical_env_type(&env_type)),
            );
            (env_hash(&env), Value::Object(env))
        })
        .collect();
    envs.sort_by_key(|(hash, _)| *hash);
    envs.dedup_by_key(|(hash, _)| *hash);
    Value::Array(envs.into_iter().map(|(_, env)| env).collect())
}
