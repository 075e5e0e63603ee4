//! Host schema rules for the `spec` attribute
//!
//! The host applies these before a configuration reaches the codec:
//! [`apply_defaults`] fills the schema defaults, [`validate`] enforces
//! allow-lists, lengths and cross-field constraints. The codec itself never
//! defaults or rejects anything.

use crate::codec::SOURCE_SELECTORS;
use crate::codec::value::{self, Block};
use crate::wire::{
    AlertOperator, AlertRule, AlertWindow, ComponentKind, DatabaseEngine, EnvVarScope, JobKind,
    RegistryType,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tideform_provider::Diagnostic;

pub const DEFAULT_INSTANCE_COUNT: i64 = 1;
pub const DEFAULT_IMAGE_TAG: &str = "latest";
pub const DEFAULT_DATADOG_ENDPOINT: &str = "https://http-intake.logs.datadoghq.com";

const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=32;
const DOMAIN_TYPES: [&str; 3] = ["DEFAULT", "PRIMARY", "ALIAS"];
const ENV_TYPES: [&str; 2] = ["GENERAL", "SECRET"];
const LOG_SINKS: [&str; 3] = ["papertrail", "datadog", "logtail"];

/// Fill host-schema defaults in place
///
/// Only unset values (missing, `null` or empty string) are filled.
pub fn apply_defaults(spec: &mut Value) {
    let Some(root) = root_mut(spec) else {
        return;
    };

    for env in blocks_mut(root, "env") {
        default_str(env, "scope", EnvVarScope::RunAndBuildTime.as_str());
    }

    for kind in ComponentKind::ALL {
        for component in blocks_mut(root, kind.host_key()) {
            if matches!(
                kind,
                ComponentKind::Service | ComponentKind::Worker | ComponentKind::Job
            ) && component.get("instance_count").is_none_or(Value::is_null)
            {
                component.insert(
                    "instance_count".to_string(),
                    Value::from(DEFAULT_INSTANCE_COUNT),
                );
            }
            if kind == ComponentKind::Job {
                default_str(component, "kind", JobKind::Unspecified.as_str());
            }
            for env in blocks_mut(component, "env") {
                default_str(env, "scope", EnvVarScope::RunAndBuildTime.as_str());
            }
            for image in blocks_mut(component, "image") {
                default_str(image, "tag", DEFAULT_IMAGE_TAG);
            }
            for dest in blocks_mut(component, "log_destination") {
                for datadog in blocks_mut(dest, "datadog") {
                    default_str(datadog, "endpoint", DEFAULT_DATADOG_ENDPOINT);
                }
            }
        }
    }
}

/// Check a `spec` attribute against the host schema
///
/// Returns every problem found; an empty list means the app spec is valid.
pub fn validate(spec: &Value) -> Vec<Diagnostic> {
    let mut v = Validator::default();

    let items = spec.as_array().map(Vec::as_slice).unwrap_or_default();
    if items.len() > 1 {
        v.error("spec", "at most one spec block is allowed");
    }
    if let Some(root) = items.first().and_then(Value::as_object) {
        v.root(root);
    }

    v.diagnostics
}

#[derive(Default)]
struct Validator {
    diagnostics: Vec<Diagnostic>,
    routes: HashMap<String, String>,
}

impl Validator {
    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(path, message));
    }

    fn root(&mut self, root: &Block) {
        let path = "spec.0";
        self.name(root, path);

        let domain_count = value::blocks(root, "domain").count();
        if domain_count > 0 && !value::strings(root, "domains").is_empty() {
            self.error(
                format!("{path}.domain"),
                "conflicts with domains; use only one of domain or domains",
            );
        }
        for (i, domain) in value::blocks(root, "domain").enumerate() {
            let dpath = format!("{path}.domain.{i}");
            if value::string(domain, "name").is_empty() {
                self.error(format!("{dpath}.name"), "required");
            }
            self.one_of(domain, "type", &DOMAIN_TYPES, &dpath);
        }

        for kind in ComponentKind::ALL {
            for (i, component) in value::blocks(root, kind.host_key()).enumerate() {
                self.component(kind, component, &format!("{path}.{}.{i}", kind.host_key()));
            }
        }

        for (i, db) in value::blocks(root, "database").enumerate() {
            let dpath = format!("{path}.database.{i}");
            if value::string(db, "name").is_empty() {
                self.error(format!("{dpath}.name"), "required");
            }
            self.one_of(db, "engine", DatabaseEngine::ALL, &dpath);
        }

        self.envs(root, path);

        let app_rules: Vec<&str> = AlertRule::APP.iter().map(AlertRule::as_str).collect();
        for (i, alert) in value::blocks(root, "alert").enumerate() {
            let apath = format!("{path}.alert.{i}");
            self.required_one_of(alert, "rule", &app_rules, &apath);
        }
    }

    fn component(&mut self, kind: ComponentKind, block: &Block, path: &str) {
        self.name(block, path);

        let selectors: Vec<&str> = SOURCE_SELECTORS
            .into_iter()
            .filter(|s| value::single(block, s).is_some())
            .collect();
        if selectors.len() > 1 {
            self.error(
                path,
                format!("only one source may be set, found {}", selectors.join(", ")),
            );
        }
        if let Some(image) = value::single(block, "image") {
            self.image(image, &format!("{path}.image.0"));
        }

        self.envs(block, path);

        if kind == ComponentKind::Service {
            self.int_range(block, "http_port", 0, 65535, path);
            if let Some(check) = value::single(block, "health_check") {
                let cpath = format!("{path}.health_check.0");
                for key in [
                    "initial_delay_seconds",
                    "period_seconds",
                    "timeout_seconds",
                    "success_threshold",
                    "failure_threshold",
                ] {
                    self.int_range(check, key, 0, i64::from(i32::MAX), &cpath);
                }
            }
            for (i, port) in value::ints(block, "internal_ports").into_iter().enumerate() {
                if !(1..=65535).contains(&port) {
                    self.error(
                        format!("{path}.internal_ports.{i}"),
                        format!("{port} is not a valid port"),
                    );
                }
            }
        }

        if kind == ComponentKind::Job {
            self.one_of(block, "kind", JobKind::ALL, path);
        }

        if kind.has_routing() {
            self.routes(block, path);
            if let Some(cors) = value::single(block, "cors") {
                if value::blocks(cors, "allow_origins").count() > 1 {
                    self.error(
                        format!("{path}.cors.0.allow_origins"),
                        "at most one allow_origins block is allowed",
                    );
                }
            }
        }

        if kind.has_observability() {
            self.component_alerts(block, path);
            self.log_destinations(block, path);
        }
    }

    fn image(&mut self, image: &Block, path: &str) {
        self.required_one_of(image, "registry_type", RegistryType::ALL, path);
        if value::string(image, "repository").is_empty() {
            self.error(format!("{path}.repository"), "required");
        }
        if value::string(image, "registry_type") == RegistryType::Docr.as_str()
            && !value::string(image, "registry").is_empty()
        {
            self.error(
                format!("{path}.registry"),
                "must be empty when registry_type is DOCR",
            );
        }
    }

    fn envs(&mut self, block: &Block, path: &str) {
        for (i, env) in value::blocks(block, "env").enumerate() {
            let epath = format!("{path}.env.{i}");
            if value::string(env, "key").is_empty() {
                self.error(format!("{epath}.key"), "required");
            }
            self.one_of(env, "scope", EnvVarScope::ALL, &epath);
            self.one_of(env, "type", &ENV_TYPES, &epath);
        }
    }

    fn routes(&mut self, block: &Block, path: &str) {
        for (i, route) in value::blocks(block, "routes").enumerate() {
            let rpath = format!("{path}.routes.{i}.path");
            let route_path = value::string(route, "path");
            if route_path.is_empty() {
                continue;
            }
            if !route_path.starts_with('/') {
                self.error(rpath.clone(), "must start with /");
            }
            if let Some(first) = self.routes.insert(route_path.clone(), rpath.clone()) {
                self.error(
                    rpath,
                    format!("route {route_path} is already used by {first}"),
                );
            }
        }
    }

    fn component_alerts(&mut self, block: &Block, path: &str) {
        let rules: Vec<&str> = AlertRule::COMPONENT.iter().map(AlertRule::as_str).collect();
        for (i, alert) in value::blocks(block, "alert").enumerate() {
            let apath = format!("{path}.alert.{i}");
            self.required_one_of(alert, "rule", &rules, &apath);
            self.one_of(alert, "operator", AlertOperator::ALL, &apath);
            self.one_of(alert, "window", AlertWindow::ALL, &apath);
            let threshold = value::float(alert, "value");
            if threshold < 0.0 {
                self.error(
                    format!("{apath}.value"),
                    format!("must be at least 0, got {threshold}"),
                );
            }
        }
    }

    fn log_destinations(&mut self, block: &Block, path: &str) {
        for (i, dest) in value::blocks(block, "log_destination").enumerate() {
            let dpath = format!("{path}.log_destination.{i}");
            if value::string(dest, "name").is_empty() {
                self.error(format!("{dpath}.name"), "required");
            }
            let sinks = LOG_SINKS
                .iter()
                .filter(|sink| value::single(dest, sink).is_some())
                .count();
            if sinks != 1 {
                self.error(
                    dpath,
                    format!("exactly one of papertrail, datadog or logtail is required, found {sinks}"),
                );
            }
        }
    }

    fn name(&mut self, block: &Block, path: &str) {
        let name = value::string(block, "name");
        if !NAME_LEN.contains(&name.chars().count()) {
            self.error(
                format!("{path}.name"),
                format!(
                    "length must be between {} and {}, got {:?}",
                    NAME_LEN.start(),
                    NAME_LEN.end(),
                    name
                ),
            );
        }
    }

    /// Optional enum: empty is allowed
    fn one_of(&mut self, block: &Block, key: &str, allowed: &[&str], path: &str) {
        let got = value::string(block, key);
        if !got.is_empty() && !allowed.contains(&got.as_str()) {
            self.error(
                format!("{path}.{key}"),
                format!("expected one of {}, got {got:?}", allowed.join(", ")),
            );
        }
    }

    fn required_one_of(&mut self, block: &Block, key: &str, allowed: &[&str], path: &str) {
        if value::string(block, key).is_empty() {
            self.error(format!("{path}.{key}"), "required");
        } else {
            self.one_of(block, key, allowed, path);
        }
    }

    fn int_range(&mut self, block: &Block, key: &str, min: i64, max: i64, path: &str) {
        let n = value::int64(block, key);
        if !(min..=max).contains(&n) {
            self.error(
                format!("{path}.{key}"),
                format!("must be between {min} and {max}, got {n}"),
            );
        }
    }
}

fn root_mut(spec: &mut Value) -> Option<&mut Map<String, Value>> {
    spec.as_array_mut()?.first_mut()?.as_object_mut()
}

fn blocks_mut<'a>(
    block: &'a mut Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a mut Map<String, Value>> + use<'a> {
    block
        .get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}

fn default_str(block: &mut Map<String, Value>, key: &str, default: &str) {
    let unset = match block.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if unset {
        block.insert(key.to_string(), Value::from(default));
    }
}
