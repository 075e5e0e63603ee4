//! Spec codec
//!
//! Pure, bidirectional mapping between the host's `spec` attribute (a list
//! holding at most one app record) and the vendor [`AppSpec`].
//!
//! ```text
//!   host spec ──to_wire──▶ AppSpec ──(vendor)──▶ AppSpec ──from_wire──▶ host spec
//! ```
//!
//! The two directions are inverse modulo three known differences: an env
//! `type` of `GENERAL` and an unset type are the same, CORS origin matchers
//! of the same kind collapse, and image tags defaulted by the host schema
//! come back as written. The codec never fails; inputs are validated by the
//! host schema (see [`crate::schema`]) before they get here.

mod alert;
mod component;
mod cors;
mod database;
mod domain;
mod env;
mod log_destination;
mod source;
pub(crate) mod value;

pub use env::{canonical_env_type, env_hash};
pub(crate) use source::SELECTORS as SOURCE_SELECTORS;

use crate::wire::AppSpec;
use serde_json::{Map, Value, json};
use value::Block;

/// Attributes the host must mask when rendering a spec
pub const SENSITIVE_FIELDS: &[&str] = &["env.value", "datadog.api_key", "logtail.token"];

/// Presence markers from host state needed to pick a decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenHints {
    /// Emit the structured `domain` list in addition to the flat `domains` set
    pub structured_domains: bool,
}

impl FlattenHints {
    pub fn structured() -> Self {
        Self {
            structured_domains: true,
        }
    }
}

/// The app record inside the host's `spec` list, if any
pub(crate) fn root(spec: &Value) -> Option<&Block> {
    spec.as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_object)
}

/// Host `spec` to vendor [`AppSpec`]
pub fn to_wire(spec: &Value) -> AppSpec {
    let Some(root) = root(spec) else {
        return AppSpec::default();
    };

    AppSpec {
        name: value::string(root, "name"),
        region: value::string(root, "region"),
        domains: domain::expand(root),
        services: value::blocks(root, "service")
            .map(component::expand_service)
            .collect(),
        static_sites: value::blocks(root, "static_site")
            .map(component::expand_static_site)
            .collect(),
        workers: value::blocks(root, "worker")
            .map(component::expand_worker)
            .collect(),
        jobs: value::blocks(root, "job").map(component::expand_job).collect(),
        functions: value::blocks(root, "function")
            .map(component::expand_function)
            .collect(),
        databases: value::blocks(root, "database")
            .map(database::expand)
            .collect(),
        envs: env::expand(value::blocks(root, "env")),
        alerts: alert::expand_app(value::blocks(root, "alert")),
    }
}

/// Vendor [`AppSpec`] to host `spec`
pub fn from_wire(spec: &AppSpec, hints: FlattenHints) -> Value {
    let mut out = Map::new();
    out.insert("name".to_string(), json!(spec.name));
    out.insert("region".to_string(), json!(spec.region));
    out.insert("domains".to_string(), domain::flatten_names(&spec.domains));
    if hints.structured_domains {
        out.insert(
            "domain".to_string(),
            domain::flatten_structured(&spec.domains),
        );
    }
    out.insert(
        "service".to_string(),
        spec.services.iter().map(component::flatten_service).collect(),
    );
    out.insert(
        "static_site".to_string(),
        spec.static_sites
            .iter()
            .map(component::flatten_static_site)
            .collect(),
    );
    out.insert(
        "worker".to_string(),
        spec.workers.iter().map(component::flatten_worker).collect(),
    );
    out.insert(
        "job".to_string(),
        spec.jobs.iter().map(component::flatten_job).collect(),
    );
    out.insert(
        "function".to_string(),
        spec.functions
            .iter()
            .map(component::flatten_function)
            .collect(),
    );
    out.insert(
        "database".to_string(),
        spec.databases.iter().map(database::flatten).collect(),
    );
    out.insert("env".to_string(), env::flatten(&spec.envs));
    out.insert("alert".to_string(), alert::flatten_app(&spec.alerts));

    json!([out])
}

/// Order- and alias-insensitive form of a host `spec`, for change detection
///
/// Env sets are keyed by [`env_hash`] (so `GENERAL` equals an unset type),
/// and the other set-valued fields are sorted. Attributes holding a zero
/// value are dropped, since [`to_wire`] reads them the same as missing ones.
/// When the structured `domain` list is set, the flat `domains` set is
/// derived from it and left out.
pub fn canonical_spec(spec: &Value) -> Value {
    let mut canonical = canonicalize(spec);
    if let Some(root) = canonical
        .as_array_mut()
        .and_then(|items| items.first_mut())
        .and_then(Value::as_object_mut)
    {
        if root.contains_key("domain") {
            root.remove("domains");
        }
        for key in ["domains", "alert"] {
            if let Some(Value::Array(items)) = root.get_mut(key) {
                sort_set(items);
            }
        }
    }
    canonical
}

const NESTED_SET_KEYS: [&str; 4] = [
    "internal_ports",
    "allow_methods",
    "allow_headers",
    "expose_headers",
];

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| {
                    let canonical = match child {
                        Value::Array(items) if key == "env" => {
                            canonicalize(&env::canonicalize(items))
                        }
                        Value::Array(items) if NESTED_SET_KEYS.contains(&key.as_str()) => {
                            let mut items = items.clone();
                            sort_set(&mut items);
                            Value::Array(items)
                        }
                        _ => canonicalize(child),
                    };
                    (key.clone(), canonical)
                })
                .filter(|(_, canonical)| !is_zero(canonical))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn sort_set(items: &mut Vec<Value>) {
    items.sort_by_cached_key(|item| item.to_string());
    items.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{
        AlertOperator, AlertRule, AlertSpec, AlertWindow, BuildSettings, ComponentBase,
        CorsPolicy, DatabaseEngine, DatabaseSpec, DatadogSink, DomainSpec, DomainType, EnvVar,
        EnvVarScope, EnvVarType, FunctionSpec, GitHostedSource, GitSource, ImageSource, JobKind,
        JobSpec, LogDestination, LogtailSink, Observability, RegistryType, Route, ServiceSpec,
        StaticSiteSpec, StringMatch, WorkerSpec,
    };

    #[test]
    fn test_empty_root_yields_empty_spec() {
        assert_eq!(to_wire(&json!([])), AppSpec::default());
        assert_eq!(to_wire(&json!([null])), AppSpec::default());
        assert_eq!(to_wire(&Value::Null), AppSpec::default());
    }

    #[test]
    fn test_minimal_service_to_wire() {
        let spec = to_wire(&json!([{
            "name": "demo",
            "region": "nyc",
            "service": [{
                "name": "api",
                "github": [{"repo": "o/r", "branch": "main", "deploy_on_push": true}],
                "http_port": 8080,
                "instance_count": 1,
            }],
        }]));

        assert_eq!(
            spec,
            AppSpec {
                name: "demo".to_string(),
                region: "nyc".to_string(),
                services: vec![ServiceSpec {
                    base: ComponentBase {
                        name: "api".to_string(),
                        github: Some(GitHostedSource {
                            repo: "o/r".to_string(),
                            branch: "main".to_string(),
                            deploy_on_push: true,
                        }),
                        ..Default::default()
                    },
                    http_port: 8080,
                    instance_count: 1,
                    ..Default::default()
                }],
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_wire_emits_structured_domain_only_with_hint() {
        let spec = AppSpec {
            name: "demo".to_string(),
            domains: vec![DomainSpec {
                name: "a.example".to_string(),
                domain_type: Some(DomainType::Primary),
                ..Default::default()
            }],
            ..Default::default()
        };

        let legacy = from_wire(&spec, FlattenHints::default());
        assert_eq!(legacy[0]["domains"], json!(["a.example"]));
        assert!(legacy[0].get("domain").is_none());

        let structured = from_wire(&spec, FlattenHints::structured());
        assert_eq!(structured[0]["domains"], json!(["a.example"]));
        assert_eq!(structured[0]["domain"][0]["type"], "PRIMARY");
    }

    #[test]
    fn test_cors_origin_order_on_wire() {
        let spec = to_wire(&json!([{
            "name": "demo",
            "service": [{
                "name": "api",
                "cors": [{"allow_origins": [{"exact": "x", "prefix": "/p"}]}],
            }],
        }]));

        let cors = spec.services[0].cors.as_ref().unwrap();
        assert_eq!(
            serde_json::to_value(&cors.allow_origins).unwrap(),
            json!([{"exact": "x"}, {"prefix": "/p"}])
        );
    }

    #[test]
    fn test_env_secret_round_trip() {
        let host = json!([{
            "name": "demo",
            "env": [{"key": "K", "value": "v", "type": "SECRET", "scope": "RUN_TIME"}],
        }]);
        let wire = to_wire(&host);
        assert_eq!(
            wire.envs,
            vec![EnvVar {
                key: "K".to_string(),
                value: "v".to_string(),
                scope: Some(EnvVarScope::RunTime),
                env_type: Some(EnvVarType::Secret),
            }]
        );

        let back = from_wire(&wire, FlattenHints::default());
        assert_eq!(back[0]["env"], host[0]["env"]);
        assert_eq!(to_wire(&back), wire);
    }

    #[test]
    fn test_round_trip_rich_spec() {
        let wire = AppSpec {
            name: "demo".to_string(),
            region: "ams".to_string(),
            domains: vec![DomainSpec {
                name: "a.example".to_string(),
                domain_type: Some(DomainType::Primary),
                wildcard: true,
                zone: "example".to_string(),
            }],
            services: vec![ServiceSpec {
                base: ComponentBase {
                    name: "api".to_string(),
                    image: Some(ImageSource {
                        registry_type: RegistryType::Docr,
                        registry: String::new(),
                        repository: "api".to_string(),
                        tag: "v1".to_string(),
                    }),
                    envs: vec![EnvVar {
                        key: "A".to_string(),
                        value: "1".to_string(),
                        scope: Some(EnvVarScope::BuildTime),
                        env_type: Some(EnvVarType::General),
                    }],
                    ..Default::default()
                },
                http_port: 8080,
                instance_count: 3,
                internal_ports: vec![9000, 9001],
                cors: Some(CorsPolicy {
                    allow_origins: vec![
                        StringMatch {
                            exact: "https://a.example".to_string(),
                            ..Default::default()
                        },
                        StringMatch {
                            regex: ".*".to_string(),
                            ..Default::default()
                        },
                    ],
                    allow_methods: vec!["GET".to_string()],
                    max_age: "1h".to_string(),
                    allow_credentials: true,
                    ..Default::default()
                }),
                ..Default::default()
            }],
            alerts: vec![AlertSpec {
                rule: AlertRule::DeploymentFailed,
                disabled: false,
                operator: None,
                value: 0.0,
                window: None,
            }],
            ..Default::default()
        };

        let host = from_wire(&wire, FlattenHints::structured());
        assert_eq!(to_wire(&host), wire);
    }

    #[test]
    fn test_round_trip_static_site() {
        let wire = AppSpec {
            name: "site".to_string(),
            static_sites: vec![StaticSiteSpec {
                base: ComponentBase {
                    name: "web".to_string(),
                    source_dir: "frontend".to_string(),
                    github: Some(GitHostedSource {
                        repo: "o/web".to_string(),
                        branch: "main".to_string(),
                        deploy_on_push: false,
                    }),
                    ..Default::default()
                },
                build: BuildSettings {
                    environment_slug: "node-js".to_string(),
                    build_command: "npm run build".to_string(),
                    ..Default::default()
                },
                output_dir: "dist".to_string(),
                index_document: "index.html".to_string(),
                error_document: "404.html".to_string(),
                catchall_document: "index.html".to_string(),
                routes: vec![
                    Route {
                        path: "/docs".to_string(),
                        preserve_path_prefix: true,
                    },
                    Route {
                        path: "/".to_string(),
                        preserve_path_prefix: false,
                    },
                ],
                cors: Some(CorsPolicy {
                    allow_origins: vec![
                        StringMatch {
                            exact: "https://a.example".to_string(),
                            ..Default::default()
                        },
                        StringMatch {
                            prefix: "https://b.".to_string(),
                            ..Default::default()
                        },
                    ],
                    allow_methods: vec!["GET".to_string(), "POST".to_string()],
                    allow_headers: vec!["X-Request-Id".to_string()],
                    expose_headers: vec!["X-Trace".to_string()],
                    max_age: "5h30m".to_string(),
                    allow_credentials: false,
                }),
            }],
            ..Default::default()
        };

        let host = from_wire(&wire, FlattenHints::default());
        assert_eq!(host[0]["static_site"][0]["routes"][0]["path"], "/docs");
        assert_eq!(to_wire(&host), wire);
    }

    #[test]
    fn test_round_trip_worker_and_job() {
        let wire = AppSpec {
            name: "batch".to_string(),
            workers: vec![WorkerSpec {
                base: ComponentBase {
                    name: "queue".to_string(),
                    git: Some(GitSource {
                        repo_clone_url: "https://git.example/o/r.git".to_string(),
                        branch: "main".to_string(),
                    }),
                    ..Default::default()
                },
                build: BuildSettings {
                    dockerfile_path: "Dockerfile.worker".to_string(),
                    ..Default::default()
                },
                run_command: "bin/worker".to_string(),
                instance_size_slug: "basic-xs".to_string(),
                instance_count: 2,
                ..Default::default()
            }],
            jobs: vec![JobSpec {
                base: ComponentBase {
                    name: "migrate".to_string(),
                    image: Some(ImageSource {
                        registry_type: RegistryType::DockerHub,
                        registry: "library".to_string(),
                        repository: "postgres".to_string(),
                        tag: "16".to_string(),
                    }),
                    ..Default::default()
                },
                run_command: "migrate up".to_string(),
                instance_count: 1,
                kind: Some(JobKind::PreDeploy),
                ..Default::default()
            }],
            ..Default::default()
        };

        let host = from_wire(&wire, FlattenHints::default());
        assert_eq!(host[0]["job"][0]["kind"], "PRE_DEPLOY");
        assert_eq!(to_wire(&host), wire);
    }

    #[test]
    fn test_round_trip_function_with_observability() {
        let wire = AppSpec {
            name: "fns".to_string(),
            functions: vec![FunctionSpec {
                base: ComponentBase {
                    name: "api".to_string(),
                    gitlab: Some(GitHostedSource {
                        repo: "o/fns".to_string(),
                        branch: "main".to_string(),
                        deploy_on_push: true,
                    }),
                    ..Default::default()
                },
                observability: Observability {
                    alerts: vec![
                        AlertSpec {
                            rule: AlertRule::CpuUtilization,
                            disabled: false,
                            operator: Some(AlertOperator::GreaterThan),
                            value: 75.5,
                            window: Some(AlertWindow::FiveMinutes),
                        },
                        AlertSpec {
                            rule: AlertRule::Other("HIGH_LATENCY".to_string()),
                            disabled: true,
                            operator: None,
                            value: 0.0,
                            window: None,
                        },
                    ],
                    log_destinations: vec![
                        LogDestination {
                            name: "dd".to_string(),
                            datadog: Some(DatadogSink {
                                endpoint: "https://http-intake.logs.datadoghq.com".to_string(),
                                api_key: "dd-key".to_string(),
                            }),
                            ..Default::default()
                        },
                        LogDestination {
                            name: "tail".to_string(),
                            logtail: Some(LogtailSink {
                                token: "lt-token".to_string(),
                            }),
                            ..Default::default()
                        },
                    ],
                },
                routes: vec![Route {
                    path: "/api".to_string(),
                    preserve_path_prefix: false,
                }],
                cors: None,
            }],
            ..Default::default()
        };

        let host = from_wire(&wire, FlattenHints::default());
        assert_eq!(host[0]["function"][0]["alert"][1]["rule"], "HIGH_LATENCY");
        assert_eq!(to_wire(&host), wire);
    }

    #[test]
    fn test_round_trip_database() {
        let wire = AppSpec {
            name: "data".to_string(),
            databases: vec![DatabaseSpec {
                name: "db".to_string(),
                engine: Some(DatabaseEngine::Pg),
                version: "16".to_string(),
                production: true,
                cluster_name: "main-cluster".to_string(),
                db_name: "app".to_string(),
                db_user: "app".to_string(),
            }],
            ..Default::default()
        };

        let host = from_wire(&wire, FlattenHints::default());
        assert_eq!(host[0]["database"][0]["engine"], "PG");
        assert_eq!(to_wire(&host), wire);
    }

    #[test]
    fn test_canonical_spec_suppresses_general_type() {
        let before = json!([{"name": "demo", "env": [
            {"key": "A", "value": "1", "scope": "RUN_TIME", "type": ""},
            {"key": "B", "value": "2", "scope": "RUN_TIME", "type": "SECRET"},
        ]}]);
        let after = json!([{"name": "demo", "env": [
            {"key": "B", "value": "2", "scope": "RUN_TIME", "type": "SECRET"},
            {"key": "A", "value": "1", "scope": "RUN_TIME", "type": "GENERAL"},
        ]}]);

        assert_ne!(before, after);
        assert_eq!(canonical_spec(&before), canonical_spec(&after));
    }

    #[test]
    fn test_canonical_spec_ignores_zero_values() {
        let configured = json!([{"name": "demo", "service": [{"name": "api", "http_port": 8080}]}]);
        let state = from_wire(&to_wire(&configured), FlattenHints::default());

        assert_ne!(configured, state);
        assert_eq!(canonical_spec(&configured), canonical_spec(&state));
    }

    #[test]
    fn test_canonical_spec_treats_domains_as_derived() {
        let configured = json!([{"name": "demo", "domain": [{"name": "a.example", "type": "PRIMARY"}]}]);
        let state = from_wire(&to_wire(&configured), FlattenHints::structured());
        assert_eq!(state[0]["domains"], json!(["a.example"]));
        assert_eq!(canonical_spec(&configured), canonical_spec(&state));

        // a legacy config still compares its flat set
        let legacy = json!([{"name": "demo", "domains": ["a.example"]}]);
        let renamed = json!([{"name": "demo", "domains": ["b.example"]}]);
        assert_ne!(canonical_spec(&legacy), canonical_spec(&renamed));
    }

    #[test]
    fn test_canonical_spec_detects_real_changes() {
        let before = json!([{"name": "demo", "service": [{"name": "api", "instance_count": 1}]}]);
        let after = json!([{"name": "demo", "service": [{"name": "api", "instance_count": 2}]}]);
        assert_ne!(canonical_spec(&before), canonical_spec(&after));
    }

    #[test]
    fn test_canonical_spec_sorts_sets_but_not_routes() {
        let before = json!([{"domains": ["b", "a"], "service": [{"routes": [{"path": "/a"}, {"path": "/b"}], "internal_ports": [2, 1]}]}]);
        let after = json!([{"domains": ["a", "b"], "service": [{"routes": [{"path": "/b"}, {"path": "/a"}], "internal_ports": [1, 2]}]}]);

        let before = canonical_spec(&before);
        let after = canonical_spec(&after);
        assert_eq!(before[0]["domains"], after[0]["domains"]);
        assert_eq!(
            before[0]["service"][0]["internal_ports"],
            after[0]["service"][0]["internal_ports"]
        );
        assert_ne!(before[0]["service"][0]["routes"], after[0]["service"][0]["routes"]);
    }
}
