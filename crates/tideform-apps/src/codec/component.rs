//! Deployable components: services, static sites, workers, jobs, functions
//!
//! Each kind is assembled from the shared base, then the build settings and
//! observability blocks where the kind carries them, then its own fields.

use super::value::{self, Block, block_list};
use super::{alert, cors, env, log_destination, source};
use crate::wire::{
    BuildSettings, ComponentBase, FunctionSpec, HealthCheck, JobKind, JobSpec, Observability,
    Route, ServiceSpec, StaticSiteSpec, WorkerSpec,
};
use serde_json::{Map, Value, json};

// ============ Expand (host -> wire) ============

pub(crate) fn expand_service(block: &Block) -> ServiceSpec {
    ServiceSpec {
        base: expand_base(block),
        build: expand_build(block),
        observability: expand_observability(block),
        run_command: value::string(block, "run_command"),
        http_port: value::int32(block, "http_port"),
        instance_size_slug: value::string(block, "instance_size_slug"),
        instance_count: value::int64(block, "instance_count"),
        health_check: value::single(block, "health_check").map(expand_health_check),
        routes: expand_routes(block),
        internal_ports: value::ints(block, "internal_ports"),
        cors: value::single(block, "cors").map(cors::expand),
    }
}

pub(crate) fn expand_static_site(block: &Block) -> StaticSiteSpec {
    StaticSiteSpec {
        base: expand_base(block),
        build: expand_build(block),
        output_dir: value::string(block, "output_dir"),
        index_document: value::string(block, "index_document"),
        error_document: value::string(block, "error_document"),
        catchall_document: value::string(block, "catchall_document"),
        routes: expand_routes(block),
        cors: value::single(block, "cors").map(cors::expand),
    }
}

pub(crate) fn expand_worker(block: &Block) -> WorkerSpec {
    WorkerSpec {
        base: expand_base(block),
        build: expand_build(block),
        observability: expand_observability(block),
        run_command: value::string(block, "run_command"),
        instance_size_slug: value::string(block, "instance_size_slug"),
        instance_count: value::int64(block, "instance_count"),
    }
}

pub(crate) fn expand_job(block: &Block) -> JobSpec {
    JobSpec {
        base: expand_base(block),
        build: expand_build(block),
        observability: expand_observability(block),
        run_command: value::string(block, "run_command"),
        instance_size_slug: value::string(block, "instance_size_slug"),
        instance_count: value::int64(block, "instance_count"),
        kind: JobKind::lenient(&value::string(block, "kind")),
    }
}

pub(crate) fn expand_function(block: &Block) -> FunctionSpec {
    FunctionSpec {
        base: expand_base(block),
        observability: expand_observability(block),
        routes: expand_routes(block),
        cors: value::single(block, "cors").map(cors::expand),
    }
}

fn expand_base(block: &Block) -> ComponentBase {
    let mut base = ComponentBase {
        name: value::string(block, "name"),
        source_dir: value::string(block, "source_dir"),
        envs: env::expand(value::blocks(block, "env")),
        ..Default::default()
    };
    source::expand_into(block, &mut base);
    base
}

fn expand_build(block: &Block) -> BuildSettings {
    BuildSettings {
        environment_slug: value::string(block, "environment_slug"),
        dockerfile_path: value::string(block, "dockerfile_path"),
        build_command: value::string(block, "build_command"),
    }
}

fn expand_observability(block: &Block) -> Observability {
    Observability {
        alerts: alert::expand_component(value::blocks(block, "alert")),
        log_destinations: log_destination::expand(value::blocks(block, "log_destination")),
    }
}

fn expand_routes(block: &Block) -> Vec<Route> {
    value::blocks(block, "routes")
        .map(|route| Route {
            path: value::string(route, "path"),
            preserve_path_prefix: value::boolean(route, "preserve_path_prefix"),
        })
        .collect()
}

fn expand_health_check(block: &Block) -> HealthCheck {
    HealthCheck {
        http_path: value::string(block, "http_path"),
        initial_delay_seconds: value::int32(block, "initial_delay_seconds"),
        period_seconds: value::int32(block, "period_seconds"),
        timeout_seconds: value::int32(block, "timeout_seconds"),
        success_threshold: value::int32(block, "success_threshold"),
        failure_threshold: value::int32(block, "failure_threshold"),
    }
}

// ============ Flatten (wire -> host) ============

pub(crate) fn flatten_service(service: &ServiceSpec) -> Value {
    let mut out = flatten_base(&service.base);
    flatten_build(&service.build, &mut out);
    flatten_observability(&service.observability, &mut out);
    out.insert("run_command".to_string(), json!(service.run_command));
    out.insert("http_port".to_string(), json!(service.http_port));
    out.insert(
        "instance_size_slug".to_string(),
        json!(service.instance_size_slug),
    );
    out.insert("instance_count".to_string(), json!(service.instance_count));
    out.insert(
        "health_check".to_string(),
        block_list(service.health_check.as_ref().map(flatten_health_check)),
    );
    out.insert("routes".to_string(), flatten_routes(&service.routes));
    out.insert("internal_ports".to_string(), json!(service.internal_ports));
    out.insert("cors".to_string(), cors::flatten(service.cors.as_ref()));
    Value::Object(out)
}

pub(crate) fn flatten_static_site(site: &StaticSiteSpec) -> Value {
    let mut out = flatten_base(&site.base);
    flatten_build(&site.build, &mut out);
    out.insert("output_dir".to_string(), json!(site.output_dir));
    out.insert("index_document".to_string(), json!(site.index_document));
    out.insert("error_document".to_string(), json!(site.error_document));
    out.insert(
        "catchall_document".to_string(),
        json!(site.catchall_document),
    );
    out.insert("routes".to_string(), flatten_routes(&site.routes));
    out.insert("cors".to_string(), cors::flatten(site.cors.as_ref()));
    Value::Object(out)
}

pub(crate) fn flatten_worker(worker: &WorkerSpec) -> Value {
    let mut out = flatten_base(&worker.base);
    flatten_build(&worker.build, &mut out);
    flatten_observability(&worker.observability, &mut out);
    out.insert("run_command".to_string(), json!(worker.run_command));
    out.insert(
        "instance_size_slug".to_string(),
        json!(worker.instance_size_slug),
    );
    out.insert("instance_count".to_string(), json!(worker.instance_count));
    Value::Object(out)
}

pub(crate) fn flatten_job(job: &JobSpec) -> Value {
    let mut out = flatten_base(&job.base);
    flatten_build(&job.build, &mut out);
    flatten_observability(&job.observability, &mut out);
    out.insert("run_command".to_string(), json!(job.run_command));
    out.insert(
        "instance_size_slug".to_string(),
        json!(job.instance_size_slug),
    );
    out.insert("instance_count".to_string(), json!(job.instance_count));
    out.insert(
        "kind".to_string(),
        json!(job.kind.as_ref().map(|k| k.as_str()).unwrap_or_default()),
    );
    Value::Object(out)
}

pub(crate) fn flatten_function(function: &FunctionSpec) -> Value {
    let mut out = flatten_base(&function.base);
    flatten_observability(&function.observability, &mut out);
    out.insert("routes".to_string(), flatten_routes(&function.routes));
    out.insert("cors".to_string(), cors::flatten(function.cors.as_ref()));
    Value::Object(out)
}

fn flatten_base(base: &ComponentBase) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("name".to_string(), json!(base.name));
    out.insert("source_dir".to_string(), json!(base.source_dir));
    source::flatten_into(base, &mut out);
    out.insert("env".to_string(), env::flatten(&base.envs));
    out
}

fn flatten_build(build: &BuildSettings, out: &mut Map<String, Value>) {
    out.insert(
        "environment_slug".to_string(),
        json!(build.environment_slug),
    );
    out.insert("dockerfile_path".to_string(), json!(build.dockerfile_path));
    out.insert("build_command".to_string(), json!(build.build_command));
}

fn flatten_observability(observability: &Observability, out: &mut Map<String, Value>) {
    out.insert(
        "alert".to_string(),
        alert::flatten_component(&observability.alerts),
    );
    out.insert(
        "log_destination".to_string(),
        log_destination::flatten(&observability.log_destinations),
    );
}

fn flatten_routes(routes: &[Route]) -> Value {
    Value::Array(
        routes
            .iter()
            .map(|route| {
                json!({
                    "path": route.path,
                    "preserve_path_prefix": route.preserve_path_prefix,
                })
            })
            .collect(),
    )
}

fn flatten_health_check(check: &HealthCheck) -> Value {
    json!({
        "http_path": check.http_path,
        "initial_delay_seconds": check.initial_delay_seconds,
        "period_seconds": check.period_seconds,
        "timeout_seconds": check.timeout_seconds,
        "success_threshold": check.success_threshold,
        "failure_threshold": check.failure_threshold,
    })
}
