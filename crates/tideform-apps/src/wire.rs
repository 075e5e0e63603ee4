//! Vendor wire types for App Platform
//!
//! Field names and enum strings follow the vendor's published App Spec schema
//! verbatim. Unset scalars are omitted on the wire, unset nested records are
//! `None`, and empty lists are skipped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        ///
        /// Strings the vendor adds later decode to `Other` and are sent back
        /// unchanged.
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            Other(String),
        }

        impl $name {
            /// Every accepted wire string, in declaration order
            pub const ALL: &'static [&'static str] = &[$($wire),+];

            /// Parse a verbatim wire string, known values only
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Like [`Self::parse`], keeping unknown non-empty strings as `Other`
            pub fn lenient(s: &str) -> Option<Self> {
                if s.is_empty() {
                    return None;
                }
                Some(Self::parse(s).unwrap_or_else(|| Self::Other(s.to_string())))
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(s) => s,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::parse(&s).unwrap_or(Self::Other(s)))
            }
        }
    };
}

wire_enum! {
    /// Role of a domain within the app
    pub enum DomainType {
        Unspecified => "UNSPECIFIED",
        Default => "DEFAULT",
        Primary => "PRIMARY",
        Alias => "ALIAS",
    }
}

wire_enum! {
    /// When an environment variable is available
    pub enum EnvVarScope {
        Unset => "UNSET",
        RunTime => "RUN_TIME",
        BuildTime => "BUILD_TIME",
        RunAndBuildTime => "RUN_AND_BUILD_TIME",
    }
}

wire_enum! {
    pub enum EnvVarType {
        General => "GENERAL",
        Secret => "SECRET",
    }
}

wire_enum! {
    pub enum RegistryType {
        Unspecified => "UNSPECIFIED",
        DockerHub => "DOCKER_HUB",
        Docr => "DOCR",
    }
}

wire_enum! {
    /// Point in the deployment lifecycle at which a job runs
    pub enum JobKind {
        Unspecified => "UNSPECIFIED",
        PreDeploy => "PRE_DEPLOY",
        PostDeploy => "POST_DEPLOY",
        FailedDeploy => "FAILED_DEPLOY",
    }
}

wire_enum! {
    /// Alert rule; the first four apply to components, the rest to the app
    pub enum AlertRule {
        Unspecified => "UNSPECIFIED_RULE",
        CpuUtilization => "CPU_UTILIZATION",
        MemUtilization => "MEM_UTILIZATION",
        RestartCount => "RESTART_COUNT",
        DeploymentFailed => "DEPLOYMENT_FAILED",
        DeploymentLive => "DEPLOYMENT_LIVE",
        DomainFailed => "DOMAIN_FAILED",
        DomainLive => "DOMAIN_LIVE",
    }
}

wire_enum! {
    pub enum AlertOperator {
        Unspecified => "UNSPECIFIED_OPERATOR",
        GreaterThan => "GREATER_THAN",
        LessThan => "LESS_THAN",
    }
}

wire_enum! {
    pub enum AlertWindow {
        Unspecified => "UNSPECIFIED_WINDOW",
        FiveMinutes => "FIVE_MINUTES",
        TenMinutes => "TEN_MINUTES",
        ThirtyMinutes => "THIRTY_MINUTES",
        OneHour => "ONE_HOUR",
    }
}

wire_enum! {
    pub enum DatabaseEngine {
        Unset => "UNSET",
        Mysql => "MYSQL",
        Pg => "PG",
        Redis => "REDIS",
        Mongodb => "MONGODB",
    }
}

impl AlertRule {
    /// Rules accepted on a component
    pub const COMPONENT: &'static [AlertRule] = &[
        AlertRule::Unspecified,
        AlertRule::CpuUtilization,
        AlertRule::MemUtilization,
        AlertRule::RestartCount,
    ];

    /// Rules accepted at the app level
    pub const APP: &'static [AlertRule] = &[
        AlertRule::DeploymentFailed,
        AlertRule::DeploymentLive,
        AlertRule::DomainFailed,
        AlertRule::DomainLive,
    ];
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_zero_i32(n: &i32) -> bool {
    *n == 0
}

fn is_zero_i64(n: &i64) -> bool {
    *n == 0
}

fn is_zero_f64(n: &f64) -> bool {
    *n == 0.0
}

/// Declarative description of an app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub region: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<DomainSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_sites: Vec<StaticSiteSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workers: Vec<WorkerSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<JobSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub databases: Vec<DatabaseSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<AlertSpec>,
}

impl AppSpec {
    /// Names of every non-database component, in kind order
    pub fn component_names(&self) -> Vec<(ComponentKind, &str)> {
        let mut names = Vec::new();
        names.extend(self.services.iter().map(|c| (ComponentKind::Service, c.base.name.as_str())));
        names.extend(
            self.static_sites
                .iter()
                .map(|c| (ComponentKind::StaticSite, c.base.name.as_str())),
        );
        names.extend(self.workers.iter().map(|c| (ComponentKind::Worker, c.base.name.as_str())));
        names.extend(self.jobs.iter().map(|c| (ComponentKind::Job, c.base.name.as_str())));
        names.extend(
            self.functions
                .iter()
                .map(|c| (ComponentKind::Function, c.base.name.as_str())),
        );
        names
    }
}

/// Kinds of deployable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Service,
    StaticSite,
    Worker,
    Job,
    Function,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Service,
        ComponentKind::StaticSite,
        ComponentKind::Worker,
        ComponentKind::Job,
        ComponentKind::Function,
    ];

    /// Key of the component list in the host configuration tree
    pub fn host_key(&self) -> &'static str {
        match self {
            ComponentKind::Service => "service",
            ComponentKind::StaticSite => "static_site",
            ComponentKind::Worker => "worker",
            ComponentKind::Job => "job",
            ComponentKind::Function => "function",
        }
    }

    /// Whether the kind carries `alert` and `log_destination`
    pub fn has_observability(&self) -> bool {
        !matches!(self, ComponentKind::StaticSite)
    }

    /// Whether the kind carries `routes` and `cors`
    pub fn has_routing(&self) -> bool {
        matches!(
            self,
            ComponentKind::Service | ComponentKind::StaticSite | ComponentKind::Function
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainSpec {
    #[serde(rename = "domain", default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<DomainType>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub wildcard: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,
}

/// Fields every component kind shares
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentBase {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHostedSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab: Option<GitHostedSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs: Vec<EnvVar>,
}

/// Build settings shared by all kinds except functions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment_slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub dockerfile_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_command: String,
}

/// Alerting and log forwarding shared by all kinds except static sites
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observability {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<AlertSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log_destinations: Vec<LogDestination>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSpec {
    #[serde(flatten)]
    pub base: ComponentBase,
    #[serde(flatten)]
    pub build: BuildSettings,
    #[serde(flatten)]
    pub observability: Observability,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub run_command: String,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub http_port: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance_size_slug: String,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub instance_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_ports: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticSiteSpec {
    #[serde(flatten)]
    pub base: ComponentBase,
    #[serde(flatten)]
    pub build: BuildSettings,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output_dir: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub index_document: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_document: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub catchall_document: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerSpec {
    #[serde(flatten)]
    pub base: ComponentBase,
    #[serde(flatten)]
    pub build: BuildSettings,
    #[serde(flatten)]
    pub observability: Observability,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub run_command: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance_size_slug: String,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub instance_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(flatten)]
    pub base: ComponentBase,
    #[serde(flatten)]
    pub build: BuildSettings,
    #[serde(flatten)]
    pub observability: Observability,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub run_command: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance_size_slug: String,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub instance_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<JobKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    #[serde(flatten)]
    pub base: ComponentBase,
    #[serde(flatten)]
    pub observability: Observability,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsPolicy>,
}

/// Generic git repository reachable by clone URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo_clone_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch: String,
}

/// Repository on GitHub or GitLab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GitHostedSource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deploy_on_push: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub registry_type: RegistryType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub registry: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvVar {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<EnvVarScope>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub env_type: Option<EnvVarType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub preserve_path_prefix: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub http_path: String,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub initial_delay_seconds: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub period_seconds: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub timeout_seconds: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub success_threshold: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub failure_threshold: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorsPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_origins: Vec<StringMatch>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expose_headers: Vec<String>,
    /// Free-form duration such as "5h30m", parsed by the vendor
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub max_age: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_credentials: bool,
}

/// One origin matcher; exactly one field is populated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringMatch {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exact: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regex: String,
}

/// Alert on an app or a component
///
/// App-level alerts only use `rule` and `disabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSpec {
    pub rule: AlertRule,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<AlertOperator>,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<AlertWindow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogDestination {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub papertrail: Option<PapertrailSink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datadog: Option<DatadogSink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logtail: Option<LogtailSink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PapertrailSink {
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatadogSink {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogtailSink {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<DatabaseEngine>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub production: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub db_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub db_user: String,
}

// ============ API objects ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    #[serde(default)]
    pub spec: AppSpec,
    #[serde(default)]
    pub default_ingress: String,
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active_deployment: Option<Deployment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub progress: Option<DeploymentProgress>,
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Step counters reported for a deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentProgress {
    #[serde(default)]
    pub pending_steps: u32,
    #[serde(default)]
    pub running_steps: u32,
    #[serde(default)]
    pub success_steps: u32,
    #[serde(default)]
    pub error_steps: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub steps: Vec<DeploymentStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStep {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: Option<StepReason>,
    #[serde(default)]
    pub steps: Vec<DeploymentStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReason {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl DeploymentProgress {
    pub fn is_complete(&self) -> bool {
        self.success_steps == self.total_steps
    }

    pub fn has_errors(&self) -> bool {
        self.error_steps > 0
    }
}

impl std::fmt::Display for DeploymentProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "total_steps={} success_steps={} error_steps={} running_steps={} pending_steps={}",
            self.total_steps,
            self.success_steps,
            self.error_steps,
            self.running_steps,
            self.pending_steps
        )?;
        for step in &self.steps {
            step.render(f, 1)?;
        }
        Ok(())
    }
}

impl DeploymentStep {
    fn render(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        write!(f, "\n{}- {} [{}]", "  ".repeat(depth), self.name, self.status)?;
        if let Some(reason) = &self.reason {
            write!(f, ": {} ({})", reason.message, reason.code)?;
        }
        for step in &self.steps {
            step.render(f, depth + 1)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppRequest<'a> {
    pub spec: &'a AppSpec,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppRoot {
    pub app: App,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeploymentRoot {
    pub deployment: Deployment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeploymentsRoot {
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    #[serde(default)]
    pub links: Links,
}

/// Paging links returned with list responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub pages: Option<Pages>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pages {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}
